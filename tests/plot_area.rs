//! End-to-end behavior of a plot area: sampling, layer identity, joins and
//! the serialized surface.

use plotarea::prelude::*;
use plotarea::render::{LayerKind, Mark};

fn riemann_area() -> PlotArea {
    PlotArea::new(
        Configs::new()
            .container("#chart")
            .size(600.0, 400.0)
            .margins(Margins::uniform(40.0))
            .x_range(-1.0, 4.0)
            .y_range(-2.0, 10.0),
    )
    .unwrap()
}

fn count(svg: &str, needle: &str) -> usize {
    svg.matches(needle).count()
}

#[test]
fn scale_endpoints_hit_the_margin_box() {
    let area = riemann_area();
    assert_eq!(area.x_scale().apply(-1.0), 40.0);
    assert_eq!(area.x_scale().apply(4.0), 560.0);
    assert_eq!(area.y_scale().apply(-2.0), 360.0);
    assert_eq!(area.y_scale().apply(10.0), 40.0);
}

#[test]
fn surface_has_viewbox_and_both_axes() {
    let svg = riemann_area().to_svg();
    assert!(svg.starts_with(r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 600 400">"#));
    assert_eq!(count(&svg, r#"class="x-axis""#), 1);
    assert_eq!(count(&svg, r#"class="y-axis""#), 1);
    assert!(svg.ends_with("</svg>"));
}

#[test]
fn replotting_keeps_a_single_layer() {
    let mut area = riemann_area();
    for k in 1..=5 {
        let k = k as f64;
        area.plot("curve", move |x| k * x * x, [-1.0, 4.0], DEFAULT_SAMPLES, &Style::default())
            .unwrap();
    }
    assert_eq!(area.layers().len(), 1);
    assert_eq!(area.layer("curve").unwrap().kind(), LayerKind::Path);

    let svg = area.to_svg();
    assert_eq!(count(&svg, r#"<path class="curve""#), 1);
    assert_eq!(count(&svg, "<animate "), 1);
}

#[test]
fn shrinking_point_set_removes_trailing_circles() {
    let mut area = riemann_area();
    let many: Vec<Point> = (0..8).map(|i| Point::new(i as f64 * 0.5, 1.0)).collect();
    area.plot_points("dots", &many, &Style::default()).unwrap();
    assert_eq!(area.layer("dots").unwrap().marks().len(), 8);

    let few = &many[..3];
    area.plot_points("dots", few, &Style::default()).unwrap();
    let marks = area.layer("dots").unwrap().marks();
    assert_eq!(marks.len(), 3);
    for (mark, p) in marks.iter().zip(few) {
        let Mark::Circle(c) = mark else {
            panic!("expected circles");
        };
        assert_eq!(c.cx, area.x_scale().apply(p.x));
    }
    assert_eq!(count(&area.to_svg(), r#"<circle class="point""#), 3);
}

#[test]
fn riemann_rects_render_with_zero_relative_sizes() {
    let mut area = riemann_area();
    let f = |x: f64| x * x - 1.0;
    let rects = riemann_rects(f, [0.0, 3.0], 6, RiemannRule::Midpoint).unwrap();
    area.plot_region("under", f, [0.0, 3.0], 60, &Style::new().fill("#cde"))
        .unwrap()
        .plot("f", f, [-1.0, 4.0], DEFAULT_SAMPLES, &Style::new().color("navy"))
        .unwrap()
        .plot_rects("bars", &rects, &Style::default())
        .unwrap();

    let names: Vec<&str> = area.layers().iter().map(|l| l.name.as_str()).collect();
    assert_eq!(names, ["under", "f", "bars"]);

    let xs = *area.x_scale();
    let ys = *area.y_scale();
    let marks = area.layer("bars").unwrap().marks();
    assert_eq!(marks.len(), 6);
    for (mark, rect) in marks.iter().zip(&rects) {
        let Mark::Rect(r) = mark else {
            panic!("expected rects");
        };
        assert_eq!(r.width, xs.apply(rect.width) - xs.apply(0.0));
        assert_eq!(r.height, (ys.apply(0.0) - ys.apply(rect.height)).abs());
        assert!(r.width >= 0.0 && r.height >= 0.0);
    }
    // The first midpoint bar, f(0.25), hangs below the axis: its top edge
    // sits on y = 0 and it extends downward.
    assert!(rects[0].height < 0.0);
    let Mark::Rect(first) = &marks[0] else {
        panic!("expected rects");
    };
    assert!((first.y - ys.apply(0.0)).abs() < 1e-9);
    assert!(first.y + first.height > ys.apply(0.0));

    let svg = area.to_svg();
    assert!(!svg.contains(r#"height="-"#) && !svg.contains(r#"width="-"#));
    assert!(svg.contains(r##"fill="#cde""##));
    assert!(svg.contains(r#"stroke="navy""#));
    assert_eq!(count(&svg, r#"<rect class="rect""#), 6);
}

#[test]
fn undefined_values_leave_gaps() {
    let mut area = riemann_area();
    area.plot("recip", |x| 1.0 / x, [-1.0, 1.0], 3, &Style::default())
        .unwrap();
    let d = area
        .layer("recip")
        .and_then(|l| l.as_path())
        .and_then(|p| p.d.clone())
        .unwrap();
    assert!(!d.contains("inf") && !d.contains("NaN"));
}

#[test]
fn mounting_reports_configured_width() {
    let mut area = riemann_area();
    area.plot_points("p", &[Point::new(1.0, 1.0)], &Style::new().radius(4.0))
        .unwrap();
    let mut buf = SvgBuffer::new();
    area.mount(&mut buf).unwrap();
    assert_eq!(buf.max_width, Some(600.0));
    assert!(buf.markup.contains(r#"r="4""#));
}

#[test]
fn transitions_play_on_one_mount_only() {
    let mut area = riemann_area();
    let mut buf = SvgBuffer::new();
    area.plot("f", |x| x, [-1.0, 4.0], DEFAULT_SAMPLES, &Style::default())
        .unwrap()
        .plot("f", |x| x * x, [-1.0, 4.0], DEFAULT_SAMPLES, &Style::default())
        .unwrap();
    area.mount(&mut buf).unwrap();
    assert_eq!(count(&buf.markup, "<animate "), 1);

    area.plot_points("p", &[Point::new(1.0, 1.0)], &Style::default())
        .unwrap();
    area.mount(&mut buf).unwrap();
    assert_eq!(count(&buf.markup, "<animate "), 0);
    assert_eq!(count(&buf.markup, r#"<path class="f""#), 1);
}

#[test]
fn huge_values_stay_in_path_data() {
    let mut area = riemann_area();
    area.plot("steep", |x| 1e40 * x, [0.0, 1.0], 3, &Style::default())
        .unwrap();
    let d = area
        .layer("steep")
        .and_then(|l| l.as_path())
        .and_then(|p| p.d.clone())
        .unwrap();
    assert!(!d.contains("inf") && !d.contains("NaN"));
    let x1 = area.x_scale().apply(0.5);
    assert!(d.contains(&format!("L{x1},")));
}
