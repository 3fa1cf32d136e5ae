//! SVG serialization of a `Surface`.

use std::fmt::Write;

use super::axis::{Axis, Orient, TICK_PADDING, TICK_SIZE};
use super::components::{Layer, LayerBody, Mark, PathLayer, Surface};
use crate::scale::format_number;

const SVG_NS: &str = "http://www.w3.org/2000/svg";

/// Escape text for use inside a double-quoted attribute or element body.
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            c => out.push(c),
        }
    }
    out
}

fn num(v: f64) -> String {
    format_number(v)
}

pub fn to_svg(surface: &Surface) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = write_surface(&mut out, surface);
    out
}

fn write_surface(out: &mut String, surface: &Surface) -> std::fmt::Result {
    write!(
        out,
        r#"<svg xmlns="{SVG_NS}" viewBox="{}">"#,
        surface.view_box()
    )?;
    for axis in &surface.axes {
        write_axis(out, axis)?;
    }
    for layer in &surface.layers {
        write_layer(out, layer)?;
    }
    out.push_str("</svg>");
    Ok(())
}

fn write_axis(out: &mut String, axis: &Axis) -> std::fmt::Result {
    let anchor = match axis.orient {
        Orient::Bottom => "middle",
        Orient::Left => "end",
    };
    write!(
        out,
        r#"<g class="{}" transform="{}" fill="none" font-size="10" font-family="sans-serif" text-anchor="{anchor}">"#,
        escape(&axis.class),
        axis.transform(),
    )?;
    write!(
        out,
        r#"<path class="domain" stroke="currentColor" d="{}"/>"#,
        axis.domain_path()
    )?;

    let spacing = num(TICK_SIZE + TICK_PADDING);
    let size = num(TICK_SIZE);
    for tick in &axis.ticks {
        let label = escape(&tick.label);
        match axis.orient {
            Orient::Bottom => write!(
                out,
                r#"<g class="tick" opacity="1" transform="translate({},0)"><line stroke="currentColor" y2="{size}"/><text fill="currentColor" y="{spacing}" dy="0.71em">{label}</text></g>"#,
                num(tick.offset)
            )?,
            Orient::Left => write!(
                out,
                r#"<g class="tick" opacity="1" transform="translate(0,{})"><line stroke="currentColor" x2="-{size}"/><text fill="currentColor" x="-{spacing}" dy="0.32em">{label}</text></g>"#,
                num(tick.offset)
            )?,
        }
    }
    out.push_str("</g>");
    Ok(())
}

fn write_layer(out: &mut String, layer: &Layer) -> std::fmt::Result {
    let class = escape(&layer.name);
    match &layer.body {
        LayerBody::Path(path) => write_path(out, &class, path),
        LayerBody::Group(marks) => {
            write!(out, r#"<g class="{class}">"#)?;
            for mark in marks {
                write_mark(out, mark)?;
            }
            out.push_str("</g>");
            Ok(())
        }
    }
}

fn write_path(out: &mut String, class: &str, path: &PathLayer) -> std::fmt::Result {
    write!(
        out,
        r#"<path class="{class}" fill="{}" stroke="{}""#,
        escape(&path.fill),
        escape(&path.stroke)
    )?;
    if let Some(w) = path.stroke_width {
        write!(out, r#" stroke-width="{}""#, num(w))?;
    }
    if let Some(d) = &path.d {
        write!(out, r#" d="{d}""#)?;
    }

    match (&path.transition, &path.d) {
        (Some(t), Some(d)) => write!(
            out,
            r#"><animate attributeName="d" from="{}" to="{d}" dur="{}ms" fill="freeze"/></path>"#,
            t.from, t.duration_ms
        ),
        _ => {
            out.push_str("/>");
            Ok(())
        }
    }
}

fn write_mark(out: &mut String, mark: &Mark) -> std::fmt::Result {
    match mark {
        Mark::Circle(c) => write!(
            out,
            r#"<circle class="{}" r="{}" fill="{}" stroke="{}" cx="{}" cy="{}"/>"#,
            mark.class(),
            num(c.r),
            escape(&c.fill),
            escape(&c.stroke),
            num(c.cx),
            num(c.cy)
        ),
        Mark::Rect(r) => write!(
            out,
            r#"<rect class="{}" fill="{}" stroke="{}" x="{}" y="{}" width="{}" height="{}"/>"#,
            mark.class(),
            escape(&r.fill),
            escape(&r.stroke),
            num(r.x),
            num(r.y),
            num(r.width),
            num(r.height)
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::components::{Circle, LayerKind, Transition};
    use crate::scale::LinearScale;

    #[test]
    fn escapes_attribute_text() {
        assert_eq!(escape(r#"a<b & "c">"#), "a&lt;b &amp; &quot;c&quot;&gt;");
    }

    #[test]
    fn empty_surface() {
        let s = Surface::new(500.0, 300.0, Vec::new());
        assert_eq!(
            to_svg(&s),
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 500 300"></svg>"#
        );
    }

    #[test]
    fn path_with_transition_animates_d() {
        let mut s = Surface::new(10.0, 10.0, Vec::new());
        let layer = s.create_if_not_exists(LayerKind::Path, "f").unwrap();
        *layer.as_path_mut().unwrap() = PathLayer {
            d: Some("M0,0L1,1".into()),
            fill: "none".into(),
            stroke: "black".into(),
            stroke_width: Some(3.0),
            transition: Some(Transition {
                from: "M0,0L1,0".into(),
                duration_ms: 250,
            }),
        };
        let svg = to_svg(&s);
        assert!(svg.contains(
            r#"<path class="f" fill="none" stroke="black" stroke-width="3" d="M0,0L1,1"><animate attributeName="d" from="M0,0L1,0" to="M0,0L1,1" dur="250ms" fill="freeze"/></path>"#
        ));
    }

    #[test]
    fn group_children_in_order() {
        let mut s = Surface::new(10.0, 10.0, Vec::new());
        let layer = s.create_if_not_exists(LayerKind::Group, "pts").unwrap();
        layer.marks_mut().unwrap().push(Mark::Circle(Circle {
            cx: 1.5,
            cy: 2.0,
            r: 3.0,
            fill: "black".into(),
            stroke: "none".into(),
        }));
        assert!(to_svg(&s).contains(
            r#"<g class="pts"><circle class="point" r="3" fill="black" stroke="none" cx="1.5" cy="2"/></g>"#
        ));
    }

    #[test]
    fn axis_ticks_and_labels() {
        let scale = LinearScale::new([0.0, 1.0], [470.0, 30.0]);
        let s = Surface::new(500.0, 500.0, vec![Axis::left("y-axis", &scale, 30.0)]);
        let svg = to_svg(&s);
        assert!(svg.contains(r#"<g class="y-axis" transform="translate(30,0)""#));
        assert!(svg.contains(r#"text-anchor="end""#));
        assert!(svg.contains(
            r#"<g class="tick" opacity="1" transform="translate(0,30)"><line stroke="currentColor" x2="-6"/><text fill="currentColor" x="-9" dy="0.32em">1</text></g>"#
        ));
        // Zero keeps its tick mark but loses its label.
        assert!(svg.contains(r#"x="-9" dy="0.32em"></text>"#));
    }
}
