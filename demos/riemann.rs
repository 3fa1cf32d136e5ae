//! Midpoint Riemann sum of sin(x) + 1 on [0, 2π], written to stdout as SVG.
//!
//! cargo run --example riemann > riemann.svg

use std::f64::consts::TAU;

use plotarea::prelude::*;
use tracing_subscriber::EnvFilter;

fn main() -> plotarea::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let f = |x: f64| x.sin() + 1.0;
    let interval = [0.0, TAU];
    let n = 12;

    let rects = riemann_rects(f, interval, n, RiemannRule::Midpoint)?;
    let approx = total_area(&rects);

    let mut area = PlotArea::new(
        Configs::new()
            .size(640.0, 360.0)
            .x_range(-0.5, 7.0)
            .y_range(-0.5, 2.5),
    )?;
    area.plot_region("exact", f, interval, 200, &Style::new().fill("#e6f0ff"))?
        .plot_rects("bars", &rects, &Style::default())?
        .plot("f", f, [-0.5, 7.0], DEFAULT_SAMPLES, &Style::new().color("steelblue").width(2.0))?
        .plot_points(
            "samples",
            &rects
                .iter()
                .map(|r| Point::new(r.x + 0.5 * r.width, r.height))
                .collect::<Vec<_>>(),
            &Style::new().radius(2.5),
        )?;

    let mut out = SvgBuffer::new();
    area.mount(&mut out)?;
    println!("{}", out.markup);
    eprintln!("midpoint sum with {n} bars: {approx:.6} (exact {TAU:.6})");
    Ok(())
}
