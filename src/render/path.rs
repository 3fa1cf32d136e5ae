//! Line and area generators in pixel space, serialized as SVG path data.

use std::fmt::Write;

use glam::DVec2;
use lyon_tessellation::path::Event;

use crate::core::Point;
use crate::scale::{LinearScale, format_number};

/// Path commands in full-precision pixel coordinates.
pub type PixelPath = Vec<Event<DVec2, DVec2>>;

/// Map a domain point through both scales.
#[inline]
pub fn project(p: Point, x: &LinearScale, y: &LinearScale) -> DVec2 {
    DVec2::new(x.apply(p.x), y.apply(p.y))
}

/// Project `points` and split them into runs of finite pixels. A sample the
/// function is undefined at (`NaN`, `inf`) ends the current run.
fn finite_runs(points: &[Point], x: &LinearScale, y: &LinearScale) -> Vec<Vec<DVec2>> {
    let mut runs: Vec<Vec<DVec2>> = Vec::new();
    let mut current = Vec::new();
    for &p in points {
        let px = project(p, x, y);
        if px.is_finite() {
            current.push(px);
        } else if !current.is_empty() {
            runs.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        runs.push(current);
    }
    runs
}

/// Append one sub-path through `vertices`.
fn push_run(path: &mut PixelPath, vertices: impl IntoIterator<Item = DVec2>, close: bool) {
    let mut vertices = vertices.into_iter();
    let Some(first) = vertices.next() else {
        return;
    };
    path.push(Event::Begin { at: first });
    let mut last = first;
    for to in vertices {
        path.push(Event::Line { from: last, to });
        last = to;
    }
    path.push(Event::End { last, first, close });
}

/// Polyline through the points, one sub-path per finite run. Returns `None`
/// when nothing is drawable.
pub fn line(points: &[Point], x: &LinearScale, y: &LinearScale) -> Option<PixelPath> {
    let runs = finite_runs(points, x, y);
    if runs.is_empty() {
        return None;
    }

    let mut path = PixelPath::new();
    for run in &runs {
        // A lone point still has to produce a visible segment.
        push_run(&mut path, run.iter().copied(), run.len() == 1);
    }
    Some(path)
}

/// Closed region between the curve and the horizontal pixel line
/// `baseline`: top edge left to right, then back along the baseline.
pub fn area(points: &[Point], x: &LinearScale, y: &LinearScale, baseline: f64) -> Option<PixelPath> {
    let runs = finite_runs(points, x, y);
    if runs.is_empty() {
        return None;
    }

    let mut path = PixelPath::new();
    for run in &runs {
        let floor = run.iter().rev().map(|v| DVec2::new(v.x, baseline));
        push_run(&mut path, run.iter().copied().chain(floor), true);
    }
    Some(path)
}

fn xy(v: DVec2) -> String {
    format!("{},{}", format_number(v.x), format_number(v.y))
}

/// Compact SVG path data (`M1,2L3,4Z`).
pub fn to_svg_data(path: &[Event<DVec2, DVec2>]) -> String {
    let mut d = String::new();
    for event in path {
        // Writing into a String cannot fail.
        let _ = match *event {
            Event::Begin { at } => write!(d, "M{}", xy(at)),
            Event::Line { to, .. } => write!(d, "L{}", xy(to)),
            Event::Quadratic { ctrl, to, .. } => write!(d, "Q{},{}", xy(ctrl), xy(to)),
            Event::Cubic {
                ctrl1, ctrl2, to, ..
            } => write!(d, "C{},{},{}", xy(ctrl1), xy(ctrl2), xy(to)),
            Event::End { close: true, .. } => write!(d, "Z"),
            Event::End { close: false, .. } => Ok(()),
        };
    }
    d
}
