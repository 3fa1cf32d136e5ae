//! Sampling helpers: evenly spaced function samples and equal-width bars.

use error_stack::Report;
use serde::{Deserialize, Serialize};

use crate::core::{Domain, Point, Rect, check_domain};
use crate::{PlotError, Result};

/// Sample count used by `PlotArea::plot` and `plot_region` callers that have
/// no better choice.
pub const DEFAULT_SAMPLES: usize = 100;

/// Evaluate `f` at `n` evenly spaced x-values from `domain[0]` to `domain[1]`
/// inclusive.
///
/// Each x is computed as `a + i * step` rather than by repeated addition, so
/// the last sample lands exactly on `b` for any `n`.
pub fn generate_points<F>(mut f: F, domain: Domain, n: usize) -> Result<Vec<Point>>
where
    F: FnMut(f64) -> f64,
{
    if n < 2 {
        return Err(Report::new(PlotError::InvalidSampleCount { n, min: 2 }));
    }
    check_domain(domain)?;

    let [a, b] = domain;
    let step = (b - a) / (n - 1) as f64;
    let points = (0..n)
        .map(|i| {
            let x = if i == n - 1 { b } else { a + i as f64 * step };
            Point::new(x, f(x))
        })
        .collect();

    tracing::trace!(n, a, b, "sampled function");
    Ok(points)
}

/// Split `interval` into `n` equal sub-intervals `[x1, x2)` and build one bar
/// per piece with `height = height(x1, x2)`. Bars stand on the zero baseline,
/// so `y == height`; negative heights hang below it.
pub fn generate_rects<H>(interval: Domain, n: usize, mut height: H) -> Result<Vec<Rect>>
where
    H: FnMut(f64, f64) -> f64,
{
    if n == 0 {
        return Err(Report::new(PlotError::InvalidSampleCount { n, min: 1 }));
    }
    check_domain(interval)?;

    let [a, b] = interval;
    let dx = (b - a) / n as f64;
    let rects = (0..n)
        .map(|i| {
            let x1 = a + i as f64 * dx;
            let x2 = if i == n - 1 { b } else { a + (i + 1) as f64 * dx };
            let h = height(x1, x2);
            Rect::new(x1, h, dx, h)
        })
        .collect();

    tracing::trace!(n, a, b, "partitioned interval");
    Ok(rects)
}

/// Where a Riemann bar samples the function inside its sub-interval.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiemannRule {
    #[default]
    Left,
    Right,
    Midpoint,
    /// Mean of both endpoints; the bar's area equals the trapezoid's.
    Trapezoid,
}

impl RiemannRule {
    pub fn height<F>(self, f: &mut F, x1: f64, x2: f64) -> f64
    where
        F: FnMut(f64) -> f64,
    {
        match self {
            Self::Left => f(x1),
            Self::Right => f(x2),
            Self::Midpoint => f(0.5 * (x1 + x2)),
            Self::Trapezoid => 0.5 * (f(x1) + f(x2)),
        }
    }
}

/// `generate_rects` with the height taken from `f` according to `rule`.
pub fn riemann_rects<F>(mut f: F, interval: Domain, n: usize, rule: RiemannRule) -> Result<Vec<Rect>>
where
    F: FnMut(f64) -> f64,
{
    generate_rects(interval, n, |x1, x2| rule.height(&mut f, x1, x2))
}

/// Signed sum of bar areas.
pub fn total_area(rects: &[Rect]) -> f64 {
    rects.iter().map(Rect::area).sum()
}
