//! Linear domain-to-pixel scales with d3-compatible tick generation.

use serde::{Deserialize, Serialize};

use crate::core::Domain;

const E10: f64 = 7.0710678118654755; // sqrt(50)
const E5: f64 = 3.1622776601683795; // sqrt(10)
const E2: f64 = 1.4142135623730951; // sqrt(2)

/// Monotonic linear map from `domain` onto `range`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LinearScale {
    domain: Domain,
    range: Domain,
}

impl LinearScale {
    pub const fn new(domain: Domain, range: Domain) -> Self {
        Self { domain, range }
    }

    #[inline]
    pub const fn domain(&self) -> Domain {
        self.domain
    }

    #[inline]
    pub const fn range(&self) -> Domain {
        self.range
    }

    /// Map a domain value to pixels. Values outside the domain extrapolate.
    #[inline]
    pub fn apply(&self, value: f64) -> f64 {
        let [d0, d1] = self.domain;
        let [r0, r1] = self.range;
        let t = (value - d0) / (d1 - d0);
        // Exact endpoints regardless of rounding in the interpolation.
        if t == 0.0 {
            r0
        } else if t == 1.0 {
            r1
        } else {
            r0 * (1.0 - t) + r1 * t
        }
    }

    /// Map pixels back to the domain.
    #[inline]
    pub fn invert(&self, pixel: f64) -> f64 {
        Self::new(self.range, self.domain).apply(pixel)
    }

    /// Whether `pixel` lies inside the range, in either orientation.
    #[inline]
    pub fn contains_pixel(&self, pixel: f64) -> bool {
        let [r0, r1] = self.range;
        pixel >= r0.min(r1) && pixel <= r0.max(r1)
    }

    /// Roughly `count` round values spanning the domain.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        ticks(self.domain[0], self.domain[1], count as f64)
    }

    /// Distance between consecutive ticks for the given target count.
    pub fn tick_step(&self, count: usize) -> f64 {
        let [d0, d1] = self.domain;
        let (lo, hi) = if d1 < d0 { (d1, d0) } else { (d0, d1) };
        tick_increment(lo, hi, count as f64)
    }

    /// Labels matching the tick precision: fixed decimals derived from the
    /// step, comma-grouped thousands, and a typographic minus.
    pub fn tick_format(&self, count: usize) -> impl Fn(f64) -> String + use<> {
        let step = self.tick_step(count).abs();
        let precision = if step > 0.0 && step.is_finite() {
            (-(step.log10() + 1e-9).floor()).max(0.0) as usize
        } else {
            0
        };
        move |v| format_fixed(v, precision)
    }
}

fn tick_spec(start: f64, stop: f64, count: f64) -> (f64, f64, f64) {
    let step = (stop - start) / count.max(0.0);
    let power = step.log10().floor();
    let error = step / 10f64.powf(power);
    let factor = if error >= E10 {
        10.0
    } else if error >= E5 {
        5.0
    } else if error >= E2 {
        2.0
    } else {
        1.0
    };

    let (mut i1, mut i2, inc);
    if power < 0.0 {
        let k = 10f64.powf(-power) / factor;
        i1 = (start * k).round();
        i2 = (stop * k).round();
        if i1 / k < start {
            i1 += 1.0;
        }
        if i2 / k > stop {
            i2 -= 1.0;
        }
        inc = -k;
    } else {
        let k = 10f64.powf(power) * factor;
        i1 = (start / k).round();
        i2 = (stop / k).round();
        if i1 * k < start {
            i1 += 1.0;
        }
        if i2 * k > stop {
            i2 -= 1.0;
        }
        inc = k;
    }

    if i2 < i1 && (0.5..2.0).contains(&count) {
        return tick_spec(start, stop, count * 2.0);
    }
    (i1, i2, inc)
}

/// d3-array `ticks`: integer multiples of a 1/2/5 step.
fn ticks(start: f64, stop: f64, count: f64) -> Vec<f64> {
    if !(count > 0.0) {
        return Vec::new();
    }
    if start == stop {
        return vec![start];
    }

    let reverse = stop < start;
    let (i1, i2, inc) = if reverse {
        tick_spec(stop, start, count)
    } else {
        tick_spec(start, stop, count)
    };
    if !(i2 >= i1) {
        return Vec::new();
    }

    let n = (i2 - i1) as usize + 1;
    let at = |k: f64| if inc < 0.0 { k / -inc } else { k * inc };
    (0..n)
        .map(|i| {
            if reverse {
                at(i2 - i as f64)
            } else {
                at(i1 + i as f64)
            }
        })
        .collect()
}

fn tick_increment(start: f64, stop: f64, count: f64) -> f64 {
    let (_, _, inc) = tick_spec(start, stop, count);
    if inc < 0.0 { 1.0 / -inc } else { inc }
}

fn format_fixed(value: f64, precision: usize) -> String {
    let text = format!("{:.*}", precision, value.abs());
    let (int, frac) = match text.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (text.as_str(), None),
    };

    let mut grouped = String::with_capacity(int.len() + int.len() / 3);
    for (i, ch) in int.chars().enumerate() {
        if i > 0 && (int.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if let Some(frac) = frac {
        grouped.push('.');
        grouped.push_str(frac);
    }

    let negative = value < 0.0 && text.bytes().any(|b| b.is_ascii_digit() && b != b'0');
    if negative {
        format!("\u{2212}{grouped}")
    } else {
        grouped
    }
}

/// Plain shortest round-trip text for a number, with negative zero folded
/// into `0`.
pub fn format_number(value: f64) -> String {
    if value == 0.0 {
        "0".to_string()
    } else {
        value.to_string()
    }
}
