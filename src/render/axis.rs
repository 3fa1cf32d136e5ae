//! Bottom and left axes laid out the way d3-axis draws them.

use serde::{Deserialize, Serialize};

use crate::core::Domain;
use crate::scale::{LinearScale, format_number};

pub const TICK_COUNT: usize = 10;
pub const TICK_SIZE: f64 = 6.0;
pub const TICK_PADDING: f64 = 3.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Orient {
    Bottom,
    Left,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Tick {
    pub value: f64,
    /// Pixel position along the axis.
    pub offset: f64,
    pub label: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Axis {
    pub class: String,
    pub orient: Orient,
    /// Translation across the axis: the y of a bottom axis, the x of a left one.
    pub position: f64,
    pub range: Domain,
    pub ticks: Vec<Tick>,
}

impl Axis {
    pub fn new(
        class: impl Into<String>,
        orient: Orient,
        scale: &LinearScale,
        position: f64,
        format: impl Fn(f64) -> String,
    ) -> Self {
        let ticks = scale
            .ticks(TICK_COUNT)
            .into_iter()
            .map(|value| Tick {
                value,
                offset: scale.apply(value),
                label: format(value),
            })
            .collect();
        Self {
            class: class.into(),
            orient,
            position,
            range: scale.range(),
            ticks,
        }
    }

    /// Bottom axis with the scale's own tick format.
    pub fn bottom(class: impl Into<String>, scale: &LinearScale, position: f64) -> Self {
        Self::new(class, Orient::Bottom, scale, position, scale.tick_format(TICK_COUNT))
    }

    /// Left axis with plain numeric labels and no label at zero, so it does
    /// not collide with the x-axis labels at the origin.
    pub fn left(class: impl Into<String>, scale: &LinearScale, position: f64) -> Self {
        Self::new(class, Orient::Left, scale, position, |v| {
            if v == 0.0 { String::new() } else { format_number(v) }
        })
    }

    /// The `translate(..)` placing the axis group.
    pub fn transform(&self) -> String {
        match self.orient {
            Orient::Bottom => format!("translate(0,{})", format_number(self.position)),
            Orient::Left => format!("translate({},0)", format_number(self.position)),
        }
    }

    /// Domain line with outer ticks at both ends.
    pub fn domain_path(&self) -> String {
        let [r0, r1] = self.range.map(format_number);
        let outer = format_number(TICK_SIZE);
        match self.orient {
            Orient::Bottom => format!("M{r0},{outer}V0H{r1}V{outer}"),
            Orient::Left => format!("M-{outer},{r0}H0V{r1}H-{outer}"),
        }
    }
}
