use error_stack::{Report, ResultExt};
use serde::{Deserialize, Serialize};

use crate::{PlotError, Result};

/// A `[min, max]` interval in domain units.
pub type Domain = [f64; 2];

/// One sample of a function.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

/// One bar, in domain units. `y` is the edge away from the baseline and
/// `height` the signed extent back to it, so a bar drawn from zero has
/// `y == height`. Positive heights stand above the baseline (`y` is the top
/// edge); negative heights hang below it (`y` is the bottom edge).
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    #[inline]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Signed area; bars below the axis count negatively.
    #[inline]
    pub fn area(&self) -> f64 {
        self.width * self.height
    }
}

/// Visual overrides for a layer. Unset fields use the layer's defaults.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Style {
    /// Stroke color of line plots.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke: Option<String>,
    /// Stroke width of line plots.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    /// Point radius.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub r: Option<f64>,
}

impl Style {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .change_context(PlotError::InvalidConfig("malformed style".to_string()))
    }

    #[inline]
    pub fn color(mut self, c: impl Into<String>) -> Self {
        self.color = Some(c.into());
        self
    }

    #[inline]
    pub fn fill(mut self, c: impl Into<String>) -> Self {
        self.fill = Some(c.into());
        self
    }

    #[inline]
    pub fn stroke(mut self, c: impl Into<String>) -> Self {
        self.stroke = Some(c.into());
        self
    }

    #[inline]
    pub const fn width(mut self, w: f64) -> Self {
        self.width = Some(w);
        self
    }

    #[inline]
    pub const fn radius(mut self, r: f64) -> Self {
        self.r = Some(r);
        self
    }
}

/// Pixel insets of the drawing rectangle.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Margins {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Margins {
    pub const fn uniform(m: f64) -> Self {
        Self {
            left: m,
            top: m,
            right: m,
            bottom: m,
        }
    }
}

impl Default for Margins {
    fn default() -> Self {
        Self::uniform(30.0)
    }
}

/// Chart configuration. Fixed once a `PlotArea` is built from it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Configs {
    /// CSS selector of the element the surface is mounted into.
    pub container: Option<String>,
    pub width: f64,
    pub height: f64,
    pub margins: Margins,
    pub x_range: Domain,
    pub y_range: Domain,
    /// Duration of path transitions, in milliseconds. Zero disables them.
    pub transition_ms: u32,
}

impl Default for Configs {
    fn default() -> Self {
        Self {
            container: None,
            width: 500.0,
            height: 500.0,
            margins: Margins::default(),
            x_range: [0.0, 1.0],
            y_range: [0.0, 1.0],
            transition_ms: 250,
        }
    }
}

impl Configs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse camelCase JSON (`{"width": 600, "xRange": [-2, 2]}`); missing
    /// keys take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let configs: Self = serde_json::from_str(json)
            .change_context(PlotError::InvalidConfig("malformed configs".to_string()))?;
        configs.validate()?;
        Ok(configs)
    }

    pub fn container(mut self, selector: impl Into<String>) -> Self {
        self.container = Some(selector.into());
        self
    }

    pub const fn size(mut self, width: f64, height: f64) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub const fn margins(mut self, margins: Margins) -> Self {
        self.margins = margins;
        self
    }

    pub const fn x_range(mut self, min: f64, max: f64) -> Self {
        self.x_range = [min, max];
        self
    }

    pub const fn y_range(mut self, min: f64, max: f64) -> Self {
        self.y_range = [min, max];
        self
    }

    pub const fn transition_ms(mut self, ms: u32) -> Self {
        self.transition_ms = ms;
        self
    }

    /// Horizontal pixel span `[left, width - right]` of the drawing rectangle.
    pub fn x_pixels(&self) -> Domain {
        [self.margins.left, self.width - self.margins.right]
    }

    /// Vertical pixel span, bottom first so larger values draw higher.
    pub fn y_pixels(&self) -> Domain {
        [self.height - self.margins.bottom, self.margins.top]
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.width.is_finite() && self.width > 0.0) {
            return Err(Report::new(PlotError::InvalidConfig(format!(
                "width must be positive, got {}",
                self.width
            ))));
        }
        if !(self.height.is_finite() && self.height > 0.0) {
            return Err(Report::new(PlotError::InvalidConfig(format!(
                "height must be positive, got {}",
                self.height
            ))));
        }

        let m = &self.margins;
        if [m.left, m.top, m.right, m.bottom]
            .iter()
            .any(|v| !v.is_finite() || *v < 0.0)
        {
            return Err(Report::new(PlotError::InvalidConfig(
                "margins must be finite and non-negative".to_string(),
            )));
        }
        if m.left + m.right >= self.width || m.top + m.bottom >= self.height {
            return Err(Report::new(PlotError::InvalidConfig(format!(
                "margins leave no drawing area inside {}x{}",
                self.width, self.height
            ))));
        }

        check_domain(self.x_range)
            .change_context(PlotError::InvalidConfig("x_range".to_string()))?;
        check_domain(self.y_range)
            .change_context(PlotError::InvalidConfig("y_range".to_string()))?;
        Ok(())
    }
}

/// A domain is usable when both ends are finite and distinct. Reversed
/// domains are allowed and flip the axis.
pub fn check_domain(domain: Domain) -> Result<()> {
    let [min, max] = domain;
    if !min.is_finite() || !max.is_finite() || min == max {
        return Err(Report::new(PlotError::InvalidDomain { min, max }));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let c = Configs::default();
        assert_eq!(c.width, 500.0);
        assert_eq!(c.height, 500.0);
        assert_eq!(c.margins, Margins::uniform(30.0));
        assert_eq!(c.x_range, [0.0, 1.0]);
        assert_eq!(c.y_range, [0.0, 1.0]);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn json_fills_missing_keys_with_defaults() {
        let c = Configs::from_json(r##"{"container": "#chart", "xRange": [-2, 3], "width": 640}"##)
            .unwrap();
        assert_eq!(c.container.as_deref(), Some("#chart"));
        assert_eq!(c.width, 640.0);
        assert_eq!(c.height, 500.0);
        assert_eq!(c.x_range, [-2.0, 3.0]);
        assert_eq!(c.y_range, [0.0, 1.0]);
        assert_eq!(c.transition_ms, 250);
    }

    #[test]
    fn zero_width_is_rejected_not_defaulted() {
        let err = Configs::from_json(r#"{"width": 0}"#).unwrap_err();
        assert!(matches!(err.current_context(), PlotError::InvalidConfig(_)));
    }

    #[test]
    fn margins_must_leave_room() {
        let c = Configs::new().size(50.0, 50.0).margins(Margins::uniform(25.0));
        assert!(c.validate().is_err());
    }

    #[test]
    fn degenerate_range_is_rejected() {
        assert!(Configs::new().x_range(1.0, 1.0).validate().is_err());
        assert!(Configs::new().y_range(0.0, f64::NAN).validate().is_err());
        assert!(Configs::new().x_range(1.0, -1.0).validate().is_ok());
    }

    #[test]
    fn style_parses_partial_json() {
        let s = Style::from_json(r#"{"color": "steelblue", "width": 1.5}"#).unwrap();
        assert_eq!(s, Style::new().color("steelblue").width(1.5));
        assert!(Style::from_json(r#"{"width": "wide"}"#).is_err());
    }

    #[test]
    fn rect_area_is_signed() {
        assert_eq!(Rect::new(0.0, -2.0, 0.5, -2.0).area(), -1.0);
    }
}
