use error_stack::Report;
use serde::{Deserialize, Serialize};

use super::axis::Axis;
use crate::scale::format_number;
use crate::{PlotError, Result};

/// Element shape a layer is created with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LayerKind {
    /// A single `<path>` bound to one datum (lines, regions).
    Path,
    /// A `<g>` whose children are joined against an array (points, rects).
    Group,
}

impl LayerKind {
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Path => "path",
            Self::Group => "g",
        }
    }
}

/// A pending animation of a path's `d` attribute.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transition {
    pub from: String,
    pub duration_ms: u32,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PathLayer {
    /// SVG path data; `None` until first drawn or when there is nothing to draw.
    pub d: Option<String>,
    pub fill: String,
    pub stroke: String,
    pub stroke_width: Option<f64>,
    pub transition: Option<Transition>,
}

impl PathLayer {
    /// Replace the path data, recording a transition from the old shape when
    /// there is one to animate from.
    pub fn set_d(&mut self, d: Option<String>, duration_ms: u32) {
        self.transition = match (self.d.take(), &d) {
            (Some(from), Some(to)) if duration_ms > 0 && from != *to => Some(Transition {
                from,
                duration_ms,
            }),
            _ => None,
        };
        self.d = d;
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub cx: f64,
    pub cy: f64,
    pub r: f64,
    pub fill: String,
    pub stroke: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RectMark {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub fill: String,
    pub stroke: String,
}

/// A child of a group layer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Mark {
    Circle(Circle),
    Rect(RectMark),
}

impl Mark {
    /// Class the mark is tagged with inside its group.
    pub const fn class(&self) -> &'static str {
        match self {
            Self::Circle(_) => "point",
            Self::Rect(_) => "rect",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum LayerBody {
    Path(PathLayer),
    Group(Vec<Mark>),
}

/// A named element of the surface. Names are unique within a surface.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Layer {
    pub name: String,
    pub body: LayerBody,
}

impl Layer {
    pub fn new(kind: LayerKind, name: impl Into<String>) -> Self {
        let body = match kind {
            LayerKind::Path => LayerBody::Path(PathLayer::default()),
            LayerKind::Group => LayerBody::Group(Vec::new()),
        };
        Self {
            name: name.into(),
            body,
        }
    }

    pub const fn kind(&self) -> LayerKind {
        match self.body {
            LayerBody::Path(_) => LayerKind::Path,
            LayerBody::Group(_) => LayerKind::Group,
        }
    }

    pub fn as_path(&self) -> Option<&PathLayer> {
        match &self.body {
            LayerBody::Path(p) => Some(p),
            LayerBody::Group(_) => None,
        }
    }

    pub fn as_path_mut(&mut self) -> Option<&mut PathLayer> {
        match &mut self.body {
            LayerBody::Path(p) => Some(p),
            LayerBody::Group(_) => None,
        }
    }

    pub fn marks(&self) -> &[Mark] {
        match &self.body {
            LayerBody::Group(m) => m,
            LayerBody::Path(_) => &[],
        }
    }

    pub fn marks_mut(&mut self) -> Option<&mut Vec<Mark>> {
        match &mut self.body {
            LayerBody::Group(m) => Some(m),
            LayerBody::Path(_) => None,
        }
    }
}

/// Everything drawn on one chart: the fixed axes, then named layers in
/// creation order (later layers paint over earlier ones).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Surface {
    pub width: f64,
    pub height: f64,
    pub axes: Vec<Axis>,
    pub layers: Vec<Layer>,
}

impl Surface {
    pub fn new(width: f64, height: f64, axes: Vec<Axis>) -> Self {
        Self {
            width,
            height,
            axes,
            layers: Vec::new(),
        }
    }

    pub fn view_box(&self) -> String {
        format!(
            "0 0 {} {}",
            format_number(self.width),
            format_number(self.height)
        )
    }

    pub fn layer(&self, name: &str) -> Option<&Layer> {
        self.layers.iter().find(|l| l.name == name)
    }

    /// The layer called `name`, appended with `kind` if it does not exist.
    pub fn create_if_not_exists(&mut self, kind: LayerKind, name: &str) -> Result<&mut Layer> {
        let index = match self.layers.iter().position(|l| l.name == name) {
            Some(i) => {
                if self.layers[i].kind() != kind {
                    return Err(Report::new(PlotError::LayerKindMismatch {
                        name: name.to_string(),
                    }));
                }
                i
            }
            None => {
                tracing::debug!(layer = name, shape = kind.tag(), "creating layer");
                self.layers.push(Layer::new(kind, name));
                self.layers.len() - 1
            }
        };
        Ok(&mut self.layers[index])
    }

    pub fn remove_layer(&mut self, name: &str) -> Option<Layer> {
        let index = self.layers.iter().position(|l| l.name == name)?;
        Some(self.layers.remove(index))
    }

    /// Drop every pending path animation. Paths stay at their current shape.
    pub fn settle(&mut self) {
        for layer in &mut self.layers {
            if let Some(p) = layer.as_path_mut() {
                p.transition = None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settle_clears_pending_animations() {
        let mut surface = Surface::new(100.0, 100.0, Vec::new());
        let f = surface.create_if_not_exists(LayerKind::Path, "f").unwrap();
        let p = f.as_path_mut().unwrap();
        p.set_d(Some("M0,0".into()), 250);
        p.set_d(Some("M1,1".into()), 250);
        surface.create_if_not_exists(LayerKind::Group, "dots").unwrap();

        surface.settle();
        let p = surface.layer("f").and_then(Layer::as_path).unwrap();
        assert!(p.transition.is_none());
        assert_eq!(p.d.as_deref(), Some("M1,1"));
    }

    #[test]
    fn first_draw_has_no_transition() {
        let mut p = PathLayer::default();
        p.set_d(Some("M0,0L1,1".into()), 250);
        assert!(p.transition.is_none());

        p.set_d(Some("M0,0L2,2".into()), 250);
        assert_eq!(
            p.transition,
            Some(Transition {
                from: "M0,0L1,1".into(),
                duration_ms: 250
            })
        );
    }

    #[test]
    fn unchanged_or_disabled_transitions_are_dropped() {
        let mut p = PathLayer::default();
        p.set_d(Some("M0,0".into()), 250);
        p.set_d(Some("M0,0".into()), 250);
        assert!(p.transition.is_none());

        p.set_d(Some("M1,1".into()), 0);
        assert!(p.transition.is_none());
        assert_eq!(p.d.as_deref(), Some("M1,1"));
    }

    #[test]
    fn layers_are_unique_by_name() {
        let mut surface = Surface::new(100.0, 100.0, Vec::new());
        surface.create_if_not_exists(LayerKind::Path, "f").unwrap();
        surface.create_if_not_exists(LayerKind::Path, "f").unwrap();
        surface.create_if_not_exists(LayerKind::Group, "dots").unwrap();
        assert_eq!(surface.layers.len(), 2);

        let err = surface
            .create_if_not_exists(LayerKind::Group, "f")
            .unwrap_err();
        assert!(matches!(
            err.current_context(),
            PlotError::LayerKindMismatch { .. }
        ));

        assert!(surface.remove_layer("f").is_some());
        assert!(surface.layer("f").is_none());
        assert_eq!(surface.view_box(), "0 0 100 100");
    }

    #[test]
    fn kind_follows_body() {
        assert_eq!(Layer::new(LayerKind::Group, "dots").kind(), LayerKind::Group);
        let line = Layer::new(LayerKind::Path, "f");
        assert!(line.as_path().is_some());
        assert!(line.marks().is_empty());
    }
}
