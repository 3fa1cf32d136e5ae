//! `PlotArea`: one chart surface with fixed scales and axes, plus named
//! layers that can be redrawn any number of times.

use error_stack::Report;

use crate::core::{Configs, Domain, Point, Rect, Style};
use crate::render::path::{self, to_svg_data};
use crate::render::{
    Axis, Circle, Layer, LayerBody, LayerKind, Mark, PathLayer, RectMark, Surface, join_marks,
};
use crate::runtime::Container;
use crate::sample::generate_points;
use crate::scale::LinearScale;
use crate::{PlotError, Result};

const LINE_STROKE: &str = "black";
const LINE_WIDTH: f64 = 3.0;
const REGION_FILL: &str = "lightblue";
const REGION_STROKE: &str = "none";
const POINT_RADIUS: f64 = 3.0;
const POINT_FILL: &str = "black";
const POINT_STROKE: &str = "none";
const RECT_FILL: &str = "rgba(255, 0, 0, 0.4)";
const RECT_STROKE: &str = "rgba(255, 0, 0, 0.5)";

fn or(value: &Option<String>, fallback: &str) -> String {
    value.as_deref().unwrap_or(fallback).to_string()
}

pub struct PlotArea {
    configs: Configs,
    x_scale: LinearScale,
    y_scale: LinearScale,
    surface: Surface,
}

impl PlotArea {
    /// Build the scales and draw both axes. Each axis sits on the other
    /// axis's zero when that is visible, and on the lower/left edge of the
    /// drawing rectangle otherwise.
    pub fn new(configs: Configs) -> Result<Self> {
        configs.validate()?;

        let x_scale = LinearScale::new(configs.x_range, configs.x_pixels());
        let y_scale = LinearScale::new(configs.y_range, configs.y_pixels());

        let x_zero = x_scale.apply(0.0);
        let y_axis_at = if x_scale.contains_pixel(x_zero) {
            x_zero
        } else {
            configs.margins.left
        };
        let y_zero = y_scale.apply(0.0);
        let x_axis_at = if y_scale.contains_pixel(y_zero) {
            y_zero
        } else {
            configs.height - configs.margins.bottom
        };

        let axes = vec![
            Axis::bottom("x-axis", &x_scale, x_axis_at),
            Axis::left("y-axis", &y_scale, y_axis_at),
        ];
        let surface = Surface::new(configs.width, configs.height, axes);

        tracing::debug!(
            width = configs.width,
            height = configs.height,
            x_axis_at,
            y_axis_at,
            "plot area ready"
        );
        Ok(Self {
            configs,
            x_scale,
            y_scale,
            surface,
        })
    }

    pub fn configs(&self) -> &Configs {
        &self.configs
    }

    pub fn x_scale(&self) -> &LinearScale {
        &self.x_scale
    }

    pub fn y_scale(&self) -> &LinearScale {
        &self.y_scale
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    pub fn layers(&self) -> &[Layer] {
        &self.surface.layers
    }

    pub fn layer(&self, name: &str) -> Option<&Layer> {
        self.surface.layer(name)
    }

    /// The layer named `name`, created with `kind` on first use. Every plot
    /// method goes through here, so repeated calls reuse one layer.
    pub fn create_if_not_exists(&mut self, kind: LayerKind, name: &str) -> Result<&mut Layer> {
        self.surface.create_if_not_exists(kind, name)
    }

    pub fn remove_layer(&mut self, name: &str) -> Option<Layer> {
        self.surface.remove_layer(name)
    }

    fn path_layer(&mut self, name: &str) -> Result<&mut PathLayer> {
        match &mut self.create_if_not_exists(LayerKind::Path, name)?.body {
            LayerBody::Path(p) => Ok(p),
            LayerBody::Group(_) => Err(Report::new(PlotError::LayerKindMismatch {
                name: name.to_string(),
            })),
        }
    }

    fn group_layer(&mut self, name: &str) -> Result<&mut Vec<Mark>> {
        match &mut self.create_if_not_exists(LayerKind::Group, name)?.body {
            LayerBody::Group(m) => Ok(m),
            LayerBody::Path(_) => Err(Report::new(PlotError::LayerKindMismatch {
                name: name.to_string(),
            })),
        }
    }

    /// Draw `f` over `domain` as a line through `n` samples.
    pub fn plot<F>(
        &mut self,
        name: &str,
        f: F,
        domain: Domain,
        n: usize,
        style: &Style,
    ) -> Result<&mut Self>
    where
        F: FnMut(f64) -> f64,
    {
        let data = generate_points(f, domain, n)?;
        let d = path::line(&data, &self.x_scale, &self.y_scale).map(|p| to_svg_data(&p));
        let duration = self.configs.transition_ms;

        self.surface.settle();
        let layer = self.path_layer(name)?;
        layer.fill = "none".to_string();
        layer.stroke = or(&style.color, LINE_STROKE);
        layer.stroke_width = Some(style.width.unwrap_or(LINE_WIDTH));
        layer.set_d(d, duration);
        Ok(self)
    }

    /// Shade the region between `f` and `y = 0` over `domain`.
    pub fn plot_region<F>(
        &mut self,
        name: &str,
        f: F,
        domain: Domain,
        n: usize,
        style: &Style,
    ) -> Result<&mut Self>
    where
        F: FnMut(f64) -> f64,
    {
        let data = generate_points(f, domain, n)?;
        let baseline = self.y_scale.apply(0.0);
        let d = path::area(&data, &self.x_scale, &self.y_scale, baseline).map(|p| to_svg_data(&p));
        let duration = self.configs.transition_ms;

        self.surface.settle();
        let layer = self.path_layer(name)?;
        layer.fill = or(&style.fill, REGION_FILL);
        layer.stroke = or(&style.stroke, REGION_STROKE);
        layer.set_d(d, duration);
        Ok(self)
    }

    /// Bind `data` to circles. Radius and colors apply to newly created
    /// circles only; existing ones are just moved.
    pub fn plot_points(&mut self, name: &str, data: &[Point], style: &Style) -> Result<&mut Self> {
        let (xs, ys) = (self.x_scale, self.y_scale);
        let r = style.r.unwrap_or(POINT_RADIUS);
        let fill = or(&style.fill, POINT_FILL);
        let stroke = or(&style.stroke, POINT_STROKE);

        self.surface.settle();
        let marks = self.group_layer(name)?;
        let join = join_marks(
            marks,
            data,
            |_| {
                Mark::Circle(Circle {
                    cx: 0.0,
                    cy: 0.0,
                    r,
                    fill: fill.clone(),
                    stroke: stroke.clone(),
                })
            },
            |mark, p| {
                if let Mark::Circle(c) = mark {
                    c.cx = xs.apply(p.x);
                    c.cy = ys.apply(p.y);
                }
            },
        );

        tracing::debug!(
            layer = name,
            enter = join.enter_count(),
            update = join.update.len(),
            exit = join.exit_count(),
            "joined points"
        );
        Ok(self)
    }

    /// Bind `data` to rectangles. Widths and heights are domain deltas,
    /// measured in pixels from the scale's zero; a negative height hangs
    /// the bar below `y`. Colors apply on creation.
    pub fn plot_rects(&mut self, name: &str, data: &[Rect], style: &Style) -> Result<&mut Self> {
        let (xs, ys) = (self.x_scale, self.y_scale);
        let fill = or(&style.fill, RECT_FILL);
        let stroke = or(&style.stroke, RECT_STROKE);

        self.surface.settle();
        let marks = self.group_layer(name)?;
        let join = join_marks(
            marks,
            data,
            |_| {
                Mark::Rect(RectMark {
                    x: 0.0,
                    y: 0.0,
                    width: 0.0,
                    height: 0.0,
                    fill: fill.clone(),
                    stroke: stroke.clone(),
                })
            },
            |mark, d| {
                if let Mark::Rect(r) = mark {
                    // Negative extents (downward bars, reversed ranges) flip
                    // the anchor so the emitted size stays non-negative.
                    let width = xs.apply(d.width) - xs.apply(0.0);
                    let height = ys.apply(0.0) - ys.apply(d.height);
                    let (x, y) = (xs.apply(d.x), ys.apply(d.y));
                    r.x = if width < 0.0 { x + width } else { x };
                    r.y = if height < 0.0 { y + height } else { y };
                    r.width = width.abs();
                    r.height = height.abs();
                }
            },
        );

        tracing::debug!(
            layer = name,
            enter = join.enter_count(),
            update = join.update.len(),
            exit = join.exit_count(),
            "joined rects"
        );
        Ok(self)
    }

    pub fn to_svg(&self) -> String {
        crate::render::to_svg(&self.surface)
    }

    /// Push the current surface into `container`, sized to at most the
    /// configured width. Pending transitions play once, in this mount.
    pub fn mount<C: Container + ?Sized>(&mut self, container: &mut C) -> Result<()> {
        container.mount(&self.to_svg(), self.configs.width)?;
        self.surface.settle();
        Ok(())
    }
}
