//! WASM API exports for JavaScript interop
//!
//! This module provides `#[wasm_bindgen]` exports for drawing into a page
//! from JavaScript. It is only compiled when targeting wasm32.

#![cfg(target_arch = "wasm32")]

use parking_lot::Mutex;
use std::sync::Arc;
use wasm_bindgen::prelude::*;

use crate::PlotError;
use crate::core::{Configs, Point, Rect, Style};
use crate::plot_area::PlotArea;
use crate::runtime::DomContainer;
use crate::sample::{self, DEFAULT_SAMPLES};

fn js_err(report: error_stack::Report<PlotError>) -> JsValue {
    JsValue::from_str(&format!("{report:?}"))
}

fn parse_style(json: Option<String>) -> Result<Style, JsValue> {
    match json {
        Some(json) => Style::from_json(&json).map_err(js_err),
        None => Ok(Style::default()),
    }
}

/// Wrap a JS callback as `f64 -> f64`. Throwing or non-numeric results
/// become `NaN`, which the renderer draws as a gap.
fn unary(f: &js_sys::Function) -> impl FnMut(f64) -> f64 + '_ {
    move |x| match f.call1(&JsValue::NULL, &JsValue::from_f64(x)) {
        Ok(v) => v.as_f64().unwrap_or(f64::NAN),
        Err(_) => {
            web_sys::console::warn_1(&format!("plot callback threw at x = {x}").into());
            f64::NAN
        }
    }
}

fn binary(f: &js_sys::Function) -> impl FnMut(f64, f64) -> f64 + '_ {
    move |x1, x2| {
        match f.call2(&JsValue::NULL, &JsValue::from_f64(x1), &JsValue::from_f64(x2)) {
            Ok(v) => v.as_f64().unwrap_or(f64::NAN),
            Err(_) => {
                web_sys::console::warn_1(
                    &format!("height callback threw on [{x1}, {x2})").into(),
                );
                f64::NAN
            }
        }
    }
}

/// JavaScript-accessible plot area mounted into the `container` selector
/// from its configs.
#[wasm_bindgen]
pub struct JsPlotArea {
    area: Arc<Mutex<PlotArea>>,
    container: Option<DomContainer>,
}

#[wasm_bindgen]
impl JsPlotArea {
    /// Create a plot area from configs JSON, e.g.
    /// `{"container": "#chart", "xRange": [-2, 2], "yRange": [-1, 4]}`.
    #[wasm_bindgen(constructor)]
    pub fn new(configs_json: &str) -> Result<JsPlotArea, JsValue> {
        let configs = Configs::from_json(configs_json).map_err(js_err)?;
        let container = configs
            .container
            .as_deref()
            .map(DomContainer::select)
            .transpose()
            .map_err(js_err)?;
        let area = PlotArea::new(configs).map_err(js_err)?;

        let mut handle = JsPlotArea {
            area: Arc::new(Mutex::new(area)),
            container,
        };
        handle.refresh()?;
        Ok(handle)
    }

    /// Line plot of `f` over `[x0, x1]` (100 samples unless `n` is given).
    #[wasm_bindgen]
    pub fn plot(
        &mut self,
        name: &str,
        f: &js_sys::Function,
        x0: f64,
        x1: f64,
        n: Option<u32>,
        style: Option<String>,
    ) -> Result<(), JsValue> {
        let style = parse_style(style)?;
        let n = n.map_or(DEFAULT_SAMPLES, |n| n as usize);
        self.area
            .lock()
            .plot(name, unary(f), [x0, x1], n, &style)
            .map_err(js_err)?;
        self.refresh()
    }

    /// Shaded region between `f` and the x-axis over `[x0, x1]`.
    #[wasm_bindgen(js_name = plotRegion)]
    pub fn plot_region(
        &mut self,
        name: &str,
        f: &js_sys::Function,
        x0: f64,
        x1: f64,
        n: Option<u32>,
        style: Option<String>,
    ) -> Result<(), JsValue> {
        let style = parse_style(style)?;
        let n = n.map_or(DEFAULT_SAMPLES, |n| n as usize);
        self.area
            .lock()
            .plot_region(name, unary(f), [x0, x1], n, &style)
            .map_err(js_err)?;
        self.refresh()
    }

    /// Scatter points from a flat array of `[x1, y1, x2, y2, ...]`.
    #[wasm_bindgen(js_name = plotPoints)]
    pub fn plot_points(
        &mut self,
        name: &str,
        xy: &[f64],
        style: Option<String>,
    ) -> Result<(), JsValue> {
        if xy.len() % 2 != 0 {
            return Err(JsValue::from_str(
                "Points array length must be even (x,y pairs)",
            ));
        }
        let style = parse_style(style)?;
        let points: Vec<Point> = xy.chunks(2).map(|c| Point::new(c[0], c[1])).collect();
        self.area
            .lock()
            .plot_points(name, &points, &style)
            .map_err(js_err)?;
        self.refresh()
    }

    /// Rectangles from a flat array of `[x, y, width, height, ...]`, as
    /// returned by `generateRects`.
    #[wasm_bindgen(js_name = plotRects)]
    pub fn plot_rects(
        &mut self,
        name: &str,
        xywh: &[f64],
        style: Option<String>,
    ) -> Result<(), JsValue> {
        if xywh.len() % 4 != 0 {
            return Err(JsValue::from_str(
                "Rects array length must be a multiple of 4 (x,y,width,height)",
            ));
        }
        let style = parse_style(style)?;
        let rects: Vec<Rect> = xywh
            .chunks(4)
            .map(|c| Rect::new(c[0], c[1], c[2], c[3]))
            .collect();
        self.area
            .lock()
            .plot_rects(name, &rects, &style)
            .map_err(js_err)?;
        self.refresh()
    }

    /// Current surface as SVG markup
    #[wasm_bindgen]
    pub fn svg(&self) -> String {
        self.area.lock().to_svg()
    }

    /// Current layers and axes as JSON
    #[wasm_bindgen(js_name = toJson)]
    pub fn to_json(&self) -> Result<String, JsValue> {
        let area = self.area.lock();
        serde_json::to_string(area.surface())
            .map_err(|e| JsValue::from_str(&format!("Failed to serialize surface: {}", e)))
    }
}

impl JsPlotArea {
    fn refresh(&mut self) -> Result<(), JsValue> {
        if let Some(container) = self.container.as_mut() {
            self.area.lock().mount(container).map_err(js_err)?;
        }
        Ok(())
    }
}

/// `n` evenly spaced samples of `f`, flattened to `[x1, y1, x2, y2, ...]`.
#[wasm_bindgen(js_name = generatePoints)]
pub fn generate_points(f: &js_sys::Function, x0: f64, x1: f64, n: u32) -> Result<Vec<f64>, JsValue> {
    let points = sample::generate_points(unary(f), [x0, x1], n as usize).map_err(js_err)?;
    Ok(points.iter().flat_map(|p| [p.x, p.y]).collect())
}

/// `n` equal-width bars over `[x0, x1]` sized by `height(x1, x2)`, flattened
/// to `[x, y, width, height, ...]`.
#[wasm_bindgen(js_name = generateRects)]
pub fn generate_rects(x0: f64, x1: f64, n: u32, height: &js_sys::Function) -> Result<Vec<f64>, JsValue> {
    let rects = sample::generate_rects([x0, x1], n as usize, binary(height)).map_err(js_err)?;
    Ok(rects
        .iter()
        .flat_map(|r| [r.x, r.y, r.width, r.height])
        .collect())
}
