//! Mount targets for a rendered surface.

use crate::Result;

/// Somewhere a surface can be shown. Mounting again replaces the previous
/// surface rather than adding a second one.
pub trait Container {
    fn mount(&mut self, svg: &str, max_width: f64) -> Result<()>;
}

/// In-memory target that keeps the latest markup. Used off the web and in
/// tests.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SvgBuffer {
    pub markup: String,
    pub max_width: Option<f64>,
    pub mounts: usize,
}

impl SvgBuffer {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Container for SvgBuffer {
    fn mount(&mut self, svg: &str, max_width: f64) -> Result<()> {
        self.markup.clear();
        self.markup.push_str(svg);
        self.max_width = Some(max_width);
        self.mounts += 1;
        tracing::debug!(bytes = svg.len(), mounts = self.mounts, "mounted surface");
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
pub use dom::DomContainer;

#[cfg(target_arch = "wasm32")]
mod dom {
    use error_stack::Report;
    use wasm_bindgen::{JsCast, JsValue};
    use web_sys::{Document, Element, HtmlElement};

    use super::Container;
    use crate::scale::format_number;
    use crate::{PlotError, Result};

    /// A DOM element picked by CSS selector. The surface is appended to it
    /// once and swapped in place on later mounts, leaving sibling content
    /// alone.
    pub struct DomContainer {
        document: Document,
        element: Element,
        mounted: Option<Element>,
    }

    impl DomContainer {
        pub fn select(selector: &str) -> Result<Self> {
            let not_found = || Report::new(PlotError::ContainerNotFound(selector.to_string()));
            let document = web_sys::window()
                .and_then(|w| w.document())
                .ok_or_else(not_found)?;
            let element = document
                .query_selector(selector)
                .map_err(|_| not_found())?
                .ok_or_else(not_found)?;
            Ok(Self {
                document,
                element,
                mounted: None,
            })
        }
    }

    impl Container for DomContainer {
        fn mount(&mut self, svg: &str, max_width: f64) -> Result<()> {
            let mount_err = |_: JsValue| Report::new(PlotError::Mount);

            let scratch = self.document.create_element("div").map_err(mount_err)?;
            scratch.set_inner_html(svg);
            let fresh = scratch
                .first_element_child()
                .ok_or_else(|| Report::new(PlotError::Mount))?;

            match self.mounted.take() {
                Some(old) => self.element.replace_child(&fresh, &old),
                None => self.element.append_child(&fresh),
            }
            .map_err(mount_err)?;
            self.mounted = Some(fresh);

            if let Some(html) = self.element.dyn_ref::<HtmlElement>() {
                html.style()
                    .set_property("max-width", &format!("{}px", format_number(max_width)))
                    .map_err(mount_err)?;
            }
            tracing::debug!(bytes = svg.len(), "mounted surface into DOM");
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Configs, Style};
    use crate::plot_area::PlotArea;

    #[test]
    fn remounting_replaces_markup() {
        let mut area = PlotArea::new(Configs::new().size(320.0, 200.0)).unwrap();
        let mut buf = SvgBuffer::new();

        area.mount(&mut buf).unwrap();
        let first = buf.markup.clone();
        assert!(first.starts_with("<svg"));
        assert_eq!(buf.max_width, Some(320.0));

        area.plot("f", |x| x, [0.0, 1.0], 3, &Style::default())
            .unwrap();
        area.mount(&mut buf).unwrap();
        assert_eq!(buf.mounts, 2);
        assert_eq!(buf.markup.matches("<svg").count(), 1);
        assert!(buf.markup.len() > first.len());
    }
}
