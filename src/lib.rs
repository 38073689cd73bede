//! Floating 3D card for the web.
//!
//! `core` is target-independent and drives everything through the `Host` and
//! `SceneRenderer` seams; the remaining modules are the browser front-end
//! (DOM wiring, requestAnimationFrame/setTimeout, WebGPU renderer) and only
//! build for wasm32.

pub mod core;

#[cfg(target_arch = "wasm32")]
mod constants;
#[cfg(target_arch = "wasm32")]
mod dom;
#[cfg(target_arch = "wasm32")]
mod events;
#[cfg(target_arch = "wasm32")]
mod frame;
#[cfg(target_arch = "wasm32")]
mod render;

#[cfg(target_arch = "wasm32")]
pub use entry::*;

#[cfg(target_arch = "wasm32")]
mod entry {
    use crate::core::{CardOptions, CardVisualizer, VisualizerError};
    use crate::dom;
    use crate::frame::{WebHost, WebVisualizer};
    use crate::render::GpuRenderer;
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys as web;

    #[wasm_bindgen(start)]
    pub fn start() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).ok();
        log::info!("floating-card loaded");
        Ok(())
    }

    fn js_error(e: impl std::fmt::Display) -> JsValue {
        JsValue::from_str(&e.to_string())
    }

    /// `undefined`/`null` mean "no overrides".
    fn parse_options(options: &JsValue) -> Result<CardOptions, VisualizerError> {
        if options.is_undefined() || options.is_null() {
            return Ok(CardOptions::default());
        }
        CardOptions::deserialize_from(serde_wasm_bindgen::Deserializer::from(options.clone()))
    }

    /// Handle returned to JS: `update(options)` and `destroy()`.
    #[wasm_bindgen]
    pub struct FloatingCard {
        inner: Rc<RefCell<WebVisualizer>>,
    }

    #[wasm_bindgen]
    impl FloatingCard {
        pub fn update(&self, options: JsValue) -> Result<(), JsValue> {
            let options = parse_options(&options).map_err(js_error)?;
            let mut viz = self
                .inner
                .try_borrow_mut()
                .map_err(|_| js_error("visualizer busy"))?;
            viz.update(&options);
            Ok(())
        }

        pub fn destroy(&self) {
            match self.inner.try_borrow_mut() {
                Ok(mut viz) => viz.destroy(),
                Err(_) => log::error!("[card] destroy while visualizer busy"),
            }
        }
    }

    /// Mount a floating card into `node`.
    #[wasm_bindgen(js_name = floatingCard)]
    pub async fn floating_card(
        node: web::HtmlElement,
        options: JsValue,
    ) -> Result<FloatingCard, JsValue> {
        let options = parse_options(&options).map_err(js_error)?;
        let inner = mount(node, &options).await.map_err(js_error)?;
        Ok(FloatingCard { inner })
    }

    async fn mount(
        node: web::HtmlElement,
        options: &CardOptions,
    ) -> anyhow::Result<Rc<RefCell<WebVisualizer>>> {
        let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| anyhow::anyhow!("no document"))?;

        let canvas = dom::attach_canvas(&document, &node)?;
        let rect = dom::mount_rect(&node);
        let (w, h) = crate::core::surface_extent(&rect);
        dom::size_canvas(&canvas, w, h);

        let renderer = match GpuRenderer::new(canvas.clone()).await {
            Ok(r) => r,
            Err(e) => {
                dom::detach_canvas(&canvas);
                return Err(e.into());
            }
        };
        let host = WebHost::new(window, node, canvas.clone());
        let mut painter = dom::CanvasGradientPainter::new(document);
        let viz = match CardVisualizer::new(host, renderer, &mut painter, options) {
            Ok(v) => v,
            Err(e) => {
                dom::detach_canvas(&canvas);
                return Err(e.into());
            }
        };

        let inner = Rc::new(RefCell::new(viz));
        {
            let mut viz = inner.borrow_mut();
            viz.host_mut().bind(&inner);
            viz.start();
        }
        Ok(inner)
    }
}
