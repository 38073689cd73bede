use crate::core::{GradientFace, GradientPainter, MountRect, VisualizerError};
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn mount_rect(el: &web::Element) -> MountRect {
    let rect = el.get_bounding_client_rect();
    MountRect::new(
        rect.left() as f32,
        rect.top() as f32,
        rect.width() as f32,
        rect.height() as f32,
    )
}

/// Create the render canvas and append it to `mount`.
pub fn attach_canvas(
    document: &web::Document,
    mount: &web::HtmlElement,
) -> anyhow::Result<web::HtmlCanvasElement> {
    let canvas: web::HtmlCanvasElement = document
        .create_element("canvas")
        .map_err(|e| anyhow::anyhow!("create canvas: {:?}", e))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;
    _ = canvas.style().set_property("display", "block");
    mount
        .append_child(&canvas)
        .map_err(|e| anyhow::anyhow!("append canvas: {:?}", e))?;
    Ok(canvas)
}

pub fn detach_canvas(canvas: &web::HtmlCanvasElement) {
    canvas.remove();
}

/// Size the canvas to `width` x `height` CSS pixels with a backing store
/// scaled by devicePixelRatio. Returns the backing size.
pub fn size_canvas(canvas: &web::HtmlCanvasElement, width: u32, height: u32) -> (u32, u32) {
    let dpr = web::window().map(|w| w.device_pixel_ratio()).unwrap_or(1.0);
    let style = canvas.style();
    _ = style.set_property("width", &format!("{}px", width));
    _ = style.set_property("height", &format!("{}px", height));
    let w_px = ((width as f64 * dpr) as u32).max(1);
    let h_px = ((height as f64 * dpr) as u32).max(1);
    canvas.set_width(w_px);
    canvas.set_height(h_px);
    (w_px, h_px)
}

/// Paints environment gradients through an offscreen 2D canvas.
pub struct CanvasGradientPainter {
    document: web::Document,
}

impl CanvasGradientPainter {
    pub fn new(document: web::Document) -> Self {
        Self { document }
    }

    fn context_2d(&self, size: u32) -> Result<web::CanvasRenderingContext2d, VisualizerError> {
        let canvas = self
            .document
            .create_element("canvas")
            .ok()
            .and_then(|el| el.dyn_into::<web::HtmlCanvasElement>().ok())
            .ok_or_else(|| VisualizerError::acquisition("gradient canvas"))?;
        canvas.set_width(size);
        canvas.set_height(size);
        canvas
            .get_context("2d")
            .ok()
            .flatten()
            .and_then(|ctx| ctx.dyn_into::<web::CanvasRenderingContext2d>().ok())
            .ok_or_else(|| VisualizerError::acquisition("2d drawing context"))
    }
}

impl GradientPainter for CanvasGradientPainter {
    fn paint(&mut self, face: &GradientFace, size: u32) -> Result<Vec<u8>, VisualizerError> {
        let ctx = self.context_2d(size)?;
        let s = size as f64;
        let gradient = ctx.create_linear_gradient(0.0, 0.0, 0.0, s);
        _ = gradient.add_color_stop(0.0, &css_hex(face.top));
        _ = gradient.add_color_stop(1.0, &css_hex(face.bottom));
        ctx.set_fill_style_canvas_gradient(&gradient);
        ctx.fill_rect(0.0, 0.0, s, s);
        let image = ctx
            .get_image_data(0.0, 0.0, s, s)
            .map_err(|e| VisualizerError::acquisition(format!("gradient pixels: {:?}", e)))?;
        Ok(image.data().0)
    }
}

#[inline]
fn css_hex(color: u32) -> String {
    format!("#{:06x}", color & 0xff_ffff)
}
