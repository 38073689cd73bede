use super::helpers;
use crate::constants::{DEPTH_FORMAT, MSAA_SAMPLES};
use wgpu;

/// Size-dependent attachments for the card pass.
///
/// - `msaa_*` is the multisampled color target resolved into the swapchain.
/// - `depth_*` matches its sample count so the box faces sort correctly.
pub(crate) struct RenderTargets {
    pub(crate) msaa_tex: wgpu::Texture,
    pub(crate) msaa_view: wgpu::TextureView,
    pub(crate) depth_tex: wgpu::Texture,
    pub(crate) depth_view: wgpu::TextureView,
}

impl RenderTargets {
    pub(crate) fn new(
        device: &wgpu::Device,
        width: u32,
        height: u32,
        color_format: wgpu::TextureFormat,
    ) -> Self {
        let (msaa_tex, msaa_view) = helpers::create_color_texture(
            device,
            "msaa_color",
            width,
            height,
            color_format,
            MSAA_SAMPLES,
            wgpu::TextureUsages::RENDER_ATTACHMENT,
        );
        let (depth_tex, depth_view) = helpers::create_color_texture(
            device,
            "depth",
            width,
            height,
            DEPTH_FORMAT,
            MSAA_SAMPLES,
            wgpu::TextureUsages::RENDER_ATTACHMENT,
        );
        Self {
            msaa_tex,
            msaa_view,
            depth_tex,
            depth_view,
        }
    }

    pub(crate) fn destroy(&self) {
        self.msaa_tex.destroy();
        self.depth_tex.destroy();
    }
}
