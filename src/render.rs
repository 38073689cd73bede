use crate::constants::CLEAR_COLOR;
use crate::core::{EnvironmentMap, Scene, SceneRenderer, VisualizerError};
use crate::dom;
use web_sys as web;

mod card;
mod environment;
mod helpers;
mod targets;

use card::{create_card_resources, CardResources, CardUniforms};
use environment::{create_environment_resources, EnvironmentResources};
use targets::RenderTargets;

// ===================== WebGPU state =====================

pub struct GpuRenderer {
    canvas: web::HtmlCanvasElement,
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    // The surface format is not sRGB on most browsers; the shader encodes then.
    encode_srgb: bool,
    targets: Option<RenderTargets>,
    environment: Option<EnvironmentResources>,
    card: Option<CardResources>,
}

impl GpuRenderer {
    pub async fn new(canvas: web::HtmlCanvasElement) -> Result<Self, VisualizerError> {
        let width = canvas.width().max(1);
        let height = canvas.height().max(1);

        let instance = wgpu::Instance::default();
        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .map_err(|e| VisualizerError::acquisition(format!("WebGPU surface: {e}")))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| VisualizerError::acquisition("WebGPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    // Use default limits on web to avoid passing unknown fields to older WebGPU impls
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: Some("card_device"),
                },
                None,
            )
            .await
            .map_err(|e| VisualizerError::acquisition(format!("WebGPU device: {e:?}")))?;
        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| VisualizerError::acquisition("surface format"))?;
        let alpha_mode = if caps
            .alpha_modes
            .contains(&wgpu::CompositeAlphaMode::PreMultiplied)
        {
            wgpu::CompositeAlphaMode::PreMultiplied
        } else {
            caps.alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto)
        };
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);
        log::info!("[gpu] surface {:?} {:?} {}x{}", format, alpha_mode, width, height);

        Ok(Self {
            canvas,
            surface,
            device,
            queue,
            config,
            encode_srgb: !format.is_srgb(),
            targets: None,
            environment: None,
            card: None,
        })
    }

    fn reconfigure(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);
        if let Some(old) = self.targets.take() {
            old.destroy();
        }
        self.targets = Some(RenderTargets::new(
            &self.device,
            width,
            height,
            self.config.format,
        ));
    }
}

impl SceneRenderer for GpuRenderer {
    fn load(&mut self, scene: &Scene, env: &EnvironmentMap) -> Result<(), VisualizerError> {
        let environment = create_environment_resources(&self.device, &self.queue, env);
        let card = create_card_resources(
            &self.device,
            scene,
            &environment.reflection_view,
            &environment.sampler,
            self.config.format,
        );
        self.environment = Some(environment);
        self.card = Some(card);
        Ok(())
    }

    fn resize(&mut self, width: u32, height: u32) {
        let (w, h) = dom::size_canvas(&self.canvas, width, height);
        if self.targets.is_none() || w != self.config.width || h != self.config.height {
            self.reconfigure(w, h);
        }
    }

    fn render(&mut self, scene: &Scene) -> Result<(), VisualizerError> {
        let (Some(card), Some(targets)) = (&self.card, &self.targets) else {
            return Ok(());
        };
        let uniforms = CardUniforms::from_scene(scene, self.encode_srgb);
        self.queue
            .write_buffer(&card.uniform_buffer, 0, bytemuck::bytes_of(&uniforms));

        let frame = match self.surface.get_current_texture() {
            Ok(frame) => frame,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                self.surface.configure(&self.device, &self.config);
                return Err(VisualizerError::Render("surface lost; reconfigured".into()));
            }
            Err(e) => return Err(VisualizerError::Render(format!("{e:?}"))),
        };
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("card_encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("card_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &targets.msaa_view,
                    resolve_target: Some(&view),
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(CLEAR_COLOR),
                        store: wgpu::StoreOp::Discard,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &targets.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Discard,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            rpass.set_pipeline(&card.pipeline);
            rpass.set_bind_group(0, &card.bind_group, &[]);
            rpass.set_vertex_buffer(0, card.vertex_buffer.slice(..));
            rpass.set_index_buffer(card.index_buffer.slice(..), wgpu::IndexFormat::Uint16);
            rpass.draw_indexed(0..card.index_count, 0, 0..1);
        }
        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }

    fn release(&mut self) {
        if let Some(card) = self.card.take() {
            card.destroy();
        }
        if let Some(env) = self.environment.take() {
            env.destroy();
        }
        if let Some(targets) = self.targets.take() {
            targets.destroy();
        }
        self.device.destroy();
        log::debug!("[gpu] resources released");
    }
}
