use super::helpers;
use crate::constants::{ENV_FORMAT, REFLECTION_FORMAT};
use crate::core::constants::REFLECTION_BUFFER_SIZE;
use crate::core::EnvironmentMap;
use wgpu;

pub(crate) static ENV_BAKE_WGSL: &str = include_str!("../../shaders/env_bake.wgsl");

/// Environment gradient cube plus the half-float reflection buffer the card
/// shader actually samples.
pub(crate) struct EnvironmentResources {
    pub(crate) env_tex: wgpu::Texture,
    pub(crate) reflection_tex: wgpu::Texture,
    pub(crate) reflection_view: wgpu::TextureView,
    pub(crate) sampler: wgpu::Sampler,
}

impl EnvironmentResources {
    pub(crate) fn destroy(&self) {
        self.env_tex.destroy();
        self.reflection_tex.destroy();
    }
}

/// Upload the six gradient faces, then bake them into the reflection buffer.
pub(crate) fn create_environment_resources(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    env: &EnvironmentMap,
) -> EnvironmentResources {
    let (env_tex, env_view) = helpers::create_cube_texture(
        device,
        "env_gradient",
        env.size,
        ENV_FORMAT,
        wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
    );
    for (face, pixels) in env.faces.iter().enumerate() {
        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &env_tex,
                mip_level: 0,
                origin: wgpu::Origin3d {
                    x: 0,
                    y: 0,
                    z: face as u32,
                },
                aspect: wgpu::TextureAspect::All,
            },
            pixels,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4 * env.size),
                rows_per_image: Some(env.size),
            },
            wgpu::Extent3d {
                width: env.size,
                height: env.size,
                depth_or_array_layers: 1,
            },
        );
    }

    let (reflection_tex, reflection_view) = helpers::create_cube_texture(
        device,
        "reflection_buffer",
        REFLECTION_BUFFER_SIZE,
        REFLECTION_FORMAT,
        wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::TEXTURE_BINDING,
    );
    let sampler = helpers::linear_sampler(device, "env_sampler");
    bake_reflection(device, queue, &env_view, &sampler, &reflection_tex);

    EnvironmentResources {
        env_tex,
        reflection_tex,
        reflection_view,
        sampler,
    }
}

fn bake_reflection(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    env_view: &wgpu::TextureView,
    sampler: &wgpu::Sampler,
    reflection_tex: &wgpu::Texture,
) {
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("env_bake_shader"),
        source: wgpu::ShaderSource::Wgsl(ENV_BAKE_WGSL.into()),
    });
    let bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("env_bake_bgl"),
        entries: &[
            wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Texture {
                    multisampled: false,
                    view_dimension: wgpu::TextureViewDimension::Cube,
                    sample_type: wgpu::TextureSampleType::Float { filterable: true },
                },
                count: None,
            },
            wgpu::BindGroupLayoutEntry {
                binding: 1,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                count: None,
            },
        ],
    });
    let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("env_bake_bg"),
        layout: &bgl,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::TextureView(env_view),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: wgpu::BindingResource::Sampler(sampler),
            },
        ],
    });
    let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("env_bake_pl"),
        bind_group_layouts: &[&bgl],
        push_constant_ranges: &[],
    });
    let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("env_bake_pipeline"),
        layout: Some(&layout),
        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: Some("vs_fullscreen"),
            buffers: &[],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        },
        primitive: wgpu::PrimitiveState::default(),
        depth_stencil: None,
        multisample: wgpu::MultisampleState::default(),
        fragment: Some(wgpu::FragmentState {
            module: &shader,
            entry_point: Some("fs_bake"),
            targets: &[Some(wgpu::ColorTargetState {
                format: REFLECTION_FORMAT,
                blend: None,
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        }),
        cache: None,
        multiview: None,
    });

    let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
        label: Some("env_bake_encoder"),
    });
    for face in 0..6u32 {
        let view = helpers::cube_face_view(reflection_tex, face);
        let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("env_bake_pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: &view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
        });
        rpass.set_pipeline(&pipeline);
        rpass.set_bind_group(0, &bind_group, &[]);
        // Face index travels as the instance index.
        rpass.draw(0..3, face..face + 1);
    }
    queue.submit(Some(encoder.finish()));
    log::debug!("[env] baked reflection buffer at {}px", REFLECTION_BUFFER_SIZE);
}
