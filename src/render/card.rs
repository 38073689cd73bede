use crate::constants::{DEPTH_FORMAT, ENV_DIFFUSE_WEIGHT, MSAA_SAMPLES};
use crate::core::constants::TONE_MAPPING_EXPOSURE;
use crate::core::{box_geometry, CardVertex, DirectionalLight, Material, Scene};
use wgpu;
use wgpu::util::DeviceExt;

pub(crate) static CARD_WGSL: &str = include_str!("../../shaders/card.wgsl");

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct MaterialPacked {
    color_roughness: [f32; 4],
    // metalness, clearcoat, clearcoat roughness, reflectivity
    params: [f32; 4],
    // env intensity, ior, unused, unused
    extra: [f32; 4],
}

impl From<&Material> for MaterialPacked {
    fn from(m: &Material) -> Self {
        Self {
            color_roughness: [m.color.x, m.color.y, m.color.z, m.roughness],
            params: [m.metalness, m.clearcoat, m.clearcoat_roughness, m.reflectivity],
            extra: [m.env_intensity, m.ior, 0.0, 0.0],
        }
    }
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct DirectionalPacked {
    color: [f32; 4],
    direction: [f32; 4],
}

impl From<&DirectionalLight> for DirectionalPacked {
    fn from(l: &DirectionalLight) -> Self {
        let d = l.position.normalize_or_zero();
        Self {
            color: [l.color.x, l.color.y, l.color.z, l.intensity],
            direction: [d.x, d.y, d.z, 0.0],
        }
    }
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct CardUniforms {
    view_proj: [[f32; 4]; 4],
    model: [[f32; 4]; 4],
    // xyz eye, w exposure
    camera: [f32; 4],
    // rgb * intensity, w = 1 when the shader must encode sRGB itself
    ambient: [f32; 4],
    directional: [DirectionalPacked; 3],
    point_color: [f32; 4],
    // xyz position, w range
    point_position: [f32; 4],
    materials: [MaterialPacked; 2],
    // x diffuse environment weight
    env: [f32; 4],
}

impl CardUniforms {
    pub(crate) fn from_scene(scene: &Scene, encode_srgb: bool) -> Self {
        let cam = &scene.camera;
        let lights = &scene.lights;
        let ambient = lights.ambient.color * lights.ambient.intensity;
        let point = &lights.highlight;
        let [edge, face] = scene.card.materials();
        Self {
            view_proj: (cam.projection_matrix() * cam.view_matrix()).to_cols_array_2d(),
            model: scene.card.model_matrix().to_cols_array_2d(),
            camera: [cam.eye.x, cam.eye.y, cam.eye.z, TONE_MAPPING_EXPOSURE],
            ambient: [
                ambient.x,
                ambient.y,
                ambient.z,
                if encode_srgb { 1.0 } else { 0.0 },
            ],
            directional: [
                (&lights.key).into(),
                (&lights.fill).into(),
                (&lights.rim).into(),
            ],
            point_color: [point.color.x, point.color.y, point.color.z, point.intensity],
            point_position: [point.position.x, point.position.y, point.position.z, point.range],
            // Indexed by `MaterialSlot`.
            materials: [edge.into(), face.into()],
            env: [ENV_DIFFUSE_WEIGHT, 0.0, 0.0, 0.0],
        }
    }
}

pub(crate) struct CardResources {
    pub(crate) pipeline: wgpu::RenderPipeline,
    pub(crate) vertex_buffer: wgpu::Buffer,
    pub(crate) index_buffer: wgpu::Buffer,
    pub(crate) index_count: u32,
    pub(crate) uniform_buffer: wgpu::Buffer,
    pub(crate) bind_group: wgpu::BindGroup,
}

impl CardResources {
    pub(crate) fn destroy(&self) {
        self.vertex_buffer.destroy();
        self.index_buffer.destroy();
        self.uniform_buffer.destroy();
    }
}

pub(crate) fn create_card_resources(
    device: &wgpu::Device,
    scene: &Scene,
    reflection_view: &wgpu::TextureView,
    sampler: &wgpu::Sampler,
    color_format: wgpu::TextureFormat,
) -> CardResources {
    let (vertices, indices) = box_geometry(scene.card.size);
    let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some("card_vertices"),
        contents: bytemuck::cast_slice(&vertices),
        usage: wgpu::BufferUsages::VERTEX,
    });
    let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some("card_indices"),
        contents: bytemuck::cast_slice(&indices),
        usage: wgpu::BufferUsages::INDEX,
    });
    let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("card_uniforms"),
        size: std::mem::size_of::<CardUniforms>() as u64,
        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    });

    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("card_shader"),
        source: wgpu::ShaderSource::Wgsl(CARD_WGSL.into()),
    });
    let bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("card_bgl"),
        entries: &[
            wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            },
            wgpu::BindGroupLayoutEntry {
                binding: 1,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Texture {
                    multisampled: false,
                    view_dimension: wgpu::TextureViewDimension::Cube,
                    sample_type: wgpu::TextureSampleType::Float { filterable: true },
                },
                count: None,
            },
            wgpu::BindGroupLayoutEntry {
                binding: 2,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                count: None,
            },
        ],
    });
    let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("card_bg"),
        layout: &bgl,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: wgpu::BindingResource::TextureView(reflection_view),
            },
            wgpu::BindGroupEntry {
                binding: 2,
                resource: wgpu::BindingResource::Sampler(sampler),
            },
        ],
    });
    let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("card_pl"),
        bind_group_layouts: &[&bgl],
        push_constant_ranges: &[],
    });
    let attributes = wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3, 2 => Uint32];
    let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("card_pipeline"),
        layout: Some(&layout),
        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: Some("vs_main"),
            buffers: &[wgpu::VertexBufferLayout {
                array_stride: std::mem::size_of::<CardVertex>() as u64,
                step_mode: wgpu::VertexStepMode::Vertex,
                attributes: &attributes,
            }],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        },
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            front_face: wgpu::FrontFace::Ccw,
            cull_mode: Some(wgpu::Face::Back),
            ..Default::default()
        },
        depth_stencil: Some(wgpu::DepthStencilState {
            format: DEPTH_FORMAT,
            depth_write_enabled: true,
            depth_compare: wgpu::CompareFunction::Less,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        }),
        multisample: wgpu::MultisampleState {
            count: MSAA_SAMPLES,
            mask: !0,
            alpha_to_coverage_enabled: false,
        },
        fragment: Some(wgpu::FragmentState {
            module: &shader,
            entry_point: Some("fs_main"),
            targets: &[Some(wgpu::ColorTargetState {
                format: color_format,
                blend: Some(wgpu::BlendState::PREMULTIPLIED_ALPHA_BLENDING),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        }),
        cache: None,
        multiview: None,
    });

    CardResources {
        pipeline,
        vertex_buffer,
        index_buffer,
        index_count: indices.len() as u32,
        uniform_buffer,
        bind_group,
    }
}
