/// Web renderer constants.
///
/// Scene tuning (lights, camera, motion) lives in `core::constants`; these
/// only describe how the wgpu side allocates and clears its targets.
// Multisample count for the card pass (WebGPU supports 1 or 4)
pub const MSAA_SAMPLES: u32 = 4;

// Depth buffer format for the card pass
pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth24Plus;

// Format of the environment gradient cube (sRGB bytes from the painter)
pub const ENV_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8UnormSrgb;

// Half-float reflection buffer baked from the environment
pub const REFLECTION_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba16Float;

// Fully transparent clear so the page shows around the card
pub const CLEAR_COLOR: wgpu::Color = wgpu::Color::TRANSPARENT;

// Diffuse share of the environment (irradiance stand-in)
pub const ENV_DIFFUSE_WEIGHT: f32 = 0.35;
