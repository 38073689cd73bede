use glam::Vec3;

// Fixed scene and motion tuning shared by the core and the web renderer.

// Animation clock
pub const TIME_NORMALIZATION_MS: f64 = 700.0; // rAF milliseconds per unit of animation time
pub const WOBBLE_Y_FREQUENCY_RATIO: f32 = 1.3; // y wobble runs slightly faster than x
pub const ROTATION_SMOOTHING: f32 = 0.1; // per-frame blend of current toward target

// Highlight (point light) orbit
pub const HIGHLIGHT_CENTER: Vec3 = Vec3::new(2.0, 1.0, 3.0);
pub const HIGHLIGHT_RADIUS: f32 = 1.0;
pub const HIGHLIGHT_X_RATE: f32 = 0.2;
pub const HIGHLIGHT_Z_RATE: f32 = 0.15;
pub const HIGHLIGHT_INTENSITY: f32 = 1.0;
pub const HIGHLIGHT_RANGE: f32 = 10.0;

// Camera
pub const CAMERA_FOV_Y_DEGREES: f32 = 75.0;
pub const CAMERA_Z: f32 = 3.2;
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 1000.0;

// Fixed light rig
pub const AMBIENT_COLOR: u32 = 0xffffff;
pub const AMBIENT_INTENSITY: f32 = 0.3;
pub const KEY_LIGHT: (u32, f32, Vec3) = (0xffffff, 1.2, Vec3::new(2.0, 2.0, 5.0));
pub const FILL_LIGHT: (u32, f32, Vec3) = (0xfafafa, 0.7, Vec3::new(-5.0, 0.0, 2.0));
pub const RIM_LIGHT: (u32, f32, Vec3) = (0xffffff, 0.8, Vec3::new(0.0, 2.0, -5.0));

// Face material (front/back)
pub const FACE_METALNESS: f32 = 0.1;
pub const FACE_CLEARCOAT: f32 = 1.0;
pub const FACE_CLEARCOAT_ROUGHNESS: f32 = 0.1;
pub const FACE_IOR: f32 = 1.5;

// Edge material (the four thin sides)
pub const EDGE_METALNESS: f32 = 0.2;
pub const EDGE_CLEARCOAT: f32 = 0.8;
pub const EDGE_CLEARCOAT_ROUGHNESS: f32 = 0.2;
pub const EDGE_IOR: f32 = 1.4;
pub const EDGE_MIN_ROUGHNESS: f32 = 0.1;
pub const EDGE_REFLECTIVITY_SCALE: f32 = 0.9;
pub const EDGE_ENV_INTENSITY_SCALE: f32 = 0.8;

// Environment synthesis
pub const ENV_FACE_SIZE: u32 = 64; // px per gradient face
pub const REFLECTION_BUFFER_SIZE: u32 = 256; // px per baked reflection face

// Tone mapping
pub const TONE_MAPPING_EXPOSURE: f32 = 1.2;
