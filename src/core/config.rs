//! Card configuration and partial overrides.
//!
//! `CardConfig` is the fully resolved set of tunables read by the render loop
//! every frame. `CardOptions` is what callers hand in: any subset of the same
//! fields, using the camelCase names of the JS options object.

use super::error::VisualizerError;
use glam::Vec3;
use serde::{Deserialize, Deserializer};

#[derive(Clone, Debug, PartialEq)]
pub struct CardConfig {
    pub card_width: f32,
    pub card_height: f32,
    pub card_depth: f32,
    pub card_color: u32,
    pub edge_color: u32,
    pub wobble_speed: f32,
    pub wobble_amount: f32,
    pub float_speed: f32,
    pub float_amount: f32,
    pub mouse_influence: f32,
    /// Linger period after a release, in milliseconds.
    pub interaction_duration: f64,
    pub wobble_during_interaction_amount: f32,
    pub glossiness: f32,
    pub reflectivity: f32,
    pub env_map_intensity: f32,
}

impl Default for CardConfig {
    fn default() -> Self {
        Self {
            card_width: 2.5,
            card_height: 3.5,
            card_depth: 0.05,
            card_color: 0x2196f3,
            edge_color: 0x1565c0,
            wobble_speed: 0.8,
            wobble_amount: 0.08,
            float_speed: 0.5,
            float_amount: 0.1,
            mouse_influence: 0.5,
            interaction_duration: 0.0,
            wobble_during_interaction_amount: 0.2,
            glossiness: 0.9,
            reflectivity: 0.7,
            env_map_intensity: 1.2,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardOptions {
    pub card_width: Option<f32>,
    pub card_height: Option<f32>,
    pub card_depth: Option<f32>,
    #[serde(default, deserialize_with = "lenient_color")]
    pub card_color: Option<u32>,
    #[serde(default, deserialize_with = "lenient_color")]
    pub edge_color: Option<u32>,
    pub wobble_speed: Option<f32>,
    pub wobble_amount: Option<f32>,
    pub float_speed: Option<f32>,
    pub float_amount: Option<f32>,
    pub mouse_influence: Option<f32>,
    pub interaction_duration: Option<f64>,
    pub wobble_during_interaction_amount: Option<f32>,
    pub glossiness: Option<f32>,
    pub reflectivity: Option<f32>,
    pub env_map_intensity: Option<f32>,
}

impl CardOptions {
    /// Read options from any serde source (the JS options object on the web).
    pub fn deserialize_from<'de, D: Deserializer<'de>>(source: D) -> Result<Self, VisualizerError> {
        Self::deserialize(source).map_err(|e| VisualizerError::InvalidOptions(e.to_string()))
    }
}

// JS colors are plain numbers; fractional or out-of-range ones degrade
// instead of rejecting the whole options object.
fn lenient_color<'de, D: Deserializer<'de>>(d: D) -> Result<Option<u32>, D::Error> {
    Ok(Option::<f64>::deserialize(d)?.map(color_from_number))
}

/// Reduce an arbitrary number to a 0xRRGGBB color: floor, wrap to 32 bits,
/// keep the low 24. Non-finite values become black.
pub fn color_from_number(value: f64) -> u32 {
    if !value.is_finite() {
        return 0;
    }
    (value.floor() as i64 as u32) & 0xff_ffff
}

/// Which live material properties an options merge touched.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MaterialChanges {
    pub card_color: bool,
    pub edge_color: bool,
    pub glossiness: bool,
    pub reflectivity: bool,
    pub env_map_intensity: bool,
}

impl MaterialChanges {
    pub fn any(&self) -> bool {
        self.card_color
            || self.edge_color
            || self.glossiness
            || self.reflectivity
            || self.env_map_intensity
    }
}

impl CardConfig {
    pub fn from_options(options: &CardOptions) -> Self {
        let mut config = Self::default();
        config.merge(options);
        config
    }

    /// Overwrite every field present in `options`. Values are taken as given;
    /// degenerate ones (negative sizes, glossiness above 1) are not rejected.
    pub fn merge(&mut self, options: &CardOptions) -> MaterialChanges {
        fn set<T: Copy>(slot: &mut T, value: Option<T>) -> bool {
            match value {
                Some(v) => {
                    *slot = v;
                    true
                }
                None => false,
            }
        }

        set(&mut self.card_width, options.card_width);
        set(&mut self.card_height, options.card_height);
        set(&mut self.card_depth, options.card_depth);
        set(&mut self.wobble_speed, options.wobble_speed);
        set(&mut self.wobble_amount, options.wobble_amount);
        set(&mut self.float_speed, options.float_speed);
        set(&mut self.float_amount, options.float_amount);
        set(&mut self.mouse_influence, options.mouse_influence);
        set(&mut self.interaction_duration, options.interaction_duration);
        set(
            &mut self.wobble_during_interaction_amount,
            options.wobble_during_interaction_amount,
        );

        MaterialChanges {
            card_color: set(&mut self.card_color, options.card_color),
            edge_color: set(&mut self.edge_color, options.edge_color),
            glossiness: set(&mut self.glossiness, options.glossiness),
            reflectivity: set(&mut self.reflectivity, options.reflectivity),
            env_map_intensity: set(&mut self.env_map_intensity, options.env_map_intensity),
        }
    }

    pub fn card_size(&self) -> Vec3 {
        Vec3::new(self.card_width, self.card_height, self.card_depth)
    }
}

/// Convert a 0xRRGGBB sRGB color into linear RGB components.
pub fn srgb_hex_to_linear(hex: u32) -> Vec3 {
    #[inline]
    fn channel(c: u32) -> f32 {
        let s = (c & 0xff) as f32 / 255.0;
        if s <= 0.04045 {
            s / 12.92
        } else {
            ((s + 0.055) / 1.055).powf(2.4)
        }
    }
    Vec3::new(channel(hex >> 16), channel(hex >> 8), channel(hex))
}

/// Split a 0xRRGGBB color into 8-bit channels without any transfer curve.
pub fn hex_to_rgb8(hex: u32) -> [u8; 3] {
    [
        ((hex >> 16) & 0xff) as u8,
        ((hex >> 8) & 0xff) as u8,
        (hex & 0xff) as u8,
    ]
}
