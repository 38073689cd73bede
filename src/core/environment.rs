//! Procedurally synthesized environment used for card reflections.
//!
//! Six vertical gradients stand in for a sky box: a bright zenith, a deeper
//! blue floor, and pale blue horizons on the four sides. No image assets are
//! involved; each face is painted at startup by a `GradientPainter`.

use super::config::hex_to_rgb8;
use super::constants::ENV_FACE_SIZE;
use super::error::VisualizerError;

/// A face filled top-to-bottom from `top` to `bottom` (0xRRGGBB, sRGB).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GradientFace {
    pub top: u32,
    pub bottom: u32,
}

const HORIZON: GradientFace = GradientFace {
    top: 0xd0e0f0,
    bottom: 0x87ceeb,
};

/// Cube faces in +X, -X, +Y, -Y, +Z, -Z order.
pub const ENVIRONMENT_FACES: [GradientFace; 6] = [
    HORIZON,
    HORIZON,
    GradientFace {
        top: 0xffffff,
        bottom: 0xd0e0f0,
    },
    GradientFace {
        top: 0x87ceeb,
        bottom: 0x4682b4,
    },
    HORIZON,
    HORIZON,
];

/// Something that can rasterize a gradient face into RGBA8 rows.
pub trait GradientPainter {
    /// Returns `size * size * 4` bytes, row-major from the top.
    fn paint(&mut self, face: &GradientFace, size: u32) -> Result<Vec<u8>, VisualizerError>;
}

/// Pure-Rust painter matching a 2D canvas linear gradient sampled at pixel
/// centers, interpolated in sRGB like the canvas does.
#[derive(Clone, Copy, Debug, Default)]
pub struct SoftwarePainter;

impl GradientPainter for SoftwarePainter {
    fn paint(&mut self, face: &GradientFace, size: u32) -> Result<Vec<u8>, VisualizerError> {
        let top = hex_to_rgb8(face.top);
        let bottom = hex_to_rgb8(face.bottom);
        let mut pixels = Vec::with_capacity((size * size * 4) as usize);
        for y in 0..size {
            let t = (y as f32 + 0.5) / size as f32;
            let row = [
                lerp_u8(top[0], bottom[0], t),
                lerp_u8(top[1], bottom[1], t),
                lerp_u8(top[2], bottom[2], t),
                255,
            ];
            for _ in 0..size {
                pixels.extend_from_slice(&row);
            }
        }
        Ok(pixels)
    }
}

#[inline]
fn lerp_u8(a: u8, b: u8, t: f32) -> u8 {
    (a as f32 + (b as f32 - a as f32) * t).round().clamp(0.0, 255.0) as u8
}

/// Six square RGBA8 faces ready for upload as a cube texture.
#[derive(Clone, Debug)]
pub struct EnvironmentMap {
    pub size: u32,
    pub faces: [Vec<u8>; 6],
}

impl EnvironmentMap {
    pub fn synthesize(painter: &mut impl GradientPainter) -> Result<Self, VisualizerError> {
        let size = ENV_FACE_SIZE;
        let expected = (size * size * 4) as usize;
        let mut faces: [Vec<u8>; 6] = Default::default();
        for (i, face) in ENVIRONMENT_FACES.iter().enumerate() {
            let pixels = painter.paint(face, size)?;
            if pixels.len() != expected {
                return Err(VisualizerError::acquisition(format!(
                    "environment face {i}: got {} bytes, expected {expected}",
                    pixels.len()
                )));
            }
            faces[i] = pixels;
        }
        log::debug!("[env] synthesized {} gradient faces at {}px", faces.len(), size);
        Ok(Self { size, faces })
    }

    /// RGBA texel of `face` at (`x`, `y`), with `y` counted from the top.
    pub fn texel(&self, face: usize, x: u32, y: u32) -> [u8; 4] {
        let i = ((y * self.size + x) * 4) as usize;
        let px = &self.faces[face][i..i + 4];
        [px[0], px[1], px[2], px[3]]
    }
}
