use super::config::CardConfig;
use super::constants::{
    HIGHLIGHT_CENTER, HIGHLIGHT_RADIUS, HIGHLIGHT_X_RATE, HIGHLIGHT_Z_RATE,
    TIME_NORMALIZATION_MS, WOBBLE_Y_FREQUENCY_RATIO,
};
use glam::{Vec2, Vec3};

/// Everything the render loop derives for one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FramePose {
    pub rotation: Vec2,
    pub float_offset: f32,
    pub highlight: Vec3,
}

#[inline]
pub fn normalized_time(time_ms: f64) -> f32 {
    (time_ms / TIME_NORMALIZATION_MS) as f32
}

/// Idle rotational oscillation at normalized time `t`.
#[inline]
pub fn wobble(t: f32, config: &CardConfig) -> Vec2 {
    Vec2::new(
        (t * config.wobble_speed).cos() * config.wobble_amount,
        (t * config.wobble_speed * WOBBLE_Y_FREQUENCY_RATIO).sin() * config.wobble_amount,
    )
}

/// Vertical bob at normalized time `t`.
#[inline]
pub fn float_offset(t: f32, config: &CardConfig) -> f32 {
    (t * config.float_speed).sin() * config.float_amount
}

/// Slow orbit of the highlight light, independent of the card's motion.
#[inline]
pub fn highlight_position(t: f32) -> Vec3 {
    Vec3::new(
        HIGHLIGHT_CENTER.x + (t * HIGHLIGHT_X_RATE).sin() * HIGHLIGHT_RADIUS,
        HIGHLIGHT_CENTER.y,
        HIGHLIGHT_CENTER.z + (t * HIGHLIGHT_Z_RATE).cos() * HIGHLIGHT_RADIUS,
    )
}

/// Combine the smoothed pointer rotation with the idle wobble.
///
/// While engaged the wobble is damped and added on top of the pointer lean;
/// otherwise the wobble alone drives the card.
#[inline]
pub fn blend_rotation(engaged: bool, smoothed: Vec2, wobble: Vec2, config: &CardConfig) -> Vec2 {
    if engaged {
        smoothed + wobble * config.wobble_during_interaction_amount
    } else {
        wobble
    }
}

pub fn frame_pose(time_ms: f64, engaged: bool, smoothed: Vec2, config: &CardConfig) -> FramePose {
    let t = normalized_time(time_ms);
    FramePose {
        rotation: blend_rotation(engaged, smoothed, wobble(t, config), config),
        float_offset: float_offset(t, config),
        highlight: highlight_position(t),
    }
}
