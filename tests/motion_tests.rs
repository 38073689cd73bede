// Host-side tests for the procedural motion functions.

use floating_card::core::{
    blend_rotation, float_offset, frame_pose, highlight_position, normalized_time, wobble,
    CardConfig,
};
use glam::{Vec2, Vec3};

const EPS: f32 = 1e-4;

#[test]
fn time_is_normalized_by_700ms() {
    assert_eq!(normalized_time(0.0), 0.0);
    assert!((normalized_time(700.0) - 1.0).abs() < 1e-6);
    assert!((normalized_time(1750.0) - 2.5).abs() < 1e-6);
}

#[test]
fn default_wobble_at_one_time_unit() {
    let w = wobble(1.0, &CardConfig::default());
    assert!((w.x - 0.05574).abs() < EPS, "x = {}", w.x);
    assert!((w.y - 0.06895).abs() < EPS, "y = {}", w.y);
}

#[test]
fn wobble_at_origin_leans_on_x_only() {
    let c = CardConfig::default();
    let w = wobble(0.0, &c);
    assert!((w.x - c.wobble_amount).abs() < 1e-6);
    assert!(w.y.abs() < 1e-6);
}

#[test]
fn wobble_scales_with_amount() {
    let c = CardConfig {
        wobble_amount: 0.0,
        ..Default::default()
    };
    assert_eq!(wobble(3.7, &c), Vec2::ZERO);
}

#[test]
fn float_offset_follows_sine() {
    let c = CardConfig::default();
    assert!((float_offset(1.0, &c) - 0.5f32.sin() * 0.1).abs() < 1e-6);
    // Peak at pi / (2 * float_speed)
    let peak = std::f32::consts::FRAC_PI_2 / c.float_speed;
    assert!((float_offset(peak, &c) - c.float_amount).abs() < 1e-6);
}

#[test]
fn highlight_orbits_its_center() {
    let p0 = highlight_position(0.0);
    assert!((p0 - Vec3::new(2.0, 1.0, 4.0)).length() < 1e-6);
    let p = highlight_position(1.0);
    assert!((p.x - (2.0 + 0.2f32.sin())).abs() < 1e-6);
    assert_eq!(p.y, 1.0);
    assert!((p.z - (3.0 + 0.15f32.cos())).abs() < 1e-6);
}

#[test]
fn idle_blend_ignores_pointer_rotation() {
    let c = CardConfig::default();
    let w = Vec2::new(0.03, -0.02);
    assert_eq!(blend_rotation(false, Vec2::new(1.0, 1.0), w, &c), w);
}

#[test]
fn engaged_blend_adds_damped_wobble() {
    let c = CardConfig::default();
    let r = blend_rotation(true, Vec2::new(0.2, -0.1), Vec2::new(0.05, 0.05), &c);
    assert!((r - Vec2::new(0.21, -0.09)).length() < 1e-6);
}

#[test]
fn frame_pose_combines_all_three_channels() {
    let c = CardConfig::default();
    let pose = frame_pose(700.0, false, Vec2::ZERO, &c);
    assert_eq!(pose.rotation, wobble(1.0, &c));
    assert_eq!(pose.float_offset, float_offset(1.0, &c));
    assert_eq!(pose.highlight, highlight_position(1.0));
}
