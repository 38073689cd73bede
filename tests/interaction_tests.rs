// Host-side tests for pointer normalization and the interaction state machine.

use floating_card::core::{
    normalized_pointer, target_rotation, InteractionPhase, InteractionState, MountRect, Release,
    TaskHandle,
};
use glam::Vec2;

fn rect() -> MountRect {
    MountRect::new(100.0, 50.0, 200.0, 100.0)
}

fn approx(a: Vec2, b: Vec2) -> bool {
    (a - b).length() < 1e-5
}

#[test]
fn pointer_normalizes_to_unit_square_with_y_up() {
    let r = rect();
    assert!(approx(normalized_pointer(Vec2::new(200.0, 100.0), &r), Vec2::ZERO));
    assert!(approx(normalized_pointer(Vec2::new(100.0, 50.0), &r), Vec2::new(-1.0, 1.0)));
    assert!(approx(normalized_pointer(Vec2::new(300.0, 150.0), &r), Vec2::new(1.0, -1.0)));
}

#[test]
fn pointer_outside_rect_is_not_clamped() {
    let n = normalized_pointer(Vec2::new(400.0, 100.0), &rect());
    assert!((n.x - 2.0).abs() < 1e-5);
}

#[test]
fn zero_area_rect_maps_to_center() {
    let r = MountRect::new(10.0, 10.0, 0.0, 0.0);
    assert_eq!(normalized_pointer(Vec2::new(50.0, 70.0), &r), Vec2::ZERO);
    assert_eq!(r.aspect(), 1.0);
}

#[test]
fn target_rotation_inverts_vertical_axis() {
    // Upper-right quadrant: tilt top away (negative x), turn right (positive y)
    let t = target_rotation(Vec2::new(250.0, 75.0), &rect(), 0.5);
    assert!(approx(t, Vec2::new(-0.25, 0.25)));
}

#[test]
fn press_drag_release_elapse_cycle() {
    let mut s = InteractionState::default();
    assert_eq!(s.phase(), InteractionPhase::Idle);

    assert_eq!(s.press(Vec2::new(200.0, 100.0), &rect(), 0.5), None);
    assert_eq!(s.phase(), InteractionPhase::Interacting);
    assert!(s.drag(Vec2::new(300.0, 50.0), &rect(), 0.5));
    assert!(approx(s.target(), Vec2::new(-0.5, 0.5)));

    let release = s.release(TaskHandle(1));
    assert_eq!(
        release,
        Release::Scheduled {
            task: TaskHandle(1),
            replaced: None
        }
    );
    assert_eq!(s.phase(), InteractionPhase::Lingering);
    assert!(s.is_engaged());

    assert!(s.linger_elapsed(TaskHandle(1)));
    assert_eq!(s.phase(), InteractionPhase::Idle);
    assert_eq!(s.pending_linger(), None);
}

#[test]
fn moves_while_idle_are_ignored() {
    let mut s = InteractionState::default();
    assert!(!s.drag(Vec2::new(300.0, 50.0), &rect(), 0.5));
    assert_eq!(s.target(), Vec2::ZERO);
}

#[test]
fn moves_while_lingering_update_target() {
    let mut s = InteractionState::default();
    s.press(Vec2::new(200.0, 100.0), &rect(), 0.5);
    s.release(TaskHandle(0));
    assert!(s.drag(Vec2::new(100.0, 100.0), &rect(), 0.5));
    assert!(approx(s.target(), Vec2::new(0.0, -0.5)));
}

#[test]
fn release_while_idle_schedules_nothing() {
    let mut s = InteractionState::default();
    assert_eq!(s.release(TaskHandle(3)), Release::Ignored);
    assert_eq!(s.pending_linger(), None);
}

#[test]
fn press_during_linger_cancels_pending_task() {
    let mut s = InteractionState::default();
    s.press(Vec2::ZERO, &rect(), 0.5);
    s.release(TaskHandle(7));
    let cancelled = s.press(Vec2::ZERO, &rect(), 0.5);
    assert_eq!(cancelled, Some(TaskHandle(7)));
    assert_eq!(s.phase(), InteractionPhase::Interacting);
    // The cancelled task firing late must not end the new interaction
    assert!(!s.linger_elapsed(TaskHandle(7)));
    assert_eq!(s.phase(), InteractionPhase::Interacting);
}

#[test]
fn second_release_replaces_linger_task() {
    let mut s = InteractionState::default();
    s.press(Vec2::ZERO, &rect(), 0.5);
    s.release(TaskHandle(1));
    let r = s.release(TaskHandle(2));
    assert_eq!(
        r,
        Release::Scheduled {
            task: TaskHandle(2),
            replaced: Some(TaskHandle(1))
        }
    );
    assert!(!s.linger_elapsed(TaskHandle(1)));
    assert!(s.linger_elapsed(TaskHandle(2)));
}

#[test]
fn smoothing_converges_toward_target() {
    let mut s = InteractionState::default();
    s.press(Vec2::new(300.0, 150.0), &rect(), 0.5);
    let target = s.target();
    let first = s.smooth();
    assert!(approx(first, target * 0.1));
    for _ in 0..200 {
        s.smooth();
    }
    assert!(approx(s.current(), target));
}
