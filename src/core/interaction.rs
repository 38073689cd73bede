//! Pointer interaction state machine.
//!
//! Handlers only ever move the *target* rotation; the render loop owns the
//! smoothing of `current` toward it. The linger period after a release is an
//! owned task handle so a new press can cancel exactly the pending one.

use super::constants::ROTATION_SMOOTHING;
use glam::Vec2;

/// Bounding box of the mount element in client (CSS pixel) coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MountRect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl MountRect {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    #[inline]
    pub fn aspect(&self) -> f32 {
        if self.height > 0.0 {
            self.width / self.height
        } else {
            1.0
        }
    }
}

/// Identifier of a scheduled linger task, allocated by the visualizer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TaskHandle(pub u64);

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum InteractionPhase {
    #[default]
    Idle,
    Interacting,
    Lingering,
}

/// What a release did to the linger schedule.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Release {
    /// Nothing was engaged; no task was scheduled.
    Ignored,
    Scheduled {
        task: TaskHandle,
        replaced: Option<TaskHandle>,
    },
}

#[derive(Clone, Debug, Default)]
pub struct InteractionState {
    phase: InteractionPhase,
    target: Vec2,
    current: Vec2,
    linger: Option<TaskHandle>,
}

impl InteractionState {
    pub fn phase(&self) -> InteractionPhase {
        self.phase
    }

    /// Interacting or lingering: the card follows the pointer target.
    #[inline]
    pub fn is_engaged(&self) -> bool {
        self.phase != InteractionPhase::Idle
    }

    pub fn target(&self) -> Vec2 {
        self.target
    }

    pub fn current(&self) -> Vec2 {
        self.current
    }

    pub fn pending_linger(&self) -> Option<TaskHandle> {
        self.linger
    }

    /// Pointer-down / touch-start. Returns the linger task that must be
    /// cancelled, if one was pending.
    pub fn press(&mut self, pointer: Vec2, rect: &MountRect, influence: f32) -> Option<TaskHandle> {
        let cancelled = self.linger.take();
        self.phase = InteractionPhase::Interacting;
        self.target = target_rotation(pointer, rect, influence);
        cancelled
    }

    /// Pointer-move / touch-move. Ignored while idle; returns whether the
    /// target moved.
    pub fn drag(&mut self, pointer: Vec2, rect: &MountRect, influence: f32) -> bool {
        if !self.is_engaged() {
            return false;
        }
        self.target = target_rotation(pointer, rect, influence);
        true
    }

    /// Pointer-up / touch-end. Starts (or restarts) the linger task `task`.
    pub fn release(&mut self, task: TaskHandle) -> Release {
        if !self.is_engaged() {
            return Release::Ignored;
        }
        let replaced = self.linger.replace(task);
        self.phase = InteractionPhase::Lingering;
        Release::Scheduled { task, replaced }
    }

    /// The linger task fired. Stale handles (already cancelled or replaced)
    /// are ignored. Returns whether the machine went back to idle.
    pub fn linger_elapsed(&mut self, task: TaskHandle) -> bool {
        if self.linger != Some(task) {
            return false;
        }
        self.linger = None;
        self.phase = InteractionPhase::Idle;
        true
    }

    pub fn cancel_linger(&mut self) -> Option<TaskHandle> {
        self.linger.take()
    }

    /// One exponential smoothing step of `current` toward `target`.
    #[inline]
    pub fn smooth(&mut self) -> Vec2 {
        self.current += (self.target - self.current) * ROTATION_SMOOTHING;
        self.current
    }
}

/// Pointer position mapped into [-1, 1] over the mount rect, with y pointing up.
///
/// A zero-area rect maps everything to the center.
pub fn normalized_pointer(pointer: Vec2, rect: &MountRect) -> Vec2 {
    let nx = if rect.width > 0.0 {
        ((pointer.x - rect.left) / rect.width) * 2.0 - 1.0
    } else {
        0.0
    };
    let ny = if rect.height > 0.0 {
        -(((pointer.y - rect.top) / rect.height) * 2.0 - 1.0)
    } else {
        0.0
    };
    Vec2::new(nx, ny)
}

/// Rotation (x about the horizontal axis, y about the vertical axis) the card
/// should lean toward for a pointer at `pointer`.
///
/// The vertical term is inverted so a pointer above the card tips its top edge
/// away from the viewer, and one below tips the bottom edge away.
pub fn target_rotation(pointer: Vec2, rect: &MountRect, influence: f32) -> Vec2 {
    let n = normalized_pointer(pointer, rect);
    Vec2::new(-n.y * influence, n.x * influence)
}
