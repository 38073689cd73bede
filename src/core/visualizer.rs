//! The floating card controller.
//!
//! `CardVisualizer` owns the scene, the live configuration and the
//! interaction state. Every host callback (frame, pointer, timer, resize) is a
//! plain method call, so the browser glue and the host-side tests drive the
//! exact same code with real or synthetic timestamps.

use super::config::{CardConfig, CardOptions};
use super::environment::{EnvironmentMap, GradientPainter};
use super::error::VisualizerError;
use super::interaction::{InteractionPhase, InteractionState, MountRect, Release, TaskHandle};
use super::motion;
use super::scene::Scene;
use glam::Vec2;

/// Identifier of a scheduled display-refresh callback.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub i32);

/// Scheduling and DOM services the visualizer needs from its environment.
pub trait Host {
    /// Current bounding box of the mount target.
    fn mount_rect(&self) -> MountRect;
    /// Register pointer/touch listeners on the mount and move/resize
    /// listeners on the viewport.
    fn attach_listeners(&mut self);
    fn detach_listeners(&mut self);
    /// Ask for `on_frame` to run on the next display refresh.
    fn request_frame(&mut self) -> Option<FrameHandle>;
    fn cancel_frame(&mut self, frame: FrameHandle);
    /// Arrange for `on_linger_elapsed(task)` after `delay_ms`.
    fn schedule_linger(&mut self, task: TaskHandle, delay_ms: f64);
    fn cancel_linger(&mut self, task: TaskHandle);
    /// Remove the render surface from the mount target.
    fn detach_surface(&mut self);
}

/// GPU side of the visualizer.
pub trait SceneRenderer {
    /// Create geometry, materials and environment resources for `scene`.
    fn load(&mut self, scene: &Scene, environment: &EnvironmentMap) -> Result<(), VisualizerError>;
    /// Resize the render surface to `width` x `height` CSS pixels.
    fn resize(&mut self, width: u32, height: u32);
    fn render(&mut self, scene: &Scene) -> Result<(), VisualizerError>;
    /// Drop every retained GPU resource.
    fn release(&mut self);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Lifecycle {
    Built,
    Running,
    Destroyed,
}

/// Surface size in whole pixels for a mount rect; never zero.
#[inline]
pub fn surface_extent(rect: &MountRect) -> (u32, u32) {
    (
        rect.width.round().max(1.0) as u32,
        rect.height.round().max(1.0) as u32,
    )
}

pub struct CardVisualizer<H: Host, R: SceneRenderer> {
    host: H,
    renderer: R,
    config: CardConfig,
    scene: Scene,
    interaction: InteractionState,
    mount: MountRect,
    frame: Option<FrameHandle>,
    next_task: u64,
    lifecycle: Lifecycle,
    // Last reported render error; repeats are not logged again until a
    // frame succeeds or the error changes.
    render_fault: Option<String>,
    render_faults_reported: u32,
}

impl<H: Host, R: SceneRenderer> CardVisualizer<H, R> {
    /// Build the static scene once and hand it to the renderer.
    ///
    /// Fails only when a resource (2D context for the environment gradients,
    /// GPU objects) cannot be acquired.
    pub fn new(
        host: H,
        mut renderer: R,
        painter: &mut impl GradientPainter,
        options: &CardOptions,
    ) -> Result<Self, VisualizerError> {
        let config = CardConfig::from_options(options);
        let mount = host.mount_rect();
        let environment = EnvironmentMap::synthesize(painter)?;
        let scene = Scene::build(&config, &mount);

        let (w, h) = surface_extent(&mount);
        renderer.resize(w, h);
        renderer.load(&scene, &environment)?;
        log::info!(
            "[card] built {:.2}x{:.2}x{:.2} card in {}x{} mount",
            config.card_width,
            config.card_height,
            config.card_depth,
            w,
            h
        );

        Ok(Self {
            host,
            renderer,
            config,
            scene,
            interaction: InteractionState::default(),
            mount,
            frame: None,
            next_task: 0,
            lifecycle: Lifecycle::Built,
            render_fault: None,
            render_faults_reported: 0,
        })
    }

    /// Attach listeners and render the first frame at time zero, which in
    /// turn schedules the next one.
    pub fn start(&mut self) {
        if self.lifecycle != Lifecycle::Built {
            return;
        }
        self.host.attach_listeners();
        self.lifecycle = Lifecycle::Running;
        self.on_frame(0.0);
    }

    /// One render-loop tick at clock value `time_ms`.
    pub fn on_frame(&mut self, time_ms: f64) {
        if self.lifecycle != Lifecycle::Running {
            return;
        }
        self.frame = self.host.request_frame();

        let smoothed = self.interaction.smooth();
        let pose = motion::frame_pose(
            time_ms,
            self.interaction.is_engaged(),
            smoothed,
            &self.config,
        );
        let card = &mut self.scene.card;
        card.rotation = pose.rotation;
        card.position.y = pose.float_offset;
        self.scene.lights.highlight.position = pose.highlight;

        match self.renderer.render(&self.scene) {
            Ok(()) => {
                if self.render_fault.take().is_some() {
                    log::info!("[frame] rendering recovered");
                }
            }
            Err(e) => {
                let message = e.to_string();
                if self.render_fault.as_deref() != Some(message.as_str()) {
                    log::warn!("[frame] {}", message);
                    self.render_faults_reported += 1;
                    self.render_fault = Some(message);
                }
            }
        }
    }

    pub fn on_pointer_down(&mut self, client: Vec2) {
        if self.lifecycle != Lifecycle::Running {
            return;
        }
        let rect = self.host.mount_rect();
        if let Some(task) = self
            .interaction
            .press(client, &rect, self.config.mouse_influence)
        {
            self.host.cancel_linger(task);
        }
    }

    pub fn on_pointer_move(&mut self, client: Vec2) {
        if self.lifecycle != Lifecycle::Running || !self.interaction.is_engaged() {
            return;
        }
        let rect = self.host.mount_rect();
        self.interaction
            .drag(client, &rect, self.config.mouse_influence);
    }

    pub fn on_pointer_up(&mut self) {
        if self.lifecycle != Lifecycle::Running {
            return;
        }
        let task = TaskHandle(self.next_task);
        if let Release::Scheduled { task, replaced } = self.interaction.release(task) {
            self.next_task += 1;
            if let Some(old) = replaced {
                self.host.cancel_linger(old);
            }
            self.host
                .schedule_linger(task, self.config.interaction_duration);
        }
    }

    pub fn on_linger_elapsed(&mut self, task: TaskHandle) {
        if self.interaction.linger_elapsed(task) {
            log::debug!("[card] interaction ended");
        }
    }

    /// Re-read the mount box and resize surface and camera to match.
    pub fn on_resize(&mut self) {
        if self.lifecycle == Lifecycle::Destroyed {
            return;
        }
        self.mount = self.host.mount_rect();
        let (w, h) = surface_extent(&self.mount);
        self.renderer.resize(w, h);
        self.scene.camera.aspect = self.mount.aspect();
        log::debug!("[card] resized to {}x{}", w, h);
    }

    /// Merge `options` into the live configuration. Material fields are
    /// applied at once; the rest are read by the next tick.
    pub fn update(&mut self, options: &CardOptions) {
        if self.lifecycle == Lifecycle::Destroyed {
            log::warn!("[card] update after destroy ignored");
            return;
        }
        let changes = self.config.merge(options);
        if changes.any() {
            self.scene
                .card
                .apply_material_changes(&self.config, changes);
        }
    }

    /// Stop the loop, remove listeners, cancel the linger task and release
    /// the surface and every GPU resource.
    pub fn destroy(&mut self) {
        if self.lifecycle == Lifecycle::Destroyed {
            log::warn!("[card] destroy called twice");
            return;
        }
        if let Some(frame) = self.frame.take() {
            self.host.cancel_frame(frame);
        }
        self.host.detach_listeners();
        if let Some(task) = self.interaction.cancel_linger() {
            self.host.cancel_linger(task);
        }
        self.host.detach_surface();
        self.renderer.release();
        self.lifecycle = Lifecycle::Destroyed;
        log::info!("[card] destroyed");
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    pub fn phase(&self) -> InteractionPhase {
        self.interaction.phase()
    }

    pub fn interaction(&self) -> &InteractionState {
        &self.interaction
    }

    pub fn config(&self) -> &CardConfig {
        &self.config
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn mount(&self) -> &MountRect {
        &self.mount
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    /// The render error currently being suppressed, if frames are failing.
    pub fn render_fault(&self) -> Option<&str> {
        self.render_fault.as_deref()
    }

    /// How many distinct render failures have been logged.
    pub fn render_faults_reported(&self) -> u32 {
        self.render_faults_reported
    }
}
