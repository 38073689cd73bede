use crate::core::{CardVisualizer, FrameHandle, Host, MountRect, TaskHandle};
use crate::dom;
use crate::events::{self, Listeners};
use crate::render::GpuRenderer;
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub type WebVisualizer = CardVisualizer<WebHost, GpuRenderer>;

struct PendingLinger {
    task: TaskHandle,
    timeout_id: i32,
    _callback: Closure<dyn FnMut()>,
}

/// Browser services for the visualizer: requestAnimationFrame for the render
/// loop, setTimeout for the linger task, DOM listeners and the canvas.
///
/// Every callback holds only a `Weak` to the visualizer, so dropping the
/// handle tears the chain down without a reference cycle.
pub struct WebHost {
    window: web::Window,
    mount: web::HtmlElement,
    canvas: web::HtmlCanvasElement,
    visualizer: Weak<RefCell<WebVisualizer>>,
    tick: Option<Closure<dyn FnMut(f64)>>,
    pending_frame: Option<i32>,
    listeners: Listeners,
    linger: Option<PendingLinger>,
}

impl WebHost {
    pub fn new(
        window: web::Window,
        mount: web::HtmlElement,
        canvas: web::HtmlCanvasElement,
    ) -> Self {
        Self {
            window,
            mount,
            canvas,
            visualizer: Weak::new(),
            tick: None,
            pending_frame: None,
            listeners: Listeners::new(),
            linger: None,
        }
    }

    /// Point the host's callbacks at the shared visualizer. Must run before
    /// `CardVisualizer::start`.
    pub fn bind(&mut self, visualizer: &Rc<RefCell<WebVisualizer>>) {
        let weak = Rc::downgrade(visualizer);
        self.visualizer = weak.clone();
        self.tick = Some(Closure::wrap(Box::new(move |time_ms: f64| {
            let Some(rc) = weak.upgrade() else {
                return;
            };
            match rc.try_borrow_mut() {
                Ok(mut v) => v.on_frame(time_ms),
                Err(_) => log::warn!("[frame] tick skipped: visualizer busy"),
            };
        }) as Box<dyn FnMut(f64)>));
    }

    fn clear_linger(&mut self) {
        if let Some(pending) = self.linger.take() {
            self.window.clear_timeout_with_handle(pending.timeout_id);
        }
    }
}

impl Host for WebHost {
    fn mount_rect(&self) -> MountRect {
        dom::mount_rect(&self.mount)
    }

    fn attach_listeners(&mut self) {
        if !self.listeners.is_empty() {
            return;
        }
        self.listeners = events::wire_listeners(&self.mount, &self.window, &self.visualizer);
    }

    fn detach_listeners(&mut self) {
        for binding in self.listeners.drain(..) {
            binding.remove();
        }
    }

    fn request_frame(&mut self) -> Option<FrameHandle> {
        let tick = self.tick.as_ref()?;
        match self
            .window
            .request_animation_frame(tick.as_ref().unchecked_ref())
        {
            Ok(id) => {
                self.pending_frame = Some(id);
                Some(FrameHandle(id))
            }
            Err(e) => {
                log::error!("[frame] requestAnimationFrame failed: {:?}", e);
                self.pending_frame = None;
                None
            }
        }
    }

    fn cancel_frame(&mut self, frame: FrameHandle) {
        _ = self.window.cancel_animation_frame(frame.0);
        if self.pending_frame == Some(frame.0) {
            self.pending_frame = None;
        }
    }

    fn schedule_linger(&mut self, task: TaskHandle, delay_ms: f64) {
        self.clear_linger();
        let weak = self.visualizer.clone();
        let callback = Closure::wrap(Box::new(move || {
            let Some(rc) = weak.upgrade() else {
                return;
            };
            let Ok(mut v) = rc.try_borrow_mut() else {
                log::warn!("[input] linger expiry dropped: visualizer busy");
                return;
            };
            v.on_linger_elapsed(task);
        }) as Box<dyn FnMut()>);
        let delay = delay_ms.max(0.0).min(i32::MAX as f64) as i32;
        match self
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                callback.as_ref().unchecked_ref(),
                delay,
            ) {
            Ok(timeout_id) => {
                self.linger = Some(PendingLinger {
                    task,
                    timeout_id,
                    _callback: callback,
                });
            }
            Err(e) => log::error!("[input] setTimeout failed: {:?}", e),
        }
    }

    fn cancel_linger(&mut self, task: TaskHandle) {
        if self.linger.as_ref().map(|p| p.task) == Some(task) {
            self.clear_linger();
        }
    }

    fn detach_surface(&mut self) {
        dom::detach_canvas(&self.canvas);
    }
}

impl Drop for WebHost {
    fn drop(&mut self) {
        // Handle freed without destroy(): make sure nothing calls into freed closures.
        if let Some(id) = self.pending_frame.take() {
            _ = self.window.cancel_animation_frame(id);
        }
        self.clear_linger();
        self.detach_listeners();
    }
}
