use crate::frame::WebVisualizer;
use glam::Vec2;
use smallvec::SmallVec;
use std::cell::RefCell;
use std::rc::Weak;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// One registered DOM listener, kept so it can be removed again.
pub struct ListenerBinding {
    target: web::EventTarget,
    kind: &'static str,
    callback: Closure<dyn FnMut(web::Event)>,
}

impl ListenerBinding {
    pub fn remove(self) {
        _ = self
            .target
            .remove_event_listener_with_callback(self.kind, self.callback.as_ref().unchecked_ref());
    }
}

pub type Listeners = SmallVec<[ListenerBinding; 8]>;

/// Press/release on the mount, movement and resize on the window.
pub fn wire_listeners(
    mount: &web::HtmlElement,
    window: &web::Window,
    viz: &Weak<RefCell<WebVisualizer>>,
) -> Listeners {
    let mut out = Listeners::new();
    let mount: &web::EventTarget = mount.as_ref();
    let window: &web::EventTarget = window.as_ref();

    out.extend(listen(mount, "mousedown", None, viz, |v, ev| {
        if let Some(p) = mouse_client(ev) {
            v.on_pointer_down(p);
        }
    }));
    out.extend(listen(mount, "touchstart", Some(false), viz, |v, ev| {
        if let Some(p) = touch_client(ev) {
            v.on_pointer_down(p);
        }
    }));
    out.extend(listen(mount, "mouseup", None, viz, |v, _| v.on_pointer_up()));
    out.extend(listen(mount, "touchend", None, viz, |v, _| v.on_pointer_up()));
    out.extend(listen(window, "mousemove", None, viz, |v, ev| {
        if let Some(p) = mouse_client(ev) {
            v.on_pointer_move(p);
        }
    }));
    out.extend(listen(window, "touchmove", Some(true), viz, |v, ev| {
        if let Some(p) = touch_client(ev) {
            v.on_pointer_move(p);
        }
    }));
    out.extend(listen(window, "resize", None, viz, |v, _| v.on_resize()));

    log::debug!("[input] {} listeners attached", out.len());
    out
}

fn listen(
    target: &web::EventTarget,
    kind: &'static str,
    passive: Option<bool>,
    viz: &Weak<RefCell<WebVisualizer>>,
    mut handler: impl FnMut(&mut WebVisualizer, &web::Event) + 'static,
) -> Option<ListenerBinding> {
    let viz = viz.clone();
    let callback = Closure::wrap(Box::new(move |ev: web::Event| {
        let Some(rc) = viz.upgrade() else {
            return;
        };
        let Ok(mut v) = rc.try_borrow_mut() else {
            log::warn!("[input] {} dropped: visualizer busy", kind);
            return;
        };
        handler(&mut *v, &ev);
    }) as Box<dyn FnMut(web::Event)>);

    let added = match passive {
        Some(passive) => {
            let opts = web::AddEventListenerOptions::new();
            opts.set_passive(passive);
            target.add_event_listener_with_callback_and_add_event_listener_options(
                kind,
                callback.as_ref().unchecked_ref(),
                &opts,
            )
        }
        None => target.add_event_listener_with_callback(kind, callback.as_ref().unchecked_ref()),
    };
    match added {
        Ok(()) => Some(ListenerBinding {
            target: target.clone(),
            kind,
            callback,
        }),
        Err(e) => {
            log::error!("[input] could not listen for {}: {:?}", kind, e);
            None
        }
    }
}

#[inline]
fn mouse_client(ev: &web::Event) -> Option<Vec2> {
    ev.dyn_ref::<web::MouseEvent>()
        .map(|m| Vec2::new(m.client_x() as f32, m.client_y() as f32))
}

/// Client position of the first active touch.
#[inline]
fn touch_client(ev: &web::Event) -> Option<Vec2> {
    // Only registered for touch events; avoid `instanceof TouchEvent`, which
    // throws on desktop browsers without touch support.
    let touch = ev.unchecked_ref::<web::TouchEvent>().touches().get(0)?;
    Some(Vec2::new(touch.client_x() as f32, touch.client_y() as f32))
}
