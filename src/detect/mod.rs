//! Trigger detectors
//!
//! Each detector owns its event subscription as an RAII handle; dropping a
//! detector removes the listener and cancels any pending countdown, so
//! teardown cannot leak callbacks into a dead page.

pub mod keys;
pub mod scroll;

pub use keys::KeyBuffer;
pub use scroll::{DwellAction, DwellMachine, DwellState};

#[cfg(target_arch = "wasm32")]
pub use keys::KeySequenceDetector;
#[cfg(target_arch = "wasm32")]
pub use scroll::ScrollDwellDetector;

/// Owned DOM event listener (WASM only)
///
/// The listener stays attached for the lifetime of the handle and is
/// removed on drop.
#[cfg(target_arch = "wasm32")]
pub struct Subscription {
    target: web_sys::EventTarget,
    event: &'static str,
    callback: wasm_bindgen::closure::Closure<dyn FnMut(web_sys::Event)>,
}

#[cfg(target_arch = "wasm32")]
impl Subscription {
    pub fn subscribe(
        target: &web_sys::EventTarget,
        event: &'static str,
        handler: impl FnMut(web_sys::Event) + 'static,
    ) -> Self {
        use wasm_bindgen::JsCast;
        use wasm_bindgen::closure::Closure;

        let callback = Closure::<dyn FnMut(_)>::new(handler);
        let _ = target.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref());

        Self {
            target: target.clone(),
            event,
            callback,
        }
    }
}

#[cfg(target_arch = "wasm32")]
impl Drop for Subscription {
    fn drop(&mut self) {
        use wasm_bindgen::JsCast;
        let _ = self
            .target
            .remove_event_listener_with_callback(self.event, self.callback.as_ref().unchecked_ref());
    }
}
