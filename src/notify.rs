//! One-shot toast notifications
//!
//! The progress store announces discoveries and resets through this seam;
//! presentation is a styled element appended to the document body and
//! removed after a few seconds. Every failure path degrades to "no toast".

/// Notification sink used by the progress store.
pub trait Notifier {
    /// Success-styled message (new clue recorded).
    fn success(&self, message: &str);
    /// Info-styled message (progress reset).
    fn info(&self, message: &str);
}

/// DOM toast notifier (WASM only)
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Copy, Default)]
pub struct ToastNotifier;

#[cfg(target_arch = "wasm32")]
impl ToastNotifier {
    fn show(class: &str, message: &str) {
        let document = match web_sys::window().and_then(|w| w.document()) {
            Some(d) => d,
            None => return,
        };
        let body = match document.body() {
            Some(b) => b,
            None => return,
        };
        let toast = match document.create_element("div") {
            Ok(el) => el,
            Err(_) => return,
        };

        let _ = toast.set_attribute("class", class);
        toast.set_text_content(Some(message));
        if body.append_child(&toast).is_err() {
            return;
        }

        // Toast removes itself; the timer outlives this call on purpose.
        gloo_timers::callback::Timeout::new(crate::consts::TOAST_MS, move || {
            toast.remove();
        })
        .forget();
    }
}

#[cfg(target_arch = "wasm32")]
impl Notifier for ToastNotifier {
    fn success(&self, message: &str) {
        Self::show("hunt-toast hunt-toast-success", message);
    }

    fn info(&self, message: &str) {
        Self::show("hunt-toast hunt-toast-info", message);
    }
}

/// Silent sink for native builds.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullNotifier;

impl Notifier for NullNotifier {
    fn success(&self, _message: &str) {}
    fn info(&self, _message: &str) {}
}
