//! Keystroke-sequence detector
//!
//! Keeps a rolling, case-insensitive buffer of the last few characters
//! typed and fires when it spells the secret word. Every keydown feeds the
//! buffer unfiltered, so multi-character key names ("Shift", "ArrowUp")
//! land in it verbatim; that is the intended behavior, not an oversight.

use crate::consts::{KEY_BUFFER_LEN, SECRET_SEQUENCE};

/// Rolling keystroke buffer
#[derive(Debug, Default)]
pub struct KeyBuffer {
    chars: String,
}

impl KeyBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one keydown's `key` value. Returns true when the buffer now
    /// exactly spells the secret sequence; the buffer clears on a match so
    /// the sequence can be typed again.
    pub fn push(&mut self, key: &str) -> bool {
        for ch in key.chars() {
            for lower in ch.to_lowercase() {
                self.chars.push(lower);
            }
        }

        let excess = self.chars.chars().count().saturating_sub(KEY_BUFFER_LEN);
        if excess > 0 {
            self.chars = self.chars.chars().skip(excess).collect();
        }

        if self.chars == SECRET_SEQUENCE {
            self.chars.clear();
            return true;
        }
        false
    }

    /// Current buffer contents (most recent characters last)
    pub fn as_str(&self) -> &str {
        &self.chars
    }
}

#[cfg(target_arch = "wasm32")]
mod wasm {
    use wasm_bindgen::JsCast;

    use super::KeyBuffer;
    use crate::detect::Subscription;

    /// Window keydown listener feeding a [`KeyBuffer`].
    ///
    /// Dropping the detector removes the listener.
    pub struct KeySequenceDetector {
        _subscription: Subscription,
    }

    impl KeySequenceDetector {
        /// Attach to window keydown; `on_match` fires each time the secret
        /// sequence is typed.
        pub fn attach(on_match: impl Fn() + 'static) -> Option<Self> {
            let window = web_sys::window()?;
            let mut buffer = KeyBuffer::new();

            let target: &web_sys::EventTarget = window.as_ref();
            let subscription = Subscription::subscribe(target, "keydown", move |event| {
                if let Some(event) = event.dyn_ref::<web_sys::KeyboardEvent>() {
                    if buffer.push(&event.key()) {
                        log::info!("Secret sequence entered");
                        on_match();
                    }
                }
            });

            Some(Self {
                _subscription: subscription,
            })
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use wasm::KeySequenceDetector;
