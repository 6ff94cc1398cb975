//! Scroll-dwell detector
//!
//! Awards a clue for resting at the very bottom of the page. The transition
//! logic is a two-state machine kept free of browser types so it tests
//! natively; the WASM wrapper owns the scroll subscription and the countdown
//! handle.

/// Dwell detector states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DwellState {
    /// Viewport is away from the page bottom
    #[default]
    Idle,
    /// Viewport reached the bottom, countdown running
    Arming,
}

/// What the host wrapper must do after feeding a scroll sample
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DwellAction {
    None,
    StartCountdown,
    CancelCountdown,
}

/// Idle/Arming transition logic
#[derive(Debug, Default)]
pub struct DwellMachine {
    state: DwellState,
}

impl DwellMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> DwellState {
        self.state
    }

    /// Feed one scroll sample (`at_bottom` = viewport within tolerance of
    /// the document's scrollable bottom edge).
    pub fn on_scroll(&mut self, at_bottom: bool) -> DwellAction {
        match (self.state, at_bottom) {
            (DwellState::Idle, true) => {
                self.state = DwellState::Arming;
                DwellAction::StartCountdown
            }
            (DwellState::Arming, false) => {
                self.state = DwellState::Idle;
                DwellAction::CancelCountdown
            }
            // Scrolling within the bottom band keeps the countdown running
            _ => DwellAction::None,
        }
    }

    /// Countdown elapsed uncancelled. Returns true when the dwell completed
    /// and the clue should be awarded; the machine re-arms on the next
    /// bottom arrival.
    pub fn on_countdown_elapsed(&mut self) -> bool {
        match self.state {
            DwellState::Arming => {
                self.state = DwellState::Idle;
                true
            }
            DwellState::Idle => false,
        }
    }
}

#[cfg(target_arch = "wasm32")]
mod wasm {
    use std::cell::RefCell;
    use std::rc::Rc;

    use gloo_timers::callback::Timeout;

    use super::{DwellAction, DwellMachine};
    use crate::consts::{BOTTOM_TOLERANCE_PX, DWELL_MS};
    use crate::detect::Subscription;

    struct DwellInner {
        machine: DwellMachine,
        countdown: Option<Timeout>,
        on_dwell: Rc<dyn Fn()>,
    }

    /// Scroll listener plus countdown ownership.
    ///
    /// Dropping the detector removes the listener and cancels any pending
    /// countdown, so `on_dwell` can never fire after teardown.
    pub struct ScrollDwellDetector {
        inner: Rc<RefCell<DwellInner>>,
        _subscription: Subscription,
    }

    impl ScrollDwellDetector {
        /// Attach to window scroll; `on_dwell` fires after each uninterrupted
        /// full dwell at the page bottom.
        pub fn attach(on_dwell: impl Fn() + 'static) -> Option<Self> {
            let window = web_sys::window()?;

            let inner = Rc::new(RefCell::new(DwellInner {
                machine: DwellMachine::new(),
                countdown: None,
                on_dwell: Rc::new(on_dwell),
            }));

            let subscription = {
                let inner = inner.clone();
                let win = window.clone();
                let target: &web_sys::EventTarget = window.as_ref();
                Subscription::subscribe(target, "scroll", move |_event| {
                    Self::feed(&inner, at_bottom(&win));
                })
            };

            Some(Self {
                inner,
                _subscription: subscription,
            })
        }

        fn feed(inner: &Rc<RefCell<DwellInner>>, at_bottom: bool) {
            let action = inner.borrow_mut().machine.on_scroll(at_bottom);
            match action {
                DwellAction::StartCountdown => {
                    let fire = inner.clone();
                    let countdown = Timeout::new(DWELL_MS, move || {
                        let elapsed = {
                            let mut inner = fire.borrow_mut();
                            inner.countdown = None;
                            inner.machine.on_countdown_elapsed()
                        };
                        if elapsed {
                            let on_dwell = fire.borrow().on_dwell.clone();
                            on_dwell();
                        }
                    });
                    inner.borrow_mut().countdown = Some(countdown);
                }
                // Dropping the handle clears the browser timeout
                DwellAction::CancelCountdown => {
                    inner.borrow_mut().countdown = None;
                }
                DwellAction::None => {}
            }
        }
    }

    impl Drop for ScrollDwellDetector {
        fn drop(&mut self) {
            // Also breaks the inner <-> countdown closure cycle
            self.inner.borrow_mut().countdown = None;
        }
    }

    /// Viewport bottom within tolerance of the document's scrollable bottom
    fn at_bottom(window: &web_sys::Window) -> bool {
        let document_height = match window.document().and_then(|d| d.document_element()) {
            Some(root) => root.scroll_height() as f64,
            None => return false,
        };
        let scroll_y = window.scroll_y().unwrap_or(0.0);
        let viewport = window
            .inner_height()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(0.0);

        viewport + scroll_y >= document_height - BOTTOM_TOLERANCE_PX
    }
}

#[cfg(target_arch = "wasm32")]
pub use wasm::ScrollDwellDetector;
