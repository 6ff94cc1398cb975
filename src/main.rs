//! Treasure hunt entry point
//!
//! Mounts the detectors on the host page (WASM) and tears them down again
//! on request; the native build only runs a storage self-check.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_hunt {
    use std::cell::RefCell;
    use std::rc::Rc;

    use treasure_hunt::consts::WIN_EVENT;
    use treasure_hunt::detect::{KeySequenceDetector, ScrollDwellDetector, Subscription};
    use treasure_hunt::notify::ToastNotifier;
    use treasure_hunt::storage::LocalStorage;
    use treasure_hunt::{Clue, MiniGame, ProgressStore};

    /// Everything mounted on the page.
    ///
    /// Dropping it detaches every listener and cancels any pending
    /// countdown; nothing can call into the store after unmount.
    struct HuntApp {
        _scroll: ScrollDwellDetector,
        _keys: KeySequenceDetector,
        _overlay_subs: Vec<Subscription>,
        _clue_subs: Vec<Subscription>,
    }

    thread_local! {
        static APP: RefCell<Option<HuntApp>> = const { RefCell::new(None) };
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Treasure hunt starting...");

        let store = Rc::new(ProgressStore::new(
            Box::new(LocalStorage),
            Box::new(ToastNotifier),
        ));

        // Winning the mini-game records clue 4
        let overlay = {
            let store = store.clone();
            Rc::new(RefCell::new(MiniGame::new(move || {
                store.update(Clue::Four);
            })))
        };

        // Dwelling at the page bottom records clue 2
        let scroll = {
            let store = store.clone();
            ScrollDwellDetector::attach(move || {
                store.update(Clue::Two);
            })
        };

        // Typing the secret word opens the mini-game overlay
        let keys = {
            let overlay = overlay.clone();
            KeySequenceDetector::attach(move || {
                open_overlay(&overlay);
            })
        };

        let (Some(scroll), Some(keys)) = (scroll, keys) else {
            log::warn!("No window, treasure hunt not mounted");
            return;
        };

        let overlay_subs = setup_overlay(overlay);
        let clue_subs = setup_click_clues(store.clone());

        APP.with(|app| {
            *app.borrow_mut() = Some(HuntApp {
                _scroll: scroll,
                _keys: keys,
                _overlay_subs: overlay_subs,
                _clue_subs: clue_subs,
            });
        });

        log::info!(
            "Treasure hunt running ({} of 5 clues found)",
            store.get().found_count()
        );
    }

    /// Drop the mounted app; listeners and timers go with it.
    pub fn unmount() {
        let was_mounted = APP.with(|app| app.borrow_mut().take()).is_some();
        if was_mounted {
            log::info!("Treasure hunt unmounted");
        }
    }

    fn open_overlay(overlay: &Rc<RefCell<MiniGame>>) {
        if overlay.borrow_mut().open() {
            set_overlay_class("minigame");
            log::info!("Mini-game overlay opened");
        }
    }

    fn set_overlay_class(class: &str) {
        let document = web_sys::window().and_then(|w| w.document());
        if let Some(el) = document.and_then(|d| d.get_element_by_id("minigame-overlay")) {
            let _ = el.set_attribute("class", class);
        }
    }

    /// Wire the overlay's close button and the game's win event
    fn setup_overlay(overlay: Rc<RefCell<MiniGame>>) -> Vec<Subscription> {
        let mut subs = Vec::new();
        let document = match web_sys::window().and_then(|w| w.document()) {
            Some(d) => d,
            None => return subs,
        };

        // Overlay starts hidden
        set_overlay_class("minigame hidden");

        // Close button - abandoning the game records nothing
        if let Some(btn) = document.get_element_by_id("minigame-close") {
            let overlay = overlay.clone();
            let target: &web_sys::EventTarget = btn.as_ref();
            subs.push(Subscription::subscribe(target, "click", move |_event| {
                overlay.borrow_mut().close();
                set_overlay_class("minigame hidden");
            }));
        }

        // The embedded game dispatches the win event on the document
        {
            let target: &web_sys::EventTarget = document.as_ref();
            subs.push(Subscription::subscribe(target, WIN_EVENT, move |_event| {
                if overlay.borrow_mut().win() {
                    set_overlay_class("minigame hidden");
                }
            }));
        }

        subs
    }

    /// Wire the hidden click targets (clues 1, 3, 5) and the reset control.
    /// Pages that omit an element simply never award that clue.
    fn setup_click_clues(store: Rc<ProgressStore>) -> Vec<Subscription> {
        let mut subs = Vec::new();
        let document = match web_sys::window().and_then(|w| w.document()) {
            Some(d) => d,
            None => return subs,
        };

        let targets = [
            ("clue-1", Clue::One),
            ("clue-3", Clue::Three),
            ("clue-5", Clue::Five),
        ];
        for (id, clue) in targets {
            if let Some(el) = document.get_element_by_id(id) {
                let store = store.clone();
                let target: &web_sys::EventTarget = el.as_ref();
                subs.push(Subscription::subscribe(target, "click", move |_event| {
                    store.update(clue);
                }));
            } else {
                log::info!("Clue element #{} not on this page", id);
            }
        }

        if let Some(btn) = document.get_element_by_id("hunt-reset") {
            let target: &web_sys::EventTarget = btn.as_ref();
            subs.push(Subscription::subscribe(target, "click", move |_event| {
                store.reset();
            }));
        }

        subs
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_hunt::run();
}

/// Detach all listeners and cancel pending timers (SPA route changes)
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn unmount() {
    wasm_hunt::unmount();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Treasure hunt (native) starting...");
    log::info!("Native mode has no DOM - run with `trunk serve` for the web version");

    // Self-check
    println!("\nRunning progress store checks...");
    check_progress_store();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn check_progress_store() {
    use treasure_hunt::notify::NullNotifier;
    use treasure_hunt::{Clue, MemoryStorage, ProgressStore};

    let store = ProgressStore::new(Box::new(MemoryStorage::new()), Box::new(NullNotifier));
    assert!(store.update(Clue::One), "first update should record the clue");
    assert!(!store.update(Clue::One), "repeat update should be a no-op");
    assert!(store.get().clue1);

    store.reset();
    assert_eq!(store.get().found_count(), 0);

    println!("✓ Progress store checks passed!");
}
