//! Treasure Hunt - hidden five-clue easter egg for the parts site
//!
//! Core modules:
//! - `progress`: Persisted clue record and the store that mutates it
//! - `storage`: Key/value persistence seam (LocalStorage on web)
//! - `notify`: One-shot toast notifications on discovery/reset
//! - `detect`: Scroll-dwell and keystroke-sequence trigger detectors
//! - `overlay`: Mini-game overlay open/close/win seam

pub mod detect;
pub mod notify;
pub mod overlay;
pub mod progress;
pub mod storage;

pub use overlay::MiniGame;
pub use progress::{Clue, ClueProgress, ProgressStore};
pub use storage::{MemoryStorage, StorageBackend};

/// Hunt configuration constants
pub mod consts {
    /// Number of discoverable clues
    pub const CLUE_COUNT: usize = 5;

    /// How close (px) the viewport bottom must be to the document bottom
    /// before the scroll-dwell countdown arms
    pub const BOTTOM_TOLERANCE_PX: f64 = 10.0;
    /// Dwell time at the page bottom before the clue is awarded
    pub const DWELL_MS: u32 = 3_000;

    /// Keystroke sequence that opens the mini-game overlay
    pub const SECRET_SEQUENCE: &str = "truck";
    /// Rolling keystroke buffer length (characters)
    pub const KEY_BUFFER_LEN: usize = 5;

    /// DOM event the embedded mini-game dispatches on a win
    pub const WIN_EVENT: &str = "treasurehunt:win";

    /// How long a toast stays on screen
    pub const TOAST_MS: u32 = 4_000;
}
