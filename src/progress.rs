//! Clue progress record and store
//!
//! Progress is one named LocalStorage entry, JSON-encoded with one boolean
//! per clue. Marking a clue is idempotent; flags only go from false to true,
//! and nothing short of a full reset clears them. There is no version field,
//! a record that fails to parse is treated as fresh.

use serde::{Deserialize, Serialize};

use crate::consts::CLUE_COUNT;
use crate::notify::Notifier;
use crate::storage::StorageBackend;

/// The five discoverable clues
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Clue {
    One,
    Two,
    Three,
    Four,
    Five,
}

impl Clue {
    /// All clues, in display order
    pub const ALL: [Clue; CLUE_COUNT] = [Clue::One, Clue::Two, Clue::Three, Clue::Four, Clue::Five];

    /// Field name in the persisted record
    pub fn key(&self) -> &'static str {
        match self {
            Clue::One => "clue1",
            Clue::Two => "clue2",
            Clue::Three => "clue3",
            Clue::Four => "clue4",
            Clue::Five => "clue5",
        }
    }

    pub fn from_key(s: &str) -> Option<Self> {
        match s {
            "clue1" => Some(Clue::One),
            "clue2" => Some(Clue::Two),
            "clue3" => Some(Clue::Three),
            "clue4" => Some(Clue::Four),
            "clue5" => Some(Clue::Five),
            _ => None,
        }
    }
}

/// Persisted clue record
///
/// Exactly five independent flags; clues may be found in any order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ClueProgress {
    pub clue1: bool,
    pub clue2: bool,
    pub clue3: bool,
    pub clue4: bool,
    pub clue5: bool,
}

impl ClueProgress {
    pub fn is_found(&self, clue: Clue) -> bool {
        match clue {
            Clue::One => self.clue1,
            Clue::Two => self.clue2,
            Clue::Three => self.clue3,
            Clue::Four => self.clue4,
            Clue::Five => self.clue5,
        }
    }

    fn mark_found(&mut self, clue: Clue) {
        match clue {
            Clue::One => self.clue1 = true,
            Clue::Two => self.clue2 = true,
            Clue::Three => self.clue3 = true,
            Clue::Four => self.clue4 = true,
            Clue::Five => self.clue5 = true,
        }
    }

    /// Number of clues found so far
    pub fn found_count(&self) -> usize {
        Clue::ALL.iter().filter(|c| self.is_found(**c)).count()
    }

    /// True once every clue has been found
    pub fn complete(&self) -> bool {
        self.found_count() == CLUE_COUNT
    }
}

/// Store over the persisted record
///
/// Persistence and notification are injected so tests run against an
/// in-memory backend and a recording sink.
pub struct ProgressStore {
    storage: Box<dyn StorageBackend>,
    notifier: Box<dyn Notifier>,
}

impl ProgressStore {
    /// LocalStorage key
    pub const STORAGE_KEY: &'static str = "treasure_hunt_progress";

    pub fn new(storage: Box<dyn StorageBackend>, notifier: Box<dyn Notifier>) -> Self {
        Self { storage, notifier }
    }

    /// Current record, or the all-false default when nothing readable is
    /// stored. Never fails; absence of data is not an error.
    pub fn get(&self) -> ClueProgress {
        match self.storage.get(Self::STORAGE_KEY) {
            Some(json) => match serde_json::from_str(&json) {
                Ok(progress) => progress,
                Err(err) => {
                    // Unreadable record: treat as fresh, next update overwrites it
                    log::warn!("Stored hunt progress unreadable, starting fresh: {}", err);
                    ClueProgress::default()
                }
            },
            None => ClueProgress::default(),
        }
    }

    /// Mark `clue` as found.
    ///
    /// Returns true when this call newly recorded the clue (record persisted,
    /// one success toast emitted). An already-found clue is a no-op: nothing
    /// is written, nothing is notified, returns false.
    pub fn update(&self, clue: Clue) -> bool {
        let mut progress = self.get();
        if progress.is_found(clue) {
            return false;
        }

        progress.mark_found(clue);
        self.persist(&progress);

        let found = progress.found_count();
        log::info!("Clue found: {} ({}/{})", clue.key(), found, CLUE_COUNT);
        if progress.complete() {
            self.notifier
                .success("Treasure hunt complete! You found every clue!");
        } else {
            self.notifier
                .success(&format!("Clue found! ({} of {})", found, CLUE_COUNT));
        }

        true
    }

    /// Delete the record entirely. Subsequent reads see the default.
    pub fn reset(&self) {
        self.storage.remove(Self::STORAGE_KEY);
        log::info!("Hunt progress reset");
        self.notifier.info("Treasure hunt progress reset");
    }

    fn persist(&self, progress: &ClueProgress) {
        if let Ok(json) = serde_json::to_string(progress) {
            self.storage.set(Self::STORAGE_KEY, &json);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Notifier fake that records every message
    #[derive(Default)]
    struct RecordingNotifier {
        success: Rc<RefCell<Vec<String>>>,
        info: Rc<RefCell<Vec<String>>>,
    }

    impl Notifier for RecordingNotifier {
        fn success(&self, message: &str) {
            self.success.borrow_mut().push(message.to_string());
        }

        fn info(&self, message: &str) {
            self.info.borrow_mut().push(message.to_string());
        }
    }

    struct Fixture {
        store: ProgressStore,
        storage: Rc<MemoryStorage>,
        success: Rc<RefCell<Vec<String>>>,
        info: Rc<RefCell<Vec<String>>>,
    }

    fn fixture() -> Fixture {
        let storage = Rc::new(MemoryStorage::new());
        let notifier = RecordingNotifier::default();
        let success = notifier.success.clone();
        let info = notifier.info.clone();
        let store = ProgressStore::new(Box::new(storage.clone()), Box::new(notifier));
        Fixture {
            store,
            storage,
            success,
            info,
        }
    }

    #[test]
    fn test_get_without_data_is_default() {
        let f = fixture();
        assert_eq!(f.store.get(), ClueProgress::default());
    }

    #[test]
    fn test_fresh_update_marks_only_that_clue() {
        let f = fixture();
        assert!(f.store.update(Clue::One));
        assert_eq!(
            f.store.get(),
            ClueProgress {
                clue1: true,
                clue2: false,
                clue3: false,
                clue4: false,
                clue5: false,
            }
        );
    }

    #[test]
    fn test_update_is_idempotent_and_notifies_once() {
        let f = fixture();
        assert!(f.store.update(Clue::Three));
        assert!(!f.store.update(Clue::Three));

        assert!(f.store.get().clue3);
        assert_eq!(f.success.borrow().len(), 1);
    }

    #[test]
    fn test_update_already_found_leaves_record_unchanged() {
        let f = fixture();
        f.store.update(Clue::Two);
        let stored = f.storage.get(ProgressStore::STORAGE_KEY);

        assert!(!f.store.update(Clue::Two));
        assert_eq!(f.storage.get(ProgressStore::STORAGE_KEY), stored);
    }

    #[test]
    fn test_reset_clears_any_prior_state() {
        let f = fixture();
        f.store.update(Clue::One);
        f.store.update(Clue::Four);

        f.store.reset();

        assert_eq!(f.store.get(), ClueProgress::default());
        assert_eq!(f.storage.get(ProgressStore::STORAGE_KEY), None);
        assert_eq!(f.info.borrow().len(), 1);
    }

    #[test]
    fn test_malformed_record_reads_as_default_and_is_overwritten() {
        let f = fixture();
        f.storage.set(ProgressStore::STORAGE_KEY, "{not json");

        assert_eq!(f.store.get(), ClueProgress::default());
        assert!(f.store.update(Clue::Five));

        let json = f.storage.get(ProgressStore::STORAGE_KEY).unwrap();
        let progress: ClueProgress = serde_json::from_str(&json).unwrap();
        assert!(progress.clue5);
        assert_eq!(progress.found_count(), 1);
    }

    #[test]
    fn test_completion_message_on_final_clue() {
        let f = fixture();
        for clue in Clue::ALL {
            assert!(f.store.update(clue));
        }

        assert!(f.store.get().complete());
        assert_eq!(f.success.borrow().len(), 5);
        assert!(f.success.borrow().last().unwrap().contains("complete"));
    }

    #[test]
    fn test_clue_key_roundtrip() {
        for clue in Clue::ALL {
            assert_eq!(Clue::from_key(clue.key()), Some(clue));
        }
        assert_eq!(Clue::from_key("clue6"), None);
    }
}
