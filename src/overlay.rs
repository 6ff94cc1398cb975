//! Mini-game overlay seam
//!
//! The keystroke detector opens the overlay; the embedded game reports a
//! win through [`MiniGame::win`], which fires the registered callback (the
//! page wiring points it at the progress store) and closes the overlay.
//! Closing without winning reports nothing. The game itself is external,
//! only its open/close/win seam lives here.

/// Overlay state for the hidden mini-game
pub struct MiniGame {
    open: bool,
    on_win: Box<dyn Fn()>,
}

impl MiniGame {
    pub fn new(on_win: impl Fn() + 'static) -> Self {
        Self {
            open: false,
            on_win: Box::new(on_win),
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Open the overlay. Returns true when this call opened it (false when
    /// it was already open).
    pub fn open(&mut self) -> bool {
        if self.open {
            return false;
        }
        self.open = true;
        true
    }

    /// Close the overlay without a win; no progress is recorded.
    pub fn close(&mut self) {
        self.open = false;
    }

    /// Win signal from the embedded game. Fires the win callback and closes
    /// the overlay; ignored while closed. Returns true when the win was
    /// accepted.
    pub fn win(&mut self) -> bool {
        if !self.open {
            return false;
        }
        (self.on_win)();
        self.open = false;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    fn counted_game() -> (MiniGame, Rc<Cell<u32>>) {
        let wins = Rc::new(Cell::new(0));
        let recorded = wins.clone();
        let game = MiniGame::new(move || recorded.set(recorded.get() + 1));
        (game, wins)
    }

    #[test]
    fn test_open_close_cycle() {
        let (mut game, wins) = counted_game();
        assert!(!game.is_open());

        assert!(game.open());
        assert!(game.is_open());
        assert!(!game.open());

        game.close();
        assert!(!game.is_open());
        assert_eq!(wins.get(), 0);
    }

    #[test]
    fn test_win_fires_callback_and_closes() {
        let (mut game, wins) = counted_game();
        game.open();

        assert!(game.win());
        assert_eq!(wins.get(), 1);
        assert!(!game.is_open());
    }

    #[test]
    fn test_win_while_closed_is_ignored() {
        let (mut game, wins) = counted_game();
        assert!(!game.win());
        assert_eq!(wins.get(), 0);
    }

    #[test]
    fn test_close_without_win_records_nothing() {
        let (mut game, wins) = counted_game();
        game.open();
        game.close();

        assert!(!game.win());
        assert_eq!(wins.get(), 0);
    }

    #[test]
    fn test_sequence_to_win_records_clue4() {
        use crate::detect::KeyBuffer;
        use crate::notify::NullNotifier;
        use crate::progress::{Clue, ProgressStore};
        use crate::storage::MemoryStorage;

        let storage = Rc::new(MemoryStorage::new());
        let store = Rc::new(ProgressStore::new(
            Box::new(storage.clone()),
            Box::new(NullNotifier),
        ));

        let recorder = store.clone();
        let mut game = MiniGame::new(move || {
            recorder.update(Clue::Four);
        });

        let mut buffer = KeyBuffer::new();
        for key in ["t", "r", "u", "c"] {
            assert!(!buffer.push(key));
        }
        assert!(buffer.push("k"));

        game.open();
        assert!(game.win());
        assert!(store.get().clue4);

        // Replaying the win cannot double-record
        game.open();
        assert!(game.win());
        assert_eq!(store.get().found_count(), 1);
    }
}
