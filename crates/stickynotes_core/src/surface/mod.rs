//! Rendering surface contract.
//!
//! # Responsibility
//! - Describe what a board needs from whatever shows the note cards.
//! - Keep board logic independent of the DOM or any other toolkit.
//!
//! # Invariants
//! - Every call addresses a card by `NoteId`; calls for unknown ids are
//!   ignored by implementations.

use crate::model::note::{Note, NoteId, Position, Size};

mod headless;

pub use headless::{HeadlessCard, HeadlessSurface, DEFAULT_NOTE_SIZE};

/// Visual side of a board.
pub trait NoteSurface {
    /// Builds a card for `note` and appends it to the container.
    fn mount(&mut self, note: &Note);
    /// Removes the card.
    fn unmount(&mut self, id: &NoteId);
    fn set_position(&mut self, id: &NoteId, position: Position);
    fn set_color(&mut self, id: &NoteId, color: &str);
    /// Lifts the card above its siblings while `raised` is set.
    fn set_raised(&mut self, id: &NoteId, raised: bool);
    /// `true`: content region editable, focused, caret at end.
    /// `false`: read-only and unfocused.
    fn set_editable(&mut self, id: &NoteId, editable: bool);
    fn set_content(&mut self, id: &NoteId, content: &str);
    /// Current text of the content region, including uncommitted edits.
    fn read_content(&self, id: &NoteId) -> Option<String>;
    fn note_size(&self, id: &NoteId) -> Size;
    fn container_size(&self) -> Size;
}
