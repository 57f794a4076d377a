//! In-memory surface for tests and terminal hosts.

use super::NoteSurface;
use crate::model::note::{Note, NoteId, Position, Size};

/// Card size used when none is configured.
pub const DEFAULT_NOTE_SIZE: Size = Size::new(200.0, 150.0);

/// Visual state of one headless card.
#[derive(Debug, Clone, PartialEq)]
pub struct HeadlessCard {
    pub id: NoteId,
    pub content: String,
    pub position: Position,
    pub color: String,
    pub raised: bool,
    pub editable: bool,
}

/// Surface that records card state instead of drawing it.
#[derive(Debug, Clone)]
pub struct HeadlessSurface {
    container: Size,
    note_size: Size,
    cards: Vec<HeadlessCard>,
    focused: Option<NoteId>,
}

impl HeadlessSurface {
    pub fn new(container: Size) -> Self {
        Self::with_note_size(container, DEFAULT_NOTE_SIZE)
    }

    pub fn with_note_size(container: Size, note_size: Size) -> Self {
        Self {
            container,
            note_size,
            cards: Vec::new(),
            focused: None,
        }
    }

    /// Cards in container order.
    pub fn cards(&self) -> &[HeadlessCard] {
        &self.cards
    }

    pub fn card(&self, id: &NoteId) -> Option<&HeadlessCard> {
        self.cards.iter().find(|card| &card.id == id)
    }

    pub fn focused(&self) -> Option<&NoteId> {
        self.focused.as_ref()
    }

    /// Replaces the content text as a user typing would.
    ///
    /// Returns `false` when the card is missing or read-only.
    pub fn type_text(&mut self, id: &NoteId, text: &str) -> bool {
        match self.card_mut(id) {
            Some(card) if card.editable => {
                card.content = text.to_string();
                true
            }
            _ => false,
        }
    }

    fn card_mut(&mut self, id: &NoteId) -> Option<&mut HeadlessCard> {
        self.cards.iter_mut().find(|card| &card.id == id)
    }
}

impl NoteSurface for HeadlessSurface {
    fn mount(&mut self, note: &Note) {
        self.cards.push(HeadlessCard {
            id: note.id().clone(),
            content: note.content().to_string(),
            position: note.position(),
            color: note.color().to_string(),
            raised: false,
            editable: false,
        });
    }

    fn unmount(&mut self, id: &NoteId) {
        self.cards.retain(|card| &card.id != id);
        if self.focused.as_ref() == Some(id) {
            self.focused = None;
        }
    }

    fn set_position(&mut self, id: &NoteId, position: Position) {
        if let Some(card) = self.card_mut(id) {
            card.position = position;
        }
    }

    fn set_color(&mut self, id: &NoteId, color: &str) {
        if let Some(card) = self.card_mut(id) {
            card.color = color.to_string();
        }
    }

    fn set_raised(&mut self, id: &NoteId, raised: bool) {
        if let Some(card) = self.card_mut(id) {
            card.raised = raised;
        }
    }

    fn set_editable(&mut self, id: &NoteId, editable: bool) {
        let Some(card) = self.card_mut(id) else {
            return;
        };
        card.editable = editable;
        if editable {
            self.focused = Some(id.clone());
        } else if self.focused.as_ref() == Some(id) {
            self.focused = None;
        }
    }

    fn set_content(&mut self, id: &NoteId, content: &str) {
        if let Some(card) = self.card_mut(id) {
            card.content = content.to_string();
        }
    }

    fn read_content(&self, id: &NoteId) -> Option<String> {
        self.card(id).map(|card| card.content.clone())
    }

    fn note_size(&self, _id: &NoteId) -> Size {
        self.note_size
    }

    fn container_size(&self) -> Size {
        self.container
    }
}
