//! Card event routing.
//!
//! # Responsibility
//! - Map card-level interactions to board commands.
//!
//! # Invariants
//! - Escape and blur always commit the edit.
//! - Board errors are logged, never raised.

use log::error;
use stickynotes_core::{
    BoardResult, KeyValueStore, NoteBoard, NoteId, NoteSurface, Position, PressTarget,
    RandomSource,
};

/// Card-level interaction reported by the DOM.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CardEvent {
    DeleteClicked,
    DoubleClicked,
    /// Enter pressed while the card itself had focus.
    EnterOnCard,
    /// Escape pressed while the content region was editable.
    Escape,
    ContentBlurred,
    /// Mouse or touch press, in container-local coordinates.
    Pressed {
        pointer: Position,
        target: PressTarget,
    },
}

/// Applies `event` on note `id` to the board.
pub fn handle_card_event<S, V, R>(board: &mut NoteBoard<S, V, R>, id: &NoteId, event: CardEvent)
where
    S: KeyValueStore,
    V: NoteSurface,
    R: RandomSource,
{
    let result: BoardResult<bool> = match event {
        CardEvent::DeleteClicked => board.delete(id),
        CardEvent::DoubleClicked | CardEvent::EnterOnCard => Ok(board.enter_edit(id)),
        CardEvent::Escape | CardEvent::ContentBlurred => board.exit_edit(id, true),
        CardEvent::Pressed { pointer, target } => Ok(board.drag_start(id, pointer, target)),
    };
    if let Err(err) = result {
        error!("event=card_event module=web status=error note_id={id} event={event:?} error={err}");
    }
}

#[cfg(test)]
mod tests {
    use super::{handle_card_event, CardEvent};
    use stickynotes_core::{
        HeadlessSurface, KeyValueStore, MemoryKeyValueStore, NewNote, Note, NoteBoard, Position,
        PressTarget, RandomSource, RngSource, Size,
    };

    fn board_with_note() -> (
        NoteBoard<MemoryKeyValueStore, HeadlessSurface, impl RandomSource>,
        Note,
    ) {
        let mut board = NoteBoard::new(
            MemoryKeyValueStore::new(),
            HeadlessSurface::new(Size::new(800.0, 600.0)),
            RngSource::seeded(5),
        );
        let note = board.create(NewNote::default().with_content("draft")).unwrap();
        (board, note)
    }

    #[test]
    fn double_click_and_enter_open_editing() {
        for event in [CardEvent::DoubleClicked, CardEvent::EnterOnCard] {
            let (mut board, note) = board_with_note();
            handle_card_event(&mut board, note.id(), event);
            assert!(board.is_editing(note.id()), "{event:?}");
            assert!(board.surface().card(note.id()).unwrap().editable);
        }
    }

    #[test]
    fn escape_and_blur_commit_the_edit() {
        for event in [CardEvent::Escape, CardEvent::ContentBlurred] {
            let (mut board, note) = board_with_note();
            handle_card_event(&mut board, note.id(), CardEvent::DoubleClicked);
            board.surface_mut().type_text(note.id(), "Hello");
            handle_card_event(&mut board, note.id(), event);

            assert!(!board.is_editing(note.id()), "{event:?}");
            assert_eq!(board.note(note.id()).unwrap().content(), "Hello");
            let blob = board.store().get_item("stickyNotesData").unwrap().unwrap();
            assert!(blob.contains("\"content\":\"Hello\""), "{event:?}: {blob}");
        }
    }

    #[test]
    fn blur_after_commit_is_harmless() {
        let (mut board, note) = board_with_note();
        handle_card_event(&mut board, note.id(), CardEvent::EnterOnCard);
        board.surface_mut().type_text(note.id(), "kept");
        handle_card_event(&mut board, note.id(), CardEvent::Escape);
        handle_card_event(&mut board, note.id(), CardEvent::ContentBlurred);
        assert_eq!(board.note(note.id()).unwrap().content(), "kept");
        assert!(!board.is_editing(note.id()));
    }

    #[test]
    fn delete_click_removes_the_note() {
        let (mut board, note) = board_with_note();
        handle_card_event(&mut board, note.id(), CardEvent::DeleteClicked);
        assert!(!board.contains(note.id()));
        assert!(board.surface().cards().is_empty());
        assert_eq!(
            board.store().get_item("stickyNotesData").unwrap().as_deref(),
            Some("[]")
        );
    }

    #[test]
    fn press_on_body_starts_drag_but_content_does_not() {
        let (mut board, note) = board_with_note();
        let content_press = CardEvent::Pressed {
            pointer: Position::new(25.0, 25.0),
            target: PressTarget::Content,
        };
        handle_card_event(&mut board, note.id(), content_press);
        assert_eq!(board.dragging(), None);

        let body_press = CardEvent::Pressed {
            pointer: Position::new(25.0, 25.0),
            target: PressTarget::Body,
        };
        handle_card_event(&mut board, note.id(), body_press);
        assert_eq!(board.dragging(), Some(note.id()));
        assert_eq!(
            board.drag_move(Position::new(105.0, 65.0)),
            Some(Position::new(100.0, 60.0))
        );
    }
}
