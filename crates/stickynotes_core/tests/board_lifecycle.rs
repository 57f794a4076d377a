use rand::rngs::StdRng;
use stickynotes_core::{
    BoardConfig, HeadlessSurface, KeyValueStore, MemoryKeyValueStore, NewNote, NoteBoard, NoteId,
    Position, PressTarget, RngSource, Size, DEFAULT_PALETTE,
};
use std::collections::HashSet;

type TestBoard = NoteBoard<MemoryKeyValueStore, HeadlessSurface, RngSource<StdRng>>;

const CONTAINER: Size = Size::new(600.0, 400.0);
const NOTE: Size = Size::new(150.0, 100.0);

fn new_board(seed: u64) -> TestBoard {
    NoteBoard::new(
        MemoryKeyValueStore::new(),
        HeadlessSurface::with_note_size(CONTAINER, NOTE),
        RngSource::seeded(seed),
    )
}

fn stored_blob(board: &TestBoard) -> serde_json::Value {
    let raw = board
        .store()
        .get_item("stickyNotesData")
        .unwrap()
        .expect("board blob should exist");
    serde_json::from_str(&raw).unwrap()
}

#[test]
fn default_create_uses_placeholder_offset_and_palette() {
    let mut board = new_board(3);
    let note = board.create(NewNote::default()).unwrap();

    assert_eq!(note.content(), "New Note");
    assert_eq!(note.position(), Position::new(20.0, 20.0));
    assert!(DEFAULT_PALETTE.contains(&note.color()));

    let blob = stored_blob(&board);
    assert_eq!(blob[0]["left"], "20px");
    assert_eq!(blob[0]["top"], "20px");
    assert_eq!(blob[0]["content"], "New Note");

    let card = board.surface().card(note.id()).unwrap();
    assert_eq!(card.color, note.color());
    assert!(!card.editable);
}

#[test]
fn create_respects_supplied_fields() {
    let mut board = new_board(3);
    let note = board
        .create(
            NewNote::default()
                .with_content("groceries")
                .with_position(Position::new(55.0, 60.5))
                .with_color("rgb(1, 2, 3)")
                .with_id("_legacy01"),
        )
        .unwrap();

    assert_eq!(note.id(), &NoteId::from("_legacy01"));
    assert_eq!(note.content(), "groceries");
    assert_eq!(note.position(), Position::new(55.0, 60.5));
    assert_eq!(note.color(), "rgb(1, 2, 3)");
}

#[test]
fn creates_yield_distinct_ids() {
    let mut board = new_board(11);
    for _ in 0..50 {
        board.create(NewNote::default()).unwrap();
    }
    let ids: HashSet<&NoteId> = board.notes().iter().map(|note| note.id()).collect();
    assert_eq!(ids.len(), 50);
}

#[test]
fn duplicate_requested_id_is_reassigned() {
    let mut board = new_board(5);
    let first = board.create(NewNote::default().with_id("same")).unwrap();
    let second = board.create(NewNote::default().with_id("same")).unwrap();
    assert_eq!(first.id().as_str(), "same");
    assert_ne!(second.id(), first.id());
    assert_eq!(board.notes().len(), 2);
}

#[test]
fn equal_seeds_produce_equal_boards() {
    let mut left = new_board(99);
    let mut right = new_board(99);
    for _ in 0..5 {
        let a = left.create(NewNote::default()).unwrap();
        let b = right.create(NewNote::default()).unwrap();
        assert_eq!(a, b);
    }
}

#[test]
fn delete_removes_note_from_surface_and_next_snapshot() {
    let mut board = new_board(1);
    let keep = board.create(NewNote::default().with_content("keep")).unwrap();
    let gone = board.create(NewNote::default().with_content("drop")).unwrap();

    assert!(board.delete(gone.id()).unwrap());
    assert!(board.note(gone.id()).is_none());
    assert!(board.surface().card(gone.id()).is_none());

    let blob = stored_blob(&board);
    let items = blob.as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["id"], keep.id().as_str());
}

#[test]
fn deleting_unknown_id_is_noop() {
    let mut board = new_board(1);
    board.create(NewNote::default()).unwrap();
    let before = stored_blob(&board);

    assert!(!board.delete(&NoteId::from("missing")).unwrap());
    assert_eq!(board.notes().len(), 1);
    assert_eq!(stored_blob(&board), before);
}

#[test]
fn edit_commit_persists_typed_text() {
    let mut board = new_board(2);
    let note = board.create(NewNote::default()).unwrap();

    assert!(board.enter_edit(note.id()));
    assert!(board.is_editing(note.id()));
    assert_eq!(board.surface().focused(), Some(note.id()));
    assert!(board.surface_mut().type_text(note.id(), "Hello"));

    assert!(board.exit_edit(note.id(), true).unwrap());
    assert!(!board.is_editing(note.id()));
    assert_eq!(board.surface().focused(), None);
    assert_eq!(board.note(note.id()).unwrap().content(), "Hello");

    let blob = stored_blob(&board);
    assert_eq!(blob[0]["id"], note.id().as_str());
    assert_eq!(blob[0]["content"], "Hello");
}

#[test]
fn edit_cancel_restores_stored_text_without_saving() {
    let mut board = new_board(2);
    let note = board.create(NewNote::default().with_content("draft")).unwrap();

    board.enter_edit(note.id());
    board.surface_mut().type_text(note.id(), "scribble");
    assert!(board.exit_edit(note.id(), false).unwrap());

    assert_eq!(board.surface().card(note.id()).unwrap().content, "draft");
    assert_eq!(board.note(note.id()).unwrap().content(), "draft");
    assert_eq!(stored_blob(&board)[0]["content"], "draft");
}

#[test]
fn committing_empty_text_stores_placeholder() {
    let mut board = new_board(2);
    let note = board.create(NewNote::default().with_content("x")).unwrap();
    board.enter_edit(note.id());
    board.surface_mut().type_text(note.id(), "");
    board.exit_edit(note.id(), true).unwrap();

    assert_eq!(board.note(note.id()).unwrap().content(), "New Note");
    assert_eq!(board.surface().card(note.id()).unwrap().content, "New Note");
}

#[test]
fn read_only_card_ignores_typing() {
    let mut board = new_board(2);
    let note = board.create(NewNote::default()).unwrap();
    assert!(!board.surface_mut().type_text(note.id(), "sneaky"));
    assert!(!board.enter_edit(&NoteId::from("missing")));
}

#[test]
fn add_trigger_opens_blank_note_for_editing() {
    let mut board = new_board(4);
    let note = board.add_from_trigger().unwrap();

    assert_eq!(note.position(), Position::new(30.0, 30.0));
    assert_eq!(note.content(), "New Note");
    assert!(board.is_editing(note.id()));
    assert!(board.surface().card(note.id()).unwrap().editable);
    assert_eq!(stored_blob(&board)[0]["left"], "30px");
}

#[test]
fn drag_result_stays_inside_container() {
    let mut board = new_board(6);
    let note = board.create(NewNote::default()).unwrap();
    let pointers = [
        (-500.0, -500.0),
        (10_000.0, 10_000.0),
        (0.0, 9999.0),
        (599.0, -3.0),
        (300.0, 200.0),
        (40.0, 31.25),
    ];

    for (x, y) in pointers {
        assert!(board.drag_start(note.id(), Position::new(30.0, 30.0), PressTarget::Body));
        board.drag_move(Position::new(x, y));
        board.drag_end().unwrap();

        let position = board.note(note.id()).unwrap().position();
        assert!(position.left >= 0.0 && position.left <= CONTAINER.width - NOTE.width);
        assert!(position.top >= 0.0 && position.top <= CONTAINER.height - NOTE.height);
        assert_eq!(board.surface().card(note.id()).unwrap().position, position);
    }
}

#[test]
fn drag_release_saves_final_position() {
    let mut board = new_board(6);
    let note = board.create(NewNote::default()).unwrap();

    board.drag_start(note.id(), Position::new(25.0, 25.0), PressTarget::Body);
    board.drag_move(Position::new(105.5, 85.0));
    assert_eq!(stored_blob(&board)[0]["left"], "20px");

    board.drag_end().unwrap();
    let blob = stored_blob(&board);
    assert_eq!(blob[0]["left"], "100.5px");
    assert_eq!(blob[0]["top"], "80px");
}

#[test]
fn recolor_updates_surface_and_snapshot() {
    let mut board = new_board(8);
    let note = board.create(NewNote::default()).unwrap();
    assert!(board.recolor(note.id(), "#c7ceea").unwrap());
    assert_eq!(board.surface().card(note.id()).unwrap().color, "#c7ceea");
    assert_eq!(stored_blob(&board)[0]["color"], "#c7ceea");
    assert!(!board.recolor(&NoteId::from("missing"), "#000").unwrap());
}

#[test]
fn custom_config_drives_key_and_palette() {
    let config = BoardConfig {
        storage_key: "board-b".to_string(),
        palette: vec!["#123456".to_string()],
        ..BoardConfig::default()
    };
    let mut board = NoteBoard::with_config(
        MemoryKeyValueStore::new(),
        HeadlessSurface::new(CONTAINER),
        RngSource::seeded(0),
        config,
    );
    let note = board.create(NewNote::default()).unwrap();
    assert_eq!(note.color(), "#123456");
    assert!(board.store().get_item("board-b").unwrap().is_some());
    assert!(board.store().get_item("stickyNotesData").unwrap().is_none());
}
