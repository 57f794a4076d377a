//! Terminal host for a persisted sticky-notes board.
//!
//! # Responsibility
//! - Run board commands against a SQLite-backed store.
//! - Route edits and moves through the same handlers the browser uses.

mod args;

use anyhow::{anyhow, Context, Result};
use args::{Cli, Command};
use clap::Parser;
use log::info;
use std::path::{Path, PathBuf};
use stickynotes_core::{
    default_log_level, init_logging, BoardConfig, HeadlessSurface, KeyValueStore, NewNote, NoteBoard, NoteId,
    NoteSnapshot, Position, PressTarget, RandomSource, RngSource, SqliteKeyValueStore,
};

const DB_DIR_NAME: &str = "stickynotes";
const DB_FILE_NAME: &str = "notes.sqlite3";

fn main() -> Result<()> {
    let cli = Cli::parse();
    if let Some(log_dir) = cli.log_dir.as_ref() {
        let level = cli.log_level.as_deref().unwrap_or(default_log_level());
        if let Err(err) = init_logging(level, &log_dir.to_string_lossy()) {
            eprintln!("logging disabled: {err}");
        }
    }

    let config = match cli.config.as_deref() {
        Some(path) => load_config(path)?,
        None => BoardConfig::default(),
    };
    let db_path = resolve_db_path(cli.db)?;
    if let Command::Path = cli.command {
        println!("{}", db_path.display());
        return Ok(());
    }

    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    let store = SqliteKeyValueStore::open(&db_path)
        .with_context(|| format!("failed to open {}", db_path.display()))?;
    let mut board = NoteBoard::with_config(
        store,
        HeadlessSurface::new(cli.container),
        RngSource::thread(),
        config,
    );
    board.load()?;
    info!(
        "event=cli_start module=cli status=ok db={} notes={}",
        db_path.display(),
        board.notes().len()
    );

    run(&mut board, cli.command)
}

fn run<R: RandomSource>(
    board: &mut NoteBoard<SqliteKeyValueStore, HeadlessSurface, R>,
    command: Command,
) -> Result<()> {
    match command {
        Command::List { json } => {
            for note in board.notes() {
                if json {
                    println!("{}", serde_json::to_string(&NoteSnapshot::from(note))?);
                } else {
                    let position = note.position();
                    println!(
                        "{}\t{}\t{}\t{}\t{}",
                        note.id(),
                        position.left,
                        position.top,
                        note.color(),
                        note.content().replace('\n', "\\n")
                    );
                }
            }
        }
        Command::Add { content, at, color } => {
            let request = NewNote {
                content,
                position: at,
                color,
                id: None,
            };
            let note = board.create(request)?;
            println!("{}", note.id());
        }
        Command::Edit { id, text } => {
            let id = existing(board, &id)?;
            board.enter_edit(&id);
            board.surface_mut().type_text(&id, &text);
            board.exit_edit(&id, true)?;
        }
        Command::Move { id, x, y } => {
            let id = existing(board, &id)?;
            // Grab at the top-left so the pointer position is the target offset.
            let grab = board
                .note(&id)
                .map(|note| note.position())
                .unwrap_or_default();
            board.drag_start(&id, grab, PressTarget::Body);
            let landed = board
                .drag_move(Position::new(x, y))
                .unwrap_or(grab);
            board.drag_end()?;
            println!("{}\t{}", landed.left, landed.top);
        }
        Command::Color { id, color } => {
            let id = existing(board, &id)?;
            board.recolor(&id, color)?;
        }
        Command::Delete { id } => {
            let id = existing(board, &id)?;
            board.delete(&id)?;
        }
        Command::Clear => {
            let removed = board.clear()?;
            println!("{removed}");
        }
        Command::Export => {
            let key = board.config().storage_key.clone();
            let blob = board.store().get_item(&key)?.unwrap_or_else(|| "[]".to_string());
            println!("{blob}");
        }
        Command::Path => {}
    }
    Ok(())
}

fn existing<R: RandomSource>(
    board: &NoteBoard<SqliteKeyValueStore, HeadlessSurface, R>,
    raw: &str,
) -> Result<NoteId> {
    let id = NoteId::from(raw);
    if board.contains(&id) {
        Ok(id)
    } else {
        Err(anyhow!("note not found: {raw}"))
    }
}

fn load_config(path: &Path) -> Result<BoardConfig> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    BoardConfig::from_json(&raw)
        .with_context(|| format!("invalid board config {}", path.display()))
}

fn resolve_db_path(explicit: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(path) = explicit {
        return Ok(path);
    }
    let data_dir = dirs::data_dir()
        .ok_or_else(|| anyhow!("no data directory found; pass --db or set STICKYNOTES_DB"))?;
    Ok(data_dir.join(DB_DIR_NAME).join(DB_FILE_NAME))
}
