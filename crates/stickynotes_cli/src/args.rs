//! Command-line surface.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use stickynotes_core::{Position, Size};

#[derive(Parser, Debug)]
#[command(
    name = "stickynotes",
    version,
    about = "Inspect and edit a persisted sticky-notes board"
)]
pub struct Cli {
    /// SQLite file holding the board
    #[arg(long, env = "STICKYNOTES_DB", global = true)]
    pub db: Option<PathBuf>,

    /// JSON file overriding board settings (storage key, placeholder,
    /// positions, palette)
    #[arg(long, env = "STICKYNOTES_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Container size used to clamp moves, as WIDTHxHEIGHT
    #[arg(long, default_value = "1024x768", value_parser = parse_size, global = true)]
    pub container: Size,

    /// Absolute directory for rolling log files; logging is off without it
    #[arg(long, env = "STICKYNOTES_LOG_DIR", global = true)]
    pub log_dir: Option<PathBuf>,

    /// trace|debug|info|warn|error
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List notes in board order
    List {
        /// Print JSON lines instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Create a note and print its id
    Add {
        /// Note text; defaults to the placeholder
        content: Option<String>,
        /// Top-left offset as X,Y
        #[arg(long, value_parser = parse_point)]
        at: Option<Position>,
        #[arg(long)]
        color: Option<String>,
    },
    /// Replace a note's text
    Edit { id: String, text: String },
    /// Drag a note so its top-left lands at X Y (clamped to the container)
    #[command(allow_negative_numbers = true)]
    Move {
        id: String,
        #[arg(value_parser = parse_coordinate)]
        x: f64,
        #[arg(value_parser = parse_coordinate)]
        y: f64,
    },
    /// Change a note's background color
    Color { id: String, color: String },
    /// Delete a note
    Delete { id: String },
    /// Delete every note and the stored blob
    Clear,
    /// Print the raw stored blob
    Export,
    /// Print the database path
    Path,
}

fn parse_size(raw: &str) -> Result<Size, String> {
    let (width, height) = raw
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got `{raw}`"))?;
    let width = parse_extent(width)?;
    let height = parse_extent(height)?;
    Ok(Size::new(width, height))
}

fn parse_extent(raw: &str) -> Result<f64, String> {
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() && value > 0.0 => Ok(value),
        _ => Err(format!("`{raw}` is not a positive number")),
    }
}

fn parse_point(raw: &str) -> Result<Position, String> {
    let (x, y) = raw
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y, got `{raw}`"))?;
    Ok(Position::new(parse_coordinate(x)?, parse_coordinate(y)?))
}

fn parse_coordinate(raw: &str) -> Result<f64, String> {
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(format!("`{raw}` is not a finite number")),
    }
}
