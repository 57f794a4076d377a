//! Note record and container geometry.
//!
//! # Responsibility
//! - Define `Note`, the single entity owned by a board.
//! - Provide the clamping rule that keeps a card inside its container.
//!
//! # Invariants
//! - `id` is assigned once and has no setter.
//! - `clamp_within` never yields a negative offset.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::ops::Sub;
use uuid::Builder;

/// Opaque note identifier.
///
/// Ids restored from storage are kept verbatim, so no format is enforced.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoteId(String);

impl NoteId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Builds a UUID-formatted id from 16 random bytes.
    pub fn from_random_bytes(bytes: [u8; 16]) -> Self {
        Self(Builder::from_random_bytes(bytes).into_uuid().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Display for NoteId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NoteId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for NoteId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Top-left offset of a card, or a pointer location, in container pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub left: f64,
    pub top: f64,
}

impl Position {
    pub const fn new(left: f64, top: f64) -> Self {
        Self { left, top }
    }

    /// Clamps this top-left offset so a box of `note` size stays inside
    /// `container`.
    ///
    /// When the box is larger than the container on an axis, that axis
    /// resolves to `0`.
    pub fn clamp_within(self, note: Size, container: Size) -> Self {
        Self {
            left: clamp_axis(self.left, container.width - note.width),
            top: clamp_axis(self.top, container.height - note.height),
        }
    }

    /// Replaces each non-finite axis with the matching axis of `fallback`.
    pub fn finite_or(self, fallback: Position) -> Self {
        Self {
            left: if self.left.is_finite() { self.left } else { fallback.left },
            top: if self.top.is_finite() { self.top } else { fallback.top },
        }
    }
}

impl Sub for Position {
    type Output = Position;

    fn sub(self, rhs: Self) -> Self::Output {
        Position::new(self.left - rhs.left, self.top - rhs.top)
    }
}

/// Width/height pair for cards and containers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

fn clamp_axis(value: f64, max: f64) -> f64 {
    // `max` first so an oversized card pins to the leading edge.
    value.min(max).max(0.0)
}

/// A live sticky note.
#[derive(Debug, Clone, PartialEq)]
pub struct Note {
    id: NoteId,
    content: String,
    position: Position,
    color: String,
}

impl Note {
    pub(crate) fn new(id: NoteId, content: String, position: Position, color: String) -> Self {
        Self {
            id,
            content,
            position,
            color,
        }
    }

    pub fn id(&self) -> &NoteId {
        &self.id
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn color(&self) -> &str {
        &self.color
    }

    pub(crate) fn set_content(&mut self, content: String) {
        self.content = content;
    }

    pub(crate) fn set_position(&mut self, position: Position) {
        self.position = position;
    }

    pub(crate) fn set_color(&mut self, color: String) {
        self.color = color;
    }
}

/// Creation request for a note. Every `None` field falls back to a board
/// default.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewNote {
    pub content: Option<String>,
    pub position: Option<Position>,
    pub color: Option<String>,
    pub id: Option<NoteId>,
}

impl NewNote {
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn with_position(mut self, position: Position) -> Self {
        self.position = Some(position);
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn with_id(mut self, id: impl Into<NoteId>) -> Self {
        self.id = Some(id.into());
        self
    }
}
