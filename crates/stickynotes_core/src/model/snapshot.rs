//! Persisted snapshot shape and JSON codec.
//!
//! # Responsibility
//! - Convert live notes to the stored `{id, content, left, top, color}` form.
//! - Encode/decode the whole-board blob.
//!
//! # Invariants
//! - `left`/`top` are stored as pixel lengths with unit, e.g. `"20px"`.
//! - Decoding never rejects a single malformed record; it skips it.
//! - A blob that is not a JSON array is a decode error.

use crate::model::note::{NewNote, Note, NoteId, Position};
use log::warn;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

static PX_LENGTH_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(-?(?:\d+(?:\.\d*)?|\.\d+)(?:[eE][-+]?\d+)?)\s*(?:px)?\s*$")
        .expect("valid px length regex")
});

/// Stored form of one note.
///
/// Missing fields decode as empty strings and are resolved by the board.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NoteSnapshot {
    pub id: String,
    pub content: String,
    pub left: String,
    pub top: String,
    pub color: String,
}

impl From<&Note> for NoteSnapshot {
    fn from(note: &Note) -> Self {
        let position = note.position();
        Self {
            id: note.id().as_str().to_string(),
            content: note.content().to_string(),
            left: format_px(position.left),
            top: format_px(position.top),
            color: note.color().to_string(),
        }
    }
}

impl NoteSnapshot {
    /// Converts this snapshot into a creation request.
    ///
    /// Empty fields become `None` so the board applies its defaults. An
    /// unparsable axis falls back to the matching axis of `fallback`.
    pub fn into_new_note(self, fallback: Position) -> NewNote {
        let left = parse_px(&self.left).unwrap_or(fallback.left);
        let top = parse_px(&self.top).unwrap_or(fallback.top);
        NewNote {
            content: non_empty(self.content),
            position: Some(Position::new(left, top)),
            color: non_empty(self.color),
            id: non_empty(self.id).map(NoteId::from),
        }
    }
}

/// Formats a pixel offset the way CSS style values are written.
pub fn format_px(value: f64) -> String {
    // Avoid persisting "-0px".
    let value = if value == 0.0 { 0.0 } else { value };
    format!("{value}px")
}

/// Parses `"20px"`, `"20"` or `" -3.5px "` into a finite pixel value.
pub fn parse_px(raw: &str) -> Option<f64> {
    let captures = PX_LENGTH_RE.captures(raw)?;
    let value: f64 = captures.get(1)?.as_str().parse().ok()?;
    value.is_finite().then_some(value)
}

/// Encodes snapshots as a JSON array, preserving order.
pub fn encode_snapshots(snapshots: &[NoteSnapshot]) -> serde_json::Result<String> {
    serde_json::to_string(snapshots)
}

/// Decodes a JSON array of snapshots.
///
/// Array elements that are not snapshot-shaped are skipped with a warning.
pub fn decode_snapshots(raw: &str) -> serde_json::Result<Vec<NoteSnapshot>> {
    let items: Vec<Value> = serde_json::from_str(raw)?;
    let mut snapshots = Vec::with_capacity(items.len());
    for (index, item) in items.into_iter().enumerate() {
        match serde_json::from_value::<NoteSnapshot>(item) {
            Ok(snapshot) => snapshots.push(snapshot),
            Err(err) => warn!(
                "event=snapshot_decode module=model status=skipped index={} error={}",
                index, err
            ),
        }
    }
    Ok(snapshots)
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::{decode_snapshots, encode_snapshots, format_px, parse_px, NoteSnapshot};
    use crate::model::note::{NoteId, Position};

    #[test]
    fn parse_px_accepts_css_lengths() {
        assert_eq!(parse_px("20px"), Some(20.0));
        assert_eq!(parse_px("20"), Some(20.0));
        assert_eq!(parse_px(" -3.5px "), Some(-3.5));
        assert_eq!(parse_px(".5px"), Some(0.5));
    }

    #[test]
    fn parse_px_rejects_other_units_and_garbage() {
        assert_eq!(parse_px(""), None);
        assert_eq!(parse_px("auto"), None);
        assert_eq!(parse_px("20em"), None);
        assert_eq!(parse_px("px"), None);
        assert_eq!(parse_px("1e999px"), None);
    }

    #[test]
    fn format_px_matches_style_strings() {
        assert_eq!(format_px(20.0), "20px");
        assert_eq!(format_px(12.5), "12.5px");
        assert_eq!(format_px(-0.0), "0px");
    }

    #[test]
    fn encode_uses_wire_field_names() {
        let snapshot = NoteSnapshot {
            id: "_abc123xyz".to_string(),
            content: "Hello".to_string(),
            left: "20px".to_string(),
            top: "30px".to_string(),
            color: "#ffd790".to_string(),
        };
        let json: serde_json::Value =
            serde_json::from_str(&encode_snapshots(&[snapshot]).unwrap()).unwrap();
        assert_eq!(json[0]["id"], "_abc123xyz");
        assert_eq!(json[0]["content"], "Hello");
        assert_eq!(json[0]["left"], "20px");
        assert_eq!(json[0]["top"], "30px");
        assert_eq!(json[0]["color"], "#ffd790");
    }

    #[test]
    fn decode_skips_non_object_elements() {
        let decoded = decode_snapshots(r#"[1, {"id": "a", "content": "x"}, "nope"]"#).unwrap();
        assert_eq!(decoded.len(), 1);
        assert_eq!(decoded[0].id, "a");
        assert_eq!(decoded[0].left, "");
    }

    #[test]
    fn decode_rejects_non_array_blobs() {
        assert!(decode_snapshots("not json").is_err());
        assert!(decode_snapshots("null").is_err());
        assert!(decode_snapshots(r#"{"id": "a"}"#).is_err());
    }

    #[test]
    fn into_new_note_leaves_empty_fields_to_board_defaults() {
        let snapshot = NoteSnapshot {
            left: "oops".to_string(),
            top: "45px".to_string(),
            ..NoteSnapshot::default()
        };
        let request = snapshot.into_new_note(Position::new(20.0, 20.0));
        assert_eq!(request.id, None);
        assert_eq!(request.content, None);
        assert_eq!(request.color, None);
        assert_eq!(request.position, Some(Position::new(20.0, 45.0)));
    }

    #[test]
    fn into_new_note_keeps_stored_id_and_color() {
        let snapshot = NoteSnapshot {
            id: "_k3j2h1g0f".to_string(),
            content: "kept".to_string(),
            left: "1px".to_string(),
            top: "2px".to_string(),
            color: "rgb(255, 215, 144)".to_string(),
        };
        let request = snapshot.into_new_note(Position::default());
        assert_eq!(request.id, Some(NoteId::from("_k3j2h1g0f")));
        assert_eq!(request.color.as_deref(), Some("rgb(255, 215, 144)"));
        assert_eq!(request.content.as_deref(), Some("kept"));
    }
}
