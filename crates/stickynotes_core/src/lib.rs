//! Core logic for the sticky-notes widget.
//! Hosts (browser, terminal) drive a `NoteBoard` through its command
//! handlers and inject storage, surface and randomness.

pub mod config;
#[cfg(not(target_arch = "wasm32"))]
pub mod db;
#[cfg(not(target_arch = "wasm32"))]
pub mod logging;
pub mod model;
pub mod random;
pub mod repo;
pub mod service;
pub mod surface;

pub use config::{BoardConfig, DEFAULT_PALETTE, DEFAULT_STORAGE_KEY, PLACEHOLDER_CONTENT};
#[cfg(not(target_arch = "wasm32"))]
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::note::{NewNote, Note, NoteId, Position, Size};
pub use model::snapshot::{decode_snapshots, encode_snapshots, format_px, parse_px, NoteSnapshot};
pub use random::{RandomSource, RngSource};
pub use repo::kv_repo::{KeyValueStore, MemoryKeyValueStore, RepoError, RepoResult};
pub use repo::snapshot_repo::SnapshotRepository;
#[cfg(not(target_arch = "wasm32"))]
pub use repo::sqlite_kv::SqliteKeyValueStore;
pub use service::note_board::{BoardError, BoardResult, NoteBoard, PressTarget};
pub use surface::{HeadlessCard, HeadlessSurface, NoteSurface};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
