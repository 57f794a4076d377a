//! Persistence contracts and implementations.
//!
//! # Responsibility
//! - Define the key-value store contract a board persists through.
//! - Map the whole-board snapshot blob onto one key.
//!
//! # Invariants
//! - The board blob is always written wholesale, never patched.
//! - Reading a missing or malformed blob yields an empty board.

pub mod kv_repo;
pub mod snapshot_repo;
#[cfg(not(target_arch = "wasm32"))]
pub mod sqlite_kv;
