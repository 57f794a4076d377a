//! Sticky note domain model.
//!
//! # Responsibility
//! - Define the live note record and its geometry types.
//! - Define the persisted snapshot shape and its codec.
//!
//! # Invariants
//! - A `NoteId` never changes for the lifetime of a note.
//! - Geometry is expressed in container-local pixels.

pub mod note;
pub mod snapshot;
