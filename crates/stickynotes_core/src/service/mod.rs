//! Board use-case services.
//!
//! # Responsibility
//! - Turn host UI events into note mutations plus persistence.
//! - Keep host layers unaware of storage and snapshot details.

pub mod note_board;
