//! Notes domain - CRUD over user-owned text notes
//!
//! Architecture:
//!   HTTP route → activity (domain rules, errors) → Note model → BaseNoteStore

pub mod activities;
pub mod errors;
pub mod models;

pub use errors::NoteError;
pub use models::{Note, NoteKey};
