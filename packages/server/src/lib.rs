// Notes Service - API Core
//
// This crate provides a small HTTP backend for user-owned text notes.
// Notes live in a single key-value table keyed by (userId, noteId).

pub mod common;
pub mod config;
pub mod domains;
pub mod kernel;
pub mod server;

pub use config::*;
