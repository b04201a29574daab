//! Note activities - business logic functions
//!
//! Activities are async functions called directly from the HTTP routes.
//! They apply the domain rules (required fields, not-found handling) and
//! delegate persistence to the `Note` model.

pub mod create;
pub mod delete;
pub mod queries;
pub mod update;

pub use create::{create_note, CreateNoteInput};
pub use delete::{delete_all_notes_for_user, delete_note};
pub use queries::{get_note, list_all_notes, list_notes_for_user};
pub use update::update_note;
