// HTTP routes
pub mod health;
pub mod notes;

pub use health::*;
pub use notes::*;
