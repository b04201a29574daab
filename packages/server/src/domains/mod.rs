// Business domains
pub mod notes;
