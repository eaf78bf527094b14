//! CLI library for testing purposes

pub mod commands;
pub mod validation;

pub use commands::{LookupRequest, run_files, run_lookup, run_validate};
pub use langtable::Language;
