//! Command implementations.

pub mod completions;
pub mod repl;
pub mod serve;
pub mod todo;
pub mod version;
