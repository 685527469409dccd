//! Repl command implementation.

use crate::error::Result;
use crate::repl;

/// Run the interactive todo loop on stdin/stdout.
///
/// # Errors
///
/// Returns an error if the terminal cannot be read or written.
pub fn execute() -> Result<()> {
    repl::run_stdio()
}
