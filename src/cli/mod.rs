//! CLI definitions using clap.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

pub mod commands;

/// Todos - a todo store with an HTTP API and an interactive loop
#[derive(Parser, Debug)]
#[command(name = "todos", author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Database path (default: ~/.todos/data/todos.db)
    #[arg(long, global = true, env = "TODOS_DB")]
    pub db: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Increase logging verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress log output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Serve the todo HTTP API
    Serve(ServeArgs),

    /// Start the interactive todo loop (in-memory, nothing is saved)
    Repl,

    /// Create a todo
    Create(CreateArgs),

    /// List todos, newest first
    List,

    /// Show one todo
    Show {
        /// Todo ID
        id: i64,
    },

    /// Update a todo's title and/or status
    Update(UpdateArgs),

    /// Delete a todo
    Delete {
        /// Todo ID
        id: i64,
    },

    /// Print version information
    Version,

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Supported shells for completions.
#[derive(clap::ValueEnum, Clone, Debug)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Host to bind
    #[arg(long, env = "TODOS_HOST", default_value = crate::config::DEFAULT_HOST)]
    pub host: String,

    /// Port to bind
    #[arg(short, long, env = "TODOS_PORT", default_value_t = crate::config::DEFAULT_PORT)]
    pub port: u16,

    /// Number of HTTP workers (default: one per CPU core)
    #[arg(long)]
    pub workers: Option<usize>,
}

#[derive(Args, Debug)]
pub struct CreateArgs {
    /// Todo title (1-255 characters)
    pub title: String,

    /// Initial status (incomplete, complete)
    #[arg(short, long)]
    pub status: Option<String>,
}

#[derive(Args, Debug)]
pub struct UpdateArgs {
    /// Todo ID
    pub id: i64,

    /// New title
    #[arg(short, long)]
    pub title: Option<String>,

    /// New status (incomplete, complete)
    #[arg(short, long)]
    pub status: Option<String>,
}
