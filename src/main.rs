//! Todos CLI entry point.

use clap::Parser;
use std::process::ExitCode;
use todos::cli::commands;
use todos::cli::{Cli, Commands};
use todos::error::Error;

fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.no_color {
        colored::control::set_override(false);
    }

    init_tracing(cli.verbose, cli.quiet);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if cli.json {
                eprintln!("{}", e.to_structured_json());
            } else if let Some(hint) = e.hint() {
                eprintln!("Error: {e}\n  Hint: {hint}");
            } else {
                eprintln!("Error: {e}");
            }
            ExitCode::from(e.exit_code())
        }
    }
}

fn init_tracing(verbose: u8, quiet: bool) {
    use tracing_subscriber::EnvFilter;

    if quiet {
        return;
    }

    // Honor RUST_LOG if set, otherwise use verbosity flag
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        match verbose {
            0 => EnvFilter::new("warn"),
            1 => EnvFilter::new("info"),
            2 => EnvFilter::new("debug,rusqlite=info"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}

fn run(cli: &Cli) -> Result<(), Error> {
    let db = cli.db.as_deref();

    match &cli.command {
        Commands::Serve(args) => commands::serve::execute(args, db),
        Commands::Repl => commands::repl::execute(),

        // Store commands
        Commands::Create(args) => commands::todo::execute_create(args, db, cli.json),
        Commands::List => commands::todo::execute_list(db, cli.json),
        Commands::Show { id } => commands::todo::execute_show(*id, db, cli.json),
        Commands::Update(args) => commands::todo::execute_update(args, db, cli.json),
        Commands::Delete { id } => commands::todo::execute_delete(*id, db, cli.json),

        Commands::Version => commands::version::execute(cli.json),
        Commands::Completions { shell } => commands::completions::execute(shell),
    }
}
