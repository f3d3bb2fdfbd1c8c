//! Caltrack CLI - command-line surface over the tracker core.

use std::io::Write;

use caltrack_cli::commands;
use caltrack_cli::{Cli, Command, Config, Formatter};
use caltrack_store::FileJournal;
use clap::Parser;
use tracing::Level;

fn main() {
    // Log to stderr so command output stays clean on stdout
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(Level::WARN)
        .init();

    if let Err(e) = run() {
        // Flush whatever was already reported before bailing out
        let _ = std::io::stdout().flush();
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> caltrack_cli::Result<()> {
    let cli = Cli::parse();

    // Load or create config
    let mut config = Config::load().unwrap_or_else(|_| {
        let cfg = Config::default();
        cfg.save().ok();
        cfg
    });

    // Determine output format and color setting
    let format = cli.format.map(Into::into).unwrap_or(config.settings.format);
    let color_enabled = !cli.no_color && config.settings.color;
    let formatter = Formatter::new(format, color_enabled);

    let journal_path = cli
        .journal
        .clone()
        .unwrap_or_else(|| config.journal_path.clone());

    match cli.command {
        Command::Exec(args) => {
            let mut journal = FileJournal::new(journal_path);
            commands::execute_exec(args, &mut journal, &config, &formatter)
        }
        Command::Dump => {
            let journal = FileJournal::new(journal_path);
            commands::execute_dump(&journal, &formatter)
        }
        Command::Config(args) => commands::execute_config(args, &mut config, &formatter),
    }
}
