//! Config command implementation.

use crate::cli::{ConfigAction, ConfigArgs};
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;

/// Execute a configuration action.
pub fn execute_config(args: ConfigArgs, config: &mut Config, formatter: &Formatter) -> Result<()> {
    match args.action {
        ConfigAction::Show => {
            let rendered = toml::to_string_pretty(config)
                .map_err(|e| CliError::Config(format!("Failed to render config: {}", e)))?;
            print!("{}", rendered);
        }
        ConfigAction::SetJournal { path } => {
            config.journal_path = path;
            config.save()?;
            println!(
                "{}",
                formatter.success(&format!("journal path set to {}", config.journal_path.display()))
            );
        }
        ConfigAction::SetActivitySign { sign } => {
            config.activity_sign = sign.into();
            config.save()?;
            println!("{}", formatter.success("activity sign convention saved"));
        }
    }
    Ok(())
}
