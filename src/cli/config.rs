//! Configuration inspection command

use clap::Subcommand;
use kudos_core::{config::KudosConfig, error::Result};

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print the effective configuration (secrets redacted)
    Show,

    /// Print the default config file location
    Path,
}

pub async fn handle(config: &KudosConfig, action: ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Show => {
            print!("{}", config.to_redacted_toml()?);
        }
        ConfigAction::Path => match KudosConfig::default_path() {
            Some(path) => println!("{}", path.display()),
            None => println!("No config directory on this platform"),
        },
    }
    Ok(())
}
