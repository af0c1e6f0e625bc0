use crate::config::AppConfig;
use crate::core::{AppError, Result};

use super::ConfigSubcommands;

pub fn run_config(command: &ConfigSubcommands, config: &AppConfig) -> Result<()> {
    match command {
        ConfigSubcommands::Init => {
            let path = AppConfig::init_default()?;
            println!("✓ Created config file at {}", path.display());
        }
        ConfigSubcommands::Where => {
            let path = AppConfig::get_config_path()
                .ok_or_else(|| AppError::Config("Could not determine config path".into()))?;
            println!("{}", path.display());
        }
        ConfigSubcommands::Show => {
            let rendered = config
                .to_toml()
                .map_err(|e| AppError::Config(e.to_string()))?;
            print!("{rendered}");
        }
    }
    Ok(())
}
