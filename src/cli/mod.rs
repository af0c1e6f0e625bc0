mod args;
mod ask;
mod config_cmd;
mod provider;

pub use args::{Cli, Commands, ConfigSubcommands};
pub use ask::run_ask;
pub use config_cmd::run_config;
pub use provider::create_source;
