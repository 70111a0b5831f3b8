//! Config CLI commands

use anyhow::Result;
use clap::Subcommand;

use super::app::Env;

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show the effective configuration
    Show,

    /// Change one setting
    ///
    /// Keys: server_url, timeout_secs, offline, default_format
    Set { key: String, value: String },

    /// Print the config file location
    Path,
}

pub fn run(cmd: ConfigCommands, mut env: Env) -> Result<()> {
    match cmd {
        ConfigCommands::Show => {
            let config = env.home.config();
            if env.output.is_json() {
                env.output.data(config);
            } else {
                println!("server_url     = {}", config.server_url);
                println!("timeout_secs   = {}", config.timeout_secs);
                println!("offline        = {}", config.offline);
                println!("default_format = {}", config.default_format);
                if env.server_url() != config.server_url {
                    println!();
                    println!("(overridden for this run: server_url = {})", env.server_url());
                }
            }
        }
        ConfigCommands::Set { key, value } => {
            env.home.config_mut().set(&key, &value)?;
            env.home.save_config()?;
            env.output.success(&format!("Set {} = {}", key, value));
        }
        ConfigCommands::Path => {
            let path = env.home.config_path();
            if env.output.is_json() {
                env.output.data(&serde_json::json!({
                    "home": env.home.dir(),
                    "config": path,
                }));
            } else {
                println!("{}", path.display());
            }
        }
    }
    Ok(())
}
