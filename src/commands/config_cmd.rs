use clap::{Args, Subcommand};
use std::path::Path;

use super::OutputFormat;
use crate::config::Config;

const CONFIG_TEMPLATE: &str = "\
# recipebox configuration
#
# Environment variables override these values:
#   RECIPEBOX_DATA_DIR, RECIPEBOX_DEFAULT_PLAN,
#   RECIPEBOX_SERVER_URL, RECIPEBOX_API_KEY

# Where local recipes, plans and preferences are kept.
# Relative paths are resolved against this file's directory.
# data_dir: ~/.local/share/recipebox

# Plan used when --week is not given: \"current\", \"default\" or YYYY-Www.
default_plan: current

# Share recipes and plans through a recipebox-server instance.
# store:
#   server_url: http://localhost:8080
#   api_key: change-me
";

#[derive(Args)]
pub struct ConfigCommand {
    #[command(subcommand)]
    pub command: ConfigSubcommand,
}

#[derive(Subcommand)]
pub enum ConfigSubcommand {
    /// Show current configuration values
    Show {
        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Write a starter config file
    Init {
        /// Overwrite an existing file
        #[arg(long, short)]
        force: bool,
    },
}

impl ConfigCommand {
    /// `path` is the config file the CLI was pointed at (or the default).
    pub fn run(&self, config: &Config, path: &Path) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            ConfigSubcommand::Show { format } => {
                match format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(config)?);
                    }
                    OutputFormat::Text => {
                        println!("Configuration");
                        println!("=============\n");

                        if let Some(file) = &config.config_file {
                            println!("Config file: {}", file.display());
                        } else {
                            println!("Config file: {} (not found)", path.display());
                        }
                        println!();

                        println!("data_dir: {}", config.data_dir.value.display());
                        println!("  source: {}", config.data_dir.source);
                        println!();

                        println!("default_plan: {}", config.default_plan.value);
                        println!("  source: {}", config.default_plan.source);
                        println!();

                        match &config.store.server_url {
                            Some(url) => {
                                println!("store: {}", url);
                                let key = if config.store.api_key.is_some() {
                                    "set"
                                } else {
                                    "not set"
                                };
                                println!("  api_key: {}", key);
                            }
                            None => println!("store: {} (local)", config.store_dir().display()),
                        }
                    }
                }
                Ok(())
            }

            ConfigSubcommand::Init { force } => {
                if path.exists() && !force {
                    return Err(format!(
                        "Config file already exists: {} (use --force to overwrite)",
                        path.display()
                    )
                    .into());
                }
                write_template(path)?;
                println!("Wrote config file: {}", path.display());
                Ok(())
            }
        }
    }
}

fn write_template(path: &Path) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, CONFIG_TEMPLATE)
}
