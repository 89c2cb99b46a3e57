//! Handles settings for the application.
//!
//! Values are read, in increasing priority, from the optional `settings`
//! file (TOML, YAML or JSON), from `TALLY__*` environment variables and from
//! command line flags.
use clap::Parser;
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

const DEFAULT_CONFIG_PATH: &str = "settings";

#[derive(Debug, Deserialize)]
pub struct App {
    pub level: String,
}

#[derive(Debug, Deserialize)]
pub struct Server {
    pub bind: Option<String>,
    pub port: u16,
}

/// Object store receiving record attachments.
#[derive(Debug, Deserialize)]
pub struct Attachments {
    pub base_url: String,
    pub public_url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub app: App,
    pub server: Server,
    pub attachments: Option<Attachments>,
}

#[derive(Debug, Parser)]
#[command(name = "tally", about = "In-memory financial records service")]
struct Args {
    /// Settings file, without extension.
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    config: String,
    /// Override the listening port.
    #[arg(long)]
    port: Option<u16>,
    /// Override the log level (trace, debug, info, warn, error).
    #[arg(long)]
    level: Option<String>,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let args = Args::parse();
        Self::from_sources(&args.config, args.port, args.level)
    }

    fn from_sources(
        path: &str,
        port: Option<u16>,
        level: Option<String>,
    ) -> Result<Self, ConfigError> {
        Config::builder()
            .set_default("app.level", "info")?
            .set_default("server.port", 3000)?
            .add_source(File::with_name(path).required(false))
            .add_source(
                Environment::with_prefix("TALLY")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .set_override_option("server.port", port.map(i64::from))?
            .set_override_option("app.level", level)?
            .build()?
            .try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_without_a_file() {
        let settings = Settings::from_sources("does-not-exist", None, None).unwrap();
        assert_eq!(settings.app.level, "info");
        assert_eq!(settings.server.port, 3000);
        assert!(settings.server.bind.is_none());
        assert!(settings.attachments.is_none());
    }

    #[test]
    fn flags_override_defaults() {
        let settings =
            Settings::from_sources("does-not-exist", Some(8080), Some("debug".to_string()))
                .unwrap();
        assert_eq!(settings.server.port, 8080);
        assert_eq!(settings.app.level, "debug");
    }
}
