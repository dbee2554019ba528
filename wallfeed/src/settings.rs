use std::{env, path::PathBuf};

use config::{Config, File};
use log::debug;
use serde::Deserialize;

use wallfeed::api::vk::{DEFAULT_API_URL, DEFAULT_API_VERSION};
use wallfeed::resolver::DEFAULT_COUNT;

use crate::cli::Args;

/// Values read from `$XDG_CONFIG_HOME/wallfeed/config.toml`.
#[derive(Debug, Default, Deserialize, Clone)]
pub struct Settings {
    pub api_url: Option<String>,
    pub token: Option<String>,
    pub api_version: Option<String>,
    pub count: Option<u32>,
}

/// Arguments with every gap filled from the config file or a default.
#[derive(Debug, Clone)]
pub struct Resolved {
    pub wall: String,
    pub api_url: String,
    pub token: String,
    pub api_version: String,
    pub count: u32,
    pub json: bool,
}

const CONFIG_FILE_NAME: &str = env!("CARGO_PKG_NAME");

fn config_dir() -> Option<PathBuf> {
    if let Ok(xdg_config) = env::var("XDG_CONFIG_HOME") {
        return Some(PathBuf::from(xdg_config));
    }

    env::var("HOME")
        .ok()
        .map(|home| PathBuf::from(home).join(".config"))
}

fn load_settings() -> anyhow::Result<Settings> {
    let Some(dir) = config_dir() else {
        return Ok(Settings::default());
    };

    let config_path = dir.join(CONFIG_FILE_NAME).join("config.toml");
    if !config_path.exists() {
        return Ok(Settings::default());
    }

    debug!("reading settings from {}", config_path.display());
    Config::builder()
        .add_source(File::from(config_path.clone()).required(false))
        .build()?
        .try_deserialize()
        .map_err(|e| {
            anyhow::anyhow!(
                "Failed to deserialize config file {}: {}",
                config_path.display(),
                e
            )
        })
}

pub fn merge_settings_with_args(args: &Args) -> anyhow::Result<Resolved> {
    let settings = load_settings()?;
    let resolved = merge(args, settings);

    debug!(
        "merged config: api_url={} api_version={} count={}",
        resolved.api_url, resolved.api_version, resolved.count
    );

    Ok(resolved)
}

fn merge(args: &Args, settings: Settings) -> Resolved {
    fn pick(cli: &str, file: Option<String>, default: &str) -> String {
        if !cli.is_empty() {
            return cli.to_string();
        }
        file.filter(|value| !value.is_empty())
            .unwrap_or_else(|| default.to_string())
    }

    Resolved {
        wall: args.wall.clone(),
        api_url: pick(&args.api_url, settings.api_url, DEFAULT_API_URL),
        token: pick(&args.token, settings.token, ""),
        api_version: pick(&args.api_version, settings.api_version, DEFAULT_API_VERSION),
        count: args.count.or(settings.count).unwrap_or(DEFAULT_COUNT),
        json: args.json,
    }
}
