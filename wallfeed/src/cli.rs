use clap::{Parser, ValueEnum};
use log::LevelFilter;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Wall to fetch: a link, `wall-1`, `club1`, `id1` or a signed owner id
    #[arg(allow_hyphen_values = true)]
    pub wall: String,

    /// API base URL
    #[arg(long, env = "WALLFEED_API_URL", default_value = "")]
    pub api_url: String,

    /// API access token
    #[arg(long, env = "WALLFEED_TOKEN", default_value = "", hide_env_values = true)]
    pub token: String,

    /// API version sent with every call
    #[arg(long, env = "WALLFEED_API_VERSION", default_value = "")]
    pub api_version: String,

    /// Number of posts to fetch from the first page
    #[arg(long)]
    pub count: Option<u32>,

    /// Print the hydrated feed as JSON
    #[arg(long)]
    pub json: bool,

    /// Log verbosity
    #[arg(short, long, value_name = "LEVEL", default_value = "info")]
    pub log_level: LogLevel,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
    Off,
}

impl From<LogLevel> for LevelFilter {
    fn from(log_level: LogLevel) -> Self {
        match log_level {
            LogLevel::Trace => LevelFilter::Trace,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Off => LevelFilter::Off,
        }
    }
}
