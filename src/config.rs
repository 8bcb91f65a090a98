// Runtime settings, read from the environment (a `.env` file is loaded first by main).

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub log_level: String,
    pub asset_dir: PathBuf,
    /// Period of the cursor-sampling timer.
    pub update_interval: Duration,
    /// Start with this face instead of a random one.
    pub start_face: Option<String>,
    pub topmost: bool,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            log_level: env_or("RUST_LOG", "info"),
            asset_dir: PathBuf::from(env_or("KEYES_ASSET_DIR", "assets")),
            update_interval: Duration::from_millis(env_or_parse("KEYES_UPDATE_INTERVAL_MS", 50_u64).max(1)),
            start_face: env::var("KEYES_FACE").ok().filter(|s| !s.trim().is_empty()),
            topmost: env_or_bool("KEYES_TOPMOST", true),
        }
    }
}

pub fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

pub fn env_or_parse<T>(key: &str, default: T) -> T
where
    T: FromStr + Copy,
{
    match env::var(key) {
        Ok(raw) => match raw.trim().parse::<T>() {
            Ok(v) => v,
            Err(_) => {
                tracing::warn!(key, value = %raw, "Failed to parse env var, using default");
                default
            }
        },
        Err(_) => default,
    }
}

pub fn env_or_bool(key: &str, default: bool) -> bool {
    match env::var(key) {
        Ok(raw) => match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => true,
            "0" | "false" | "no" | "off" => false,
            _ => default,
        },
        Err(_) => default,
    }
}
