//! Example of types that decode themselves from text

use envbind::{BoxError, Env, Json, TextDecoder, Value};
use std::collections::HashMap;

#[derive(Debug, Default, Clone, Copy, PartialEq)]
enum LogLevel {
    Debug,
    #[default]
    Info,
    Error,
}

impl Value for LogLevel {
    fn text_decoder() -> Option<TextDecoder<Self>> {
        Some(|text| match text.to_ascii_lowercase().as_str() {
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "error" => Ok(LogLevel::Error),
            _ => Err(BoxError::from(format!("unknown log level {text:?}"))),
        })
    }
}

#[derive(Debug, Default, Env)]
struct Config {
    #[env = "LOG_LEVEL"]
    pub log_level: LogLevel,

    // One level per module
    #[env = "MODULE_LEVELS"]
    #[env_separator = ";"]
    pub module_levels: Vec<LogLevel>,

    // JSON for structured values
    #[env = "LABELS"]
    pub labels: Json<HashMap<String, String>>,
}

fn main() -> anyhow::Result<()> {
    std::env::set_var("LOG_LEVEL", "DEBUG");
    std::env::set_var("MODULE_LEVELS", "info;error");
    std::env::set_var("LABELS", r#"{"team":"platform","tier":"1"}"#);

    let config: Config = envbind::from_env()?;

    println!("Configuration with text-decoded values:");
    println!("  Log level: {:?}", config.log_level);
    println!("  Module levels: {:?}", config.module_levels);
    println!("  Labels: {:?}", *config.labels);

    Ok(())
}
