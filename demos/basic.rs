//! Basic usage example

use envbind::Env;
use std::time::Duration;

#[derive(Debug, Default, Env)]
struct Config {
    // Required: fails if DATABASE_URL is not set at all
    #[env = "DATABASE_URL,required"]
    pub database_url: String,

    // With default value
    #[env = "SERVER_ADDR"]
    #[env_default = "127.0.0.1:8080"]
    pub server_addr: String,

    // Numeric type
    #[env = "MAX_CONNECTIONS"]
    #[env_default = "10"]
    pub max_connections: u32,

    // Boolean type, left `false` when unset
    #[env = "DEBUG_MODE"]
    pub debug_mode: bool,

    // Duration strings like "30s" or "1m30s"
    #[env = "REQUEST_TIMEOUT"]
    #[env_default = "30s"]
    pub request_timeout: Duration,
}

fn main() -> anyhow::Result<()> {
    // Set environment variables for demonstration
    std::env::set_var("DATABASE_URL", "postgres://localhost/mydb");
    std::env::set_var("SERVER_ADDR", "0.0.0.0:3000");

    // Load configuration
    let config: Config = envbind::from_env()?;

    println!("Configuration loaded:");
    println!("  Database URL: {}", config.database_url);
    println!("  Server Address: {}", config.server_addr);
    println!("  Max Connections: {}", config.max_connections);
    println!("  Debug Mode: {}", config.debug_mode);
    println!("  Request Timeout: {:?}", config.request_timeout);

    Ok(())
}
