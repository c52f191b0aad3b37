//! File-based secrets example

use envbind::Env;
use std::io::Write;
use tempfile::NamedTempFile;

#[derive(Debug, Default, Env)]
struct Config {
    // API_KEY_PATH names a file; the field receives its contents
    #[env = "API_KEY_PATH,file,required"]
    pub api_key: String,

    // The path itself may reference other variables
    #[env = "DB_PASSWORD_PATH,file"]
    #[env_default = "${SECRETS_DIR}/db_password"]
    #[env_expand = "true"]
    pub database_password: String,

    // Regular environment variable
    #[env = "DATABASE_HOST"]
    pub database_host: String,
}

fn main() -> anyhow::Result<()> {
    // Save API key to file
    let mut api_key_file = NamedTempFile::new()?;
    write!(api_key_file, "super_secret_api_key_12345")?;

    // Save database password into a secrets directory
    let secrets_dir = tempfile::tempdir()?;
    std::fs::write(secrets_dir.path().join("db_password"), "db_password_67890")?;

    std::env::set_var("API_KEY_PATH", api_key_file.path());
    std::env::set_var("SECRETS_DIR", secrets_dir.path());
    std::env::set_var("DATABASE_HOST", "localhost");

    let config: Config = envbind::from_env()?;

    println!("Configuration loaded from files:");
    println!("  API Key: {}", config.api_key);
    println!("  Database Password: {}", config.database_password);
    println!("  Database Host: {}", config.database_host);

    Ok(())
}
