//! Example demonstrating prefixes and nested records

use envbind::Env;

#[derive(Debug, Default, Env)]
struct Database {
    #[env = "URL,required"]
    pub url: String,

    #[env = "POOL_SIZE"]
    #[env_default = "5"]
    pub pool_size: u16,
}

#[derive(Debug, Default, Env)]
struct Config {
    #[env = "API_KEY"]
    pub api_key: String,

    // Keys of the nested record get "DB_" appended to the current prefix
    #[env_prefix = "DB_"]
    pub database: Database,

    // Bound only when the caller provides a value up front
    #[env_prefix = "REPLICA_"]
    pub replica: Option<Database>,
}

fn main() -> anyhow::Result<()> {
    std::env::set_var("MYAPP_API_KEY", "secret-key-123");
    std::env::set_var("MYAPP_DB_URL", "postgres://primary/db");
    std::env::set_var("MYAPP_REPLICA_URL", "postgres://replica/db");
    std::env::set_var("MYAPP_REPLICA_POOL_SIZE", "2");

    let mut config = Config {
        replica: Some(Database::default()),
        ..Config::default()
    };
    envbind::parse_with_prefix("MYAPP_", &mut config)?;

    println!("Configuration with prefix 'MYAPP_':");
    println!("  API Key: {}", config.api_key);
    println!("  Database: {:?}", config.database);
    println!("  Replica: {:?}", config.replica);

    Ok(())
}
