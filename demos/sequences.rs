//! Example of list-valued fields

use envbind::Env;
use std::time::Duration;

#[derive(Debug, Default, Env)]
struct Config {
    // Comma separated by default
    #[env = "ALLOWED_HOSTS"]
    pub allowed_hosts: Vec<String>,

    // Any separator
    #[env = "PORTS"]
    #[env_separator = ":"]
    pub ports: Vec<u16>,

    // Elements use the same parsers as single values
    #[env = "BACKOFF"]
    #[env_default = "100ms,1s,10s"]
    pub backoff: Vec<Duration>,
}

fn main() -> anyhow::Result<()> {
    std::env::set_var("ALLOWED_HOSTS", "example.com,api.example.com");
    std::env::set_var("PORTS", "80:443:8080");

    let config: Config = envbind::from_env()?;

    println!("List configuration:");
    println!("  Allowed hosts: {:?}", config.allowed_hosts);
    println!("  Ports: {:?}", config.ports);
    println!("  Backoff: {:?}", config.backoff);

    // A single bad element rejects the whole list
    std::env::set_var("PORTS", "80:https");
    match envbind::from_env::<Config>() {
        Ok(_) => println!("unexpected success"),
        Err(e) => println!("Error: {e}"),
    }

    Ok(())
}
