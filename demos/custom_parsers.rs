//! Example using custom parser functions

use envbind::{Env, Parsers, Value};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq)]
struct Percent(u8);

// No kind and no decoder: only parseable through a custom parser
impl Value for Percent {}

fn parse_percent(s: &str) -> anyhow::Result<Percent> {
    let number = s.trim_end_matches('%').parse::<u8>()?;
    anyhow::ensure!(number <= 100, "{number} is above 100%");
    Ok(Percent(number))
}

#[derive(Debug, Default, Env)]
struct Config {
    #[env = "CPU_LIMIT"]
    pub cpu_limit: Option<Percent>,

    // Custom parsers replace built-in ones for their exact type
    #[env = "CACHE_TTL"]
    pub cache_ttl: Duration,
}

fn main() -> anyhow::Result<()> {
    std::env::set_var("CPU_LIMIT", "75%");
    std::env::set_var("CACHE_TTL", "300");

    let parsers = Parsers::new()
        .with(parse_percent)
        .with(|s: &str| s.parse::<u64>().map(Duration::from_secs));

    let mut config = Config::default();
    envbind::parse_with_parsers(&mut config, &parsers)?;

    println!("Configuration with custom parsers:");
    println!("  CPU limit: {:?}", config.cpu_limit);
    println!("  Cache TTL: {:?}", config.cache_ttl);

    Ok(())
}
