use clap::Parser;
use usergraph::config;

/// Load and validate the configuration, then print a summary of it
#[derive(Debug, Parser)]
pub struct CheckConfigCommand {}

pub fn run(_args: &CheckConfigCommand, config: &config::Server) {
    tracing::info!("Configuration is valid");

    let db = &config.db;
    println!("db.primary.url = {}", db.primary.url);
    println!("db.primary.pool_size = {}", db.primary.pool_size);
    match db.primary.min_idle {
        Some(min_idle) => println!("db.primary.min_idle = {min_idle}"),
        None => println!("db.primary.min_idle = (unset)"),
    }
    println!("db.enforce_tls = {}", db.enforce_tls);
    println!("db.timeout_secs = {}", db.timeout_secs);
    println!("logging.style = {}", config.logging.style);
    println!("logging.targets = {:?}", config.logging.targets);
}
