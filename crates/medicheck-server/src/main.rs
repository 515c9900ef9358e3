//! MediCheck server binary
//!
//! Starts the HTTP server for interaction analysis.

use medicheck_server::{config::ServerConfig, start_server, ServerError};
use std::env;
use std::process;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

async fn run() -> Result<(), ServerError> {
    let args: Vec<String> = env::args().collect();

    let config = if args.len() > 2 && args[1] == "--config" {
        ServerConfig::from_file(&args[2])?
    } else if args.len() > 1 && args[1] == "--help" {
        print_help();
        process::exit(0);
    } else {
        eprintln!("Warning: No config file specified, using defaults");
        eprintln!("Usage: medicheck-server --config <path-to-config.toml>");
        eprintln!();
        ServerConfig::default()
    };

    start_server(config).await
}

fn print_help() {
    println!("MediCheck Server - Drug Interaction Analysis API");
    println!();
    println!("USAGE:");
    println!("    medicheck-server --config <path-to-config.toml>");
    println!();
    println!("OPTIONS:");
    println!("    --config <file>    Load configuration from TOML file");
    println!("    --help             Print this help message");
    println!();
    println!("EXAMPLE:");
    println!("    medicheck-server --config config/server.toml");
    println!();
    println!("ENVIRONMENT:");
    println!("    MEDICHECK_API_KEY  Model gateway API key (when not in the config file)");
    println!("    RUST_LOG           Log filter (default: info)");
    println!();
}
