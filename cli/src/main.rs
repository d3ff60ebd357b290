//! Data grid service: CLI server
//!
//! ```sh
//! # Run with default config (~/.config/datagrid/config.toml)
//! datagrid-service
//!
//! # Custom config path, demo data
//! datagrid-service --config /etc/datagrid/config.toml --seed
//!
//! # Validate config without starting
//! datagrid-service --check
//! ```

use std::path::PathBuf;

use clap::Parser;
use tracing::{error, info};

use datagrid::config::AppConfig;
use datagrid::server::{init_tracing, ServerHandle, ServerOptions};

/// Paginated, searchable, filterable and exportable list endpoints.
#[derive(Parser, Debug)]
#[command(
    name = "datagrid-service",
    version,
    about = "REST service exposing grid-backed list and CSV export endpoints",
    long_about = "Serves grid-backed list endpoints: pagination, search, filters, \
                  sorting and CSV export driven by the query string.\n\n\
                  Default config: ~/.config/datagrid/config.toml"
)]
struct Cli {
    /// Path to the configuration file (TOML).
    #[arg(short, long, env = "DATAGRID_CONFIG")]
    config: Option<PathBuf>,

    /// Override the listen port.
    #[arg(short, long)]
    port: Option<u16>,

    /// Override the log level (trace, debug, info, warn, error).
    #[arg(short, long)]
    log_level: Option<String>,

    /// Validate the configuration file and exit without starting the server.
    #[arg(long)]
    check: bool,

    /// Skip database migrations on startup.
    #[arg(long)]
    no_migrate: bool,

    /// Insert demo users when the users table is empty.
    #[arg(long)]
    seed: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config_path = cli.config.unwrap_or_else(datagrid::default_config_path);

    let (mut config, load_error) = match AppConfig::load(&config_path) {
        Ok(cfg) => (cfg, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };

    if let Some(port) = cli.port {
        config.server.port = port;
    }
    if let Some(ref level) = cli.log_level {
        config.logging.level = level.clone();
    }

    if cli.check {
        if let Some(e) = load_error {
            return Err(e.into());
        }
        config.grid.check()?;
        println!("Configuration is valid");
        println!("   Config file : {}", config_path.display());
        println!("   Address     : {}", config.server.address());
        println!("   Database    : {}", config.database.connection_url());
        println!("   Log level   : {}", config.logging.level);
        println!(
            "   Page size   : {} ({}..={})",
            config.grid.per_page, config.grid.per_page_limit.min, config.grid.per_page_limit.max
        );
        return Ok(());
    }

    init_tracing(&config);
    match load_error {
        None => info!("Configuration loaded from {}", config_path.display()),
        Some(e) => {
            error!("Failed to load config from {}: {}", config_path.display(), e);
            error!("Using default configuration.");
        }
    }

    let handle = ServerHandle::start(ServerOptions {
        config,
        auto_migrate: !cli.no_migrate,
        seed_demo_data: cli.seed,
    })
    .await?;

    handle.install_signal_handler();
    info!("Press Ctrl+C to shutdown gracefully.");

    handle.shutdown_signal().wait().await;
    handle.wait().await;

    Ok(())
}
