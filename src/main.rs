//! phpfpm-status
//!
//! One-shot PHP-FPM status scraper.
//!
//! # Architecture Overview
//!
//! ```text
//!   CLI flags ──┐
//!               ├─▶ config ─▶ PoolManager ─▶ Pool::update() × N (concurrent)
//!   TOML file ──┘                                 │
//!                                                 ▼
//!                                   FastCGI ─▶ php-fpm status page
//!                                                 │
//!                                                 ▼
//!                            snapshot + scoreboard ─▶ JSON on stdout
//! ```

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use serde::Serialize;

use phpfpm_status::config::{load_config, validate_config, ExporterConfig, PoolConfig};
use phpfpm_status::observability::logging::{init_tracing, TracingLogger};
use phpfpm_status::{set_logger, Pool, PoolManager, Scoreboard};

#[derive(Parser)]
#[command(name = "phpfpm-status")]
#[command(about = "Scrape PHP-FPM pool status pages over FastCGI", long_about = None)]
struct Cli {
    /// TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Pool address (tcp://host:port or unix:///path). Repeatable.
    #[arg(short, long = "pool", value_name = "URI")]
    pools: Vec<String>,

    /// Per-pool time budget in seconds, covering connect and response.
    #[arg(short, long)]
    timeout: Option<u64>,

    /// Pretty-print the JSON output.
    #[arg(long)]
    pretty: bool,

    /// Force debug logging.
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Serialize)]
struct PoolReport<'a> {
    address: &'a str,
    scrape_failures: u64,
    last_error: Option<String>,
    scoreboard: Scoreboard,
    status: &'a Pool,
}

#[derive(Serialize)]
struct Report<'a> {
    pools: Vec<PoolReport<'a>>,
}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => ExporterConfig::default(),
    };
    config
        .pools
        .extend(cli.pools.iter().map(|address| PoolConfig { address: address.clone() }));
    if let Some(secs) = cli.timeout {
        config.scrape.timeout_secs = secs;
    }
    if let Err(errors) = validate_config(&config) {
        for err in &errors {
            eprintln!("config error: {err}");
        }
        return Ok(ExitCode::from(2));
    }
    if config.pools.is_empty() {
        eprintln!("no pools configured; pass --pool or --config");
        return Ok(ExitCode::from(2));
    }

    let level = if cli.verbose { "debug" } else { config.observability.log_level.as_str() };
    init_tracing(level);
    set_logger(Arc::new(TracingLogger));

    tracing::info!(
        pools = config.pools.len(),
        timeout_secs = config.scrape.timeout_secs,
        "Configuration loaded"
    );

    let mut manager = PoolManager::with_timeout(config.scrape.timeout());
    for pool in &config.pools {
        manager.add(pool.address.as_str());
    }

    manager.update().await;

    let report = Report {
        pools: manager
            .pools()
            .iter()
            .map(|pool| PoolReport {
                address: &pool.address,
                scrape_failures: pool.scrape_failures,
                last_error: pool.last_error.as_ref().map(ToString::to_string),
                scoreboard: pool.scoreboard(),
                status: pool,
            })
            .collect(),
    };

    let json = if cli.pretty {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string(&report)?
    };
    println!("{json}");

    let failed = manager.pools().iter().filter(|p| p.is_stale()).count();
    if failed > 0 {
        tracing::info!(failed, "Some pools could not be scraped");
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}
