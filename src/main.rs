// src/main.rs
use anyhow::{Context, Result};
use clap::Parser;
use is_healthy::config::{self, ProbeConfig};
use is_healthy::health::{ParserKind, Prober};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "is-healthy")]
#[command(about = "Probe an HTTP health endpoint and exit 0 if it reports healthy", version)]
struct Args {
    /// Health endpoint URL
    #[arg(env = "IS_HEALTHY_TARGET")]
    target: Option<String>,

    /// Which response field decides the verdict
    #[arg(long, value_enum, ignore_case = true, env = "IS_HEALTHY_PARSER")]
    parser: Option<ParserKind>,

    /// Request timeout in seconds
    #[arg(long, env = "IS_HEALTHY_TIMEOUT_SECS")]
    timeout_secs: Option<u64>,

    /// YAML or JSON config file
    #[arg(long, env = "IS_HEALTHY_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> ExitCode {
    // Logs go to stderr; stdout carries only the verdict.
    let filter = match std::env::var_os(EnvFilter::DEFAULT_ENV) {
        Some(_) => EnvFilter::from_default_env(),
        None => EnvFilter::new("is_healthy=info"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    match run(args).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            error!("{:#}", e);
            ExitCode::from(2)
        }
    }
}

async fn run(args: Args) -> Result<bool> {
    let config = match &args.config {
        Some(path) => {
            info!("Loading configuration from: {}", path.display());
            config::load_config(path).await?
        }
        None => ProbeConfig::default(),
    };

    let config = config.apply_overrides(args.target, args.parser, args.timeout_secs);
    config.validate()?;

    let target = config
        .target
        .as_deref()
        .context("No target given; pass a URL or set `target` in the config file")?;

    let prober = Prober::new(config.timeout()).context("Failed to create HTTP client")?;
    let healthy = prober.check(target, &config.parser).await;

    if healthy {
        println!("{} is healthy", target);
    } else {
        println!("{} is unhealthy", target);
    }
    info!("Probed {} with '{}' parser: healthy={}", target, config.parser, healthy);

    Ok(healthy)
}
