use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use clap::Parser;
use port_pid::{PortQuery, QueryOutcome, Resolver, config::AppConfig};
use tracing_subscriber::EnvFilter;

const DEFAULT_CONFIG: &str = "port-pid.toml";

#[derive(Debug, Parser)]
#[command(version, about = "Find the process that owns a network port.")]
struct Args {
    /// Ports to look up (example: 8080 5432, or 8080,5432)
    #[arg(required_unless_present = "all", conflicts_with = "all")]
    ports: Vec<String>,

    /// List every discovered port with its owning PID
    #[arg(long)]
    all: bool,

    /// Print results as JSON
    #[arg(long)]
    json: bool,

    /// Path to config TOML. If omitted, uses ./port-pid.toml when present
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .compact()
        .init();

    // Argument errors surface before any utility runs.
    let query = if args.all {
        None
    } else {
        Some(args.ports.join(",").parse::<PortQuery>()?)
    };

    let cfg = load_config(args.config.as_deref())?;
    let platform = cfg.platform();
    tracing::debug!(platform = %platform, "resolved platform");

    let resolver = Resolver::for_platform(platform, &cfg.commands);

    match query {
        None => {
            let ports = resolver.resolve_all().context("failed to list ports")?;
            print_all(&ports, args.json)?;
        }
        Some(query) => {
            let outcome = resolver.query(&query)?;
            print_outcome(&outcome, args.json)?;
        }
    }

    Ok(())
}

fn load_config(override_path: Option<&Path>) -> Result<AppConfig> {
    if let Some(p) = override_path {
        return AppConfig::load_from_path(p);
    }

    let p = PathBuf::from(DEFAULT_CONFIG);
    if p.exists() {
        tracing::info!(config = %p.display(), "using config");
        return AppConfig::load_from_path(&p);
    }

    Ok(AppConfig::default())
}

fn print_all(ports: &BTreeMap<u16, Option<u32>>, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(ports)?);
        return Ok(());
    }

    for (port, pid) in ports {
        println!("{port}\t{}", format_pid(*pid));
    }
    Ok(())
}

fn print_outcome(outcome: &QueryOutcome, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(outcome)?);
        return Ok(());
    }

    match outcome {
        QueryOutcome::Single(pid) => println!("{}", format_pid(*pid)),
        QueryOutcome::Batch(ports) => {
            for (port, pid) in ports {
                println!("{port}\t{}", format_pid(*pid));
            }
        }
    }
    Ok(())
}

fn format_pid(pid: Option<u32>) -> String {
    pid.map_or_else(|| "-".to_string(), |pid| pid.to_string())
}
