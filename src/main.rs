//! Enemy fighter power estimator: CLI.

use clap::{Parser, Subcommand, ValueEnum};
use kc_airpower::config::EstimatorConfig;
use kc_airpower::estimate::{self, FleetSnapshot, GearClass};
use kc_airpower::master::{load_fleet_snapshot, load_master_table, MasterLookup};
use kc_airpower::report::{render_json, render_text, write_json_report, EstimateReport};
use kc_airpower::util::{init_logging, parse_id_list};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "kc-airpower")]
#[command(about = "Estimate enemy fleet fighter power from ID-only battle data")]
struct Cli {
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Estimate enemy fighter power for a fleet snapshot.
    Estimate {
        #[arg(
            long,
            value_name = "JSON",
            help = "Master data (api_mst_ship, api_mst_slotitem, abyssal_ships)"
        )]
        master: PathBuf,
        #[arg(
            long,
            value_name = "JSON",
            help = "Fleet snapshot { \"ship_ids\": [...], \"slots\": [...], \"maxeq\": [...] }"
        )]
        fleet: Option<PathBuf>,
        #[arg(
            long,
            value_name = "IDS",
            conflicts_with = "fleet",
            help = "Comma-separated enemy ship IDs, master defaults for equipment"
        )]
        ships: Option<String>,
        #[arg(long, value_name = "TOML")]
        config: Option<PathBuf>,
        #[arg(long, value_name = "N", help = "Friendly fighter power to contest against")]
        friendly_power: Option<i64>,
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
        #[arg(long, value_name = "FILE", help = "Also write the JSON report to this file")]
        out: Option<PathBuf>,
    },
    /// Show how a gear is classified under the active configuration.
    Gear {
        #[arg(long, value_name = "JSON")]
        master: PathBuf,
        #[arg(long, value_name = "TOML")]
        config: Option<PathBuf>,
        gear_id: i64,
    },
}

fn main() -> Result<(), String> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Estimate {
            master,
            fleet,
            ships,
            config,
            friendly_power,
            format,
            out,
        } => run_estimate(
            &master,
            fleet.as_deref(),
            ships.as_deref(),
            config.as_deref(),
            friendly_power,
            format,
            out.as_deref(),
        ),
        Commands::Gear {
            master,
            config,
            gear_id,
        } => run_gear(&master, config.as_deref(), gear_id),
    }
}

fn load_config(path: Option<&Path>) -> Result<EstimatorConfig, String> {
    match path {
        Some(p) => {
            let cfg = EstimatorConfig::load(p).map_err(|e| e.to_string())?;
            tracing::debug!("loaded config from {}", p.display());
            Ok(cfg)
        }
        None => Ok(EstimatorConfig::default()),
    }
}

fn run_estimate(
    master_path: &Path,
    fleet: Option<&Path>,
    ships: Option<&str>,
    config: Option<&Path>,
    friendly_power: Option<i64>,
    format: Format,
    out: Option<&Path>,
) -> Result<(), String> {
    let cfg = load_config(config)?;
    let master = load_master_table(master_path, &cfg).map_err(|e| e.to_string())?;
    let snapshot = match (fleet, ships) {
        (Some(p), _) => load_fleet_snapshot(p).map_err(|e| e.to_string())?,
        (None, Some(ids)) => FleetSnapshot {
            ship_ids: Some(parse_id_list(ids)?),
            ..FleetSnapshot::default()
        },
        (None, None) => FleetSnapshot::default(),
    };

    let result = estimate::estimate(&master, &cfg, &snapshot);
    let report = EstimateReport::new(result, friendly_power);
    tracing::info!(
        "estimated enemy fighter power {:?} ({} data gap(s))",
        report.result.total_power(),
        report.diagnostics.len()
    );

    match format {
        Format::Text => print!("{}", render_text(&report)),
        Format::Json => println!("{}", render_json(&report)?),
    }
    if let Some(path) = out {
        write_json_report(&report, path)?;
        tracing::info!("wrote {}", path.display());
    }
    Ok(())
}

fn run_gear(master_path: &Path, config: Option<&Path>, gear_id: i64) -> Result<(), String> {
    let cfg = load_config(config)?;
    let master = load_master_table(master_path, &cfg).map_err(|e| e.to_string())?;
    let gear = master
        .slotitem(gear_id)
        .ok_or_else(|| format!("gear not found in master data: {}", gear_id))?;
    let class = match estimate::classify(gear, &cfg) {
        GearClass::Fighter => "fighter (counts toward fighter power)",
        GearClass::Recon => "recon (land-base air battle only)",
        GearClass::Other => "other (ignored)",
    };
    println!("Gear: {} ({})", gear.id, gear.name);
    println!("Type: {:?}", gear.kind);
    println!("Anti-air: {}", gear.anti_air());
    println!("Class: {}", class);
    Ok(())
}
