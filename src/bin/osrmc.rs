mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use commands::{cmd_config, cmd_fingerprint, cmd_params, cmd_validate};

#[derive(Parser)]
#[command(name = "osrmc")]
#[command(
    about = "Inspect datasets and request documents for the osrmc routing bridge",
    long_about = "osrmc - Companion tool for the osrmc C interface\n\n\
    Checks prepared datasets before an engine loads them and prints the JSON\n\
    documents osrmc hands to native engines, which helps when writing an\n\
    engine adapter.\n\n\
    Examples:\n\
      osrmc validate berlin.osrm\n\
      osrmc fingerprint berlin.osrm --engine-version 6.0.0\n\
      osrmc config berlin.osrm --algorithm mld\n\
      osrmc params route -c 13.388860,52.517037 -c 13.397634,52.529407"
)]
#[command(version)]
struct Cli {
    /// Log level for library diagnostics (error, warn, info, debug, trace, off)
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check a dataset's fingerprint against this build
    Validate {
        /// Dataset base path (e.g. berlin.osrm)
        #[arg(value_name = "DATASET")]
        dataset: PathBuf,

        /// Output results as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Write a fingerprint next to a dataset base path
    Fingerprint {
        /// Dataset base path (e.g. berlin.osrm)
        #[arg(value_name = "DATASET")]
        dataset: PathBuf,

        /// Engine version that prepared the dataset (MAJOR.MINOR.PATCH)
        #[arg(long, value_name = "VERSION", default_value = "6.0.0")]
        engine_version: String,
    },

    /// Print the configuration document handed to engine loaders
    Config {
        /// Dataset base path; omit to attach to shared memory
        #[arg(value_name = "DATASET")]
        dataset: Option<PathBuf>,

        /// Routing algorithm: ch or mld
        #[arg(short, long)]
        algorithm: Option<String>,

        /// Feature datasets to skip (route_steps, route_geometry)
        #[arg(long = "disable")]
        disabled: Vec<String>,

        /// Maximum number of via points for route queries
        #[arg(long)]
        max_locations_viaroute: Option<i32>,
    },

    /// Print the parameter document for a service query
    Params {
        /// Service: nearest, route, table, match, trip or tile
        #[arg(value_name = "SERVICE")]
        service: String,

        /// Coordinate as LON,LAT (repeatable)
        #[arg(short, long = "coordinate", value_name = "LON,LAT")]
        coordinates: Vec<String>,

        /// Output format: json, flatbuffers or binary
        #[arg(short, long)]
        format: Option<String>,

        /// Skip the service's validation checks
        #[arg(long)]
        no_validate: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    osrmc::logging::init(osrmc::logging::parse_level(&cli.log_level)?);

    match cli.command {
        Commands::Validate { dataset, json } => cmd_validate(dataset, json),
        Commands::Fingerprint {
            dataset,
            engine_version,
        } => cmd_fingerprint(dataset, engine_version),
        Commands::Config {
            dataset,
            algorithm,
            disabled,
            max_locations_viaroute,
        } => cmd_config(dataset, algorithm, disabled, max_locations_viaroute),
        Commands::Params {
            service,
            coordinates,
            format,
            no_validate,
        } => cmd_params(service, coordinates, format, no_validate),
    }
}
