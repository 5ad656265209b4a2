use clap::{Parser, Subcommand};
use serde::Serialize;
use std::fs;
use std::process::ExitCode;

use beacon_viz::beacon::{decode, Location};
use beacon_viz::scene::{predict, project, DEFAULT_RADIUS};
use beacon_viz::web::{run_server, Config};

#[derive(Parser)]
#[command(name = "beacon-viz")]
#[command(about = "Beacon telemetry decoder and renderer feed")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Poll the configured data file and serve the renderer API
    Serve {
        #[arg(short, long, default_value = "config.yaml")]
        config: String,
    },
    /// Decode a data file and print samples and diagnostics as JSON
    Decode {
        file: String,
        #[arg(long)]
        pretty: bool,
    },
    /// Print the predicted orientation at a sample index
    Predict {
        file: String,
        #[arg(short, long)]
        index: usize,
    },
    /// Project a latitude/longitude onto the render sphere
    Project {
        #[arg(long, allow_hyphen_values = true)]
        latitude: f64,
        #[arg(long, allow_hyphen_values = true)]
        longitude: f64,
        #[arg(long, default_value_t = DEFAULT_RADIUS)]
        radius: f64,
    },
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { config } => serve(&config),
        Commands::Decode { file, pretty } => decode_file(&file, pretty),
        Commands::Predict { file, index } => predict_at(&file, index),
        Commands::Project {
            latitude,
            longitude,
            radius,
        } => {
            let location = Location {
                latitude,
                longitude,
                altitude: 0.0,
            };
            print_json(&project(&location, radius), false)
        }
    }
}

fn serve(path: &str) -> ExitCode {
    let config = match Config::from_file(path) {
        Ok(c) => c,
        Err(e) => {
            log::error!("Failed to load config {}: {}", path, e);
            return ExitCode::FAILURE;
        }
    };

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            log::error!("Failed to start runtime: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(run_server(config)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("Server error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn decode_file(path: &str, pretty: bool) -> ExitCode {
    let Some(blob) = read_blob(path) else {
        return ExitCode::FAILURE;
    };

    let decoded = decode(&blob);
    for diagnostic in &decoded.diagnostics {
        log::warn!("{}", diagnostic);
    }
    print_json(&decoded, pretty)
}

fn predict_at(path: &str, index: usize) -> ExitCode {
    let Some(blob) = read_blob(path) else {
        return ExitCode::FAILURE;
    };

    let decoded = decode(&blob);
    let prediction = predict(&decoded.samples, index);
    if prediction.is_none() {
        log::info!(
            "No prediction at index {} ({} samples)",
            index,
            decoded.samples.len()
        );
    }
    print_json(&prediction, false)
}

fn read_blob(path: &str) -> Option<String> {
    match fs::read_to_string(path) {
        Ok(c) => Some(c),
        Err(e) => {
            eprintln!("Error reading file: {}", e);
            None
        }
    }
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> ExitCode {
    let out = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    match out {
        Ok(s) => {
            println!("{}", s);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error encoding output: {}", e);
            ExitCode::FAILURE
        }
    }
}
