mod api;
mod cli_messages;
mod config;
mod consts;
mod dashboard;
mod date_range;
mod environment;
mod error_classifier;
mod events;
mod loader;
mod logging;
mod output;
mod runtime;
mod series;
mod session;
mod ui;

use crate::api::{WindApi, WindApiClient};
use crate::config::{Config, ResolvedSettings, get_config_path, resolve_settings};
use crate::output::OutputFormat;
use crate::runtime::describe_api_error;
use crate::session::{run_headless_mode, run_tui_mode, setup_session};
use chrono::NaiveDate;
use clap::{ArgAction, Parser, Subcommand};
use std::error::Error;
use std::path::Path;
use tracing_subscriber::EnvFilter;

/// Environment variable overriding the configured API URL.
const API_URL_ENV: &str = "WIND_API_URL";

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
/// Command-line arguments
struct Args {
    /// Command to execute
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Open the interactive dashboard
    Start {
        /// Base URL of the wind data API
        #[arg(long, value_name = "URL")]
        api_url: Option<String>,

        /// Maximum number of days a selection may span
        #[arg(long, value_name = "DAYS")]
        max_range_days: Option<u32>,

        /// Enable background colors
        #[arg(long = "with-background", action = ArgAction::SetTrue)]
        with_background: bool,
    },
    /// Print the range of dates the service has data for
    Bounds {
        /// Base URL of the wind data API
        #[arg(long, value_name = "URL")]
        api_url: Option<String>,
    },
    /// Fetch a series without the interactive dashboard and print it
    Fetch {
        /// First day of the selection (YYYY-MM-DD)
        #[arg(long, value_name = "DATE")]
        start: NaiveDate,

        /// Last day of the selection (YYYY-MM-DD)
        #[arg(long, value_name = "DATE")]
        end: NaiveDate,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Csv)]
        format: OutputFormat,

        /// Base URL of the wind data API
        #[arg(long, value_name = "URL")]
        api_url: Option<String>,

        /// Maximum number of days a selection may span
        #[arg(long, value_name = "DAYS")]
        max_range_days: Option<u32>,
    },
    /// Save the API URL and range limit to the config file
    Configure {
        /// Base URL of the wind data API
        #[arg(long, value_name = "URL")]
        api_url: Option<String>,

        /// Maximum number of days a selection may span
        #[arg(long, value_name = "DAYS")]
        max_range_days: Option<u32>,
    },
    /// Delete the config file
    Reset,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config_path = get_config_path()?;
    let args = Args::parse();
    match args.command {
        Command::Start {
            api_url,
            max_range_days,
            with_background,
        } => {
            let settings = load_settings(&config_path, api_url.as_deref(), max_range_days)?;
            let session = setup_session(&settings)?;
            run_tui_mode(session, with_background).await
        }
        Command::Bounds { api_url } => {
            init_diagnostics();
            let settings = load_settings(&config_path, api_url.as_deref(), None)?;
            print_bounds(settings).await
        }
        Command::Fetch {
            start,
            end,
            format,
            api_url,
            max_range_days,
        } => {
            init_diagnostics();
            let settings = load_settings(&config_path, api_url.as_deref(), max_range_days)?;
            let session = setup_session(&settings)?;
            run_headless_mode(session, start, end, format).await
        }
        Command::Configure {
            api_url,
            max_range_days,
        } => configure(&config_path, api_url, max_range_days),
        Command::Reset => {
            print_cmd_info!("Resetting configuration", "{}", config_path.display());
            Config::clear(&config_path)?;
            print_cmd_success!("Configuration cleared", "");
            Ok(())
        }
    }
}

/// Sends `log` diagnostics to stderr, filtered by `RUST_LOG` (warnings by default).
///
/// Not installed for `start`: the TUI owns the terminal, and its activity log
/// takes the place of these diagnostics.
fn init_diagnostics() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    // Only fails if a subscriber is already installed
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Reads the config file and combines it with flags and the environment.
fn load_settings(
    config_path: &Path,
    api_url: Option<&str>,
    max_range_days: Option<u32>,
) -> Result<ResolvedSettings, Box<dyn Error>> {
    let config = match Config::load_or_default(config_path) {
        Ok(config) => config,
        Err(e) => {
            print_cmd_warn!("Ignoring unreadable config file", "{}", e);
            Config::default()
        }
    };
    let env_api_url = std::env::var(API_URL_ENV).ok();
    let settings = resolve_settings(&config, api_url, env_api_url.as_deref(), max_range_days)?;
    Ok(settings)
}

async fn print_bounds(settings: ResolvedSettings) -> Result<(), Box<dyn Error>> {
    let client = WindApiClient::new(settings.environment)?;
    match client.discover_bounds().await {
        Ok(bounds) => {
            println!("min_date: {}", bounds.min());
            println!("max_date: {}", bounds.max());
            Ok(())
        }
        Err(e) => {
            let message = describe_api_error(&e);
            print_cmd_error!("Failed to discover dates", e.to_string().as_str());
            Err(message.into())
        }
    }
}

fn configure(
    config_path: &Path,
    api_url: Option<String>,
    max_range_days: Option<u32>,
) -> Result<(), Box<dyn Error>> {
    let mut config = Config::load_or_default(config_path)?;
    config.merge(Config::new(api_url, max_range_days));

    // Validate before writing anything
    resolve_settings(&config, None, None, None)?;

    config
        .save(config_path)
        .map_err(|e| format!("Failed to save config: {}", e))?;
    print_cmd_success!("Configuration saved", "{}", config_path.display());
    Ok(())
}
