mod cli_messages;
mod config;
mod consts;
mod environment;
mod error_classifier;
mod events;
mod logging;
mod lot;
mod runtime;
mod server;
mod session;
mod ui;
mod view;
mod workers;

use crate::config::{Config, get_config_path};
use crate::consts::cli_consts::refresh::MIN_INTERVAL_SECS;
use crate::environment::Environment;
use crate::lot::{Machine, VehicleForm, VehicleId};
use crate::server::{LotServer, LotServerClient};
use crate::session::{run_headless_mode, run_tui_mode, setup_session};
use crate::view::ConsoleView;
use crate::workers::{ControllerError, LotController, MutationOutcome};
use clap::{Parser, Subcommand};
use std::error::Error;
use std::sync::Arc;
use std::time::Duration;

/// Environment variable naming the lot server, below `--server-url` in precedence.
const SERVER_URL_ENV: &str = "PARKING_SERVER_URL";

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
/// Command-line arguments
struct Args {
    /// Lot server base URL, e.g. http://127.0.0.1:5000
    #[arg(long, global = true, value_name = "URL")]
    server_url: Option<String>,

    /// Command to execute
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Watch the lot, refreshing the vehicle list periodically
    Watch {
        /// Print activity to the console instead of the dashboard
        #[arg(long, default_value_t = false)]
        headless: bool,

        /// Paint the dashboard background
        #[arg(long = "with-background", action = clap::ArgAction::SetTrue)]
        with_background: bool,

        /// Seconds between refreshes, overriding the configured interval
        #[arg(long, value_name = "SECS")]
        refresh_secs: Option<u64>,
    },
    /// Print the vehicles parked on each machine
    List {
        /// Print the lot as JSON
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Park a vehicle
    Add {
        /// Plate number
        #[arg(long, value_name = "PLATE")]
        plate: String,

        /// Mark the vehicle as small
        #[arg(long, default_value_t = false)]
        small: bool,

        /// Machine to park on (1, 2 or 3)
        #[arg(long, value_name = "MACHINE", default_value = "1")]
        machine: Machine,
    },
    /// Remove a vehicle from the lot
    Remove {
        #[arg(long, value_name = "ID")]
        id: VehicleId,
    },
    /// Put a vehicle in its machine's exit queue
    QueueExit {
        #[arg(long, value_name = "ID")]
        id: VehicleId,
    },
    /// Release the vehicle at the head of its machine's exit queue
    Exit {
        #[arg(long, value_name = "ID")]
        id: VehicleId,
    },
    /// Save the server URL and refresh interval for later runs
    Configure {
        /// Seconds between refreshes in watch mode
        #[arg(long, value_name = "SECS")]
        refresh_secs: Option<u64>,
    },
    /// Delete the saved configuration
    Reset,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    if let Err(e) = run(args).await {
        print_cmd_error!("Command failed", "{}", e);
        std::process::exit(1);
    }
}

async fn run(args: Args) -> Result<(), Box<dyn Error>> {
    let config_path = get_config_path()?;

    // An explicit URL that does not parse is an error, not a silent fallback
    if let Some(url) = &args.server_url {
        parse_server_url(url)?;
    }

    match args.command {
        Command::Reset => {
            if Config::clear(&config_path)? {
                print_cmd_info!("Configuration removed", "{}", config_path.display());
            } else {
                print_cmd_info!("Nothing to reset", "{} does not exist", config_path.display());
            }
            return Ok(());
        }
        Command::Configure { refresh_secs } => {
            let mut config = Config::load_or_default(&config_path)?;
            if let Some(url) = &args.server_url {
                config.server_url = Some(parse_server_url(url)?.server_url());
            }
            if let Some(secs) = refresh_secs {
                config.refresh_interval_secs = validate_refresh_secs(secs)?;
            }
            config.save(&config_path)?;
            print_cmd_success!(
                "Configuration saved",
                "server {}, refresh every {}s",
                config.server_url.as_deref().unwrap_or("local"),
                config.refresh_interval_secs
            );
            return Ok(());
        }
        _ => {}
    }

    let config = Config::load_or_default(&config_path).map_err(|e| {
        format!(
            "Failed to load {}: {}. Run `parking-cli reset` to start over",
            config_path.display(),
            e
        )
    })?;
    let environment = Environment::resolve(&[
        args.server_url,
        std::env::var(SERVER_URL_ENV).ok(),
        config.server_url.clone(),
    ]);

    match args.command {
        Command::Watch {
            headless,
            with_background,
            refresh_secs,
        } => {
            let refresh_interval = match refresh_secs {
                Some(secs) => Duration::from_secs(validate_refresh_secs(secs)?),
                None => config.refresh_interval(),
            };
            let session = setup_session(environment, refresh_interval).await?;
            if headless {
                run_headless_mode(session).await
            } else {
                run_tui_mode(session, with_background).await
            }
        }
        Command::List { json } => {
            let controller = one_shot_controller(environment, json)?;
            controller.refresh().await?;
            Ok(())
        }
        Command::Add {
            plate,
            small,
            machine,
        } => {
            let controller = one_shot_controller(environment, false)?;
            let form = VehicleForm::new(plate, small, machine);
            mutation_result(controller.submit_add(&form).await)
        }
        Command::Remove { id } => {
            let controller = one_shot_controller(environment, false)?;
            mutation_result(controller.remove(id).await)
        }
        Command::QueueExit { id } => {
            let controller = one_shot_controller(environment, false)?;
            mutation_result(controller.queue_exit(id).await)
        }
        Command::Exit { id } => {
            let controller = one_shot_controller(environment, false)?;
            mutation_result(controller.exit(id).await)
        }
        Command::Configure { .. } | Command::Reset => Ok(()),
    }
}

fn parse_server_url(url: &str) -> Result<Environment, String> {
    url.parse::<Environment>().map_err(|_| {
        format!(
            "Invalid server URL '{}': expected http(s)://host[:port] or 'local'",
            url
        )
    })
}

fn validate_refresh_secs(secs: u64) -> Result<u64, String> {
    if secs < MIN_INTERVAL_SECS {
        return Err(format!(
            "Refresh interval must be at least {}s",
            MIN_INTERVAL_SECS
        ));
    }
    Ok(secs)
}

/// A controller that prints straight to the terminal.
fn one_shot_controller(environment: Environment, json: bool) -> Result<LotController, Box<dyn Error>> {
    let server: Arc<dyn LotServer> = Arc::new(LotServerClient::new(environment)?);
    Ok(LotController::new(server, Arc::new(ConsoleView::new(json))))
}

fn mutation_result(
    result: Result<MutationOutcome, ControllerError>,
) -> Result<(), Box<dyn Error>> {
    match result? {
        MutationOutcome::Applied => Ok(()),
        MutationOutcome::Rejected => Err("The server rejected the request".into()),
    }
}
