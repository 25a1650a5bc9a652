//! User commands coming from the dashboard

use super::controller::LotController;
use crate::error_classifier::ErrorClassifier;
use crate::lot::{VehicleForm, VehicleId};
use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinSet;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Refresh,
    Add(VehicleForm),
    Remove(VehicleId),
    QueueExit(VehicleId),
    Exit(VehicleId),
}

impl Command {
    /// Runs the command. Outcomes are already reported to the view by the controller,
    /// failures are only traced here.
    pub async fn execute(self, controller: &LotController) {
        let result = match self {
            Command::Refresh => {
                controller.refresh_and_report().await;
                return;
            }
            Command::Add(form) => controller.submit_add(&form).await,
            Command::Remove(id) => controller.remove(id).await,
            Command::QueueExit(id) => controller.queue_exit(id).await,
            Command::Exit(id) => controller.exit(id).await,
        };
        if let Err(e) = result {
            let level: log::Level = ErrorClassifier::new().classify_controller_error(&e).into();
            log::log!(level, "command failed: {}", e);
        }
    }
}

/// Receives commands until shutdown, running each one concurrently.
/// Commands already started are allowed to finish.
pub async fn run_command_loop(
    controller: LotController,
    mut commands: mpsc::Receiver<Command>,
    mut shutdown: broadcast::Receiver<()>,
) {
    let mut in_flight = JoinSet::new();

    loop {
        tokio::select! {
            _ = shutdown.recv() => break,
            command = commands.recv() => match command {
                Some(command) => {
                    let controller = controller.clone();
                    in_flight.spawn(async move { command.execute(&controller).await });
                }
                None => break,
            },
            Some(_) = in_flight.join_next(), if !in_flight.is_empty() => {}
        }
    }

    while in_flight.join_next().await.is_some() {}
}
