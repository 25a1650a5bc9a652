//! Session setup and initialization

use crate::environment::Environment;
use crate::events::Event;
use crate::runtime::start_lot_workers;
use crate::server::{LotServer, LotServerClient};
use crate::workers::{Command, RefreshHandle};
use std::error::Error;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;

/// Session data for both TUI and headless modes
#[derive(Debug)]
pub struct SessionData {
    /// Event receiver for worker events
    pub event_receiver: mpsc::Receiver<Event>,
    /// Sends user actions to the command worker
    pub command_sender: mpsc::Sender<Command>,
    /// Background workers to stop on exit
    pub workers: SessionWorkers,
    /// Shutdown sender to stop all workers
    pub shutdown_sender: broadcast::Sender<()>,
    /// The lot server in use
    pub environment: Environment,
    /// Time between two automatic refreshes
    pub refresh_interval: Duration,
}

/// Handles of the workers started for a session
#[derive(Debug)]
pub struct SessionWorkers {
    /// Periodic refresh of the vehicle list
    pub refresh_handle: RefreshHandle,
    /// Join handle of the command worker
    pub command_worker: JoinHandle<()>,
}

impl SessionWorkers {
    /// Stops the refresh timer and waits for the command worker to finish.
    /// The command worker only exits once shutdown has been broadcast.
    pub async fn join(self) {
        self.refresh_handle.stop().await;
        let _ = self.command_worker.await;
    }
}

/// Sets up a lot client session
///
/// Creates the server client and the shutdown channel, then starts the
/// refresh timer and the command worker.
pub async fn setup_session(
    env: Environment,
    refresh_interval: Duration,
) -> Result<SessionData, Box<dyn Error>> {
    let server: Arc<dyn LotServer> = Arc::new(LotServerClient::new(env.clone())?);

    // Create shutdown channel - only one shutdown signal needed
    let (shutdown_sender, _) = broadcast::channel(1);

    let (event_receiver, command_sender, refresh_handle, command_worker) =
        start_lot_workers(server, refresh_interval, shutdown_sender.subscribe());

    Ok(SessionData {
        event_receiver,
        command_sender,
        workers: SessionWorkers {
            refresh_handle,
            command_worker,
        },
        shutdown_sender,
        environment: env,
        refresh_interval,
    })
}
