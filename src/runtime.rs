//! Runtime for coordinating the lot client workers

use crate::consts::cli_consts::{COMMAND_QUEUE_SIZE, EVENT_QUEUE_SIZE};
use crate::events::Event;
use crate::server::LotServer;
use crate::workers::commands::run_command_loop;
use crate::workers::core::EventSender;
use crate::workers::{Command, LotController, RefreshHandle};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;

/// Start the periodic refresh and the command worker, both reporting through one event channel.
pub fn start_lot_workers(
    server: Arc<dyn LotServer>,
    refresh_interval: Duration,
    shutdown: broadcast::Receiver<()>,
) -> (
    mpsc::Receiver<Event>,
    mpsc::Sender<Command>,
    RefreshHandle,
    JoinHandle<()>,
) {
    let (event_sender, event_receiver) = mpsc::channel::<Event>(EVENT_QUEUE_SIZE);
    let (command_sender, command_receiver) = mpsc::channel::<Command>(COMMAND_QUEUE_SIZE);

    let controller = LotController::new(server, Arc::new(EventSender::new(event_sender)));
    let refresh_handle = RefreshHandle::start(controller.clone(), refresh_interval);
    let command_worker = tokio::spawn(run_command_loop(controller, command_receiver, shutdown));

    (event_receiver, command_sender, refresh_handle, command_worker)
}
