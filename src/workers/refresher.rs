//! Periodic vehicle list refresh

use super::controller::LotController;
use std::time::Duration;
use tokio::sync::broadcast;
use tokio::task::{JoinHandle, JoinSet};
use tokio::time::MissedTickBehavior;

/// Owns the refresh timer. Dropping the handle without [`RefreshHandle::stop`]
/// leaves the timer running until the runtime shuts down.
#[derive(Debug)]
pub struct RefreshHandle {
    shutdown: broadcast::Sender<()>,
    join_handle: JoinHandle<()>,
}

impl RefreshHandle {
    /// Refreshes once right away, then every `interval`.
    pub fn start(controller: LotController, interval: Duration) -> Self {
        let (shutdown, shutdown_receiver) = broadcast::channel(1);
        let join_handle = tokio::spawn(refresh_loop(controller, interval, shutdown_receiver));
        log::debug!("refreshing the lot every {:?}", interval);
        Self {
            shutdown,
            join_handle,
        }
    }

    #[cfg(test)]
    pub fn is_running(&self) -> bool {
        !self.join_handle.is_finished()
    }

    /// Stops the timer and aborts refreshes still in flight, so nothing renders afterwards.
    pub async fn stop(self) {
        let _ = self.shutdown.send(());
        let _ = self.join_handle.await;
    }
}

async fn refresh_loop(
    controller: LotController,
    interval: Duration,
    mut shutdown: broadcast::Receiver<()>,
) {
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // Ticks never wait for the previous refresh; ordering is left to the controller's guard.
    let mut in_flight = JoinSet::new();

    loop {
        tokio::select! {
            _ = shutdown.recv() => break,
            _ = ticker.tick() => {
                let controller = controller.clone();
                in_flight.spawn(async move { controller.refresh_and_report().await });
            }
            Some(_) = in_flight.join_next(), if !in_flight.is_empty() => {}
        }
    }

    in_flight.shutdown().await;
}
