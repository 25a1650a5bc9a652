//! Vehicle list client
//!
//! Fetches and renders the vehicle list, applies user mutations and refreshes
//! after every accepted one.

use super::guard::{RefreshGuard, Ticket};
use crate::error_classifier::{ErrorClassifier, LogLevel};
use crate::events::{Event, EventType};
use crate::lot::{LotBoard, VehicleForm, VehicleId};
use crate::server::LotServer;
use crate::server::error::ServerError;
use crate::server::messages::{AddVehicleRequest, MutationResponse};
use crate::view::LotView;
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ControllerError {
    #[error("Plate number is required")]
    EmptyPlate,

    #[error(transparent)]
    Server(#[from] ServerError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// The board was replaced with this refresh's snapshot.
    Rendered(Ticket),
    /// A refresh that started later had already rendered.
    Stale(Ticket),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationOutcome {
    /// The server accepted the change and the board was refreshed.
    Applied,
    /// The server answered `success: false`. Nothing changed.
    Rejected,
}

/// The lot client: server handle, injected view, and refresh ordering.
#[derive(Clone)]
pub struct LotController {
    server: Arc<dyn LotServer>,
    view: Arc<dyn LotView>,
    guard: Arc<RefreshGuard>,
    classifier: ErrorClassifier,
}

impl LotController {
    pub fn new(server: Arc<dyn LotServer>, view: Arc<dyn LotView>) -> Self {
        Self {
            server,
            view,
            guard: Arc::new(RefreshGuard::new()),
            classifier: ErrorClassifier::new(),
        }
    }

    /// Fetches the vehicle list and re-renders every machine list from it.
    pub async fn refresh(&self) -> Result<RefreshOutcome, ServerError> {
        let ticket = self.guard.issue();
        let records = self.server.list_vehicles().await?;
        let board = LotBoard::from_records(records);

        let view = &self.view;
        if self.guard.apply(ticket, || view.render(board)).await {
            Ok(RefreshOutcome::Rendered(ticket))
        } else {
            Ok(RefreshOutcome::Stale(ticket))
        }
    }

    /// Refreshes and records the outcome in the activity log instead of returning it.
    pub async fn refresh_and_report(&self) {
        match self.refresh().await {
            Ok(RefreshOutcome::Rendered(_)) => {}
            Ok(RefreshOutcome::Stale(ticket)) => {
                self.view
                    .notify(Event::refresher_with_level(
                        format!("Dropped stale refresh #{}", ticket.value()),
                        EventType::Refresh,
                        LogLevel::Debug,
                    ))
                    .await;
            }
            Err(e) => {
                let log_level = self.classifier.classify_server_error(&e);
                self.view
                    .notify(Event::refresher_with_level(
                        format!("Failed to refresh vehicles: {}", e),
                        EventType::Error,
                        log_level,
                    ))
                    .await;
            }
        }
    }

    /// Parks the vehicle described by the form.
    ///
    /// A blank plate is reported through the view's alert and never reaches the
    /// server. On success the plate input is cleared and the board refreshed.
    pub async fn submit_add(&self, form: &VehicleForm) -> Result<MutationOutcome, ControllerError> {
        let plate = match form.validated_plate() {
            Ok(plate) => plate,
            Err(e) => {
                self.view.alert(e.to_string()).await;
                return Err(ControllerError::EmptyPlate);
            }
        };

        let request = AddVehicleRequest::new(plate, form.small, form.machine);
        let action = format!("Park {} on machine {}", plate, form.machine);
        let result = self.server.add_vehicle(&request).await;
        self.finish_mutation(action, result, Some(plate)).await
    }

    /// Removes a vehicle from the lot.
    pub async fn remove(&self, id: VehicleId) -> Result<MutationOutcome, ControllerError> {
        let result = self.server.remove_vehicle(id).await;
        self.finish_mutation(format!("Remove vehicle {}", id), result, None)
            .await
    }

    /// Puts a vehicle in its machine's exit queue.
    pub async fn queue_exit(&self, id: VehicleId) -> Result<MutationOutcome, ControllerError> {
        let result = self.server.queue_exit(id).await;
        self.finish_mutation(format!("Queue vehicle {} for exit", id), result, None)
            .await
    }

    /// Releases the vehicle at the head of its exit queue.
    pub async fn exit(&self, id: VehicleId) -> Result<MutationOutcome, ControllerError> {
        let result = self.server.exit_vehicle(id).await;
        self.finish_mutation(format!("Release vehicle {}", id), result, None)
            .await
    }

    async fn finish_mutation(
        &self,
        action: String,
        result: Result<MutationResponse, ServerError>,
        parked_plate: Option<&str>,
    ) -> Result<MutationOutcome, ControllerError> {
        let response = match result {
            Ok(response) => response,
            Err(e) => {
                let log_level = self.classifier.classify_server_error(&e);
                self.view
                    .notify(Event::mutator_with_level(
                        format!("{} failed: {}", action, e),
                        EventType::Error,
                        log_level,
                    ))
                    .await;
                return Err(e.into());
            }
        };

        if !response.success {
            let reason = response
                .msg
                .map(|msg| format!(": {}", msg))
                .unwrap_or_default();
            self.view
                .notify(Event::mutator_with_level(
                    format!("{} rejected by server{}", action, reason),
                    EventType::Error,
                    LogLevel::Warn,
                ))
                .await;
            return Ok(MutationOutcome::Rejected);
        }

        if let Some(plate) = parked_plate {
            self.view.clear_plate_input(plate.to_string()).await;
        }
        self.view
            .notify(Event::mutator_with_level(
                action,
                EventType::Success,
                LogLevel::Info,
            ))
            .await;
        self.refresh_and_report().await;
        Ok(MutationOutcome::Applied)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lot::{Machine, VehicleRecord};
    use crate::server::MockLotServer;
    use crate::view::MockLotView;
    use std::sync::Mutex;
    use std::time::Duration;

    fn record(id: i64, plate: &str, machine: i64) -> VehicleRecord {
        VehicleRecord {
            id: VehicleId::new(id),
            plate: plate.to_string(),
            low: false,
            small: false,
            machine,
            exit_order: 0,
        }
    }

    /// A view that records every render and ignores everything else.
    fn recording_view(renders: Arc<Mutex<Vec<LotBoard>>>) -> MockLotView {
        let mut view = MockLotView::new();
        view.expect_render()
            .returning(move |board| renders.lock().unwrap().push(board));
        view.expect_notify().returning(|_| ());
        view
    }

    #[tokio::test]
    /// Blank plates never reach the server and always raise the alert.
    async fn test_blank_plate_is_rejected_locally() {
        for plate in ["", "   "] {
            let mut server = MockLotServer::new();
            server.expect_add_vehicle().times(0);
            server.expect_list_vehicles().times(0);

            let mut view = MockLotView::new();
            view.expect_alert()
                .withf(|message| message == "Plate number is required")
                .times(1)
                .returning(|_| ());
            view.expect_clear_plate_input().times(0);

            let controller = LotController::new(Arc::new(server), Arc::new(view));
            let form = VehicleForm::new(plate, false, Machine::One);
            let result = controller.submit_add(&form).await;
            assert!(matches!(result, Err(ControllerError::EmptyPlate)));
        }
    }

    #[tokio::test]
    /// An accepted add clears the input and the following refresh shows the plate.
    async fn test_accepted_add_clears_input_and_refreshes() {
        let parked = Arc::new(Mutex::new(Vec::<VehicleRecord>::new()));

        let mut server = MockLotServer::new();
        let store = parked.clone();
        server
            .expect_add_vehicle()
            .withf(|request| {
                request.plate == "12가3456" && !request.small && request.machine == "2"
            })
            .times(1)
            .returning(move |request| {
                let mut store = store.lock().unwrap();
                let id = store.len() as i64 + 1;
                store.push(record(id, &request.plate, request.machine.parse().unwrap()));
                Ok(MutationResponse::accepted())
            });
        let store = parked.clone();
        server
            .expect_list_vehicles()
            .times(1)
            .returning(move || Ok(store.lock().unwrap().clone()));

        let renders = Arc::new(Mutex::new(Vec::new()));
        let mut view = recording_view(renders.clone());
        view.expect_clear_plate_input()
            .withf(|plate| plate == "12가3456")
            .times(1)
            .returning(|_| ());

        let controller = LotController::new(Arc::new(server), Arc::new(view));
        let form = VehicleForm::new("12가3456", false, Machine::Two);
        let outcome = controller.submit_add(&form).await.unwrap();

        assert_eq!(outcome, MutationOutcome::Applied);
        let renders = renders.lock().unwrap();
        assert_eq!(renders.len(), 1);
        let machine_two = &renders[0].list(Machine::Two).vehicles;
        assert_eq!(machine_two.len(), 1);
        assert_eq!(machine_two[0].label, "12가3456");
        assert!(renders[0].list(Machine::One).vehicles.is_empty());
    }

    #[tokio::test]
    /// A rejected add keeps the input and does not refresh.
    async fn test_rejected_add_keeps_input() {
        let mut server = MockLotServer::new();
        server
            .expect_add_vehicle()
            .times(1)
            .returning(|_| Ok(MutationResponse::rejected()));
        server.expect_list_vehicles().times(0);

        let mut view = MockLotView::new();
        view.expect_clear_plate_input().times(0);
        view.expect_render().times(0);
        view.expect_notify().returning(|_| ());

        let controller = LotController::new(Arc::new(server), Arc::new(view));
        let form = VehicleForm::new("12가3456", false, Machine::Two);
        let outcome = controller.submit_add(&form).await.unwrap();
        assert_eq!(outcome, MutationOutcome::Rejected);
    }

    #[tokio::test]
    /// A transport failure on add is returned and logged, without refresh.
    async fn test_failed_add_reports_error() {
        let mut server = MockLotServer::new();
        server.expect_add_vehicle().times(1).returning(|_| {
            Err(ServerError::Http {
                status: 503,
                message: "maintenance".to_string(),
            })
        });
        server.expect_list_vehicles().times(0);

        let mut view = MockLotView::new();
        view.expect_clear_plate_input().times(0);
        view.expect_notify()
            .withf(|event| event.event_type == EventType::Error && event.msg.contains("503"))
            .times(1)
            .returning(|_| ());

        let controller = LotController::new(Arc::new(server), Arc::new(view));
        let form = VehicleForm::new("12가3456", false, Machine::Two);
        let result = controller.submit_add(&form).await;
        assert!(matches!(result, Err(ControllerError::Server(_))));
    }

    #[tokio::test]
    /// A successful remove refreshes into a board without that vehicle.
    async fn test_remove_refreshes_without_vehicle() {
        let parked = Arc::new(Mutex::new(vec![record(1, "A", 1), record(2, "B", 3)]));

        let mut server = MockLotServer::new();
        let store = parked.clone();
        server
            .expect_remove_vehicle()
            .withf(|id| *id == VehicleId::new(2))
            .times(1)
            .returning(move |id| {
                store.lock().unwrap().retain(|r| r.id != id);
                Ok(MutationResponse::accepted())
            });
        let store = parked.clone();
        server
            .expect_list_vehicles()
            .returning(move || Ok(store.lock().unwrap().clone()));

        let renders = Arc::new(Mutex::new(Vec::new()));
        let view = recording_view(renders.clone());

        let controller = LotController::new(Arc::new(server), Arc::new(view));
        let outcome = controller.remove(VehicleId::new(2)).await.unwrap();

        assert_eq!(outcome, MutationOutcome::Applied);
        let renders = renders.lock().unwrap();
        let last = renders.last().unwrap();
        assert!(!last.contains(VehicleId::new(2)));
        assert!(last.contains(VehicleId::new(1)));
    }

    #[tokio::test]
    /// Exit requests the server refuses leave the board alone.
    async fn test_refused_exit_does_not_refresh() {
        let mut server = MockLotServer::new();
        server
            .expect_exit_vehicle()
            .times(1)
            .returning(|_| Ok(MutationResponse::rejected()));
        server
            .expect_queue_exit()
            .times(1)
            .returning(|_| Ok(MutationResponse::accepted()));
        server.expect_list_vehicles().times(1).returning(|| Ok(vec![]));

        let renders = Arc::new(Mutex::new(Vec::new()));
        let view = recording_view(renders.clone());
        let controller = LotController::new(Arc::new(server), Arc::new(view));

        assert_eq!(
            controller.exit(VehicleId::new(4)).await.unwrap(),
            MutationOutcome::Rejected
        );
        assert_eq!(
            controller.queue_exit(VehicleId::new(4)).await.unwrap(),
            MutationOutcome::Applied
        );
        assert_eq!(renders.lock().unwrap().len(), 1);
    }

    /// Answers the first `/list` slowly with the old lot, later ones at once.
    struct SlowFirstListServer {
        calls: Mutex<u32>,
    }

    #[async_trait::async_trait]
    impl LotServer for SlowFirstListServer {
        async fn list_vehicles(&self) -> Result<Vec<VehicleRecord>, ServerError> {
            let first = {
                let mut calls = self.calls.lock().unwrap();
                *calls += 1;
                *calls == 1
            };
            if first {
                tokio::time::sleep(Duration::from_millis(150)).await;
                Ok(vec![record(1, "OLD", 1)])
            } else {
                Ok(vec![record(2, "NEW", 2)])
            }
        }

        async fn add_vehicle(
            &self,
            _request: &AddVehicleRequest,
        ) -> Result<MutationResponse, ServerError> {
            unimplemented!()
        }

        async fn remove_vehicle(&self, _id: VehicleId) -> Result<MutationResponse, ServerError> {
            unimplemented!()
        }

        async fn queue_exit(&self, _id: VehicleId) -> Result<MutationResponse, ServerError> {
            unimplemented!()
        }

        async fn exit_vehicle(&self, _id: VehicleId) -> Result<MutationResponse, ServerError> {
            unimplemented!()
        }
    }

    #[tokio::test]
    /// A refresh that resolves after a newer one has rendered is dropped.
    async fn test_slow_refresh_does_not_overwrite_newer_board() {
        let server = SlowFirstListServer {
            calls: Mutex::new(0),
        };
        let renders = Arc::new(Mutex::new(Vec::new()));
        let view = recording_view(renders.clone());
        let controller = LotController::new(Arc::new(server), Arc::new(view));

        let slow = {
            let controller = controller.clone();
            tokio::spawn(async move { controller.refresh().await })
        };
        tokio::time::sleep(Duration::from_millis(30)).await;
        let fast = controller.refresh().await.unwrap();
        let slow = slow.await.unwrap().unwrap();

        assert!(matches!(fast, RefreshOutcome::Rendered(_)));
        assert!(matches!(slow, RefreshOutcome::Stale(_)));
        let renders = renders.lock().unwrap();
        assert_eq!(renders.len(), 1);
        assert!(renders[0].contains(VehicleId::new(2)));
        assert!(!renders[0].contains(VehicleId::new(1)));
    }

    #[tokio::test]
    /// A failed refresh is logged instead of propagated.
    async fn test_refresh_failure_is_reported() {
        let mut server = MockLotServer::new();
        server.expect_list_vehicles().returning(|| {
            Err(ServerError::Http {
                status: 500,
                message: "db locked".to_string(),
            })
        });

        let mut view = MockLotView::new();
        view.expect_render().times(0);
        view.expect_notify()
            .withf(|event| {
                event.event_type == EventType::Error
                    && event.log_level == LogLevel::Warn
                    && event.msg.starts_with("Failed to refresh vehicles")
            })
            .times(1)
            .returning(|_| ());

        let controller = LotController::new(Arc::new(server), Arc::new(view));
        controller.refresh_and_report().await;
    }
}
