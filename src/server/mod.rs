use crate::lot::{VehicleId, VehicleRecord};
use crate::server::error::ServerError;
use crate::server::messages::{AddVehicleRequest, MutationResponse};

pub(crate) mod client;
pub use client::LotServerClient;
pub mod error;
pub mod messages;

#[cfg(test)]
use mockall::automock;

#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait LotServer: Send + Sync {
    /// Fetches every parked vehicle.
    async fn list_vehicles(&self) -> Result<Vec<VehicleRecord>, ServerError>;

    /// Parks a new vehicle.
    async fn add_vehicle(
        &self,
        request: &AddVehicleRequest,
    ) -> Result<MutationResponse, ServerError>;

    /// Removes a vehicle regardless of its exit-queue position.
    async fn remove_vehicle(&self, id: VehicleId) -> Result<MutationResponse, ServerError>;

    /// Appends a vehicle to its machine's exit queue.
    async fn queue_exit(&self, id: VehicleId) -> Result<MutationResponse, ServerError>;

    /// Releases a vehicle. The server only honors this for the head of the exit queue.
    async fn exit_vehicle(&self, id: VehicleId) -> Result<MutationResponse, ServerError>;
}
