//! Driving port for mutating the blocking graph.

use async_trait::async_trait;
use serde_json::json;

use crate::domain::{CarId, DispatchReport, Error, RelationChange};

use super::define_port_error;

define_port_error! {
    /// Failures raised by the blocking relation graph.
    pub enum BlockingRelationError {
        /// Both ends of the requested edge are the same car.
        SelfBlock => "a car cannot block itself",
        /// A referenced car does not exist.
        UnknownCar { car_id: String } => "car {car_id} is not registered",
        /// The edge already exists.
        DuplicateRelation { blocking: String, blocked: String } =>
            "car {blocking} is already recorded as blocking {blocked}",
        /// The edge to remove does not exist.
        NotFound { blocking: String, blocked: String } =>
            "car {blocking} is not recorded as blocking {blocked}",
        /// The store is unreachable.
        StoreUnavailable { operation: String, message: String } =>
            "{operation}: store unavailable: {message}",
        /// The store failed while executing the operation.
        StoreFailure { operation: String, message: String } =>
            "{operation}: store failure: {message}",
    }
}

impl From<BlockingRelationError> for Error {
    fn from(value: BlockingRelationError) -> Self {
        let message = value.to_string();
        match value {
            BlockingRelationError::SelfBlock => {
                Self::invalid_request(message).with_details(json!({ "code": "self_block" }))
            }
            BlockingRelationError::UnknownCar { car_id } => Self::invalid_request(message)
                .with_details(json!({ "code": "unknown_car", "carId": car_id })),
            BlockingRelationError::DuplicateRelation { .. } => {
                Self::conflict(message).with_details(json!({ "code": "duplicate_relation" }))
            }
            BlockingRelationError::NotFound { .. } => Self::not_found(message),
            BlockingRelationError::StoreUnavailable { .. } => Self::service_unavailable(message),
            BlockingRelationError::StoreFailure { .. } => Self::internal(message),
        }
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BlockingRelationsCommand: Send + Sync {
    /// Record that `blocking` blocks `blocked`, then notify both sides.
    async fn create_relation(
        &self,
        blocking: CarId,
        blocked: CarId,
    ) -> Result<RelationChange, BlockingRelationError>;

    /// Delete the edge, then tell the blocked side it may leave.
    async fn remove_relation(
        &self,
        blocking: CarId,
        blocked: CarId,
    ) -> Result<RelationChange, BlockingRelationError>;

    /// Ask the owners of every car blocking `car` to move.
    async fn request_release(&self, car: CarId)
    -> Result<Vec<DispatchReport>, BlockingRelationError>;
}
