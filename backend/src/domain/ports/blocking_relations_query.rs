//! Driving port for reading the blocking graph.

use async_trait::async_trait;

use crate::domain::{CarId, CarRelations};

use super::BlockingRelationError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BlockingRelationsQuery: Send + Sync {
    /// Cars `car` blocks and cars blocking `car`.
    async fn relations_involving(&self, car: CarId) -> Result<CarRelations, BlockingRelationError>;
}
