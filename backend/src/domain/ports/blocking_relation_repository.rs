//! Port for persisting blocking edges.

use async_trait::async_trait;

use crate::domain::{BlockingRelation, CarId, RelationKey};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by blocking relation adapters.
    pub enum BlockingRelationRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "blocking relation repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "blocking relation repository query failed: {message}",
        /// The edge is already stored.
        Duplicate => "blocking relation already exists",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BlockingRelationRepository: Send + Sync {
    /// Store a new edge; [`BlockingRelationRepositoryError::Duplicate`] when
    /// the same ordered pair is already stored.
    async fn insert(&self, relation: &BlockingRelation)
    -> Result<(), BlockingRelationRepositoryError>;

    /// Fetch the edge for an ordered pair.
    async fn find(
        &self,
        key: RelationKey,
    ) -> Result<Option<BlockingRelation>, BlockingRelationRepositoryError>;

    /// Delete the edge, returning whether one was removed.
    async fn delete(&self, key: RelationKey) -> Result<bool, BlockingRelationRepositoryError>;

    /// Every edge with `car` at either end.
    async fn involving(
        &self,
        car: CarId,
    ) -> Result<Vec<BlockingRelation>, BlockingRelationRepositoryError>;
}
