//! PostgreSQL-backed `BlockingRelationRepository`.
//!
//! Removal is a hard delete; the table only ever holds active edges.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{BlockingRelationRepository, BlockingRelationRepositoryError};
use crate::domain::{BlockingRelation, CarId, RelationKey};

use super::diesel_error_mapping::{StoreFailure, classify_diesel_error};
use super::models::BlockingRelationRow;
use super::pool::{DbPool, PoolError};
use super::schema::blocking_relations;

/// Diesel implementation of the [`BlockingRelationRepository`] port.
#[derive(Clone)]
pub struct DieselBlockingRelationRepository {
    pool: DbPool,
}

impl DieselBlockingRelationRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> BlockingRelationRepositoryError {
    BlockingRelationRepositoryError::connection(error.into_message())
}

fn map_diesel_error(
    operation: &'static str,
) -> impl FnOnce(diesel::result::Error) -> BlockingRelationRepositoryError {
    move |error| match classify_diesel_error(error, operation) {
        StoreFailure::Connection(message) => BlockingRelationRepositoryError::connection(message),
        StoreFailure::UniqueViolation(_) => BlockingRelationRepositoryError::duplicate(),
        StoreFailure::Query(message) => BlockingRelationRepositoryError::query(message),
    }
}

fn to_relation(
    row: BlockingRelationRow,
) -> Result<BlockingRelation, BlockingRelationRepositoryError> {
    BlockingRelation::try_from(row).map_err(BlockingRelationRepositoryError::query)
}

#[async_trait]
impl BlockingRelationRepository for DieselBlockingRelationRepository {
    async fn insert(
        &self,
        relation: &BlockingRelation,
    ) -> Result<(), BlockingRelationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::insert_into(blocking_relations::table)
            .values(BlockingRelationRow::from(relation))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error("insert_relation"))
    }

    async fn find(
        &self,
        key: RelationKey,
    ) -> Result<Option<BlockingRelation>, BlockingRelationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<BlockingRelationRow> = blocking_relations::table
            .filter(blocking_relations::blocking_car_id.eq(key.blocking().as_uuid()))
            .filter(blocking_relations::blocked_car_id.eq(key.blocked().as_uuid()))
            .select(BlockingRelationRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error("find_relation"))?;

        row.map(to_relation).transpose()
    }

    async fn delete(&self, key: RelationKey) -> Result<bool, BlockingRelationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let deleted = diesel::delete(
            blocking_relations::table
                .filter(blocking_relations::blocking_car_id.eq(key.blocking().as_uuid()))
                .filter(blocking_relations::blocked_car_id.eq(key.blocked().as_uuid())),
        )
        .execute(&mut conn)
        .await
        .map_err(map_diesel_error("delete_relation"))?;

        Ok(deleted > 0)
    }

    async fn involving(
        &self,
        car: CarId,
    ) -> Result<Vec<BlockingRelation>, BlockingRelationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<BlockingRelationRow> = blocking_relations::table
            .filter(
                blocking_relations::blocking_car_id
                    .eq(car.as_uuid())
                    .or(blocking_relations::blocked_car_id.eq(car.as_uuid())),
            )
            .select(BlockingRelationRow::as_select())
            .order_by(blocking_relations::created_at.asc())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error("relations_involving"))?;

        rows.into_iter().map(to_relation).collect()
    }
}
