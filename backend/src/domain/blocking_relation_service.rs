//! Blocking relation graph service.
//!
//! Validates edges against the car registry, persists them, then hands the
//! resulting events to the [`NotificationDispatcher`]. The write always
//! completes before dispatch starts and dispatch outcomes never undo it.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::info;

use crate::domain::catalog::NotificationKind;
use crate::domain::ports::{
    BlockingRelationError, BlockingRelationRepository, BlockingRelationRepositoryError,
    BlockingRelationsCommand, BlockingRelationsQuery, CarRepository, CarRepositoryError,
    NotificationDispatcher,
};
use crate::domain::{
    BlockingRelation, Car, CarId, CarRelations, DispatchReport, NotificationEvent,
    RelationChange, RelationKey,
};

/// Blocking relation service implementing [`BlockingRelationsCommand`] and
/// [`BlockingRelationsQuery`].
#[derive(Clone)]
pub struct BlockingRelationService<C, R> {
    cars: Arc<C>,
    relations: Arc<R>,
    dispatcher: Arc<dyn NotificationDispatcher>,
    clock: Arc<dyn Clock>,
}

impl<C, R> BlockingRelationService<C, R> {
    /// Create a new service.
    pub fn new(
        cars: Arc<C>,
        relations: Arc<R>,
        dispatcher: Arc<dyn NotificationDispatcher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            cars,
            relations,
            dispatcher,
            clock,
        }
    }
}

fn map_car_error(
    operation: &'static str,
) -> impl FnOnce(CarRepositoryError) -> BlockingRelationError {
    move |error| match error {
        CarRepositoryError::Connection { message } => {
            BlockingRelationError::store_unavailable(operation, message)
        }
        CarRepositoryError::Query { message } => {
            BlockingRelationError::store_failure(operation, message)
        }
        other @ CarRepositoryError::DuplicateNaturalKey { .. } => {
            BlockingRelationError::store_failure(operation, other.to_string())
        }
    }
}

fn map_listing_error(
    operation: &'static str,
) -> impl FnOnce(BlockingRelationRepositoryError) -> BlockingRelationError {
    move |error| match error {
        BlockingRelationRepositoryError::Connection { message } => {
            BlockingRelationError::store_unavailable(operation, message)
        }
        other => BlockingRelationError::store_failure(operation, other.to_string()),
    }
}

fn map_relation_error(
    operation: &'static str,
    key: RelationKey,
) -> impl FnOnce(BlockingRelationRepositoryError) -> BlockingRelationError {
    move |error| match error {
        BlockingRelationRepositoryError::Connection { message } => {
            BlockingRelationError::store_unavailable(operation, message)
        }
        BlockingRelationRepositoryError::Query { message } => {
            BlockingRelationError::store_failure(operation, message)
        }
        BlockingRelationRepositoryError::Duplicate => BlockingRelationError::duplicate_relation(
            key.blocking().to_string(),
            key.blocked().to_string(),
        ),
    }
}

impl<C, R> BlockingRelationService<C, R>
where
    C: CarRepository,
    R: BlockingRelationRepository,
{
    async fn require_car(
        &self,
        car: CarId,
        operation: &'static str,
    ) -> Result<Car, BlockingRelationError> {
        self.cars
            .find_by_id(car)
            .await
            .map_err(map_car_error(operation))?
            .ok_or_else(|| BlockingRelationError::unknown_car(car.to_string()))
    }

    /// Resolve both ends of `key` in one lookup.
    async fn endpoints(
        &self,
        key: RelationKey,
        operation: &'static str,
    ) -> Result<(Car, Car), BlockingRelationError> {
        let cars = self
            .cars
            .find_by_ids(&[key.blocking(), key.blocked()])
            .await
            .map_err(map_car_error(operation))?;
        let mut by_id: HashMap<CarId, Car> = cars.into_iter().map(|car| (car.id, car)).collect();
        let blocking = by_id
            .remove(&key.blocking())
            .ok_or_else(|| BlockingRelationError::unknown_car(key.blocking().to_string()))?;
        let blocked = by_id
            .remove(&key.blocked())
            .ok_or_else(|| BlockingRelationError::unknown_car(key.blocked().to_string()))?;
        Ok((blocking, blocked))
    }

    async fn dispatch(
        &self,
        kind: NotificationKind,
        target: &Car,
        counterpart: &Car,
    ) -> DispatchReport {
        let event = NotificationEvent::new(kind, target, counterpart);
        self.dispatcher.dispatch(&event).await
    }
}

#[async_trait]
impl<C, R> BlockingRelationsCommand for BlockingRelationService<C, R>
where
    C: CarRepository,
    R: BlockingRelationRepository,
{
    async fn create_relation(
        &self,
        blocking: CarId,
        blocked: CarId,
    ) -> Result<RelationChange, BlockingRelationError> {
        const OPERATION: &str = "create_relation";

        let key =
            RelationKey::new(blocking, blocked).map_err(|_| BlockingRelationError::self_block())?;
        let blocking_car = self.require_car(blocking, OPERATION).await?;
        let blocked_car = self.require_car(blocked, OPERATION).await?;

        if self
            .relations
            .find(key)
            .await
            .map_err(map_relation_error(OPERATION, key))?
            .is_some()
        {
            return Err(BlockingRelationError::duplicate_relation(
                blocking.to_string(),
                blocked.to_string(),
            ));
        }

        let relation = BlockingRelation::new(key, self.clock.utc());
        self.relations
            .insert(&relation)
            .await
            .map_err(map_relation_error(OPERATION, key))?;
        info!(
            blocking = %blocking_car.plate_number,
            blocked = %blocked_car.plate_number,
            "blocking relation created"
        );

        let notifications = vec![
            self.dispatch(NotificationKind::BeenBlocked, &blocked_car, &blocking_car)
                .await,
            self.dispatch(NotificationKind::BeenBlocking, &blocking_car, &blocked_car)
                .await,
        ];
        Ok(RelationChange {
            relation,
            notifications,
        })
    }

    async fn remove_relation(
        &self,
        blocking: CarId,
        blocked: CarId,
    ) -> Result<RelationChange, BlockingRelationError> {
        const OPERATION: &str = "remove_relation";

        let not_found =
            || BlockingRelationError::not_found(blocking.to_string(), blocked.to_string());
        let key = RelationKey::new(blocking, blocked).map_err(|_| not_found())?;
        let relation = self
            .relations
            .find(key)
            .await
            .map_err(map_relation_error(OPERATION, key))?
            .ok_or_else(not_found)?;
        let (blocking_car, blocked_car) = self.endpoints(key, OPERATION).await?;

        let removed = self
            .relations
            .delete(key)
            .await
            .map_err(map_relation_error(OPERATION, key))?;
        if !removed {
            return Err(not_found());
        }
        info!(
            blocking = %blocking_car.plate_number,
            blocked = %blocked_car.plate_number,
            "blocking relation removed"
        );

        let notifications = vec![
            self.dispatch(NotificationKind::FreeToGo, &blocked_car, &blocking_car)
                .await,
        ];
        Ok(RelationChange {
            relation,
            notifications,
        })
    }

    async fn request_release(
        &self,
        car: CarId,
    ) -> Result<Vec<DispatchReport>, BlockingRelationError> {
        const OPERATION: &str = "request_release";

        let requester = self.require_car(car, OPERATION).await?;
        let blockers: Vec<CarId> = self
            .relations
            .involving(car)
            .await
            .map_err(map_listing_error(OPERATION))?
            .into_iter()
            .filter(|relation| relation.blocked() == car)
            .map(|relation| relation.blocking())
            .collect();
        if blockers.is_empty() {
            return Ok(Vec::new());
        }

        let blocking_cars = self
            .cars
            .find_by_ids(&blockers)
            .await
            .map_err(map_car_error(OPERATION))?;
        let mut reports = Vec::with_capacity(blocking_cars.len());
        for blocker in &blocking_cars {
            reports.push(
                self.dispatch(NotificationKind::NeedToGo, blocker, &requester)
                    .await,
            );
        }
        info!(
            car = %requester.plate_number,
            blockers = reports.len(),
            "release requested"
        );
        Ok(reports)
    }
}

#[async_trait]
impl<C, R> BlockingRelationsQuery for BlockingRelationService<C, R>
where
    C: CarRepository,
    R: BlockingRelationRepository,
{
    async fn relations_involving(&self, car: CarId) -> Result<CarRelations, BlockingRelationError> {
        const OPERATION: &str = "relations_involving";

        self.require_car(car, OPERATION).await?;
        let edges = self
            .relations
            .involving(car)
            .await
            .map_err(map_listing_error(OPERATION))?;
        if edges.is_empty() {
            return Ok(CarRelations::default());
        }

        let counterpart_ids: Vec<CarId> = edges
            .iter()
            .map(|edge| {
                if edge.blocking() == car {
                    edge.blocked()
                } else {
                    edge.blocking()
                }
            })
            .collect();
        let counterparts: HashMap<CarId, Car> = self
            .cars
            .find_by_ids(&counterpart_ids)
            .await
            .map_err(map_car_error(OPERATION))?
            .into_iter()
            .map(|counterpart| (counterpart.id, counterpart))
            .collect();

        let mut relations = CarRelations::default();
        for edge in &edges {
            if edge.blocking() == car {
                if let Some(other) = counterparts.get(&edge.blocked()) {
                    relations.blocking.push(other.clone());
                }
            } else if let Some(other) = counterparts.get(&edge.blocking()) {
                relations.blocked_by.push(other.clone());
            }
        }
        relations
            .blocking
            .sort_by(|a, b| a.plate_number.cmp(&b.plate_number));
        relations
            .blocked_by
            .sort_by(|a, b| a.plate_number.cmp(&b.plate_number));
        Ok(relations)
    }
}

#[cfg(test)]
#[path = "blocking_relation_service_tests.rs"]
mod tests;
