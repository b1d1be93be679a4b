//! In-process store backing every repository port.
//!
//! Used when no database URL is configured and by the integration tests.
//! Clones share the same state, so one store can be handed to every service.
//! Each operation takes the lock exactly once, which keeps insert-if-absent
//! atomic.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::catalog::{CatalogEntry, Country};
use crate::domain::ports::{
    BlockingRelationRepository, BlockingRelationRepositoryError, CarRepository,
    CarRepositoryError, UserCarRepository, UserCarRepositoryError, UserRepository,
    UserRepositoryError,
};
use crate::domain::{
    BlockingRelation, Car, CarId, Email, NotificationToken, PlateNumber, RelationKey, User, UserId,
};

const POISONED: &str = "in-memory store lock poisoned";

#[derive(Debug, Default)]
struct StoreState {
    users: HashMap<UserId, User>,
    cars: HashMap<CarId, Car>,
    ownership: HashSet<(UserId, CarId)>,
    relations: BTreeMap<RelationKey, BlockingRelation>,
}

/// Mutex-guarded maps implementing the four persistence ports.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    state: Arc<Mutex<StoreState>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, StoreState>, &'static str> {
        self.state.lock().map_err(|_| POISONED)
    }
}

#[async_trait]
impl CarRepository for InMemoryStore {
    async fn insert(&self, car: &Car) -> Result<(), CarRepositoryError> {
        let mut state = self.lock().map_err(CarRepositoryError::query)?;
        let taken = state
            .cars
            .values()
            .any(|stored| stored.has_natural_key(&car.plate_number, car.country));
        if taken {
            return Err(CarRepositoryError::duplicate_natural_key(
                car.plate_number.as_ref(),
                car.country.to_code(),
            ));
        }
        state.cars.insert(car.id, car.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: CarId) -> Result<Option<Car>, CarRepositoryError> {
        let state = self.lock().map_err(CarRepositoryError::query)?;
        Ok(state.cars.get(&id).cloned())
    }

    async fn find_by_natural_key(
        &self,
        plate_number: &PlateNumber,
        country: Country,
    ) -> Result<Option<Car>, CarRepositoryError> {
        let state = self.lock().map_err(CarRepositoryError::query)?;
        Ok(state
            .cars
            .values()
            .find(|car| car.has_natural_key(plate_number, country))
            .cloned())
    }

    async fn find_by_ids(&self, ids: &[CarId]) -> Result<Vec<Car>, CarRepositoryError> {
        let state = self.lock().map_err(CarRepositoryError::query)?;
        let wanted: HashSet<CarId> = ids.iter().copied().collect();
        let mut cars: Vec<Car> = wanted
            .iter()
            .filter_map(|id| state.cars.get(id).cloned())
            .collect();
        cars.sort_by(|a, b| a.plate_number.cmp(&b.plate_number));
        Ok(cars)
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn insert(&self, user: &User) -> Result<(), UserRepositoryError> {
        let mut state = self.lock().map_err(UserRepositoryError::query)?;
        if state.users.values().any(|stored| stored.email() == user.email()) {
            return Err(UserRepositoryError::duplicate_email(user.email().as_ref()));
        }
        state.users.insert(user.id().clone(), user.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserRepositoryError> {
        let state = self.lock().map_err(UserRepositoryError::query)?;
        Ok(state.users.get(id).cloned())
    }

    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, UserRepositoryError> {
        let state = self.lock().map_err(UserRepositoryError::query)?;
        Ok(state
            .users
            .values()
            .find(|user| user.email() == email)
            .cloned())
    }

    async fn set_notification_token(
        &self,
        id: &UserId,
        token: Option<NotificationToken>,
    ) -> Result<Option<User>, UserRepositoryError> {
        let mut state = self.lock().map_err(UserRepositoryError::query)?;
        let Some(stored) = state.users.remove(id) else {
            return Ok(None);
        };
        let updated = stored.with_notification_token(token);
        state.users.insert(id.clone(), updated.clone());
        Ok(Some(updated))
    }
}

#[async_trait]
impl UserCarRepository for InMemoryStore {
    async fn link(&self, user: &UserId, car: CarId) -> Result<bool, UserCarRepositoryError> {
        let mut state = self.lock().map_err(UserCarRepositoryError::query)?;
        Ok(state.ownership.insert((user.clone(), car)))
    }

    async fn owners_of(&self, car: CarId) -> Result<Vec<User>, UserCarRepositoryError> {
        let state = self.lock().map_err(UserCarRepositoryError::query)?;
        let mut owners: Vec<User> = state
            .ownership
            .iter()
            .filter(|(_, owned)| *owned == car)
            .filter_map(|(user, _)| state.users.get(user).cloned())
            .collect();
        owners.sort_by(|a, b| a.display_name().cmp(b.display_name()));
        Ok(owners)
    }

    async fn cars_of(&self, user: &UserId) -> Result<Vec<Car>, UserCarRepositoryError> {
        let state = self.lock().map_err(UserCarRepositoryError::query)?;
        let mut cars: Vec<Car> = state
            .ownership
            .iter()
            .filter(|(owner, _)| owner == user)
            .filter_map(|(_, car)| state.cars.get(car).cloned())
            .collect();
        cars.sort_by(|a, b| a.plate_number.cmp(&b.plate_number));
        Ok(cars)
    }
}

#[async_trait]
impl BlockingRelationRepository for InMemoryStore {
    async fn insert(
        &self,
        relation: &BlockingRelation,
    ) -> Result<(), BlockingRelationRepositoryError> {
        let mut state = self.lock().map_err(BlockingRelationRepositoryError::query)?;
        if state.relations.contains_key(&relation.key()) {
            return Err(BlockingRelationRepositoryError::duplicate());
        }
        state.relations.insert(relation.key(), *relation);
        Ok(())
    }

    async fn find(
        &self,
        key: RelationKey,
    ) -> Result<Option<BlockingRelation>, BlockingRelationRepositoryError> {
        let state = self.lock().map_err(BlockingRelationRepositoryError::query)?;
        Ok(state.relations.get(&key).copied())
    }

    async fn delete(&self, key: RelationKey) -> Result<bool, BlockingRelationRepositoryError> {
        let mut state = self.lock().map_err(BlockingRelationRepositoryError::query)?;
        Ok(state.relations.remove(&key).is_some())
    }

    async fn involving(
        &self,
        car: CarId,
    ) -> Result<Vec<BlockingRelation>, BlockingRelationRepositoryError> {
        let state = self.lock().map_err(BlockingRelationRepositoryError::query)?;
        let mut relations: Vec<BlockingRelation> = state
            .relations
            .values()
            .filter(|relation| relation.key().involves(car))
            .copied()
            .collect();
        relations.sort_by_key(BlockingRelation::created_at);
        Ok(relations)
    }
}
