//! Directed blocking relations between cars.
//!
//! An edge `blocking -> blocked` records that the blocking car stands in the
//! way of the blocked car. Which side a car is on is derived from the edge;
//! nothing else stores it.

use chrono::{DateTime, Utc};

use super::{Car, CarId};
use crate::domain::notification::DispatchReport;

/// Error raised when an edge would connect a car to itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("a car cannot block itself")]
pub struct SelfBlockError;

/// Ordered pair identifying an edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RelationKey {
    blocking: CarId,
    blocked: CarId,
}

impl RelationKey {
    /// Build a key, rejecting self loops.
    ///
    /// # Examples
    /// ```
    /// use unblock::domain::{CarId, RelationKey};
    ///
    /// let car = CarId::random();
    /// assert!(RelationKey::new(car, car).is_err());
    /// ```
    pub fn new(blocking: CarId, blocked: CarId) -> Result<Self, SelfBlockError> {
        if blocking == blocked {
            return Err(SelfBlockError);
        }
        Ok(Self { blocking, blocked })
    }

    pub fn blocking(&self) -> CarId {
        self.blocking
    }

    pub fn blocked(&self) -> CarId {
        self.blocked
    }

    /// Whether `car` is either endpoint.
    pub fn involves(&self, car: CarId) -> bool {
        self.blocking == car || self.blocked == car
    }
}

/// Side of an edge a car is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Situation {
    /// The car stands in the way of the counterpart.
    IsBlocking,
    /// The car is stuck behind the counterpart.
    IsBlocked,
}

impl Situation {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::IsBlocking => "isBlocking",
            Self::IsBlocked => "isBlocked",
        }
    }
}

/// A persisted blocking edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockingRelation {
    key: RelationKey,
    created_at: DateTime<Utc>,
}

impl BlockingRelation {
    pub fn new(key: RelationKey, created_at: DateTime<Utc>) -> Self {
        Self { key, created_at }
    }

    pub fn key(&self) -> RelationKey {
        self.key
    }

    pub fn blocking(&self) -> CarId {
        self.key.blocking
    }

    pub fn blocked(&self) -> CarId {
        self.key.blocked
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Situation of `car` on this edge, or `None` when it is not an endpoint.
    pub fn situation_of(&self, car: CarId) -> Option<Situation> {
        if car == self.key.blocking {
            Some(Situation::IsBlocking)
        } else if car == self.key.blocked {
            Some(Situation::IsBlocked)
        } else {
            None
        }
    }
}

/// Both directions of the graph around one car.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CarRelations {
    /// Cars this car blocks.
    pub blocking: Vec<Car>,
    /// Cars blocking this car.
    pub blocked_by: Vec<Car>,
}

impl CarRelations {
    pub fn is_empty(&self) -> bool {
        self.blocking.is_empty() && self.blocked_by.is_empty()
    }
}

/// Result of a successful graph mutation together with its notification
/// fan-out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationChange {
    pub relation: BlockingRelation,
    pub notifications: Vec<DispatchReport>,
}
