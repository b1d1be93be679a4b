//! Port the blocking relation service uses to notify car owners.
//!
//! Dispatch is best effort: implementations report what happened but never
//! fail, so a graph mutation is never rolled back because a push failed.

use async_trait::async_trait;

use crate::domain::{DispatchReport, NotificationEvent};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NotificationDispatcher: Send + Sync {
    /// Fan `event` out to every owner of its target car.
    async fn dispatch(&self, event: &NotificationEvent) -> DispatchReport;
}
