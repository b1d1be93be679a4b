//! Push notification fan-out.
//!
//! Resolves the owners of an event's target car and hands one push per owner
//! device to the [`PushTransport`]. Every failure is logged and counted in the
//! returned [`DispatchReport`]; none reaches the caller.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, error, info, warn};

use crate::domain::catalog::CatalogEntry;
use crate::domain::ports::{NotificationDispatcher, PushTransport, UserCarRepository};
use crate::domain::{DispatchReport, DispatchStatus, NotificationEvent};

/// Dispatcher sending one push per owner with a registered device.
pub struct PushNotificationDispatcher<O, P: ?Sized> {
    ownership: Arc<O>,
    transport: Arc<P>,
}

impl<O, P: ?Sized> Clone for PushNotificationDispatcher<O, P> {
    fn clone(&self) -> Self {
        Self {
            ownership: Arc::clone(&self.ownership),
            transport: Arc::clone(&self.transport),
        }
    }
}

impl<O, P: ?Sized> PushNotificationDispatcher<O, P> {
    /// Create a dispatcher over the ownership store and a push transport.
    pub fn new(ownership: Arc<O>, transport: Arc<P>) -> Self {
        Self {
            ownership,
            transport,
        }
    }
}

#[async_trait]
impl<O, P> NotificationDispatcher for PushNotificationDispatcher<O, P>
where
    O: UserCarRepository,
    P: PushTransport + ?Sized,
{
    async fn dispatch(&self, event: &NotificationEvent) -> DispatchReport {
        let kind = event.kind.label();
        let owners = match self.ownership.owners_of(event.target_car).await {
            Ok(owners) => owners,
            Err(err) => {
                error!(
                    kind,
                    car_id = %event.target_car,
                    error = %err,
                    code = DispatchStatus::LookupFailed.as_str(),
                    "could not resolve car owners; notification dropped"
                );
                return DispatchReport::unsent(event, DispatchStatus::LookupFailed);
            }
        };

        if owners.is_empty() {
            info!(
                kind,
                car_id = %event.target_car,
                plate = %event.target_plate,
                code = DispatchStatus::CarHasNoOwner.as_str(),
                "car has no owner; nothing to notify"
            );
            return DispatchReport::unsent(event, DispatchStatus::CarHasNoOwner);
        }

        let mut report = DispatchReport::unsent(event, DispatchStatus::Attempted);
        for owner in owners {
            let Some(token) = owner.notification_token().cloned() else {
                debug!(kind, user_id = %owner.id(), "owner has no device token; skipped");
                report.without_token += 1;
                continue;
            };
            let push = event.push_for(owner.id().clone(), token);
            match self.transport.send(&push).await {
                Ok(()) => report.delivered += 1,
                Err(err) => {
                    warn!(kind, user_id = %owner.id(), error = %err, "push delivery failed");
                    report.failed += 1;
                }
            }
        }

        info!(
            kind,
            car_id = %event.target_car,
            delivered = report.delivered,
            failed = report.failed,
            without_token = report.without_token,
            "notification dispatched"
        );
        report
    }
}

#[cfg(test)]
#[path = "notification_dispatcher_tests.rs"]
mod tests;
