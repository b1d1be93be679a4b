//! Push transport that only records what would have been sent.

use async_trait::async_trait;
use tracing::info;

use crate::domain::PushNotification;
use crate::domain::catalog::CatalogEntry;
use crate::domain::ports::{PushTransport, PushTransportError};

/// Development transport; every notification is logged and reported as sent.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingPushTransport;

#[async_trait]
impl PushTransport for LoggingPushTransport {
    async fn send(&self, notification: &PushNotification) -> Result<(), PushTransportError> {
        info!(
            user_id = %notification.recipient,
            kind = notification.kind.label(),
            title = notification.title,
            body = %notification.message,
            "push notification (logging transport)"
        );
        Ok(())
    }
}
