//! Driven port delivering push notifications to devices.

use async_trait::async_trait;

use crate::domain::PushNotification;

use super::define_port_error;

define_port_error! {
    /// Delivery failures reported by push transports.
    pub enum PushTransportError {
        /// The provider could not be reached.
        Transport { message: String } => "push transport failed: {message}",
        /// The provider did not answer in time.
        Timeout { message: String } => "push transport timed out: {message}",
        /// The provider answered but refused the notification.
        Rejected { status: u16, message: String } =>
            "push provider rejected notification with status {status}: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PushTransport: Send + Sync {
    /// Hand one notification to the provider. No retries are attempted.
    async fn send(&self, notification: &PushNotification) -> Result<(), PushTransportError>;
}
