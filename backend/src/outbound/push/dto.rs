//! Wire body posted to the push gateway.

use serde::Serialize;

use crate::domain::PushNotification;
use crate::domain::catalog::CatalogEntry;

#[derive(Debug, Serialize)]
pub(super) struct PushRequestDto<'a> {
    pub(super) token: &'a str,
    pub(super) title: &'a str,
    pub(super) body: &'a str,
    pub(super) sound: &'a str,
    pub(super) kind: &'static str,
}

impl<'a> From<&'a PushNotification> for PushRequestDto<'a> {
    fn from(notification: &'a PushNotification) -> Self {
        Self {
            token: notification.token.as_ref(),
            title: notification.title,
            body: notification.message.as_str(),
            sound: notification.sound,
            kind: notification.kind.label(),
        }
    }
}
