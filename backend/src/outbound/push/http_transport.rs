//! Reqwest-backed push transport.
//!
//! Owns transport details only: JSON serialisation, the request timeout and
//! status mapping. Nothing is retried.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};

use super::dto::PushRequestDto;
use crate::domain::PushNotification;
use crate::domain::ports::{PushTransport, PushTransportError};

const USER_AGENT: &str = "unblock-backend-push/0.1";

/// Push transport that POSTs one JSON document per notification.
pub struct HttpPushTransport {
    client: Client,
    endpoint: Url,
}

impl HttpPushTransport {
    /// Build a transport with an explicit request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(endpoint: Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self { client, endpoint })
    }
}

#[async_trait]
impl PushTransport for HttpPushTransport {
    async fn send(&self, notification: &PushNotification) -> Result<(), PushTransportError> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&PushRequestDto::from(notification))
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let body = response.text().await.unwrap_or_default();
        Err(map_status_error(status, &body))
    }
}

fn map_transport_error(error: reqwest::Error) -> PushTransportError {
    if error.is_timeout() {
        PushTransportError::timeout(error.to_string())
    } else {
        PushTransportError::transport(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &str) -> PushTransportError {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let preview: String = body
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .chars()
        .take(PREVIEW_CHAR_LIMIT)
        .collect();

    match status {
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => {
            PushTransportError::timeout(format!("status {}", status.as_u16()))
        }
        _ if status.is_client_error() => PushTransportError::rejected(status.as_u16(), preview),
        _ => PushTransportError::transport(format!("status {}: {preview}", status.as_u16())),
    }
}

#[cfg(test)]
mod tests {
    //! Coverage for the non-network mapping helpers.

    use super::*;
    use crate::domain::catalog::NotificationKind;
    use crate::domain::{NotificationToken, UserId};
    use rstest::rstest;

    #[rstest]
    #[case::gone(StatusCode::GONE, "Rejected")]
    #[case::bad_request(StatusCode::BAD_REQUEST, "Rejected")]
    #[case::gateway_timeout(StatusCode::GATEWAY_TIMEOUT, "Timeout")]
    #[case::server_error(StatusCode::BAD_GATEWAY, "Transport")]
    fn statuses_map_to_transport_errors(#[case] status: StatusCode, #[case] expected: &str) {
        let error = map_status_error(status, "{\"error\": \"unregistered device\"}");
        let variant = match error {
            PushTransportError::Rejected { .. } => "Rejected",
            PushTransportError::Timeout { .. } => "Timeout",
            PushTransportError::Transport { .. } => "Transport",
        };
        assert_eq!(variant, expected);
    }

    #[rstest]
    fn rejection_keeps_status_and_body_preview() {
        let error = map_status_error(StatusCode::GONE, "  device\n  token   expired ");
        assert_eq!(
            error,
            PushTransportError::rejected(410_u16, "device token expired")
        );
    }

    #[rstest]
    fn wire_body_uses_gateway_field_names() {
        let notification = PushNotification {
            recipient: UserId::random(),
            token: NotificationToken::new("device-1").expect("token"),
            kind: NotificationKind::NeedToGo,
            title: NotificationKind::NeedToGo.title(),
            message: "please move".to_owned(),
            sound: NotificationKind::NeedToGo.sound(),
        };

        let body = serde_json::to_value(PushRequestDto::from(&notification)).expect("json");

        assert_eq!(
            body,
            serde_json::json!({
                "token": "device-1",
                "title": "Please move your car",
                "body": "please move",
                "sound": "urgent",
                "kind": "NEED_TO_GO",
            })
        );
    }
}
