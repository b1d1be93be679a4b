//! Reqwest-backed identity verifier using a "tokeninfo" style endpoint.
//!
//! The provider is called as `GET {endpoint}?id_token={token}` and must answer
//! with `{"email": "...", "name": "..."}` for valid tokens.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::Deserialize;

use crate::domain::ports::{IdentityVerifier, IdentityVerifierError};
use crate::domain::{LoginCredentials, VerifiedIdentity};

#[derive(Debug, Deserialize)]
struct TokenInfoDto {
    email: String,
    #[serde(default)]
    name: Option<String>,
}

/// Verifier that asks the identity provider to introspect the token.
pub struct TokenInfoIdentityVerifier {
    client: Client,
    endpoint: Url,
}

impl TokenInfoIdentityVerifier {
    /// Build a verifier with an explicit request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(endpoint: Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, endpoint })
    }
}

#[async_trait]
impl IdentityVerifier for TokenInfoIdentityVerifier {
    async fn verify(
        &self,
        credentials: &LoginCredentials,
    ) -> Result<VerifiedIdentity, IdentityVerifierError> {
        let response = self
            .client
            .get(self.endpoint.clone())
            .query(&[("id_token", credentials.id_token())])
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|error| IdentityVerifierError::unavailable(error.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(map_status_error(status));
        }
        let body = response
            .bytes()
            .await
            .map_err(|error| IdentityVerifierError::unavailable(error.to_string()))?;
        parse_identity(body.as_ref())
    }
}

fn map_status_error(status: StatusCode) -> IdentityVerifierError {
    if status.is_client_error() {
        IdentityVerifierError::rejected(format!("status {}", status.as_u16()))
    } else {
        IdentityVerifierError::unavailable(format!("status {}", status.as_u16()))
    }
}

fn parse_identity(body: &[u8]) -> Result<VerifiedIdentity, IdentityVerifierError> {
    let decoded: TokenInfoDto = serde_json::from_slice(body).map_err(|error| {
        IdentityVerifierError::unavailable(format!("invalid tokeninfo payload: {error}"))
    })?;
    let name = decoded
        .name
        .filter(|name| !name.trim().is_empty())
        .unwrap_or_else(|| local_part(&decoded.email).to_owned());
    VerifiedIdentity::try_from_parts(&decoded.email, &name)
        .map_err(|error| IdentityVerifierError::rejected(error.to_string()))
}

fn local_part(email: &str) -> &str {
    email.split('@').next().unwrap_or(email)
}
