//! Driven port verifying identity-provider tokens presented at login.

use async_trait::async_trait;

use crate::domain::{DisplayName, LoginCredentials, VerifiedIdentity};

use super::define_port_error;

define_port_error! {
    /// Failures raised by identity verifiers.
    pub enum IdentityVerifierError {
        /// The token is invalid, expired, or issued for someone else.
        Rejected { message: String } => "identity token rejected: {message}",
        /// The identity provider could not be consulted.
        Unavailable { message: String } => "identity provider unavailable: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentityVerifier: Send + Sync {
    /// Verify the token in `credentials` and return the identity it proves.
    async fn verify(
        &self,
        credentials: &LoginCredentials,
    ) -> Result<VerifiedIdentity, IdentityVerifierError>;
}

/// Token accepted by [`FixtureIdentityVerifier`].
pub const FIXTURE_ID_TOKEN: &str = "dev-id-token";

/// Development verifier used when no identity provider is configured.
///
/// Accepts [`FIXTURE_ID_TOKEN`] for any email and names the user after the
/// email's local part.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureIdentityVerifier;

#[async_trait]
impl IdentityVerifier for FixtureIdentityVerifier {
    async fn verify(
        &self,
        credentials: &LoginCredentials,
    ) -> Result<VerifiedIdentity, IdentityVerifierError> {
        if credentials.id_token() != FIXTURE_ID_TOKEN {
            return Err(IdentityVerifierError::rejected("unknown development token"));
        }
        let email = credentials.email().clone();
        let local_part = email.as_ref().split('@').next().unwrap_or_default();
        let display_name = DisplayName::new(local_part)
            .map_err(|err| IdentityVerifierError::rejected(err.to_string()))?;
        Ok(VerifiedIdentity {
            email,
            display_name,
        })
    }
}
