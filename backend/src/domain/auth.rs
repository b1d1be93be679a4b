//! Login credentials and verified identities.
//!
//! Users sign in with an identity-provider token. The backend never inspects
//! the token itself; it hands it to an [`IdentityVerifier`] and trusts the
//! identity that comes back.
//!
//! [`IdentityVerifier`]: crate::domain::ports::IdentityVerifier

use std::fmt;

use zeroize::Zeroizing;

use super::{DisplayName, Email, UserValidationError};

/// Domain error returned when login payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoginValidationError {
    /// Email was missing or malformed.
    #[error("email must look like local@domain")]
    InvalidEmail,
    /// Identity token was blank.
    #[error("id token must not be empty")]
    EmptyIdToken,
}

/// Validated login request.
///
/// ## Invariants
/// - `email` is normalised.
/// - `id_token` is non-empty and wiped from memory on drop.
///
/// # Examples
/// ```
/// use unblock::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts("dana@example.org", "token").unwrap();
/// assert_eq!(creds.email().as_ref(), "dana@example.org");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    email: Email,
    id_token: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw inputs.
    pub fn try_from_parts(email: &str, id_token: &str) -> Result<Self, LoginValidationError> {
        let email = Email::new(email).map_err(|_| LoginValidationError::InvalidEmail)?;
        let token = id_token.trim();
        if token.is_empty() {
            return Err(LoginValidationError::EmptyIdToken);
        }
        Ok(Self {
            email,
            id_token: Zeroizing::new(token.to_owned()),
        })
    }

    /// Email the caller claims to own.
    pub fn email(&self) -> &Email {
        &self.email
    }

    /// Identity-provider token proving the claim.
    pub fn id_token(&self) -> &str {
        self.id_token.as_str()
    }
}

impl fmt::Debug for LoginCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginCredentials")
            .field("email", &self.email)
            .field("id_token", &"<redacted>")
            .finish()
    }
}

/// Identity asserted by the identity provider for a token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedIdentity {
    pub email: Email,
    pub display_name: DisplayName,
}

impl VerifiedIdentity {
    /// Build an identity from raw provider fields.
    pub fn try_from_parts(email: &str, display_name: &str) -> Result<Self, UserValidationError> {
        Ok(Self {
            email: Email::new(email)?,
            display_name: DisplayName::new(display_name)?,
        })
    }
}
