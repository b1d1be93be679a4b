//! User identity, contact, and push registration.

use std::fmt;

use uuid::Uuid;

/// Validation errors raised while constructing user values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserValidationError {
    #[error("user id must not be empty")]
    EmptyId,
    #[error("user id must be a valid UUID")]
    InvalidId,
    #[error("display name must not be empty")]
    EmptyDisplayName,
    #[error("display name must be at most {max} characters")]
    DisplayNameTooLong { max: usize },
    #[error("email must look like local@domain")]
    InvalidEmail,
    #[error("notification token must not be empty")]
    EmptyNotificationToken,
}

/// Stable user identifier stored as a UUID.
///
/// The original textual form is kept so ids round-trip through session
/// cookies unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UserId(Uuid, String);

impl UserId {
    /// Validate and construct a [`UserId`] from borrowed input.
    pub fn new(id: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let raw = id.as_ref();
        if raw.is_empty() {
            return Err(UserValidationError::EmptyId);
        }
        if raw.trim() != raw {
            return Err(UserValidationError::InvalidId);
        }
        let parsed = Uuid::parse_str(raw).map_err(|_| UserValidationError::InvalidId)?;
        Ok(Self(parsed, raw.to_owned()))
    }

    /// Wrap an existing UUID.
    pub fn from_uuid(id: Uuid) -> Self {
        Self(id, id.to_string())
    }

    /// Generate a new random [`UserId`].
    pub fn random() -> Self {
        Self::from_uuid(Uuid::new_v4())
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        self.1.as_str()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

/// Maximum allowed length for a display name.
pub const DISPLAY_NAME_MAX: usize = 64;

/// Human readable name shown to other drivers.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct DisplayName(String);

impl DisplayName {
    /// Validate and construct a display name, trimming surrounding whitespace.
    pub fn new(display_name: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let trimmed = display_name.as_ref().trim();
        if trimmed.is_empty() {
            return Err(UserValidationError::EmptyDisplayName);
        }
        if trimmed.chars().count() > DISPLAY_NAME_MAX {
            return Err(UserValidationError::DisplayNameTooLong {
                max: DISPLAY_NAME_MAX,
            });
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for DisplayName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for DisplayName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Login email, normalised to lowercase.
///
/// # Examples
/// ```
/// use unblock::domain::Email;
///
/// let email = Email::new(" Dana@Example.org ").expect("valid email");
/// assert_eq!(email.as_ref(), "dana@example.org");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Email(String);

impl Email {
    /// Validate and normalise an email address.
    pub fn new(email: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let normalised = email.as_ref().trim().to_lowercase();
        let mut parts = normalised.split('@');
        let well_formed = match (parts.next(), parts.next(), parts.next()) {
            (Some(local), Some(domain), None) => {
                !local.is_empty() && !domain.is_empty() && !normalised.contains(char::is_whitespace)
            }
            _ => false,
        };
        if !well_formed {
            return Err(UserValidationError::InvalidEmail);
        }
        Ok(Self(normalised))
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Device token the push provider uses to address a user's phone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationToken(String);

impl NotificationToken {
    /// Validate and construct a push token.
    pub fn new(token: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let trimmed = token.as_ref().trim();
        if trimmed.is_empty() {
            return Err(UserValidationError::EmptyNotificationToken);
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for NotificationToken {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

/// Application user.
///
/// ## Invariants
/// - `email` is unique across users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: UserId,
    display_name: DisplayName,
    email: Email,
    notification_token: Option<NotificationToken>,
}

impl User {
    /// Build a user without a push registration.
    pub fn new(id: UserId, display_name: DisplayName, email: Email) -> Self {
        Self {
            id,
            display_name,
            email,
            notification_token: None,
        }
    }

    /// Attach (or clear) the push token.
    #[must_use]
    pub fn with_notification_token(mut self, token: Option<NotificationToken>) -> Self {
        self.notification_token = token;
        self
    }

    pub fn id(&self) -> &UserId {
        &self.id
    }

    pub fn display_name(&self) -> &DisplayName {
        &self.display_name
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn notification_token(&self) -> Option<&NotificationToken> {
        self.notification_token.as_ref()
    }
}
