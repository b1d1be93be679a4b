//! Kinds of push notification sent to car owners.

use std::sync::OnceLock;

use super::{Catalog, CatalogEntry, CatalogError};

/// Reason a car owner is being notified.
///
/// The target car is the one whose owners receive the notification; the
/// counterpart is the other end of the blocking relation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotificationKind {
    /// The target car has just been blocked in by the counterpart.
    BeenBlocked,
    /// The target car has just been reported as blocking the counterpart.
    BeenBlocking,
    /// The owner of the blocked counterpart needs the target car moved.
    NeedToGo,
    /// The target car is no longer blocked by the counterpart.
    FreeToGo,
}

impl NotificationKind {
    /// Short title shown in the notification banner.
    pub fn title(self) -> &'static str {
        match self {
            Self::BeenBlocked => "You have been blocked",
            Self::BeenBlocking => "You are blocking a car",
            Self::NeedToGo => "Please move your car",
            Self::FreeToGo => "You are free to go",
        }
    }

    /// Sound the client plays on delivery.
    pub fn sound(self) -> &'static str {
        match self {
            Self::NeedToGo => "urgent",
            Self::BeenBlocked | Self::BeenBlocking | Self::FreeToGo => "default",
        }
    }

    /// Render the notification body for the given plate numbers.
    ///
    /// # Examples
    /// ```
    /// use unblock::domain::catalog::NotificationKind;
    ///
    /// let body = NotificationKind::BeenBlocked.render("98-765-43", "12-345-67");
    /// assert_eq!(body, "Your car 98-765-43 is blocked by 12-345-67");
    /// ```
    pub fn render(self, target_plate: &str, counterpart_plate: &str) -> String {
        match self {
            Self::BeenBlocked => {
                format!("Your car {target_plate} is blocked by {counterpart_plate}")
            }
            Self::BeenBlocking => {
                format!("Your car {target_plate} is blocking {counterpart_plate}")
            }
            Self::NeedToGo => format!(
                "The driver of {counterpart_plate} needs to leave; please move {target_plate}"
            ),
            Self::FreeToGo => {
                format!("Your car {target_plate} is no longer blocked by {counterpart_plate}")
            }
        }
    }
}

impl CatalogEntry for NotificationKind {
    type Code = i32;

    const NAME: &'static str = "notification kind";

    const VARIANTS: &'static [Self] = &[
        Self::BeenBlocked,
        Self::BeenBlocking,
        Self::NeedToGo,
        Self::FreeToGo,
    ];

    fn to_code(self) -> i32 {
        match self {
            Self::BeenBlocked => 1,
            Self::BeenBlocking => 2,
            Self::NeedToGo => 3,
            Self::FreeToGo => 4,
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::BeenBlocked => "BEEN_BLOCKED",
            Self::BeenBlocking => "BEEN_BLOCKING",
            Self::NeedToGo => "NEED_TO_GO",
            Self::FreeToGo => "FREE_TO_GO",
        }
    }

    fn catalog() -> Result<&'static Catalog<Self>, CatalogError> {
        static CATALOG: OnceLock<Result<Catalog<NotificationKind>, CatalogError>> =
            OnceLock::new();
        Catalog::cached(&CATALOG)
    }
}
