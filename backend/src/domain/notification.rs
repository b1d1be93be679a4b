//! Notification events and the per-owner pushes they fan out into.

use super::catalog::NotificationKind;
use super::{Car, CarId, NotificationToken, PlateNumber, UserId};

/// Something happened to `target_car` that its owners should hear about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationEvent {
    pub kind: NotificationKind,
    pub target_car: CarId,
    pub target_plate: PlateNumber,
    pub counterpart_car: CarId,
    pub counterpart_plate: PlateNumber,
}

impl NotificationEvent {
    pub fn new(kind: NotificationKind, target: &Car, counterpart: &Car) -> Self {
        Self {
            kind,
            target_car: target.id,
            target_plate: target.plate_number.clone(),
            counterpart_car: counterpart.id,
            counterpart_plate: counterpart.plate_number.clone(),
        }
    }

    /// Render the push addressed to one owner's device.
    pub fn push_for(&self, recipient: UserId, token: NotificationToken) -> PushNotification {
        PushNotification {
            recipient,
            token,
            kind: self.kind,
            title: self.kind.title(),
            message: self
                .kind
                .render(self.target_plate.as_ref(), self.counterpart_plate.as_ref()),
            sound: self.kind.sound(),
        }
    }
}

/// A single push handed to the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PushNotification {
    pub recipient: UserId,
    pub token: NotificationToken,
    pub kind: NotificationKind,
    pub title: &'static str,
    pub message: String,
    pub sound: &'static str,
}

/// How a dispatch pass ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchStatus {
    /// Owners were found and every owner with a token was attempted.
    Attempted,
    /// The target car has no owner; nothing was sent.
    CarHasNoOwner,
    /// Owners could not be looked up; nothing was sent.
    LookupFailed,
}

impl DispatchStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Attempted => "ATTEMPTED",
            Self::CarHasNoOwner => "CAR_HAS_NO_OWNER",
            Self::LookupFailed => "LOOKUP_FAILED",
        }
    }
}

/// Summary of one dispatch pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchReport {
    pub kind: NotificationKind,
    pub target_car: CarId,
    pub status: DispatchStatus,
    pub delivered: usize,
    pub failed: usize,
    pub without_token: usize,
}

impl DispatchReport {
    /// Report for a pass that never reached the transport.
    pub fn unsent(event: &NotificationEvent, status: DispatchStatus) -> Self {
        Self {
            kind: event.kind,
            target_car: event.target_car,
            status,
            delivered: 0,
            failed: 0,
            without_token: 0,
        }
    }
}
