//! Biometric capability and challenge classification.
//!
//! The platform speaks in raw status codes and callbacks; everything the gate
//! sees is one of the small enums below.

/// Shown when the user dismisses the prompt instead of authenticating.
pub const AUTH_REQUIRED_MESSAGE: &str = "Authentication required to continue";
/// Shown after a sensor read that did not match an enrolled biometric.
pub const FAILED_MATCH_MESSAGE: &str = "Fingerprint not recognized. Try again.";
/// Reported when the platform drops a challenge without settling it.
pub const INTERRUPTED_MESSAGE: &str = "Authentication was interrupted";

/// Raw answer of the platform to "can a strong biometric authenticate now?".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformStatus {
    Success,
    NoneEnrolled,
    NoHardware,
    HardwareUnavailable,
    SecurityUpdateRequired,
    Unsupported,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    /// A strong factor is enrolled and the sensor is usable now.
    Available,
    /// The factor type exists but nothing is enrolled.
    NoneEnrolled,
    /// No hardware, lockout, or any other negative status.
    NotAvailable,
}

impl Capability {
    pub fn from_status(status: PlatformStatus) -> Self {
        match status {
            PlatformStatus::Success => Capability::Available,
            PlatformStatus::NoneEnrolled => Capability::NoneEnrolled,
            PlatformStatus::NoHardware
            | PlatformStatus::HardwareUnavailable
            | PlatformStatus::SecurityUpdateRequired
            | PlatformStatus::Unsupported
            | PlatformStatus::Unknown => Capability::NotAvailable,
        }
    }

    /// Whether the gate must lock until a challenge succeeds.
    pub fn requires_auth(self) -> bool {
        self == Capability::Available
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChallengeErrorKind {
    UserCanceled,
    NegativeButton,
    Lockout,
    LockoutPermanent,
    Timeout,
    HardwareUnavailable,
    Other(i32),
}

/// The single terminal callback of a platform challenge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChallengeResult {
    Succeeded,
    /// Sensor read, but the biometric did not match.
    Failed,
    Error {
        kind: ChallengeErrorKind,
        message: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthOutcome {
    Success,
    FailedMatch,
    Error(String),
}

impl AuthOutcome {
    /// Apply the user-facing message policy to a raw challenge result.
    pub fn from_challenge(result: ChallengeResult) -> Self {
        match result {
            ChallengeResult::Succeeded => AuthOutcome::Success,
            ChallengeResult::Failed => AuthOutcome::FailedMatch,
            ChallengeResult::Error {
                kind: ChallengeErrorKind::UserCanceled | ChallengeErrorKind::NegativeButton,
                ..
            } => AuthOutcome::Error(AUTH_REQUIRED_MESSAGE.to_string()),
            ChallengeResult::Error { message, .. } => AuthOutcome::Error(message),
        }
    }

    /// Message the gate surfaces for this outcome, if any.
    pub fn error_message(&self) -> Option<&str> {
        match self {
            AuthOutcome::Success => None,
            AuthOutcome::FailedMatch => Some(FAILED_MATCH_MESSAGE),
            AuthOutcome::Error(message) => Some(message),
        }
    }
}
