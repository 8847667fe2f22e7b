use crate::{AuthOutcome, Capability};

/// Whether the user may proceed to the content.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AccessGateState {
    /// Capability not yet probed.
    #[default]
    Unknown,
    /// No usable biometric enrolled; implicitly authenticated.
    NotRequired,
    /// Authentication required and not yet achieved.
    Locked {
        attempting: bool,
        last_error: Option<String>,
    },
    /// Authenticated. Terminal for the lifetime of the gate.
    Unlocked,
}

impl AccessGateState {
    pub fn is_passable(&self) -> bool {
        matches!(self, AccessGateState::NotRequired | AccessGateState::Unlocked)
    }

    pub fn is_attempting(&self) -> bool {
        matches!(
            self,
            AccessGateState::Locked {
                attempting: true,
                ..
            }
        )
    }

    pub fn last_error(&self) -> Option<&str> {
        match self {
            AccessGateState::Locked { last_error, .. } => last_error.as_deref(),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateMsg {
    /// Result of the one-time capability probe.
    CapabilityProbed(Capability),
    /// User asked to authenticate.
    AuthenticateRequested,
    /// The challenge started by `RunChallenge` finished.
    ChallengeCompleted(AuthOutcome),
    /// User dismissed the error message.
    ClearErrorRequested,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateEffect {
    /// Start exactly one platform challenge and report back with `ChallengeCompleted`.
    RunChallenge,
}

/// Pure gate transition: applies a message to state and returns any effects.
pub fn update(state: AccessGateState, msg: GateMsg) -> (AccessGateState, Vec<GateEffect>) {
    match (state, msg) {
        (AccessGateState::Unknown, GateMsg::CapabilityProbed(capability)) => {
            let next = if capability.requires_auth() {
                AccessGateState::Locked {
                    attempting: false,
                    last_error: None,
                }
            } else {
                AccessGateState::NotRequired
            };
            (next, Vec::new())
        }
        (
            AccessGateState::Locked {
                attempting: false, ..
            },
            GateMsg::AuthenticateRequested,
        ) => (
            AccessGateState::Locked {
                attempting: true,
                last_error: None,
            },
            vec![GateEffect::RunChallenge],
        ),
        (
            AccessGateState::Locked {
                attempting: true, ..
            },
            GateMsg::ChallengeCompleted(outcome),
        ) => {
            let next = match outcome.error_message() {
                None => AccessGateState::Unlocked,
                Some(message) => AccessGateState::Locked {
                    attempting: false,
                    last_error: Some(message.to_string()),
                },
            };
            (next, Vec::new())
        }
        (
            AccessGateState::Locked {
                attempting,
                last_error: Some(_),
            },
            GateMsg::ClearErrorRequested,
        ) => (
            AccessGateState::Locked {
                attempting,
                last_error: None,
            },
            Vec::new(),
        ),
        // Re-probing, duplicate attempts and stray completions leave the gate untouched.
        (state, _) => (state, Vec::new()),
    }
}
