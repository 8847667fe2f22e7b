use std::sync::{Arc, Mutex};

use reader_core::{
    AuthOutcome, Capability, ChallengeErrorKind, ChallengeResult, PlatformStatus,
    INTERRUPTED_MESSAGE,
};
use reader_logging::{reader_debug, reader_warn};
use tokio::sync::oneshot;

/// Texts shown by the platform prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptInfo {
    pub title: String,
    pub subtitle: String,
    pub negative_button: String,
}

impl Default for PromptInfo {
    fn default() -> Self {
        Self {
            title: "Unlock News App".to_string(),
            subtitle: "Authentication required".to_string(),
            negative_button: "Cancel".to_string(),
        }
    }
}

/// Platform biometric service.
pub trait BiometricPlatform: Send + Sync {
    /// Whether a strong biometric can authenticate right now.
    fn status(&self) -> PlatformStatus;

    /// Show the prompt. The platform must eventually report through `callback`;
    /// it may do so from any thread, before or after returning.
    fn start_challenge(&self, prompt: &PromptInfo, callback: ChallengeCallback);
}

/// Settle-once handle for a running challenge.
///
/// Clones share the same slot; only the first settlement is delivered.
#[derive(Clone)]
pub struct ChallengeCallback {
    slot: Arc<Mutex<Option<oneshot::Sender<ChallengeResult>>>>,
}

impl ChallengeCallback {
    fn new(tx: oneshot::Sender<ChallengeResult>) -> Self {
        Self {
            slot: Arc::new(Mutex::new(Some(tx))),
        }
    }

    /// Deliver the terminal result. Returns false if the challenge was already settled
    /// or nobody is waiting any more.
    pub fn settle(&self, result: ChallengeResult) -> bool {
        let sender = match self.slot.lock() {
            Ok(mut guard) => guard.take(),
            Err(poisoned) => poisoned.into_inner().take(),
        };
        match sender {
            Some(tx) => tx.send(result).is_ok(),
            None => {
                reader_warn!("Ignoring second settlement of a challenge: {:?}", result);
                false
            }
        }
    }

    pub fn succeeded(&self) -> bool {
        self.settle(ChallengeResult::Succeeded)
    }

    pub fn failed(&self) -> bool {
        self.settle(ChallengeResult::Failed)
    }

    pub fn error(&self, kind: ChallengeErrorKind, message: impl Into<String>) -> bool {
        self.settle(ChallengeResult::Error {
            kind,
            message: message.into(),
        })
    }
}

pub trait CapabilityProber: Send + Sync {
    fn probe(&self) -> Capability;
}

#[async_trait::async_trait]
pub trait Authenticator: Send + Sync {
    /// Run one challenge to its single terminal outcome.
    async fn authenticate(&self) -> AuthOutcome;
}

pub struct PlatformProber {
    platform: Arc<dyn BiometricPlatform>,
}

impl PlatformProber {
    pub fn new(platform: Arc<dyn BiometricPlatform>) -> Self {
        Self { platform }
    }
}

impl CapabilityProber for PlatformProber {
    fn probe(&self) -> Capability {
        let status = self.platform.status();
        let capability = Capability::from_status(status);
        reader_debug!("Biometric status {:?} -> {:?}", status, capability);
        capability
    }
}

pub struct PlatformAuthenticator {
    platform: Arc<dyn BiometricPlatform>,
    prompt: PromptInfo,
}

impl PlatformAuthenticator {
    pub fn new(platform: Arc<dyn BiometricPlatform>, prompt: PromptInfo) -> Self {
        Self { platform, prompt }
    }
}

#[async_trait::async_trait]
impl Authenticator for PlatformAuthenticator {
    async fn authenticate(&self) -> AuthOutcome {
        let (tx, rx) = oneshot::channel();
        self.platform
            .start_challenge(&self.prompt, ChallengeCallback::new(tx));

        match rx.await {
            Ok(result) => AuthOutcome::from_challenge(result),
            Err(_) => {
                reader_warn!("Biometric challenge dropped without a result");
                AuthOutcome::Error(INTERRUPTED_MESSAGE.to_string())
            }
        }
    }
}
