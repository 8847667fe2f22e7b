mod common;

use std::sync::{Arc, Mutex};
use std::thread;

use common::init_logging;
use reader_core::{
    AuthOutcome, Capability, ChallengeErrorKind, ChallengeResult, PlatformStatus,
    AUTH_REQUIRED_MESSAGE, INTERRUPTED_MESSAGE,
};
use reader_engine::{
    Authenticator, BiometricPlatform, CapabilityProber, ChallengeCallback, PlatformAuthenticator,
    PlatformProber, PromptInfo,
};

/// How the fake platform answers a challenge.
#[derive(Clone)]
enum Reply {
    /// Settle with each result in turn, synchronously.
    Settle(Vec<ChallengeResult>),
    /// Settle from another thread.
    Threaded(ChallengeResult),
    /// Drop the callback without settling.
    Abandon,
}

struct FakePlatform {
    status: PlatformStatus,
    reply: Reply,
    prompts: Mutex<Vec<PromptInfo>>,
    settled: Mutex<Vec<bool>>,
}

impl FakePlatform {
    fn new(status: PlatformStatus, reply: Reply) -> Arc<Self> {
        Arc::new(Self {
            status,
            reply,
            prompts: Mutex::new(Vec::new()),
            settled: Mutex::new(Vec::new()),
        })
    }
}

impl BiometricPlatform for FakePlatform {
    fn status(&self) -> PlatformStatus {
        self.status
    }

    fn start_challenge(&self, prompt: &PromptInfo, callback: ChallengeCallback) {
        self.prompts.lock().unwrap().push(prompt.clone());
        match self.reply.clone() {
            Reply::Settle(results) => {
                for result in results {
                    let delivered = callback.settle(result);
                    self.settled.lock().unwrap().push(delivered);
                }
            }
            Reply::Threaded(result) => {
                thread::spawn(move || {
                    callback.settle(result);
                });
            }
            Reply::Abandon => drop(callback),
        }
    }
}

async fn run(reply: Reply) -> (AuthOutcome, Arc<FakePlatform>) {
    let platform = FakePlatform::new(PlatformStatus::Success, reply);
    let authenticator = PlatformAuthenticator::new(platform.clone(), PromptInfo::default());
    (authenticator.authenticate().await, platform)
}

fn error(kind: ChallengeErrorKind, message: &str) -> ChallengeResult {
    ChallengeResult::Error {
        kind,
        message: message.to_string(),
    }
}

#[test]
fn prober_classifies_platform_status() {
    init_logging();
    let cases = [
        (PlatformStatus::Success, Capability::Available),
        (PlatformStatus::NoneEnrolled, Capability::NoneEnrolled),
        (PlatformStatus::NoHardware, Capability::NotAvailable),
        (PlatformStatus::HardwareUnavailable, Capability::NotAvailable),
        (PlatformStatus::Unknown, Capability::NotAvailable),
    ];
    for (status, expected) in cases {
        let prober = PlatformProber::new(FakePlatform::new(status, Reply::Abandon));
        assert_eq!(prober.probe(), expected);
    }
}

#[tokio::test]
async fn success_and_failed_match() {
    init_logging();
    let (outcome, platform) = run(Reply::Settle(vec![ChallengeResult::Succeeded])).await;
    assert_eq!(outcome, AuthOutcome::Success);
    assert_eq!(platform.prompts.lock().unwrap()[0], PromptInfo::default());

    let (outcome, _) = run(Reply::Settle(vec![ChallengeResult::Failed])).await;
    assert_eq!(outcome, AuthOutcome::FailedMatch);
}

#[tokio::test]
async fn cancel_and_negative_button_use_fixed_message() {
    init_logging();
    for kind in [ChallengeErrorKind::UserCanceled, ChallengeErrorKind::NegativeButton] {
        let (outcome, _) = run(Reply::Settle(vec![error(kind, "Cancel")])).await;
        assert_eq!(outcome, AuthOutcome::Error(AUTH_REQUIRED_MESSAGE.to_string()));
    }
}

#[tokio::test]
async fn other_errors_are_reported_verbatim() {
    init_logging();
    let (outcome, _) = run(Reply::Settle(vec![error(
        ChallengeErrorKind::Other(42),
        "Sensor malfunction",
    )]))
    .await;
    assert_eq!(outcome, AuthOutcome::Error("Sensor malfunction".to_string()));
}

#[tokio::test]
async fn only_first_settlement_counts() {
    init_logging();
    let (outcome, platform) = run(Reply::Settle(vec![
        ChallengeResult::Failed,
        ChallengeResult::Succeeded,
    ]))
    .await;
    assert_eq!(outcome, AuthOutcome::FailedMatch);
    assert_eq!(*platform.settled.lock().unwrap(), vec![true, false]);
}

#[tokio::test]
async fn settlement_from_another_thread_is_delivered() {
    init_logging();
    let (outcome, _) = run(Reply::Threaded(ChallengeResult::Succeeded)).await;
    assert_eq!(outcome, AuthOutcome::Success);
}

#[tokio::test]
async fn abandoned_challenge_is_an_error() {
    init_logging();
    let (outcome, _) = run(Reply::Abandon).await;
    assert_eq!(outcome, AuthOutcome::Error(INTERRUPTED_MESSAGE.to_string()));
}

#[tokio::test]
async fn custom_prompt_is_forwarded() {
    init_logging();
    let platform = FakePlatform::new(
        PlatformStatus::Success,
        Reply::Settle(vec![ChallengeResult::Succeeded]),
    );
    let prompt = PromptInfo {
        title: "Unlock Reader".to_string(),
        subtitle: "Confirm it's you".to_string(),
        negative_button: "Not now".to_string(),
    };
    PlatformAuthenticator::new(platform.clone(), prompt.clone())
        .authenticate()
        .await;
    assert_eq!(*platform.prompts.lock().unwrap(), vec![prompt]);
}
