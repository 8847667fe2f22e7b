//! Terminal stand-in for a biometric sensor.
//!
//! `start_challenge` shows the prompt and parks the callback; the next line
//! typed by the user settles it.

use std::sync::Mutex;

use reader_core::{ChallengeErrorKind, PlatformStatus};
use reader_engine::{BiometricPlatform, ChallengeCallback, PromptInfo};
use reader_logging::reader_debug;

pub struct ConsolePlatform {
    status: PlatformStatus,
    pending: Mutex<Option<ChallengeCallback>>,
}

/// What a typed line means while a challenge is pending.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleAnswer {
    Match,
    NoMatch,
    Cancel,
    NegativeButton,
    Fault(String),
}

impl ConsoleAnswer {
    pub fn parse(line: &str) -> Self {
        match line.trim() {
            "" | "y" | "yes" => ConsoleAnswer::Match,
            "n" | "no" => ConsoleAnswer::NoMatch,
            "c" | "cancel" => ConsoleAnswer::Cancel,
            "x" => ConsoleAnswer::NegativeButton,
            other => ConsoleAnswer::Fault(format!("Sensor error: {other}")),
        }
    }
}

impl ConsolePlatform {
    pub fn new(status: PlatformStatus) -> Self {
        Self {
            status,
            pending: Mutex::new(None),
        }
    }

    pub fn has_pending(&self) -> bool {
        self.lock_pending().is_some()
    }

    /// Settle the pending challenge, if any. Returns false when nothing was waiting.
    pub fn answer(&self, answer: ConsoleAnswer) -> bool {
        let Some(callback) = self.lock_pending().take() else {
            return false;
        };
        reader_debug!("Console challenge answered: {:?}", answer);
        match answer {
            ConsoleAnswer::Match => callback.succeeded(),
            ConsoleAnswer::NoMatch => callback.failed(),
            ConsoleAnswer::Cancel => {
                callback.error(ChallengeErrorKind::UserCanceled, "Authentication canceled")
            }
            ConsoleAnswer::NegativeButton => {
                callback.error(ChallengeErrorKind::NegativeButton, "Cancel pressed")
            }
            ConsoleAnswer::Fault(message) => {
                callback.error(ChallengeErrorKind::HardwareUnavailable, message)
            }
        }
    }

    fn lock_pending(&self) -> std::sync::MutexGuard<'_, Option<ChallengeCallback>> {
        match self.pending.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl BiometricPlatform for ConsolePlatform {
    fn status(&self) -> PlatformStatus {
        self.status
    }

    fn start_challenge(&self, prompt: &PromptInfo, callback: ChallengeCallback) {
        println!();
        println!("== {} ==", prompt.title);
        println!("{}", prompt.subtitle);
        println!(
            "[Enter] touch sensor   [n] wrong finger   [c] dismiss   [x] {}",
            prompt.negative_button
        );
        *self.lock_pending() = Some(callback);
    }
}
