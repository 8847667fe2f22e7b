use std::sync::Arc;

use reader_core::{
    update_gate, AccessGateState, AuthOutcome, GateEffect, GateMsg, INTERRUPTED_MESSAGE,
};
use reader_logging::{reader_info, reader_warn};
use tokio::sync::watch;

use crate::biometric::{Authenticator, CapabilityProber};

/// Access gate for one screen. Owns its state cell; observers subscribe to it.
pub struct AccessGate {
    state_tx: watch::Sender<AccessGateState>,
    authenticator: Arc<dyn Authenticator>,
}

impl AccessGate {
    /// Probes capability exactly once.
    pub fn new(prober: &dyn CapabilityProber, authenticator: Arc<dyn Authenticator>) -> Self {
        let (state_tx, _) = watch::channel(AccessGateState::Unknown);
        let gate = Self {
            state_tx,
            authenticator,
        };
        gate.dispatch(GateMsg::CapabilityProbed(prober.probe()));
        gate
    }

    pub fn state(&self) -> AccessGateState {
        self.state_tx.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<AccessGateState> {
        self.state_tx.subscribe()
    }

    /// Run one authentication attempt. A no-op unless the gate is locked and idle,
    /// so concurrent callers never start a second platform challenge.
    pub async fn authenticate(&self) {
        for effect in self.dispatch(GateMsg::AuthenticateRequested) {
            match effect {
                GateEffect::RunChallenge => {
                    let mut attempt = AttemptGuard::new(self);
                    let outcome = self.authenticator.authenticate().await;
                    attempt.complete(outcome);
                }
            }
        }
    }

    pub fn clear_error(&self) {
        self.dispatch(GateMsg::ClearErrorRequested);
    }

    fn dispatch(&self, msg: GateMsg) -> Vec<GateEffect> {
        let mut effects = Vec::new();
        self.state_tx.send_if_modified(|state| {
            let (next, emitted) = update_gate(state.clone(), msg);
            effects = emitted;
            if next == *state {
                return false;
            }
            reader_info!("Access gate {:?} -> {:?}", state, next);
            *state = next;
            true
        });
        effects
    }
}

/// Reports an interrupted attempt if the awaiting future is dropped mid-challenge,
/// so the gate never stays stuck in `attempting`.
struct AttemptGuard<'a> {
    gate: &'a AccessGate,
    settled: bool,
}

impl<'a> AttemptGuard<'a> {
    fn new(gate: &'a AccessGate) -> Self {
        Self {
            gate,
            settled: false,
        }
    }

    fn complete(&mut self, outcome: AuthOutcome) {
        self.settled = true;
        self.gate.dispatch(GateMsg::ChallengeCompleted(outcome));
    }
}

impl Drop for AttemptGuard<'_> {
    fn drop(&mut self) {
        if !self.settled {
            reader_warn!("Authentication attempt abandoned before completion");
            self.gate.dispatch(GateMsg::ChallengeCompleted(AuthOutcome::Error(
                INTERRUPTED_MESSAGE.to_string(),
            )));
        }
    }
}
