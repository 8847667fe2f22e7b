#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, Once};
use std::time::Duration;

use reader_core::{AuthOutcome, Capability, FetchError, WireArticle, WireSource};
use reader_engine::{Authenticator, CapabilityProber, ContentSource};
use tokio::sync::Notify;

pub fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(reader_logging::initialize_for_tests);
}

pub fn wire(title: &str, published_at: &str) -> WireArticle {
    WireArticle {
        source: WireSource {
            id: Some("bbc-news".to_string()),
            name: "BBC News".to_string(),
        },
        author: None,
        title: title.to_string(),
        description: None,
        url: format!("https://www.bbc.co.uk/news/{title}"),
        url_to_image: None,
        published_at: published_at.to_string(),
        content: None,
    }
}

type Scripted = (Duration, Result<Vec<WireArticle>, FetchError>);

/// Content source answering from a script; an exhausted script yields an empty list.
#[derive(Default)]
pub struct ScriptedSource {
    script: Mutex<VecDeque<Scripted>>,
    calls: AtomicUsize,
    sources: Mutex<Vec<String>>,
}

impl ScriptedSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn then(self, result: Result<Vec<WireArticle>, FetchError>) -> Self {
        self.then_after(Duration::ZERO, result)
    }

    pub fn then_after(self, delay: Duration, result: Result<Vec<WireArticle>, FetchError>) -> Self {
        self.script.lock().unwrap().push_back((delay, result));
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn requested_sources(&self) -> Vec<String> {
        self.sources.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl ContentSource for ScriptedSource {
    async fn fetch_headlines(&self, source_id: &str) -> Result<Vec<WireArticle>, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.sources.lock().unwrap().push(source_id.to_string());
        let next = self.script.lock().unwrap().pop_front();
        let (delay, result) = next.unwrap_or((Duration::ZERO, Ok(Vec::new())));
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        result
    }
}

pub struct FixedCapability(pub Capability);

impl CapabilityProber for FixedCapability {
    fn probe(&self) -> Capability {
        self.0
    }
}

/// Authenticator returning scripted outcomes; optionally holds each attempt until released.
pub struct FakeAuthenticator {
    outcomes: Mutex<VecDeque<AuthOutcome>>,
    calls: AtomicUsize,
    hold: bool,
    release: Notify,
}

impl FakeAuthenticator {
    pub fn immediate(outcomes: Vec<AuthOutcome>) -> Self {
        Self {
            outcomes: Mutex::new(outcomes.into()),
            calls: AtomicUsize::new(0),
            hold: false,
            release: Notify::new(),
        }
    }

    pub fn held(outcomes: Vec<AuthOutcome>) -> Self {
        Self {
            hold: true,
            ..Self::immediate(outcomes)
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn release(&self) {
        self.release.notify_one();
    }
}

#[async_trait::async_trait]
impl Authenticator for FakeAuthenticator {
    async fn authenticate(&self) -> AuthOutcome {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.hold {
            self.release.notified().await;
        }
        self.outcomes
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(AuthOutcome::Success)
    }
}
