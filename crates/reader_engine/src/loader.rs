use std::sync::Arc;
use std::time::Duration;

use reader_core::{
    prepare_headlines, update_loader, HeadlinesState, LoaderEffect, LoaderMsg, LoaderState,
    RequestId,
};
use reader_logging::{reader_info, reader_warn};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::Instant;

use crate::source::ContentSource;

/// Minimum time a manual refresh stays visible.
pub const DEFAULT_REFRESH_FLOOR: Duration = Duration::from_millis(400);
pub const DEFAULT_SOURCE: &str = "bbc-news";

#[derive(Debug, Clone)]
pub struct LoaderSettings {
    /// Source reloaded by `retry` before any explicit `load`.
    pub default_source: String,
    pub refresh_floor: Duration,
}

impl Default for LoaderSettings {
    fn default() -> Self {
        Self {
            default_source: DEFAULT_SOURCE.to_string(),
            refresh_floor: DEFAULT_REFRESH_FLOOR,
        }
    }
}

/// Headline loader for one screen. Cheap to clone; clones share the state cell.
#[derive(Clone)]
pub struct HeadlineLoader {
    inner: Arc<Inner>,
}

struct Inner {
    source: Arc<dyn ContentSource>,
    state_tx: watch::Sender<LoaderState>,
    refresh_floor: Duration,
}

impl HeadlineLoader {
    pub fn new(source: Arc<dyn ContentSource>, settings: LoaderSettings) -> Self {
        let (state_tx, _) = watch::channel(LoaderState::new(settings.default_source));
        Self {
            inner: Arc::new(Inner {
                source,
                state_tx,
                refresh_floor: settings.refresh_floor,
            }),
        }
    }

    pub fn state(&self) -> HeadlinesState {
        self.inner.state_tx.borrow().current().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<LoaderState> {
        self.inner.state_tx.subscribe()
    }

    /// Publish `Loading` now and fetch in a spawned task.
    ///
    /// Calls are not deduplicated: the load that completes last wins. Abort the
    /// returned handle to drop a superseded request.
    ///
    /// # Panics
    /// Must be called from within a Tokio runtime.
    pub fn load(&self, source: impl Into<String>, is_refresh: bool) -> JoinHandle<()> {
        self.run(LoaderMsg::LoadRequested {
            source: source.into(),
            is_refresh,
        })
    }

    /// Reload the last requested source without the refresh floor.
    pub fn retry(&self) -> JoinHandle<()> {
        self.run(LoaderMsg::RetryRequested)
    }

    fn run(&self, msg: LoaderMsg) -> JoinHandle<()> {
        let effects = self.inner.dispatch(msg);
        let inner = Arc::clone(&self.inner);
        tokio::spawn(async move {
            for effect in effects {
                match effect {
                    LoaderEffect::FetchHeadlines {
                        request_id,
                        source,
                        is_refresh,
                    } => inner.fetch(request_id, &source, is_refresh).await,
                }
            }
        })
    }
}

impl Inner {
    fn dispatch(&self, msg: LoaderMsg) -> Vec<LoaderEffect> {
        let mut effects = Vec::new();
        self.state_tx.send_modify(|state| {
            let (next, emitted) = update_loader(state.clone(), msg);
            effects = emitted;
            *state = next;
        });
        effects
    }

    async fn fetch(&self, request_id: RequestId, source: &str, is_refresh: bool) {
        reader_info!(
            "Loading headlines request_id={} source={} refresh={}",
            request_id,
            source,
            is_refresh
        );
        let started = Instant::now();
        let result = self
            .source
            .fetch_headlines(source)
            .await
            .map(prepare_headlines);
        let elapsed = started.elapsed();

        match &result {
            Ok(articles) => reader_info!(
                "Loaded {} headlines request_id={} elapsed_ms={}",
                articles.len(),
                request_id,
                elapsed.as_millis()
            ),
            Err(err) => reader_warn!(
                "Headline load failed request_id={} kind={} elapsed_ms={}: {}",
                request_id,
                err.kind,
                elapsed.as_millis(),
                err
            ),
        }

        if is_refresh {
            if let Some(remaining) = self.refresh_floor.checked_sub(elapsed) {
                if !remaining.is_zero() {
                    tokio::time::sleep(remaining).await;
                }
            }
        }

        self.dispatch(LoaderMsg::LoadFinished { request_id, result });
    }
}
