use crate::{Article, FetchError, LoadState};

/// Prefix of every user-facing fetch failure.
pub const LOAD_FAILURE_PREFIX: &str = "Failed to load headlines: ";

/// Monotonic id of a load request, for correlating log lines.
pub type RequestId = u64;

pub type HeadlinesState = LoadState<Vec<Article>>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoaderState {
    current: HeadlinesState,
    last_source: String,
    last_request: RequestId,
}

impl LoaderState {
    /// `default_source` is what `RetryRequested` loads before any explicit load.
    pub fn new(default_source: impl Into<String>) -> Self {
        Self {
            current: LoadState::Loading,
            last_source: default_source.into(),
            last_request: 0,
        }
    }

    pub fn current(&self) -> &HeadlinesState {
        &self.current
    }

    pub fn last_source(&self) -> &str {
        &self.last_source
    }

    pub fn last_request(&self) -> RequestId {
        self.last_request
    }

    fn begin(&mut self, source: String, is_refresh: bool) -> LoaderEffect {
        self.last_request += 1;
        self.last_source.clone_from(&source);
        self.current = LoadState::Loading;
        LoaderEffect::FetchHeadlines {
            request_id: self.last_request,
            source,
            is_refresh,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoaderMsg {
    /// Start a load; `is_refresh` marks a user-initiated pull-to-refresh.
    LoadRequested { source: String, is_refresh: bool },
    /// Reload the last requested source.
    RetryRequested,
    /// A fetch finished, already normalized and ordered on success.
    LoadFinished {
        request_id: RequestId,
        result: Result<Vec<Article>, FetchError>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoaderEffect {
    FetchHeadlines {
        request_id: RequestId,
        source: String,
        is_refresh: bool,
    },
}

/// Pure loader transition.
///
/// Loads are not single-flight: every request starts a fetch, and whichever
/// `LoadFinished` arrives last determines the published state.
pub fn update(mut state: LoaderState, msg: LoaderMsg) -> (LoaderState, Vec<LoaderEffect>) {
    let effects = match msg {
        LoaderMsg::LoadRequested { source, is_refresh } => vec![state.begin(source, is_refresh)],
        LoaderMsg::RetryRequested => {
            let source = state.last_source.clone();
            vec![state.begin(source, false)]
        }
        LoaderMsg::LoadFinished { result, .. } => {
            state.current = match result {
                Ok(articles) => LoadState::Success(articles),
                Err(err) => load_failure(err),
            };
            Vec::new()
        }
    };

    (state, effects)
}

pub fn load_failure<T>(err: FetchError) -> LoadState<T> {
    LoadState::Error {
        message: format!("{LOAD_FAILURE_PREFIX}{err}"),
        cause: Some(err),
    }
}
