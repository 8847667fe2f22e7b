//! Reader core: pure state machines, domain types and view-model helpers.
mod article;
mod auth;
mod error;
mod gate;
mod load_state;
mod loader;
mod view_model;

pub use article::{
    article_id, normalize, prepare_headlines, sort_newest_first, Article, HeadlinesResponse,
    WireArticle, WireSource,
};
pub use auth::{
    AuthOutcome, Capability, ChallengeErrorKind, ChallengeResult, PlatformStatus,
    AUTH_REQUIRED_MESSAGE, FAILED_MATCH_MESSAGE, INTERRUPTED_MESSAGE,
};
pub use error::{FailureKind, FetchError};
pub use gate::{update as update_gate, AccessGateState, GateEffect, GateMsg};
pub use load_state::LoadState;
pub use loader::{
    load_failure, update as update_loader, HeadlinesState, LoaderEffect, LoaderMsg, LoaderState,
    RequestId, LOAD_FAILURE_PREFIX,
};
pub use view_model::{
    ArticleDetailView, ContentView, GateView, HeadlineRow, ScreenViewModel, SUMMARY_LIMIT,
};
