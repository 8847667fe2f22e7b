use crate::{AccessGateState, Article, HeadlinesState, LoadState};

/// Maximum characters of a description shown in a headline row.
pub const SUMMARY_LIMIT: usize = 160;
const ELLIPSIS: &str = "…";

/// What the screen shows. Content is only exposed once the gate is passable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScreenViewModel {
    Gate(GateView),
    Content(ContentView),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateView {
    Probing,
    Prompt {
        attempting: bool,
        error: Option<String>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentView {
    Loading,
    Empty,
    Headlines(Vec<HeadlineRow>),
    Failed { message: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadlineRow {
    pub id: String,
    pub title: String,
    pub source: String,
    pub author: Option<String>,
    pub published_at: String,
    pub url: String,
    pub image_url: Option<String>,
    pub summary: Option<String>,
}

impl From<&Article> for HeadlineRow {
    fn from(article: &Article) -> Self {
        Self {
            id: article.id.clone(),
            title: article.title.clone(),
            source: article.source.clone(),
            author: article.author.clone(),
            published_at: article.published_at.clone(),
            url: article.url.clone(),
            image_url: article.image_url.clone(),
            summary: article
                .description
                .as_deref()
                .map(|text| summarize(text, SUMMARY_LIMIT)),
        }
    }
}

/// Full view of one article, as opened from the list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleDetailView {
    pub title: String,
    pub byline: String,
    pub published_at: String,
    pub body: Option<String>,
    pub url: String,
}

impl From<&Article> for ArticleDetailView {
    fn from(article: &Article) -> Self {
        let byline = match &article.author {
            Some(author) if !author.trim().is_empty() => {
                format!("{} · {}", author.trim(), article.source)
            }
            _ => article.source.clone(),
        };
        Self {
            title: article.title.clone(),
            byline,
            published_at: article.published_at.clone(),
            body: article
                .content
                .clone()
                .or_else(|| article.description.clone()),
            url: article.url.clone(),
        }
    }
}

impl ScreenViewModel {
    pub fn compose(gate: &AccessGateState, headlines: &HeadlinesState) -> Self {
        match gate {
            AccessGateState::Unknown => ScreenViewModel::Gate(GateView::Probing),
            AccessGateState::Locked {
                attempting,
                last_error,
            } => ScreenViewModel::Gate(GateView::Prompt {
                attempting: *attempting,
                error: last_error.clone(),
            }),
            AccessGateState::NotRequired | AccessGateState::Unlocked => {
                ScreenViewModel::Content(ContentView::from_state(headlines))
            }
        }
    }
}

impl ContentView {
    pub fn from_state(state: &LoadState<Vec<Article>>) -> Self {
        match state {
            LoadState::Loading => ContentView::Loading,
            LoadState::Success(articles) if articles.is_empty() => ContentView::Empty,
            LoadState::Success(articles) => {
                ContentView::Headlines(articles.iter().map(HeadlineRow::from).collect())
            }
            LoadState::Error { message, .. } => ContentView::Failed {
                message: message.clone(),
            },
        }
    }
}

/// Trim to at most `limit` characters, cutting on a char boundary.
fn summarize(text: &str, limit: usize) -> String {
    let text = text.trim();
    match text.char_indices().nth(limit) {
        None => text.to_string(),
        Some((end, _)) => format!("{}{ELLIPSIS}", text[..end].trim_end()),
    }
}
