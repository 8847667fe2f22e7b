use serde::Deserialize;
use uuid::Uuid;

/// Publisher block of a wire record.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WireSource {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
}

/// Article payload as received from the content source, pre-normalization.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireArticle {
    pub source: WireSource,
    #[serde(default)]
    pub author: Option<String>,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub url: String,
    #[serde(default)]
    pub url_to_image: Option<String>,
    pub published_at: String,
    #[serde(default)]
    pub content: Option<String>,
}

/// Envelope of a `top-headlines` response. Unknown keys are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeadlinesResponse {
    pub status: String,
    #[serde(default)]
    pub total_results: u32,
    #[serde(default)]
    pub articles: Vec<WireArticle>,
    /// Present when `status` is `"error"`.
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl HeadlinesResponse {
    pub fn is_ok(&self) -> bool {
        self.status == "ok"
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Article {
    pub id: String,
    pub source: String,
    pub author: Option<String>,
    pub title: String,
    pub description: Option<String>,
    pub url: String,
    pub image_url: Option<String>,
    /// ISO-8601 timestamp, kept as text; only used for ordering.
    pub published_at: String,
    pub content: Option<String>,
}

/// Stable identifier for an article: name-based (v3) UUID over `title ++ published_at`.
///
/// Two records sharing title and timestamp collapse to the same id.
pub fn article_id(title: &str, published_at: &str) -> String {
    let mut name = String::with_capacity(title.len() + published_at.len());
    name.push_str(title);
    name.push_str(published_at);
    Uuid::new_v3(&Uuid::NAMESPACE_URL, name.as_bytes())
        .hyphenated()
        .to_string()
}

pub fn normalize(wire: WireArticle) -> Article {
    Article {
        id: article_id(&wire.title, &wire.published_at),
        source: wire.source.name,
        author: wire.author,
        title: wire.title,
        description: wire.description,
        url: wire.url,
        image_url: wire.url_to_image,
        published_at: wire.published_at,
        content: wire.content,
    }
}

/// Newest first by lexical comparison of `published_at`; equal timestamps keep input order.
pub fn sort_newest_first(articles: &mut [Article]) {
    // `sort_by` is stable.
    articles.sort_by(|a, b| b.published_at.cmp(&a.published_at));
}

/// Normalize every wire record and order the result for display.
pub fn prepare_headlines(wire: Vec<WireArticle>) -> Vec<Article> {
    let mut articles: Vec<Article> = wire.into_iter().map(normalize).collect();
    sort_newest_first(&mut articles);
    articles
}
