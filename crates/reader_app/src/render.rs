use std::fmt::Write;

use reader_core::{ArticleDetailView, ContentView, GateView, HeadlineRow, ScreenViewModel};

pub fn render(title: &str, view: &ScreenViewModel) -> String {
    let mut out = String::new();
    match view {
        ScreenViewModel::Gate(gate) => render_gate(&mut out, gate),
        ScreenViewModel::Content(content) => render_content(&mut out, title, content),
    }
    out
}

fn render_gate(out: &mut String, gate: &GateView) {
    match gate {
        GateView::Probing => out.push_str("Checking device security..."),
        GateView::Prompt {
            attempting: true, ..
        } => out.push_str("Waiting for biometric confirmation..."),
        GateView::Prompt {
            attempting: false,
            error,
        } => {
            out.push_str("Locked. [a] authenticate");
            if let Some(error) = error {
                let _ = write!(out, "  [d] dismiss\n  ! {error}");
            }
        }
    }
}

fn render_content(out: &mut String, title: &str, content: &ContentView) {
    let _ = writeln!(out, "== {title} ==");
    match content {
        ContentView::Loading => out.push_str("Loading headlines..."),
        ContentView::Empty => out.push_str("No headlines right now.  [r] refresh"),
        ContentView::Failed { message } => {
            let _ = write!(out, "{message}\n[t] retry");
        }
        ContentView::Headlines(rows) => {
            for (index, row) in rows.iter().enumerate() {
                render_row(out, index + 1, row);
            }
            out.push_str("[o N] open   [r] refresh   [q] quit");
        }
    }
}

fn render_row(out: &mut String, number: usize, row: &HeadlineRow) {
    let _ = writeln!(out, "{number:>2}. {}", row.title);
    let _ = writeln!(out, "    {} | {}", row.source, date_part(&row.published_at));
    if let Some(summary) = &row.summary {
        let _ = writeln!(out, "    {summary}");
    }
}

pub fn render_detail(detail: &ArticleDetailView) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "== {} ==", detail.title);
    let _ = writeln!(out, "{} | {}", detail.byline, detail.published_at);
    if let Some(body) = &detail.body {
        let _ = writeln!(out, "\n{body}\n");
    }
    let _ = write!(out, "Read more: {}", detail.url);
    out
}

/// `2024-01-05T10:00:00Z` -> `2024-01-05`.
fn date_part(published_at: &str) -> &str {
    published_at
        .split_once('T')
        .map_or(published_at, |(date, _)| date)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(title: &str, summary: Option<&str>) -> HeadlineRow {
        HeadlineRow {
            id: "id".to_string(),
            title: title.to_string(),
            source: "BBC News".to_string(),
            author: None,
            published_at: "2024-01-05T10:00:00Z".to_string(),
            url: "https://www.bbc.co.uk/news/1".to_string(),
            image_url: None,
            summary: summary.map(str::to_string),
        }
    }

    #[test]
    fn locked_gate_shows_error_and_dismiss_hint() {
        let text = render(
            "BBC News",
            &ScreenViewModel::Gate(GateView::Prompt {
                attempting: false,
                error: Some("Fingerprint not recognized. Try again.".to_string()),
            }),
        );
        assert!(text.contains("[a] authenticate"));
        assert!(text.contains("[d] dismiss"));
        assert!(text.contains("Fingerprint not recognized. Try again."));
    }

    #[test]
    fn headline_rows_are_numbered_with_dates() {
        let text = render(
            "BBC News",
            &ScreenViewModel::Content(ContentView::Headlines(vec![
                row("First", Some("Summary")),
                row("Second", None),
            ])),
        );
        assert!(text.starts_with("== BBC News =="));
        assert!(text.contains(" 1. First"));
        assert!(text.contains(" 2. Second"));
        assert!(text.contains("BBC News | 2024-01-05"));
        assert!(text.contains("    Summary"));
    }

    #[test]
    fn failure_offers_retry() {
        let text = render(
            "BBC News",
            &ScreenViewModel::Content(ContentView::Failed {
                message: "Failed to load headlines: Network error".to_string(),
            }),
        );
        assert!(text.contains("Failed to load headlines: Network error"));
        assert!(text.contains("[t] retry"));
    }

    #[test]
    fn detail_includes_link() {
        let text = render_detail(&ArticleDetailView {
            title: "First".to_string(),
            byline: "BBC News".to_string(),
            published_at: "2024-01-05T10:00:00Z".to_string(),
            body: None,
            url: "https://www.bbc.co.uk/news/1".to_string(),
        });
        assert!(text.ends_with("Read more: https://www.bbc.co.uk/news/1"));
    }
}
