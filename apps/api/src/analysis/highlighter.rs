//! Keyword Highlighter: splits text into plain and keyword spans for rendering.
//!
//! The spans always concatenate back to the input text. Single-word keywords are
//! anchored on word boundaries; keywords containing a space are matched as raw
//! substrings. That asymmetry is part of the rendering contract.

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    pub text: String,
    pub is_keyword: bool,
    #[serde(default)]
    pub is_highlighted: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keyword: Option<String>, // keyword that produced the match
}

impl Span {
    fn plain(text: &str) -> Self {
        Span {
            text: text.to_string(),
            is_keyword: false,
            is_highlighted: false,
            keyword: None,
        }
    }
}

/// Splits `text` into spans, marking keyword matches.
///
/// Algorithm:
/// 1. Sort keywords longest first so phrases win over their own substrings
/// 2. Build one case-insensitive alternation, one capture group per keyword
/// 3. Take leftmost, non-overlapping matches; gaps become plain spans
/// 4. Flag a match as highlighted when it is fuzzily related to `active_keyword`
pub fn highlight(text: &str, keywords: &[String], active_keyword: Option<&str>) -> Vec<Span> {
    let mut sorted: Vec<&str> = keywords
        .iter()
        .map(String::as_str)
        .filter(|k| !k.is_empty())
        .collect();

    if text.is_empty() || sorted.is_empty() {
        return vec![Span::plain(text)];
    }

    sorted.sort_by(|a, b| b.chars().count().cmp(&a.chars().count()));

    let pattern = match build_pattern(&sorted) {
        Ok(p) => p,
        Err(e) => {
            warn!("Keyword pattern rejected, rendering plain text: {e}");
            return vec![Span::plain(text)];
        }
    };

    let mut spans = Vec::new();
    let mut last_index = 0;

    for caps in pattern.captures_iter(text) {
        let Some(whole) = caps.get(0) else { continue };

        if whole.start() > last_index {
            spans.push(Span::plain(&text[last_index..whole.start()]));
        }

        // Group i + 1 belongs to sorted[i]
        let keyword = (1..caps.len())
            .find(|&i| caps.get(i).is_some())
            .map(|i| sorted[i - 1].to_string());

        let is_highlighted = match (active_keyword, keyword.as_deref()) {
            (Some(active), Some(kw)) => is_fuzzy_related(active, kw),
            _ => false,
        };

        spans.push(Span {
            text: whole.as_str().to_string(),
            is_keyword: true,
            is_highlighted,
            keyword,
        });
        last_index = whole.end();
    }

    if last_index < text.len() {
        spans.push(Span::plain(&text[last_index..]));
    }

    spans
}

fn build_pattern(sorted_keywords: &[&str]) -> Result<Regex, regex::Error> {
    let alternation = sorted_keywords
        .iter()
        .map(|keyword| {
            let escaped = regex::escape(keyword);
            if keyword.contains(' ') {
                format!("({escaped})")
            } else {
                format!(r"(\b{escaped}\b)")
            }
        })
        .collect::<Vec<_>>()
        .join("|");

    RegexBuilder::new(&alternation)
        .case_insensitive(true)
        .build()
}

/// Either string contains the other, ignoring case.
fn is_fuzzy_related(active: &str, keyword: &str) -> bool {
    let active = active.to_lowercase();
    let keyword = keyword.to_lowercase();
    !active.is_empty() && (keyword.contains(&active) || active.contains(&keyword))
}
