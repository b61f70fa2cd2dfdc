//! Quick edits: computes the new bullet text for a single quick action.

use crate::models::suggestion::{QuickAction, Suggestion};

/// Leading markers meaning "keep the bullet, replace its trailing clause".
const ELLIPSIS_MARKERS: &[&str] = &["...", "…"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuickActionKind {
    AddMetric,
    StrengthenVerb,
    Other,
}

impl QuickActionKind {
    /// `qa1` is always "add metric" and `qa2` always "strengthen verb"; other ids
    /// are classified by the words "metric" / "verb" in the id or label.
    pub fn classify(action: &QuickAction) -> Self {
        let haystack = format!("{} {}", action.id, action.label).to_lowercase();
        if action.id == "qa1" || haystack.contains("metric") {
            QuickActionKind::AddMetric
        } else if action.id == "qa2" || haystack.contains("verb") {
            QuickActionKind::StrengthenVerb
        } else {
            QuickActionKind::Other
        }
    }
}

/// Returns the bullet text after applying `action` from `suggestion` to `current`.
pub fn rewrite_for_action(suggestion: &Suggestion, action: &QuickAction, current: &str) -> String {
    match QuickActionKind::classify(action) {
        QuickActionKind::AddMetric => suggestion.suggested_rewrite.clone(),
        QuickActionKind::StrengthenVerb => suggestion
            .alternatives
            .iter()
            .find(|alt| alt.label.contains("action-focused"))
            .map(|alt| alt.text.clone())
            .unwrap_or_else(|| suggestion.suggested_rewrite.clone()),
        QuickActionKind::Other => apply_preview(current, &action.preview),
    }
}

/// Applies a preview to the current text.
///
/// A preview starting with an ellipsis replaces the trailing clause: everything
/// after the bullet's last comma is swapped for the remainder. A bullet without a
/// comma is kept whole (trailing period trimmed), so the result never begins with
/// a bare ", ". Leading whitespace of the remainder is dropped. Any other preview
/// replaces the text verbatim.
fn apply_preview(current: &str, preview: &str) -> String {
    if preview.is_empty() {
        return current.to_string();
    }

    let Some(remainder) = ELLIPSIS_MARKERS
        .iter()
        .find_map(|marker| preview.strip_prefix(*marker))
    else {
        return preview.to_string();
    };

    // Keep everything before the last comma; without one, keep the whole bullet
    let head = match current.rfind(',') {
        Some(idx) => &current[..idx],
        None => current.trim_end_matches(|c: char| c == '.' || c.is_whitespace()),
    };
    format!("{head}, {}", remainder.trim_start())
}
