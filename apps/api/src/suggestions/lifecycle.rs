//! Suggestion lifecycle: active → completed, or active → dismissed.
//!
//! Owns the active/completed lists, the per-bullet set of used quick actions and
//! the direct-edit buffers. Every operation is total: stale ids coming from the
//! UI are absorbed and reported as `LifecycleOutcome::Ignored`, never as errors.
//!
//! Writes into the resume store happen only here.

use std::collections::{BTreeSet, HashMap};
use std::str::FromStr;

use chrono::Utc;
use serde::Serialize;
use tokio::time::Instant;
use tracing::{debug, info};

use crate::models::resume::ResumeStore;
use crate::models::suggestion::{CompletedSuggestion, Priority, Suggestion};
use crate::suggestions::collaborators::{Notification, Notifier};
use crate::suggestions::quick_edit::rewrite_for_action;
use crate::suggestions::recency::RecencyTracker;

// ────────────────────────────────────────────────────────────────────────────
// Outcomes and filters
// ────────────────────────────────────────────────────────────────────────────

/// Targets of a mutating lifecycle operation.
pub struct Effects<'a> {
    pub store: &'a mut ResumeStore,
    pub recency: &'a mut RecencyTracker,
    pub notifier: &'a dyn Notifier,
    pub now: Instant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IgnoredReason {
    UnknownSuggestion,
    NoLinkedBullet,
    UnknownBullet,
    UnknownAction,
    ActionAlreadyUsed,
    NoEditInProgress,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum LifecycleOutcome {
    Dismissed {
        suggestion_id: String,
    },
    RewriteApplied {
        suggestion_id: String,
        bullet_id: String,
    },
    QuickEditApplied {
        suggestion_id: String,
        bullet_id: String,
        completed: bool, // every quick action of the suggestion is now used
    },
    EditStarted {
        bullet_id: String,
    },
    EditUpdated {
        bullet_id: String,
    },
    EditSaved {
        bullet_id: String,
        changed: bool,
    },
    EditCancelled {
        bullet_id: String,
    },
    Ignored {
        reason: IgnoredReason,
    },
}

impl LifecycleOutcome {
    fn ignored(reason: IgnoredReason) -> Self {
        debug!("Lifecycle operation ignored: {reason:?}");
        LifecycleOutcome::Ignored { reason }
    }

    #[cfg(test)]
    pub fn is_ignored(&self) -> bool {
        matches!(self, LifecycleOutcome::Ignored { .. })
    }
}

/// Filter bar selection for the recommender list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SuggestionFilter {
    #[default]
    All,
    Only(Priority),
}

impl SuggestionFilter {
    pub fn as_str(&self) -> &'static str {
        match self {
            SuggestionFilter::All => "all",
            SuggestionFilter::Only(priority) => priority.as_str(),
        }
    }

    pub fn matches(&self, suggestion: &Suggestion) -> bool {
        match self {
            SuggestionFilter::All => true,
            SuggestionFilter::Only(priority) => suggestion.priority == *priority,
        }
    }
}

impl FromStr for SuggestionFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(SuggestionFilter::All),
            other => other.parse::<Priority>().map(SuggestionFilter::Only),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterCounts {
    pub all: usize,
    pub high_impact: usize,
    pub quick_fix: usize,
    pub skill_match: usize,
    pub missing_requirement: usize,
}

// ────────────────────────────────────────────────────────────────────────────
// Lifecycle manager
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default)]
pub struct SuggestionLifecycle {
    active: Vec<Suggestion>,
    completed: Vec<CompletedSuggestion>,
    used_actions: HashMap<String, BTreeSet<String>>, // bullet id → action ids
    edits: HashMap<String, String>,                  // bullet id → in-progress text
}

impl SuggestionLifecycle {
    pub fn new(suggestions: Vec<Suggestion>) -> Self {
        Self {
            active: suggestions,
            ..Self::default()
        }
    }

    pub fn active(&self) -> &[Suggestion] {
        &self.active
    }

    pub fn completed(&self) -> &[CompletedSuggestion] {
        &self.completed
    }

    pub fn get(&self, suggestion_id: &str) -> Option<&Suggestion> {
        self.active.iter().find(|s| s.id == suggestion_id)
    }

    pub fn filtered(&self, filter: SuggestionFilter) -> Vec<&Suggestion> {
        self.active.iter().filter(|s| filter.matches(s)).collect()
    }

    pub fn filter_counts(&self) -> FilterCounts {
        let count = |p: Priority| self.active.iter().filter(|s| s.priority == p).count();
        FilterCounts {
            all: self.active.len(),
            high_impact: count(Priority::HighImpact),
            quick_fix: count(Priority::QuickFix),
            skill_match: count(Priority::SkillMatch),
            missing_requirement: count(Priority::MissingRequirement),
        }
    }

    pub fn is_action_used(&self, bullet_id: &str, action_id: &str) -> bool {
        self.used_actions
            .get(bullet_id)
            .is_some_and(|used| used.contains(action_id))
    }

    pub fn used_actions(&self, bullet_id: &str) -> Vec<String> {
        self.used_actions
            .get(bullet_id)
            .map(|used| used.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Text that "apply" or "copy" would use for an active suggestion.
    pub fn final_rewrite(&self, suggestion_id: &str, selected_variant: Option<&str>) -> Option<String> {
        self.get(suggestion_id)
            .map(|s| s.final_rewrite(selected_variant).to_string())
    }

    /// Text a copy of the suggestion would carry. Unknown ids are ignored like
    /// every other operation.
    pub fn copy_text(
        &self,
        suggestion_id: &str,
        selected_variant: Option<&str>,
    ) -> Result<String, LifecycleOutcome> {
        self.final_rewrite(suggestion_id, selected_variant)
            .ok_or_else(|| LifecycleOutcome::ignored(IgnoredReason::UnknownSuggestion))
    }

    /// Discards an active suggestion. No other side effect.
    pub fn dismiss(&mut self, suggestion_id: &str) -> LifecycleOutcome {
        let before = self.active.len();
        self.active.retain(|s| s.id != suggestion_id);
        if self.active.len() == before {
            return LifecycleOutcome::ignored(IgnoredReason::UnknownSuggestion);
        }
        info!("Dismissed suggestion {suggestion_id}");
        LifecycleOutcome::Dismissed {
            suggestion_id: suggestion_id.to_string(),
        }
    }

    /// Replaces the linked bullet's text with `text` and completes the suggestion.
    ///
    /// All checks run before the first write, so either every effect happens
    /// (bullet text, recency mark, completion) or none does.
    pub fn apply_rewrite(
        &mut self,
        text: &str,
        suggestion_id: &str,
        fx: &mut Effects<'_>,
    ) -> LifecycleOutcome {
        let Some(index) = self.active.iter().position(|s| s.id == suggestion_id) else {
            return LifecycleOutcome::ignored(IgnoredReason::UnknownSuggestion);
        };
        let Some(bullet_id) = self.active[index].before_bullet_id.clone() else {
            return LifecycleOutcome::ignored(IgnoredReason::NoLinkedBullet);
        };
        if !fx.store.replace_text(&bullet_id, text) {
            return LifecycleOutcome::ignored(IgnoredReason::UnknownBullet);
        }

        fx.recency.mark(&bullet_id, fx.now);
        self.complete(index);
        info!("Applied rewrite from suggestion {suggestion_id} to bullet {bullet_id}");

        fx.notifier.notify(Notification::RewriteApplied {
            suggestion_id: suggestion_id.to_string(),
            bullet_id: bullet_id.clone(),
        });

        LifecycleOutcome::RewriteApplied {
            suggestion_id: suggestion_id.to_string(),
            bullet_id,
        }
    }

    /// Applies one quick action of the suggestion linked to `bullet_id`.
    ///
    /// Idempotent per (bullet, action). Using the last unused quick action
    /// completes the suggestion exactly like `apply_rewrite`.
    pub fn quick_edit(
        &mut self,
        bullet_id: &str,
        action_id: &str,
        fx: &mut Effects<'_>,
    ) -> LifecycleOutcome {
        if self.is_action_used(bullet_id, action_id) {
            return LifecycleOutcome::ignored(IgnoredReason::ActionAlreadyUsed);
        }
        let Some(index) = self
            .active
            .iter()
            .position(|s| s.before_bullet_id.as_deref() == Some(bullet_id))
        else {
            return LifecycleOutcome::ignored(IgnoredReason::UnknownSuggestion);
        };

        let suggestion = &self.active[index];
        let Some(action) = suggestion.quick_actions.iter().find(|qa| qa.id == action_id) else {
            return LifecycleOutcome::ignored(IgnoredReason::UnknownAction);
        };
        let Some(bullet) = fx.store.get(bullet_id) else {
            return LifecycleOutcome::ignored(IgnoredReason::UnknownBullet);
        };

        let new_text = rewrite_for_action(suggestion, action, &bullet.text);
        let action_label = action.label.clone();
        let suggestion_id = suggestion.id.clone();
        let action_ids: Vec<String> = suggestion.quick_actions.iter().map(|qa| qa.id.clone()).collect();

        fx.store.replace_text(bullet_id, &new_text);
        fx.recency.mark(bullet_id, fx.now);

        let used = self.used_actions.entry(bullet_id.to_string()).or_default();
        used.insert(action_id.to_string());
        let exhausted = action_ids.iter().all(|id| used.contains(id));

        if exhausted {
            self.complete(index);
            info!("All quick actions used on bullet {bullet_id}; suggestion {suggestion_id} completed");
            fx.notifier.notify(Notification::AllQuickActionsApplied {
                suggestion_id: suggestion_id.clone(),
            });
        } else {
            info!("Applied quick action {action_id} to bullet {bullet_id}");
            fx.notifier.notify(Notification::QuickEditApplied {
                bullet_id: bullet_id.to_string(),
                action_label,
            });
        }

        LifecycleOutcome::QuickEditApplied {
            suggestion_id,
            bullet_id: bullet_id.to_string(),
            completed: exhausted,
        }
    }

    // ── Direct edits ────────────────────────────────────────────────────────

    /// Opens an edit buffer seeded with the bullet's current text.
    pub fn begin_edit(&mut self, bullet_id: &str, store: &ResumeStore) -> LifecycleOutcome {
        let Some(bullet) = store.get(bullet_id) else {
            return LifecycleOutcome::ignored(IgnoredReason::UnknownBullet);
        };
        self.edits.insert(bullet_id.to_string(), bullet.text.clone());
        LifecycleOutcome::EditStarted {
            bullet_id: bullet_id.to_string(),
        }
    }

    pub fn edit_text(&self, bullet_id: &str) -> Option<&str> {
        self.edits.get(bullet_id).map(String::as_str)
    }

    pub fn set_edit_text(&mut self, bullet_id: &str, text: &str) -> LifecycleOutcome {
        match self.edits.get_mut(bullet_id) {
            Some(buffer) => {
                *buffer = text.to_string();
                LifecycleOutcome::EditUpdated {
                    bullet_id: bullet_id.to_string(),
                }
            }
            None => LifecycleOutcome::ignored(IgnoredReason::NoEditInProgress),
        }
    }

    pub fn cancel_edit(&mut self, bullet_id: &str) -> LifecycleOutcome {
        match self.edits.remove(bullet_id) {
            Some(_) => LifecycleOutcome::EditCancelled {
                bullet_id: bullet_id.to_string(),
            },
            None => LifecycleOutcome::ignored(IgnoredReason::NoEditInProgress),
        }
    }

    /// Writes the edit buffer into the bullet. Recency and notification only fire
    /// when the text actually changed.
    pub fn save_edit(&mut self, bullet_id: &str, fx: &mut Effects<'_>) -> LifecycleOutcome {
        let Some(buffer) = self.edits.remove(bullet_id) else {
            return LifecycleOutcome::ignored(IgnoredReason::NoEditInProgress);
        };
        let Some(bullet) = fx.store.get(bullet_id) else {
            return LifecycleOutcome::ignored(IgnoredReason::UnknownBullet);
        };

        let changed = bullet.text != buffer;
        if changed {
            fx.store.replace_text(bullet_id, &buffer);
            fx.recency.mark(bullet_id, fx.now);
            info!("Saved direct edit to bullet {bullet_id}");
            fx.notifier.notify(Notification::EditSaved {
                bullet_id: bullet_id.to_string(),
            });
        }

        LifecycleOutcome::EditSaved {
            bullet_id: bullet_id.to_string(),
            changed,
        }
    }

    fn complete(&mut self, index: usize) {
        let suggestion = self.active.remove(index);
        self.completed.push(CompletedSuggestion {
            suggestion,
            completed_at: Utc::now(),
        });
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
