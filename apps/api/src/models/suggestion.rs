use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Category a suggestion is filed under in the recommender.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Priority {
    HighImpact,
    QuickFix,
    SkillMatch,
    MissingRequirement,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::HighImpact => "high-impact",
            Priority::QuickFix => "quick-fix",
            Priority::SkillMatch => "skill-match",
            Priority::MissingRequirement => "missing-requirement",
        }
    }
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "high-impact" => Ok(Priority::HighImpact),
            "quick-fix" => Ok(Priority::QuickFix),
            "skill-match" => Ok(Priority::SkillMatch),
            "missing-requirement" => Ok(Priority::MissingRequirement),
            other => Err(format!("unknown priority '{other}'")),
        }
    }
}

/// A full alternative rewrite, e.g. "Alternative 1 (action-focused)".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alternative {
    pub id: String,
    pub label: String,
    pub text: String,
}

/// A small pre-authored edit applicable without adopting the full rewrite.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuickAction {
    pub id: String,
    pub label: String,
    #[serde(default)]
    pub preview: String,
}

/// A proposed rewrite of one resume bullet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    pub id: String,
    pub goal: String,
    pub keywords: Vec<String>,
    pub suggested_rewrite: String,
    pub before_text: String,
    pub before_bullet_id: Option<String>,
    #[serde(default)]
    pub alternatives: Vec<Alternative>,
    pub priority: Priority,
    #[serde(default)]
    pub quick_actions: Vec<QuickAction>,
    #[serde(default)]
    pub explanation: String,
    #[serde(default)]
    pub rationale: String,
    #[serde(default)]
    pub job_requirement: String,
    /// 0 – 100
    #[serde(default)]
    pub match_strength: u32,
    #[serde(default)]
    pub is_top_priority: bool,
}

impl Suggestion {
    /// Flagged suggestions plus everything filed as high-impact or missing-requirement.
    pub fn is_high_priority(&self) -> bool {
        self.is_top_priority
            || matches!(
                self.priority,
                Priority::HighImpact | Priority::MissingRequirement
            )
    }

    /// Text of the selected alternative, falling back to the suggested rewrite.
    pub fn final_rewrite(&self, selected_variant: Option<&str>) -> &str {
        selected_variant
            .and_then(|id| self.alternatives.iter().find(|a| a.id == id))
            .map(|a| a.text.as_str())
            .unwrap_or(&self.suggested_rewrite)
    }
}

/// A suggestion that reached its terminal "done" state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletedSuggestion {
    #[serde(flatten)]
    pub suggestion: Suggestion,
    pub completed_at: DateTime<Utc>,
}
