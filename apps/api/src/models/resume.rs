use serde::{Deserialize, Serialize};

/// A single resume statement. The unit of editing and matching.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResumeBullet {
    pub id: String,
    pub text: String,
    pub section: String,
}

/// One demand of the job posting, backed by a literal keyword list.
///
/// When `primary_keywords` is non-empty, a bullet must mention one of them
/// before any of `keywords` is allowed to count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequirementDefinition {
    pub id: String,
    pub requirement: String,
    pub keywords: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub primary_keywords: Vec<String>,
}

/// Coverage of a requirement by the current bullets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoverageStatus {
    Missing,
    Partial,
    Covered,
}

impl CoverageStatus {
    /// 0 → missing, 1 → partial, 2+ → covered.
    pub fn from_match_count(count: usize) -> Self {
        match count {
            0 => CoverageStatus::Missing,
            1 => CoverageStatus::Partial,
            _ => CoverageStatus::Covered,
        }
    }
}

/// Ordered list of bullets owned by the caller. Text replacement is the only write path.
#[derive(Debug, Clone, Default)]
pub struct ResumeStore {
    bullets: Vec<ResumeBullet>,
}

impl ResumeStore {
    pub fn new(bullets: Vec<ResumeBullet>) -> Self {
        Self { bullets }
    }

    pub fn bullets(&self) -> &[ResumeBullet] {
        &self.bullets
    }

    pub fn get(&self, id: &str) -> Option<&ResumeBullet> {
        self.bullets.iter().find(|b| b.id == id)
    }

    /// Replaces the text of bullet `id`. Returns false when the bullet does not exist.
    pub fn replace_text(&mut self, id: &str, text: &str) -> bool {
        match self.bullets.iter_mut().find(|b| b.id == id) {
            Some(bullet) => {
                bullet.text = text.to_string();
                true
            }
            None => false,
        }
    }
}
