//! Requirement Matcher: classifies each job requirement as missing, partial or covered
//! against the current resume bullets.
//!
//! Pure function of (bullets, definitions). Matching is per bullet: a bullet either
//! supports a requirement or it doesn't, no matter how many keywords it contains.

use serde::{Deserialize, Serialize};

use crate::models::resume::{CoverageStatus, RequirementDefinition, ResumeBullet};

// ────────────────────────────────────────────────────────────────────────────
// Output data models
// ────────────────────────────────────────────────────────────────────────────

/// Derived coverage of one requirement. Never stored; recomputed on every change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequirementStatus {
    pub id: String,
    pub requirement: String,
    pub status: CoverageStatus,
    pub matching_bullets: usize,
}

/// Counts backing the alignment status bar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoverageSummary {
    pub covered: usize,
    pub partial: usize,
    pub missing: usize,
    pub total: usize,
    pub coverage_percent: u32, // 0 – 100
}

impl CoverageSummary {
    pub fn from_statuses(statuses: &[RequirementStatus]) -> Self {
        let count = |s: CoverageStatus| statuses.iter().filter(|r| r.status == s).count();
        let covered = count(CoverageStatus::Covered);
        let total = statuses.len();
        CoverageSummary {
            covered,
            partial: count(CoverageStatus::Partial),
            missing: count(CoverageStatus::Missing),
            total,
            coverage_percent: percent_of(covered, total),
        }
    }
}

/// round(100 × part / total), 0 when total is 0.
pub fn percent_of(part: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    ((part as f64 / total as f64) * 100.0).round() as u32
}

// ────────────────────────────────────────────────────────────────────────────
// Matching
// ────────────────────────────────────────────────────────────────────────────

/// Computes a coverage status per definition, in definition order.
///
/// Algorithm, per definition:
/// 1. If `primary_keywords` is non-empty, only bullets containing one of them are candidates
/// 2. A candidate matches if any keyword is a case-insensitive substring of its text
/// 3. status = missing (0 matches), partial (1), covered (2+)
pub fn match_requirements(
    bullets: &[ResumeBullet],
    definitions: &[RequirementDefinition],
) -> Vec<RequirementStatus> {
    let bullet_texts: Vec<String> = bullets.iter().map(|b| b.text.to_lowercase()).collect();

    definitions
        .iter()
        .map(|definition| {
            let matching_bullets = count_matching_bullets(&bullet_texts, definition);
            RequirementStatus {
                id: definition.id.clone(),
                requirement: definition.requirement.clone(),
                status: CoverageStatus::from_match_count(matching_bullets),
                matching_bullets,
            }
        })
        .collect()
}

fn count_matching_bullets(bullet_texts: &[String], definition: &RequirementDefinition) -> usize {
    let primary = lowercase_all(&definition.primary_keywords);
    let keywords = lowercase_all(&definition.keywords);

    bullet_texts
        .iter()
        .filter(|text| {
            if !primary.is_empty() && !contains_any(text, &primary) {
                return false;
            }
            contains_any(text, &keywords)
        })
        .count()
}

pub(crate) fn lowercase_all(words: &[String]) -> Vec<String> {
    words.iter().map(|w| w.to_lowercase()).collect()
}

/// `text` and `needles` must already be lower-cased.
pub(crate) fn contains_any(text: &str, needles: &[String]) -> bool {
    needles.iter().any(|n| text.contains(n.as_str()))
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
