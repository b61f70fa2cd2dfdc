//! Insights: resume-level summary derived from requirement coverage and bullet text.
//!
//! Strengths and weaknesses are literal predicates evaluated once per recompute.
//! They are intentionally simple; do not turn them into weighted rules.

use serde::{Deserialize, Serialize};

use crate::analysis::requirement_matcher::{percent_of, RequirementStatus};
use crate::models::resume::{CoverageStatus, ResumeBullet};

/// Domain terms counted for the keyword frequency table.
const KEYWORD_VOCABULARY: &[&str] = &[
    "react",
    "typescript",
    "dashboard",
    "team",
    "data",
    "api",
    "graphql",
    "python",
    "collaboration",
];

const TOP_KEYWORD_LIMIT: usize = 6;

/// Verbs that count as a strong opener for a bullet.
const STRONG_VERBS: &[&str] = &[
    "built",
    "created",
    "designed",
    "developed",
    "led",
    "managed",
    "implemented",
    "optimized",
    "delivered",
    "launched",
    "owned",
    "architected",
    "spearheaded",
    "drove",
    "shipped",
];

const IMPACT_WORDS: &[&str] = &["increase", "reduce", "improve"];
const WEAK_PHRASES: &[&str] = &["worked with", "worked on"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordFrequency {
    pub word: String,
    pub frequency: usize, // bullets containing the word, not occurrences
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsightsSummary {
    pub overall_score: u32,         // 0 – 100
    pub improvement_potential: u32, // 0 – 100
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub top_keywords: Vec<KeywordFrequency>,
    pub missing_critical: Vec<String>,
}

/// Summarizes the resume against the current requirement coverage.
pub fn summarize(bullets: &[ResumeBullet], requirement_status: &[RequirementStatus]) -> InsightsSummary {
    let texts: Vec<String> = bullets.iter().map(|b| b.text.to_lowercase()).collect();

    let covered = requirement_status
        .iter()
        .filter(|r| r.status == CoverageStatus::Covered)
        .count();
    let overall_score = percent_of(covered, requirement_status.len());

    let missing_critical = requirement_status
        .iter()
        .filter(|r| r.status == CoverageStatus::Missing)
        .map(|r| r.requirement.clone())
        .collect();

    InsightsSummary {
        overall_score,
        improvement_potential: 100u32.saturating_sub(overall_score),
        strengths: build_strengths(&texts, covered),
        weaknesses: build_weaknesses(bullets, &texts),
        top_keywords: count_top_keywords(&texts),
        missing_critical,
    }
}

fn build_strengths(texts: &[String], covered: usize) -> Vec<String> {
    let mut strengths = Vec::new();

    if covered >= 2 {
        strengths.push(format!(
            "Strong keyword coverage - {covered} requirements fully covered"
        ));
    }
    if texts.iter().any(|t| starts_with_strong_verb(t)) {
        strengths.push("Clear action verbs used to open bullets".to_string());
    }
    if texts.iter().any(|t| t.contains("dashboard")) {
        strengths.push("Dashboard and data visualization experience mentioned".to_string());
    }

    strengths
}

fn build_weaknesses(bullets: &[ResumeBullet], texts: &[String]) -> Vec<String> {
    let mut weaknesses = Vec::new();

    let has_impact_evidence = bullets.iter().zip(texts).any(|(bullet, lower)| {
        bullet.text.contains('%')
            || bullet.text.chars().any(|c| c.is_ascii_digit())
            || IMPACT_WORDS.iter().any(|w| lower.contains(w))
    });
    if !has_impact_evidence {
        weaknesses.push("Missing quantifiable metrics or measurable impact".to_string());
    }
    if !texts.iter().any(|t| t.contains("graphql")) {
        weaknesses.push("No mention of GraphQL experience".to_string());
    }
    if !texts.iter().any(|t| t.contains("python")) {
        weaknesses.push("No mention of Python experience".to_string());
    }
    if texts
        .iter()
        .any(|t| WEAK_PHRASES.iter().any(|p| t.contains(p)))
    {
        weaknesses
            .push("Weak action verbs in some bullets (\"Worked with\", \"Worked on\")".to_string());
    }

    weaknesses
}

/// `text` must be lower-cased.
fn starts_with_strong_verb(text: &str) -> bool {
    let first_word = text
        .split_whitespace()
        .next()
        .map(|w| w.trim_matches(|c: char| !c.is_alphanumeric()))
        .unwrap_or("");
    STRONG_VERBS.contains(&first_word)
}

fn count_top_keywords(texts: &[String]) -> Vec<KeywordFrequency> {
    let mut counts: Vec<KeywordFrequency> = KEYWORD_VOCABULARY
        .iter()
        .map(|term| KeywordFrequency {
            word: title_case(term),
            frequency: texts.iter().filter(|t| t.contains(term)).count(),
        })
        .filter(|k| k.frequency > 0)
        .collect();

    // Stable: ties keep vocabulary order
    counts.sort_by(|a, b| b.frequency.cmp(&a.frequency));
    counts.truncate(TOP_KEYWORD_LIMIT);
    counts
}

fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
    }
}

/// Human label for a 0 – 100 match score.
pub fn match_strength_label(score: u32) -> &'static str {
    match score {
        s if s >= 80 => "Excellent",
        s if s >= 60 => "Good",
        s if s >= 40 => "Moderate",
        _ => "Weak",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_bullet(text: &str) -> ResumeBullet {
        ResumeBullet {
            id: "rb".to_string(),
            text: text.to_string(),
            section: "Experience".to_string(),
        }
    }

    fn make_status(requirement: &str, status: CoverageStatus) -> RequirementStatus {
        RequirementStatus {
            id: "1".to_string(),
            requirement: requirement.to_string(),
            status,
            matching_bullets: match status {
                CoverageStatus::Missing => 0,
                CoverageStatus::Partial => 1,
                CoverageStatus::Covered => 2,
            },
        }
    }

    fn seed_bullets() -> Vec<ResumeBullet> {
        vec![
            make_bullet("Built and maintained React + TypeScript dashboards used daily by sales teams."),
            make_bullet("Created automation scripts for reporting."),
            make_bullet("Worked with team to build customer portal."),
            make_bullet("Worked on API development."),
        ]
    }

    #[test]
    fn test_score_is_share_of_covered_requirements() {
        let statuses = vec![
            make_status("A", CoverageStatus::Covered),
            make_status("B", CoverageStatus::Covered),
            make_status("C", CoverageStatus::Partial),
        ];
        let summary = summarize(&seed_bullets(), &statuses);
        assert_eq!(summary.overall_score, 67);
        assert_eq!(summary.improvement_potential, 33);
    }

    #[test]
    fn test_empty_requirements_score_zero() {
        let summary = summarize(&seed_bullets(), &[]);
        assert_eq!(summary.overall_score, 0);
        assert_eq!(summary.improvement_potential, 100);
        assert!(summary.missing_critical.is_empty());
    }

    #[test]
    fn test_score_bounded_0_to_100() {
        let statuses: Vec<_> = (0..5)
            .map(|i| make_status(&format!("R{i}"), CoverageStatus::Covered))
            .collect();
        let summary = summarize(&[], &statuses);
        assert_eq!(summary.overall_score, 100);
        assert_eq!(summary.improvement_potential, 0);
    }

    #[test]
    fn test_missing_critical_in_status_order() {
        let statuses = vec![
            make_status("GraphQL", CoverageStatus::Missing),
            make_status("React", CoverageStatus::Covered),
            make_status("Python", CoverageStatus::Missing),
        ];
        let summary = summarize(&seed_bullets(), &statuses);
        assert_eq!(summary.missing_critical, vec!["GraphQL", "Python"]);
    }

    #[test]
    fn test_seed_resume_weaknesses() {
        let summary = summarize(&seed_bullets(), &[]);
        assert_eq!(
            summary.weaknesses,
            vec![
                "Missing quantifiable metrics or measurable impact",
                "No mention of GraphQL experience",
                "No mention of Python experience",
                "Weak action verbs in some bullets (\"Worked with\", \"Worked on\")",
            ]
        );
    }

    #[test]
    fn test_seed_resume_strengths() {
        let statuses = vec![make_status("React", CoverageStatus::Covered)];
        let summary = summarize(&seed_bullets(), &statuses);
        // Only one covered requirement: no keyword coverage strength
        assert_eq!(
            summary.strengths,
            vec![
                "Clear action verbs used to open bullets",
                "Dashboard and data visualization experience mentioned",
            ]
        );
    }

    #[test]
    fn test_keyword_coverage_strength_needs_two_covered() {
        let statuses = vec![
            make_status("A", CoverageStatus::Covered),
            make_status("B", CoverageStatus::Covered),
        ];
        let summary = summarize(&[], &statuses);
        assert_eq!(summary.strengths.len(), 1);
        assert!(summary.strengths[0].contains("2 requirements"));
    }

    #[test]
    fn test_digit_percent_or_impact_word_clears_metrics_weakness() {
        for text in ["Cut costs by 40%", "Served 2M users", "Helped reduce churn"] {
            let summary = summarize(&[make_bullet(text)], &[]);
            assert!(
                !summary.weaknesses.iter().any(|w| w.contains("quantifiable")),
                "'{text}' should count as impact evidence"
            );
        }
    }

    #[test]
    fn test_strong_verb_must_open_the_bullet() {
        assert!(starts_with_strong_verb("led cross-functional team"));
        assert!(starts_with_strong_verb("built, tested and shipped"));
        assert!(!starts_with_strong_verb("worked with team that built it"));
        assert!(!starts_with_strong_verb("leadership of teams"));
        assert!(!starts_with_strong_verb(""));
    }

    #[test]
    fn test_top_keywords_count_bullets_not_occurrences() {
        let bullets = vec![
            make_bullet("Data data data pipelines for the team."),
            make_bullet("Team dashboards in React."),
            make_bullet("React and GraphQL APIs."),
        ];
        let summary = summarize(&bullets, &[]);
        let table: Vec<(&str, usize)> = summary
            .top_keywords
            .iter()
            .map(|k| (k.word.as_str(), k.frequency))
            .collect();
        assert_eq!(
            table,
            vec![
                ("React", 2),
                ("Team", 2),
                ("Dashboard", 1),
                ("Data", 1),
                ("Api", 1),
                ("Graphql", 1),
            ]
        );
    }

    #[test]
    fn test_top_keywords_capped_at_six() {
        let bullets = vec![make_bullet(
            "React TypeScript dashboard team data API GraphQL Python collaboration",
        )];
        let summary = summarize(&bullets, &[]);
        assert_eq!(summary.top_keywords.len(), TOP_KEYWORD_LIMIT);
        assert_eq!(summary.top_keywords[0].word, "React");
    }

    #[test]
    fn test_match_strength_labels() {
        assert_eq!(match_strength_label(85), "Excellent");
        assert_eq!(match_strength_label(65), "Good");
        assert_eq!(match_strength_label(45), "Moderate");
        assert_eq!(match_strength_label(10), "Weak");
    }
}
