//! Skill Evidence Mapper: per-skill view of which bullets support a job requirement.
//!
//! Each skill mapping carries its own keywords and the requirement text it was taken
//! from (`job_source`). Status defers to the matching `RequirementStatus` when one exists.

use serde::{Deserialize, Serialize};

use crate::analysis::requirement_matcher::{contains_any, lowercase_all, RequirementStatus};
use crate::models::resume::{CoverageStatus, ResumeBullet};

/// Static authored link between a skill and a requirement of the job posting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillMapping {
    pub skill: String,
    pub required: bool,
    pub keywords: Vec<String>,
    pub job_source: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillStatus {
    Strong,
    Partial,
    Missing,
}

impl From<CoverageStatus> for SkillStatus {
    fn from(status: CoverageStatus) -> Self {
        match status {
            CoverageStatus::Covered => SkillStatus::Strong,
            CoverageStatus::Partial => SkillStatus::Partial,
            CoverageStatus::Missing => SkillStatus::Missing,
        }
    }
}

impl SkillStatus {
    pub fn label(&self) -> &'static str {
        match self {
            SkillStatus::Strong => "Well Evidenced",
            SkillStatus::Partial => "Needs Strengthening",
            SkillStatus::Missing => "No Evidence",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkillEvidence {
    pub skill: String,
    pub required: bool,
    pub status: SkillStatus,
    pub status_label: &'static str,
    pub bullets: Vec<String>, // supporting bullet texts
    pub gaps: Vec<String>,
    pub job_source: String,
}

/// Builds one `SkillEvidence` per mapping, in mapping order.
///
/// Returns an empty list when there are no bullets or no requirement statuses.
pub fn map_skills(
    bullets: &[ResumeBullet],
    requirement_status: &[RequirementStatus],
    skill_mappings: &[SkillMapping],
) -> Vec<SkillEvidence> {
    if bullets.is_empty() || requirement_status.is_empty() {
        return Vec::new();
    }

    skill_mappings
        .iter()
        .map(|mapping| {
            let keywords = lowercase_all(&mapping.keywords);
            let supporting: Vec<String> = bullets
                .iter()
                .filter(|b| contains_any(&b.text.to_lowercase(), &keywords))
                .map(|b| b.text.clone())
                .collect();

            let backing = requirement_status
                .iter()
                .find(|r| r.requirement == mapping.job_source);

            let status = match backing {
                Some(requirement) => SkillStatus::from(requirement.status),
                None => SkillStatus::from(CoverageStatus::from_match_count(supporting.len())),
            };

            SkillEvidence {
                skill: mapping.skill.clone(),
                required: mapping.required,
                status,
                status_label: status.label(),
                gaps: build_gaps(&mapping.skill, status, backing),
                bullets: supporting,
                job_source: mapping.job_source.clone(),
            }
        })
        .collect()
}

fn build_gaps(skill: &str, status: SkillStatus, backing: Option<&RequirementStatus>) -> Vec<String> {
    match status {
        SkillStatus::Strong => Vec::new(),
        SkillStatus::Missing => vec![format!("No evidence of {skill} found in your resume")],
        SkillStatus::Partial => {
            let mut gaps = vec![format!(
                "{skill} evidence could be strengthened with more specific examples"
            )];
            if let Some(requirement) = backing.filter(|r| r.matching_bullets == 1) {
                gaps.push(format!(
                    "Only {} bullet matches this requirement",
                    requirement.matching_bullets
                ));
            }
            gaps
        }
    }
}
