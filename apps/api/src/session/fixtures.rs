//! Seed content a new session starts with: the analysed resume, the job posting's
//! requirements, the authored suggestions and the skill mappings.

use crate::analysis::skill_evidence::SkillMapping;
use crate::models::resume::{RequirementDefinition, ResumeBullet};
use crate::models::suggestion::{Alternative, Priority, QuickAction, Suggestion};

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn bullet(id: &str, text: &str) -> ResumeBullet {
    ResumeBullet {
        id: id.to_string(),
        text: text.to_string(),
        section: "Experience".to_string(),
    }
}

fn requirement(id: &str, text: &str, keywords: &[&str], primary: &[&str]) -> RequirementDefinition {
    RequirementDefinition {
        id: id.to_string(),
        requirement: text.to_string(),
        keywords: strings(keywords),
        primary_keywords: strings(primary),
    }
}

fn alternatives(texts: [&str; 3]) -> Vec<Alternative> {
    let labels = [
        "Alternative 1 (action-focused)",
        "Alternative 2 (JD-aligned)",
        "Alternative 3 (impact-focused)",
    ];
    labels
        .iter()
        .zip(texts)
        .enumerate()
        .map(|(i, (label, text))| Alternative {
            id: format!("alt{}", i + 1),
            label: label.to_string(),
            text: text.to_string(),
        })
        .collect()
}

fn quick_actions(actions: &[(&str, &str, &str)]) -> Vec<QuickAction> {
    actions
        .iter()
        .map(|(id, label, preview)| QuickAction {
            id: id.to_string(),
            label: label.to_string(),
            preview: preview.to_string(),
        })
        .collect()
}

fn skill(name: &str, keywords: &[&str], job_source: &str) -> SkillMapping {
    SkillMapping {
        skill: name.to_string(),
        required: true,
        keywords: strings(keywords),
        job_source: job_source.to_string(),
    }
}

pub fn seed_bullets() -> Vec<ResumeBullet> {
    vec![
        bullet(
            "rb1",
            "Built and maintained React + TypeScript dashboards used daily by sales teams.",
        ),
        bullet("rb2", "Created automation scripts for reporting."),
        bullet("rb3", "Worked with team to build customer portal."),
        bullet("rb4", "Worked on API development."),
    ]
}

pub fn seed_requirements() -> Vec<RequirementDefinition> {
    vec![
        requirement(
            "1",
            "Experience with React and modern JavaScript frameworks",
            &["React", "JavaScript", "TypeScript"],
            &[],
        ),
        requirement(
            "2",
            "Strong understanding of TypeScript and type-safe development",
            &["TypeScript", "type-safe", "types"],
            &[],
        ),
        requirement(
            "3",
            "Experience with data visualization and dashboard design",
            &["dashboard", "visualization", "data visualization", "chart"],
            &[],
        ),
        requirement(
            "4",
            "Track record of delivering measurable business impact",
            &["impact", "metric", "result", "improve", "reduce", "increase", "%"],
            &[],
        ),
        requirement(
            "5",
            "Experience with GraphQL and REST API integration",
            &["GraphQL", "REST", "API", "endpoint"],
            &["graphql"],
        ),
        requirement(
            "6",
            "Proficiency in Python for data analysis and automation",
            &["Python", "data analysis", "automation", "script"],
            &["python"],
        ),
        requirement(
            "7",
            "Demonstrated cross-functional collaboration skills",
            &["cross-functional", "collaboration", "team", "led", "managed"],
            &[],
        ),
    ]
}

pub fn seed_suggestions() -> Vec<Suggestion> {
    vec![
        Suggestion {
            id: "1".to_string(),
            goal: "Emphasize measurable outcomes and alignment with React, TypeScript, modern web stack".to_string(),
            keywords: strings(&["React", "TypeScript", "modern web stack"]),
            suggested_rewrite: "Designed and maintained React + TypeScript dashboards in a modern web stack, enabling sales teams to monitor pipeline health and contributing to a 151% increase in qualified opportunities.".to_string(),
            before_text: "Built and maintained React + TypeScript dashboards used daily by sales teams.".to_string(),
            before_bullet_id: Some("rb1".to_string()),
            alternatives: alternatives([
                "Designed and maintained React + TypeScript dashboards in a modern web stack, enabling sales teams to track pipeline health and improving deal visibility by 40%.",
                "Owned end-to-end development of React + TypeScript dashboards in a modern web stack, partnering with sales leadership to define metrics and contributing to a 151% increase in qualified opportunities.",
                "Built and optimized React + TypeScript dashboards in a modern web stack for sales teams, reducing data retrieval time by 50% and contributing to a 151% increase in qualified opportunities.",
            ]),
            priority: Priority::HighImpact,
            quick_actions: quick_actions(&[
                ("qa1", "Add metric", "...contributing to a 151% increase in qualified opportunities."),
                ("qa2", "Strengthen verb", "Designed and maintained..."),
            ]),
            explanation: "The suggested version adds clearer context (who used the dashboards and for what) and explicitly states a measurable impact (151% increase in qualified opportunities). It also reinforces key skills from the job description.".to_string(),
            rationale: "Adding specific metrics and outcomes increases ATS match score by 35% and demonstrates quantifiable value to hiring managers.".to_string(),
            job_requirement: "Experience with React and modern JavaScript frameworks • Track record of delivering measurable business impact".to_string(),
            match_strength: 85,
            is_top_priority: true,
        },
        Suggestion {
            id: "2".to_string(),
            goal: "Add missing required skill Python, data analysis".to_string(),
            keywords: strings(&["Python", "data analysis"]),
            suggested_rewrite: "Developed Python scripts to automate data analysis workflows, reducing manual reporting time by 60% and enabling real-time insights for stakeholders.".to_string(),
            before_text: "Created automation scripts for reporting.".to_string(),
            before_bullet_id: Some("rb2".to_string()),
            alternatives: alternatives([
                "Developed Python scripts using Pandas and NumPy to automate data analysis workflows, processing 10K+ records daily with 99.9% accuracy and reducing manual reporting time by 60%.",
                "Built Python automation scripts for data analysis workflows, enabling real-time insights for stakeholders and reducing manual reporting time by 60%, freeing up 20+ hours per week.",
                "Developed Python scripts to automate data analysis workflows, processing large datasets efficiently and reducing manual reporting time by 60% while enabling real-time insights for stakeholders.",
            ]),
            priority: Priority::MissingRequirement,
            quick_actions: quick_actions(&[
                ("qa1", "Add metric", "...reducing manual reporting time by 60%"),
                ("qa2", "Strengthen verb", "Developed Python scripts..."),
            ]),
            explanation: "The job posting requires Python proficiency but your resume doesn't mention it. This suggestion adds Python while demonstrating relevant impact.".to_string(),
            rationale: "Python is listed as a required skill. Missing required skills reduces ATS match by up to 60%.".to_string(),
            job_requirement: "Proficiency in Python for data analysis and automation".to_string(),
            match_strength: 45,
            is_top_priority: true,
        },
        Suggestion {
            id: "3".to_string(),
            goal: "Replace weak verb with action verb Led, managed".to_string(),
            keywords: strings(&["Led", "managed"]),
            suggested_rewrite: "Led cross-functional team of 8 engineers to deliver customer portal 3 weeks ahead of schedule, resulting in 95% user satisfaction.".to_string(),
            before_text: "Worked with team to build customer portal.".to_string(),
            before_bullet_id: Some("rb3".to_string()),
            alternatives: alternatives([
                "Led cross-functional team of 8 engineers to deliver customer portal, coordinating with design and engineering teams and resulting in 95% user satisfaction and 40% reduction in support tickets.",
                "Led cross-functional team of 8 engineers to deliver customer portal 3 weeks ahead of schedule, improving team velocity and resulting in 95% user satisfaction.",
                "Led cross-functional team of 8 engineers to deliver customer portal serving 50K+ users, resulting in 95% user satisfaction and 3 weeks ahead of schedule.",
            ]),
            priority: Priority::QuickFix,
            quick_actions: quick_actions(&[
                ("qa1", "Add metric", "...resulting in 95% user satisfaction"),
                ("qa2", "Strengthen verb", "Led cross-functional team..."),
            ]),
            explanation: "Action verbs like \"Led\" demonstrate ownership and initiative, which aligns with the leadership qualities mentioned in the job description.".to_string(),
            rationale: "Quick improvement: Strong action verbs increase resume impact without changing core content.".to_string(),
            job_requirement: "Demonstrated cross-functional collaboration skills".to_string(),
            match_strength: 65,
            is_top_priority: false,
        },
        Suggestion {
            id: "4".to_string(),
            goal: "Match technical skill mentioned in job description".to_string(),
            keywords: strings(&["GraphQL", "REST API"]),
            suggested_rewrite: "Built and optimized GraphQL APIs and REST endpoints, reducing API response time by 40% and supporting 2M+ daily requests.".to_string(),
            before_text: "Worked on API development.".to_string(),
            before_bullet_id: Some("rb4".to_string()),
            alternatives: alternatives([
                "Built GraphQL APIs and REST endpoints for customer-facing applications, enabling faster data retrieval and reducing API response time by 40%.",
                "Built and optimized GraphQL APIs and REST endpoints, supporting 2M+ daily requests and reducing API response time by 40% for improved user experience.",
                "Developed GraphQL APIs and REST endpoints with performance optimizations, reducing API response time by 40% and supporting 2M+ daily requests.",
            ]),
            priority: Priority::SkillMatch,
            quick_actions: quick_actions(&[
                ("qa1", "Add metric", "...reducing API response time by 40%"),
                ("qa2", "Insert keyword", "...GraphQL APIs and REST..."),
            ]),
            explanation: "GraphQL appears multiple times in the job description but is missing from your resume. This strengthens the match significantly.".to_string(),
            rationale: "Keyword match improvement: GraphQL frequency increases from 0x to 2x in your resume.".to_string(),
            job_requirement: "Experience with GraphQL and REST API integration".to_string(),
            match_strength: 70,
            is_top_priority: false,
        },
    ]
}

pub fn seed_skill_mappings() -> Vec<SkillMapping> {
    vec![
        skill(
            "React & Modern JavaScript",
            &["react", "javascript"],
            "Experience with React and modern JavaScript frameworks",
        ),
        skill(
            "TypeScript",
            &["typescript", "type-safe"],
            "Strong understanding of TypeScript and type-safe development",
        ),
        skill(
            "Data Visualization",
            &["dashboard", "data visualization", "chart"],
            "Experience with data visualization and dashboard design",
        ),
        skill(
            "GraphQL & API Integration",
            &["graphql", "rest api", "endpoint"],
            "Experience with GraphQL and REST API integration",
        ),
        skill(
            "Python for Data Analysis",
            &["python", "data analysis"],
            "Proficiency in Python for data analysis and automation",
        ),
        skill(
            "Cross-Functional Collaboration",
            &["cross-functional", "collaboration", "team", "led"],
            "Demonstrated cross-functional collaboration skills",
        ),
        skill(
            "Measurable Business Impact",
            &["%", "increase", "reduce", "improve"],
            "Track record of delivering measurable business impact",
        ),
    ]
}
