//! Actionable improvement suggestions
//!
//! A fixed rule set over the analysis outputs. Rules fire independently and
//! the final list is stably sorted by priority, so two high-priority
//! suggestions keep their rule order.

use crate::processing::document::{
    BulletAnalysis, BulletIssueType, FormattingIssue, ParsedJobDescription, ParsedResume,
    Priority, SectionType, Severity, Suggestion, SuggestionType,
};
use regex::Regex;

struct CategorizedKeywords {
    hard_skills: Vec<String>,
    tools: Vec<String>,
}

pub struct SuggestionGenerator {
    tool_prefix_regex: Regex,
    soft_skill_regex: Regex,
}

impl Default for SuggestionGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl SuggestionGenerator {
    pub fn new() -> Self {
        Self {
            tool_prefix_regex: Regex::new(
                r"(?i)^(jira|confluence|git|docker|kubernetes|aws|azure|gcp|slack|vs code|visual studio)",
            )
            .expect("Invalid tool prefix regex"),
            soft_skill_regex: Regex::new(
                r"(?i)communication|leadership|teamwork|problem.?solving|analytical|creative",
            )
            .expect("Invalid soft skill regex"),
        }
    }

    pub fn generate_suggestions(
        &self,
        resume: &ParsedResume,
        job_description: &ParsedJobDescription,
        missing_keywords: &[String],
        bullet_analyses: &[BulletAnalysis],
        formatting_issues: &[FormattingIssue],
    ) -> Vec<Suggestion> {
        let mut suggestions = Vec::new();

        if !missing_keywords.is_empty() {
            let categorized = self.categorize_keywords(missing_keywords);

            if !categorized.hard_skills.is_empty() {
                suggestions.push(Suggestion {
                    suggestion_type: SuggestionType::AddKeywords,
                    priority: Priority::High,
                    title: "Add Missing Technical Skills".to_string(),
                    description: format!(
                        "Your resume is missing {} technical skills mentioned in the job description.",
                        categorized.hard_skills.len()
                    ),
                    action_items: vec![
                        format!(
                            "Add these skills to your Skills section: {}",
                            categorized
                                .hard_skills
                                .iter()
                                .take(5)
                                .cloned()
                                .collect::<Vec<_>>()
                                .join(", ")
                        ),
                        "Include these skills in your experience bullet points where applicable"
                            .to_string(),
                        "Make sure to use the exact terminology from the job posting".to_string(),
                    ],
                });
            }

            if !categorized.tools.is_empty() {
                suggestions.push(Suggestion {
                    suggestion_type: SuggestionType::AddKeywords,
                    priority: Priority::High,
                    title: "Add Missing Tools".to_string(),
                    description:
                        "The job requires experience with tools not mentioned in your resume."
                            .to_string(),
                    action_items: vec![
                        format!("Add these tools: {}", categorized.tools.join(", ")),
                        "Include specific version numbers or years of experience if applicable"
                            .to_string(),
                    ],
                });
            }
        }

        let weak_bullets = bullet_analyses.iter().filter(|b| b.score < 70).count();
        if weak_bullets > 0 {
            suggestions.push(Suggestion {
                suggestion_type: SuggestionType::ImproveBullets,
                priority: Priority::High,
                title: "Strengthen Bullet Points".to_string(),
                description: format!("{} bullet points need improvement.", weak_bullets),
                action_items: vec![
                    "Start each bullet with a strong action verb (Led, Developed, Implemented)"
                        .to_string(),
                    "Add quantifiable metrics (percentages, dollar amounts, numbers)".to_string(),
                    "Remove first-person pronouns (I, my, me)".to_string(),
                    "Keep bullets concise (under 150 characters)".to_string(),
                ],
            });
        }

        let bullets_without_metrics = bullet_analyses
            .iter()
            .filter(|b| {
                b.issues
                    .iter()
                    .any(|i| i.issue_type == BulletIssueType::NoMetrics)
            })
            .count();
        if bullets_without_metrics > 3 {
            suggestions.push(Suggestion {
                suggestion_type: SuggestionType::AddMetrics,
                priority: Priority::Medium,
                title: "Add Quantifiable Achievements".to_string(),
                description: format!(
                    "{} bullets lack metrics. Numbers make your impact tangible.",
                    bullets_without_metrics
                ),
                action_items: vec![
                    "Add percentages for improvements (improved efficiency by 25%)".to_string(),
                    "Include dollar amounts for cost savings or revenue ($50K saved)".to_string(),
                    "Mention team sizes or scope (led team of 5, managed 10 projects)".to_string(),
                    "Use specific numbers instead of vague terms (handled 50+ tickets weekly)"
                        .to_string(),
                ],
            });
        }

        let missing_sections: Vec<SectionType> = [
            SectionType::Summary,
            SectionType::Experience,
            SectionType::Education,
            SectionType::Skills,
        ]
        .into_iter()
        .filter(|section_type| !resume.sections.iter().any(|s| s.name == *section_type))
        .collect();
        if !missing_sections.is_empty() {
            suggestions.push(Suggestion {
                suggestion_type: SuggestionType::AddSection,
                priority: Priority::High,
                title: "Add Missing Sections".to_string(),
                description:
                    "Your resume is missing essential sections that ATS systems look for."
                        .to_string(),
                action_items: missing_sections
                    .iter()
                    .map(|s| format!("Add a {} section", capitalize(&s.to_string())))
                    .collect(),
            });
        }

        let critical_issues: Vec<&FormattingIssue> = formatting_issues
            .iter()
            .filter(|i| i.severity == Severity::Error)
            .collect();
        if !critical_issues.is_empty() {
            suggestions.push(Suggestion {
                suggestion_type: SuggestionType::FixFormatting,
                priority: Priority::High,
                title: "Fix ATS Compatibility Issues".to_string(),
                description: "Your resume has formatting that may confuse ATS systems.".to_string(),
                action_items: critical_issues.iter().map(|i| i.suggestion.clone()).collect(),
            });
        }

        let weak_verb_bullets = bullet_analyses
            .iter()
            .filter(|b| {
                b.issues
                    .iter()
                    .any(|i| i.issue_type == BulletIssueType::WeakActionVerb)
            })
            .count();
        if weak_verb_bullets > 2 {
            suggestions.push(Suggestion {
                suggestion_type: SuggestionType::StrengthenVerbs,
                priority: Priority::Medium,
                title: "Use Stronger Action Verbs".to_string(),
                description: format!("{} bullets start with weak verbs.", weak_verb_bullets),
                action_items: vec![
                    "Replace \"Responsible for\" with \"Led\" or \"Managed\"".to_string(),
                    "Replace \"Helped\" with \"Collaborated\" or \"Partnered\"".to_string(),
                    "Replace \"Worked on\" with \"Developed\" or \"Built\"".to_string(),
                    "Use past tense for previous roles, present for current".to_string(),
                ],
            });
        }

        if missing_keywords.len() as f64 > job_description.all_keywords.len() as f64 * 0.3 {
            suggestions.push(Suggestion {
                suggestion_type: SuggestionType::TailorContent,
                priority: Priority::High,
                title: "Tailor Resume to Job Description".to_string(),
                description: "Your resume needs more alignment with this specific job posting."
                    .to_string(),
                action_items: vec![
                    "Mirror the language used in the job description".to_string(),
                    "Prioritize experiences most relevant to this role".to_string(),
                    "Add a targeted summary that addresses key requirements".to_string(),
                    "Consider creating a \"Relevant Experience\" section".to_string(),
                ],
            });
        }

        suggestions.sort_by_key(|s| s.priority);
        suggestions
    }

    /// Coarse regex categorization for missing keywords; anything that is
    /// neither a tool nor a soft skill counts as a hard skill.
    fn categorize_keywords(&self, keywords: &[String]) -> CategorizedKeywords {
        let mut hard_skills = Vec::new();
        let mut tools = Vec::new();

        for keyword in keywords {
            if self.tool_prefix_regex.is_match(keyword) {
                tools.push(keyword.clone());
            } else if self.soft_skill_regex.is_match(keyword) {
                // Soft skills get no dedicated suggestion rule
            } else {
                hard_skills.push(keyword.clone());
            }
        }

        CategorizedKeywords { hard_skills, tools }
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
