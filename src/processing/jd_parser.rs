//! Job description parsing
//!
//! Three independent single-pass state machines pull requirement,
//! responsibility, and qualification lines out of the posting. A line opens a
//! section when it matches that section's header list, closes it on the
//! closing list, and everything bullet-shaped in between is collected.
//! Header lists are substring matches, so "Minimum Requirements:" inside a
//! longer line still toggles the gate.

use crate::error::Result;
use crate::processing::document::ParsedJobDescription;
use crate::processing::keywords::KeywordExtractor;
use crate::processing::normalizer::TextNormalizer;
use regex::Regex;
use std::collections::HashSet;

struct SectionRules {
    open: Vec<Regex>,
    close: Vec<Regex>,
}

impl SectionRules {
    fn new(open: &[&str], close: &[&str]) -> Self {
        let compile = |patterns: &[&str]| -> Vec<Regex> {
            patterns
                .iter()
                .map(|p| Regex::new(&format!("(?i){}", p)).expect("Invalid section rule regex"))
                .collect()
        };
        Self {
            open: compile(open),
            close: compile(close),
        }
    }
}

pub struct JobDescriptionParser {
    normalizer: TextNormalizer,
    keyword_extractor: KeywordExtractor,
    requirement_rules: SectionRules,
    responsibility_rules: SectionRules,
    qualification_rules: SectionRules,
    years_experience_regex: Regex,
    degree_regex: Regex,
}

impl JobDescriptionParser {
    pub fn new() -> Result<Self> {
        let requirement_rules = SectionRules::new(
            &[
                r"requirements?:?",
                r"what you('ll)? need",
                r"must have",
                r"required skills?",
                r"minimum requirements?",
            ],
            &[
                r"responsibilities?:?",
                r"what you('ll)? do",
                r"benefits?:?",
                r"about (us|the company)",
                r"nice to have",
                r"preferred",
            ],
        );

        let responsibility_rules = SectionRules::new(
            &[
                r"responsibilities?:?",
                r"what you('ll)? do",
                r"duties:?",
                r"role:?",
                r"job description:?",
                r"key responsibilities?:?",
                r"you will:?",
            ],
            &[
                r"requirements?:?",
                r"qualifications?:?",
                r"what you('ll)? need",
                r"benefits?:?",
                r"about (us|the company)",
            ],
        );

        let qualification_rules = SectionRules::new(
            &[
                r"qualifications?:?",
                r"preferred qualifications?:?",
                r"nice to have:?",
                r"bonus points?:?",
                r"preferred skills?:?",
                r"preferred experience:?",
            ],
            &[
                r"responsibilities?:?",
                r"benefits?:?",
                r"about (us|the company)",
                r"how to apply",
                r"compensation",
            ],
        );

        Ok(Self {
            normalizer: TextNormalizer::new(),
            keyword_extractor: KeywordExtractor::new()?,
            requirement_rules,
            responsibility_rules,
            qualification_rules,
            years_experience_regex: Regex::new(r"(?i)\d+\+?\s*years?\s*(of\s+)?experience")
                .expect("Invalid years experience regex"),
            degree_regex: Regex::new(
                r"(?i)(bachelor'?s?|master'?s?|phd|doctorate)\s*(degree)?\s*(in\s+[\w\s,]+)?",
            )
            .expect("Invalid degree regex"),
        })
    }

    pub fn parse(&self, text: &str) -> ParsedJobDescription {
        let normalized_text = self.normalizer.normalize(text);

        let keywords = self.keyword_extractor.extract_keywords(&normalized_text);

        let requirements = self.extract_requirements(&normalized_text);
        let responsibilities = self.extract_list(&normalized_text, &self.responsibility_rules);
        let qualifications = self.extract_list(&normalized_text, &self.qualification_rules);

        ParsedJobDescription {
            raw_text: text.to_string(),
            normalized_text,
            hard_skills: keywords.hard_skills,
            soft_skills: keywords.soft_skills,
            tools: keywords.tools,
            technologies: keywords.technologies,
            requirements,
            responsibilities,
            qualifications,
            all_keywords: keywords.all_keywords,
        }
    }

    /// Gated list extraction plus two full-text sweeps that catch experience
    /// and degree requirements stated outside any list.
    fn extract_requirements(&self, text: &str) -> Vec<String> {
        let mut requirements = self.extract_list(text, &self.requirement_rules);

        for mat in self.years_experience_regex.find_iter(text) {
            let found = mat.as_str().to_string();
            let lower = found.to_lowercase();
            if !requirements.iter().any(|r| r.to_lowercase().contains(&lower)) {
                requirements.push(found);
            }
        }

        for mat in self.degree_regex.find_iter(text) {
            let found = mat.as_str().trim().to_string();
            let lower = found.to_lowercase();
            if !requirements.iter().any(|r| r.to_lowercase().contains(&lower)) {
                requirements.push(found);
            }
        }

        dedup_preserving_order(requirements)
    }

    fn extract_list(&self, text: &str, rules: &SectionRules) -> Vec<String> {
        let mut items = Vec::new();
        let mut in_section = false;

        for line in text.split('\n') {
            let trimmed = line.trim();

            if rules.open.iter().any(|p| p.is_match(trimmed)) {
                in_section = true;
                continue;
            }

            if rules.close.iter().any(|p| p.is_match(trimmed)) {
                in_section = false;
                continue;
            }

            if in_section && self.is_list_item(trimmed) {
                let cleaned = self.normalizer.strip_bullet_prefix(trimmed);
                if cleaned.chars().count() > 10 {
                    items.push(cleaned);
                }
            }
        }

        dedup_preserving_order(items)
    }

    /// Bullet-prefixed lines, or prose lines long enough to carry a
    /// requirement that don't end in a colon.
    fn is_list_item(&self, line: &str) -> bool {
        self.normalizer.is_bullet_line(line)
            || (line.chars().count() > 20 && !line.ends_with(':'))
    }
}

fn dedup_preserving_order(items: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    items.into_iter().filter(|item| seen.insert(item.clone())).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const JOB_POSTING: &str = "Senior Backend Engineer\n\nResponsibilities:\n• Design and operate Rust microservices\n• Own the on-call rotation for the payments stack\n\nRequirements:\n• 5+ years of experience building backend systems\n• Deep knowledge of PostgreSQL and Redis\n• Bachelor's degree in Computer Science\n\nNice to have:\n• Experience with Kafka event pipelines\n• Terraform and infrastructure as code background\n\nBenefits:\n• Remote-first team";

    fn parser() -> JobDescriptionParser {
        JobDescriptionParser::new().unwrap()
    }

    #[test]
    fn test_requirements_gated_by_headers() {
        let parsed = parser().parse(JOB_POSTING);
        assert!(parsed
            .requirements
            .iter()
            .any(|r| r.contains("PostgreSQL and Redis")));
        // Responsibility bullets stay out of requirements
        assert!(!parsed
            .requirements
            .iter()
            .any(|r| r.contains("on-call rotation")));
    }

    #[test]
    fn test_responsibilities_extracted() {
        let parsed = parser().parse(JOB_POSTING);
        assert!(parsed
            .responsibilities
            .iter()
            .any(|r| r.contains("Rust microservices")));
        assert!(parsed
            .responsibilities
            .iter()
            .any(|r| r.contains("on-call rotation")));
    }

    #[test]
    fn test_qualifications_from_nice_to_have() {
        let parsed = parser().parse(JOB_POSTING);
        assert!(parsed
            .qualifications
            .iter()
            .any(|q| q.contains("Kafka event pipelines")));
        // Benefits close the section
        assert!(!parsed
            .qualifications
            .iter()
            .any(|q| q.contains("Remote-first")));
    }

    #[test]
    fn test_years_experience_sweep() {
        let parsed = parser().parse("We want someone great. 3+ years experience required.");
        assert!(parsed
            .requirements
            .iter()
            .any(|r| r.to_lowercase().contains("3+ years experience")));
    }

    #[test]
    fn test_experience_sweep_skips_covered_bullets() {
        let parsed = parser().parse(JOB_POSTING);
        // "5+ years of experience" is already inside a requirement bullet, so
        // the full-text sweep must not add it again as a standalone entry.
        assert!(!parsed
            .requirements
            .iter()
            .any(|r| r.to_lowercase() == "5+ years of experience"));
        assert!(parsed
            .requirements
            .iter()
            .any(|r| r.contains("5+ years of experience building backend systems")));
    }

    #[test]
    fn test_keywords_extracted_from_posting() {
        let parsed = parser().parse(JOB_POSTING);
        assert!(parsed.hard_skills.contains(&"rust".to_string()));
        assert!(parsed.hard_skills.contains(&"postgresql".to_string()));
        assert!(parsed.all_keywords.contains(&"kafka".to_string()));
    }

    #[test]
    fn test_short_bullets_dropped() {
        let parsed = parser().parse("Requirements:\n• Go\n• Kubernetes expertise in production");
        assert!(!parsed.requirements.iter().any(|r| r == "Go"));
        assert!(parsed
            .requirements
            .iter()
            .any(|r| r.contains("Kubernetes expertise")));
    }
}
