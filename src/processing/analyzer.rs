//! Per-section completeness and quality analysis
//!
//! Each of the four core sections gets a verdict even when absent; projects
//! and certifications are only reported when present. Scores start at 100 and
//! drop on word-count bands, thin bullet lists, and ignored job keywords.

use crate::processing::document::{ResumeSection, SectionAnalysis, SectionType};

const CORE_SECTIONS: &[SectionType] = &[
    SectionType::Summary,
    SectionType::Experience,
    SectionType::Education,
    SectionType::Skills,
];
const EXTRA_SECTIONS: &[SectionType] = &[SectionType::Projects, SectionType::Certifications];

pub struct SectionAnalyzer;

impl Default for SectionAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl SectionAnalyzer {
    pub fn new() -> Self {
        Self
    }

    pub fn analyze_sections(
        &self,
        sections: &[ResumeSection],
        missing_keywords: &[String],
    ) -> Vec<SectionAnalysis> {
        let mut analyses = Vec::new();

        for &section_type in CORE_SECTIONS {
            match sections.iter().find(|s| s.name == section_type) {
                Some(section) => {
                    analyses.push(self.evaluate_section(section, missing_keywords));
                }
                None => analyses.push(SectionAnalysis {
                    name: section_type,
                    found: false,
                    score: 0,
                    feedback: format!(
                        "Missing {} section. This is a critical section for ATS systems.",
                        section_type
                    ),
                    suggestions: vec![
                        format!("Add a {} section to your resume", section_type),
                        section_guidance(section_type).to_string(),
                    ],
                }),
            }
        }

        for &section_type in EXTRA_SECTIONS {
            if let Some(section) = sections.iter().find(|s| s.name == section_type) {
                analyses.push(self.evaluate_section(section, missing_keywords));
            }
        }

        analyses
    }

    fn evaluate_section(
        &self,
        section: &ResumeSection,
        missing_keywords: &[String],
    ) -> SectionAnalysis {
        let mut score: i32 = 100;
        let mut suggestions = Vec::new();
        let feedback;

        let word_count = section.content.split_whitespace().count();
        let content_lower = section.content.to_lowercase();

        match section.name {
            SectionType::Summary => {
                if word_count < 30 {
                    score -= 20;
                    feedback = "Summary is too brief.".to_string();
                    suggestions.push(
                        "Expand your summary to 3-5 sentences highlighting your key qualifications"
                            .to_string(),
                    );
                } else if word_count > 100 {
                    score -= 10;
                    feedback = "Summary is too long.".to_string();
                    suggestions.push(
                        "Condense your summary to focus on your most relevant qualifications"
                            .to_string(),
                    );
                } else {
                    feedback = "Summary has good length.".to_string();
                }

                let mentions_missing = missing_keywords
                    .iter()
                    .any(|kw| content_lower.contains(&kw.to_lowercase()));
                if !mentions_missing && !missing_keywords.is_empty() {
                    score -= 15;
                    suggestions.push(
                        "Include 2-3 key skills from the job description in your summary"
                            .to_string(),
                    );
                }
            }
            SectionType::Experience => {
                if section.bullets.len() < 3 {
                    score -= 25;
                    feedback = "Experience section needs more detail.".to_string();
                    suggestions
                        .push("Add more bullet points describing your accomplishments".to_string());
                } else if section.bullets.len() < 6 {
                    score -= 10;
                    feedback = "Experience section could use more bullet points.".to_string();
                    suggestions
                        .push("Consider adding more detail to your recent positions".to_string());
                } else {
                    feedback = "Experience section has good detail.".to_string();
                }
            }
            SectionType::Education => {
                if word_count < 20 {
                    score -= 15;
                    feedback = "Education section needs more detail.".to_string();
                    suggestions.push(
                        "Include degree, institution, graduation date, and relevant coursework"
                            .to_string(),
                    );
                } else {
                    feedback = "Education section is complete.".to_string();
                }
            }
            SectionType::Skills => {
                if word_count < 10 {
                    score -= 20;
                    feedback = "Skills section is too sparse.".to_string();
                    suggestions.push("List 10-15 relevant technical and soft skills".to_string());
                } else {
                    feedback = "Skills section is present.".to_string();
                }

                let absent_count = missing_keywords
                    .iter()
                    .filter(|kw| !content_lower.contains(&kw.to_lowercase()))
                    .count();
                if absent_count > 5 {
                    score -= 15;
                    suggestions.push(format!(
                        "Add missing skills: {}",
                        missing_keywords
                            .iter()
                            .take(5)
                            .cloned()
                            .collect::<Vec<_>>()
                            .join(", ")
                    ));
                }
            }
            SectionType::Projects => {
                if section.bullets.len() < 2 {
                    score -= 10;
                    feedback = "Projects section needs more entries.".to_string();
                    suggestions.push(
                        "Add 2-4 relevant projects with descriptions of technologies used"
                            .to_string(),
                    );
                } else {
                    feedback = "Projects section is well-populated.".to_string();
                }
            }
            _ => {
                feedback = "Section found.".to_string();
            }
        }

        SectionAnalysis {
            name: section.name,
            found: true,
            score: score.max(0) as u8,
            feedback,
            suggestions,
        }
    }
}

fn section_guidance(section_type: SectionType) -> &'static str {
    match section_type {
        SectionType::Summary => {
            "Write 3-5 sentences summarizing your experience, skills, and career goals"
        }
        SectionType::Experience => {
            "List your work history with company names, titles, dates, and bullet points"
        }
        SectionType::Education => {
            "Include degrees, institutions, graduation dates, and relevant coursework"
        }
        SectionType::Skills => {
            "List technical skills, programming languages, tools, and soft skills"
        }
        SectionType::Projects => {
            "Describe personal or professional projects with technologies used"
        }
        SectionType::Certifications => "List relevant professional certifications with dates",
        SectionType::Awards => "Include honors, awards, and recognition",
        SectionType::Publications => "List published papers, articles, or blog posts",
        SectionType::Languages => "Include spoken languages with proficiency levels",
        SectionType::Interests => "List relevant hobbies and interests",
        SectionType::References => "Usually \"Available upon request\" or list references",
        SectionType::Unknown => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn section(name: SectionType, content: &str, bullets: &[&str]) -> ResumeSection {
        ResumeSection {
            name,
            content: content.to_string(),
            start_index: 0,
            end_index: 0,
            bullets: bullets.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_missing_core_section_scores_zero() {
        let analyzer = SectionAnalyzer::new();
        let analyses = analyzer.analyze_sections(&[], &[]);
        assert_eq!(analyses.len(), 4);
        assert!(analyses.iter().all(|a| !a.found && a.score == 0));
        let education = analyses
            .iter()
            .find(|a| a.name == SectionType::Education)
            .unwrap();
        assert!(education.feedback.contains("Missing education section"));
    }

    #[test]
    fn test_brief_summary_without_missing_keywords_in_it() {
        let analyzer = SectionAnalyzer::new();
        let sections = vec![section(SectionType::Summary, "Engineer with experience.", &[])];
        let missing = vec!["kubernetes".to_string()];
        let analyses = analyzer.analyze_sections(&sections, &missing);
        let summary = analyses.iter().find(|a| a.name == SectionType::Summary).unwrap();
        // -20 too brief, -15 no missing keyword mentioned
        assert_eq!(summary.score, 65);
    }

    #[test]
    fn test_experience_bullet_count_bands() {
        let analyzer = SectionAnalyzer::new();
        let thin = vec![section(SectionType::Experience, "content", &["one", "two"])];
        let mid = vec![section(
            SectionType::Experience,
            "content",
            &["a", "b", "c", "d"],
        )];
        let rich = vec![section(
            SectionType::Experience,
            "content",
            &["a", "b", "c", "d", "e", "f"],
        )];

        let score_of = |sections: &[ResumeSection]| {
            analyzer
                .analyze_sections(sections, &[])
                .into_iter()
                .find(|a| a.name == SectionType::Experience)
                .unwrap()
                .score
        };

        assert_eq!(score_of(&thin), 75);
        assert_eq!(score_of(&mid), 90);
        assert_eq!(score_of(&rich), 100);
    }

    #[test]
    fn test_skills_section_missing_keyword_penalty() {
        let analyzer = SectionAnalyzer::new();
        let sections = vec![section(
            SectionType::Skills,
            "Rust Python Docker Kubernetes Terraform Kafka Redis PostgreSQL Git Linux",
            &[],
        )];
        let missing: Vec<String> = ["go", "java", "scala", "php", "ruby", "perl"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let analyses = analyzer.analyze_sections(&sections, &missing);
        let skills = analyses.iter().find(|a| a.name == SectionType::Skills).unwrap();
        // 10 words so no sparsity penalty; 6 absent keywords > 5 so -15
        assert_eq!(skills.score, 85);
        assert!(skills.suggestions.iter().any(|s| s.contains("go, java")));
    }

    #[test]
    fn test_projects_only_reported_when_present() {
        let analyzer = SectionAnalyzer::new();
        let without = analyzer.analyze_sections(&[], &[]);
        assert!(!without.iter().any(|a| a.name == SectionType::Projects));

        let sections = vec![section(SectionType::Projects, "things", &["one bullet"])];
        let with = analyzer.analyze_sections(&sections, &[]);
        let projects = with.iter().find(|a| a.name == SectionType::Projects).unwrap();
        assert_eq!(projects.score, 90);
    }
}
