//! Resume section detection
//!
//! Walks the normalized text line by line, identifying section headers by a
//! direct-lookup table first and regex pattern tables second, then gating on a
//! structural header check (length, case, surrounding blank lines). Body text
//! before the first recognized header becomes an implicit summary unless it
//! looks like contact info or the candidate's name.

use crate::processing::document::{ResumeSection, SectionType};
use regex::Regex;
use std::collections::HashMap;

/// Score weights for the coverage score. Optional sections add to the
/// achieved score only, capped at the required+important maximum, so a resume
/// with everything present scores exactly 100.
const REQUIRED_SECTIONS: &[SectionType] = &[
    SectionType::Experience,
    SectionType::Education,
    SectionType::Skills,
];
const IMPORTANT_SECTIONS: &[SectionType] = &[SectionType::Summary, SectionType::Projects];
const OPTIONAL_SECTIONS: &[SectionType] = &[
    SectionType::Certifications,
    SectionType::Awards,
    SectionType::Publications,
    SectionType::Languages,
];
const REQUIRED_WEIGHT: u32 = 30;
const IMPORTANT_WEIGHT: u32 = 15;
const OPTIONAL_WEIGHT: u32 = 5;

#[derive(Debug, Clone, PartialEq)]
pub struct SectionCoverage {
    pub score: u8,
    pub found: Vec<SectionType>,
    pub missing: Vec<SectionType>,
}

pub struct SectionDetector {
    direct_matches: HashMap<&'static str, SectionType>,
    patterns: Vec<(SectionType, Vec<Regex>)>,
    leading_junk_regex: Regex,
    header_punct_regex: Regex,
    title_case_regex: Regex,
    separator_regex: Regex,
    contact_patterns: Vec<Regex>,
    name_word_regex: Regex,
}

impl Default for SectionDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl SectionDetector {
    pub fn new() -> Self {
        Self {
            direct_matches: Self::create_direct_matches(),
            patterns: Self::create_patterns(),
            leading_junk_regex: Regex::new(r"^[\d.)\-•*\s]+").expect("Invalid leading junk regex"),
            header_punct_regex: Regex::new(r"[:\-_•|]").expect("Invalid header punct regex"),
            title_case_regex: Regex::new(r"^[A-Z][a-z]*(\s+[A-Z][a-z]*)*$")
                .expect("Invalid title case regex"),
            separator_regex: Regex::new(r"^[-=_]{3,}$").expect("Invalid separator regex"),
            contact_patterns: Self::create_contact_patterns(),
            name_word_regex: Regex::new(r"^([A-Z][a-z]*|[A-Z]+)$").expect("Invalid name word regex"),
        }
    }

    /// Split the text into named sections. Text before the first recognized
    /// header (minus name/contact lines) is treated as a summary.
    pub fn detect_sections(&self, text: &str) -> Vec<ResumeSection> {
        let lines: Vec<&str> = text.split('\n').collect();
        let mut sections: Vec<ResumeSection> = Vec::new();
        let mut current: Option<ResumeSection> = None;
        let mut content: Vec<String> = Vec::new();

        for (i, raw_line) in lines.iter().enumerate() {
            let line = raw_line.trim();

            if line.is_empty() {
                if current.is_some() {
                    content.push(String::new());
                }
                continue;
            }

            let section_type = self.identify_section_header(line);

            if section_type != SectionType::Unknown && self.is_section_header(line, &lines, i) {
                if let Some(mut section) = current.take() {
                    section.content = content.join("\n").trim().to_string();
                    section.end_index = i.saturating_sub(1);
                    sections.push(section);
                }

                current = Some(ResumeSection {
                    name: section_type,
                    content: String::new(),
                    start_index: i,
                    end_index: i,
                    bullets: Vec::new(),
                });
                content = Vec::new();
            } else if current.is_some() {
                content.push(line.to_string());
            } else if !self.is_contact_info(line) && !self.is_name_header(line, i) {
                // Leading body text with no header yet: implicit summary.
                current = Some(ResumeSection {
                    name: SectionType::Summary,
                    content: String::new(),
                    start_index: i,
                    end_index: i,
                    bullets: Vec::new(),
                });
                content = vec![line.to_string()];
            }
        }

        if let Some(mut section) = current {
            section.content = content.join("\n").trim().to_string();
            section.end_index = lines.len().saturating_sub(1);
            sections.push(section);
        }

        merge_duplicate_sections(sections)
    }

    /// Coverage score over the detected section types.
    pub fn section_score(&self, sections: &[ResumeSection]) -> SectionCoverage {
        let found_types: Vec<SectionType> = sections.iter().map(|s| s.name).collect();
        let mut found = Vec::new();
        let mut missing = Vec::new();

        let mut achieved: u32 = 0;
        let mut max_score: u32 = 0;

        for &section in REQUIRED_SECTIONS {
            max_score += REQUIRED_WEIGHT;
            if found_types.contains(&section) {
                achieved += REQUIRED_WEIGHT;
                found.push(section);
            } else {
                missing.push(section);
            }
        }

        for &section in IMPORTANT_SECTIONS {
            max_score += IMPORTANT_WEIGHT;
            if found_types.contains(&section) {
                achieved += IMPORTANT_WEIGHT;
                found.push(section);
            } else {
                missing.push(section);
            }
        }

        for &section in OPTIONAL_SECTIONS {
            if found_types.contains(&section) {
                achieved += OPTIONAL_WEIGHT;
                found.push(section);
            }
        }

        let achieved = achieved.min(max_score);
        let score = ((achieved as f64 / max_score as f64) * 100.0).round() as u8;

        SectionCoverage {
            score,
            found,
            missing,
        }
    }

    fn identify_section_header(&self, line: &str) -> SectionType {
        let clean_line = self.leading_junk_regex.replace(line, "");
        let clean_line = self
            .header_punct_regex
            .replace_all(&clean_line, "")
            .trim()
            .to_lowercase();

        if let Some(&section_type) = self.direct_matches.get(clean_line.as_str()) {
            return section_type;
        }

        for (section_type, patterns) in &self.patterns {
            for pattern in patterns {
                if pattern.is_match(&clean_line) {
                    return *section_type;
                }
            }
        }

        SectionType::Unknown
    }

    fn is_section_header(&self, line: &str, all_lines: &[&str], index: usize) -> bool {
        if line.chars().count() > 60 {
            return false;
        }

        let words: Vec<&str> = line.split_whitespace().collect();
        if words.len() > 6 {
            return false;
        }

        let line_len = line.chars().count();

        // Very short lines that already matched a section pattern are headers.
        if words.len() <= 3 && line_len < 25 {
            return true;
        }

        let clean_line = self.header_punct_regex.replace_all(line, "");
        let clean_line = clean_line.trim();
        let is_upper_case =
            line == line.to_uppercase() && line.chars().any(|c| c.is_ascii_uppercase());
        let is_title_case = self.title_case_regex.is_match(clean_line);
        let has_colon = line.ends_with(':');
        let is_short_line = line_len < 40;

        let next_line = all_lines.get(index + 1).map_or("", |l| l.trim());
        let is_separator = next_line.is_empty() || self.separator_regex.is_match(next_line);

        let has_blank_before = index
            .checked_sub(1)
            .and_then(|prev| all_lines.get(prev))
            .map_or("", |l| l.trim())
            .is_empty();

        let score = (is_upper_case as u32) * 2
            + is_title_case as u32
            + has_colon as u32
            + is_short_line as u32
            + is_separator as u32
            + has_blank_before as u32;

        score >= 1
    }

    fn is_contact_info(&self, line: &str) -> bool {
        self.contact_patterns
            .iter()
            .any(|pattern| pattern.is_match(line))
    }

    fn is_name_header(&self, line: &str, index: usize) -> bool {
        if index > 3 {
            return false;
        }

        let words: Vec<&str> = line.split_whitespace().collect();
        if words.len() < 2 || words.len() > 5 {
            return false;
        }

        let all_capitalized = words.iter().all(|word| self.name_word_regex.is_match(word));

        all_capitalized && !line.contains('@') && !line.chars().any(|c| c.is_ascii_digit())
    }

    fn create_direct_matches() -> HashMap<&'static str, SectionType> {
        use SectionType::*;
        HashMap::from([
            ("experience", Experience),
            ("work experience", Experience),
            ("professional experience", Experience),
            ("employment", Experience),
            ("employment history", Experience),
            ("education", Education),
            ("educational background", Education),
            ("academic background", Education),
            ("skills", Skills),
            ("technical skills", Skills),
            ("core skills", Skills),
            ("key skills", Skills),
            ("competencies", Skills),
            ("summary", Summary),
            ("professional summary", Summary),
            ("profile", Summary),
            ("objective", Summary),
            ("career objective", Summary),
            ("projects", Projects),
            ("certifications", Certifications),
            ("certificates", Certifications),
            ("awards", Awards),
            ("honors", Awards),
            ("publications", Publications),
            ("languages", Languages),
            ("interests", Interests),
            ("hobbies", Interests),
            ("references", References),
        ])
    }

    fn create_patterns() -> Vec<(SectionType, Vec<Regex>)> {
        let compile = |patterns: &[&str]| -> Vec<Regex> {
            patterns
                .iter()
                .map(|p| Regex::new(&format!("(?i){}", p)).expect("Invalid section pattern"))
                .collect()
        };

        vec![
            (
                SectionType::Summary,
                compile(&[
                    r"^(professional\s+)?summary",
                    r"^(career\s+)?objective",
                    r"^(career\s+)?profile",
                    r"^about\s*me",
                    r"^executive\s+summary",
                    r"^personal\s+statement",
                    r"^overview",
                    r"summary$",
                    r"profile$",
                    r"objective$",
                ]),
            ),
            (
                SectionType::Experience,
                compile(&[
                    r"^(work\s+)?experience",
                    r"^(professional\s+)?experience",
                    r"^employment(\s+history)?",
                    r"^work\s+history",
                    r"^career\s+history",
                    r"^relevant\s+experience",
                    r"^professional\s+background",
                    r"experience$",
                    r"work\s+experience",
                    r"professional\s+experience",
                ]),
            ),
            (
                SectionType::Education,
                compile(&[
                    r"^education",
                    r"^academic(\s+background)?",
                    r"^educational\s+background",
                    r"^qualifications",
                    r"^academic\s+qualifications",
                    r"^degrees",
                    r"education$",
                    r"educational\s+background",
                ]),
            ),
            (
                SectionType::Skills,
                compile(&[
                    r"^(technical\s+)?skills",
                    r"^core\s+competencies",
                    r"^competencies",
                    r"^expertise",
                    r"^areas\s+of\s+expertise",
                    r"^proficiencies",
                    r"^technical\s+proficiencies",
                    r"^key\s+skills",
                    r"^skill\s+set",
                    r"skills$",
                    r"technical\s+skills",
                    r"core\s+skills",
                ]),
            ),
            (
                SectionType::Projects,
                compile(&[
                    r"^projects",
                    r"^personal\s+projects",
                    r"^key\s+projects",
                    r"^notable\s+projects",
                    r"^selected\s+projects",
                    r"^portfolio",
                ]),
            ),
            (
                SectionType::Certifications,
                compile(&[
                    r"^certifications?",
                    r"^licenses?(\s+and\s+certifications?)?",
                    r"^professional\s+certifications?",
                    r"^credentials",
                    r"^accreditations?",
                ]),
            ),
            (
                SectionType::Awards,
                compile(&[
                    r"^awards?(\s+and\s+honors?)?",
                    r"^honors?(\s+and\s+awards?)?",
                    r"^recognition",
                    r"^achievements?",
                    r"^accomplishments?",
                ]),
            ),
            (
                SectionType::Publications,
                compile(&[
                    r"^publications?",
                    r"^papers?",
                    r"^research(\s+papers?)?",
                    r"^articles?",
                ]),
            ),
            (
                SectionType::Languages,
                compile(&[r"^languages?", r"^language\s+skills", r"^linguistic\s+skills"]),
            ),
            (
                SectionType::Interests,
                compile(&[
                    r"^interests?",
                    r"^hobbies(\s+and\s+interests?)?",
                    r"^personal\s+interests?",
                    r"^activities",
                    r"^extracurricular(\s+activities)?",
                ]),
            ),
            (
                SectionType::References,
                compile(&[r"^references?", r"^professional\s+references?", r"^referees?"]),
            ),
        ]
    }

    fn create_contact_patterns() -> Vec<Regex> {
        [
            r"\b[\w.-]+@[\w.-]+\.\w{2,}\b",
            r"\b\d{3}[-.\s]?\d{3}[-.\s]?\d{4}\b",
            r"\b\+\d{1,3}[-.\s]?\d{3}[-.\s]?\d{3}[-.\s]?\d{4}\b",
            r"(?i)linkedin\.com",
            r"(?i)github\.com",
            r"(?i)twitter\.com",
            r"\b\d+\s+[\w\s]+,\s*[\w\s]+,?\s*[A-Z]{2}\s*\d{5}",
        ]
        .iter()
        .map(|p| Regex::new(p).expect("Invalid contact regex"))
        .collect()
    }
}

/// Merge sections of the same type, keeping the first one's position and
/// extending its end to the last duplicate's.
fn merge_duplicate_sections(sections: Vec<ResumeSection>) -> Vec<ResumeSection> {
    let mut merged: Vec<ResumeSection> = Vec::new();

    for section in sections {
        if let Some(existing) = merged.iter_mut().find(|s| s.name == section.name) {
            existing.content.push_str("\n\n");
            existing.content.push_str(&section.content);
            existing.end_index = section.end_index;
        } else {
            merged.push(section);
        }
    }

    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_RESUME: &str = "JANE DOE\njane@example.com | 555-123-4567\n\nSeasoned platform engineer with a decade of experience.\n\nEXPERIENCE\n• Led migration of billing to Kubernetes\n• Cut deploy times by 80%\n\nEDUCATION\nBS Computer Science, State University\n\nSKILLS\nRust, Python, Docker, Kubernetes";

    #[test]
    fn test_detects_uppercase_headers() {
        let detector = SectionDetector::new();
        let sections = detector.detect_sections(SAMPLE_RESUME);
        let names: Vec<SectionType> = sections.iter().map(|s| s.name).collect();
        assert!(names.contains(&SectionType::Experience));
        assert!(names.contains(&SectionType::Education));
        assert!(names.contains(&SectionType::Skills));
    }

    #[test]
    fn test_implicit_summary_before_first_header() {
        let detector = SectionDetector::new();
        let sections = detector.detect_sections(SAMPLE_RESUME);
        let summary = sections
            .iter()
            .find(|s| s.name == SectionType::Summary)
            .expect("implicit summary missing");
        assert!(summary.content.contains("Seasoned platform engineer"));
    }

    #[test]
    fn test_name_and_contact_lines_excluded_from_summary() {
        let detector = SectionDetector::new();
        let sections = detector.detect_sections(SAMPLE_RESUME);
        let summary = sections
            .iter()
            .find(|s| s.name == SectionType::Summary)
            .unwrap();
        assert!(!summary.content.contains("JANE DOE"));
        assert!(!summary.content.contains("jane@example.com"));
    }

    #[test]
    fn test_header_with_colon_and_title_case() {
        let detector = SectionDetector::new();
        let sections = detector.detect_sections("Work Experience:\nBuilt many things over many years");
        assert_eq!(sections[0].name, SectionType::Experience);
    }

    #[test]
    fn test_long_lines_are_not_headers() {
        let detector = SectionDetector::new();
        let text = "my experience spans a very long list of companies and roles across many years of work";
        let sections = detector.detect_sections(text);
        // Falls through to implicit summary, not an experience header
        assert_eq!(sections[0].name, SectionType::Summary);
    }

    #[test]
    fn test_duplicate_sections_merged() {
        let detector = SectionDetector::new();
        let text = "EXPERIENCE\nFirst stint at Acme Corp\n\nEDUCATION\nBS Somewhere\n\nEXPERIENCE\nSecond stint at Globex";
        let sections = detector.detect_sections(text);
        let experience: Vec<&ResumeSection> = sections
            .iter()
            .filter(|s| s.name == SectionType::Experience)
            .collect();
        assert_eq!(experience.len(), 1);
        assert!(experience[0].content.contains("Acme Corp"));
        assert!(experience[0].content.contains("Globex"));
    }

    #[test]
    fn test_body_lines_partition_into_sections_exactly_once() {
        let text = "Jane Smith\njane@example.com | 555-123-4567\n\nSeasoned engineer focused on resilient backend systems.\n\nEXPERIENCE\n• Led the migration of billing services\n• Cut infrastructure spend by 30%\n\nSKILLS\nRust, Docker, Kubernetes\n\nEXPERIENCE\n• Shipped a fraud detection pipeline";

        let detector = SectionDetector::new();
        let sections = detector.detect_sections(text);

        let mut counts: std::collections::HashMap<&str, usize> = std::collections::HashMap::new();
        for section in &sections {
            for line in section.content.split('\n') {
                let line = line.trim();
                if !line.is_empty() {
                    *counts.entry(line).or_default() += 1;
                }
            }
        }

        // Header lines are consumed by the detector; name and contact lines
        // before the first header are dropped. Every other non-blank line
        // must land in exactly one section, even across a duplicate merge.
        let headers = ["EXPERIENCE", "SKILLS"];
        let dropped = ["Jane Smith", "jane@example.com | 555-123-4567"];
        for line in text.split('\n').map(str::trim).filter(|l| !l.is_empty()) {
            if headers.contains(&line) || dropped.contains(&line) {
                assert_eq!(counts.get(line), None, "line leaked into content: {}", line);
            } else {
                assert_eq!(counts.get(line), Some(&1), "line not placed exactly once: {}", line);
            }
        }
    }

    #[test]
    fn test_section_score_all_primary_present() {
        let detector = SectionDetector::new();
        let mk = |name| ResumeSection {
            name,
            content: String::new(),
            start_index: 0,
            end_index: 0,
            bullets: Vec::new(),
        };
        let sections = vec![
            mk(SectionType::Experience),
            mk(SectionType::Education),
            mk(SectionType::Skills),
            mk(SectionType::Summary),
            mk(SectionType::Projects),
        ];
        let coverage = detector.section_score(&sections);
        assert_eq!(coverage.score, 100);
        assert!(coverage.missing.is_empty());
    }

    #[test]
    fn test_section_score_optional_capped_at_100() {
        let detector = SectionDetector::new();
        let mk = |name| ResumeSection {
            name,
            content: String::new(),
            start_index: 0,
            end_index: 0,
            bullets: Vec::new(),
        };
        let sections = vec![
            mk(SectionType::Experience),
            mk(SectionType::Education),
            mk(SectionType::Skills),
            mk(SectionType::Summary),
            mk(SectionType::Projects),
            mk(SectionType::Certifications),
            mk(SectionType::Awards),
        ];
        let coverage = detector.section_score(&sections);
        assert_eq!(coverage.score, 100);
    }

    #[test]
    fn test_section_score_skills_only() {
        let detector = SectionDetector::new();
        let sections = vec![ResumeSection {
            name: SectionType::Skills,
            content: String::new(),
            start_index: 0,
            end_index: 0,
            bullets: Vec::new(),
        }];
        let coverage = detector.section_score(&sections);
        assert_eq!(coverage.score, 25);
        assert_eq!(
            coverage.missing,
            vec![SectionType::Experience, SectionType::Education, SectionType::Summary, SectionType::Projects]
        );
    }

    #[test]
    fn test_empty_text_yields_no_sections() {
        let detector = SectionDetector::new();
        assert!(detector.detect_sections("").is_empty());
    }
}
