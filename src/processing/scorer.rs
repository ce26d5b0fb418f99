//! Score aggregation
//!
//! Runs the full analysis pipeline over a parsed resume and job description
//! and blends the four component scores (keyword 0.35, section 0.25,
//! formatting 0.20, similarity 0.20) into the overall score. Structural
//! metadata flags deduct from the formatting score on top of their severity
//! deductions, so a resume with tables is penalized for both the issue and
//! the flag.

use crate::error::Result;
use crate::processing::analyzer::SectionAnalyzer;
use crate::processing::bullets::{BulletAnalyzer, SplitMix64};
use crate::processing::document::{
    AtsScore, FormattingIssue, FormattingIssueType, ParsedJobDescription, ParsedResume,
    ResumeMetadata, ScanResult, Severity,
};
use crate::processing::keywords::KeywordExtractor;
use crate::processing::similarity::SimilarityEngine;
use crate::processing::suggestions::SuggestionGenerator;
use regex::Regex;

const KEYWORD_WEIGHT: f64 = 0.35;
const FORMATTING_WEIGHT: f64 = 0.20;
const SECTION_WEIGHT: f64 = 0.25;
const SIMILARITY_WEIGHT: f64 = 0.20;

pub struct AtsScorer {
    keyword_extractor: KeywordExtractor,
    similarity_engine: SimilarityEngine,
    section_detector: crate::processing::sections::SectionDetector,
    section_analyzer: SectionAnalyzer,
    bullet_analyzer: BulletAnalyzer,
    suggestion_generator: SuggestionGenerator,
    email_regex: Regex,
    phone_regex: Regex,
    rng: SplitMix64,
}

impl AtsScorer {
    pub fn new() -> Result<Self> {
        Ok(Self {
            keyword_extractor: KeywordExtractor::new()?,
            similarity_engine: SimilarityEngine::new(),
            section_detector: crate::processing::sections::SectionDetector::new(),
            section_analyzer: SectionAnalyzer::new(),
            bullet_analyzer: BulletAnalyzer::new(),
            suggestion_generator: SuggestionGenerator::new(),
            email_regex: Regex::new(r"[\w.-]+@[\w.-]+\.\w{2,}").expect("Invalid email regex"),
            phone_regex: Regex::new(
                r"\d{3}[-.\s]?\d{3}[-.\s]?\d{4}|\+\d{1,3}[-.\s]?\d{3}[-.\s]?\d{3}[-.\s]?\d{4}",
            )
            .expect("Invalid phone regex"),
            rng: SplitMix64::from_time(),
        })
    }

    /// Deterministic ids and rewrite verbs for tests.
    pub fn with_seed(seed: u64) -> Result<Self> {
        let mut scorer = Self::new()?;
        scorer.bullet_analyzer = BulletAnalyzer::with_seed(seed);
        scorer.rng = SplitMix64::new(seed);
        Ok(scorer)
    }

    /// Full scan: keyword matching, similarity, formatting analysis, section
    /// and bullet analysis, suggestions, and the blended score.
    pub fn calculate_score(
        &mut self,
        resume: ParsedResume,
        job_description: ParsedJobDescription,
    ) -> ScanResult {
        let resume_keywords = self
            .keyword_extractor
            .extract_keywords(&resume.normalized_text);
        let keyword_match = self.keyword_extractor.match_keywords(
            &resume_keywords.all_keywords,
            &job_description.all_keywords,
        );

        let similarity = self.similarity_engine.weighted_similarity(
            &resume.normalized_text,
            &job_description.normalized_text,
            &resume_keywords.all_keywords,
            &job_description.all_keywords,
        );

        let formatting_issues = self.analyze_formatting(&resume);
        let section_coverage = self.section_detector.section_score(&resume.sections);
        let bullet_analyses = self.bullet_analyzer.analyze_bullets(&resume.sections);
        let section_analyses = self
            .section_analyzer
            .analyze_sections(&resume.sections, &keyword_match.missing_keywords);
        let suggestions = self.suggestion_generator.generate_suggestions(
            &resume,
            &job_description,
            &keyword_match.missing_keywords,
            &bullet_analyses,
            &formatting_issues,
        );

        let keyword_score = keyword_score(keyword_match.match_percentage);
        let formatting_score = formatting_score(&formatting_issues, &resume.metadata);
        let section_score = section_coverage.score;
        let similarity_score = (similarity * 100.0).round() as u8;

        let overall = overall_score(
            keyword_score,
            formatting_score,
            section_score,
            similarity_score,
        );

        ScanResult {
            id: self.generate_id(),
            score: AtsScore {
                overall,
                keyword: keyword_score,
                formatting: formatting_score,
                section: section_score,
                similarity: similarity_score,
            },
            keyword_matches: keyword_match.matches,
            missing_keywords: keyword_match.missing_keywords,
            found_keywords: keyword_match.matched_keywords,
            formatting_issues,
            section_analysis: section_analyses,
            bullet_analysis: bullet_analyses,
            suggestions,
            parsed_resume: resume,
            parsed_job_description: job_description,
        }
    }

    /// Formatting issues from the extraction metadata plus text-level checks
    /// for contact info and non-ASCII characters.
    pub fn analyze_formatting(&self, resume: &ParsedResume) -> Vec<FormattingIssue> {
        let mut issues = Vec::new();
        let metadata = &resume.metadata;
        let text = &resume.normalized_text;

        if metadata.has_images {
            issues.push(FormattingIssue {
                issue_type: FormattingIssueType::HasImages,
                severity: Severity::Error,
                message: "Resume contains images that ATS systems cannot parse.".to_string(),
                suggestion: "Remove all images, logos, and graphics from your resume.".to_string(),
            });
        }

        if metadata.has_tables {
            issues.push(FormattingIssue {
                issue_type: FormattingIssueType::HasTables,
                severity: Severity::Error,
                message: "Resume contains tables that may confuse ATS parsing.".to_string(),
                suggestion: "Convert table content to standard text with bullet points."
                    .to_string(),
            });
        }

        if metadata.has_columns {
            issues.push(FormattingIssue {
                issue_type: FormattingIssueType::HasColumns,
                severity: Severity::Error,
                message: "Resume uses multiple columns which ATS cannot read correctly."
                    .to_string(),
                suggestion: "Use a single-column layout for better ATS compatibility.".to_string(),
            });
        }

        if metadata.has_headers_footers {
            issues.push(FormattingIssue {
                issue_type: FormattingIssueType::HasHeadersFooters,
                severity: Severity::Warning,
                message: "Headers/footers detected. Content may be missed by ATS.".to_string(),
                suggestion: "Move important information from headers/footers to the main body."
                    .to_string(),
            });
        }

        if metadata.estimated_pages > 2 {
            issues.push(FormattingIssue {
                issue_type: FormattingIssueType::TooLong,
                severity: Severity::Warning,
                message: format!(
                    "Resume is {} pages. Most positions prefer 1-2 pages.",
                    metadata.estimated_pages
                ),
                suggestion:
                    "Condense your resume to 1-2 pages focusing on recent, relevant experience."
                        .to_string(),
            });
        }

        if metadata.word_count < 200 {
            issues.push(FormattingIssue {
                issue_type: FormattingIssueType::TooShort,
                severity: Severity::Warning,
                message: "Resume appears too brief with limited content.".to_string(),
                suggestion:
                    "Expand your resume with more detail about your experience and achievements."
                        .to_string(),
            });
        }

        let has_email = self.email_regex.is_match(text);
        let has_phone = self.phone_regex.is_match(text);
        if !has_email || !has_phone {
            issues.push(FormattingIssue {
                issue_type: FormattingIssueType::MissingContact,
                severity: Severity::Error,
                message: "Missing contact information (email or phone).".to_string(),
                suggestion: "Add your email address and phone number at the top of your resume."
                    .to_string(),
            });
        }

        let unique_special: std::collections::HashSet<char> =
            text.chars().filter(|c| !c.is_ascii()).collect();
        if unique_special.len() > 5 {
            issues.push(FormattingIssue {
                issue_type: FormattingIssueType::SpecialCharacters,
                severity: Severity::Warning,
                message: "Resume contains special characters that may not parse correctly."
                    .to_string(),
                suggestion: "Replace special characters with standard ASCII equivalents."
                    .to_string(),
            });
        }

        issues
    }

    /// Opaque base36 scan id.
    fn generate_id(&mut self) -> String {
        let mut id = String::with_capacity(26);
        for _ in 0..2 {
            id.push_str(&to_base36(self.rng.next_u64()));
        }
        id
    }
}

/// Piecewise amplification of the raw match percentage; moderate matches are
/// pushed toward the middle of the scale.
pub fn keyword_score(match_percentage: f64) -> u8 {
    let score = if match_percentage >= 80.0 {
        90.0 + (match_percentage - 80.0) * 0.5
    } else if match_percentage >= 60.0 {
        70.0 + (match_percentage - 60.0)
    } else if match_percentage >= 40.0 {
        50.0 + (match_percentage - 40.0)
    } else if match_percentage >= 20.0 {
        30.0 + (match_percentage - 20.0)
    } else {
        match_percentage * 1.5
    };
    score.round() as u8
}

pub fn formatting_score(issues: &[FormattingIssue], metadata: &ResumeMetadata) -> u8 {
    let mut score: i32 = 100;

    for issue in issues {
        score -= match issue.severity {
            Severity::Error => 15,
            Severity::Warning => 8,
            Severity::Info => 3,
        };
    }

    if metadata.has_images {
        score -= 10;
    }
    if metadata.has_tables {
        score -= 10;
    }
    if metadata.has_columns {
        score -= 15;
    }
    if metadata.has_headers_footers {
        score -= 5;
    }

    score.clamp(0, 100) as u8
}

pub fn overall_score(keyword: u8, formatting: u8, section: u8, similarity: u8) -> u8 {
    let weighted = keyword as f64 * KEYWORD_WEIGHT
        + formatting as f64 * FORMATTING_WEIGHT
        + section as f64 * SECTION_WEIGHT
        + similarity as f64 * SIMILARITY_WEIGHT;
    weighted.round() as u8
}

fn to_base36(mut value: u64) -> String {
    const DIGITS: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if value == 0 {
        return "0".to_string();
    }
    let mut out = Vec::new();
    while value > 0 {
        out.push(DIGITS[(value % 36) as usize]);
        value /= 36;
    }
    out.reverse();
    String::from_utf8(out).expect("base36 digits are ASCII")
}
