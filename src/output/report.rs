//! Report wrapper around a scan result

use crate::processing::document::ScanResult;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A scan result plus everything a reader needs to interpret it later:
/// when it ran, against which files, and with which scanner version.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanReport {
    pub result: ScanResult,
    pub metadata: ReportMetadata,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub generated_at: DateTime<Utc>,
    pub scanner_version: String,
    pub resume_file: String,
    pub job_description_file: String,
    pub processing_time_ms: u64,
}

impl ScanReport {
    pub fn new(
        result: ScanResult,
        resume_file: impl Into<String>,
        job_description_file: impl Into<String>,
        processing_time_ms: u64,
    ) -> Self {
        Self {
            result,
            metadata: ReportMetadata {
                generated_at: Utc::now(),
                scanner_version: env!("CARGO_PKG_VERSION").to_string(),
                resume_file: resume_file.into(),
                job_description_file: job_description_file.into(),
                processing_time_ms,
            },
        }
    }

    /// One-line verdict for the overall score band.
    pub fn verdict(&self) -> &'static str {
        match self.result.score.overall {
            80..=100 => "Excellent ATS compatibility",
            60..=79 => "Good compatibility with room for improvement",
            40..=59 => "Fair compatibility, several issues to address",
            _ => "Poor compatibility, significant rework recommended",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::document::{
        AtsScore, ParsedJobDescription, ParsedResume, ResumeFileType, ResumeMetadata,
    };

    fn result_with_overall(overall: u8) -> ScanResult {
        ScanResult {
            id: "test".to_string(),
            score: AtsScore {
                overall,
                keyword: 0,
                formatting: 0,
                section: 0,
                similarity: 0,
            },
            keyword_matches: Vec::new(),
            missing_keywords: Vec::new(),
            found_keywords: Vec::new(),
            formatting_issues: Vec::new(),
            section_analysis: Vec::new(),
            bullet_analysis: Vec::new(),
            suggestions: Vec::new(),
            parsed_resume: ParsedResume {
                raw_text: String::new(),
                normalized_text: String::new(),
                sections: Vec::new(),
                metadata: ResumeMetadata {
                    word_count: 0,
                    line_count: 0,
                    has_images: false,
                    has_tables: false,
                    has_columns: false,
                    has_headers_footers: false,
                    estimated_pages: 1,
                    file_size: 0,
                    file_type: ResumeFileType::Pdf,
                },
            },
            parsed_job_description: ParsedJobDescription {
                raw_text: String::new(),
                normalized_text: String::new(),
                hard_skills: Vec::new(),
                soft_skills: Vec::new(),
                tools: Vec::new(),
                technologies: Vec::new(),
                requirements: Vec::new(),
                responsibilities: Vec::new(),
                qualifications: Vec::new(),
                all_keywords: Vec::new(),
            },
        }
    }

    #[test]
    fn test_verdict_bands() {
        let report = |overall| ScanReport::new(result_with_overall(overall), "r.pdf", "j.txt", 5);
        assert_eq!(report(92).verdict(), "Excellent ATS compatibility");
        assert!(report(65).verdict().contains("Good"));
        assert!(report(45).verdict().contains("Fair"));
        assert!(report(10).verdict().contains("Poor"));
    }

    #[test]
    fn test_report_serializes_to_json() {
        let report = ScanReport::new(result_with_overall(70), "resume.pdf", "job.txt", 12);
        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"resume_file\":\"resume.pdf\""));
        assert!(json.contains("\"overall\":70"));
    }
}
