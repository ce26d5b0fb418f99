//! Core data model for a scan: parsed documents, analyses, and the final result.
//!
//! Every entity here is created fresh per scan invocation and serialized as-is
//! across the persistence boundary; callers treat them as opaque structured
//! data.

use serde::{Deserialize, Serialize};

/// Closed set of resume section names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionType {
    Summary,
    Experience,
    Education,
    Skills,
    Projects,
    Certifications,
    Awards,
    Publications,
    Languages,
    Interests,
    References,
    Unknown,
}

impl std::fmt::Display for SectionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            SectionType::Summary => "summary",
            SectionType::Experience => "experience",
            SectionType::Education => "education",
            SectionType::Skills => "skills",
            SectionType::Projects => "projects",
            SectionType::Certifications => "certifications",
            SectionType::Awards => "awards",
            SectionType::Publications => "publications",
            SectionType::Languages => "languages",
            SectionType::Interests => "interests",
            SectionType::References => "references",
            SectionType::Unknown => "unknown",
        };
        write!(f, "{}", name)
    }
}

/// One detected resume section. `start_index`/`end_index` are line offsets
/// into the normalized text. Sections are ordered by `start_index` and
/// duplicates are merged before they leave the detector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResumeSection {
    pub name: SectionType,
    pub content: String,
    pub start_index: usize,
    pub end_index: usize,
    pub bullets: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResumeFileType {
    Pdf,
    Docx,
}

impl std::fmt::Display for ResumeFileType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResumeFileType::Pdf => write!(f, "pdf"),
            ResumeFileType::Docx => write!(f, "docx"),
        }
    }
}

/// Structural signals derived once at extraction time; read-only afterward.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResumeMetadata {
    pub word_count: usize,
    pub line_count: usize,
    pub has_images: bool,
    pub has_tables: bool,
    pub has_columns: bool,
    pub has_headers_footers: bool,
    pub estimated_pages: usize,
    pub file_size: usize,
    pub file_type: ResumeFileType,
}

/// A fully parsed resume; immutable after parsing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedResume {
    pub raw_text: String,
    pub normalized_text: String,
    pub sections: Vec<ResumeSection>,
    pub metadata: ResumeMetadata,
}

/// A parsed job posting: categorized keywords plus free-text extraction lists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedJobDescription {
    pub raw_text: String,
    pub normalized_text: String,
    pub hard_skills: Vec<String>,
    pub soft_skills: Vec<String>,
    pub tools: Vec<String>,
    pub technologies: Vec<String>,
    pub requirements: Vec<String>,
    pub responsibilities: Vec<String>,
    pub qualifications: Vec<String>,
    /// Deduplicated union of the four category lists.
    pub all_keywords: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeywordCategory {
    HardSkill,
    SoftSkill,
    Tool,
    Technology,
    Other,
}

/// One entry per job-description keyword. `frequency` is binary for now:
/// 1 when found in the resume, 0 when not.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordMatch {
    pub keyword: String,
    pub found: bool,
    pub category: KeywordCategory,
    pub frequency: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BulletIssueType {
    WeakActionVerb,
    NoMetrics,
    TooLong,
    TooShort,
    PassiveVoice,
    FirstPerson,
    Buzzwords,
    VagueLanguage,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BulletIssue {
    #[serde(rename = "type")]
    pub issue_type: BulletIssueType,
    pub message: String,
}

/// Heuristic quality assessment of one bullet line from an experience or
/// projects section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BulletAnalysis {
    pub text: String,
    pub section: SectionType,
    pub score: u8,
    pub issues: Vec<BulletIssue>,
    pub suggestions: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rewrite_suggestion: Option<String>,
}

/// Completeness/quality verdict for one section type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionAnalysis {
    pub name: SectionType,
    pub found: bool,
    pub score: u8,
    pub feedback: String,
    pub suggestions: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Info,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormattingIssueType {
    HasImages,
    HasTables,
    HasColumns,
    HasHeadersFooters,
    TooLong,
    TooShort,
    MissingContact,
    SpecialCharacters,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormattingIssue {
    #[serde(rename = "type")]
    pub issue_type: FormattingIssueType,
    pub severity: Severity,
    pub message: String,
    pub suggestion: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionType {
    AddKeywords,
    ImproveBullets,
    AddMetrics,
    AddSection,
    FixFormatting,
    StrengthenVerbs,
    TailorContent,
}

/// User-facing improvement suggestion, sorted by priority in the result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    #[serde(rename = "type")]
    pub suggestion_type: SuggestionType,
    pub priority: Priority,
    pub title: String,
    pub description: String,
    pub action_items: Vec<String>,
}

/// Component scores, all integers in 0..=100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AtsScore {
    pub overall: u8,
    pub keyword: u8,
    pub formatting: u8,
    pub section: u8,
    pub similarity: u8,
}

/// Aggregate root binding one score to everything that produced it. Sole
/// output of the core; the `id` is an opaque key for the caller's storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanResult {
    pub id: String,
    pub score: AtsScore,
    pub keyword_matches: Vec<KeywordMatch>,
    pub missing_keywords: Vec<String>,
    pub found_keywords: Vec<String>,
    pub formatting_issues: Vec<FormattingIssue>,
    pub section_analysis: Vec<SectionAnalysis>,
    pub bullet_analysis: Vec<BulletAnalysis>,
    pub suggestions: Vec<Suggestion>,
    pub parsed_resume: ParsedResume,
    pub parsed_job_description: ParsedJobDescription,
}
