//! Analysis pipeline: normalization, section detection, keyword matching,
//! similarity, bullet and section quality, suggestions, and scoring.

pub mod analyzer;
pub mod bullets;
pub mod document;
pub mod jd_parser;
pub mod keywords;
pub mod normalizer;
pub mod scorer;
pub mod sections;
pub mod similarity;
pub mod suggestions;
pub mod taxonomy;

pub use analyzer::SectionAnalyzer;
pub use bullets::BulletAnalyzer;
pub use document::{
    AtsScore, BulletAnalysis, FormattingIssue, KeywordMatch, ParsedJobDescription, ParsedResume,
    ResumeSection, ScanResult, SectionAnalysis, SectionType, Suggestion,
};
pub use jd_parser::JobDescriptionParser;
pub use keywords::KeywordExtractor;
pub use normalizer::TextNormalizer;
pub use scorer::AtsScorer;
pub use sections::SectionDetector;
pub use similarity::SimilarityEngine;
pub use suggestions::SuggestionGenerator;
pub use taxonomy::KeywordTaxonomy;
