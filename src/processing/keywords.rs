//! Keyword extraction and matching against the built-in taxonomy
//!
//! Two passes over the input: tokens and 2-3 word phrases are checked for set
//! membership, then every taxonomy term is searched in the full text with
//! whole-word boundaries. The union of both passes is what gets reported, so
//! a term split oddly by tokenization is still caught by the scan pass.

use crate::error::{AtsScannerError, Result};
use crate::processing::document::{KeywordCategory, KeywordMatch};
use crate::processing::normalizer::TextNormalizer;
use crate::processing::taxonomy::KeywordTaxonomy;
use aho_corasick::AhoCorasick;
use std::collections::HashSet;

/// Characters treated as word boundaries for the full-text scan. A taxonomy
/// term only counts when flanked by these (or the string edges).
fn is_boundary(c: char) -> bool {
    c.is_whitespace()
        || matches!(
            c,
            ',' | ';' | ':' | '.' | '!' | '?' | '(' | ')' | '[' | ']' | '{' | '}' | '/' | '"'
                | '\'' | '-'
        )
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ExtractedKeywords {
    pub hard_skills: Vec<String>,
    pub soft_skills: Vec<String>,
    pub tools: Vec<String>,
    pub technologies: Vec<String>,
    pub all_keywords: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct KeywordMatchResult {
    pub matches: Vec<KeywordMatch>,
    pub matched_keywords: Vec<String>,
    pub missing_keywords: Vec<String>,
    pub match_percentage: f64,
}

pub struct KeywordExtractor {
    normalizer: TextNormalizer,
    taxonomy: KeywordTaxonomy,
    scan_matcher: AhoCorasick,
    scan_patterns: Vec<&'static str>,
}

impl KeywordExtractor {
    pub fn new() -> Result<Self> {
        let taxonomy = KeywordTaxonomy::new();
        let scan_patterns = taxonomy.all_terms();

        // Standard match kind so overlapping terms ("react" inside
        // "react native") are each reported and boundary-checked on their own.
        let scan_matcher = AhoCorasick::builder()
            .ascii_case_insensitive(true)
            .build(&scan_patterns)
            .map_err(|e| {
                AtsScannerError::Processing(format!("Failed to build keyword matcher: {}", e))
            })?;

        Ok(Self {
            normalizer: TextNormalizer::new(),
            taxonomy,
            scan_matcher,
            scan_patterns,
        })
    }

    /// Extract every taxonomy term present in `text`, grouped by category.
    pub fn extract_keywords(&self, text: &str) -> ExtractedKeywords {
        let normalized_text = text.to_lowercase();

        let tokens = self
            .normalizer
            .remove_stop_words(self.normalizer.tokenize(&normalized_text));
        let phrases = self.normalizer.extract_phrases(&normalized_text, 2, 3);

        let mut hard_skills = OrderedSet::new();
        let mut soft_skills = OrderedSet::new();
        let mut tools = OrderedSet::new();
        let mut technologies = OrderedSet::new();

        // Pass 1: token and phrase set membership.
        for term in tokens.iter().chain(phrases.iter()) {
            let term = term.trim();
            if self.taxonomy.hard_skills().contains(term) {
                hard_skills.insert(term);
            }
            if self.taxonomy.soft_skills().contains(term) {
                soft_skills.insert(term);
            }
            if self.taxonomy.tools().contains(term) {
                tools.insert(term);
            }
            if self.taxonomy.technologies().contains(term) {
                technologies.insert(term);
            }
        }

        // Pass 2: whole-word scan of the full text for every taxonomy term.
        for mat in self.scan_matcher.find_overlapping_iter(&normalized_text) {
            if !self.has_word_boundaries(&normalized_text, mat.start(), mat.end()) {
                continue;
            }
            let term = self.scan_patterns[mat.pattern()];
            if self.taxonomy.hard_skills().contains(term) {
                hard_skills.insert(term);
            }
            if self.taxonomy.soft_skills().contains(term) {
                soft_skills.insert(term);
            }
            if self.taxonomy.tools().contains(term) {
                tools.insert(term);
            }
            if self.taxonomy.technologies().contains(term) {
                technologies.insert(term);
            }
        }

        let hard_skills = hard_skills.into_vec();
        let soft_skills = soft_skills.into_vec();
        let tools = tools.into_vec();
        let technologies = technologies.into_vec();

        let mut all_keywords = OrderedSet::new();
        for keyword in hard_skills
            .iter()
            .chain(soft_skills.iter())
            .chain(tools.iter())
            .chain(technologies.iter())
        {
            all_keywords.insert(keyword);
        }

        ExtractedKeywords {
            hard_skills,
            soft_skills,
            tools,
            technologies,
            all_keywords: all_keywords.into_vec(),
        }
    }

    /// Match job-description keywords against the resume's keyword set,
    /// case-insensitively, producing one entry per job keyword.
    pub fn match_keywords(
        &self,
        resume_keywords: &[String],
        job_keywords: &[String],
    ) -> KeywordMatchResult {
        let resume_lower: HashSet<String> =
            resume_keywords.iter().map(|k| k.to_lowercase()).collect();

        let mut matches = Vec::with_capacity(job_keywords.len());
        let mut matched_keywords = Vec::new();
        let mut missing_keywords = Vec::new();

        for keyword in job_keywords {
            let found = resume_lower.contains(&keyword.to_lowercase());

            matches.push(KeywordMatch {
                keyword: keyword.clone(),
                found,
                category: self.taxonomy.category_of(keyword),
                frequency: if found { 1 } else { 0 },
            });

            if found {
                matched_keywords.push(keyword.clone());
            } else {
                missing_keywords.push(keyword.clone());
            }
        }

        let match_percentage = if job_keywords.is_empty() {
            0.0
        } else {
            (matched_keywords.len() as f64 / job_keywords.len() as f64) * 100.0
        };

        KeywordMatchResult {
            matches,
            matched_keywords,
            missing_keywords,
            match_percentage,
        }
    }

    pub fn category_of(&self, keyword: &str) -> KeywordCategory {
        self.taxonomy.category_of(keyword)
    }

    fn has_word_boundaries(&self, text: &str, start: usize, end: usize) -> bool {
        let before_ok = text[..start]
            .chars()
            .next_back()
            .map_or(true, is_boundary);
        let after_ok = text[end..].chars().next().map_or(true, is_boundary);
        before_ok && after_ok
    }
}

/// Insertion-ordered string set; keeps output order stable across runs.
struct OrderedSet {
    seen: HashSet<String>,
    items: Vec<String>,
}

impl OrderedSet {
    fn new() -> Self {
        Self {
            seen: HashSet::new(),
            items: Vec::new(),
        }
    }

    fn insert(&mut self, item: &str) {
        if self.seen.insert(item.to_string()) {
            self.items.push(item.to_string());
        }
    }

    fn into_vec(self) -> Vec<String> {
        self.items
    }
}
