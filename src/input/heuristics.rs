//! Layout heuristics over extracted plain text
//!
//! Format-independent detectors for structures that survive text extraction
//! only as whitespace artifacts: tables, multi-column layouts, and repeating
//! header/footer lines. Also the word/line counters and the words-per-page
//! estimate shared by both extractors.

use regex::Regex;

const WORDS_PER_PAGE: usize = 500;

pub struct LayoutHeuristics {
    space_run_regex: Regex,
    gap_regex: Regex,
    header_footer_patterns: Vec<Regex>,
}

impl Default for LayoutHeuristics {
    fn default() -> Self {
        Self::new()
    }
}

impl LayoutHeuristics {
    pub fn new() -> Self {
        Self {
            space_run_regex: Regex::new(r"\s{3,}").expect("Invalid space run regex"),
            gap_regex: Regex::new(r"\S\s{10,}\S").expect("Invalid gap regex"),
            header_footer_patterns: [
                r"(?i)page\s*\d+\s*(of\s*\d+)?",
                r"^\d+$",
                r"(?i)confidential",
                r"©\s*\d{4}",
                r"(?i)all rights reserved",
            ]
            .iter()
            .map(|p| Regex::new(p).expect("Invalid header/footer regex"))
            .collect(),
        }
    }

    /// Three or more consecutive lines that each look tabular: ≥2 tabs, ≥2
    /// pipes, or ≥3 runs of 3+ whitespace characters.
    pub fn detect_tables(&self, text: &str) -> bool {
        let mut consecutive = 0;

        for line in text.split('\n') {
            let tab_count = line.matches('\t').count();
            let pipe_count = line.matches('|').count();
            let space_runs = self.space_run_regex.find_iter(line).count();

            if tab_count >= 2 || pipe_count >= 2 || space_runs >= 3 {
                consecutive += 1;
            } else {
                consecutive = 0;
            }

            if consecutive >= 3 {
                return true;
            }
        }

        false
    }

    /// Multi-column layouts show up as mostly-short lines or as wide internal
    /// gaps between two text runs.
    pub fn detect_columns(&self, text: &str) -> bool {
        let lines: Vec<&str> = text
            .split('\n')
            .filter(|line| !line.trim().is_empty())
            .collect();

        if lines.is_empty() {
            return false;
        }

        let short_lines = lines
            .iter()
            .filter(|line| line.chars().count() < 50 && line.trim().chars().count() > 5)
            .count();
        let short_ratio = short_lines as f64 / lines.len() as f64;

        let has_large_gaps = lines.iter().any(|line| self.gap_regex.is_match(line));

        short_ratio > 0.6 || has_large_gaps
    }

    /// Scans the first and last five lines for page numbers, copyright marks,
    /// and similar boilerplate; two or more hits across both ends flags it.
    pub fn detect_headers_footers(&self, text: &str) -> bool {
        let lines: Vec<&str> = text.split('\n').collect();
        let mut hits = 0;

        for line in lines.iter().take(5) {
            if self.matches_header_footer(line) {
                hits += 1;
            }
        }

        let tail_start = lines.len().saturating_sub(5);
        for line in &lines[tail_start..] {
            if self.matches_header_footer(line) {
                hits += 1;
            }
        }

        hits >= 2
    }

    fn matches_header_footer(&self, line: &str) -> bool {
        self.header_footer_patterns
            .iter()
            .any(|pattern| pattern.is_match(line))
    }
}

pub fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}

pub fn count_lines(text: &str) -> usize {
    text.split('\n').filter(|line| !line.trim().is_empty()).count()
}

pub fn estimate_pages(text: &str) -> usize {
    count_words(text).div_ceil(WORDS_PER_PAGE).max(1)
}
