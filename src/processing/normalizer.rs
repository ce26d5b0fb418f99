//! Text normalization and low-level tokenization
//!
//! Canonicalizes raw extracted text (smart quotes, bullet glyphs, whitespace)
//! and provides the tokenizers the rest of the pipeline builds on.
//! `normalize` is idempotent: running it twice yields the same string.

use regex::Regex;
use std::collections::HashSet;

/// Glyphs that all render as list bullets in the wild; unified to `•`.
const BULLET_GLYPHS: &[char] = &[
    '•', '‣', '◦', '⁃', '∙', '▪', '▫', '●', '○', '■', '□', '►', '▸', '▹', '▶', '➤', '➢', '➣',
    '➔', '→', '⇒', '⟶', '◆', '◇',
];

/// Short stopword list used only for phrase boundary checks.
const PHRASE_STOP_WORDS: &[&str] = &[
    "the", "a", "an", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with", "by",
];

pub struct TextNormalizer {
    stop_words: HashSet<String>,
    space_run_regex: Regex,
    newline_run_regex: Regex,
    non_word_regex: Regex,
    whitespace_regex: Regex,
    sentence_regex: Regex,
    bullet_prefix_patterns: Vec<Regex>,
}

impl Default for TextNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl TextNormalizer {
    pub fn new() -> Self {
        let space_run_regex = Regex::new(r"[ \t]+").expect("Invalid space run regex");
        let newline_run_regex = Regex::new(r"\n{3,}").expect("Invalid newline run regex");
        let non_word_regex = Regex::new(r"[^\w\s\-.]").expect("Invalid non-word regex");
        let whitespace_regex = Regex::new(r"\s+").expect("Invalid whitespace regex");
        let sentence_regex = Regex::new(r"[^.!?]+[.!?]+").expect("Invalid sentence regex");

        // Ordered bullet prefix rules; first match wins.
        let bullet_prefix_patterns = vec![
            Regex::new(r"^[•\-*+]\s*").expect("Invalid glyph bullet regex"),
            Regex::new(r"^(?i)[a-z]\)\s*").expect("Invalid lettered bullet regex"),
            Regex::new(r"^\d+[.)]\s*").expect("Invalid numbered bullet regex"),
            Regex::new(r"^(?i)[ivx]+[.)]\s*").expect("Invalid roman bullet regex"),
            Regex::new(r"^○\s*").expect("Invalid circle bullet regex"),
        ];

        Self {
            stop_words: Self::create_stop_words(),
            space_run_regex,
            newline_run_regex,
            non_word_regex,
            whitespace_regex,
            sentence_regex,
            bullet_prefix_patterns,
        }
    }

    /// Canonicalize raw extracted text: ASCII quotes/dashes, one bullet glyph,
    /// LF newlines, collapsed whitespace, trimmed lines.
    pub fn normalize(&self, text: &str) -> String {
        let mut normalized = String::with_capacity(text.len());

        for c in text.chars() {
            match c {
                '\u{2018}' | '\u{2019}' => normalized.push('\''),
                '\u{201C}' | '\u{201D}' => normalized.push('"'),
                '\u{2013}' => normalized.push('-'),
                '\u{2014}' => normalized.push_str("--"),
                '\u{2026}' => normalized.push_str("..."),
                '\u{00A0}' => normalized.push(' '),
                // Soft hyphen and zero-width characters carry no content
                '\u{00AD}' | '\u{200B}'..='\u{200D}' | '\u{FEFF}' => {}
                c if BULLET_GLYPHS.contains(&c) => normalized.push('•'),
                c => normalized.push(c),
            }
        }

        let normalized = normalized.replace("\r\n", "\n").replace('\r', "\n");
        let normalized = self.space_run_regex.replace_all(&normalized, " ");
        let normalized = self.newline_run_regex.replace_all(&normalized, "\n\n");

        normalized
            .lines()
            .map(str::trim)
            .collect::<Vec<_>>()
            .join("\n")
            .trim()
            .to_string()
    }

    /// Lowercase and strip everything except word characters, hyphens, and
    /// periods, collapsing whitespace.
    pub fn clean_for_analysis(&self, text: &str) -> String {
        let cleaned = self.normalize(text).to_lowercase();
        let cleaned = self.non_word_regex.replace_all(&cleaned, " ");
        self.whitespace_regex
            .replace_all(&cleaned, " ")
            .trim()
            .to_string()
    }

    /// Tokenize into lowercased words, dropping single characters and
    /// pure-digit tokens.
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        self.clean_for_analysis(text)
            .split_whitespace()
            .filter(|token| token.chars().count() > 1 && !token.chars().all(|c| c.is_ascii_digit()))
            .map(str::to_string)
            .collect()
    }

    /// Filter out common English stopwords (case-insensitive).
    pub fn remove_stop_words(&self, tokens: Vec<String>) -> Vec<String> {
        tokens
            .into_iter()
            .filter(|token| !self.stop_words.contains(&token.to_lowercase()))
            .collect()
    }

    /// All contiguous word n-grams in `[min_words, max_words]` per sentence,
    /// lowercased and deduplicated, skipping n-grams anchored on stopwords.
    pub fn extract_phrases(&self, text: &str, min_words: usize, max_words: usize) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut phrases = Vec::new();

        for sentence in self.extract_sentences(text) {
            let words: Vec<&str> = sentence.split_whitespace().collect();

            for len in min_words..=max_words.min(words.len()) {
                for window in words.windows(len) {
                    let phrase = window.join(" ").to_lowercase();
                    if is_valid_phrase(&phrase) && seen.insert(phrase.clone()) {
                        phrases.push(phrase);
                    }
                }
            }
        }

        phrases
    }

    /// Extract bullet lines, stripping the list prefix. Lines with ≤10 chars
    /// of content are dropped as noise.
    pub fn extract_bullets(&self, text: &str) -> Vec<String> {
        let mut bullets = Vec::new();

        for line in text.lines() {
            let trimmed = line.trim();

            for pattern in &self.bullet_prefix_patterns {
                if pattern.is_match(trimmed) {
                    let bullet_text = pattern.replace(trimmed, "").trim().to_string();
                    if bullet_text.chars().count() > 10 {
                        bullets.push(bullet_text);
                    }
                    break;
                }
            }
        }

        bullets
    }

    /// Naive sentence split on `.!?` boundaries; fragments ≤10 chars dropped.
    pub fn extract_sentences(&self, text: &str) -> Vec<String> {
        self.sentence_regex
            .find_iter(text)
            .map(|m| m.as_str().trim().to_string())
            .filter(|s| s.chars().count() > 10)
            .collect()
    }

    /// Strip a recognized bullet prefix from a line, if any.
    pub fn strip_bullet_prefix(&self, line: &str) -> String {
        let mut cleaned = line.trim().to_string();
        for pattern in &self.bullet_prefix_patterns {
            cleaned = pattern.replace(&cleaned, "").to_string();
        }
        cleaned.trim().to_string()
    }

    /// True if the line starts with a recognized bullet prefix.
    pub fn is_bullet_line(&self, line: &str) -> bool {
        self.bullet_prefix_patterns
            .iter()
            .any(|pattern| pattern.is_match(line.trim()))
    }

    fn create_stop_words() -> HashSet<String> {
        let stop_words = [
            "a", "an", "the", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with",
            "by", "from", "as", "is", "was", "are", "were", "been", "be", "have", "has", "had",
            "do", "does", "did", "will", "would", "could", "should", "may", "might", "must",
            "shall", "can", "need", "dare", "ought", "used", "i", "me", "my", "myself", "we",
            "our", "ours", "ourselves", "you", "your", "yours", "yourself", "yourselves", "he",
            "him", "his", "himself", "she", "her", "hers", "herself", "it", "its", "itself",
            "they", "them", "their", "theirs", "themselves", "what", "which", "who", "whom",
            "this", "that", "these", "those", "am", "being", "having", "doing", "because",
            "until", "while", "about", "against", "between", "into", "through", "during",
            "before", "after", "above", "below", "up", "down", "out", "off", "over", "under",
            "again", "further", "then", "once", "here", "there", "when", "where", "why", "how",
            "all", "each", "few", "more", "most", "other", "some", "such", "no", "nor", "not",
            "only", "own", "same", "so", "than", "too", "very", "just", "also", "now", "etc",
            "eg", "ie",
        ];

        stop_words.iter().map(|&s| s.to_string()).collect()
    }
}

fn is_valid_phrase(phrase: &str) -> bool {
    let words: Vec<&str> = phrase.split(' ').collect();
    let (Some(first), Some(last)) = (words.first(), words.last()) else {
        return false;
    };

    if PHRASE_STOP_WORDS.contains(first) || PHRASE_STOP_WORDS.contains(last) {
        return false;
    }

    words
        .iter()
        .any(|word| !PHRASE_STOP_WORDS.contains(word))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_is_idempotent() {
        let normalizer = TextNormalizer::new();
        let inputs = [
            "“Smart quotes” and – dashes — everywhere…\r\nNext\tline",
            "►  arrow bullet\n\n\n\n\nfar below",
            "  already   clean text  ",
            "",
        ];
        for input in inputs {
            let once = normalizer.normalize(input);
            let twice = normalizer.normalize(&once);
            assert_eq!(once, twice, "normalize not idempotent for {:?}", input);
        }
    }

    #[test]
    fn test_normalize_unifies_bullets_and_quotes() {
        let normalizer = TextNormalizer::new();
        let result = normalizer.normalize("► item one\n“quoted”\nco–op");
        assert_eq!(result, "• item one\n\"quoted\"\nco-op");
    }

    #[test]
    fn test_normalize_collapses_newlines_and_spaces() {
        let normalizer = TextNormalizer::new();
        let result = normalizer.normalize("a    b\tc\n\n\n\n\nd");
        assert_eq!(result, "a b c\n\nd");
    }

    #[test]
    fn test_tokenize_drops_short_and_numeric_tokens() {
        let normalizer = TextNormalizer::new();
        let tokens = normalizer.tokenize("Built 3 APIs in Rust, a C success (2024)!");
        assert!(tokens.contains(&"built".to_string()));
        assert!(tokens.contains(&"apis".to_string()));
        assert!(tokens.contains(&"rust".to_string()));
        assert!(!tokens.contains(&"3".to_string()));
        assert!(!tokens.contains(&"c".to_string()));
        assert!(!tokens.contains(&"2024".to_string()));
    }

    #[test]
    fn test_remove_stop_words() {
        let normalizer = TextNormalizer::new();
        let tokens = vec![
            "the".to_string(),
            "kubernetes".to_string(),
            "And".to_string(),
            "docker".to_string(),
        ];
        let filtered = normalizer.remove_stop_words(tokens);
        assert_eq!(filtered, vec!["kubernetes".to_string(), "docker".to_string()]);
    }

    #[test]
    fn test_extract_bullets_skips_plain_lines() {
        let normalizer = TextNormalizer::new();
        let bullets = normalizer
            .extract_bullets("• Built a tool\nRegular line\n- Led a team of 5 engineers");
        assert_eq!(
            bullets,
            vec!["Built a tool".to_string(), "Led a team of 5 engineers".to_string()]
        );
    }

    #[test]
    fn test_extract_bullets_handles_numbered_and_lettered() {
        let normalizer = TextNormalizer::new();
        let text = "1. Shipped the billing service\nb) Migrated legacy database\nii. Ran incident response drills";
        let bullets = normalizer.extract_bullets(text);
        assert_eq!(bullets.len(), 3);
        assert_eq!(bullets[0], "Shipped the billing service");
        assert_eq!(bullets[1], "Migrated legacy database");
        assert_eq!(bullets[2], "Ran incident response drills");
    }

    #[test]
    fn test_extract_bullets_drops_short_content() {
        let normalizer = TextNormalizer::new();
        assert!(normalizer.extract_bullets("- too short").is_empty());
    }

    #[test]
    fn test_extract_sentences() {
        let normalizer = TextNormalizer::new();
        let sentences =
            normalizer.extract_sentences("Led the platform team. Grew it fast! Ok. And shipped v2?");
        assert_eq!(
            sentences,
            vec![
                "Led the platform team.".to_string(),
                "Grew it fast!".to_string(),
                "And shipped v2?".to_string(),
            ]
        );
    }

    #[test]
    fn test_extract_phrases_rejects_stopword_anchors() {
        let normalizer = TextNormalizer::new();
        let phrases = normalizer.extract_phrases("Built distributed systems for the team.", 2, 3);
        assert!(phrases.contains(&"distributed systems".to_string()));
        assert!(!phrases.iter().any(|p| p.starts_with("the ")));
        assert!(!phrases.iter().any(|p| p.ends_with(" the")));
    }

    #[test]
    fn test_extract_phrases_deduplicates() {
        let normalizer = TextNormalizer::new();
        let phrases =
            normalizer.extract_phrases("Machine learning rocks. Machine learning scales.", 2, 2);
        let count = phrases.iter().filter(|p| *p == "machine learning").count();
        assert_eq!(count, 1);
    }
}
