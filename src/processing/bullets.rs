//! Bullet point quality analysis
//!
//! Each experience/projects bullet starts at 100 and loses points for weak
//! openers, missing metrics, bad length, passive voice, first-person
//! pronouns, buzzwords, and vague quantifiers. Bullets with a weak verb or no
//! metrics also get a concrete rewrite suggestion.

use crate::processing::document::{
    BulletAnalysis, BulletIssue, BulletIssueType, ResumeSection, SectionType,
};
use regex::Regex;
use std::time::{SystemTime, UNIX_EPOCH};

const STRONG_ACTION_VERBS: &[&str] = &[
    "achieved", "accelerated", "accomplished", "acquired", "advanced", "amplified",
    "analyzed", "architected", "automated", "boosted", "built", "captured",
    "championed", "consolidated", "converted", "created", "decreased", "delivered",
    "designed", "developed", "directed", "doubled", "drove", "eliminated",
    "enabled", "engineered", "established", "exceeded", "executed", "expanded",
    "generated", "grew", "headed", "identified", "implemented", "improved",
    "increased", "influenced", "initiated", "innovated", "integrated", "introduced",
    "launched", "led", "leveraged", "managed", "maximized", "mentored",
    "modernized", "negotiated", "optimized", "orchestrated", "overhauled", "partnered",
    "pioneered", "planned", "produced", "propelled", "quadrupled", "raised",
    "rebranded", "rebuilt", "recaptured", "redesigned", "reduced", "reengineered",
    "refactored", "refined", "reformed", "reinvented", "relaunched", "remediated",
    "reorganized", "replaced", "resolved", "restructured", "revamped", "reversed",
    "revolutionized", "scaled", "secured", "shaped", "simplified", "slashed",
    "solved", "spearheaded", "standardized", "steered", "streamlined", "strengthened",
    "surpassed", "synchronized", "systematized", "targeted", "trained", "transformed",
    "tripled", "troubleshot", "turned around", "unified", "upgraded", "utilized",
];

const WEAK_VERBS: &[&str] = &[
    "assisted", "helped", "worked", "was responsible", "responsible for",
    "duties included", "handled", "participated", "contributed", "involved",
    "supported", "aided", "tasked with", "assigned to", "served as",
];

const BUZZWORDS: &[&str] = &[
    "synergy", "leverage", "proactive", "paradigm", "holistic", "ecosystem",
    "bandwidth", "circle back", "deep dive", "drill down", "move the needle",
    "low-hanging fruit", "best practices", "value-add", "thought leader",
    "game changer", "disruptive", "ninja", "rockstar", "guru", "wizard",
];

const VAGUE_TERMS: &[&str] = &["various", "several", "many", "some", "numerous", "multiple"];

const REWRITE_VERBS: &[&str] = &[
    "Developed", "Implemented", "Led", "Designed", "Optimized", "Streamlined",
];

/// Minimal seedable generator (SplitMix64). Enough entropy for picking
/// rewrite verbs and minting scan ids without pulling in a randomness crate.
#[derive(Debug, Clone)]
pub(crate) struct SplitMix64 {
    state: u64,
}

impl SplitMix64 {
    pub(crate) fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    pub(crate) fn from_time() -> Self {
        let seed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0x9E3779B97F4A7C15);
        Self::new(seed)
    }

    pub(crate) fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9E3779B97F4A7C15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58476D1CE4E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D049BB133111EB);
        z ^ (z >> 31)
    }

    pub(crate) fn gen_index(&mut self, len: usize) -> usize {
        (self.next_u64() % len as u64) as usize
    }
}

pub struct BulletAnalyzer {
    metrics_regex: Regex,
    passive_patterns: Vec<Regex>,
    first_person_regex: Regex,
    non_letter_regex: Regex,
    past_tense_regex: Regex,
    gerund_regex: Regex,
    rng: SplitMix64,
}

impl BulletAnalyzer {
    pub fn new() -> Self {
        Self::with_rng(SplitMix64::from_time())
    }

    /// Deterministic rewrite verb selection for tests.
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(SplitMix64::new(seed))
    }

    fn with_rng(rng: SplitMix64) -> Self {
        Self {
            metrics_regex: Regex::new(
                r"(?i)\d+%|\$\d+|\d+\s*(k|m|million|billion|thousand)|\d+x|\d+\s*(users?|customers?|clients?|projects?|teams?|members?)",
            )
            .expect("Invalid metrics regex"),
            passive_patterns: [
                r"(?i)\bwas\s+\w+ed\b",
                r"(?i)\bwere\s+\w+ed\b",
                r"(?i)\bbeen\s+\w+ed\b",
                r"(?i)\bbeing\s+\w+ed\b",
            ]
            .iter()
            .map(|p| Regex::new(p).expect("Invalid passive voice regex"))
            .collect(),
            first_person_regex: Regex::new(r"(?i)\b(i|my|me)\b")
                .expect("Invalid first person regex"),
            non_letter_regex: Regex::new(r"[^a-z]").expect("Invalid non-letter regex"),
            past_tense_regex: Regex::new(r"(?i)^[a-z]+ed$").expect("Invalid past tense regex"),
            gerund_regex: Regex::new(r"(?i)^[a-z]+ing$").expect("Invalid gerund regex"),
            rng,
        }
    }

    /// Analyze every bullet in experience and projects sections; other
    /// sections are skipped.
    pub fn analyze_bullets(&mut self, sections: &[ResumeSection]) -> Vec<BulletAnalysis> {
        let mut analyses = Vec::new();

        for section in sections {
            if !matches!(section.name, SectionType::Experience | SectionType::Projects) {
                continue;
            }

            for bullet in &section.bullets {
                analyses.push(self.analyze_single_bullet(bullet, section.name));
            }
        }

        analyses
    }

    pub fn analyze_single_bullet(&mut self, bullet: &str, section: SectionType) -> BulletAnalysis {
        let mut issues = Vec::new();
        let mut suggestions = Vec::new();
        let mut score: i32 = 100;

        let raw_first_word = bullet.split_whitespace().next().unwrap_or("");
        let first_word = self
            .non_letter_regex
            .replace_all(&raw_first_word.to_lowercase(), "")
            .to_string();

        let lower = bullet.to_lowercase();
        let prefix: String = lower.chars().take(20).collect();

        if WEAK_VERBS.contains(&first_word.as_str()) || WEAK_VERBS.contains(&prefix.as_str()) {
            issues.push(BulletIssue {
                issue_type: BulletIssueType::WeakActionVerb,
                message: format!(
                    "Starts with weak verb \"{}\". Use a stronger action verb.",
                    first_word
                ),
            });
            suggestions.push(format!(
                "Replace \"{}\" with a strong action verb like \"Led\", \"Developed\", or \"Implemented\"",
                first_word
            ));
            score -= 15;
        } else if !STRONG_ACTION_VERBS.contains(&first_word.as_str())
            && !self.past_tense_regex.is_match(&first_word)
            && !self.gerund_regex.is_match(&first_word)
        {
            issues.push(BulletIssue {
                issue_type: BulletIssueType::WeakActionVerb,
                message: "Does not start with a strong action verb.".to_string(),
            });
            suggestions.push("Start bullet points with a strong past-tense action verb".to_string());
            score -= 10;
        }

        let has_metrics = self.metrics_regex.is_match(bullet);
        if !has_metrics {
            issues.push(BulletIssue {
                issue_type: BulletIssueType::NoMetrics,
                message: "No quantifiable metrics found.".to_string(),
            });
            suggestions.push(
                "Add specific numbers, percentages, or dollar amounts to quantify your impact"
                    .to_string(),
            );
            score -= 20;
        }

        let length = bullet.chars().count();
        if length > 200 {
            issues.push(BulletIssue {
                issue_type: BulletIssueType::TooLong,
                message: format!(
                    "Bullet is too long ({} characters). Keep under 150 characters.",
                    length
                ),
            });
            suggestions
                .push("Shorten this bullet point to make it more concise and scannable".to_string());
            score -= 10;
        } else if length < 30 {
            issues.push(BulletIssue {
                issue_type: BulletIssueType::TooShort,
                message: "Bullet is too short. Add more detail about your impact.".to_string(),
            });
            suggestions.push(
                "Expand this bullet with more context about your responsibilities and results"
                    .to_string(),
            );
            score -= 10;
        }

        if self.passive_patterns.iter().any(|p| p.is_match(bullet)) {
            issues.push(BulletIssue {
                issue_type: BulletIssueType::PassiveVoice,
                message: "Uses passive voice. Rewrite in active voice.".to_string(),
            });
            suggestions
                .push("Rewrite using active voice to emphasize your direct contributions".to_string());
            score -= 10;
        }

        if self.first_person_regex.is_match(bullet) {
            issues.push(BulletIssue {
                issue_type: BulletIssueType::FirstPerson,
                message: "Uses first person pronouns. Resume bullets should not use \"I\", \"my\", or \"me\"."
                    .to_string(),
            });
            suggestions
                .push("Remove first-person pronouns and start directly with the action verb".to_string());
            score -= 5;
        }

        let found_buzzwords: Vec<&str> = BUZZWORDS
            .iter()
            .filter(|bw| lower.contains(*bw))
            .copied()
            .collect();
        if !found_buzzwords.is_empty() {
            issues.push(BulletIssue {
                issue_type: BulletIssueType::Buzzwords,
                message: format!(
                    "Contains overused buzzwords: {}",
                    found_buzzwords.join(", ")
                ),
            });
            suggestions.push(
                "Replace buzzwords with specific, concrete descriptions of your work".to_string(),
            );
            score -= 5 * found_buzzwords.len() as i32;
        }

        let found_vague: Vec<&str> = VAGUE_TERMS
            .iter()
            .filter(|term| lower.contains(*term))
            .copied()
            .collect();
        if !found_vague.is_empty() {
            issues.push(BulletIssue {
                issue_type: BulletIssueType::VagueLanguage,
                message: format!(
                    "Uses vague quantifiers: {}. Be specific.",
                    found_vague.join(", ")
                ),
            });
            suggestions.push("Replace vague terms with specific numbers or details".to_string());
            score -= 5 * found_vague.len() as i32;
        }

        let rewrite_suggestion = self.generate_rewrite(bullet, raw_first_word, &issues);

        BulletAnalysis {
            text: bullet.to_string(),
            section,
            score: score.max(0) as u8,
            issues,
            suggestions,
            rewrite_suggestion,
        }
    }

    fn generate_rewrite(
        &mut self,
        bullet: &str,
        raw_first_word: &str,
        issues: &[BulletIssue],
    ) -> Option<String> {
        if issues.is_empty() {
            return None;
        }

        let has_weak_verb = issues
            .iter()
            .any(|i| i.issue_type == BulletIssueType::WeakActionVerb);
        let no_metrics = issues
            .iter()
            .any(|i| i.issue_type == BulletIssueType::NoMetrics);

        if !has_weak_verb && !no_metrics {
            return None;
        }

        let verb = REWRITE_VERBS[self.rng.gen_index(REWRITE_VERBS.len())];

        let mut suggestion = bullet.to_string();
        if has_weak_verb && !raw_first_word.is_empty() {
            suggestion = suggestion.replacen(raw_first_word, verb, 1);
        }
        if no_metrics {
            suggestion.push_str(" [Add: resulting in X% improvement / saving $X / impacting X users]");
        }

        Some(suggestion)
    }
}

impl Default for BulletAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analyzer() -> BulletAnalyzer {
        BulletAnalyzer::with_seed(42)
    }

    #[test]
    fn test_strong_bullet_scores_high() {
        let analysis = analyzer().analyze_single_bullet(
            "Reduced deployment time by 80% across 12 teams",
            SectionType::Experience,
        );
        assert_eq!(analysis.score, 100);
        assert!(analysis.issues.is_empty());
        assert!(analysis.rewrite_suggestion.is_none());
    }

    #[test]
    fn test_weak_verb_deduction() {
        let analysis = analyzer().analyze_single_bullet(
            "Helped the team ship releases on a 2x faster cadence",
            SectionType::Experience,
        );
        assert!(analysis
            .issues
            .iter()
            .any(|i| i.issue_type == BulletIssueType::WeakActionVerb));
        assert_eq!(analysis.score, 85);
    }

    #[test]
    fn test_no_metrics_deduction() {
        let analysis = analyzer().analyze_single_bullet(
            "Developed the internal deployment platform for engineers",
            SectionType::Experience,
        );
        assert!(analysis
            .issues
            .iter()
            .any(|i| i.issue_type == BulletIssueType::NoMetrics));
        assert_eq!(analysis.score, 80);
    }

    #[test]
    fn test_stacked_deductions_floor_at_zero() {
        let bullet = "I was tasked with various things involving synergy, leverage, paradigm shifts, bandwidth and being asked to circle back on numerous occasions with many teams for some projects with several stakeholders";
        let analysis = analyzer().analyze_single_bullet(bullet, SectionType::Experience);
        assert_eq!(analysis.score, 0);
    }

    #[test]
    fn test_too_short_and_too_long() {
        let mut a = analyzer();
        let short = a.analyze_single_bullet("Did 5x more stuff", SectionType::Experience);
        assert!(short
            .issues
            .iter()
            .any(|i| i.issue_type == BulletIssueType::TooShort));

        let long_text = format!("Delivered {} with 40% gains", "a very long description ".repeat(10));
        let long = a.analyze_single_bullet(&long_text, SectionType::Experience);
        assert!(long
            .issues
            .iter()
            .any(|i| i.issue_type == BulletIssueType::TooLong));
    }

    #[test]
    fn test_passive_voice_detected() {
        let analysis = analyzer().analyze_single_bullet(
            "Features were delivered to 400 users every sprint",
            SectionType::Experience,
        );
        assert!(analysis
            .issues
            .iter()
            .any(|i| i.issue_type == BulletIssueType::PassiveVoice));
    }

    #[test]
    fn test_first_person_detected() {
        let analysis = analyzer().analyze_single_bullet(
            "Grew my region's revenue by 30% in 6 months",
            SectionType::Experience,
        );
        assert!(analysis
            .issues
            .iter()
            .any(|i| i.issue_type == BulletIssueType::FirstPerson));
    }

    #[test]
    fn test_rewrite_replaces_weak_verb_and_adds_metric_prompt() {
        let analysis = analyzer().analyze_single_bullet(
            "Helped maintain the customer portal frontend",
            SectionType::Experience,
        );
        let rewrite = analysis.rewrite_suggestion.expect("rewrite expected");
        assert!(!rewrite.starts_with("Helped"));
        assert!(rewrite.contains("[Add: resulting in X% improvement"));
    }

    #[test]
    fn test_rewrite_is_deterministic_with_seed() {
        let bullet = "Helped maintain the customer portal frontend";
        let first = BulletAnalyzer::with_seed(7)
            .analyze_single_bullet(bullet, SectionType::Experience)
            .rewrite_suggestion;
        let second = BulletAnalyzer::with_seed(7)
            .analyze_single_bullet(bullet, SectionType::Experience)
            .rewrite_suggestion;
        assert_eq!(first, second);
    }

    #[test]
    fn test_only_experience_and_projects_sections_analyzed() {
        let mut a = analyzer();
        let mk = |name, bullets: &[&str]| ResumeSection {
            name,
            content: String::new(),
            start_index: 0,
            end_index: 0,
            bullets: bullets.iter().map(|s| s.to_string()).collect(),
        };
        let sections = vec![
            mk(SectionType::Experience, &["Shipped 3 products to market"]),
            mk(SectionType::Skills, &["Rust, Python, Kubernetes listed"]),
            mk(SectionType::Projects, &["Built an open source CLI tool"]),
        ];
        let analyses = a.analyze_bullets(&sections);
        assert_eq!(analyses.len(), 2);
        assert!(analyses.iter().all(|b| matches!(
            b.section,
            SectionType::Experience | SectionType::Projects
        )));
    }
}
