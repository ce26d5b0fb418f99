//! Output formatters: console with colors, JSON for machine consumption,
//! and Markdown for saved reports.

use crate::config::OutputFormat;
use crate::error::{AtsScannerError, Result};
use crate::output::report::ScanReport;
use crate::processing::document::{Priority, Severity};
use colored::{Color, Colorize};

pub trait OutputFormatter {
    fn format_report(&self, report: &ScanReport) -> Result<String>;
    fn supports_format(&self) -> OutputFormat;
}

pub struct ConsoleFormatter {
    use_colors: bool,
    detailed: bool,
}

pub struct JsonFormatter {
    pretty: bool,
}

pub struct MarkdownFormatter;

/// Dispatches to the right formatter for a requested output format.
pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
    markdown_formatter: MarkdownFormatter,
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool, detailed: bool) -> Self {
        Self {
            use_colors,
            detailed,
        }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str, level: u8) -> String {
        match level {
            1 => format!(
                "\n{}\n{}\n",
                self.colorize(title, Color::BrightWhite),
                "=".repeat(title.chars().count())
            ),
            2 => format!(
                "\n{}\n{}\n",
                self.colorize(title, Color::White),
                "-".repeat(title.chars().count())
            ),
            _ => format!("\n{}\n", self.colorize(title, Color::White)),
        }
    }

    fn score_badge(&self, score: u8) -> String {
        let (label, color) = match score {
            80..=100 => ("EXCELLENT", Color::Green),
            60..=79 => ("GOOD", Color::Cyan),
            40..=59 => ("FAIR", Color::Yellow),
            _ => ("POOR", Color::Red),
        };
        self.colorize(&format!("[{}]", label), color)
    }

    fn severity_icon(severity: Severity) -> &'static str {
        match severity {
            Severity::Error => "❌",
            Severity::Warning => "⚠️",
            Severity::Info => "ℹ️",
        }
    }

    fn priority_label(&self, priority: Priority) -> String {
        match priority {
            Priority::High => self.colorize("HIGH", Color::Red),
            Priority::Medium => self.colorize("MEDIUM", Color::Yellow),
            Priority::Low => self.colorize("LOW", Color::Green),
        }
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, report: &ScanReport) -> Result<String> {
        let result = &report.result;
        let mut output = String::new();

        output.push_str(&self.format_header("📊 ATS COMPATIBILITY SCAN", 1));
        output.push_str(&format!(
            "Generated: {} | Processing time: {}ms\n",
            report.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
            report.metadata.processing_time_ms
        ));
        output.push_str(&format!(
            "Resume: {} | Job description: {}\n",
            report.metadata.resume_file, report.metadata.job_description_file
        ));

        output.push_str(&self.format_header("Overall Score", 2));
        output.push_str(&format!(
            "Overall: {}% {}\n",
            result.score.overall,
            self.score_badge(result.score.overall)
        ));
        output.push_str(&format!(
            "Verdict: {}\n",
            self.colorize(report.verdict(), Color::Cyan)
        ));

        output.push_str(&self.format_header("Score Breakdown", 3));
        output.push_str(&format!("🔍 Keyword Score: {}%\n", result.score.keyword));
        output.push_str(&format!(
            "📄 Formatting Score: {}%\n",
            result.score.formatting
        ));
        output.push_str(&format!("📑 Section Score: {}%\n", result.score.section));
        output.push_str(&format!(
            "🎯 Similarity Score: {}%\n",
            result.score.similarity
        ));

        if !result.found_keywords.is_empty() {
            output.push_str(&self.format_header("✅ Matched Keywords", 3));
            output.push_str(&format!(
                "  {}\n",
                self.colorize(&result.found_keywords.join(", "), Color::Green)
            ));
        }

        if !result.missing_keywords.is_empty() {
            output.push_str(&self.format_header("🚨 Missing Keywords", 3));
            output.push_str(&format!(
                "  {}\n",
                self.colorize(&result.missing_keywords.join(", "), Color::Red)
            ));
        }

        if !result.formatting_issues.is_empty() {
            output.push_str(&self.format_header("📄 Formatting Issues", 2));
            for issue in &result.formatting_issues {
                output.push_str(&format!(
                    "{} {}\n  Fix: {}\n",
                    Self::severity_icon(issue.severity),
                    issue.message,
                    issue.suggestion
                ));
            }
        }

        if !result.suggestions.is_empty() {
            output.push_str(&self.format_header("📋 Suggestions", 2));
            for (i, suggestion) in result.suggestions.iter().enumerate() {
                output.push_str(&format!(
                    "{}. [{}] {}\n   {}\n",
                    i + 1,
                    self.priority_label(suggestion.priority),
                    self.colorize(&suggestion.title, Color::White),
                    suggestion.description
                ));
                for item in &suggestion.action_items {
                    output.push_str(&format!("   • {}\n", item));
                }
                output.push('\n');
            }
        }

        if self.detailed {
            output.push_str(&self.format_header("📑 Section Analysis", 2));
            for analysis in &result.section_analysis {
                let status = if analysis.found {
                    self.colorize("found", Color::Green)
                } else {
                    self.colorize("missing", Color::Red)
                };
                output.push_str(&format!(
                    "• {} ({}): {}% — {}\n",
                    analysis.name, status, analysis.score, analysis.feedback
                ));
                for suggestion in &analysis.suggestions {
                    output.push_str(&format!("    → {}\n", suggestion));
                }
            }

            if !result.bullet_analysis.is_empty() {
                output.push_str(&self.format_header("🔫 Bullet Analysis", 2));
                for bullet in &result.bullet_analysis {
                    output.push_str(&format!(
                        "• {}% {}\n",
                        bullet.score,
                        truncate(&bullet.text, 80)
                    ));
                    for issue in &bullet.issues {
                        output.push_str(&format!("    - {}\n", issue.message));
                    }
                    if let Some(rewrite) = &bullet.rewrite_suggestion {
                        output.push_str(&format!(
                            "    💡 {}\n",
                            self.colorize(rewrite, Color::Green)
                        ));
                    }
                }
            }
        }

        output.push_str(&format!(
            "\n{} Generated by ats-scanner v{}\n",
            self.colorize("ℹ️", Color::Blue),
            report.metadata.scanner_version
        ));

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Console
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, report: &ScanReport) -> Result<String> {
        let json = if self.pretty {
            serde_json::to_string_pretty(report)?
        } else {
            serde_json::to_string(report)?
        };
        Ok(json)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Json
    }
}

impl MarkdownFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for MarkdownFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_report(&self, report: &ScanReport) -> Result<String> {
        let result = &report.result;
        let mut output = String::new();

        output.push_str("# ATS Compatibility Scan\n\n");
        output.push_str(&format!(
            "Generated {} for `{}` against `{}`.\n\n",
            report.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
            report.metadata.resume_file,
            report.metadata.job_description_file
        ));

        output.push_str("## Scores\n\n");
        output.push_str("| Component | Score |\n|---|---|\n");
        output.push_str(&format!("| **Overall** | **{}%** |\n", result.score.overall));
        output.push_str(&format!("| Keyword | {}% |\n", result.score.keyword));
        output.push_str(&format!("| Formatting | {}% |\n", result.score.formatting));
        output.push_str(&format!("| Section | {}% |\n", result.score.section));
        output.push_str(&format!("| Similarity | {}% |\n\n", result.score.similarity));
        output.push_str(&format!("Verdict: {}\n\n", report.verdict()));

        output.push_str("## Keywords\n\n");
        output.push_str(&format!(
            "- Matched: {}\n",
            join_or_none(&result.found_keywords)
        ));
        output.push_str(&format!(
            "- Missing: {}\n\n",
            join_or_none(&result.missing_keywords)
        ));

        if !result.formatting_issues.is_empty() {
            output.push_str("## Formatting Issues\n\n");
            for issue in &result.formatting_issues {
                output.push_str(&format!(
                    "- **{:?}**: {} _{}_\n",
                    issue.severity, issue.message, issue.suggestion
                ));
            }
            output.push('\n');
        }

        if !result.suggestions.is_empty() {
            output.push_str("## Suggestions\n\n");
            for suggestion in &result.suggestions {
                output.push_str(&format!(
                    "### {} ({:?})\n\n{}\n\n",
                    suggestion.title, suggestion.priority, suggestion.description
                ));
                for item in &suggestion.action_items {
                    output.push_str(&format!("- {}\n", item));
                }
                output.push('\n');
            }
        }

        output.push_str("## Section Analysis\n\n");
        for analysis in &result.section_analysis {
            output.push_str(&format!(
                "- `{}`: {}% — {}\n",
                analysis.name, analysis.score, analysis.feedback
            ));
        }
        output.push('\n');

        if !result.bullet_analysis.is_empty() {
            output.push_str("## Bullet Analysis\n\n");
            for bullet in &result.bullet_analysis {
                output.push_str(&format!("- ({}%) {}\n", bullet.score, bullet.text));
                if let Some(rewrite) = &bullet.rewrite_suggestion {
                    output.push_str(&format!("  - Suggested rewrite: {}\n", rewrite));
                }
            }
            output.push('\n');
        }

        output.push_str(&format!(
            "---\n\nGenerated by ats-scanner v{}\n",
            report.metadata.scanner_version
        ));

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Markdown
    }
}

impl ReportGenerator {
    pub fn new(use_colors: bool, detailed: bool) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(use_colors, detailed),
            json_formatter: JsonFormatter::new(true),
            markdown_formatter: MarkdownFormatter::new(),
        }
    }

    pub fn format(&self, report: &ScanReport, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Console => self.console_formatter.format_report(report),
            OutputFormat::Json => self.json_formatter.format_report(report),
            OutputFormat::Markdown => self.markdown_formatter.format_report(report),
        }
    }

    pub fn save_to_file(
        &self,
        report: &ScanReport,
        format: OutputFormat,
        path: &std::path::Path,
    ) -> Result<()> {
        // The saved copy never carries ANSI escapes
        let content = match format {
            OutputFormat::Console => {
                ConsoleFormatter::new(false, self.console_formatter.detailed).format_report(report)?
            }
            _ => self.format(report, format)?,
        };
        std::fs::write(path, content).map_err(|e| {
            AtsScannerError::OutputFormatting(format!(
                "Failed to write report to {}: {}",
                path.display(),
                e
            ))
        })
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let truncated: String = text.chars().take(max_chars).collect();
        format!("{}…", truncated)
    }
}

fn join_or_none(items: &[String]) -> String {
    if items.is_empty() {
        "none".to_string()
    } else {
        items.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::report::ScanReport;
    use crate::processing::document::{
        AtsScore, ParsedJobDescription, ParsedResume, ResumeFileType, ResumeMetadata, ScanResult,
    };

    fn sample_report() -> ScanReport {
        let result = ScanResult {
            id: "abc123".to_string(),
            score: AtsScore {
                overall: 72,
                keyword: 80,
                formatting: 70,
                section: 75,
                similarity: 55,
            },
            keyword_matches: Vec::new(),
            missing_keywords: vec!["kubernetes".to_string()],
            found_keywords: vec!["rust".to_string(), "docker".to_string()],
            formatting_issues: Vec::new(),
            section_analysis: Vec::new(),
            bullet_analysis: Vec::new(),
            suggestions: Vec::new(),
            parsed_resume: ParsedResume {
                raw_text: String::new(),
                normalized_text: String::new(),
                sections: Vec::new(),
                metadata: ResumeMetadata {
                    word_count: 300,
                    line_count: 30,
                    has_images: false,
                    has_tables: false,
                    has_columns: false,
                    has_headers_footers: false,
                    estimated_pages: 1,
                    file_size: 1000,
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
        };
        ScanReport::new(result, "resume.pdf", "job.txt", 8)
    }

    #[test]
    fn test_console_formatter_without_colors() {
        let formatter = ConsoleFormatter::new(false, false);
        let output = formatter.format_report(&sample_report()).unwrap();
        assert!(output.contains("Overall: 72%"));
        assert!(output.contains("[GOOD]"));
        assert!(output.contains("kubernetes"));
        // No ANSI escapes when colors are off
        assert!(!output.contains('\u{1b}'));
    }

    #[test]
    fn test_json_formatter_is_valid_json() {
        let formatter = JsonFormatter::new(true);
        let output = formatter.format_report(&sample_report()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["result"]["score"]["overall"], 72);
    }

    #[test]
    fn test_markdown_formatter_has_score_table() {
        let formatter = MarkdownFormatter::new();
        let output = formatter.format_report(&sample_report()).unwrap();
        assert!(output.contains("# ATS Compatibility Scan"));
        assert!(output.contains("| **Overall** | **72%** |"));
        assert!(output.contains("rust, docker"));
    }

    #[test]
    fn test_generator_dispatch() {
        let generator = ReportGenerator::new(false, false);
        let report = sample_report();
        assert!(generator
            .format(&report, OutputFormat::Json)
            .unwrap()
            .starts_with('{'));
        assert!(generator
            .format(&report, OutputFormat::Markdown)
            .unwrap()
            .starts_with('#'));
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("abcdefghij", 5), "abcde…");
    }
}
