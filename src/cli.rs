//! CLI interface for the ATS scanner

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "ats-scanner")]
#[command(about = "Resume ATS compatibility scanner")]
#[command(
    long_about = "Scan a resume against a job description: keyword coverage, section structure, formatting hazards, and text similarity, rolled into a single ATS compatibility score"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Use a specific config file instead of the default location
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Scan a resume against a job description
    Scan {
        /// Path to resume file (PDF or DOCX)
        #[arg(short, long)]
        resume: PathBuf,

        /// Path to job description text file
        #[arg(short, long)]
        job: PathBuf,

        /// Output detailed analysis (per-bullet and per-section breakdowns)
        #[arg(short, long)]
        detailed: bool,

        /// Output format: console, json, markdown
        #[arg(short, long, default_value = "console")]
        output: String,

        /// Save output to file
        #[arg(short, long)]
        save: Option<PathBuf>,
    },

    /// Show or reset configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Reset configuration to defaults
    Reset,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_structure_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_scan_args_parse() {
        let cli = Cli::try_parse_from([
            "ats-scanner",
            "scan",
            "--resume",
            "resume.pdf",
            "--job",
            "job.txt",
            "--detailed",
            "--output",
            "json",
        ])
        .unwrap();

        match cli.command {
            Commands::Scan {
                resume,
                job,
                detailed,
                output,
                save,
            } => {
                assert_eq!(resume, PathBuf::from("resume.pdf"));
                assert_eq!(job, PathBuf::from("job.txt"));
                assert!(detailed);
                assert_eq!(output, "json");
                assert!(save.is_none());
            }
            _ => panic!("expected scan command"),
        }
    }

    #[test]
    fn test_config_show_parses() {
        let cli = Cli::try_parse_from(["ats-scanner", "config", "show"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Config {
                action: Some(ConfigAction::Show)
            }
        ));
    }
}
