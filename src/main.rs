//! ATS scanner: resume compatibility analysis against a job description

use ats_scanner::cli::{Cli, Commands, ConfigAction};
use ats_scanner::config::{Config, OutputFormat};
use ats_scanner::error::{AtsScannerError, Result};
use ats_scanner::input::DocumentExtractor;
use ats_scanner::output::{ReportGenerator, ScanReport};
use ats_scanner::processing::{AtsScorer, JobDescriptionParser};
use clap::Parser;
use log::{error, info};
use std::path::{Path, PathBuf};
use std::process;
use std::time::Instant;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config = match Config::load_from(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run_command(cli.command, config).await {
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

async fn run_command(command: Commands, config: Config) -> Result<()> {
    match command {
        Commands::Scan {
            resume,
            job,
            detailed,
            output,
            save,
        } => {
            info!("Starting ATS compatibility scan");

            let output_format = OutputFormat::parse(&output)?;
            let detailed = detailed || config.output.detailed;

            validate_resume_file(&resume, config.input.max_file_size)?;

            println!("🚀 ATS compatibility scan");
            println!("📄 Resume: {}", resume.display());
            println!("💼 Job Description: {}", job.display());

            let started = Instant::now();

            println!("\n📂 Extracting resume text...");
            let extractor = DocumentExtractor::new();
            let parsed_resume = extractor.parse_resume(&resume, None).await?;
            info!(
                "Resume parsed: {} words, {} sections",
                parsed_resume.metadata.word_count,
                parsed_resume.sections.len()
            );

            println!("💼 Parsing job description...");
            let job_text = read_job_description(&job, config.input.min_job_description_chars)?;
            let jd_parser = JobDescriptionParser::new()?;
            let parsed_job = jd_parser.parse(&job_text);
            info!(
                "Job description parsed: {} keywords, {} requirements",
                parsed_job.all_keywords.len(),
                parsed_job.requirements.len()
            );

            println!("🔍 Scoring...");
            let mut scorer = AtsScorer::new()?;
            let result = scorer.calculate_score(parsed_resume, parsed_job);
            let elapsed_ms = started.elapsed().as_millis() as u64;

            let report = ScanReport::new(
                result,
                resume.to_string_lossy(),
                job.to_string_lossy(),
                elapsed_ms,
            );

            let generator = ReportGenerator::new(config.output.color_output, detailed);
            let rendered = generator.format(&report, output_format)?;
            println!("{}", rendered);

            if let Some(save_path) = save {
                generator.save_to_file(&report, output_format, &save_path)?;
                println!("💾 Report saved to {}", save_path.display());
            }

            println!(
                "🎯 Scan complete! Overall ATS score: {}%",
                report.result.score.overall
            );
        }

        Commands::Config { action } => match action {
            Some(ConfigAction::Show) | None => {
                println!("⚙️  Current Configuration\n");
                println!("Max file size: {} bytes", config.input.max_file_size);
                println!(
                    "Min job description length: {} characters",
                    config.input.min_job_description_chars
                );
                println!("\nScoring Weights:");
                println!("  Keywords: {:.1}%", config.scoring.keyword_weight * 100.0);
                println!(
                    "  Formatting: {:.1}%",
                    config.scoring.formatting_weight * 100.0
                );
                println!("  Sections: {:.1}%", config.scoring.section_weight * 100.0);
                println!(
                    "  Similarity: {:.1}%",
                    config.scoring.similarity_weight * 100.0
                );
                println!("\nOutput:");
                println!("  Format: {:?}", config.output.format);
                println!("  Detailed: {}", config.output.detailed);
                println!("  Colors: {}", config.output.color_output);
            }

            Some(ConfigAction::Reset) => {
                println!("🔄 Resetting configuration to defaults...");
                let default_config = Config::default();
                default_config.save()?;
                println!("✅ Configuration reset successfully!");
            }
        },
    }

    Ok(())
}

fn validate_resume_file(path: &PathBuf, max_file_size: usize) -> Result<()> {
    if !path.exists() {
        return Err(AtsScannerError::InvalidInput(format!(
            "Resume file does not exist: {}",
            path.display()
        )));
    }

    let size = std::fs::metadata(path)?.len() as usize;
    if size > max_file_size {
        return Err(AtsScannerError::InvalidInput(format!(
            "Resume file is {} bytes, exceeding the {} byte limit",
            size, max_file_size
        )));
    }

    Ok(())
}

fn read_job_description(path: &Path, min_chars: usize) -> Result<String> {
    let text = std::fs::read_to_string(path).map_err(|e| {
        AtsScannerError::InvalidInput(format!(
            "Failed to read job description {}: {}",
            path.display(),
            e
        ))
    })?;

    if text.chars().count() < min_chars {
        return Err(AtsScannerError::InvalidInput(format!(
            "Job description is too short ({} characters, minimum {})",
            text.chars().count(),
            min_chars
        )));
    }

    Ok(text)
}
