//! Assess command - judge a saved synthesis as an evidence base.

use std::path::{Path, PathBuf};

use colored::Colorize;
use rubric::EvidenceSynthesis;
use rubric::evidence::AssessmentStatus;
use rubric::input::read_json;
use serde::Deserialize;

use super::{ReportFile, build_engine, colored_score};

/// Accept both a saved report and a bare synthesis.
#[derive(Deserialize)]
#[serde(untagged)]
enum SynthesisInput {
    Saved(ReportFile<EvidenceSynthesis>),
    Bare(EvidenceSynthesis),
}

impl SynthesisInput {
    fn into_synthesis(self) -> EvidenceSynthesis {
        match self {
            SynthesisInput::Saved(file) => file.report,
            SynthesisInput::Bare(synthesis) => synthesis,
        }
    }
}

pub fn run(
    file: PathBuf,
    json_output: bool,
    config: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    if !file.exists() {
        return Err(format!("File not found: {}", file.display()).into());
    }

    let rubric = build_engine(config)?;
    let input: SynthesisInput = read_json(&file)?;
    let synthesis = input.into_synthesis();
    let assessment = rubric.assess(&synthesis);

    if json_output {
        println!("{}", serde_json::to_string_pretty(&assessment)?);
        return Ok(());
    }

    let status = match assessment.status {
        AssessmentStatus::Pass => assessment.status.label().green().bold(),
        AssessmentStatus::Warning => assessment.status.label().yellow().bold(),
        AssessmentStatus::Fail => assessment.status.label().red().bold(),
    };
    println!(
        "{} '{}': {}",
        "Evidence base for".cyan().bold(),
        synthesis.topic.white(),
        status
    );
    println!(
        "High-quality share: {} of {} records",
        colored_score(assessment.quality_score),
        synthesis.total_count
    );

    for issue in &assessment.issues {
        println!("  {} {}", "issue:".red(), issue);
    }
    for warning in &assessment.warnings {
        println!("  {} {}", "warning:".yellow(), warning);
    }

    Ok(())
}
