//! Validate command - score a policy document against compliance frameworks.

use std::path::{Path, PathBuf};

use colored::Colorize;
use rubric::ComplianceStatus;
use rubric::compliance::AlignmentReport;
use rubric::input::load_document;
use serde::Serialize;
use tracing::{debug, info};

use super::{build_engine, colored_score, write_report};

#[derive(Serialize)]
struct ValidationReport<'a> {
    #[serde(flatten)]
    result: &'a rubric::ValidationResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    regulatory_alignment: Option<&'a AlignmentReport>,
}

pub fn run(
    file: PathBuf,
    frameworks: Vec<String>,
    regulations: Vec<String>,
    output: Option<PathBuf>,
    json_output: bool,
    config: Option<&Path>,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if !file.exists() {
        return Err(format!("File not found: {}", file.display()).into());
    }

    let rubric = build_engine(config)?;
    let document = load_document(&file)?;
    info!(file = %file.display(), policy_type = %document.policy_type, "policy loaded");

    let result = if frameworks.is_empty() {
        debug!("validating against every registered framework");
        rubric.validate(&document)?
    } else {
        debug!(frameworks = ?frameworks, "validating against selected frameworks");
        rubric.validate_frameworks(&document, frameworks.as_slice())?
    };
    let alignment =
        (!regulations.is_empty()).then(|| rubric.check_alignment(&document, regulations.as_slice()));

    let report = ValidationReport {
        result: &result,
        regulatory_alignment: alignment.as_ref(),
    };

    if let Some(ref path) = output {
        write_report(path, &report)?;
    }

    if json_output {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!(
        "{} {}",
        "Compliance report for".cyan().bold(),
        file.display().to_string().white()
    );
    println!();

    println!("{}", "Frameworks:".yellow().bold());
    for (name, framework) in &result.framework_results {
        let mark = if framework.compliant {
            "✓".green()
        } else {
            "✗".red()
        };
        println!(
            "  {} {:22} {:>5}  sections {}/{}, keywords {:.0}%",
            mark,
            name,
            colored_score(framework.score),
            framework.sections_present,
            framework.sections_total,
            framework.keyword_coverage * 100.0
        );
        if verbose && !framework.missing_keywords.is_empty() {
            println!(
                "      {} {}",
                "missing keywords:".dimmed(),
                framework.missing_keywords.join(", ")
            );
        }
    }
    println!();

    if !result.issues.is_empty() {
        println!("{}", "Issues:".red().bold());
        for issue in &result.issues {
            println!("  - {}", issue.description);
        }
        println!();
    }

    if !result.warnings.is_empty() {
        println!("{}", "Warnings:".yellow().bold());
        for warning in &result.warnings {
            println!("  - {}", warning.description);
        }
        println!();
    }

    if !result.recommendations.is_empty() {
        println!("{}", "Recommendations:".cyan().bold());
        for (i, rec) in result.recommendations.iter().enumerate() {
            println!("  {}. {}", i + 1, rec.text);
        }
        println!();
    }

    if let Some(alignment) = &alignment {
        println!("{}", "Regulatory alignment:".yellow().bold());
        for name in &alignment.aligned {
            println!("  {} {}", "✓".green(), name);
        }
        for name in &alignment.not_aligned {
            println!("  {} {}", "✗".red(), name);
        }
        println!();
    }

    let status = match result.overall_status {
        ComplianceStatus::Compliant => result.overall_status.label().green().bold(),
        ComplianceStatus::NeedsRevision => result.overall_status.label().yellow().bold(),
        ComplianceStatus::NonCompliant => result.overall_status.label().red().bold(),
    };
    println!(
        "Overall: {} (score {})",
        status,
        colored_score(result.overall_score)
    );

    Ok(())
}
