//! Synthesize command - classify and summarize literature for a topic.

use std::path::{Path, PathBuf};

use colored::Colorize;
use rubric::EvidenceTier;
use rubric::input::load_records;
use tracing::info;

use super::{build_engine, write_report};

pub fn run(
    file: PathBuf,
    topic: String,
    output: Option<PathBuf>,
    json_output: bool,
    config: Option<&Path>,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if !file.exists() {
        return Err(format!("File not found: {}", file.display()).into());
    }

    let rubric = build_engine(config)?;
    let records = load_records(&file)?;
    info!(file = %file.display(), records = records.len(), topic = %topic, "records loaded");
    let synthesis = rubric.synthesize(&records, &topic)?;

    if let Some(ref path) = output {
        write_report(path, &synthesis)?;
    }

    if json_output {
        println!("{}", serde_json::to_string_pretty(&synthesis)?);
        return Ok(());
    }

    println!(
        "{} '{}' {}",
        "Evidence synthesis for".cyan().bold(),
        synthesis.topic.white().bold(),
        format!("({} records)", synthesis.total_count).dimmed()
    );
    println!();

    println!("{}", "Evidence tiers:".yellow().bold());
    println!("  High:   {}", synthesis.tier_counts.high.to_string().green());
    println!("  Medium: {}", synthesis.tier_counts.medium.to_string().yellow());
    println!("  Low:    {}", synthesis.tier_counts.low.to_string().red());
    println!();

    if verbose {
        for tier in EvidenceTier::PRIORITY {
            let bucket = synthesis.evidence_by_tier.get(tier);
            if bucket.is_empty() {
                continue;
            }
            println!("{}", format!("{} evidence:", tier.label()).yellow().bold());
            for evidence in bucket {
                println!(
                    "  [{:.2}] {} {}",
                    evidence.relevance_score,
                    evidence.record.title,
                    format!("({})", evidence.record.id).dimmed()
                );
            }
            println!();
        }
    }

    if synthesis.key_findings.is_empty() {
        println!("{}", "No key findings extracted.".dimmed());
    } else {
        println!("{}", "Key findings:".yellow().bold());
        for (i, finding) in synthesis.key_findings.iter().enumerate() {
            println!(
                "  {}. {} {}",
                i + 1,
                finding.text,
                format!("[{}, {}]", finding.record_id, finding.tier).dimmed()
            );
        }
    }
    println!();

    println!("{}", "Summary:".yellow().bold());
    println!("  {}", synthesis.summary);

    Ok(())
}
