//! Example: Synthesize evidence and check a draft policy with Rubric.
//!
//! Usage:
//!   cargo run --example policy_review -- <records.json> <policy.json> <topic>
//!
//! Example:
//!   cargo run --example policy_review -- records.json draft.json "metformin"

use std::env;

use rubric::Rubric;
use rubric::input::{load_document, load_records};

fn main() -> rubric::Result<()> {
    let args: Vec<String> = env::args().collect();

    if args.len() < 4 {
        eprintln!("Usage: cargo run --example policy_review -- <records.json> <policy.json> <topic>");
        std::process::exit(1);
    }

    let rubric = Rubric::new();

    let records = load_records(&args[1])?;
    let synthesis = rubric.synthesize(&records, &args[3])?;
    println!("{}", synthesis.summary);

    let assessment = rubric.assess(&synthesis);
    println!("Evidence base: {}", assessment.status.label());
    for warning in &assessment.warnings {
        println!("  - {}", warning);
    }

    let policy = load_document(&args[2])?;
    let result = rubric.validate(&policy)?;
    println!();
    println!(
        "Compliance: {} ({:.0}%)",
        result.overall_status.label(),
        result.overall_score * 100.0
    );
    for (name, framework) in &result.framework_results {
        println!(
            "  {:20} {:.2} {}",
            name,
            framework.score,
            if framework.compliant { "ok" } else { "needs work" }
        );
    }
    for recommendation in &result.recommendations {
        println!("  * {}", recommendation.text);
    }

    Ok(())
}
