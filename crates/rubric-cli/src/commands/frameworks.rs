//! Frameworks command - list the registered compliance frameworks.

use std::path::Path;

use colored::Colorize;

use super::build_engine;

pub fn run(json_output: bool, config: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let rubric = build_engine(config)?;
    let registry = rubric.registry();

    if json_output {
        let frameworks: Vec<_> = registry.iter().collect();
        println!("{}", serde_json::to_string_pretty(&frameworks)?);
        return Ok(());
    }

    println!(
        "{} ({})",
        "Registered frameworks".cyan().bold(),
        registry.len()
    );
    for framework in registry.iter() {
        println!();
        println!("{}", framework.name.white().bold());
        if !framework.description.is_empty() {
            println!("  {}", framework.description.dimmed());
        }
        println!(
            "  Sections:  {}",
            framework.required_sections.join(", ")
        );
        println!("  Keywords:  {}", framework.keywords.join(", "));
        println!(
            "  Threshold: {:.2} (keyword coverage >= {:.2})",
            framework.compliance_threshold, framework.min_keyword_coverage
        );
    }

    Ok(())
}
