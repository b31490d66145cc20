//! CLI command implementations.

pub mod assess;
pub mod frameworks;
pub mod synthesize;
pub mod validate;

use std::path::Path;

use colored::{ColoredString, Colorize};
use rubric::{Rubric, RubricConfig};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// A saved report: the engine output plus when and by what it was produced.
#[derive(Serialize, Deserialize)]
pub struct ReportFile<T> {
    pub generated_at: String,
    pub tool_version: String,
    pub report: T,
}

impl<T> ReportFile<T> {
    pub fn new(report: T) -> Self {
        Self {
            generated_at: chrono::Utc::now().to_rfc3339(),
            tool_version: env!("CARGO_PKG_VERSION").to_string(),
            report,
        }
    }
}

/// Build the engine, from a config file when one is given.
pub fn build_engine(config: Option<&Path>) -> Result<Rubric, Box<dyn std::error::Error>> {
    match config {
        Some(path) => {
            debug!(path = %path.display(), "loading engine configuration");
            let config = RubricConfig::load(path)?;
            Ok(Rubric::with_config(config)?)
        }
        None => {
            debug!("using built-in configuration");
            Ok(Rubric::new())
        }
    }
}

/// Write `report` wrapped in a [`ReportFile`] as pretty JSON.
pub fn write_report<T: Serialize>(
    path: &Path,
    report: &T,
) -> Result<(), Box<dyn std::error::Error>> {
    let file = ReportFile::new(report);
    let json = serde_json::to_string_pretty(&file)?;
    std::fs::write(path, json)?;
    info!(path = %path.display(), "report written");
    println!(
        "{} {}",
        "Saved report to".green(),
        path.display().to_string().white()
    );
    Ok(())
}

/// Render a 0-1 score as a colored percentage.
pub fn colored_score(score: f64) -> ColoredString {
    let text = format!("{:.0}%", score * 100.0);
    if score >= 0.9 {
        text.green()
    } else if score >= 0.5 {
        text.yellow()
    } else {
        text.red()
    }
}
