//! CLI argument definitions using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Rubric: evidence synthesis and compliance scoring for policy drafting
#[derive(Parser)]
#[command(name = "rubric")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Engine configuration file (JSON)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Classify and summarize literature records for a topic
    Synthesize {
        /// Path to a JSON array of literature records
        #[arg(value_name = "RECORDS")]
        file: PathBuf,

        /// Topic the records are scored against
        #[arg(short, long)]
        topic: String,

        /// Write the synthesis report to this file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Score a policy document against compliance frameworks
    Validate {
        /// Path to a policy document (JSON)
        #[arg(value_name = "POLICY")]
        file: PathBuf,

        /// Framework to check (repeatable; default: all registered)
        #[arg(short, long = "framework", value_name = "NAME")]
        frameworks: Vec<String>,

        /// Regulation the content should mention (repeatable)
        #[arg(short, long = "regulation", value_name = "NAME")]
        regulations: Vec<String>,

        /// Write the validation report to this file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Judge a saved synthesis as an evidence base
    Assess {
        /// Path to a synthesis report written by `synthesize --output`
        #[arg(value_name = "SYNTHESIS")]
        file: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the registered compliance frameworks
    Frameworks {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}
