//! PGSL checker
//!
//! Reads a PGSL syntax tree produced by the parser (JSON) and reports the
//! incidents of semantic analysis.

use std::fs;
use std::path::{Path, PathBuf};
use std::process;
use std::time::Instant;

use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand};
use log::info;

use pgsl::feedback::AnalysisReport;
use pgsl::frontend::context::Context;
use pgsl::frontend::cst::DocumentCst;
use pgsl::frontend::declaration::analyze_document;

/// PGSL semantic checker
#[derive(Parser, Debug)]
#[command(name = "pgslc")]
#[command(version = "0.1.0")]
#[command(about = "Semantic analysis for PGSL shaders")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Check a syntax tree for errors
    Check {
        /// Syntax tree of the document as JSON
        input: PathBuf,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,

        /// Print at most this many incidents
        #[arg(long, value_name = "N")]
        max_incidents: Option<usize>,
    },
    /// Print version information
    Version,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    match &cli.command {
        Commands::Check { input, json, max_incidents } => match check_file(input, *json, *max_incidents) {
            Ok(true) => {}
            Ok(false) => process::exit(1),
            Err(e) => {
                eprintln!("Error: {:#}", e);
                process::exit(2);
            }
        },
        Commands::Version => {
            println!("pgslc 0.1.0");
            println!("PGSL semantic checker");
        }
    }
}

/// Check one document. Returns whether it is free of incidents.
fn check_file(input: &Path, json: bool, max_incidents: Option<usize>) -> Result<bool> {
    let source = fs::read_to_string(input).with_context(|| format!("reading {}", input.display()))?;
    let cst: DocumentCst =
        serde_json::from_str(&source).with_context(|| format!("parsing syntax tree {}", input.display()))?;

    let started = Instant::now();
    let mut context = Context::new();
    let document = analyze_document(&cst, &mut context)?;
    let elapsed = started.elapsed().as_millis() as u64;

    let report = AnalysisReport::from_analysis(input.display().to_string(), &context, document.data()?, elapsed);
    info!("{}: {} incidents in {} ms", report.source_file, report.stats.incident_count, elapsed);

    if json {
        println!("{}", report.to_json()?);
    } else if report.success {
        println!("No incidents found");
    } else {
        println!("{}", report.to_text(max_incidents));
    }

    Ok(report.success)
}
