//! Command-line interface for normzitat.

use std::io::Read;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use console::style;

use crate::config::validate_law_id;
use crate::engine::CitationEngine;
use crate::error::Result;
use crate::lookup::LawLookupTable;
use crate::parser::parse_main_detailed;
use crate::stemming::stem_law_name;
use crate::types::{Citation, LawId};

/// Normzitat - Extract and decode citations of German statutes.
#[derive(Parser)]
#[command(name = "normzitat")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Extract all citations from a text file.
    Extract {
        /// Text file to read, or "-" for stdin
        input: PathBuf,

        /// Law-name file (.json, .yaml or .yml) mapping names to law ids
        #[arg(short, long)]
        laws: PathBuf,

        /// Id of the law the text belongs to, used for internal references
        #[arg(short, long)]
        current_law: String,

        /// Also register every law id as a name of its own (e.g. "BGB")
        #[arg(long)]
        with_abbreviations: bool,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Abort on the first citation that cannot be decoded
        #[arg(long)]
        strict: bool,
    },

    /// Parse a single main area like "§ 123 Abs. 4 Satz 5 und 6".
    Parse {
        /// Main area of a citation
        main: String,
    },

    /// Print the stemmed form of a law name.
    Stem {
        /// Law name
        name: String,
    },
}

/// Output format of the extract command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human readable, one citation per block
    Text,
    /// One JSON object per line
    Json,
}

/// Run the CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Extract {
            input,
            laws,
            current_law,
            with_abbreviations,
            format,
            strict,
        } => extract_command(
            &input,
            &laws,
            &current_law,
            with_abbreviations,
            format,
            strict,
        ),
        Commands::Parse { main } => parse_command(&main),
        Commands::Stem { name } => {
            println!("{}", stem_law_name(&name));
            Ok(())
        }
    }
}

/// Execute the extract command.
fn extract_command(
    input: &Path,
    laws: &Path,
    current_law: &str,
    with_abbreviations: bool,
    format: OutputFormat,
    strict: bool,
) -> Result<()> {
    // Validate inputs before reading anything
    validate_law_id(current_law)?;

    let lookup = LawLookupTable::load(laws, with_abbreviations)?;
    tracing::debug!(names = lookup.len(), path = %laws.display(), "Loaded law names");
    let text = read_input(input)?;

    let engine = CitationEngine::new(lookup);
    let current_law = LawId::new(current_law);

    let mut found = 0usize;
    let mut skipped = 0usize;
    for result in engine.citations(&text, Some(&current_law)) {
        match result {
            Ok(citation) => {
                found += 1;
                match format {
                    OutputFormat::Text => print_citation(&citation),
                    OutputFormat::Json => println!("{}", serde_json::to_string(&citation)?),
                }
            }
            Err(e) if !strict => {
                skipped += 1;
                eprintln!("{} {e}", style("Skipped:").yellow().bold());
            }
            Err(e) => return Err(e),
        }
    }

    if format == OutputFormat::Text {
        println!();
        println!("{} {}", style("Citations:").green().bold(), found);
        if skipped > 0 {
            println!("{} {}", style("Skipped:").yellow().bold(), skipped);
        }
    }
    Ok(())
}

/// Execute the parse command.
fn parse_command(main: &str) -> Result<()> {
    let parsed = parse_main_detailed(main)?;
    for path in &parsed.paths {
        println!("{path}");
    }
    for notice in &parsed.notices {
        eprintln!("{} {notice}", style("Ignored:").yellow());
    }
    Ok(())
}

fn read_input(input: &Path) -> Result<String> {
    if input == Path::new("-") {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text)?;
        return Ok(text);
    }
    Ok(std::fs::read_to_string(input)?)
}

fn print_citation(citation: &Citation) {
    let law = citation
        .law_id
        .as_ref()
        .map_or_else(|| style("-".to_string()).dim(), |id| style(id.to_string()).cyan());
    println!(
        "{} {} [{}] {}",
        style(format!("{}..{}", citation.start, citation.end)).dim(),
        style(&citation.main).bold(),
        citation.kind,
        law
    );
    for path in &citation.paths {
        println!("    {path}");
    }
}
