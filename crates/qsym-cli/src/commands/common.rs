//! Shared helpers for CLI commands.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use serde::Serialize;

use qsym_ir::Circuit;
use qsym_parse::parse;

/// How results are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text.
    Text,
    /// A single JSON document on stdout.
    Json,
}

/// Where the expression comes from.
#[derive(Debug, Args)]
pub struct ExprArgs {
    /// Expression text, e.g. "CNOT(1,0)*H(1)*|00>"
    #[arg(conflicts_with = "input")]
    pub expression: Option<String>,

    /// Read the expression from a file instead
    #[arg(short, long)]
    pub input: Option<PathBuf>,
}

impl ExprArgs {
    /// The expression source text.
    pub fn source(&self) -> Result<String> {
        match (&self.expression, &self.input) {
            (Some(text), _) => Ok(text.clone()),
            (None, Some(path)) => read_file(path),
            (None, None) => {
                anyhow::bail!("No expression given: pass it as an argument or use --input")
            }
        }
    }
}

fn read_file(path: &Path) -> Result<String> {
    if !path.exists() {
        anyhow::bail!("File not found: {}", path.display());
    }
    let source = fs::read_to_string(path)
        .with_context(|| format!("Failed to read file: {}", path.display()))?;
    Ok(source.trim().to_string())
}

/// Parse the expression into a circuit.
pub fn load_circuit(args: &ExprArgs) -> Result<Circuit> {
    let source = args.source()?;
    let circuit = parse(&source).with_context(|| format!("Parse error in '{source}'"))?;
    tracing::debug!(%circuit, "parsed expression");
    Ok(circuit)
}

/// Print a value as pretty JSON.
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{json}");
    Ok(())
}

/// JSON document for commands that turn one circuit into another.
#[derive(Debug, Serialize)]
pub struct CircuitReport<'a> {
    pub command: &'static str,
    pub input: String,
    pub result: String,
    pub circuit: &'a Circuit,
}
