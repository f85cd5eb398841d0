//! Represent command implementation.

use anyhow::Result;
use console::style;
use serde_json::{Value, json};

use qsym_engine::{Backend, RepresentOptions, Representation, represent};
use qsym_ir::Basis;

use super::common::{ExprArgs, OutputFormat, load_circuit, print_json};

/// Execute the represent command.
pub fn execute(
    args: &ExprArgs,
    basis: Basis,
    backend: Backend,
    register_size: Option<u32>,
    format: OutputFormat,
) -> Result<()> {
    let circuit = load_circuit(args)?;

    let mut options = RepresentOptions::new()
        .with_basis(basis)
        .with_backend(backend);
    if let Some(n) = register_size {
        options = options.with_register_size(n);
    }
    let result = represent(&circuit, &options)?;
    let (rows, cols) = result.shape();

    match format {
        OutputFormat::Json => print_json(&json!({
            "command": "represent",
            "input": circuit.to_string(),
            "basis": basis.name(),
            "backend": result.backend(),
            "shape": [rows, cols],
            "entries": entries_json(&result),
        })),
        OutputFormat::Text => {
            eprintln!(
                "{} {}x{} {} representation in basis {}",
                style("→").cyan().bold(),
                rows,
                cols,
                style(result.backend()).yellow(),
                style(basis).yellow()
            );
            print_rows(&result);
            Ok(())
        }
    }
}

/// Row-major entries: strings for exact values, `[re, im]` pairs otherwise.
fn entries_json(result: &Representation) -> Value {
    match result {
        Representation::Symbolic(m) => Value::Array(
            m.row_views()
                .map(|row| json!(row.iter().map(ToString::to_string).collect::<Vec<_>>()))
                .collect(),
        ),
        Representation::Numeric(m) => Value::Array(
            m.rows()
                .into_iter()
                .map(|row| json!(row.iter().map(|z| [z.re, z.im]).collect::<Vec<_>>()))
                .collect(),
        ),
    }
}

fn print_rows(result: &Representation) {
    match result {
        Representation::Symbolic(m) => {
            for row in m.row_views() {
                let cells: Vec<String> = row.iter().map(ToString::to_string).collect();
                println!("[{}]", cells.join(", "));
            }
        }
        Representation::Numeric(m) => {
            for row in m.rows() {
                let cells: Vec<String> = row
                    .iter()
                    .map(|z| format!("{:.6}{:+.6}i", z.re, z.im))
                    .collect();
                println!("[{}]", cells.join(", "));
            }
        }
    }
}
