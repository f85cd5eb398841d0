//! Superposition-to-vector command implementation.

use anyhow::Result;
use serde_json::json;

use qsym_engine::qbits_to_matrix;

use super::common::{ExprArgs, OutputFormat, load_circuit, print_json};

/// Execute the to-vector command.
pub fn execute(args: &ExprArgs, format: OutputFormat) -> Result<()> {
    let circuit = load_circuit(args)?;
    let vector = qbits_to_matrix(&circuit)?;

    match format {
        OutputFormat::Json => print_json(&json!({
            "command": "to-vector",
            "input": circuit.to_string(),
            "shape": [vector.rows(), vector.cols()],
            "entries": vector.entries().map(ToString::to_string).collect::<Vec<_>>(),
        })),
        OutputFormat::Text => {
            println!("{vector}");
            Ok(())
        }
    }
}
