//! Vector-to-superposition command implementation.

use anyhow::{Context, Result};

use qsym_engine::matrix_to_qbits;
use qsym_parse::parse_vector;

use super::common::{CircuitReport, ExprArgs, OutputFormat, print_json};

/// Execute the to-qubits command.
pub fn execute(args: &ExprArgs, format: OutputFormat) -> Result<()> {
    let source = args.source()?;
    let vector = parse_vector(&source).with_context(|| format!("Parse error in '{source}'"))?;
    let result = matrix_to_qbits(&vector)?;

    match format {
        OutputFormat::Json => print_json(&CircuitReport {
            command: "to-qubits",
            input: vector.to_string(),
            result: result.to_string(),
            circuit: &result,
        }),
        OutputFormat::Text => {
            println!("{result}");
            Ok(())
        }
    }
}
