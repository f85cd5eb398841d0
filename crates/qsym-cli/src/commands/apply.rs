//! Apply command implementation.

use anyhow::Result;
use console::style;

use qsym_engine::apply_gates;
use qsym_ir::Basis;

use super::common::{CircuitReport, ExprArgs, OutputFormat, load_circuit, print_json};

/// Execute the apply command.
pub fn execute(args: &ExprArgs, basis: Basis, format: OutputFormat) -> Result<()> {
    let circuit = load_circuit(args)?;
    let result = apply_gates(&circuit, basis)?;

    match format {
        OutputFormat::Json => print_json(&CircuitReport {
            command: "apply",
            input: circuit.to_string(),
            result: result.to_string(),
            circuit: &result,
        }),
        OutputFormat::Text => {
            eprintln!(
                "{} Applied {} in basis {}",
                style("→").cyan().bold(),
                style(&circuit).green(),
                style(basis).yellow()
            );
            println!("{result}");
            Ok(())
        }
    }
}
