//! Simplify command implementation.

use anyhow::Result;
use console::style;

use qsym_engine::{gate_simp, gate_sort};

use super::common::{CircuitReport, ExprArgs, OutputFormat, load_circuit, print_json};

/// Execute the simplify command.
pub fn execute(args: &ExprArgs, sort_only: bool, format: OutputFormat) -> Result<()> {
    let circuit = load_circuit(args)?;
    let (command, result) = if sort_only {
        ("sort", gate_sort(&circuit))
    } else {
        ("simplify", gate_simp(&circuit))
    };

    match format {
        OutputFormat::Json => print_json(&CircuitReport {
            command,
            input: circuit.to_string(),
            result: result.to_string(),
            circuit: &result,
        }),
        OutputFormat::Text => {
            if result == circuit {
                eprintln!("{} Already in canonical form", style("✓").green().bold());
            }
            println!("{result}");
            Ok(())
        }
    }
}
