//! Version command implementation.

use console::style;

/// Execute the version command.
pub fn execute() {
    let version = env!("CARGO_PKG_VERSION");

    println!(
        "{} {} - exact symbolic quantum circuits",
        style("QSYM").cyan().bold(),
        style(format!("v{version}")).yellow()
    );
    println!();
    println!("Components:");
    println!("  qsym-algebra  Exact scalars, coefficients and matrices");
    println!("  qsym-ir       Qubit states, gates and circuit expressions");
    println!("  qsym-engine   Gate application, representation and simplification");
    println!("  qsym-parse    Circuit expression syntax");
    println!("  qsym-cli      Command-line interface");
    println!();
    println!("License: {}", style("Apache-2.0").dim());
}
