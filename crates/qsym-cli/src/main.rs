//! QSYM Command-Line Interface
//!
//! The main entry point for the `qsym` tool. Every command reads one
//! expression, either as a positional argument or from `--input`.
//!
//! ```text
//! $ qsym apply "CNOT(1,0)*H(1)*|00>"
//! sqrt(2)/2*|00> + sqrt(2)/2*|11>
//! ```

use clap::{Parser, Subcommand};
use console::style;
use tracing_subscriber::EnvFilter;

mod commands;

use commands::common::{ExprArgs, OutputFormat};
use commands::{apply, represent, simplify, to_qubits, to_vector, version};
use qsym_engine::Backend;
use qsym_ir::Basis;

/// QSYM - exact symbolic quantum circuits
#[derive(Parser)]
#[command(name = "qsym")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text", global = true)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply the gates of a circuit to its qubit state
    Apply {
        #[command(flatten)]
        expr: ExprArgs,

        /// Basis the state labels are read in (z, x)
        #[arg(short, long, env = "QSYM_BASIS", default_value = "z")]
        basis: Basis,
    },

    /// Build the matrix or state vector of a circuit
    Represent {
        #[command(flatten)]
        expr: ExprArgs,

        /// Basis of the representation (z, x, y)
        #[arg(short, long, env = "QSYM_BASIS", default_value = "z")]
        basis: Basis,

        /// Linear-algebra backend (symbolic, numeric)
        #[arg(long, env = "QSYM_BACKEND", default_value = "symbolic")]
        backend: Backend,

        /// Number of qubits, required for circuits without a state
        #[arg(short = 'n', long)]
        register_size: Option<u32>,
    },

    /// Reorder and simplify gate products
    Simplify {
        #[command(flatten)]
        expr: ExprArgs,

        /// Only move commuting gates into canonical order
        #[arg(long)]
        sort_only: bool,
    },

    /// Convert an amplitude vector such as "[1, 0, 0, i]" to a superposition
    ToQubits {
        #[command(flatten)]
        expr: ExprArgs,
    },

    /// Convert a superposition to its amplitude vector
    ToVector {
        #[command(flatten)]
        expr: ExprArgs,
    },

    /// Show version information
    Version,
}

fn main() {
    let cli = Cli::parse();

    // Setup logging; RUST_LOG wins over -v when set.
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let format = cli.format;
    let result = match cli.command {
        Commands::Apply { expr, basis } => apply::execute(&expr, basis, format),

        Commands::Represent {
            expr,
            basis,
            backend,
            register_size,
        } => represent::execute(&expr, basis, backend, register_size, format),

        Commands::Simplify { expr, sort_only } => simplify::execute(&expr, sort_only, format),

        Commands::ToQubits { expr } => to_qubits::execute(&expr, format),

        Commands::ToVector { expr } => to_vector::execute(&expr, format),

        Commands::Version => {
            version::execute();
            Ok(())
        }
    };

    // Handle errors
    if let Err(e) = result {
        eprintln!("{} {:#}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }
}
