//! Toy VM CLI. Run, inspect and dump programs.
//!
//! Exit codes:
//! - 0: Program reached HALT (or listing succeeded)
//! - 1: Bad program file, fault during execution, or I/O error

mod commands;
mod debug;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "toyvm",
    version,
    about = "Simulator for a small educational register machine",
    long_about = "Load a binary program image and execute it, optionally step by step.\n\nWhen FILE is omitted the built-in sample program is used.\n\nExamples:\n  toyvm run prog.bin\n  toyvm run --debug\n  toyvm disassemble prog.bin\n  toyvm dump prog.bin -o copy.bin"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Execute a program until HALT or a fault.
    Run {
        /// Binary program image.
        file: Option<PathBuf>,

        /// Pause after every instruction for interactive inspection.
        #[arg(short, long)]
        debug: bool,

        /// Print each instruction before it executes.
        #[arg(short, long)]
        trace: bool,
    },

    /// Print the program text in symbolic form.
    Disassemble {
        /// Binary program image.
        file: Option<PathBuf>,
    },

    /// Print both segments as C arrays and write a binary copy.
    Dump {
        /// Binary program image.
        file: Option<PathBuf>,

        /// Where to write the binary copy.
        #[arg(short, long, default_value = "dump.bin")]
        output: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    // RUST_LOG controls the log level; default to WARN.
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let result = match cli.command {
        Commands::Run { file, debug, trace } => commands::run(file.as_deref(), debug, trace),
        Commands::Disassemble { file } => commands::disassemble(file.as_deref()),
        Commands::Dump { file, output } => commands::dump(file.as_deref(), &output),
    };

    if let Err(code) = result {
        process::exit(code);
    }
}
