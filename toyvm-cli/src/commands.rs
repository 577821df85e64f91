//! CLI command implementations.

use std::fs;
use std::io;
use std::path::Path;

use toyvm_common::{Instruction, ProgramImage};
use toyvm_vm::print::{format_dump, format_program, trace_line};
use toyvm_vm::sample::sample_image;
use toyvm_vm::{simulate, Debugger, Machine, Reporter, Warning};

use crate::debug::DebugConsole;

/// Reports warnings on stderr and, when enabled, traces on stdout.
struct ConsoleReporter {
    trace: bool,
}

impl Reporter for ConsoleReporter {
    fn warning(&mut self, warning: &Warning) {
        eprintln!("WARNING: {warning}");
    }

    fn trace(&mut self, addr: u32, instr: &Instruction) {
        if self.trace {
            println!("{}", trace_line("Executing", addr, instr));
        }
    }
}

/// Read the program image at `path`, or the sample program without one.
fn load_machine(path: Option<&Path>) -> Result<Machine, i32> {
    let image = match path {
        Some(path) => ProgramImage::read(path).map_err(|e| {
            eprintln!("Bad program file {}: {e}", path.display());
            1
        })?,
        None => sample_image(),
    };
    Ok(Machine::from_image(image))
}

/// Load and execute a program.
pub fn run(path: Option<&Path>, debug: bool, trace: bool) -> Result<(), i32> {
    let mut machine = load_machine(path)?;
    let mut reporter = ConsoleReporter { trace };

    let stdin = io::stdin();
    let mut console = DebugConsole::new(stdin.lock(), io::stdout());
    let debugger: Option<&mut dyn Debugger> = if debug {
        Some(&mut console as &mut dyn Debugger)
    } else {
        None
    };

    match simulate(&mut machine, &mut reporter, debugger) {
        Ok(executed) => {
            tracing::info!(executed, "simulation finished");
            Ok(())
        }
        Err(fault) => {
            eprintln!("ERROR: {fault}");
            Err(1)
        }
    }
}

/// Print the program listing.
pub fn disassemble(path: Option<&Path>) -> Result<(), i32> {
    let machine = load_machine(path)?;
    print!("{}", format_program(&machine));
    Ok(())
}

/// Print the memory dump and write the image back out in binary form.
pub fn dump(path: Option<&Path>, output: &Path) -> Result<(), i32> {
    let machine = load_machine(path)?;
    print!("{}", format_dump(&machine));

    let image = ProgramImage {
        text: machine.text().to_vec(),
        data: machine.data().to_vec(),
        dataend: machine.dataend(),
    };
    fs::write(output, image.encode()).map_err(|e| {
        eprintln!("error: cannot write '{}': {e}", output.display());
        1
    })
}
