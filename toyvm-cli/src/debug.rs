//! Interactive step-by-step debugging console.

use std::io::{self, BufRead, Write};

use toyvm_vm::print::{format_cpu, format_data, format_program};
use toyvm_vm::{Debugger, Machine};

const HELP: &str = "\
Available commands:
\th\thelp
\tc\tcontinue (exit interactive debug mode)
\ts\tstep by step (next instruction)
\tRET\tstep by step (next instruction)
\tr\tprint registers
\td\tprint data memory
\tt\tprint text (program) memory
\tp\tprint text (program) memory
\tm\tprint registers and data memory
";

/// Prompts on `output` and reads one-letter commands from `input`.
pub struct DebugConsole<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> DebugConsole<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Run the prompt loop until the user steps or continues.
    ///
    /// End of input counts as `c`.
    fn dialogue(&mut self, machine: &Machine) -> io::Result<bool> {
        let mut answer = String::new();
        loop {
            write!(self.output, "DEBUG? ")?;
            self.output.flush()?;

            answer.clear();
            if self.input.read_line(&mut answer)? == 0 {
                return Ok(false);
            }

            match answer.chars().next() {
                Some('h') => self.output.write_all(HELP.as_bytes())?,
                Some('c') => return Ok(false),
                Some('s') | Some('\n') => return Ok(true),
                Some('r') => write!(self.output, "{}", format_cpu(machine))?,
                Some('t') | Some('p') => write!(self.output, "{}", format_program(machine))?,
                Some('m') => {
                    write!(self.output, "{}", format_cpu(machine))?;
                    write!(self.output, "{}", format_data(machine))?;
                }
                Some('d') => write!(self.output, "{}", format_data(machine))?,
                _ => {}
            }
        }
    }
}

impl<R: BufRead, W: Write> Debugger for DebugConsole<R, W> {
    fn ask_continue(&mut self, machine: &Machine) -> bool {
        self.dialogue(machine).unwrap_or(false)
    }
}
