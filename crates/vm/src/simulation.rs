//! The simulation loop.

use crate::error::{Fault, Reporter};
use crate::machine::Machine;

/// Interactive collaborator consulted after every executed instruction.
pub trait Debugger {
    /// Return `false` to stop being consulted for the rest of the run.
    fn ask_continue(&mut self, machine: &Machine) -> bool;
}

/// Loop state. `Halted` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Running,
    Halted,
}

/// Run `machine` until HALT or a fault.
///
/// Returns the number of instructions executed, HALT included. When a
/// debugger is given it is asked after each instruction whether to keep
/// pausing; once it declines it is never asked again.
pub fn simulate<R: Reporter + ?Sized>(
    machine: &mut Machine,
    reporter: &mut R,
    mut debugger: Option<&mut dyn Debugger>,
) -> Result<u64, Fault> {
    let mut state = RunState::Running;
    let mut executed = 0u64;

    while state == RunState::Running {
        if !machine.step(reporter)? {
            state = RunState::Halted;
        }
        executed += 1;

        let keep_debugging = match debugger.as_mut() {
            Some(debugger) => debugger.ask_continue(machine),
            None => true,
        };
        if !keep_debugging {
            tracing::debug!(pc = machine.pc(), "leaving step-by-step mode");
            debugger = None;
        }
    }

    Ok(executed)
}
