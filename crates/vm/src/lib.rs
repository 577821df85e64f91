//! Toy VM simulator. Executes programs for a small register machine.
//!
//! The machine has:
//! - 16 signed 32-bit registers and a sign condition code
//! - a read-only text segment of 32-bit instructions
//! - a data segment shared by static data and a downward-growing stack
//!
//! # Usage
//!
//! ```
//! use toyvm_common::{Instruction, Opcode, ProgramImage};
//! use toyvm_vm::{run, Machine};
//!
//! let image = ProgramImage::new(
//!     vec![
//!         Instruction::immediate(Opcode::Load, 0, 42),
//!         Instruction::bare(Opcode::Halt),
//!     ],
//!     vec![0; 10],
//!     0,
//! )
//! .unwrap();
//!
//! let mut machine = Machine::from_image(image);
//! run(&mut machine).unwrap();
//! assert_eq!(machine.registers()[0], 42);
//! ```

pub mod error;
pub mod execute;
pub mod machine;
pub mod print;
pub mod sample;
pub mod simulation;

pub use error::{Fault, FaultKind, LogReporter, Reporter, Warning, WarningKind};
pub use machine::{Machine, NREGISTERS};
pub use simulation::{simulate, Debugger, RunState};

/// Run `machine` to completion, logging warnings through `tracing`.
///
/// # Errors
///
/// Returns the first [`Fault`] raised; the machine is left in the state
/// it was in when the fault occurred.
pub fn run(machine: &mut Machine) -> Result<u64, Fault> {
    simulate(machine, &mut LogReporter, None)
}
