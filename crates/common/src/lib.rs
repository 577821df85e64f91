//! Toy VM common types and instruction encoding.
//!
//! This crate provides the data layer shared by the simulator and its
//! front ends:
//!
//! - [`Opcode`]: the 12 operation codes
//! - [`Condition`] and [`ConditionCode`]: branch predicates and the sign flag
//! - [`Instruction`]: the 32-bit instruction word with decode/encode and
//!   mnemonic rendering
//! - [`ProgramImage`]: the binary program file format
//! - [`DecodeError`], [`LoadError`]: field and file errors

pub mod condition;
pub mod error;
pub mod image;
pub mod instruction;
pub mod opcode;

// Re-export commonly used types at the crate root.
pub use condition::{Condition, ConditionCode};
pub use error::{DecodeError, LoadError};
pub use image::{ProgramImage, MIN_STACK_SIZE};
pub use instruction::{Instruction, Operand, Word};
pub use opcode::Opcode;
