//! Operation codes of the toy VM instruction set.

use crate::error::DecodeError;

/// Identifies the operation to perform.
///
/// The `#[repr(u8)]` attribute pins each variant to its 6-bit field value.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Opcode {
    /// Illegal instruction. Always faults when executed.
    Illop = 0,
    /// No effect.
    Nop = 1,
    /// Load a register from an immediate or from data memory.
    Load = 2,
    /// Store a register into data memory.
    Store = 3,
    /// Add an operand to a register.
    Add = 4,
    /// Subtract an operand from a register.
    Sub = 5,
    /// Conditional or unconditional jump.
    Branch = 6,
    /// Conditional or unconditional subroutine call.
    Call = 7,
    /// Return from subroutine.
    Ret = 8,
    /// Push an operand onto the execution stack.
    Push = 9,
    /// Pop the top of the stack into data memory.
    Pop = 10,
    /// Normal end of program.
    Halt = 11,
}

/// All opcodes in encoding order.
pub const ALL_OPCODES: [Opcode; 12] = [
    Opcode::Illop,
    Opcode::Nop,
    Opcode::Load,
    Opcode::Store,
    Opcode::Add,
    Opcode::Sub,
    Opcode::Branch,
    Opcode::Call,
    Opcode::Ret,
    Opcode::Push,
    Opcode::Pop,
    Opcode::Halt,
];

impl Opcode {
    /// Assembly mnemonic.
    pub fn mnemonic(self) -> &'static str {
        match self {
            Opcode::Illop => "ILLOP",
            Opcode::Nop => "NOP",
            Opcode::Load => "LOAD",
            Opcode::Store => "STORE",
            Opcode::Add => "ADD",
            Opcode::Sub => "SUB",
            Opcode::Branch => "BRANCH",
            Opcode::Call => "CALL",
            Opcode::Ret => "RET",
            Opcode::Push => "PUSH",
            Opcode::Pop => "POP",
            Opcode::Halt => "HALT",
        }
    }

    /// True for opcodes that carry no operand at all.
    pub fn is_bare(self) -> bool {
        matches!(
            self,
            Opcode::Illop | Opcode::Nop | Opcode::Ret | Opcode::Halt
        )
    }

    /// True for opcodes whose reg/cond field holds a [`Condition`](crate::Condition).
    pub fn uses_condition(self) -> bool {
        matches!(self, Opcode::Branch | Opcode::Call)
    }

    /// True for opcodes whose reg/cond field names a register.
    pub fn uses_register(self) -> bool {
        matches!(
            self,
            Opcode::Load | Opcode::Store | Opcode::Add | Opcode::Sub
        )
    }
}

impl TryFrom<u8> for Opcode {
    type Error = DecodeError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        ALL_OPCODES
            .get(value as usize)
            .copied()
            .ok_or(DecodeError::UnknownOpcode(value))
    }
}
