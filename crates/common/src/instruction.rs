//! Instruction word layout for the toy VM.
//!
//! Every instruction is one 32-bit word. Fields, from the least significant
//! bit:
//! ```text
//! bits  0..6   opcode
//! bit   6      immediate flag
//! bit   7      indexed flag
//! bits  8..13  register or condition
//! bits 13..32  payload, one of:
//!                immediate: signed 19-bit value
//!                indexed:   index register (5 bits) + signed 14-bit offset
//!                absolute:  unsigned 19-bit address
//! ```
//! The immediate flag takes precedence when both flags are set.

use std::fmt;

use crate::condition::Condition;
use crate::error::DecodeError;
use crate::opcode::Opcode;

/// A data memory word.
pub type Word = i32;

const COP_MASK: u32 = 0x3f;
const IMMEDIATE_BIT: u32 = 1 << 6;
const INDEXED_BIT: u32 = 1 << 7;
const REGCOND_SHIFT: u32 = 8;
const REGCOND_MASK: u32 = 0x1f;
const PAYLOAD_SHIFT: u32 = 13;
const OFFSET_SHIFT: u32 = 18;

/// Smallest immediate value that fits the 19-bit field.
pub const VALUE_MIN: i32 = -(1 << 18);
/// Largest immediate value that fits the 19-bit field.
pub const VALUE_MAX: i32 = (1 << 18) - 1;
/// Smallest indexed offset that fits the 14-bit field.
pub const OFFSET_MIN: i32 = -(1 << 13);
/// Largest indexed offset that fits the 14-bit field.
pub const OFFSET_MAX: i32 = (1 << 13) - 1;
/// Largest absolute address that fits the 19-bit field.
pub const ADDRESS_MAX: u32 = (1 << 19) - 1;

/// Payload of an instruction, selected by the immediate and indexed flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operand {
    /// The operand is the value itself.
    Immediate(i32),
    /// The operand lives at `registers[rindex] + offset`.
    Indexed { rindex: u8, offset: i32 },
    /// The operand lives at a fixed address.
    Absolute(u32),
}

/// A decoded instruction word.
///
/// Opcode and condition are kept as raw field values so that every 32-bit
/// word decodes; [`Instruction::opcode`] and [`Instruction::condition`]
/// check them. The two flags mirror the operand variant for every
/// instruction built through the constructors or [`Instruction::decode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Instruction {
    /// Raw 6-bit operation code.
    pub cop: u8,
    /// Immediate flag.
    pub immediate: bool,
    /// Indexed flag.
    pub indexed: bool,
    /// Register number or condition, depending on the opcode.
    pub regcond: u8,
    /// Operand payload.
    pub operand: Operand,
}

impl Instruction {
    /// An instruction with an immediate operand.
    pub fn immediate(opcode: Opcode, regcond: u8, value: i32) -> Self {
        Self {
            cop: opcode as u8,
            immediate: true,
            indexed: false,
            regcond,
            operand: Operand::Immediate(value),
        }
    }

    /// An instruction with an indexed operand.
    pub fn indexed(opcode: Opcode, regcond: u8, rindex: u8, offset: i32) -> Self {
        Self {
            cop: opcode as u8,
            immediate: false,
            indexed: true,
            regcond,
            operand: Operand::Indexed { rindex, offset },
        }
    }

    /// An instruction with an absolute operand.
    pub fn absolute(opcode: Opcode, regcond: u8, address: u32) -> Self {
        Self {
            cop: opcode as u8,
            immediate: false,
            indexed: false,
            regcond,
            operand: Operand::Absolute(address),
        }
    }

    /// An instruction without operand (NOP, RET, HALT, ILLOP).
    pub fn bare(opcode: Opcode) -> Self {
        Self::absolute(opcode, 0, 0)
    }

    /// Decode a raw word. Never fails.
    pub fn decode(raw: u32) -> Self {
        let immediate = raw & IMMEDIATE_BIT != 0;
        let indexed = raw & INDEXED_BIT != 0;

        let operand = if immediate {
            Operand::Immediate((raw as i32) >> PAYLOAD_SHIFT)
        } else if indexed {
            Operand::Indexed {
                rindex: ((raw >> PAYLOAD_SHIFT) & REGCOND_MASK) as u8,
                offset: (raw as i32) >> OFFSET_SHIFT,
            }
        } else {
            Operand::Absolute(raw >> PAYLOAD_SHIFT)
        };

        Self {
            cop: (raw & COP_MASK) as u8,
            immediate,
            indexed,
            regcond: ((raw >> REGCOND_SHIFT) & REGCOND_MASK) as u8,
            operand,
        }
    }

    /// Encode to a raw word. Fields wider than their slot are truncated.
    pub fn encode(&self) -> u32 {
        let mut raw = self.cop as u32 & COP_MASK;
        if self.immediate {
            raw |= IMMEDIATE_BIT;
        }
        if self.indexed {
            raw |= INDEXED_BIT;
        }
        raw |= (self.regcond as u32 & REGCOND_MASK) << REGCOND_SHIFT;

        raw | match self.operand {
            Operand::Immediate(value) => (value as u32) << PAYLOAD_SHIFT,
            Operand::Indexed { rindex, offset } => {
                ((rindex as u32 & REGCOND_MASK) << PAYLOAD_SHIFT) | ((offset as u32) << OFFSET_SHIFT)
            }
            Operand::Absolute(address) => address << PAYLOAD_SHIFT,
        }
    }

    /// The operation code, if it names a defined opcode.
    pub fn opcode(&self) -> Result<Opcode, DecodeError> {
        Opcode::try_from(self.cop)
    }

    /// The reg/cond field read as a branch condition.
    pub fn condition(&self) -> Result<Condition, DecodeError> {
        Condition::try_from(self.regcond)
    }
}

/// Mnemonic form: `LOAD R02, #5`, `ADD R00, 3[R15]`, `BRANCH LE, @0x0011`.
///
/// Unknown opcodes print as `??? 0x<raw>` and out-of-range conditions as
/// `?<n>` so that listings of arbitrary memory never fail.
impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Ok(opcode) = self.opcode() else {
            return write!(f, "??? 0x{:08x}", self.encode());
        };

        f.write_str(opcode.mnemonic())?;
        if opcode.is_bare() {
            return Ok(());
        }
        f.write_str(" ")?;

        if opcode.uses_condition() {
            match self.condition() {
                Ok(cond) => write!(f, "{}, ", cond.name())?,
                Err(_) => write!(f, "?{}, ", self.regcond)?,
            }
        } else if opcode.uses_register() {
            write!(f, "R{:02}, ", self.regcond)?;
        }

        match self.operand {
            Operand::Immediate(value) => write!(f, "#{value}"),
            Operand::Indexed { rindex, offset } => write!(f, "{offset}[R{rindex:02}]"),
            Operand::Absolute(address) => write!(f, "@0x{address:04x}"),
        }
    }
}
