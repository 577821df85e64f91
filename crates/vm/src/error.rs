//! Faults and warnings raised while simulating a program.
//!
//! Every report carries the address of the instruction being executed,
//! not the address of its operand.

use std::fmt;

use thiserror::Error;
use toyvm_common::Instruction;

/// The kinds of fatal fault.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FaultKind {
    /// Opcode field past HALT.
    UnknownInstruction,
    /// ILLOP, or a register number outside the register file.
    IllegalInstruction,
    /// Condition field out of range, or a real condition tested while the
    /// condition code is still undefined.
    IllegalCondition,
    /// STORE, POP, BRANCH or CALL with an immediate operand.
    ImmediateForbidden,
    /// Fetch or jump target outside the text segment.
    SegFaultText,
    /// Operand address outside the data segment.
    SegFaultData,
    /// Stack pointer outside the data segment on push or pop.
    SegFaultStack,
}

impl FaultKind {
    /// Human-readable message.
    pub fn message(self) -> &'static str {
        match self {
            FaultKind::UnknownInstruction => "Unknown instruction",
            FaultKind::IllegalInstruction => "Illegal instruction",
            FaultKind::IllegalCondition => "Illegal condition",
            FaultKind::ImmediateForbidden => "Immediate value forbidden",
            FaultKind::SegFaultText => "Segmentation fault in text",
            FaultKind::SegFaultData => "Segmentation fault in data",
            FaultKind::SegFaultStack => "Segmentation fault in stack",
        }
    }
}

/// A fatal fault. The run cannot continue after one.
///
/// Side effects of the faulting instruction that happened before the check
/// that failed are not rolled back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{} at address {addr:#x}", .kind.message())]
pub struct Fault {
    /// What went wrong.
    pub kind: FaultKind,
    /// Text address of the faulting instruction.
    pub addr: u32,
}

impl Fault {
    /// Create a fault at the given text address.
    pub fn new(kind: FaultKind, addr: u32) -> Self {
        Self { kind, addr }
    }
}

/// The kinds of non-fatal warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WarningKind {
    /// HALT executed; the run ends normally.
    HaltReached,
}

impl WarningKind {
    /// Human-readable message.
    pub fn message(self) -> &'static str {
        match self {
            WarningKind::HaltReached => "HALT reached",
        }
    }
}

/// A non-fatal warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Warning {
    pub kind: WarningKind,
    pub addr: u32,
}

impl Warning {
    pub fn new(kind: WarningKind, addr: u32) -> Self {
        Self { kind, addr }
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at address {:#x}", self.kind.message(), self.addr)
    }
}

/// Receives what the simulator reports while it runs.
pub trait Reporter {
    /// Called once per warning.
    fn warning(&mut self, warning: &Warning);

    /// Called before each instruction executes.
    fn trace(&mut self, _addr: u32, _instr: &Instruction) {}
}

/// Reporter that forwards everything to `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogReporter;

impl Reporter for LogReporter {
    fn warning(&mut self, warning: &Warning) {
        tracing::warn!(addr = warning.addr, "{}", warning.kind.message());
    }

    fn trace(&mut self, addr: u32, instr: &Instruction) {
        tracing::trace!(addr, %instr, "executing");
    }
}

/// Collects warnings, ignores trace events.
impl Reporter for Vec<Warning> {
    fn warning(&mut self, warning: &Warning) {
        self.push(*warning);
    }
}
