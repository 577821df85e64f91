//! Machine state: register file, condition code, counters, segments.

use toyvm_common::{ConditionCode, Instruction, ProgramImage, Word};

use crate::error::{Fault, FaultKind};

/// Number of general registers.
pub const NREGISTERS: usize = 16;

/// The simulated machine.
///
/// The machine owns both segments. Front ends only ever borrow it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Machine {
    pub(crate) registers: [Word; NREGISTERS],
    pub(crate) cc: ConditionCode,
    /// Index of the next instruction to fetch.
    pub(crate) pc: u32,
    /// Index of the next free stack slot. The stack grows downward.
    pub(crate) sp: u32,
    pub(crate) text: Vec<Instruction>,
    pub(crate) data: Vec<Word>,
    pub(crate) dataend: u32,
}

impl Machine {
    /// An empty machine with no program loaded.
    pub fn new() -> Self {
        Self::default()
    }

    /// A machine with `image` loaded.
    pub fn from_image(image: ProgramImage) -> Self {
        let mut machine = Self::new();
        machine.load_image(image);
        machine
    }

    /// Replace both segments and reset the processor.
    ///
    /// `pc` goes to 0, the condition code to undefined and `sp` to the
    /// last data address. Every register but the last is cleared; the last
    /// one keeps whatever the loader left in it.
    pub fn load(&mut self, text: Vec<Instruction>, data: Vec<Word>, dataend: u32) {
        self.sp = (data.len() as u32).wrapping_sub(1);
        self.text = text;
        self.data = data;
        self.dataend = dataend;

        self.pc = 0;
        self.cc = ConditionCode::Undefined;
        self.registers[..NREGISTERS - 1].fill(0);

        tracing::debug!(
            textsize = self.text.len(),
            datasize = self.data.len(),
            dataend,
            "program loaded"
        );
    }

    /// Load the segments of `image`.
    pub fn load_image(&mut self, image: ProgramImage) {
        self.load(image.text, image.data, image.dataend);
    }

    /// Set a register directly, bypassing the condition code.
    ///
    /// # Panics
    ///
    /// Panics if `index >= NREGISTERS`.
    pub fn set_register(&mut self, index: usize, value: Word) {
        self.registers[index] = value;
    }

    pub fn registers(&self) -> &[Word; NREGISTERS] {
        &self.registers
    }

    pub fn cc(&self) -> ConditionCode {
        self.cc
    }

    pub fn pc(&self) -> u32 {
        self.pc
    }

    pub fn sp(&self) -> u32 {
        self.sp
    }

    pub fn text(&self) -> &[Instruction] {
        &self.text
    }

    pub fn data(&self) -> &[Word] {
        &self.data
    }

    pub fn dataend(&self) -> u32 {
        self.dataend
    }

    /// The instruction at `pc`, or a text fault if `pc` is past the end.
    pub(crate) fn fetch(&self) -> Result<Instruction, Fault> {
        self.text
            .get(self.pc as usize)
            .copied()
            .ok_or(Fault::new(FaultKind::SegFaultText, self.pc))
    }
}
