//! Binary program images.
//!
//! An image file is a sequence of little-endian 32-bit words:
//! ```text
//! textsize  datasize  dataend
//! textsize instruction words
//! datasize data words
//! ```
//! Bytes past the data segment are ignored.

use std::fs;
use std::path::Path;

use crate::error::LoadError;
use crate::instruction::{Instruction, Word};

/// Minimum number of data words a program must leave free for its stack.
pub const MIN_STACK_SIZE: u32 = 10;

const WORD_BYTES: usize = 4;

/// Text and data segments of a program, ready to be loaded into a machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgramImage {
    /// Instructions, addressed from 0.
    pub text: Vec<Instruction>,
    /// Initial data memory, addressed from 0.
    pub data: Vec<Word>,
    /// First data address not initialized by the program.
    pub dataend: u32,
}

impl ProgramImage {
    /// Build an image from its segments and validate the data layout.
    pub fn new(text: Vec<Instruction>, data: Vec<Word>, dataend: u32) -> Result<Self, LoadError> {
        let image = Self {
            text,
            data,
            dataend,
        };
        image.validate()?;
        Ok(image)
    }

    /// Read and decode an image file.
    pub fn read(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let bytes = fs::read(path)?;
        Self::decode(&bytes)
    }

    /// Decode an image from raw bytes.
    pub fn decode(bytes: &[u8]) -> Result<Self, LoadError> {
        let mut words = bytes
            .chunks_exact(WORD_BYTES)
            .map(|chunk| u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]));

        let header: Vec<u32> = words.by_ref().take(3).collect();
        let &[textsize, datasize, dataend] = header.as_slice() else {
            return Err(LoadError::Header);
        };

        let text: Vec<Instruction> = words
            .by_ref()
            .take(textsize as usize)
            .map(Instruction::decode)
            .collect();
        if text.len() < textsize as usize {
            return Err(LoadError::TextTruncated {
                expected: textsize,
                found: text.len(),
            });
        }

        let data: Vec<Word> = words.take(datasize as usize).map(|w| w as Word).collect();
        if data.len() < datasize as usize {
            return Err(LoadError::DataTruncated {
                expected: datasize,
                found: data.len(),
            });
        }

        Self::new(text, data, dataend)
    }

    /// Encode the image in the on-disk layout accepted by [`ProgramImage::decode`].
    pub fn encode(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity((3 + self.text.len() + self.data.len()) * WORD_BYTES);
        bytes.extend_from_slice(&(self.text.len() as u32).to_le_bytes());
        bytes.extend_from_slice(&(self.data.len() as u32).to_le_bytes());
        bytes.extend_from_slice(&self.dataend.to_le_bytes());
        for instr in &self.text {
            bytes.extend_from_slice(&instr.encode().to_le_bytes());
        }
        for word in &self.data {
            bytes.extend_from_slice(&word.to_le_bytes());
        }
        bytes
    }

    fn validate(&self) -> Result<(), LoadError> {
        let datasize = self.data.len() as u32;
        if self.dataend > datasize {
            return Err(LoadError::DataEnd {
                dataend: self.dataend,
                datasize,
            });
        }
        let available = datasize - self.dataend;
        if available < MIN_STACK_SIZE {
            return Err(LoadError::StackTooSmall {
                available,
                required: MIN_STACK_SIZE,
            });
        }
        Ok(())
    }
}
