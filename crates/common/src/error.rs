//! Errors for opcode/condition decoding and program image loading.

use thiserror::Error;

/// Errors from interpreting a decoded field as an enumerated value.
///
/// Word decoding itself is total; these only arise when a caller asks for
/// the typed opcode or condition of a field holding an out-of-range value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// Operation code past the last defined opcode.
    #[error("unknown opcode: {0}")]
    UnknownOpcode(u8),

    /// Condition value past the last defined condition.
    #[error("unknown condition: {0}")]
    UnknownCondition(u8),
}

/// Errors found while reading a program image.
///
/// Display strings are the cause part of a `Bad program file <path>: <cause>`
/// diagnostic.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The file could not be opened or read.
    #[error("cannot open program file")]
    Io(#[from] std::io::Error),

    /// Fewer than three header words.
    #[error("incorrect segment dimensions")]
    Header,

    /// The file ends inside the text segment.
    #[error("too many instructions (expected {expected}, found {found})")]
    TextTruncated { expected: u32, found: usize },

    /// The file ends inside the data segment.
    #[error("too many data (expected {expected}, found {found})")]
    DataTruncated { expected: u32, found: usize },

    /// `dataend` lies past the end of the data segment.
    #[error("data length greater than memory size ({dataend} > {datasize})")]
    DataEnd { dataend: u32, datasize: u32 },

    /// Not enough words left between `dataend` and the end of data.
    #[error("not enough room for stack ({available} < {required})")]
    StackTooSmall { available: u32, required: u32 },
}
