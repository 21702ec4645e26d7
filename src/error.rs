use thiserror::Error;

macro_rules! malformed_error {
    // Single string version
    ($msg:expr) => {
        crate::Error::Malformed {
            message: $msg.to_string(),
            file: file!(),
            line: line!(),
        }
    };

    // Format string with arguments version
    ($fmt:expr, $($arg:tt)*) => {
        crate::Error::Malformed {
            message: format!($fmt, $($arg)*),
            file: file!(),
            line: line!(),
        }
    };
}

macro_rules! out_of_bounds_error {
    () => {
        crate::Error::OutOfBounds {
            file: file!(),
            line: line!(),
        }
    };
}

/// The generic Error type, which provides coverage for all errors this library can potentially
/// return.
///
/// Errors fall into two groups. Reader-level failures ([`Error::OutOfBounds`],
/// [`Error::Malformed`]) come from the byte parser and the encoder. Decode failures
/// ([`Error::InvalidOpcode`], [`Error::Truncated`], [`Error::SwitchTableOverflow`],
/// [`Error::InstructionLimit`]) describe malformed bytecode and carry the offset of the
/// instruction at which decoding stopped.
///
/// Malformed bytecode is never transient: decoding the same bytes again fails the same
/// way, so callers decide whether to skip the method or abort the whole unit.
///
/// # Examples
///
/// ```rust
/// use cilscan::{disassembler::decode_stream, Error};
///
/// // ldc.i4 needs four operand bytes, only two are present
/// match decode_stream(&[0x00, 0x20, 0x01, 0x02]) {
///     Err(Error::Truncated { offset, required, available }) => {
///         assert_eq!(offset, 1);
///         assert_eq!(required, 5);
///         assert_eq!(available, 3);
///     }
///     other => panic!("unexpected result: {:?}", other),
/// }
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The data is damaged and could not be parsed.
    ///
    /// The error includes the source location where the malformation was detected
    /// for debugging purposes.
    #[error("Malformed - {file}:{line}: {message}")]
    Malformed {
        /// The message to be printed for the Malformed error
        message: String,
        /// The source file in which this error occured
        file: &'static str,
        /// The source line in which this error occured
        line: u32,
    },

    /// An out of bound access was attempted while reading the buffer.
    #[error("Out of Bound read would have occurred! - {file}:{line}")]
    OutOfBounds {
        /// The source file in which this error occured
        file: &'static str,
        /// The source line in which this error occured
        line: u32,
    },

    /// The opcode at `offset` does not denote an assigned instruction.
    ///
    /// `opcode` is the normalized id, so escape-prefixed opcodes appear as `0x100 + second byte`.
    #[error("Invalid opcode 0x{opcode:03X} at offset {offset}")]
    InvalidOpcode {
        /// Offset of the first byte of the offending instruction
        offset: usize,
        /// The normalized opcode id
        opcode: u16,
    },

    /// The instruction at `offset` needs more bytes than the buffer holds.
    ///
    /// Covers an escape byte without its second byte, operands cut off mid-way and
    /// a `switch` whose count field is incomplete.
    #[error("Truncated instruction at offset {offset}: requires {required} bytes, {available} available")]
    Truncated {
        /// Offset of the first byte of the truncated instruction
        offset: usize,
        /// Number of bytes the instruction needs, counted from `offset`
        required: usize,
        /// Number of bytes left in the buffer, counted from `offset`
        available: usize,
    },

    /// A `switch` case count that cannot be satisfied.
    ///
    /// Either the implied target table is larger than the remaining buffer, or the count
    /// exceeds [`crate::disassembler::DecoderConfig::max_switch_cases`].
    #[error("Switch at offset {offset} declares {count} targets, but only {available} bytes follow")]
    SwitchTableOverflow {
        /// Offset of the `switch` opcode
        offset: usize,
        /// The declared number of targets
        count: u32,
        /// Bytes remaining after the count field
        available: usize,
    },

    /// The configured maximum number of instructions per method body was reached.
    #[error("Instruction limit of {limit} reached at offset {offset}")]
    InstructionLimit {
        /// Offset of the first instruction past the limit
        offset: usize,
        /// The configured limit
        limit: usize,
    },
}

impl Error {
    /// Returns the offset of the instruction at which decoding failed, if this error
    /// was produced by the decoder.
    #[must_use]
    pub fn offset(&self) -> Option<usize> {
        match self {
            Error::InvalidOpcode { offset, .. }
            | Error::Truncated { offset, .. }
            | Error::SwitchTableOverflow { offset, .. }
            | Error::InstructionLimit { offset, .. } => Some(*offset),
            Error::Malformed { .. } | Error::OutOfBounds { .. } => None,
        }
    }

    /// Returns `true` if this error describes malformed input bytecode.
    #[must_use]
    pub fn is_malformed_bytecode(&self) -> bool {
        matches!(
            self,
            Error::InvalidOpcode { .. } | Error::Truncated { .. } | Error::SwitchTableOverflow { .. }
        )
    }
}
