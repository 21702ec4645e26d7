//! Flat opcode identifiers and the normalizer that produces them.
//!
//! CIL encodes an opcode either as a single byte, or as the escape byte `0xFE` followed by a
//! second byte. Both spaces are folded into one numeric id:
//!
//! | Encoding       | Id                  |
//! |----------------|---------------------|
//! | `XX`           | `0x0XX` (`0x00..=0xFD`, `0xFF`) |
//! | `FE XX`        | `0x100 + XX`        |
//!
//! The id is what [`crate::disassembler::table`] is indexed by, and what downstream passes and
//! debugging tools see, so the numbering is fixed.

use std::fmt;

use crate::{file::parser::Parser, Error, Result};

/// A normalized opcode id.
///
/// Any `u16` can be wrapped; whether it denotes an assigned instruction is answered by
/// [`Opcode::is_valid`].
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Opcode(u16);

impl Opcode {
    /// The escape byte that selects the extended opcode space.
    pub const PREFIX: u8 = 0xFE;

    /// First id of the extended (escape-prefixed) range.
    pub const EXTENDED_BASE: u16 = 0x100;

    /// Wraps a raw flat id.
    #[must_use]
    pub const fn new(id: u16) -> Self {
        Opcode(id)
    }

    /// The id of a single-byte opcode.
    #[must_use]
    pub const fn primary(byte: u8) -> Self {
        Opcode(byte as u16)
    }

    /// The id of the opcode encoded as `0xFE second`.
    #[must_use]
    pub const fn extended(second: u8) -> Self {
        Opcode(Self::EXTENDED_BASE + second as u16)
    }

    /// Returns the flat numeric id.
    #[must_use]
    pub const fn id(self) -> u16 {
        self.0
    }

    /// Returns `true` for ids in the escape-prefixed range.
    #[must_use]
    pub const fn is_extended(self) -> bool {
        self.0 >= Self::EXTENDED_BASE
    }

    /// Returns `true` if this id denotes an assigned instruction.
    #[must_use]
    pub fn is_valid(self) -> bool {
        super::table::is_valid(u32::from(self.0))
    }

    /// Number of bytes the opcode itself occupies in the stream (1, or 2 with the escape).
    #[must_use]
    pub const fn header_len(self) -> usize {
        if self.is_extended() {
            2
        } else {
            1
        }
    }

    /// Returns the byte sequence that encodes this opcode.
    ///
    /// Returns `None` for ids that no byte sequence can produce: ids past the extended range,
    /// and the escape byte on its own.
    #[must_use]
    pub fn encoding(self) -> Option<([u8; 2], usize)> {
        match self.0 {
            id if id == u16::from(Self::PREFIX) => None,
            id @ 0x00..=0xFF => Some(([id as u8, 0], 1)),
            id @ 0x100..=0x1FF => Some(([Self::PREFIX, (id - Self::EXTENDED_BASE) as u8], 2)),
            _ => None,
        }
    }
}

impl From<Opcode> for u16 {
    fn from(opcode: Opcode) -> Self {
        opcode.0
    }
}

impl fmt::Debug for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_extended() {
            write!(f, "Opcode(FE {:02X})", self.0 - Self::EXTENDED_BASE)
        } else {
            write!(f, "Opcode({:02X})", self.0)
        }
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:03X}", self.0)
    }
}

/// Reads the opcode at the parser's position and returns its flat id.
///
/// On success the parser is left on the first operand byte. Invalid ids are returned as-is;
/// rejecting them is the caller's decision.
///
/// # Errors
///
/// Returns [`crate::Error::Truncated`] if the parser is at the end of the buffer, or if an
/// escape byte is the last byte of the buffer. The parser position is unchanged on failure.
pub fn normalize(parser: &mut Parser) -> Result<Opcode> {
    let offset = parser.pos();
    let available = parser.remaining();

    let Ok(first) = parser.read_le::<u8>() else {
        return Err(Error::Truncated {
            offset,
            required: 1,
            available,
        });
    };

    if first != Opcode::PREFIX {
        return Ok(Opcode::primary(first));
    }

    match parser.read_le::<u8>() {
        Ok(second) => Ok(Opcode::extended(second)),
        Err(_) => {
            parser.seek(offset)?;
            Err(Error::Truncated {
                offset,
                required: 2,
                available,
            })
        }
    }
}
