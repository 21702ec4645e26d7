use std::fmt;

use super::{
    operand::{Operand, OperandType},
    Opcode,
};
use crate::Result;

/// A single decoded instruction.
///
/// The instruction borrows its bytes from the method body it was decoded from. `bytes` covers
/// the whole instruction, opcode included, so `bytes.len() == size` always holds.
///
/// # Examples
///
/// ```rust
/// use cilscan::disassembler::{decode_stream, opcodes, Operand};
///
/// let instructions = decode_stream(&[0x20, 0x2A, 0x00, 0x00, 0x00, 0x2A])?;
/// let ldc = &instructions[0];
///
/// assert_eq!(ldc.opcode, opcodes::LDC_I4);
/// assert_eq!(ldc.size, 5);
/// assert_eq!(ldc.operand_bytes(), &[0x2A, 0x00, 0x00, 0x00]);
/// assert_eq!(ldc.next_offset(), 5);
/// assert!(matches!(ldc.operand()?, Operand::Immediate(_)));
/// # Ok::<(), cilscan::Error>(())
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Instruction<'a> {
    /// Offset of the first byte of the instruction, relative to the start of the stream
    pub offset: usize,
    /// The normalized opcode
    pub opcode: Opcode,
    /// Total encoded size in bytes, including opcode and operand
    pub size: usize,
    /// The encoded instruction
    pub bytes: &'a [u8],
}

impl<'a> Instruction<'a> {
    /// Returns the operand bytes, i.e. everything after the one or two opcode bytes.
    #[must_use]
    pub fn operand_bytes(&self) -> &'a [u8] {
        self.bytes.get(self.opcode.header_len()..).unwrap_or_default()
    }

    /// Returns the shape of this instruction's operand.
    #[must_use]
    pub fn operand_type(&self) -> OperandType {
        OperandType::of(self.opcode).unwrap_or(OperandType::None)
    }

    /// Parses the operand bytes into a typed [`Operand`].
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Malformed`] if the instruction was not produced by the decoder
    /// and its bytes do not match its opcode.
    pub fn operand(&self) -> Result<Operand> {
        Operand::parse(self.operand_type(), self.operand_bytes())
    }

    /// Offset of the instruction that follows this one.
    #[must_use]
    pub fn next_offset(&self) -> usize {
        self.offset + self.size
    }

    /// Returns the absolute offsets this instruction may branch to.
    ///
    /// Branch offsets are relative to [`Instruction::next_offset`]. Targets that would land
    /// before the start of the stream are dropped. Non-branching instructions return an
    /// empty vector.
    #[must_use]
    pub fn branch_targets(&self) -> Vec<usize> {
        let relative = match self.operand() {
            Ok(Operand::Branch(delta)) => vec![delta],
            Ok(Operand::Switch(deltas)) => deltas,
            _ => return Vec::new(),
        };

        let base = self.next_offset() as i64;
        relative
            .into_iter()
            .filter_map(|delta| usize::try_from(base + i64::from(delta)).ok())
            .collect()
    }
}

impl fmt::Debug for Instruction<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Instruction")
            .field("offset", &self.offset)
            .field("opcode", &self.opcode)
            .field("size", &self.size)
            .field("operand", &self.operand_bytes())
            .finish()
    }
}

impl fmt::Display for Instruction<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "IL_{:04x}:", self.offset)?;
        for byte in self.bytes {
            write!(f, " {:02X}", byte)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{disassembler::opcodes, metadata::token::Token};

    fn instruction(offset: usize, opcode: Opcode, bytes: &[u8]) -> Instruction<'_> {
        Instruction {
            offset,
            opcode,
            size: bytes.len(),
            bytes,
        }
    }

    #[test]
    fn operand_bytes_skip_the_opcode() {
        let bytes = [0x28, 0x01, 0x00, 0x00, 0x0A];
        let call = instruction(0, opcodes::CALL, &bytes);
        assert_eq!(call.operand_bytes(), &bytes[1..]);
        assert_eq!(call.operand().unwrap(), Operand::Token(Token::new(0x0A000001)));

        let bytes = [0xFE, 0x06, 0x02, 0x00, 0x00, 0x06];
        let ldftn = instruction(10, opcodes::LDFTN, &bytes);
        assert_eq!(ldftn.operand_bytes(), &bytes[2..]);
        assert_eq!(ldftn.next_offset(), 16);
    }

    #[test]
    fn branch_targets_are_absolute() {
        let bytes = [0x2B, 0xFB];
        let br_s = instruction(10, opcodes::BR_S, &bytes);
        assert_eq!(br_s.branch_targets(), vec![7]);

        let bytes = [0x45, 0x02, 0, 0, 0, 0x04, 0, 0, 0, 0xF0, 0xFF, 0xFF, 0xFF];
        let switch = instruction(0, opcodes::SWITCH, &bytes);
        assert_eq!(switch.branch_targets(), vec![17]);

        let bytes = [0x2A];
        assert!(instruction(0, opcodes::RET, &bytes).branch_targets().is_empty());
    }

    #[test]
    fn display() {
        let bytes = [0x1F, 0x10];
        assert_eq!(
            instruction(0x1A, opcodes::LDC_I4_S, &bytes).to_string(),
            "IL_001a: 1F 10"
        );
    }
}
