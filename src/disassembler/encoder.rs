//! CIL instruction encoding.
//!
//! The reverse of [`crate::disassembler::decode_stream`]: [`InstructionEncoder`] appends
//! instructions to a byte buffer, checking each against the same opcode table the decoder
//! uses. Anything it accepts decodes back to the same opcode, offset and size.
//!
//! There are no labels here. Branch operands are written as given, relative to the end of
//! the branch instruction.
//!
//! # Usage Examples
//!
//! ```rust
//! use cilscan::disassembler::{decode_stream, opcodes, InstructionEncoder};
//! use cilscan::metadata::token::Token;
//!
//! let mut encoder = InstructionEncoder::new();
//! encoder.emit(opcodes::LDARG_0, &[])?;
//! encoder.emit_token(opcodes::CALL, Token::new(0x0A000001))?;
//! encoder.emit(opcodes::RET, &[])?;
//!
//! let bytecode = encoder.finish();
//! assert_eq!(bytecode, [0x02, 0x28, 0x01, 0x00, 0x00, 0x0A, 0x2A]);
//! assert_eq!(decode_stream(&bytecode)?.len(), 3);
//! # Ok::<(), cilscan::Error>(())
//! ```

use crate::{
    disassembler::{
        opcodes,
        table::{self, OpcodeLength},
        Immediate, Opcode, Operand, OperandType,
    },
    file::io::{read_le, write_le_at},
    metadata::token::Token,
    Result,
};

/// Appends encoded CIL instructions to an owned buffer.
#[derive(Debug, Clone, Default)]
pub struct InstructionEncoder {
    bytecode: Vec<u8>,
}

impl InstructionEncoder {
    /// Creates an empty encoder.
    #[must_use]
    pub fn new() -> Self {
        InstructionEncoder {
            bytecode: Vec::new(),
        }
    }

    /// Offset at which the next instruction will be written.
    #[must_use]
    pub fn position(&self) -> usize {
        self.bytecode.len()
    }

    /// The bytes encoded so far.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytecode
    }

    /// Consumes the encoder and returns the encoded bytes.
    #[must_use]
    pub fn finish(self) -> Vec<u8> {
        self.bytecode
    }

    /// Appends `opcode` followed by the raw `operand` bytes.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Malformed`] if `opcode` is not an assigned instruction, or if
    /// `operand` does not have the length the opcode requires. For `switch`, `operand` must be
    /// a little-endian count followed by exactly that many 4-byte targets. Nothing is written
    /// on error.
    pub fn emit(&mut self, opcode: Opcode, operand: &[u8]) -> Result<()> {
        let Some((header, header_len)) = opcode.encoding().filter(|_| opcode.is_valid()) else {
            return Err(malformed_error!("Cannot encode invalid opcode {}", opcode));
        };

        match table::entry(u32::from(opcode.id())) {
            OpcodeLength::Fixed(length) => {
                if header_len + operand.len() != usize::from(length) {
                    return Err(malformed_error!(
                        "Opcode {} takes {} operand bytes, got {}",
                        opcode,
                        usize::from(length) - header_len,
                        operand.len()
                    ));
                }
            }
            OpcodeLength::Variable => {
                let count = read_le::<u32>(operand)? as usize;
                if count.checked_mul(4).and_then(|len| len.checked_add(4)) != Some(operand.len()) {
                    return Err(malformed_error!(
                        "Switch declares {} targets, but the operand holds {} bytes",
                        count,
                        operand.len()
                    ));
                }
            }
            OpcodeLength::Invalid => {
                return Err(malformed_error!("Cannot encode invalid opcode {}", opcode));
            }
        }

        self.bytecode.extend_from_slice(&header[..header_len]);
        self.bytecode.extend_from_slice(operand);
        Ok(())
    }

    /// Appends `opcode` with a typed operand.
    ///
    /// The operand variant must fit the opcode's [`OperandType`]. [`Operand::Branch`] values are
    /// narrowed to one byte for short branch forms.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Malformed`] if the opcode is invalid, the operand variant does not
    /// match, or a short branch offset does not fit in a signed byte.
    pub fn emit_operand(&mut self, opcode: Opcode, operand: &Operand) -> Result<()> {
        let Some(kind) = OperandType::of(opcode) else {
            return Err(malformed_error!("Cannot encode invalid opcode {}", opcode));
        };

        let mut bytes = Vec::new();
        match (kind, operand) {
            (OperandType::None, Operand::None) => {}
            (OperandType::Int8, Operand::Immediate(Immediate::Int8(value))) => {
                write_le_at(&mut bytes, *value);
            }
            (OperandType::UInt8, Operand::Immediate(Immediate::UInt8(value))) => {
                write_le_at(&mut bytes, *value);
            }
            (OperandType::UInt16, Operand::Immediate(Immediate::UInt16(value))) => {
                write_le_at(&mut bytes, *value);
            }
            (OperandType::Int32, Operand::Immediate(Immediate::Int32(value))) => {
                write_le_at(&mut bytes, *value);
            }
            (OperandType::Int64, Operand::Immediate(Immediate::Int64(value))) => {
                write_le_at(&mut bytes, *value);
            }
            (OperandType::Float32, Operand::Immediate(Immediate::Float32(value))) => {
                write_le_at(&mut bytes, *value);
            }
            (OperandType::Float64, Operand::Immediate(Immediate::Float64(value))) => {
                write_le_at(&mut bytes, *value);
            }
            (OperandType::Token, Operand::Token(token)) => {
                write_le_at(&mut bytes, token.value());
            }
            (OperandType::BranchTarget8, Operand::Branch(delta)) => {
                let Ok(delta) = i8::try_from(*delta) else {
                    return Err(malformed_error!(
                        "Branch offset {} does not fit the short form of {}",
                        delta,
                        opcode
                    ));
                };
                write_le_at(&mut bytes, delta);
            }
            (OperandType::BranchTarget32, Operand::Branch(delta)) => {
                write_le_at(&mut bytes, *delta);
            }
            (OperandType::Switch, Operand::Switch(targets)) => {
                let count = u32::try_from(targets.len())
                    .map_err(|_| malformed_error!("Too many switch targets"))?;
                write_le_at(&mut bytes, count);
                for target in targets {
                    write_le_at(&mut bytes, *target);
                }
            }
            (kind, operand) => {
                return Err(malformed_error!(
                    "Opcode {} expects a {:?} operand, got {:?}",
                    opcode,
                    kind,
                    operand
                ));
            }
        }

        self.emit(opcode, &bytes)
    }

    /// Appends an instruction with a signed 8-bit immediate, e.g. `ldc.i4.s`.
    ///
    /// # Errors
    /// See [`InstructionEncoder::emit_operand`].
    pub fn emit_i8(&mut self, opcode: Opcode, value: i8) -> Result<()> {
        self.emit_operand(opcode, &Operand::Immediate(Immediate::Int8(value)))
    }

    /// Appends an instruction with an unsigned 8-bit immediate, e.g. `ldarg.s`.
    ///
    /// # Errors
    /// See [`InstructionEncoder::emit_operand`].
    pub fn emit_u8(&mut self, opcode: Opcode, value: u8) -> Result<()> {
        self.emit_operand(opcode, &Operand::Immediate(Immediate::UInt8(value)))
    }

    /// Appends an instruction with an unsigned 16-bit immediate, e.g. `ldloc`.
    ///
    /// # Errors
    /// See [`InstructionEncoder::emit_operand`].
    pub fn emit_u16(&mut self, opcode: Opcode, value: u16) -> Result<()> {
        self.emit_operand(opcode, &Operand::Immediate(Immediate::UInt16(value)))
    }

    /// Appends an instruction with a signed 32-bit immediate (`ldc.i4`).
    ///
    /// # Errors
    /// See [`InstructionEncoder::emit_operand`].
    pub fn emit_i32(&mut self, opcode: Opcode, value: i32) -> Result<()> {
        self.emit_operand(opcode, &Operand::Immediate(Immediate::Int32(value)))
    }

    /// Appends an instruction with a signed 64-bit immediate (`ldc.i8`).
    ///
    /// # Errors
    /// See [`InstructionEncoder::emit_operand`].
    pub fn emit_i64(&mut self, opcode: Opcode, value: i64) -> Result<()> {
        self.emit_operand(opcode, &Operand::Immediate(Immediate::Int64(value)))
    }

    /// Appends an instruction with a 32-bit float immediate (`ldc.r4`).
    ///
    /// # Errors
    /// See [`InstructionEncoder::emit_operand`].
    pub fn emit_f32(&mut self, opcode: Opcode, value: f32) -> Result<()> {
        self.emit_operand(opcode, &Operand::Immediate(Immediate::Float32(value)))
    }

    /// Appends an instruction with a 64-bit float immediate (`ldc.r8`).
    ///
    /// # Errors
    /// See [`InstructionEncoder::emit_operand`].
    pub fn emit_f64(&mut self, opcode: Opcode, value: f64) -> Result<()> {
        self.emit_operand(opcode, &Operand::Immediate(Immediate::Float64(value)))
    }

    /// Appends an instruction that takes a metadata token.
    ///
    /// # Errors
    /// See [`InstructionEncoder::emit_operand`].
    pub fn emit_token(&mut self, opcode: Opcode, token: Token) -> Result<()> {
        self.emit_operand(opcode, &Operand::Token(token))
    }

    /// Appends a short-form branch.
    ///
    /// # Errors
    /// See [`InstructionEncoder::emit_operand`].
    pub fn emit_branch8(&mut self, opcode: Opcode, delta: i8) -> Result<()> {
        self.emit_operand(opcode, &Operand::Branch(i32::from(delta)))
    }

    /// Appends a long-form branch.
    ///
    /// # Errors
    /// See [`InstructionEncoder::emit_operand`].
    pub fn emit_branch32(&mut self, opcode: Opcode, delta: i32) -> Result<()> {
        self.emit_operand(opcode, &Operand::Branch(delta))
    }

    /// Appends a `switch` over `targets`, each relative to the end of the `switch`.
    ///
    /// # Errors
    /// Returns [`crate::Error::Malformed`] if there are more than `u32::MAX` targets.
    pub fn emit_switch(&mut self, targets: &[i32]) -> Result<()> {
        self.emit_operand(opcodes::SWITCH, &Operand::Switch(targets.to_vec()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::disassembler::decode_stream;

    #[test]
    fn test_encoder_creation() {
        let encoder = InstructionEncoder::new();
        assert_eq!(encoder.position(), 0);
        assert!(encoder.as_bytes().is_empty());
    }

    #[test]
    fn test_simple_instruction_encoding() -> Result<()> {
        let mut encoder = InstructionEncoder::new();

        encoder.emit(opcodes::NOP, &[])?;
        encoder.emit(opcodes::RET, &[])?;

        assert_eq!(encoder.finish(), vec![0x00, 0x2A]);
        Ok(())
    }

    #[test]
    fn test_instruction_with_operands() -> Result<()> {
        let mut encoder = InstructionEncoder::new();

        encoder.emit_u8(opcodes::LDARG_S, 1)?;
        encoder.emit_i8(opcodes::LDC_I4_S, 42)?;
        encoder.emit_u16(opcodes::STLOC, 0x0102)?;

        assert_eq!(
            encoder.finish(),
            vec![0x0E, 0x01, 0x1F, 42, 0xFE, 0x0E, 0x02, 0x01]
        );
        Ok(())
    }

    #[test]
    fn test_extended_token() -> Result<()> {
        let mut encoder = InstructionEncoder::new();
        encoder.emit_token(opcodes::CONSTRAINED, Token::new(0x1B000003))?;
        assert_eq!(encoder.position(), 6);
        assert_eq!(encoder.as_bytes(), &[0xFE, 0x16, 0x03, 0x00, 0x00, 0x1B]);
        Ok(())
    }

    #[test]
    fn test_switch_encoding() -> Result<()> {
        let mut encoder = InstructionEncoder::new();
        encoder.emit_switch(&[4, -1])?;

        assert_eq!(
            encoder.as_bytes(),
            &[0x45, 0x02, 0, 0, 0, 0x04, 0, 0, 0, 0xFF, 0xFF, 0xFF, 0xFF]
        );

        let decoded = decode_stream(encoder.as_bytes())?;
        assert_eq!(decoded[0].operand()?, Operand::Switch(vec![4, -1]));
        Ok(())
    }

    #[test]
    fn test_raw_switch_validation() {
        let mut encoder = InstructionEncoder::new();
        assert!(encoder.emit(opcodes::SWITCH, &[0x01, 0, 0, 0]).is_err());
        assert!(encoder.emit(opcodes::SWITCH, &[0x01, 0]).is_err());
        assert!(encoder.emit(opcodes::SWITCH, &[0, 0, 0, 0]).is_ok());
        assert_eq!(encoder.position(), 5);
    }

    #[test]
    fn test_invalid_opcode() {
        let mut encoder = InstructionEncoder::new();
        assert!(encoder.emit(Opcode::primary(0x24), &[]).is_err());
        assert!(encoder.emit(Opcode::new(0xFE), &[]).is_err());
        assert!(encoder.emit(Opcode::extended(0x08), &[]).is_err());
        assert!(encoder.emit(Opcode::new(0x300), &[]).is_err());
        assert_eq!(encoder.position(), 0);
    }

    #[test]
    fn test_wrong_operand() {
        let mut encoder = InstructionEncoder::new();
        assert!(encoder.emit(opcodes::CALL, &[0x01, 0x00]).is_err());
        assert!(encoder.emit(opcodes::NOP, &[0x00]).is_err());
        assert!(encoder.emit_i32(opcodes::LDARG_S, 1).is_err());
        assert!(encoder.emit_token(opcodes::BR, Token::new(1)).is_err());
        assert!(encoder.emit_branch32(opcodes::BR_S, 300).is_err());
        assert_eq!(encoder.position(), 0);
    }

    #[test]
    fn test_branches() -> Result<()> {
        let mut encoder = InstructionEncoder::new();
        encoder.emit_branch8(opcodes::BR_S, -2)?;
        encoder.emit_branch32(opcodes::LEAVE, 0x100)?;
        assert_eq!(
            encoder.finish(),
            vec![0x2B, 0xFE, 0xDD, 0x00, 0x01, 0x00, 0x00]
        );
        Ok(())
    }

    #[test]
    fn test_floats() -> Result<()> {
        let mut encoder = InstructionEncoder::new();
        encoder.emit_f32(opcodes::LDC_R4, 1.5)?;
        encoder.emit_f64(opcodes::LDC_R8, -0.25)?;
        encoder.emit_i64(opcodes::LDC_I8, i64::MIN)?;

        let decoded = decode_stream(encoder.as_bytes())?;
        assert_eq!(
            decoded[0].operand()?,
            Operand::Immediate(Immediate::Float32(1.5))
        );
        assert_eq!(
            decoded[1].operand()?,
            Operand::Immediate(Immediate::Float64(-0.25))
        );
        assert_eq!(
            decoded[2].operand()?,
            Operand::Immediate(Immediate::Int64(i64::MIN))
        );
        Ok(())
    }
}
