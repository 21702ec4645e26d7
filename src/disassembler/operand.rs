//! Operand classification and typed operand values.
//!
//! The length table only says how many bytes an instruction owns. This module says what those
//! bytes mean: [`OperandType::of`] classifies every assigned opcode, and [`Operand`] is the
//! typed value built from an instruction's raw operand bytes.
//!
//! Branch operands stay relative. Turning them into absolute offsets is left to whoever builds
//! the control flow graph.

use strum::{EnumCount, EnumIter};

use super::{opcodes, table, Opcode};
use crate::{file::io::read_le_at, metadata::token::Token, Result};

/// The shape of the operand that follows an opcode.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, EnumIter, EnumCount)]
pub enum OperandType {
    /// No operand
    None,
    /// Signed 8-bit immediate (`ldc.i4.s`)
    Int8,
    /// Unsigned 8-bit immediate (short argument/local indices, `unaligned.`, `no.`)
    UInt8,
    /// Unsigned 16-bit immediate (long argument/local indices)
    UInt16,
    /// Signed 32-bit immediate (`ldc.i4`)
    Int32,
    /// Signed 64-bit immediate (`ldc.i8`)
    Int64,
    /// 32-bit float (`ldc.r4`)
    Float32,
    /// 64-bit float (`ldc.r8`)
    Float64,
    /// 32-bit metadata token
    Token,
    /// Signed 8-bit branch offset, relative to the next instruction
    BranchTarget8,
    /// Signed 32-bit branch offset, relative to the next instruction
    BranchTarget32,
    /// Unsigned 32-bit count followed by that many signed 32-bit offsets
    Switch,
}

impl OperandType {
    /// Classifies the operand of `opcode`. Returns `None` for invalid opcodes.
    #[must_use]
    pub fn of(opcode: Opcode) -> Option<OperandType> {
        if !opcode.is_valid() {
            return None;
        }

        let kind = match opcode {
            opcodes::LDC_I4_S => OperandType::Int8,
            opcodes::LDC_I4 => OperandType::Int32,
            opcodes::LDC_I8 => OperandType::Int64,
            opcodes::LDC_R4 => OperandType::Float32,
            opcodes::LDC_R8 => OperandType::Float64,
            opcodes::SWITCH => OperandType::Switch,
            opcodes::LEAVE => OperandType::BranchTarget32,
            opcodes::LEAVE_S => OperandType::BranchTarget8,
            opcodes::UNALIGNED | opcodes::NO => OperandType::UInt8,
            _ => match opcode.id() {
                0x0E..=0x13 => OperandType::UInt8,
                0x2B..=0x37 => OperandType::BranchTarget8,
                0x38..=0x44 => OperandType::BranchTarget32,
                0x109..=0x10E => OperandType::UInt16,
                // Every other instruction that carries four operand bytes takes a token
                _ => match table::entry(u32::from(opcode.id())).fixed() {
                    Some(len) if len == opcode.header_len() + 4 => OperandType::Token,
                    _ => OperandType::None,
                },
            },
        };

        Some(kind)
    }

    /// Number of operand bytes, or `None` for [`OperandType::Switch`].
    #[must_use]
    pub fn size(self) -> Option<usize> {
        match self {
            OperandType::None => Some(0),
            OperandType::Int8 | OperandType::UInt8 | OperandType::BranchTarget8 => Some(1),
            OperandType::UInt16 => Some(2),
            OperandType::Int32
            | OperandType::Float32
            | OperandType::Token
            | OperandType::BranchTarget32 => Some(4),
            OperandType::Int64 | OperandType::Float64 => Some(8),
            OperandType::Switch => None,
        }
    }

    /// Returns `true` for operands holding a relative branch offset (including `switch`).
    #[must_use]
    pub fn is_branch(self) -> bool {
        matches!(
            self,
            OperandType::BranchTarget8 | OperandType::BranchTarget32 | OperandType::Switch
        )
    }
}

/// An immediate operand value.
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum Immediate {
    /// Signed 8-bit value
    Int8(i8),
    /// Unsigned 8-bit value
    UInt8(u8),
    /// Unsigned 16-bit value
    UInt16(u16),
    /// Signed 32-bit value
    Int32(i32),
    /// Signed 64-bit value
    Int64(i64),
    /// 32-bit float
    Float32(f32),
    /// 64-bit float
    Float64(f64),
}

/// A typed view over an instruction's operand bytes.
#[derive(Clone, PartialEq, Debug)]
pub enum Operand {
    /// The instruction has no operand
    None,
    /// An immediate value
    Immediate(Immediate),
    /// A metadata token
    Token(Token),
    /// A branch offset relative to the next instruction, sign-extended from 8 or 32 bits
    Branch(i32),
    /// `switch` targets, each relative to the next instruction
    Switch(Vec<i32>),
}

impl Operand {
    /// Builds the typed operand of an instruction of shape `kind` from its operand bytes.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Malformed`] if `bytes` does not have exactly the size `kind`
    /// requires (for `switch`, the size its count implies).
    pub fn parse(kind: OperandType, bytes: &[u8]) -> Result<Operand> {
        if let Some(size) = kind.size() {
            if bytes.len() != size {
                return Err(malformed_error!(
                    "{:?} operand requires {} bytes, got {}",
                    kind,
                    size,
                    bytes.len()
                ));
            }
        }

        let mut offset = 0;
        let operand = match kind {
            OperandType::None => Operand::None,
            OperandType::Int8 => {
                Operand::Immediate(Immediate::Int8(read_le_at(bytes, &mut offset)?))
            }
            OperandType::UInt8 => {
                Operand::Immediate(Immediate::UInt8(read_le_at(bytes, &mut offset)?))
            }
            OperandType::UInt16 => {
                Operand::Immediate(Immediate::UInt16(read_le_at(bytes, &mut offset)?))
            }
            OperandType::Int32 => {
                Operand::Immediate(Immediate::Int32(read_le_at(bytes, &mut offset)?))
            }
            OperandType::Int64 => {
                Operand::Immediate(Immediate::Int64(read_le_at(bytes, &mut offset)?))
            }
            OperandType::Float32 => {
                Operand::Immediate(Immediate::Float32(read_le_at(bytes, &mut offset)?))
            }
            OperandType::Float64 => {
                Operand::Immediate(Immediate::Float64(read_le_at(bytes, &mut offset)?))
            }
            OperandType::Token => Operand::Token(Token::new(read_le_at(bytes, &mut offset)?)),
            OperandType::BranchTarget8 => {
                Operand::Branch(i32::from(read_le_at::<i8>(bytes, &mut offset)?))
            }
            OperandType::BranchTarget32 => Operand::Branch(read_le_at(bytes, &mut offset)?),
            OperandType::Switch => {
                let count = read_le_at::<u32>(bytes, &mut offset)? as usize;
                if bytes.len() - offset != count.saturating_mul(4) {
                    return Err(malformed_error!(
                        "switch declares {} targets, but {} target bytes are present",
                        count,
                        bytes.len() - offset
                    ));
                }

                let mut targets = Vec::with_capacity(count);
                for _ in 0..count {
                    targets.push(read_le_at::<i32>(bytes, &mut offset)?);
                }
                Operand::Switch(targets)
            }
        };

        Ok(operand)
    }

    /// Returns the token, if this operand is one.
    #[must_use]
    pub fn as_token(&self) -> Option<Token> {
        match self {
            Operand::Token(token) => Some(*token),
            _ => None,
        }
    }
}
