//! CIL instruction decoding.
//!
//! This module turns a raw method body into a sequence of [`Instruction`]s. Decoding is a
//! linear sweep: every instruction's size follows from its opcode (and, for `switch`, from the
//! case count in the stream), so the cursor always lands on the next instruction boundary.
//! Nothing here follows branches or resolves tokens.
//!
//! # Example: Decoding a Single Instruction
//!
//! ```rust
//! use cilscan::{Parser, disassembler::{decode_instruction, opcodes}};
//! let code = [0x2A]; // ret
//! let mut parser = Parser::new(&code);
//! let instr = decode_instruction(&mut parser)?;
//! assert_eq!(instr.opcode, opcodes::RET);
//! assert_eq!(instr.size, 1);
//! # Ok::<(), cilscan::Error>(())
//! ```
//!
//! # Example: Decoding a Stream of Instructions
//!
//! ```rust
//! use cilscan::disassembler::decode_stream;
//! let code = [0x00, 0x2A]; // nop, ret
//! let instrs = decode_stream(&code)?;
//! assert_eq!(instrs.len(), 2);
//! assert_eq!(instrs[1].offset, 1);
//! # Ok::<(), cilscan::Error>(())
//! ```
//!
//! # Example: Resuming at an Offset
//!
//! ```rust
//! use cilscan::disassembler::{opcodes, InstructionDecoder};
//! let code = [0x00, 0x16, 0x2A]; // nop, ldc.i4.0, ret
//! let mut decoder = InstructionDecoder::at(&code, 1)?;
//! assert_eq!(decoder.next_instruction()?.map(|i| i.opcode), Some(opcodes::LDC_I4_0));
//! assert_eq!(decoder.offset(), 2);
//! # Ok::<(), cilscan::Error>(())
//! ```

use std::iter::FusedIterator;

use log::{debug, trace};

use crate::{
    disassembler::{
        opcode::normalize,
        table::{self, OpcodeLength},
        DecoderConfig, Instruction, Opcode,
    },
    file::parser::Parser,
    Error, Result,
};

/// Size of the `switch` opcode byte plus its case count.
const SWITCH_HEADER_LEN: usize = 5;

/// A cursor that decodes one method body, one instruction at a time.
///
/// The decoder owns a [`Parser`] over the borrowed body and a count of instructions produced
/// so far. After the first error it is fused: every further call yields nothing, so a caller
/// iterating with `for` sees the error exactly once.
#[derive(Debug, Clone)]
pub struct InstructionDecoder<'a> {
    parser: Parser<'a>,
    config: DecoderConfig,
    decoded: usize,
    failed: bool,
}

impl<'a> InstructionDecoder<'a> {
    /// Create a decoder positioned at the start of `data`, with default limits.
    #[must_use]
    pub fn new(data: &'a [u8]) -> Self {
        InstructionDecoder {
            parser: Parser::new(data),
            config: DecoderConfig::default(),
            decoded: 0,
            failed: false,
        }
    }

    /// Create a decoder that starts at `offset`, with default limits.
    ///
    /// `offset` must be an instruction boundary (typically one reported by an earlier
    /// [`Instruction::offset`] or [`Instruction::next_offset`]). Offsets of returned
    /// instructions stay relative to the start of `data`.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if `offset` is past the end of `data`.
    pub fn at(data: &'a [u8], offset: usize) -> Result<Self> {
        Self::with_config(data, offset, DecoderConfig::default())
    }

    /// Create a decoder that starts at `offset` and applies the limits of `config`.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if `offset` is past the end of `data`.
    pub fn with_config(data: &'a [u8], offset: usize, config: DecoderConfig) -> Result<Self> {
        let mut parser = Parser::new(data);
        parser.seek(offset)?;

        Ok(InstructionDecoder {
            parser,
            config,
            decoded: 0,
            failed: false,
        })
    }

    /// Offset of the next instruction to decode.
    #[must_use]
    pub fn offset(&self) -> usize {
        self.parser.pos()
    }

    /// Returns `true` once the buffer is exhausted or an error has been returned.
    #[must_use]
    pub fn is_done(&self) -> bool {
        self.failed || !self.parser.has_more_data()
    }

    /// Decode the next instruction.
    ///
    /// Returns `Ok(None)` when the cursor sits at the end of the buffer. On error, the
    /// cursor stays on the first byte of the failing instruction.
    ///
    /// # Errors
    /// Returns [`crate::Error::InvalidOpcode`], [`crate::Error::Truncated`] or
    /// [`crate::Error::SwitchTableOverflow`] for malformed bytecode, and
    /// [`crate::Error::InstructionLimit`] when the configured instruction count is reached.
    pub fn next_instruction(&mut self) -> Result<Option<Instruction<'a>>> {
        if self.is_done() {
            return Ok(None);
        }

        let offset = self.parser.pos();
        if self.decoded >= self.config.max_instructions {
            return Err(self.fail(Error::InstructionLimit {
                offset,
                limit: self.config.max_instructions,
            }));
        }

        match decode_with(&mut self.parser, &self.config) {
            Ok(instruction) => {
                trace!(
                    "IL_{:04x}: {} ({} bytes)",
                    instruction.offset,
                    instruction.opcode,
                    instruction.size
                );
                self.decoded += 1;
                Ok(Some(instruction))
            }
            Err(error) => Err(self.fail(error)),
        }
    }

    fn fail(&mut self, error: Error) -> Error {
        debug!(
            "Decoding stopped after {} instructions: {}",
            self.decoded, error
        );
        self.failed = true;
        error
    }
}

impl<'a> Iterator for InstructionDecoder<'a> {
    type Item = Result<Instruction<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_instruction().transpose()
    }
}

impl FusedIterator for InstructionDecoder<'_> {}

/// Decodes a complete method body.
///
/// # Arguments
/// * `data` - The method body's instruction bytes, without the method header
///
/// # Errors
/// Returns the first decode error encountered; see [`InstructionDecoder::next_instruction`].
///
/// # Examples
///
/// ```rust
/// use cilscan::disassembler::{decode_stream, opcodes};
///
/// // ldarg.0; ldfld 0x04000001; ret
/// let code = [0x02, 0x7B, 0x01, 0x00, 0x00, 0x04, 0x2A];
/// let instructions = decode_stream(&code)?;
/// let opcodes: Vec<_> = instructions.iter().map(|i| i.opcode).collect();
/// assert_eq!(opcodes, [opcodes::LDARG_0, opcodes::LDFLD, opcodes::RET]);
/// # Ok::<(), cilscan::Error>(())
/// ```
pub fn decode_stream(data: &[u8]) -> Result<Vec<Instruction<'_>>> {
    InstructionDecoder::new(data).collect()
}

/// Decodes a complete method body under the limits of `config`.
///
/// # Errors
/// Returns the first decode error encountered, including limit violations.
pub fn decode_stream_with<'a>(
    data: &'a [u8],
    config: &DecoderConfig,
) -> Result<Vec<Instruction<'a>>> {
    InstructionDecoder::with_config(data, 0, *config)?.collect()
}

/// Decodes a single instruction at the parser's current position.
///
/// On success the parser is advanced past the instruction. On failure it is left where it
/// was, so the caller can report or skip the offending offset.
///
/// # Errors
/// Returns [`crate::Error::InvalidOpcode`], [`crate::Error::Truncated`] or
/// [`crate::Error::SwitchTableOverflow`] if the bytes at the cursor do not form a complete
/// instruction.
pub fn decode_instruction<'a>(parser: &mut Parser<'a>) -> Result<Instruction<'a>> {
    decode_with(parser, &DecoderConfig::default())
}

fn decode_with<'a>(parser: &mut Parser<'a>, config: &DecoderConfig) -> Result<Instruction<'a>> {
    let offset = parser.pos();
    let available = parser.remaining();

    parser.transactional(|parser| {
        let opcode = normalize(parser)?;

        let size = match table::entry(u32::from(opcode.id())) {
            OpcodeLength::Invalid => {
                return Err(Error::InvalidOpcode {
                    offset,
                    opcode: opcode.id(),
                })
            }
            OpcodeLength::Fixed(length) => {
                let length = usize::from(length);
                if length > available {
                    return Err(Error::Truncated {
                        offset,
                        required: length,
                        available,
                    });
                }
                length
            }
            OpcodeLength::Variable => switch_size(parser, opcode, offset, available, config)?,
        };

        parser.seek(offset)?;
        let bytes = parser.read_bytes(size)?;

        Ok(Instruction {
            offset,
            opcode,
            size,
            bytes,
        })
    })
}

/// Computes the total size of a `switch`, whose opcode byte has already been consumed.
fn switch_size(
    parser: &mut Parser,
    opcode: Opcode,
    offset: usize,
    available: usize,
    config: &DecoderConfig,
) -> Result<usize> {
    if available < SWITCH_HEADER_LEN {
        return Err(Error::Truncated {
            offset,
            required: SWITCH_HEADER_LEN,
            available,
        });
    }

    let count = parser.read_le::<u32>()?;
    let remaining = available - SWITCH_HEADER_LEN;

    let table_len = usize::try_from(count)
        .ok()
        .and_then(|count| count.checked_mul(4))
        .filter(|len| count <= config.max_switch_cases && *len <= remaining);

    match table_len {
        Some(len) => Ok(SWITCH_HEADER_LEN + len),
        None => {
            debug!(
                "{} at offset {} declares {} targets, {} bytes follow",
                opcode, offset, count, remaining
            );
            Err(Error::SwitchTableOverflow {
                offset,
                count,
                available: remaining,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::disassembler::{opcodes, Immediate, Operand};
    use crate::metadata::token::Token;

    fn switch_bytes(count: u32, targets: &[i32]) -> Vec<u8> {
        let mut code = vec![0x45];
        code.extend_from_slice(&count.to_le_bytes());
        for target in targets {
            code.extend_from_slice(&target.to_le_bytes());
        }
        code
    }

    #[test]
    fn decode_instruction_basic() {
        // ldloc.s 10
        let mut parser = Parser::new(&[0x11, 0x10]);

        let result = decode_instruction(&mut parser).unwrap();

        assert_eq!(result.offset, 0);
        assert_eq!(result.size, 2);
        assert_eq!(result.opcode, opcodes::LDLOC_S);
        assert_eq!(result.operand_bytes(), &[0x10]);
        assert_eq!(
            result.operand().unwrap(),
            Operand::Immediate(Immediate::UInt8(0x10))
        );
        assert_eq!(parser.pos(), 2);
    }

    #[test]
    fn decode_instruction_two_byte() {
        // ceq
        let mut parser = Parser::new(&[0xFE, 0x01]);

        let result = decode_instruction(&mut parser).unwrap();

        assert_eq!(result.opcode, opcodes::CEQ);
        assert_eq!(result.opcode.id(), 0x101);
        assert_eq!(result.size, 2);
        assert!(result.operand_bytes().is_empty());
    }

    #[test]
    fn decode_instruction_extended_token() {
        // ldftn 0x06000002
        let mut parser = Parser::new(&[0xFE, 0x06, 0x02, 0x00, 0x00, 0x06]);

        let result = decode_instruction(&mut parser).unwrap();

        assert_eq!(result.opcode, opcodes::LDFTN);
        assert_eq!(result.size, 6);
        assert_eq!(result.operand().unwrap(), Operand::Token(Token::new(0x06000002)));
    }

    #[test]
    fn decode_instruction_token() {
        // ldtoken 0x02000001
        let mut parser = Parser::new(&[0xD0, 0x01, 0x00, 0x00, 0x02]);

        let result = decode_instruction(&mut parser).unwrap();

        assert_eq!(result.opcode, opcodes::LDTOKEN);
        match result.operand().unwrap() {
            Operand::Token(token) => assert_eq!(token.value(), 0x02000001),
            other => panic!("Expected Operand::Token, got {:?}", other),
        }
    }

    #[test]
    fn decode_instruction_branch_is_not_resolved() {
        // br.s 10
        let mut parser = Parser::new(&[0x2B, 0x0A]);

        let result = decode_instruction(&mut parser).unwrap();

        assert_eq!(result.opcode, opcodes::BR_S);
        assert_eq!(result.operand_bytes(), &[0x0A]);
        assert_eq!(result.operand().unwrap(), Operand::Branch(10));
    }

    #[test]
    fn every_fixed_length_opcode_decodes_with_zeroed_operands() {
        for id in 0..table::OPCODE_COUNT as u16 {
            let opcode = Opcode::new(id);
            let OpcodeLength::Fixed(length) = table::entry(u32::from(id)) else {
                continue;
            };
            let length = usize::from(length);

            let (header, header_len) = opcode.encoding().unwrap();
            let mut code = header[..header_len].to_vec();
            code.resize(length, 0);

            let instructions = decode_stream(&code).unwrap();
            assert_eq!(instructions.len(), 1, "opcode {}", opcode);
            assert_eq!(instructions[0].opcode, opcode);
            assert_eq!(instructions[0].size, length);
            assert_eq!(instructions[0].size, table::length_of(opcode));
            assert_eq!(instructions[0].bytes, &code[..]);
        }
    }

    #[test]
    fn switch_sizes() {
        for count in [0u32, 1, 100] {
            let targets: Vec<i32> = (0..count as i32).collect();
            let mut code = switch_bytes(count, &targets);
            code.push(0x2A);

            let mut parser = Parser::new(&code);
            let switch = decode_instruction(&mut parser).unwrap();
            assert_eq!(switch.opcode, opcodes::SWITCH);
            assert_eq!(switch.size, 5 + 4 * count as usize);
            assert_eq!(parser.pos(), switch.size);
            assert_eq!(switch.operand().unwrap(), Operand::Switch(targets));

            let ret = decode_instruction(&mut parser).unwrap();
            assert_eq!(ret.opcode, opcodes::RET);
        }
    }

    #[test]
    fn switch_truncated_count() {
        let mut parser = Parser::new(&[0x45, 0x01, 0x00]);
        assert_eq!(
            decode_instruction(&mut parser),
            Err(Error::Truncated {
                offset: 0,
                required: 5,
                available: 3
            })
        );
        assert_eq!(parser.pos(), 0);
    }

    #[test]
    fn switch_table_overflow() {
        let code = switch_bytes(3, &[1, 2]);
        let mut parser = Parser::new(&code);
        assert_eq!(
            decode_instruction(&mut parser),
            Err(Error::SwitchTableOverflow {
                offset: 0,
                count: 3,
                available: 8
            })
        );
        assert_eq!(parser.pos(), 0);

        let code = switch_bytes(u32::MAX, &[]);
        assert!(matches!(
            decode_stream(&code),
            Err(Error::SwitchTableOverflow { count: u32::MAX, .. })
        ));
    }

    #[test]
    fn switch_case_limit() {
        let code = switch_bytes(2, &[0, 0]);
        let config = DecoderConfig::default().with_max_switch_cases(1);
        assert!(matches!(
            decode_stream_with(&code, &config),
            Err(Error::SwitchTableOverflow { count: 2, .. })
        ));

        let config = DecoderConfig::default().with_max_switch_cases(2);
        assert_eq!(decode_stream_with(&code, &config).unwrap().len(), 1);
    }

    #[test]
    fn invalid_opcodes() {
        let mut parser = Parser::new(&[0x24]);
        assert_eq!(
            decode_instruction(&mut parser),
            Err(Error::InvalidOpcode {
                offset: 0,
                opcode: 0x24
            })
        );

        assert_eq!(
            decode_stream(&[0x00, 0xFE, 0x08]),
            Err(Error::InvalidOpcode {
                offset: 1,
                opcode: 0x108
            })
        );

        assert!(matches!(
            decode_stream(&[0xFE, 0x1F]),
            Err(Error::InvalidOpcode { opcode: 0x11F, .. })
        ));
        assert!(matches!(
            decode_stream(&[0xFF]),
            Err(Error::InvalidOpcode { opcode: 0xFF, .. })
        ));
    }

    #[test]
    fn truncated_operands() {
        // ldc.i8 with 3 of 8 operand bytes
        assert_eq!(
            decode_stream(&[0x00, 0x21, 0x01, 0x02, 0x03]),
            Err(Error::Truncated {
                offset: 1,
                required: 9,
                available: 4
            })
        );

        // lone escape byte
        assert_eq!(
            decode_stream(&[0x2A, 0xFE]),
            Err(Error::Truncated {
                offset: 1,
                required: 2,
                available: 1
            })
        );

        // ldarg with one of two operand bytes
        assert!(matches!(
            decode_stream(&[0xFE, 0x09, 0x01]),
            Err(Error::Truncated { required: 4, .. })
        ));
    }

    #[test]
    fn decoder_fuses_after_error() {
        let code = [0x00, 0x24, 0x00];
        let mut decoder = InstructionDecoder::new(&code);

        assert!(decoder.next().unwrap().is_ok());
        assert!(matches!(
            decoder.next(),
            Some(Err(Error::InvalidOpcode { offset: 1, .. }))
        ));
        assert!(decoder.is_done());
        assert!(decoder.next().is_none());
        assert_eq!(decoder.next_instruction(), Ok(None));
        assert_eq!(decoder.offset(), 1);
    }

    #[test]
    fn decoder_at_offset() {
        // ldc.i4 1; ret
        let code = [0x20, 0x01, 0x00, 0x00, 0x00, 0x2A];

        let mut decoder = InstructionDecoder::at(&code, 5).unwrap();
        let ret = decoder.next_instruction().unwrap().unwrap();
        assert_eq!(ret.offset, 5);
        assert_eq!(ret.opcode, opcodes::RET);
        assert_eq!(decoder.next_instruction(), Ok(None));

        let mut decoder = InstructionDecoder::at(&code, code.len()).unwrap();
        assert!(decoder.is_done());
        assert_eq!(decoder.next_instruction(), Ok(None));

        assert!(matches!(
            InstructionDecoder::at(&code, code.len() + 1),
            Err(Error::OutOfBounds { .. })
        ));
    }

    #[test]
    fn instruction_limit() {
        let code = [0x00, 0x00, 0x00];
        let config = DecoderConfig::default().with_max_instructions(2);

        assert_eq!(
            decode_stream_with(&code, &config),
            Err(Error::InstructionLimit {
                offset: 2,
                limit: 2
            })
        );
        assert_eq!(decode_stream_with(&code[..2], &config).unwrap().len(), 2);
    }

    #[test]
    fn decode_stream_complex() {
        let code = vec![
            0x00, // nop
            0x2C, 0x05, // brfalse.s 5
            0x00, // nop
            0x2B, 0x03, // br.s 3
            0x00, // nop
            0x2A, // ret
            0x00, // nop
            0x2A, // ret
        ];

        let result = decode_stream(&code).unwrap();

        assert_eq!(result.len(), 8);
        let offsets: Vec<usize> = result.iter().map(|i| i.offset).collect();
        assert_eq!(offsets, [0, 1, 3, 4, 6, 7, 8, 9]);
        for pair in result.windows(2) {
            assert_eq!(pair[0].next_offset(), pair[1].offset);
        }
    }

    #[test]
    fn decode_empty_stream() {
        assert_eq!(decode_stream(&[]), Ok(Vec::new()));
    }
}
