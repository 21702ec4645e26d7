//! CIL (Common Intermediate Language) instruction decoding engine.
//!
//! This module turns raw method body bytes into instruction boundaries: for every instruction,
//! its offset, its normalized opcode, its total size and the bytes it owns. It is the first
//! stage of any tool that reads CIL, and deliberately nothing more. Branch targets stay
//! relative, tokens stay unresolved, and no stack or control flow analysis happens here.
//!
//! # Key Types
//! - [`Opcode`] - A normalized opcode id in the flat `0x000..=0x11E` space
//! - [`OpcodeLength`] - The tagged size entry for an opcode
//! - [`Instruction`] - A decoded instruction borrowing its bytes
//! - [`InstructionDecoder`] - A restartable, fused cursor over one method body
//! - [`Operand`] - Typed view over an instruction's operand bytes
//! - [`InstructionEncoder`] - Builds bytecode the decoder accepts
//!
//! # Main Functions
//! - [`decode_instruction`] - Decode a single instruction at a parser's position
//! - [`decode_stream`] - Decode a whole method body
//! - [`decode_methods`] - Decode many method bodies in parallel
//! - [`length_of`] / [`is_valid`] - Opcode table queries
//!
//! # Example
//! ```rust
//! use cilscan::disassembler::{decode_instruction, opcodes};
//! use cilscan::Parser;
//! let bytecode = &[0x00, 0x2A]; // nop, ret
//! let mut parser = Parser::new(bytecode);
//! let instruction = decode_instruction(&mut parser)?;
//! assert_eq!(instruction.opcode, opcodes::NOP);
//! # Ok::<(), cilscan::Error>(())
//! ```

mod batch;
mod config;
mod decoder;
mod encoder;
mod instruction;
mod opcode;
mod operand;

pub mod opcodes;
pub mod table;

pub use batch::decode_methods;
pub use config::DecoderConfig;
pub use decoder::{decode_instruction, decode_stream, decode_stream_with, InstructionDecoder};
pub use encoder::InstructionEncoder;
pub use instruction::Instruction;
pub use opcode::{normalize, Opcode};
pub use operand::{Immediate, Operand, OperandType};
pub use table::{is_valid, length_of, OpcodeLength};
