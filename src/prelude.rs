//! # cilscan Prelude
//!
//! This module provides a convenient prelude for the most commonly used types from the
//! cilscan library. Import it to get the decoder, its results and the opcode constants in one
//! line.

// ================================================================================================
// Core Types and Error Handling
// ================================================================================================

/// The main error type for all cilscan operations
pub use crate::Error;

/// The result type used throughout cilscan
pub use crate::Result;

/// Low-level byte parser
pub use crate::Parser;

/// Metadata token type carried by operands
pub use crate::metadata::token::{Token, TokenKind};

// ================================================================================================
// Decoding
// ================================================================================================

/// Decoded instructions and the cursor that produces them
pub use crate::disassembler::{Instruction, InstructionDecoder};

/// Entry points for decoding
pub use crate::disassembler::{
    decode_instruction, decode_methods, decode_stream, decode_stream_with,
};

/// Decoder limits
pub use crate::disassembler::DecoderConfig;

/// Opcodes, operands and the opcode table
pub use crate::disassembler::{opcodes, Immediate, Opcode, OpcodeLength, Operand, OperandType};

// ================================================================================================
// Encoding
// ================================================================================================

/// Builds bytecode the decoder accepts
pub use crate::disassembler::InstructionEncoder;
