// Copyright 2025 Johann Kempter
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0

#![doc(html_no_source)]
#![deny(missing_docs)]
#![deny(unsafe_code)]

//! # cilscan
//!
//! A small, fast decoder for CIL (Common Intermediate Language) instruction streams as defined
//! by ECMA-335. Given the bytes of a method body, `cilscan` finds every instruction boundary
//! and reports each instruction's offset, normalized opcode, size and raw bytes.
//!
//! It is the layer a compiler, verifier or analysis tool sits on: no metadata loading, no
//! token resolution, no control flow graph. Those consume what this crate produces.
//!
//! ## Features
//!
//! - **Complete opcode table** - Every primary and `0xFE`-prefixed opcode, including the
//!   variable-length `switch`
//! - **Zero-copy decoding** - Instructions borrow their bytes from the input buffer
//! - **Hostile input safe** - Every malformed stream becomes an [`Error`] carrying the
//!   failing offset, never a panic or an out of bounds read
//! - **Restartable** - Decoding can resume at any known instruction boundary
//! - **Parallel batches** - Many method bodies decoded at once on a `rayon` pool
//!
//! ## Quick Start
//!
//! ```rust
//! use cilscan::prelude::*;
//!
//! // ldstr 0x70000001; call 0x0A000002; ret
//! let body = [0x72, 0x01, 0x00, 0x00, 0x70, 0x28, 0x02, 0x00, 0x00, 0x0A, 0x2A];
//!
//! for instruction in InstructionDecoder::new(&body) {
//!     let instruction = instruction?;
//!     if let Some(token) = instruction.operand()?.as_token() {
//!         println!("IL_{:04x}: {} -> {}", instruction.offset, instruction.opcode, token);
//!     }
//! }
//! # Ok::<(), cilscan::Error>(())
//! ```
//!
//! ## Architecture
//!
//! - [`prelude`] - Convenient re-exports of commonly used types
//! - [`disassembler`] - Opcode table, normalizer, decoder, encoder and batch decoding
//! - [`metadata`] - Metadata token handles carried as operands
//! - [`file`] - Bounds-checked byte parser and little-endian helpers
//! - [`Error`] and [`Result`] - Error handling
//!
//! ## Standards Compliance
//!
//! Opcode numbering and instruction sizes follow the **ECMA-335 specification** (6th edition),
//! Partition III.
//!
//! ### References
//!
//! - [ECMA-335 Standard](https://ecma-international.org/wp-content/uploads/ECMA-335_6th_edition_june_2012.pdf) - Official CLI specification
//! - [.NET Runtime](https://github.com/dotnet/runtime) - Microsoft's reference implementation
//!
//! ## Development and Testing
//!
//! ### Fuzzing
//!
//! ```bash
//! cargo +nightly fuzz run decode --release
//! ```
//!
//! ### Benchmarks
//!
//! ```bash
//! cargo bench --bench decoder
//! ```

#[macro_use]
pub(crate) mod error;

/// Bounds-checked byte access used by the decoder.
pub mod file;

/// Convenient re-exports of the most commonly used types.
///
/// # Example
///
/// ```rust
/// use cilscan::prelude::*;
///
/// let instructions = decode_stream(&[0x00, 0x2A])?;
/// assert_eq!(instructions[1].opcode, opcodes::RET);
/// # Ok::<(), cilscan::Error>(())
/// ```
pub mod prelude;

/// Instruction decoding based on ECMA-335
///
/// # Key Types
///
/// - [`disassembler::Instruction`] - A decoded CIL instruction
/// - [`disassembler::InstructionDecoder`] - Cursor over one method body
/// - [`disassembler::Opcode`] - Normalized opcode id
/// - [`disassembler::Operand`] - Typed operand view (immediates, tokens, relative targets)
///
/// # Main Functions
///
/// - [`disassembler::decode_instruction`] - Decode a single instruction
/// - [`disassembler::decode_stream`] - Decode a sequence of instructions
/// - [`disassembler::decode_methods`] - Decode many bodies in parallel
///
/// # Examples
///
/// ```rust
/// use cilscan::{disassembler::decode_instruction, Parser};
///
/// let bytecode = &[0x00, 0x2A]; // nop, ret
/// let mut parser = Parser::new(bytecode);
/// let instruction = decode_instruction(&mut parser)?;
///
/// assert_eq!(instruction.size, 1);
/// assert_eq!(parser.pos(), 1);
/// # Ok::<(), cilscan::Error>(())
/// ```
pub mod disassembler;

/// Metadata tokens as they appear in CIL operands
pub mod metadata;

/// `cilscan` Result type
///
/// A type alias for [`std::result::Result<T, Error>`] where the error type is always [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// `cilscan` Error type
///
/// The main error type for all operations in this crate.
///
/// # Examples
///
/// ```rust
/// use cilscan::{disassembler::decode_stream, Error};
///
/// match decode_stream(&[0x00, 0xFE, 0x08]) {
///     Ok(_) => unreachable!(),
///     Err(Error::InvalidOpcode { offset, opcode }) => {
///         assert_eq!(offset, 1);
///         assert_eq!(opcode, 0x108);
///     }
///     Err(e) => panic!("Other error: {}", e),
/// }
/// ```
pub use error::Error;

/// Provides access to low-level parsing functionality.
///
/// See [`file::parser::Parser`] for reading primitive values from a byte slice.
pub use file::parser::Parser;

/// Metadata token handle, see [`metadata::token::Token`].
pub use metadata::token::Token;
