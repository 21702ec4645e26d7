//! Byte-level access to raw instruction streams.
//!
//! This module holds the two layers every decode step reads through:
//!
//! - [`crate::file::io`] - Little-endian conversion of primitive values ([`crate::file::io::CilIO`])
//! - [`crate::file::parser::Parser`] - A bounds-checked cursor over a borrowed byte slice
//!
//! Nothing in here knows about opcodes. The disassembler drives the parser and decides how
//! many bytes each instruction owns.

pub mod io;
pub mod parser;
