//! Metadata references as seen from the instruction stream.
//!
//! Operands of `call`, `ldfld`, `newobj`, `ldstr` and friends are 32-bit tokens naming a row in
//! a metadata table (or an offset into the user string heap). [`token::Token`] wraps that value;
//! looking it up is left to the metadata reader of the caller's choice.

pub mod token;
