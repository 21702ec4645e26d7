//! Metadata token handles carried as instruction operands.
//!
//! A token is the 32-bit value that follows opcodes such as `call`, `ldfld`, `newobj` or
//! `ldstr`. The decoder only wraps it: resolving a token to the type, member or string it
//! names is the job of whoever owns the metadata.

use std::fmt;
use std::hash::{Hash, Hasher};

use strum::{EnumCount, EnumIter};

/// A metadata token representing a reference to a metadata table entry.
///
/// Tokens in .NET metadata consist of a 32-bit value where:
/// - The high byte (bits 24-31) indicates the table type
/// - The low 24 bits (bits 0-23) indicate the row index within that table
///
/// Equality, ordering and hashing are all defined by the raw value.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Token(pub u32);

impl Token {
    /// The empty token, equal to `Token::new(0)`.
    pub const EMPTY: Token = Token(0);

    /// Creates a new token from a raw 32-bit value
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Token(value)
    }

    /// Returns the raw token value
    #[must_use]
    pub const fn value(&self) -> u32 {
        self.0
    }

    /// Extracts the table type from the token (high byte)
    #[must_use]
    pub fn table(&self) -> u8 {
        (self.0 >> 24) as u8
    }

    /// Extracts the row index from the token (low 24 bits)
    #[must_use]
    pub fn row(&self) -> u32 {
        self.0 & 0x00FF_FFFF
    }

    /// Returns true if this is a null token (value 0)
    #[must_use]
    pub fn is_null(&self) -> bool {
        self.0 == 0
    }

    /// Returns the kind of entity this token refers to, if its table byte is one an
    /// instruction operand can legally reference.
    #[must_use]
    pub fn kind(&self) -> Option<TokenKind> {
        TokenKind::from_table(self.table())
    }
}

/// The metadata tables (and the user string heap) an instruction operand token can point into.
///
/// The discriminant is the token's high byte.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, EnumIter, EnumCount)]
pub enum TokenKind {
    /// `TypeRef` (0x01) - a type defined in another module or assembly
    TypeRef = 0x01,
    /// `TypeDef` (0x02) - a type defined in this module
    TypeDef = 0x02,
    /// `Field` (0x04) - a field definition
    Field = 0x04,
    /// `MethodDef` (0x06) - a method definition
    MethodDef = 0x06,
    /// `MemberRef` (0x0A) - a field or method reference
    MemberRef = 0x0A,
    /// `StandAloneSig` (0x11) - a call site signature, used by `calli`
    StandAloneSig = 0x11,
    /// `TypeSpec` (0x1B) - a constructed type
    TypeSpec = 0x1B,
    /// `MethodSpec` (0x2B) - a generic method instantiation
    MethodSpec = 0x2B,
    /// `#US` heap (0x70) - a user string, used by `ldstr`
    UserString = 0x70,
}

impl TokenKind {
    /// Maps a token's table byte to its kind.
    #[must_use]
    pub fn from_table(table: u8) -> Option<Self> {
        match table {
            0x01 => Some(TokenKind::TypeRef),
            0x02 => Some(TokenKind::TypeDef),
            0x04 => Some(TokenKind::Field),
            0x06 => Some(TokenKind::MethodDef),
            0x0A => Some(TokenKind::MemberRef),
            0x11 => Some(TokenKind::StandAloneSig),
            0x1B => Some(TokenKind::TypeSpec),
            0x2B => Some(TokenKind::MethodSpec),
            0x70 => Some(TokenKind::UserString),
            _ => None,
        }
    }

    /// Returns the table byte for this kind.
    #[must_use]
    pub fn table(self) -> u8 {
        self as u8
    }
}

impl From<u32> for Token {
    fn from(value: u32) -> Self {
        Token(value)
    }
}

impl From<Token> for u32 {
    fn from(token: Token) -> Self {
        token.0
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Token(0x{:08x}, table: 0x{:02x}, row: {})",
            self.0,
            self.table(),
            self.row()
        )
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:08x}", self.0)
    }
}

impl Hash for Token {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::hash_map::DefaultHasher;
    use std::collections::HashMap;
    use strum::IntoEnumIterator;

    fn hash_of(token: Token) -> u64 {
        let mut hasher = DefaultHasher::new();
        token.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn test_token_new() {
        let token = Token::new(0x06000001);
        assert_eq!(token.value(), 0x06000001);
    }

    #[test]
    fn test_token_table_and_row() {
        let token = Token(0x06000001);
        assert_eq!(token.table(), 0x06);
        assert_eq!(token.row(), 1);

        let token = Token(0x06FFFFFF);
        assert_eq!(token.row(), 0x00FFFFFF);
    }

    #[test]
    fn test_token_empty() {
        assert_eq!(Token::EMPTY.value(), 0);
        assert_eq!(Token::EMPTY, Token::new(0));
        assert_eq!(Token::EMPTY, Token::default());
        assert!(Token::EMPTY.is_null());
        assert_eq!(hash_of(Token::EMPTY), hash_of(Token::new(0)));

        for raw in [1u32, 0x70000001, 0x0A000000, u32::MAX] {
            assert_ne!(Token::EMPTY, Token::new(raw));
            assert!(!Token::new(raw).is_null());
        }
    }

    #[test]
    fn test_token_equality_and_hash() {
        let token1 = Token::new(0x0A000010);
        let token2 = Token::new(0x0A000010);
        let token3 = Token::new(0x0A000011);

        assert_eq!(token1, token2);
        assert_eq!(hash_of(token1), hash_of(token2));
        assert_ne!(token1, token3);

        let mut map = HashMap::new();
        map.insert(token1, "Console::WriteLine");
        assert_eq!(map.get(&token2), Some(&"Console::WriteLine"));
        assert_eq!(map.get(&token3), None);
    }

    #[test]
    fn test_token_from_conversion() {
        let value = 0x06000001u32;
        let token: Token = value.into();
        assert_eq!(token.value(), value);

        let back_to_u32: u32 = token.into();
        assert_eq!(back_to_u32, value);
    }

    #[test]
    fn test_token_display_and_debug() {
        let token = Token(0x06000001);
        assert_eq!(format!("{}", token), "0x06000001");

        let debug_str = format!("{:?}", token);
        assert!(debug_str.contains("Token(0x06000001"));
        assert!(debug_str.contains("table: 0x06"));
        assert!(debug_str.contains("row: 1"));
    }

    #[test]
    fn test_token_ordering() {
        assert!(Token(0x06000001) < Token(0x06000002));
        assert!(Token(0x06000002) < Token(0x07000001));
    }

    #[test]
    fn test_token_kind() {
        assert_eq!(Token(0x70000001).kind(), Some(TokenKind::UserString));
        assert_eq!(Token(0x0A00002C).kind(), Some(TokenKind::MemberRef));
        assert_eq!(Token(0x2B000001).kind(), Some(TokenKind::MethodSpec));
        assert_eq!(Token(0x00000001).kind(), None);
        assert_eq!(Token(0x20000001).kind(), None);
    }

    #[test]
    fn test_token_kind_table_roundtrip() {
        assert_eq!(TokenKind::iter().count(), TokenKind::COUNT);
        for kind in TokenKind::iter() {
            assert_eq!(TokenKind::from_table(kind.table()), Some(kind));
        }
    }
}
