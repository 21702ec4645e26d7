//! Little-endian, bounds-checked reading and writing of primitive values.
//!
//! CIL method bodies store every multi-byte immediate in little-endian order (ECMA-335
//! Partition III, 1.2). This module provides the [`crate::file::io::CilIO`] trait, which
//! abstracts the byte conversion for all primitive types an instruction operand can hold,
//! and the free functions built on it.
//!
//! # Key Components
//!
//! - [`crate::file::io::CilIO`] - Conversion between a primitive type and its byte array
//! - [`crate::file::io::read_le`] - Read a value from the start of a buffer
//! - [`crate::file::io::read_le_at`] - Read a value at an offset and advance the offset
//! - [`crate::file::io::write_le_at`] - Append a value to a byte vector
//!
//! # Error Handling
//!
//! All reading functions return [`crate::Error::OutOfBounds`] if the buffer does not hold
//! enough bytes. The offset is left untouched on failure, so a read never observes or
//! consumes bytes past the end of the buffer.
//!
//! # Examples
//!
//! ```rust
//! use cilscan::file::io::read_le_at;
//!
//! let data = [0x01, 0x00, 0x02, 0x00, 0x00, 0x00];
//! let mut offset = 0;
//!
//! let first: u16 = read_le_at(&data, &mut offset)?;
//! let second: u32 = read_le_at(&data, &mut offset)?;
//! assert_eq!((first, second, offset), (1, 2, 6));
//! # Ok::<(), cilscan::Error>(())
//! ```

use crate::Result;

/// Trait for type-specific, endian-aware conversion between a primitive and its bytes.
///
/// Each implementation defines a `Bytes` associated type that represents the fixed-size
/// byte array for that type (e.g. `[u8; 4]` for `u32`).
///
/// # Thread Safety
///
/// All implementations are pure conversions on primitive types.
pub trait CilIO: Sized {
    /// Associated type representing the byte array type for this numeric type.
    type Bytes: Sized + AsRef<[u8]> + for<'a> TryFrom<&'a [u8]>;

    /// Read T from a byte buffer in little-endian
    fn from_le_bytes(bytes: Self::Bytes) -> Self;

    /// Write T to a byte buffer in little-endian
    fn to_le_bytes(self) -> Self::Bytes;
}

macro_rules! impl_cilio {
    ($($ty:ty => $len:expr),* $(,)?) => {
        $(
            impl CilIO for $ty {
                type Bytes = [u8; $len];

                fn from_le_bytes(bytes: Self::Bytes) -> Self {
                    <$ty>::from_le_bytes(bytes)
                }

                fn to_le_bytes(self) -> Self::Bytes {
                    <$ty>::to_le_bytes(self)
                }
            }
        )*
    };
}

impl_cilio! {
    u8 => 1,
    i8 => 1,
    u16 => 2,
    i16 => 2,
    u32 => 4,
    i32 => 4,
    u64 => 8,
    i64 => 8,
    f32 => 4,
    f64 => 8,
}

/// Safely reads a value of type `T` in little-endian byte order from the start of a buffer.
///
/// # Errors
///
/// Returns [`crate::Error::OutOfBounds`] if there are insufficient bytes.
pub fn read_le<T: CilIO>(data: &[u8]) -> Result<T> {
    let mut offset = 0_usize;
    read_le_at(data, &mut offset)
}

/// Safely reads a value of type `T` in little-endian byte order at a specific offset.
///
/// The offset is advanced by the size of `T` on success and left unchanged on failure.
///
/// # Errors
///
/// Returns [`crate::Error::OutOfBounds`] if there are insufficient bytes.
pub fn read_le_at<T: CilIO>(data: &[u8], offset: &mut usize) -> Result<T> {
    let type_len = std::mem::size_of::<T>();
    let Some(end) = offset.checked_add(type_len) else {
        return Err(out_of_bounds_error!());
    };
    if end > data.len() {
        return Err(out_of_bounds_error!());
    }

    let Ok(read) = data[*offset..end].try_into() else {
        return Err(out_of_bounds_error!());
    };

    *offset = end;

    Ok(T::from_le_bytes(read))
}

/// Appends a value of type `T` in little-endian byte order to a growable buffer.
pub fn write_le_at<T: CilIO>(data: &mut Vec<u8>, value: T) {
    data.extend_from_slice(value.to_le_bytes().as_ref());
}
