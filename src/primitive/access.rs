//! Byte-order-aware scalar and array load/store (spec.md §4.1). The
//! unchecked `get_*`/`set_*` functions trust the caller to have validated
//! the offset; the `_checked` siblings additionally bounds-check against
//! the buffer's length and return a [`BufferError`] instead of writing or
//! reading out of bounds.
use crate::error::{BufferError, IndexError};
use crate::primitive::types::ByteOrder;

macro_rules! get_scalar {
    ($name:ident, $checked:ident, $ty:ty, $size:expr) => {
        /// Unchecked: caller guarantees `offset + " size " <= buf.len()`.
        #[inline]
        pub fn $name(buf: &[u8], offset: usize, order: ByteOrder) -> $ty {
            let mut raw = [0u8; $size];
            raw.copy_from_slice(&buf[offset..offset + $size]);
            match order {
                ByteOrder::Little => <$ty>::from_le_bytes(raw),
                ByteOrder::Big => <$ty>::from_be_bytes(raw),
            }
        }

        /// Bounds-checked: returns [`BufferError::BufferTooShort`] rather
        /// than panicking when the field does not fit.
        #[inline]
        pub fn $checked(buf: &[u8], offset: usize, order: ByteOrder) -> Result<$ty, BufferError> {
            if offset + $size > buf.len() {
                return Err(BufferError::BufferTooShort {
                    offset,
                    needed: $size,
                    capacity: buf.len(),
                });
            }
            Ok($name(buf, offset, order))
        }
    };
}

macro_rules! set_scalar {
    ($name:ident, $checked:ident, $ty:ty, $size:expr) => {
        /// Unchecked: caller guarantees `offset + " size " <= buf.len()`.
        #[inline]
        pub fn $name(buf: &mut [u8], offset: usize, order: ByteOrder, value: $ty) {
            let raw = match order {
                ByteOrder::Little => value.to_le_bytes(),
                ByteOrder::Big => value.to_be_bytes(),
            };
            buf[offset..offset + $size].copy_from_slice(&raw);
        }

        /// Bounds-checked: no partial write on failure.
        #[inline]
        pub fn $checked(
            buf: &mut [u8],
            offset: usize,
            order: ByteOrder,
            value: $ty,
        ) -> Result<(), BufferError> {
            if offset + $size > buf.len() {
                return Err(BufferError::BufferTooShort {
                    offset,
                    needed: $size,
                    capacity: buf.len(),
                });
            }
            $name(buf, offset, order, value);
            Ok(())
        }
    };
}

/// `CHAR` and `INT8`/`UINT8` ignore byte order (single byte).
#[inline]
pub fn get_i8(buf: &[u8], offset: usize) -> i8 {
    buf[offset] as i8
}

#[inline]
pub fn get_i8_checked(buf: &[u8], offset: usize) -> Result<i8, BufferError> {
    buf.get(offset).copied().map(|b| b as i8).ok_or(BufferError::BufferTooShort {
        offset,
        needed: 1,
        capacity: buf.len(),
    })
}

#[inline]
pub fn set_i8(buf: &mut [u8], offset: usize, value: i8) {
    buf[offset] = value as u8;
}

#[inline]
pub fn set_i8_checked(buf: &mut [u8], offset: usize, value: i8) -> Result<(), BufferError> {
    if offset >= buf.len() {
        return Err(BufferError::BufferTooShort {
            offset,
            needed: 1,
            capacity: buf.len(),
        });
    }
    set_i8(buf, offset, value);
    Ok(())
}

#[inline]
pub fn get_u8(buf: &[u8], offset: usize) -> u8 {
    buf[offset]
}

#[inline]
pub fn get_u8_checked(buf: &[u8], offset: usize) -> Result<u8, BufferError> {
    buf.get(offset).copied().ok_or(BufferError::BufferTooShort {
        offset,
        needed: 1,
        capacity: buf.len(),
    })
}

#[inline]
pub fn set_u8(buf: &mut [u8], offset: usize, value: u8) {
    buf[offset] = value;
}

#[inline]
pub fn set_u8_checked(buf: &mut [u8], offset: usize, value: u8) -> Result<(), BufferError> {
    if offset >= buf.len() {
        return Err(BufferError::BufferTooShort {
            offset,
            needed: 1,
            capacity: buf.len(),
        });
    }
    set_u8(buf, offset, value);
    Ok(())
}

/// `CHAR` is a single byte with no byte-order dependence.
#[inline]
pub fn get_char(buf: &[u8], offset: usize) -> u8 {
    buf[offset]
}

get_scalar!(get_i16, get_i16_checked, i16, 2);
get_scalar!(get_i32, get_i32_checked, i32, 4);
get_scalar!(get_i64, get_i64_checked, i64, 8);
get_scalar!(get_u16, get_u16_checked, u16, 2);
get_scalar!(get_u32, get_u32_checked, u32, 4);
get_scalar!(get_u64, get_u64_checked, u64, 8);

set_scalar!(set_i16, set_i16_checked, i16, 2);
set_scalar!(set_i32, set_i32_checked, i32, 4);
set_scalar!(set_i64, set_i64_checked, i64, 8);
set_scalar!(set_u16, set_u16_checked, u16, 2);
set_scalar!(set_u32, set_u32_checked, u32, 4);
set_scalar!(set_u64, set_u64_checked, u64, 8);

/// Floats are byte-swapped via their bitwise integer image (spec.md §3.1).
#[inline]
pub fn get_f32(buf: &[u8], offset: usize, order: ByteOrder) -> f32 {
    f32::from_bits(get_u32(buf, offset, order))
}

#[inline]
pub fn get_f32_checked(buf: &[u8], offset: usize, order: ByteOrder) -> Result<f32, BufferError> {
    get_u32_checked(buf, offset, order).map(f32::from_bits)
}

#[inline]
pub fn set_f32(buf: &mut [u8], offset: usize, order: ByteOrder, value: f32) {
    set_u32(buf, offset, order, value.to_bits());
}

#[inline]
pub fn set_f32_checked(
    buf: &mut [u8],
    offset: usize,
    order: ByteOrder,
    value: f32,
) -> Result<(), BufferError> {
    set_u32_checked(buf, offset, order, value.to_bits())
}

#[inline]
pub fn get_f64(buf: &[u8], offset: usize, order: ByteOrder) -> f64 {
    f64::from_bits(get_u64(buf, offset, order))
}

#[inline]
pub fn get_f64_checked(buf: &[u8], offset: usize, order: ByteOrder) -> Result<f64, BufferError> {
    get_u64_checked(buf, offset, order).map(f64::from_bits)
}

#[inline]
pub fn set_f64(buf: &mut [u8], offset: usize, order: ByteOrder, value: f64) {
    set_u64(buf, offset, order, value.to_bits());
}

#[inline]
pub fn set_f64_checked(
    buf: &mut [u8],
    offset: usize,
    order: ByteOrder,
    value: f64,
) -> Result<(), BufferError> {
    set_u64_checked(buf, offset, order, value.to_bits())
}

/// Bounds-checked element access into a fixed-length array field (spec.md
/// §4.1 "array variants operate element-wise"): returns
/// [`IndexError`] rather than panicking when `index >= capacity`
/// (spec.md §7 `INDEX_OUT_OF_RANGE`). `array_offset` is the array's own
/// base offset; `capacity` is the schema-declared `array_capacity`.
#[inline]
pub fn get_u8_array_element(
    buf: &[u8],
    array_offset: usize,
    capacity: usize,
    index: usize,
) -> Result<u8, IndexError> {
    if index >= capacity {
        return Err(IndexError { index, capacity });
    }
    Ok(get_u8(buf, array_offset + index))
}

/// `CHAR` arrays (e.g. a fixed-width string field) share `u8`'s single-byte,
/// byte-order-independent representation, so this is the char-array
/// accessor too.
#[inline]
pub fn set_u8_array_element(
    buf: &mut [u8],
    array_offset: usize,
    capacity: usize,
    index: usize,
    value: u8,
) -> Result<(), IndexError> {
    if index >= capacity {
        return Err(IndexError { index, capacity });
    }
    set_u8(buf, array_offset + index, value);
    Ok(())
}

macro_rules! array_element {
    ($get_name:ident, $set_name:ident, $get_fn:ident, $set_fn:ident, $ty:ty, $size:expr) => {
        /// Bounds-checked element access, see [`get_u8_array_element`].
        #[inline]
        pub fn $get_name(
            buf: &[u8],
            array_offset: usize,
            capacity: usize,
            index: usize,
            order: ByteOrder,
        ) -> Result<$ty, IndexError> {
            if index >= capacity {
                return Err(IndexError { index, capacity });
            }
            Ok($get_fn(buf, array_offset + index * $size, order))
        }

        /// Bounds-checked element access, see [`set_u8_array_element`].
        #[inline]
        pub fn $set_name(
            buf: &mut [u8],
            array_offset: usize,
            capacity: usize,
            index: usize,
            order: ByteOrder,
            value: $ty,
        ) -> Result<(), IndexError> {
            if index >= capacity {
                return Err(IndexError { index, capacity });
            }
            $set_fn(buf, array_offset + index * $size, order, value);
            Ok(())
        }
    };
}

array_element!(get_i16_array_element, set_i16_array_element, get_i16, set_i16, i16, 2);
array_element!(get_i32_array_element, set_i32_array_element, get_i32, set_i32, i32, 4);
array_element!(get_i64_array_element, set_i64_array_element, get_i64, set_i64, i64, 8);
array_element!(get_u16_array_element, set_u16_array_element, get_u16, set_u16, u16, 2);
array_element!(get_u32_array_element, set_u32_array_element, get_u32, set_u32, u32, 4);
array_element!(get_u64_array_element, set_u64_array_element, get_u64, set_u64, u64, 8);

/// Bit reversal across the full width, used by reversed `[lsb..msb]` choice
/// ranges (spec.md §4.1). Mirrors `Encoding::reverseBitsUintN` bit for bit.
#[inline]
pub fn reverse_bits_u8(mut b: u8) -> u8 {
    b = (b & 0xF0) >> 4 | (b & !0xF0) << 4;
    b = (b & 0xCC) >> 2 | (b & !0xCC) << 2;
    b = (b & 0xAA) >> 1 | (b & !0xAA) << 1;
    b
}

#[inline]
pub fn reverse_bits_u16(mut b: u16) -> u16 {
    b = (b & 0xFF00) >> 8 | (b & !0xFF00) << 8;
    b = (b & 0xF0F0) >> 4 | (b & !0xF0F0) << 4;
    b = (b & 0xCCCC) >> 2 | (b & !0xCCCC) << 2;
    b = (b & 0xAAAA) >> 1 | (b & !0xAAAA) << 1;
    b
}

#[inline]
pub fn reverse_bits_u32(mut b: u32) -> u32 {
    b = (b & 0xFFFF0000) >> 16 | (b & !0xFFFF0000) << 16;
    b = (b & 0xFF00FF00) >> 8 | (b & !0xFF00FF00) << 8;
    b = (b & 0xF0F0F0F0) >> 4 | (b & !0xF0F0F0F0) << 4;
    b = (b & 0xCCCCCCCC) >> 2 | (b & !0xCCCCCCCC) << 2;
    b = (b & 0xAAAAAAAA) >> 1 | (b & !0xAAAAAAAA) << 1;
    b
}

#[inline]
pub fn reverse_bits_u64(mut b: u64) -> u64 {
    b = (b & 0xFFFFFFFF00000000) >> 32 | (b & !0xFFFFFFFF00000000) << 32;
    b = (b & 0xFFFF0000FFFF0000) >> 16 | (b & !0xFFFF0000FFFF0000) << 16;
    b = (b & 0xFF00FF00FF00FF00) >> 8 | (b & !0xFF00FF00FF00FF00) << 8;
    b = (b & 0xF0F0F0F0F0F0F0F0) >> 4 | (b & !0xF0F0F0F0F0F0F0F0) << 4;
    b = (b & 0xCCCCCCCCCCCCCCCC) >> 2 | (b & !0xCCCCCCCCCCCCCCCC) << 2;
    b = (b & 0xAAAAAAAAAAAAAAAA) >> 1 | (b & !0xAAAAAAAAAAAAAAAA) << 1;
    b
}

/// Extract a (possibly reversed) bit range `[lsb..msb]` out of `encoded`
/// (spec.md §4.1): if `lsb <= msb` the range is read directly; if
/// `lsb > msb` the word is reversed across its full 64-bit width first,
/// per the historical schemas that depend on that convention.
#[inline]
pub fn get_bits(encoded: u64, lsb: u32, msb: u32) -> u64 {
    let len = (msb as i64 - lsb as i64).unsigned_abs() as u32 + 1;
    let mask = if len >= 64 { u64::MAX } else { (1u64 << len) - 1 };
    if lsb <= msb {
        (encoded >> lsb) & mask
    } else {
        let reversed = reverse_bits_u64(encoded);
        (reversed >> (63 - lsb)) & mask
    }
}
