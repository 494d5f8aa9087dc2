//! Endian-aware, null-value-aware access to SBE's closed set of scalar
//! types (spec.md §3.1, §4.1): get/set per primitive and byte order, the
//! null/min/max constants, NaN handling for floats, bit reversal for
//! "choice" sub-ranges, and the [`PrimitiveValue`] tagged union used by the
//! IR token model to carry a token's typed `min`/`max`/`null`/`const`/`lsb`/
//! `msb` attributes.
pub mod access;
pub mod types;

pub use access::{get_bits, reverse_bits_u16, reverse_bits_u32, reverse_bits_u64, reverse_bits_u8};
pub use types::{ByteOrder, Presence, PrimitiveType, PrimitiveValue};
