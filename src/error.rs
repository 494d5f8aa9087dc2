//! Error taxonomy shared across the codec, flyweight, and IR layers.
//! Each enum models one failure domain (spec.md §7); a crate-wide
//! [`SbeError`] unifies them for call sites that need a single error type.
use thiserror::Error;

use crate::primitive::PrimitiveType;

/// Bounds and capacity failures raised by the buffer window and flyweights.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferError {
    /// An access would read or write past `capacity`.
    #[error("buffer too short: need {needed} bytes at offset {offset}, capacity is {capacity}")]
    BufferTooShort {
        offset: usize,
        needed: usize,
        capacity: usize,
    },
    /// The initial `wrap` could not fit the flyweight's fixed block.
    #[error("buffer too short for flyweight: need {needed} bytes, capacity is {capacity}")]
    BufferTooShortForFlyweight { needed: usize, capacity: usize },
    /// A group could not reserve space for its next entry.
    #[error("buffer too short for next group index: need {needed} more bytes, capacity is {capacity}")]
    BufferTooShortForNextGroupIndex { needed: usize, capacity: usize },
}

/// Failures raised while constructing or advancing a repeating group.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupError {
    /// `num_in_group` fell outside the schema's declared min/max.
    #[error("group count {count} is out of range [{min}, {max}]")]
    CountOutOfRange { count: u64, min: u64, max: u64 },
    /// `next()` was called on a group that has already yielded every entry,
    /// or before the group was wrapped.
    #[error("next() called in invalid group state: {state}")]
    InvalidIterationState { state: &'static str },
    #[error(transparent)]
    Buffer(#[from] BufferError),
}

/// Failures raised while writing or reading a var-data field.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum VarDataError {
    /// `len` does not fit in the var-data field's length-type domain.
    #[error("length {len} exceeds the domain of the {length_type_bits}-bit length type")]
    LengthTooLarge { len: u64, length_type_bits: u8 },
    #[error(transparent)]
    Buffer(#[from] BufferError),
}

/// A decoded primitive fell outside the enum's declared valid-value set.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("unknown enum value {value} for primitive type {primitive_type:?}")]
pub struct EnumError {
    pub value: i64,
    pub primitive_type: PrimitiveType,
}

/// A fixed-size array was accessed with an out-of-range index.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("index {index} out of range for array of capacity {capacity}")]
pub struct IndexError {
    pub index: usize,
    pub capacity: usize,
}

/// Failures raised while decoding a persisted IR token stream.
#[derive(Error, Debug)]
pub enum IrError {
    /// The IR frame declared an `irVersion` this decoder cannot read.
    #[error("unsupported IR version: {version} (only version 0 is supported)")]
    VersionUnsupported { version: u32 },
    /// The stream ended before a structurally complete token block was read.
    #[error("truncated IR stream: expected more tokens after offset {offset}")]
    Truncated { offset: usize },
    #[error(transparent)]
    Buffer(#[from] BufferError),
    #[error("I/O error reading IR stream: {0}")]
    Io(#[from] std::io::Error),
}

/// Unifying error type for callers that do not need to distinguish domains.
#[derive(Error, Debug)]
pub enum SbeError {
    #[error(transparent)]
    Buffer(#[from] BufferError),
    #[error(transparent)]
    Group(#[from] GroupError),
    #[error(transparent)]
    VarData(#[from] VarDataError),
    #[error(transparent)]
    Enum(#[from] EnumError),
    #[error(transparent)]
    Index(#[from] IndexError),
    #[error(transparent)]
    Ir(#[from] IrError),
}
