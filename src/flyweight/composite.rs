//! Composite flyweight (spec.md §4.4): a stateless sub-view over a fixed
//! set of statically-offset fields. Unlike message/group it carries no
//! cursor of its own — every field's offset is known at schema-compile
//! time relative to `base_offset`, so generated accessors just add the
//! field's constant offset and call into [`crate::primitive::access`].
use crate::primitive::types::ByteOrder;

/// Read-only view over a composite embedded at `base_offset` in `buf`.
#[derive(Debug, Clone, Copy)]
pub struct CompositeDecoder<'a> {
    buf: &'a [u8],
    base_offset: usize,
}

impl<'a> CompositeDecoder<'a> {
    pub fn new(buf: &'a [u8], base_offset: usize) -> Self {
        Self { buf, base_offset }
    }

    pub fn base_offset(&self) -> usize {
        self.base_offset
    }

    pub fn buf(&self) -> &'a [u8] {
        self.buf
    }

    /// Re-anchor at a nested composite's field offset, e.g. to descend
    /// into a composite-of-composites.
    pub fn nested(&self, field_offset: usize) -> CompositeDecoder<'a> {
        CompositeDecoder::new(self.buf, self.base_offset + field_offset)
    }
}

/// Mutable view over a composite embedded at `base_offset` in `buf`.
pub struct CompositeEncoder<'a> {
    buf: &'a mut [u8],
    base_offset: usize,
}

impl<'a> CompositeEncoder<'a> {
    pub fn new(buf: &'a mut [u8], base_offset: usize) -> Self {
        Self { buf, base_offset }
    }

    pub fn base_offset(&self) -> usize {
        self.base_offset
    }

    pub fn buf(&self) -> &[u8] {
        self.buf
    }

    pub fn buf_mut(&mut self) -> &mut [u8] {
        self.buf
    }

    pub fn nested(&mut self, field_offset: usize) -> CompositeEncoder<'_> {
        CompositeEncoder::new(self.buf, self.base_offset + field_offset)
    }
}

/// Byte order every composite in a schema shares unless overridden
/// per-field; schemas default to little-endian (spec.md §3.1).
pub const DEFAULT_BYTE_ORDER: ByteOrder = ByteOrder::Little;
