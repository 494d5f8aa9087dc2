//! Convenience view over the standard SBE message header composite
//! (`blockLength`, `templateId`, `schemaId`, `version`), the 8-byte prefix
//! every encoded message carries ahead of its own fixed block. A caller
//! reads one of these first to learn which template and schema version
//! follow, then wraps a [`crate::flyweight::MessageDecoder`] at
//! `base + HeaderView::ENCODED_LENGTH` using the values read here.
use crate::primitive::access;
use crate::primitive::types::ByteOrder;

const OFFSET_BLOCK_LENGTH: usize = 0;
const OFFSET_TEMPLATE_ID: usize = 2;
const OFFSET_SCHEMA_ID: usize = 4;
const OFFSET_VERSION: usize = 6;

/// Read-only view over an encoded message header.
#[derive(Debug, Clone, Copy)]
pub struct HeaderView<'a> {
    buf: &'a [u8],
    base_offset: usize,
}

impl<'a> HeaderView<'a> {
    /// Wire size of the header composite in bytes.
    pub const ENCODED_LENGTH: usize = 8;

    pub fn wrap(buf: &'a [u8], base_offset: usize) -> Self {
        Self { buf, base_offset }
    }

    pub fn block_length(&self) -> u16 {
        access::get_u16(self.buf, self.base_offset + OFFSET_BLOCK_LENGTH, ByteOrder::Little)
    }

    pub fn template_id(&self) -> u16 {
        access::get_u16(self.buf, self.base_offset + OFFSET_TEMPLATE_ID, ByteOrder::Little)
    }

    pub fn schema_id(&self) -> u16 {
        access::get_u16(self.buf, self.base_offset + OFFSET_SCHEMA_ID, ByteOrder::Little)
    }

    pub fn version(&self) -> u16 {
        access::get_u16(self.buf, self.base_offset + OFFSET_VERSION, ByteOrder::Little)
    }

    pub fn encoded_length(&self) -> usize {
        Self::ENCODED_LENGTH
    }
}

/// Mutable view for writing an encoded message header.
pub struct HeaderEncoder<'a> {
    buf: &'a mut [u8],
    base_offset: usize,
}

impl<'a> HeaderEncoder<'a> {
    pub fn wrap(buf: &'a mut [u8], base_offset: usize) -> Self {
        Self { buf, base_offset }
    }

    pub fn block_length(&mut self, value: u16) -> &mut Self {
        access::set_u16(self.buf, self.base_offset + OFFSET_BLOCK_LENGTH, ByteOrder::Little, value);
        self
    }

    pub fn template_id(&mut self, value: u16) -> &mut Self {
        access::set_u16(self.buf, self.base_offset + OFFSET_TEMPLATE_ID, ByteOrder::Little, value);
        self
    }

    pub fn schema_id(&mut self, value: u16) -> &mut Self {
        access::set_u16(self.buf, self.base_offset + OFFSET_SCHEMA_ID, ByteOrder::Little, value);
        self
    }

    pub fn version(&mut self, value: u16) -> &mut Self {
        access::set_u16(self.buf, self.base_offset + OFFSET_VERSION, ByteOrder::Little, value);
        self
    }
}
