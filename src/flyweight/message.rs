//! Message flyweight (spec.md §4.3): the root accessor for one encoded
//! message. Owns the buffer slice and the [`BufferWindow`] cursor; groups
//! and var-data borrow both transiently via reborrows, so only one
//! flyweight in the nesting chain can be live at a time (spec.md §9.1).
use crate::buffer::BufferWindow;
use crate::error::{BufferError, GroupError, VarDataError};
use crate::flyweight::group::{CountWidth, GroupDecoder, GroupEncoder};
use crate::flyweight::var_data::{self, LengthWidth};
use crate::primitive::types::ByteOrder;

/// Whether a fixed-block field is present on the wire for this decode,
/// given the sender's `acting_version`/`acting_block_length` and the
/// field's own `token_version`/offset (spec.md §4.7 schema evolution).
/// A field added in a later schema version than the sender used, or
/// positioned past the bytes the sender actually wrote, reads as absent.
pub fn field_present(
    acting_version: u16,
    acting_block_length: u32,
    token_version: u16,
    field_offset: usize,
    field_size: usize,
) -> bool {
    token_version <= acting_version && field_offset + field_size <= acting_block_length as usize
}

/// Mutable flyweight over a message being encoded.
pub struct MessageEncoder<'a> {
    buf: &'a mut [u8],
    window: BufferWindow,
}

impl<'a> MessageEncoder<'a> {
    pub fn wrap(
        buf: &'a mut [u8],
        base: usize,
        block_length: u32,
        schema_version: u16,
    ) -> Result<Self, BufferError> {
        let window = BufferWindow::wrap_for_encode(base, buf.len(), block_length, schema_version)?;
        Ok(Self { buf, window })
    }

    pub fn base(&self) -> usize {
        self.window.base()
    }

    pub fn encoded_length(&self) -> usize {
        self.window.encoded_length()
    }

    pub fn buf(&self) -> &[u8] {
        self.buf
    }

    pub fn buf_mut(&mut self) -> &mut [u8] {
        self.buf
    }

    #[allow(clippy::too_many_arguments)]
    pub fn group(
        &mut self,
        order: ByteOrder,
        count_width: CountWidth,
        entry_block_length: u16,
        count: u32,
        min: u32,
        max: u32,
    ) -> Result<GroupEncoder<'_>, GroupError> {
        GroupEncoder::wrap(
            self.buf,
            &mut self.window,
            order,
            count_width,
            entry_block_length,
            count,
            min,
            max,
        )
    }

    pub fn var_data(
        &mut self,
        order: ByteOrder,
        length_width: LengthWidth,
        data: &[u8],
    ) -> Result<usize, VarDataError> {
        var_data::write_var_data(self.buf, &mut self.window, order, length_width, data)
    }
}

/// Read-only flyweight over an encoded message.
pub struct MessageDecoder<'a> {
    buf: &'a [u8],
    window: BufferWindow,
}

impl<'a> MessageDecoder<'a> {
    pub fn wrap(
        buf: &'a [u8],
        base: usize,
        acting_block_length: u32,
        acting_version: u16,
    ) -> Result<Self, BufferError> {
        let window = BufferWindow::wrap_for_decode(base, buf.len(), acting_block_length, acting_version)?;
        Ok(Self { buf, window })
    }

    pub fn base(&self) -> usize {
        self.window.base()
    }

    pub fn acting_version(&self) -> u16 {
        self.window.acting_version()
    }

    pub fn acting_block_length(&self) -> u32 {
        self.window.acting_block_length()
    }

    pub fn encoded_length(&self) -> usize {
        self.window.encoded_length()
    }

    pub fn buf(&self) -> &'a [u8] {
        self.buf
    }

    /// Whether a field at `field_offset` of `field_size`, introduced in
    /// `token_version`, was actually written by the encoder of this message.
    pub fn field_present(&self, token_version: u16, field_offset: usize, field_size: usize) -> bool {
        field_present(
            self.window.acting_version(),
            self.window.acting_block_length(),
            token_version,
            field_offset,
            field_size,
        )
    }

    pub fn group(
        &mut self,
        order: ByteOrder,
        count_width: CountWidth,
    ) -> Result<GroupDecoder<'_>, GroupError> {
        GroupDecoder::wrap(self.buf, &mut self.window, order, count_width)
    }

    pub fn var_data(
        &mut self,
        order: ByteOrder,
        length_width: LengthWidth,
    ) -> Result<&'a [u8], VarDataError> {
        var_data::read_var_data(self.buf, &mut self.window, order, length_width)
    }
}

#[cfg(test)]
#[path = "message_tests.rs"]
mod tests;
