//! Repeating-group flyweight (spec.md §4.3, §4.6): reads/writes the
//! dimension composite (`blockLength`, `numInGroup`), then advances a
//! shared [`BufferWindow`] one entry at a time. The iteration state
//! machine (`Unwrapped -> Wrapped -> Iterating -> Exhausted`) is enforced
//! by the type itself: `next()` on an exhausted or unwrapped group is a
//! [`GroupError::InvalidIterationState`], not a silent no-op.
use crate::buffer::BufferWindow;
use crate::error::{BufferError, GroupError};
use crate::primitive::access;
use crate::primitive::types::ByteOrder;

/// Width of the `numInGroup` field in a group's dimension composite.
/// `blockLength` is always `U16` (spec.md §3.6); the count varies by
/// schema between `U8` and `U16`; `U32` is supported for very large
/// groups some schemas declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountWidth {
    U8,
    U16,
    U32,
}

impl CountWidth {
    const fn size(self) -> usize {
        match self {
            CountWidth::U8 => 1,
            CountWidth::U16 => 2,
            CountWidth::U32 => 4,
        }
    }

    const fn max(self) -> u64 {
        match self {
            CountWidth::U8 => u8::MAX as u64,
            CountWidth::U16 => u16::MAX as u64,
            CountWidth::U32 => u32::MAX as u64,
        }
    }
}

const DIMENSION_BLOCK_LENGTH_SIZE: usize = 2;

fn dimension_header_size(count_width: CountWidth) -> usize {
    DIMENSION_BLOCK_LENGTH_SIZE + count_width.size()
}

fn read_count(buf: &[u8], offset: usize, order: ByteOrder, count_width: CountWidth) -> u32 {
    match count_width {
        CountWidth::U8 => access::get_u8(buf, offset) as u32,
        CountWidth::U16 => access::get_u16(buf, offset, order) as u32,
        CountWidth::U32 => access::get_u32(buf, offset, order),
    }
}

fn write_count(buf: &mut [u8], offset: usize, order: ByteOrder, count_width: CountWidth, count: u32) {
    match count_width {
        CountWidth::U8 => access::set_u8(buf, offset, count as u8),
        CountWidth::U16 => access::set_u16(buf, offset, order, count as u16),
        CountWidth::U32 => access::set_u32(buf, offset, order, count),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum IterState {
    Wrapped,
    Iterating(u32),
    Exhausted,
}

/// Read side of a repeating group. Borrows the parent's cursor for the
/// duration of its own lifetime, so the parent message (and any sibling
/// group or var-data field) cannot be touched until this group, and every
/// nested group/var-data reached through it, goes out of scope.
pub struct GroupDecoder<'a> {
    buf: &'a [u8],
    window: &'a mut BufferWindow,
    order: ByteOrder,
    count_width: CountWidth,
    /// Block length as declared by the *encoder* that wrote this message,
    /// which schema evolution permits to differ from this decoder's
    /// nominal block length; entries are skipped by this width regardless
    /// of how many of their bytes this decoder's schema knows about.
    entry_block_length: u32,
    count: u32,
    acting_version: u16,
    state: IterState,
}

impl<'a> GroupDecoder<'a> {
    pub fn wrap(
        buf: &'a [u8],
        window: &'a mut BufferWindow,
        order: ByteOrder,
        count_width: CountWidth,
    ) -> Result<Self, GroupError> {
        let header_offset = window.position();
        let header_size = dimension_header_size(count_width);
        if header_offset + header_size > buf.len() {
            return Err(BufferError::BufferTooShort {
                offset: header_offset,
                needed: header_size,
                capacity: buf.len(),
            }
            .into());
        }
        let entry_block_length = access::get_u16(buf, header_offset, order) as u32;
        let count = read_count(buf, header_offset + DIMENSION_BLOCK_LENGTH_SIZE, order, count_width);
        let acting_version = window.acting_version();
        window.advance(header_size)?;
        Ok(Self {
            buf,
            window,
            order,
            count_width,
            entry_block_length,
            count,
            acting_version,
            state: IterState::Wrapped,
        })
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn acting_version(&self) -> u16 {
        self.acting_version
    }

    pub fn has_next(&self) -> bool {
        match self.state {
            IterState::Wrapped => self.count > 0,
            IterState::Iterating(i) => i + 1 < self.count,
            IterState::Exhausted => false,
        }
    }

    /// Advance to the next entry, reserving `entry_block_length` bytes of
    /// fixed block for it. Nested groups/var-data for this entry are read
    /// through the returned [`GroupEntryDecoder`] before the next call.
    pub fn next(&mut self) -> Result<GroupEntryDecoder<'_>, GroupError> {
        let next_index = match self.state {
            IterState::Wrapped if self.count > 0 => 0,
            IterState::Iterating(i) if i + 1 < self.count => i + 1,
            IterState::Wrapped | IterState::Iterating(_) => {
                self.state = IterState::Exhausted;
                return Err(GroupError::InvalidIterationState {
                    state: "Exhausted",
                });
            }
            IterState::Exhausted => {
                return Err(GroupError::InvalidIterationState {
                    state: "Exhausted",
                });
            }
        };
        let entry_offset = self.window.advance(self.entry_block_length as usize)?;
        self.state = if next_index + 1 == self.count {
            IterState::Iterating(next_index)
        } else {
            IterState::Iterating(next_index)
        };
        Ok(GroupEntryDecoder {
            buf: self.buf,
            window: self.window,
            entry_offset,
            acting_version: self.acting_version,
        })
    }
}

/// One entry of a decoded group: the fixed-block view plus access to
/// nested groups and var-data that follow it.
pub struct GroupEntryDecoder<'a> {
    buf: &'a [u8],
    window: &'a mut BufferWindow,
    entry_offset: usize,
    acting_version: u16,
}

impl<'a> GroupEntryDecoder<'a> {
    pub fn entry_offset(&self) -> usize {
        self.entry_offset
    }

    pub fn acting_version(&self) -> u16 {
        self.acting_version
    }

    pub fn buf(&self) -> &'a [u8] {
        self.buf
    }

    pub fn nested_group(
        &mut self,
        order: ByteOrder,
        count_width: CountWidth,
    ) -> Result<GroupDecoder<'_>, GroupError> {
        GroupDecoder::wrap(self.buf, self.window, order, count_width)
    }

    pub fn var_data(
        &mut self,
        order: ByteOrder,
        length_width: crate::flyweight::var_data::LengthWidth,
    ) -> Result<&'a [u8], crate::error::VarDataError> {
        crate::flyweight::var_data::read_var_data(self.buf, self.window, order, length_width)
    }
}

/// Write side of a repeating group: writes the dimension composite up
/// front (count is fixed at wrap time, unlike the Java/C++ tools which
/// allow appending; SBE's wire format has no way to grow a group once its
/// header is written, so this mirrors that constraint directly).
pub struct GroupEncoder<'a> {
    buf: &'a mut [u8],
    window: &'a mut BufferWindow,
    order: ByteOrder,
    entry_block_length: u32,
    count: u32,
    index: i64,
}

impl<'a> GroupEncoder<'a> {
    #[allow(clippy::too_many_arguments)]
    pub fn wrap(
        buf: &'a mut [u8],
        window: &'a mut BufferWindow,
        order: ByteOrder,
        count_width: CountWidth,
        entry_block_length: u16,
        count: u32,
        min: u32,
        max: u32,
    ) -> Result<Self, GroupError> {
        if (count as u64) < min as u64 || (count as u64) > max as u64 {
            return Err(GroupError::CountOutOfRange {
                count: count as u64,
                min: min as u64,
                max: max as u64,
            });
        }
        if count as u64 > count_width.max() {
            return Err(GroupError::CountOutOfRange {
                count: count as u64,
                min: min as u64,
                max: count_width.max(),
            });
        }
        let header_size = dimension_header_size(count_width);
        let header_offset = window.advance(header_size)?;
        access::set_u16_checked(buf, header_offset, order, entry_block_length)
            .map_err(GroupError::Buffer)?;
        write_count(buf, header_offset + DIMENSION_BLOCK_LENGTH_SIZE, order, count_width, count);
        Ok(Self {
            buf,
            window,
            order,
            entry_block_length: entry_block_length as u32,
            count,
            index: -1,
        })
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    /// Advance to the next entry, reserving its fixed block. Errs if
    /// called more times than the `count` fixed at `wrap`.
    pub fn next(&mut self) -> Result<GroupEntryEncoder<'_>, GroupError> {
        let next_index = self.index + 1;
        if next_index >= self.count as i64 {
            return Err(GroupError::InvalidIterationState {
                state: "Exhausted",
            });
        }
        self.index = next_index;
        let entry_offset = self.window.advance(self.entry_block_length as usize)?;
        Ok(GroupEntryEncoder {
            buf: self.buf,
            window: self.window,
            order: self.order,
            entry_offset,
        })
    }
}

/// One entry of a group being encoded.
pub struct GroupEntryEncoder<'a> {
    buf: &'a mut [u8],
    window: &'a mut BufferWindow,
    order: ByteOrder,
    entry_offset: usize,
}

impl<'a> GroupEntryEncoder<'a> {
    pub fn entry_offset(&self) -> usize {
        self.entry_offset
    }

    pub fn buf(&self) -> &[u8] {
        self.buf
    }

    pub fn buf_mut(&mut self) -> &mut [u8] {
        self.buf
    }

    pub fn byte_order(&self) -> ByteOrder {
        self.order
    }

    pub fn nested_group(
        &mut self,
        order: ByteOrder,
        count_width: CountWidth,
        entry_block_length: u16,
        count: u32,
        min: u32,
        max: u32,
    ) -> Result<GroupEncoder<'_>, GroupError> {
        GroupEncoder::wrap(self.buf, self.window, order, count_width, entry_block_length, count, min, max)
    }

    pub fn var_data(
        &mut self,
        order: ByteOrder,
        length_width: crate::flyweight::var_data::LengthWidth,
        data: &[u8],
    ) -> Result<usize, crate::error::VarDataError> {
        crate::flyweight::var_data::write_var_data(self.buf, self.window, order, length_width, data)
    }
}

#[cfg(test)]
#[path = "group_tests.rs"]
mod tests;
