//! Buffer Window (spec.md §4.2): the `(base, capacity, acting_block_length,
//! acting_version, position)` tuple every flyweight wraps. It owns no bytes
//! itself — the message flyweight that creates one holds the actual
//! `&[u8]`/`&mut [u8]`, and lends `&mut BufferWindow` to whichever
//! composite/group/var-data flyweight is currently in scope (design note
//! in spec.md §9.1: a transient borrow, never shared ownership).
use crate::error::BufferError;

/// Bounds-checked cursor shared by a message and the flyweights nested
/// inside it. `position` is message-relative, not composite-relative:
/// composites and the fixed block use explicit static offsets added to
/// `base`; groups and var-data advance `position` sequentially.
#[derive(Debug, Clone, Copy)]
pub struct BufferWindow {
    base: usize,
    capacity: usize,
    acting_block_length: u32,
    acting_version: u16,
    position: usize,
}

impl BufferWindow {
    /// Wraps for an encode pass: `position` starts after the nominal
    /// (schema) block length, `acting_block_length`/`acting_version` are
    /// the values this encoder will write into the header.
    pub fn wrap_for_encode(
        base: usize,
        capacity: usize,
        block_length: u32,
        schema_version: u16,
    ) -> Result<Self, BufferError> {
        let position = base
            .checked_add(block_length as usize)
            .ok_or(BufferError::BufferTooShortForFlyweight {
                needed: block_length as usize,
                capacity,
            })?;
        if position > capacity {
            return Err(BufferError::BufferTooShortForFlyweight {
                needed: block_length as usize,
                capacity,
            });
        }
        Ok(Self {
            base,
            capacity,
            acting_block_length: block_length,
            acting_version: schema_version,
            position,
        })
    }

    /// Wraps for a decode pass, using the sender's `acting_block_length`
    /// and `acting_version` as read from the message header.
    pub fn wrap_for_decode(
        base: usize,
        capacity: usize,
        acting_block_length: u32,
        acting_version: u16,
    ) -> Result<Self, BufferError> {
        let position = base
            .checked_add(acting_block_length as usize)
            .ok_or(BufferError::BufferTooShortForFlyweight {
                needed: acting_block_length as usize,
                capacity,
            })?;
        if position > capacity {
            return Err(BufferError::BufferTooShortForFlyweight {
                needed: acting_block_length as usize,
                capacity,
            });
        }
        Ok(Self {
            base,
            capacity,
            acting_block_length,
            acting_version,
            position,
        })
    }

    pub fn base(&self) -> usize {
        self.base
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn acting_block_length(&self) -> u32 {
        self.acting_block_length
    }

    pub fn acting_version(&self) -> u16 {
        self.acting_version
    }

    /// `position - base`: the number of bytes encoded/consumed so far.
    pub fn encoded_length(&self) -> usize {
        self.position - self.base
    }

    /// Reserve `n` bytes starting at the current position and return the
    /// offset to write/read at. On failure `position` is left unchanged
    /// and nothing has been written (spec.md §4.2, §4.7: no partial write).
    pub fn advance(&mut self, n: usize) -> Result<usize, BufferError> {
        let start = self.position;
        let end = start
            .checked_add(n)
            .filter(|&end| end <= self.capacity)
            .ok_or(BufferError::BufferTooShort {
                offset: start,
                needed: n,
                capacity: self.capacity,
            })?;
        self.position = end;
        Ok(start)
    }
}
