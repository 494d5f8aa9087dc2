//! The callback surface the OTF walk drives (spec.md §4.5). A visitor
//! that only cares about a handful of fields can ignore the rest; none of
//! the methods are required to do anything since all have a default
//! no-op body.
use crate::ir::Token;

/// Receives structural and leaf callbacks as [`crate::otf::decode_message`]
/// walks an encoded message. `offset` arguments are always absolute into
/// the buffer passed to `decode_message`, so a visitor never needs to
/// track position itself.
pub trait Visitor {
    fn on_begin_message(&mut self, _token: &Token) {}
    fn on_end_message(&mut self, _token: &Token) {}

    fn on_begin_composite(&mut self, _token: &Token, _offset: usize) {}
    fn on_end_composite(&mut self, _token: &Token) {}

    /// Called once per group field, before any entry is visited, with the
    /// `num_in_group` read from the wire dimension composite.
    fn on_group_header(&mut self, _token: &Token, _count: u32) {}
    fn on_begin_group(&mut self, _token: &Token, _index: u32) {}
    fn on_end_group(&mut self, _token: &Token, _index: u32) {}

    /// A leaf scalar field: `raw` is the host-endian bit pattern read at
    /// `offset` (sign/float reinterpretation is the visitor's job, since
    /// the decoder does not assume what the caller wants to do with it).
    fn on_encoding(&mut self, _token: &Token, _offset: usize, _raw: u64) {}

    /// A fixed-length array field (`token.array_capacity > 1`, spec.md
    /// §4.5 "array capacity"): `data` spans the whole array,
    /// `array_capacity * primitive_size` bytes, still in wire byte order —
    /// one call for the whole field, never one per element.
    fn on_encoding_array(&mut self, _token: &Token, _offset: usize, _data: &[u8]) {}

    /// `raw` is the underlying integer value; `valid_values` are the
    /// enum's `VALID_VALUE` tokens so the visitor can resolve a name, or
    /// detect that `raw` matches none of them (spec.md §7 `UNKNOWN_ENUM_VALUE`).
    fn on_enum(&mut self, _token: &Token, _offset: usize, _raw: u64, _valid_values: &[Token]) {}

    /// `raw` is the underlying bitset integer value; `choices` are the
    /// `CHOICE` tokens describing each named bit/bit-range.
    fn on_bitset(&mut self, _token: &Token, _offset: usize, _raw: u64, _choices: &[Token]) {}

    fn on_var_data(&mut self, _token: &Token, _data: &[u8]) {}
}
