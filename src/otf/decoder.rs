//! The generic walk (spec.md §4.5): given a message's token slice and the
//! encoded bytes, replay each `BEGIN_*`/`END_*` bracket into [`Visitor`]
//! callbacks. Every structural token carries `component_token_count`, the
//! number of tokens from itself to its matching `END_*` inclusive, which
//! is how the walk skips a construct's contents without interpreting
//! them — no recursive-descent parser for a grammar is needed, only
//! constant-time index arithmetic.
use crate::error::{BufferError, SbeError};
use crate::flyweight::message::field_present;
use crate::ir::token::{Signal, Token};
use crate::primitive::access;

use super::visitor::Visitor;

/// Width, in bytes, of a group's dimension composite (`blockLength: U16`
/// followed by `numInGroup: U16`). Matches the default this crate's
/// [`crate::flyweight::group`] flyweight uses for `CountWidth::U16`.
const GROUP_DIMENSION_HEADER_SIZE: usize = 4;

/// Walk one message's token run (`tokens[0]` must be `BEGIN_MESSAGE`,
/// the last entry `END_MESSAGE`), driving `visitor`. Returns the number
/// of bytes consumed from `base_offset`.
pub fn decode_message(
    buf: &[u8],
    tokens: &[Token],
    base_offset: usize,
    acting_block_length: u32,
    acting_version: u16,
    visitor: &mut dyn Visitor,
) -> Result<usize, SbeError> {
    debug_assert_eq!(tokens.first().map(|t| t.signal), Some(Signal::BeginMessage));
    visitor.on_begin_message(&tokens[0]);

    let mut dynamic_position = base_offset + acting_block_length as usize;
    let mut i = walk_siblings(
        buf,
        tokens,
        1,
        base_offset,
        acting_block_length,
        &mut dynamic_position,
        acting_version,
        visitor,
    )?;

    if let Some(end) = tokens.get(i) {
        debug_assert_eq!(end.signal, Signal::EndMessage);
        visitor.on_end_message(end);
        i += 1;
    }
    debug_assert_eq!(i, tokens.len());
    Ok(dynamic_position - base_offset)
}

/// Reads `token`'s underlying primitive at `offset` as a host-endian
/// `u64` bit pattern, zero-extended. Sign/float reinterpretation is left
/// to the visitor, which knows what it wants to do with the value.
fn read_raw(buf: &[u8], offset: usize, token: &Token) -> Result<u64, BufferError> {
    use crate::primitive::types::PrimitiveType::*;
    let order = token.encoding.byte_order;
    Ok(match token.encoding.primitive_type {
        None => 0,
        Char | Int8 | UInt8 => access::get_u8_checked(buf, offset)? as u64,
        Int16 | UInt16 => access::get_u16_checked(buf, offset, order)? as u64,
        Int32 | UInt32 | Float => access::get_u32_checked(buf, offset, order)? as u64,
        Int64 | UInt64 | Double => access::get_u64_checked(buf, offset, order)?,
    })
}

/// Walk a run of sibling tokens starting at `i` (fields, groups, var-data,
/// in any order and count), stopping when an `END_MESSAGE`/`END_GROUP`
/// terminator is reached or the slice runs out. Returns the index the
/// terminator (if any) was found at, without consuming it — the caller
/// decides what to do with its own bracket's close.
///
/// `container_block_length` is the wire block length of the immediately
/// enclosing fixed block — the message root's `acting_block_length` at
/// the top level, or a group entry's encoder-declared block length one
/// level down — used to report fields past it as absent (spec.md §4.5
/// schema evolution: "decoder block lengths may be shorter").
#[allow(clippy::too_many_arguments)]
fn walk_siblings(
    buf: &[u8],
    tokens: &[Token],
    mut i: usize,
    base: usize,
    container_block_length: u32,
    dynamic_position: &mut usize,
    acting_version: u16,
    visitor: &mut dyn Visitor,
) -> Result<usize, SbeError> {
    while i < tokens.len() {
        match tokens[i].signal {
            Signal::BeginField => {
                i = walk_field(buf, tokens, i, base, container_block_length, acting_version, visitor)?;
            }
            Signal::BeginGroup => {
                let (next_i, new_pos) =
                    walk_group(buf, tokens, i, *dynamic_position, acting_version, visitor)?;
                i = next_i;
                *dynamic_position = new_pos;
            }
            Signal::BeginVarData => {
                i = walk_var_data(buf, tokens, i, dynamic_position, visitor)?;
            }
            Signal::EndMessage | Signal::EndGroup => break,
            _ => i += 1,
        }
    }
    Ok(i)
}

fn walk_field(
    buf: &[u8],
    tokens: &[Token],
    i: usize,
    base: usize,
    container_block_length: u32,
    acting_version: u16,
    visitor: &mut dyn Visitor,
) -> Result<usize, SbeError> {
    let field_token = &tokens[i];
    let end_index = i + field_token.component_token_count as usize - 1;
    let mut j = i + 1;
    if j < end_index {
        let inner = &tokens[j];
        // spec.md §4.5/§4.7: a field is present only if its schema version
        // has been reached AND its offset still falls within the wire
        // block length this decode actually has to work with — reusing
        // the same rule the generated flyweight applies to its own fixed
        // block (crate::flyweight::message::field_present).
        let present = field_present(
            acting_version,
            container_block_length,
            inner.version as u16,
            inner.offset.max(0) as usize,
            inner.size.max(0) as usize,
        );
        match inner.signal {
            Signal::Encoding => {
                if present {
                    let offset = base + inner.offset as usize;
                    emit_encoding(buf, offset, inner, visitor)?;
                }
                j += 1;
            }
            Signal::BeginComposite => {
                j = walk_composite(buf, tokens, j, base, present, visitor)?;
            }
            Signal::BeginEnum => {
                j = walk_enum(buf, tokens, j, base, present, visitor)?;
            }
            Signal::BeginSet => {
                j = walk_set(buf, tokens, j, base, present, visitor)?;
            }
            _ => j += 1,
        }
    }
    debug_assert_eq!(tokens[end_index].signal, Signal::EndField);
    Ok(end_index + 1)
}

/// Emits one `on_encoding` for a scalar `ENCODING` token, or one
/// `on_encoding_array` spanning `array_capacity * primitive_size` bytes
/// when the token describes a fixed-length array (spec.md §4.5 "array
/// capacity"): a single call either way, never per-element.
fn emit_encoding(buf: &[u8], offset: usize, token: &Token, visitor: &mut dyn Visitor) -> Result<(), SbeError> {
    if token.array_capacity > 1 {
        let len = token.array_capacity as usize * token.encoding.primitive_type.size();
        if offset + len > buf.len() {
            return Err(BufferError::BufferTooShort {
                offset,
                needed: len,
                capacity: buf.len(),
            }
            .into());
        }
        visitor.on_encoding_array(token, offset, &buf[offset..offset + len]);
    } else {
        let raw = read_raw(buf, offset, token)?;
        visitor.on_encoding(token, offset, raw);
    }
    Ok(())
}

fn walk_composite(
    buf: &[u8],
    tokens: &[Token],
    i: usize,
    enclosing_base: usize,
    present: bool,
    visitor: &mut dyn Visitor,
) -> Result<usize, SbeError> {
    let token = &tokens[i];
    let end_index = i + token.component_token_count as usize - 1;
    let composite_base = enclosing_base + token.offset.max(0) as usize;
    if present {
        visitor.on_begin_composite(token, composite_base);
    }
    let mut j = i + 1;
    while j < end_index {
        match tokens[j].signal {
            Signal::Encoding => {
                if present {
                    let offset = composite_base + tokens[j].offset as usize;
                    emit_encoding(buf, offset, &tokens[j], visitor)?;
                }
                j += 1;
            }
            Signal::BeginComposite => {
                j = walk_composite(buf, tokens, j, composite_base, present, visitor)?;
            }
            Signal::BeginEnum => {
                j = walk_enum(buf, tokens, j, composite_base, present, visitor)?;
            }
            Signal::BeginSet => {
                j = walk_set(buf, tokens, j, composite_base, present, visitor)?;
            }
            _ => j += 1,
        }
    }
    if present {
        visitor.on_end_composite(token);
    }
    Ok(end_index + 1)
}

fn walk_enum(
    buf: &[u8],
    tokens: &[Token],
    i: usize,
    base: usize,
    present: bool,
    visitor: &mut dyn Visitor,
) -> Result<usize, SbeError> {
    let token = &tokens[i];
    let end_index = i + token.component_token_count as usize - 1;
    let valid_values = &tokens[i + 1..end_index];
    if present {
        let offset = base + token.offset.max(0) as usize;
        let raw = read_raw(buf, offset, token)?;
        // spec.md §3.8 "decoding an unrecognised value is an error",
        // §7 `UNKNOWN_ENUM_VALUE`: halt the walk rather than hand the
        // visitor a value it never agreed to accept.
        token.validate_enum_value(raw, valid_values)?;
        visitor.on_enum(token, offset, raw, valid_values);
    }
    Ok(end_index + 1)
}

fn walk_set(
    buf: &[u8],
    tokens: &[Token],
    i: usize,
    base: usize,
    present: bool,
    visitor: &mut dyn Visitor,
) -> Result<usize, SbeError> {
    let token = &tokens[i];
    let end_index = i + token.component_token_count as usize - 1;
    let choices = &tokens[i + 1..end_index];
    if present {
        let offset = base + token.offset.max(0) as usize;
        let raw = read_raw(buf, offset, token)?;
        visitor.on_bitset(token, offset, raw, choices);
    }
    Ok(end_index + 1)
}

fn walk_group(
    buf: &[u8],
    tokens: &[Token],
    i: usize,
    dynamic_position: usize,
    acting_version: u16,
    visitor: &mut dyn Visitor,
) -> Result<(usize, usize), SbeError> {
    let token = &tokens[i];
    let end_index = i + token.component_token_count as usize - 1;
    let order = token.encoding.byte_order;

    if dynamic_position + GROUP_DIMENSION_HEADER_SIZE > buf.len() {
        return Err(BufferError::BufferTooShortForNextGroupIndex {
            needed: GROUP_DIMENSION_HEADER_SIZE,
            capacity: buf.len(),
        }
        .into());
    }
    let wire_block_length = access::get_u16(buf, dynamic_position, order) as usize;
    let count = access::get_u16(buf, dynamic_position + 2, order) as u32;
    visitor.on_group_header(token, count);

    let mut pos = dynamic_position + GROUP_DIMENSION_HEADER_SIZE;
    for index in 0..count {
        visitor.on_begin_group(token, index);
        let entry_base = pos;
        pos = entry_base + wire_block_length;
        // The entry's own wire block length plays the same role inside the
        // entry that `acting_block_length` plays for the message root: a
        // field whose offset falls past it was never written by this
        // entry's encoder (spec.md §4.5 schema evolution).
        walk_siblings(
            buf,
            tokens,
            i + 1,
            entry_base,
            wire_block_length as u32,
            &mut pos,
            acting_version,
            visitor,
        )?;
        visitor.on_end_group(token, index);
    }
    Ok((end_index + 1, pos))
}

fn walk_var_data(
    buf: &[u8],
    tokens: &[Token],
    i: usize,
    dynamic_position: &mut usize,
    visitor: &mut dyn Visitor,
) -> Result<usize, SbeError> {
    let token = &tokens[i];
    let end_index = i + token.component_token_count as usize - 1;
    let order = token.encoding.byte_order;
    let pos = *dynamic_position;

    let len_size = token.encoding.primitive_type.size().max(1);
    if pos + len_size > buf.len() {
        return Err(BufferError::BufferTooShort {
            offset: pos,
            needed: len_size,
            capacity: buf.len(),
        }
        .into());
    }
    let length = match len_size {
        1 => access::get_u8(buf, pos) as usize,
        2 => access::get_u16(buf, pos, order) as usize,
        _ => access::get_u32(buf, pos, order) as usize,
    };
    let data_start = pos + len_size;
    if data_start + length > buf.len() {
        return Err(BufferError::BufferTooShort {
            offset: data_start,
            needed: length,
            capacity: buf.len(),
        }
        .into());
    }
    visitor.on_var_data(token, &buf[data_start..data_start + length]);
    *dynamic_position = data_start + length;
    Ok(end_index + 1)
}

#[cfg(test)]
#[path = "decoder_tests.rs"]
mod tests;
