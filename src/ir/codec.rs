//! Binary codec for a persisted IR token stream (spec.md §3, §3.9): an
//! `ir_version`/`ir_id`/schema-identity header followed by the header
//! type's own composite tokens, then one bracketed `BEGIN_MESSAGE .. *
//! .. END_MESSAGE` token run per message in the schema. Built entirely on
//! this crate's own flyweight primitives (length-prefixed var-data for
//! every string and every typed attribute) rather than on a
//! schema-specific generated codec, since the IR format has to be
//! readable before any schema-specific code exists.
use std::io::Read;

use crate::error::IrError;
use crate::flyweight::var_data::{self, LengthWidth};
use crate::primitive::access;
use crate::primitive::types::{ByteOrder, Presence, PrimitiveType, PrimitiveValue};

use super::token::{Encoding, Signal, Token};

const SUPPORTED_IR_VERSION: u32 = 0;
const FIELD_ORDER: ByteOrder = ByteOrder::Little;

/// Schema-identity metadata carried in the IR stream's header frame.
#[derive(Debug, Clone, PartialEq)]
pub struct IrFrameMeta {
    pub ir_version: u32,
    pub ir_id: i32,
    pub schema_version: u16,
    pub package_name: String,
    pub namespace_name: String,
    pub semantic_version: String,
}

/// A decoded (or to-be-encoded) IR token stream: the header type's own
/// tokens plus every message's token run, keyed for lookup by template id.
#[derive(Debug, Clone, PartialEq)]
pub struct IrCodec {
    pub meta: IrFrameMeta,
    header_tokens: Vec<Token>,
    messages: Vec<Vec<Token>>,
}

impl IrCodec {
    pub fn new(meta: IrFrameMeta, header_tokens: Vec<Token>, messages: Vec<Vec<Token>>) -> Self {
        Self {
            meta,
            header_tokens,
            messages,
        }
    }

    pub fn header(&self) -> &[Token] {
        &self.header_tokens
    }

    pub fn messages(&self) -> &[Vec<Token>] {
        &self.messages
    }

    /// The first message whose `BEGIN_MESSAGE` token carries `template_id`,
    /// preferring the highest token version when several exist.
    pub fn message(&self, template_id: i32) -> Option<&[Token]> {
        self.messages
            .iter()
            .filter(|tokens| matches!(tokens.first(), Some(t) if t.signal == Signal::BeginMessage && t.id == template_id))
            .max_by_key(|tokens| tokens[0].version)
            .map(Vec::as_slice)
    }

    /// The message matching both `template_id` and an exact `version`.
    pub fn message_version(&self, template_id: i32, version: i32) -> Option<&[Token]> {
        self.messages.iter().find(|tokens| {
            matches!(tokens.first(), Some(t) if t.signal == Signal::BeginMessage && t.id == template_id && t.version == version)
        }).map(Vec::as_slice)
    }

    /// Parse a complete IR stream out of an in-memory buffer.
    pub fn decode_from_bytes(buf: &[u8]) -> Result<Self, IrError> {
        let (meta, mut offset) = decode_frame_header(buf)?;
        if meta.ir_version != SUPPORTED_IR_VERSION {
            return Err(IrError::VersionUnsupported {
                version: meta.ir_version,
            });
        }

        let mut header_tokens = Vec::new();
        while offset < buf.len() {
            let (token, consumed) = decode_token(buf, offset)?;
            offset += consumed;
            let is_end = token.signal == Signal::EndComposite;
            header_tokens.push(token);
            if is_end {
                break;
            }
        }

        let mut messages = Vec::new();
        while offset < buf.len() {
            let mut tokens = Vec::new();
            loop {
                let (token, consumed) = decode_token(buf, offset)?;
                offset += consumed;
                let is_end = token.signal == Signal::EndMessage;
                tokens.push(token);
                if is_end || offset >= buf.len() {
                    break;
                }
            }
            messages.push(tokens);
        }

        Ok(Self::new(meta, header_tokens, messages))
    }

    /// Read an entire stream from `reader` before parsing. Reads to EOF in
    /// one pass rather than looping over fixed-size chunks, so a reader
    /// that returns short reads above EOF (as some pipes and files do)
    /// cannot truncate the stream silently.
    pub fn decode_from_reader<R: Read>(reader: &mut R) -> Result<Self, IrError> {
        let mut buf = Vec::new();
        reader.read_to_end(&mut buf)?;
        Self::decode_from_bytes(&buf)
    }

    pub fn decode_from_file(path: &std::path::Path) -> Result<Self, IrError> {
        let mut file = std::fs::File::open(path)?;
        Self::decode_from_reader(&mut file)
    }

    /// Serialize back to the same binary form `decode_from_bytes` reads.
    pub fn encode_to_bytes(&self) -> Vec<u8> {
        let mut out = encode_frame_header(&self.meta);
        for token in self.header_tokens.iter().chain(self.messages.iter().flatten()) {
            out.extend_from_slice(&encode_token(token));
        }
        out
    }
}

fn write_string(out: &mut Vec<u8>, s: &str) {
    let mut scratch = vec![0u8; 2 + s.len()];
    var_data::write_var_data(&mut scratch, &mut crate::buffer::BufferWindow::wrap_for_encode(0, scratch.len(), 0, 0).unwrap(), FIELD_ORDER, LengthWidth::U16, s.as_bytes()).unwrap();
    out.extend_from_slice(&scratch);
}

fn read_string(buf: &[u8], offset: usize) -> Result<(String, usize), IrError> {
    let mut window = crate::buffer::BufferWindow::wrap_for_decode(offset, buf.len(), 0, 0)?;
    let bytes = var_data::read_var_data(buf, &mut window, FIELD_ORDER, LengthWidth::U16)?;
    let s = String::from_utf8_lossy(bytes).into_owned();
    Ok((s, window.position() - offset))
}

fn encode_frame_header(meta: &IrFrameMeta) -> Vec<u8> {
    let mut out = vec![0u8; 10];
    access::set_u32(&mut out, 0, FIELD_ORDER, meta.ir_version);
    access::set_i32(&mut out, 4, FIELD_ORDER, meta.ir_id);
    access::set_u16(&mut out, 8, FIELD_ORDER, meta.schema_version);
    write_string(&mut out, &meta.package_name);
    write_string(&mut out, &meta.namespace_name);
    write_string(&mut out, &meta.semantic_version);
    out
}

fn decode_frame_header(buf: &[u8]) -> Result<(IrFrameMeta, usize), IrError> {
    const FIXED: usize = 10;
    if buf.len() < FIXED {
        return Err(IrError::Truncated { offset: 0 });
    }
    let ir_version = access::get_u32(buf, 0, FIELD_ORDER);
    let ir_id = access::get_i32(buf, 4, FIELD_ORDER);
    let schema_version = access::get_u16(buf, 8, FIELD_ORDER);
    let mut offset = FIXED;
    let (package_name, n) = read_string(buf, offset)?;
    offset += n;
    let (namespace_name, n) = read_string(buf, offset)?;
    offset += n;
    let (semantic_version, n) = read_string(buf, offset)?;
    offset += n;
    Ok((
        IrFrameMeta {
            ir_version,
            ir_id,
            schema_version,
            package_name,
            namespace_name,
            semantic_version,
        },
        offset,
    ))
}

const SIGNAL_TABLE: &[Signal] = &[
    Signal::BeginMessage,
    Signal::EndMessage,
    Signal::BeginComposite,
    Signal::EndComposite,
    Signal::BeginField,
    Signal::EndField,
    Signal::BeginGroup,
    Signal::EndGroup,
    Signal::BeginVarData,
    Signal::EndVarData,
    Signal::BeginEnum,
    Signal::EndEnum,
    Signal::BeginSet,
    Signal::EndSet,
    Signal::ValidValue,
    Signal::Choice,
    Signal::Encoding,
];

fn signal_to_u8(signal: Signal) -> u8 {
    SIGNAL_TABLE.iter().position(|&s| s == signal).expect("exhaustive signal table") as u8
}

fn signal_from_u8(buf: &[u8], offset: usize) -> Result<Signal, IrError> {
    SIGNAL_TABLE
        .get(buf[offset] as usize)
        .copied()
        .ok_or(IrError::Truncated { offset })
}

const PRIMITIVE_TABLE: &[PrimitiveType] = &[
    PrimitiveType::None,
    PrimitiveType::Char,
    PrimitiveType::Int8,
    PrimitiveType::Int16,
    PrimitiveType::Int32,
    PrimitiveType::Int64,
    PrimitiveType::UInt8,
    PrimitiveType::UInt16,
    PrimitiveType::UInt32,
    PrimitiveType::UInt64,
    PrimitiveType::Float,
    PrimitiveType::Double,
];

fn primitive_to_u8(t: PrimitiveType) -> u8 {
    PRIMITIVE_TABLE.iter().position(|&p| p == t).expect("exhaustive primitive table") as u8
}

fn primitive_from_u8(b: u8) -> PrimitiveType {
    PRIMITIVE_TABLE.get(b as usize).copied().unwrap_or(PrimitiveType::None)
}

fn presence_to_u8(p: Presence) -> u8 {
    match p {
        Presence::Required => 0,
        Presence::Optional => 1,
        Presence::Constant => 2,
    }
}

fn presence_from_u8(b: u8) -> Presence {
    match b {
        1 => Presence::Optional,
        2 => Presence::Constant,
        _ => Presence::Required,
    }
}

fn byte_order_to_u8(o: ByteOrder) -> u8 {
    match o {
        ByteOrder::Little => 0,
        ByteOrder::Big => 1,
    }
}

fn byte_order_from_u8(b: u8) -> ByteOrder {
    if b == 1 { ByteOrder::Big } else { ByteOrder::Little }
}

/// Serializes a [`PrimitiveValue`] as `[tag, payload...]`: fixed-width
/// payload for scalars, length-prefixed for `Bytes`/`None`.
fn primitive_value_bytes(value: &PrimitiveValue) -> Vec<u8> {
    match value {
        PrimitiveValue::None => vec![0],
        PrimitiveValue::Int(v) => {
            let mut out = vec![1u8];
            out.extend_from_slice(&v.to_le_bytes());
            out
        }
        PrimitiveValue::UInt(v) => {
            let mut out = vec![2u8];
            out.extend_from_slice(&v.to_le_bytes());
            out
        }
        PrimitiveValue::Double(v) => {
            let mut out = vec![3u8];
            out.extend_from_slice(&v.to_le_bytes());
            out
        }
        PrimitiveValue::Bytes(b) => {
            let mut out = vec![4u8];
            out.extend_from_slice(b);
            out
        }
    }
}

fn primitive_value_from_bytes(bytes: &[u8]) -> PrimitiveValue {
    match bytes.first() {
        None | Some(0) => PrimitiveValue::None,
        Some(1) => PrimitiveValue::Int(i64::from_le_bytes(bytes[1..9].try_into().unwrap())),
        Some(2) => PrimitiveValue::UInt(u64::from_le_bytes(bytes[1..9].try_into().unwrap())),
        Some(3) => PrimitiveValue::Double(f64::from_le_bytes(bytes[1..9].try_into().unwrap())),
        _ => PrimitiveValue::Bytes(bytes[1..].to_vec()),
    }
}

fn write_primitive_value(out: &mut Vec<u8>, value: &PrimitiveValue) {
    let bytes = primitive_value_bytes(value);
    let mut scratch = vec![0u8; 2 + bytes.len()];
    var_data::write_var_data(&mut scratch, &mut crate::buffer::BufferWindow::wrap_for_encode(0, scratch.len(), 0, 0).unwrap(), FIELD_ORDER, LengthWidth::U16, &bytes).unwrap();
    out.extend_from_slice(&scratch);
}

fn read_primitive_value(buf: &[u8], offset: usize) -> Result<(PrimitiveValue, usize), IrError> {
    let mut window = crate::buffer::BufferWindow::wrap_for_decode(offset, buf.len(), 0, 0)?;
    let bytes = var_data::read_var_data(buf, &mut window, FIELD_ORDER, LengthWidth::U16)?;
    Ok((primitive_value_from_bytes(bytes), window.position() - offset))
}

const TOKEN_FIXED_BLOCK: usize = 28;

fn encode_token(token: &Token) -> Vec<u8> {
    let mut out = vec![0u8; TOKEN_FIXED_BLOCK];
    access::set_i32(&mut out, 0, FIELD_ORDER, token.offset);
    access::set_i32(&mut out, 4, FIELD_ORDER, token.id);
    access::set_i32(&mut out, 8, FIELD_ORDER, token.version);
    access::set_i32(&mut out, 12, FIELD_ORDER, token.size);
    access::set_i32(&mut out, 16, FIELD_ORDER, token.component_token_count);
    access::set_i32(&mut out, 20, FIELD_ORDER, token.array_capacity);
    out[24] = signal_to_u8(token.signal);
    out[25] = primitive_to_u8(token.encoding.primitive_type);
    out[26] = presence_to_u8(token.encoding.presence);
    out[27] = byte_order_to_u8(token.encoding.byte_order);

    write_string(&mut out, &token.name);
    write_string(&mut out, &token.description);
    write_string(&mut out, &token.referenced_name);
    write_string(&mut out, &token.encoding.character_encoding);
    write_string(&mut out, &token.encoding.epoch);
    write_string(&mut out, &token.encoding.time_unit);
    write_string(&mut out, &token.encoding.semantic_type);

    write_primitive_value(&mut out, &token.encoding.min_value);
    write_primitive_value(&mut out, &token.encoding.max_value);
    write_primitive_value(&mut out, &token.encoding.null_value);
    write_primitive_value(&mut out, &token.encoding.const_value);
    write_primitive_value(&mut out, &token.encoding.lsb_value);
    write_primitive_value(&mut out, &token.encoding.msb_value);
    out
}

fn decode_token(buf: &[u8], offset: usize) -> Result<(Token, usize), IrError> {
    if offset + TOKEN_FIXED_BLOCK > buf.len() {
        return Err(IrError::Truncated { offset });
    }
    let token_offset = access::get_i32(buf, offset, FIELD_ORDER);
    let id = access::get_i32(buf, offset + 4, FIELD_ORDER);
    let version = access::get_i32(buf, offset + 8, FIELD_ORDER);
    let size = access::get_i32(buf, offset + 12, FIELD_ORDER);
    let component_token_count = access::get_i32(buf, offset + 16, FIELD_ORDER);
    let array_capacity = access::get_i32(buf, offset + 20, FIELD_ORDER);
    let signal = signal_from_u8(buf, offset + 24)?;
    let primitive_type = primitive_from_u8(buf[offset + 25]);
    let presence = presence_from_u8(buf[offset + 26]);
    let byte_order = byte_order_from_u8(buf[offset + 27]);

    let mut cursor = offset + TOKEN_FIXED_BLOCK;
    let (name, n) = read_string(buf, cursor)?;
    cursor += n;
    let (description, n) = read_string(buf, cursor)?;
    cursor += n;
    let (referenced_name, n) = read_string(buf, cursor)?;
    cursor += n;
    let (character_encoding, n) = read_string(buf, cursor)?;
    cursor += n;
    let (epoch, n) = read_string(buf, cursor)?;
    cursor += n;
    let (time_unit, n) = read_string(buf, cursor)?;
    cursor += n;
    let (semantic_type, n) = read_string(buf, cursor)?;
    cursor += n;

    let (min_value, n) = read_primitive_value(buf, cursor)?;
    cursor += n;
    let (max_value, n) = read_primitive_value(buf, cursor)?;
    cursor += n;
    let (null_value, n) = read_primitive_value(buf, cursor)?;
    cursor += n;
    let (const_value, n) = read_primitive_value(buf, cursor)?;
    cursor += n;
    let (lsb_value, n) = read_primitive_value(buf, cursor)?;
    cursor += n;
    let (msb_value, n) = read_primitive_value(buf, cursor)?;
    cursor += n;

    let token = Token {
        offset: token_offset,
        id,
        version,
        size,
        component_token_count,
        array_capacity,
        signal,
        name,
        description,
        referenced_name,
        encoding: Encoding {
            primitive_type,
            presence,
            byte_order,
            min_value,
            max_value,
            null_value,
            const_value,
            lsb_value,
            msb_value,
            character_encoding,
            epoch,
            time_unit,
            semantic_type,
        },
    };
    Ok((token, cursor - offset))
}

#[cfg(test)]
#[path = "codec_tests.rs"]
mod tests;
