//! A two-entry group of `(tagGroup1: u64, tagGroup2: i64)` pairs, values
//! `(10, 20)` and `(30, 40)`, prefixed by a standard message header.
//! Exercises both decode paths this crate offers: the flyweight API
//! directly, and the IR-token-driven OTF walk, checking the OTF walk
//! emits exactly one `on_group_header` followed by the four `on_encoding`
//! callbacks in entry order.
use sbe_rs::flyweight::group::CountWidth;
use sbe_rs::flyweight::{MessageDecoder, MessageEncoder};
use sbe_rs::ir::header::{HeaderEncoder, HeaderView};
use sbe_rs::ir::token::{Encoding, Signal, Token};
use sbe_rs::otf::{decode_message, Visitor};
use sbe_rs::primitive::access;
use sbe_rs::primitive::types::{ByteOrder, Presence, PrimitiveType, PrimitiveValue};

const TEMPLATE_ID: u16 = 1;
const SCHEMA_ID: u16 = 1;
const SCHEMA_VERSION: u16 = 0;
const ROOT_BLOCK_LENGTH: u32 = 0;
const ENTRY_BLOCK_LENGTH: u16 = 16;

fn encode(buf: &mut [u8]) -> (usize, usize) {
    HeaderEncoder::wrap(buf, 0)
        .block_length(ROOT_BLOCK_LENGTH as u16)
        .template_id(TEMPLATE_ID)
        .schema_id(SCHEMA_ID)
        .version(SCHEMA_VERSION);
    let header_len = HeaderView::ENCODED_LENGTH;

    let mut enc = MessageEncoder::wrap(&mut buf[header_len..], 0, ROOT_BLOCK_LENGTH, SCHEMA_VERSION).unwrap();
    let mut entries = enc
        .group(ByteOrder::Little, CountWidth::U16, ENTRY_BLOCK_LENGTH, 2, 0, 10)
        .unwrap();

    let mut e0 = entries.next().unwrap();
    access::set_u64(e0.buf_mut(), e0.entry_offset(), ByteOrder::Little, 10);
    access::set_i64(e0.buf_mut(), e0.entry_offset() + 8, ByteOrder::Little, 20);

    let mut e1 = entries.next().unwrap();
    access::set_u64(e1.buf_mut(), e1.entry_offset(), ByteOrder::Little, 30);
    access::set_i64(e1.buf_mut(), e1.entry_offset() + 8, ByteOrder::Little, 40);

    drop(entries);
    (header_len, enc.encoded_length())
}

#[test]
fn test_flyweight_round_trip() {
    let mut buf = [0u8; 128];
    let (header_len, body_len) = encode(&mut buf);

    let hdr = HeaderView::wrap(&buf, 0);
    assert_eq!(hdr.template_id(), TEMPLATE_ID);
    assert_eq!(hdr.schema_id(), SCHEMA_ID);
    assert_eq!(hdr.version(), SCHEMA_VERSION);

    let mut dec = MessageDecoder::wrap(&buf[header_len..], 0, ROOT_BLOCK_LENGTH, SCHEMA_VERSION).unwrap();
    let mut entries = dec.group(ByteOrder::Little, CountWidth::U16).unwrap();
    assert_eq!(entries.count(), 2);

    let e0 = entries.next().unwrap();
    assert_eq!(access::get_u64(e0.buf(), e0.entry_offset(), ByteOrder::Little), 10);
    assert_eq!(access::get_i64(e0.buf(), e0.entry_offset() + 8, ByteOrder::Little), 20);

    let e1 = entries.next().unwrap();
    assert_eq!(access::get_u64(e1.buf(), e1.entry_offset(), ByteOrder::Little), 30);
    assert_eq!(access::get_i64(e1.buf(), e1.entry_offset() + 8, ByteOrder::Little), 40);

    assert_eq!(dec.encoded_length(), body_len);
}

fn encoding_token(name: &str, offset: i32, primitive_type: PrimitiveType) -> Token {
    Token {
        offset,
        id: -1,
        version: 0,
        size: primitive_type.size() as i32,
        component_token_count: 1,
        array_capacity: 1,
        signal: Signal::Encoding,
        name: name.to_string(),
        description: String::new(),
        referenced_name: String::new(),
        encoding: Encoding {
            primitive_type,
            presence: Presence::Required,
            byte_order: ByteOrder::Little,
            min_value: PrimitiveValue::None,
            max_value: PrimitiveValue::None,
            null_value: PrimitiveValue::None,
            const_value: PrimitiveValue::None,
            lsb_value: PrimitiveValue::None,
            msb_value: PrimitiveValue::None,
            character_encoding: String::new(),
            epoch: String::new(),
            time_unit: String::new(),
            semantic_type: String::new(),
        },
    }
}

fn bracket(signal: Signal, name: &str) -> Token {
    let mut t = encoding_token(name, -1, PrimitiveType::None);
    t.signal = signal;
    t.size = -1;
    t
}

fn field(name: &str, inner: Token) -> Vec<Token> {
    let mut begin = bracket(Signal::BeginField, name);
    let mut end = bracket(Signal::EndField, name);
    begin.component_token_count = 3;
    end.component_token_count = 3;
    vec![begin, inner, end]
}

fn message_tokens() -> Vec<Token> {
    let mut tokens = vec![bracket(Signal::BeginMessage, "TestMessage1")];
    let mut group = vec![bracket(Signal::BeginGroup, "entries")];
    group.extend(field("tagGroup1", encoding_token("tagGroup1", 0, PrimitiveType::UInt64)));
    group.extend(field("tagGroup2", encoding_token("tagGroup2", 8, PrimitiveType::Int64)));
    group.push(bracket(Signal::EndGroup, "entries"));
    let group_len = group.len() as i32;
    group[0].component_token_count = group_len;
    let last = group.len() - 1;
    group[last].component_token_count = group_len;
    tokens.extend(group);
    tokens.push(bracket(Signal::EndMessage, "TestMessage1"));
    let len = tokens.len() as i32;
    tokens[0].component_token_count = len;
    let last = tokens.len() - 1;
    tokens[last].component_token_count = len;
    tokens
}

#[derive(Default)]
struct CountingVisitor {
    events: Vec<String>,
}

impl Visitor for CountingVisitor {
    fn on_group_header(&mut self, token: &Token, count: u32) {
        self.events.push(format!("group_header:{}:{count}", token.name));
    }
    fn on_encoding(&mut self, token: &Token, _offset: usize, raw: u64) {
        self.events.push(format!("encoding:{}:{raw}", token.name));
    }
}

#[test]
fn test_otf_walk_emits_one_group_header_then_four_encodings_in_order() {
    let mut buf = [0u8; 128];
    let (header_len, body_len) = encode(&mut buf);
    let tokens = message_tokens();

    let mut visitor = CountingVisitor::default();
    let consumed = decode_message(&buf[header_len..], &tokens, 0, ROOT_BLOCK_LENGTH, SCHEMA_VERSION, &mut visitor).unwrap();
    assert_eq!(consumed, body_len);

    assert_eq!(
        visitor.events,
        vec![
            "group_header:entries:2".to_string(),
            "encoding:tagGroup1:10".to_string(),
            "encoding:tagGroup2:20".to_string(),
            "encoding:tagGroup1:30".to_string(),
            "encoding:tagGroup2:40".to_string(),
        ]
    );
}
