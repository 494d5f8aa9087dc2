//! Message-level wrap/field-presence/group-and-var-data delegation tests.
use super::*;
use crate::flyweight::var_data::LengthWidth;
use crate::primitive::access;

#[test]
fn test_wrap_for_encode_then_decode_same_layout() {
    let mut buf = [0u8; 32];
    {
        let mut enc = MessageEncoder::wrap(&mut buf, 0, 16, 1).unwrap();
        access::set_u32(enc.buf_mut(), 0, ByteOrder::Little, 42);
        assert_eq!(enc.encoded_length(), 16);
    }
    let dec = MessageDecoder::wrap(&buf, 0, 16, 1).unwrap();
    assert_eq!(access::get_u32(dec.buf(), 0, ByteOrder::Little), 42);
    assert_eq!(dec.acting_version(), 1);
    assert_eq!(dec.acting_block_length(), 16);
}

#[test]
fn test_field_present_false_when_token_version_exceeds_acting_version() {
    let dec = MessageDecoder::wrap(&[0u8; 32], 0, 16, 0).unwrap();
    assert!(!dec.field_present(1, 8, 4));
    assert!(dec.field_present(0, 8, 4));
}

#[test]
fn test_field_present_false_when_field_beyond_acting_block_length() {
    // An older sender wrote only 8 bytes of fixed block; a field this
    // decoder's schema places at offset 12 was never written.
    let dec = MessageDecoder::wrap(&[0u8; 32], 0, 8, 0).unwrap();
    assert!(!dec.field_present(0, 12, 4));
    assert!(dec.field_present(0, 4, 4));
}

#[test]
fn test_message_group_and_var_data_delegation() {
    let mut buf = [0u8; 64];
    {
        let mut enc = MessageEncoder::wrap(&mut buf, 0, 4, 0).unwrap();
        {
            let mut group = enc
                .group(ByteOrder::Little, crate::flyweight::group::CountWidth::U16, 2, 1, 0, 4)
                .unwrap();
            let mut entry = group.next().unwrap();
            access::set_u16(entry.buf_mut(), entry.entry_offset(), ByteOrder::Little, 9);
        }
        enc.var_data(ByteOrder::Little, LengthWidth::U16, b"ok").unwrap();
    }

    let mut dec = MessageDecoder::wrap(&buf, 0, 4, 0).unwrap();
    {
        let mut group = dec.group(ByteOrder::Little, crate::flyweight::group::CountWidth::U16).unwrap();
        let entry = group.next().unwrap();
        assert_eq!(access::get_u16(entry.buf(), entry.entry_offset(), ByteOrder::Little), 9);
    }
    let tail = dec.var_data(ByteOrder::Little, LengthWidth::U16).unwrap();
    assert_eq!(tail, b"ok");
}
