//! For every buffer length short of what a message actually needs, both
//! encode and decode must fail with a buffer-shortfall error rather than
//! panicking or silently truncating — swept exhaustively rather than
//! spot-checked at one or two lengths.
use sbe_rs::error::SbeError;
use sbe_rs::flyweight::group::CountWidth;
use sbe_rs::flyweight::var_data::LengthWidth;
use sbe_rs::flyweight::{MessageDecoder, MessageEncoder};
use sbe_rs::primitive::access;
use sbe_rs::primitive::types::ByteOrder;

const BLOCK_LENGTH: u32 = 8;
const ENTRY_BLOCK_LENGTH: u16 = 4;
const VAR_DATA: &[u8] = b"hi";

fn encode_into(buf: &mut [u8]) -> Result<usize, SbeError> {
    let mut enc = MessageEncoder::wrap(buf, 0, BLOCK_LENGTH, 0)?;
    access::set_u32_checked(enc.buf_mut(), 0, ByteOrder::Little, 7).map_err(SbeError::from)?;
    access::set_u32_checked(enc.buf_mut(), 4, ByteOrder::Little, 8).map_err(SbeError::from)?;

    let mut group = enc.group(ByteOrder::Little, CountWidth::U16, ENTRY_BLOCK_LENGTH, 2, 0, 10)?;
    for i in 0..2u32 {
        let mut entry = group.next()?;
        access::set_u32_checked(entry.buf_mut(), entry.entry_offset(), ByteOrder::Little, i)
            .map_err(SbeError::from)?;
    }
    drop(group);

    enc.var_data(ByteOrder::Little, LengthWidth::U8, VAR_DATA)?;
    Ok(enc.encoded_length())
}

fn decode_from(buf: &[u8]) -> Result<(), SbeError> {
    let mut dec = MessageDecoder::wrap(buf, 0, BLOCK_LENGTH, 0)?;
    let _ = access::get_u32_checked(dec.buf(), 0, ByteOrder::Little)?;
    let mut group = dec.group(ByteOrder::Little, CountWidth::U16)?;
    while group.has_next() {
        let _ = group.next()?;
    }
    drop(group);
    dec.var_data(ByteOrder::Little, LengthWidth::U8)?;
    Ok(())
}

#[test]
fn test_required_length_encodes_and_decodes_successfully() {
    let mut buf = [0u8; 64];
    let total = encode_into(&mut buf).unwrap();
    assert!(decode_from(&buf[..total]).is_ok());
}

#[test]
fn test_every_shorter_length_fails_both_encode_and_decode() {
    let mut full = [0u8; 64];
    let total = encode_into(&mut full).unwrap();

    for len in 0..total {
        let mut short = vec![0u8; len];
        assert!(
            encode_into(&mut short).is_err(),
            "encode unexpectedly succeeded at length {len} (needs {total})"
        );
        assert!(
            decode_from(&full[..len]).is_err(),
            "decode unexpectedly succeeded at length {len} (needs {total})"
        );
    }
}
