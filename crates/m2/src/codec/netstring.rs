//! Netstring framing, `<decimal length>:<payload>,`.
//!
//! Both directions of the mongrel2 protocol lean on netstrings: the inbound
//! payload region carries two of them back to back (header JSON, then body)
//! and the reply frame wraps the connection id in one.

use bytes::{BufMut, Bytes, BytesMut};

use crate::ensure;
use crate::protocol::ParseError;

const COLON: u8 = b':';
const COMMA: u8 = b',';

/// Decodes the netstring at the start of `src`.
///
/// Returns the payload and the total number of bytes consumed, so the next
/// netstring in the same buffer starts at `src[consumed..]`.
///
/// # Errors
///
/// Returns [`ParseError::Framing`] if:
/// - there is no colon
/// - the length prefix is empty or not made of decimal digits
/// - fewer bytes than the declared length follow the colon
/// - the payload is not followed by a comma
pub fn decode(src: &[u8]) -> Result<(&[u8], usize), ParseError> {
    let colon = src.iter().position(|&b| b == COLON).ok_or_else(|| ParseError::framing("missing colon"))?;

    let prefix = &src[..colon];
    ensure!(!prefix.is_empty() && prefix.iter().all(u8::is_ascii_digit), ParseError::framing("length prefix is not a number"));

    // only ascii digits left, so the str conversion can't fail, but the number can still overflow
    let length = std::str::from_utf8(prefix)
        .ok()
        .and_then(|s| s.parse::<usize>().ok())
        .ok_or_else(|| ParseError::framing("length prefix is too large"))?;

    let start = colon + 1;
    let remaining = src.len() - start;
    ensure!(
        length <= remaining,
        ParseError::framing(format!("declared length {length} exceeds the {remaining} available bytes"))
    );

    let end = start + length;
    ensure!(src.get(end) == Some(&COMMA), ParseError::framing("missing comma terminator"));

    Ok((&src[start..end], end + 1))
}

/// Appends the netstring form of `payload` to `dst`.
pub fn encode_to(payload: &[u8], dst: &mut BytesMut) {
    let length = payload.len().to_string();
    dst.reserve(length.len() + payload.len() + 2);
    dst.put_slice(length.as_bytes());
    dst.put_u8(COLON);
    dst.put_slice(payload);
    dst.put_u8(COMMA);
}

/// Returns the netstring form of `payload`.
pub fn encode(payload: &[u8]) -> Bytes {
    let mut dst = BytesMut::new();
    encode_to(payload, &mut dst);
    dst.freeze()
}
