//! Decoder turning one raw inbound frame into an [`Envelope`].
//!
//! # Example
//!
//! ```
//! use bytes::BytesMut;
//! use micro_m2::codec::EnvelopeDecoder;
//! use tokio_util::codec::Decoder;
//!
//! let mut frame = BytesMut::from(&b"U1 C1 /path 16:{\"METHOD\":\"GET\"},0:,"[..]);
//! let envelope = EnvelopeDecoder.decode(&mut frame).unwrap().unwrap();
//!
//! assert_eq!(&envelope.connection_id()[..], b"C1");
//! assert_eq!(envelope.headers()["METHOD"], "GET");
//! ```

use bytes::{Bytes, BytesMut};
use tokio_util::codec::Decoder;
use tracing::trace;

use crate::codec::netstring;
use crate::ensure;
use crate::protocol::{Envelope, HeaderMap, ParseError};

const FIELD_NUM: usize = 4;

/// Decoder for inbound mongrel2 frames implementing the [`Decoder`] trait.
///
/// The transport already hands out whole frames, so a non-empty source buffer
/// is always treated as exactly one message and consumed completely, no matter
/// whether decoding succeeds.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvelopeDecoder;

impl Decoder for EnvelopeDecoder {
    type Item = Envelope;
    type Error = ParseError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        if src.is_empty() {
            return Ok(None);
        }

        let frame = src.split().freeze();
        decode_frame(&frame).map(Some)
    }
}

/// Decodes a complete frame; token fields share the frame's memory.
pub fn decode_frame(frame: &Bytes) -> Result<Envelope, ParseError> {
    let fields = frame.splitn(FIELD_NUM, |&b| b == b' ').collect::<Vec<_>>();
    ensure!(fields.len() == FIELD_NUM, ParseError::malformed_envelope(fields.len()));

    let sender = frame.slice_ref(fields[0]);
    let connection = frame.slice_ref(fields[1]);
    let path = frame.slice_ref(fields[2]);
    let payload = frame.slice_ref(fields[3]);

    let (header_json, consumed) = netstring::decode(&payload)?;
    let headers: HeaderMap = serde_json::from_slice(header_json)?;

    let (body, _) = netstring::decode(&payload[consumed..])?;
    let body = payload.slice_ref(body);

    trace!(
        sender_id = ?sender,
        connection_id = ?connection,
        header_num = headers.len(),
        body_size = body.len(),
        "decoded envelope"
    );

    Ok(Envelope::new(sender, connection, path, headers, body))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(headers: &str, body: &[u8]) -> BytesMut {
        let mut frame = BytesMut::from(&b"U1 C1 /path "[..]);
        netstring::encode_to(headers.as_bytes(), &mut frame);
        netstring::encode_to(body, &mut frame);
        frame
    }

    #[test]
    fn test_decode_get() {
        let mut buf = frame(r#"{"METHOD":"GET"}"#, b"");

        let envelope = EnvelopeDecoder.decode(&mut buf).unwrap().unwrap();

        assert!(buf.is_empty());
        assert_eq!(&envelope.sender_id()[..], b"U1");
        assert_eq!(&envelope.connection_id()[..], b"C1");
        assert_eq!(&envelope.path()[..], b"/path");
        assert_eq!(envelope.headers().len(), 1);
        assert_eq!(envelope.headers()["METHOD"], "GET");
        assert!(envelope.body().is_empty());
    }

    #[test]
    fn test_decode_literal_frame() {
        let mut buf = BytesMut::from(&b"U1 C1 /path 16:{\"METHOD\":\"GET\"},0:,"[..]);

        let envelope = EnvelopeDecoder.decode(&mut buf).unwrap().unwrap();

        assert_eq!(envelope.headers()["METHOD"], "GET");
        assert!(envelope.body().is_empty());
    }

    #[test]
    fn test_decode_body_with_spaces() {
        let mut buf = frame(r#"{"METHOD":"POST","content-type":"text/plain"}"#, b"a body with spaces, and a comma");

        let envelope = EnvelopeDecoder.decode(&mut buf).unwrap().unwrap();

        assert_eq!(envelope.headers()["content-type"], "text/plain");
        assert_eq!(&envelope.body()[..], b"a body with spaces, and a comma");
    }

    #[test]
    fn test_empty_buffer() {
        let mut buf = BytesMut::new();
        assert!(EnvelopeDecoder.decode(&mut buf).unwrap().is_none());
    }

    #[test]
    fn test_too_few_fields() {
        let mut buf = BytesMut::from(&b"U1 C1 /path"[..]);
        let result = EnvelopeDecoder.decode(&mut buf);
        assert!(matches!(result, Err(ParseError::MalformedEnvelope { fields: 3 })));
        assert!(buf.is_empty());
    }

    #[test]
    fn test_bad_header_json() {
        let mut buf = frame("{not json", b"");
        assert!(matches!(EnvelopeDecoder.decode(&mut buf), Err(ParseError::MalformedHeaders { .. })));
    }

    #[test]
    fn test_non_string_header_value() {
        let mut buf = frame(r#"{"METHOD":"GET","x-count":3}"#, b"");
        assert!(matches!(EnvelopeDecoder.decode(&mut buf), Err(ParseError::MalformedHeaders { .. })));

        let mut buf = frame(r#"["METHOD","GET"]"#, b"");
        assert!(matches!(EnvelopeDecoder.decode(&mut buf), Err(ParseError::MalformedHeaders { .. })));
    }

    #[test]
    fn test_bad_netstring() {
        let mut buf = BytesMut::from(&b"U1 C1 /path 99:{},0:,"[..]);
        assert!(matches!(EnvelopeDecoder.decode(&mut buf), Err(ParseError::Framing { .. })));

        // body netstring is missing entirely
        let mut buf = BytesMut::from(&b"U1 C1 /path 2:{},"[..]);
        assert!(matches!(EnvelopeDecoder.decode(&mut buf), Err(ParseError::Framing { .. })));
    }

    #[tokio::test]
    async fn test_framed_read_io_error() {
        use std::io;
        use std::pin::Pin;
        use std::task::{Context, Poll};

        use futures::StreamExt;
        use tokio::io::{AsyncRead, ReadBuf};
        use tokio_util::codec::FramedRead;

        struct ResetReader;

        impl AsyncRead for ResetReader {
            fn poll_read(self: Pin<&mut Self>, _cx: &mut Context<'_>, _buf: &mut ReadBuf<'_>) -> Poll<io::Result<()>> {
                Poll::Ready(Err(io::Error::from(io::ErrorKind::ConnectionReset)))
            }
        }

        let mut framed = FramedRead::new(ResetReader, EnvelopeDecoder);
        let item = framed.next().await;
        assert!(matches!(item, Some(Err(ParseError::Io { .. }))));
    }
}
