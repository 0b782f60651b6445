use bytes::{BufMut, BytesMut};
use tokio_util::codec::Encoder;

use crate::codec::netstring;
use crate::protocol::{Reply, TransportError};

/// Encoder for outbound reply frames,
/// `<sender_id> <len>:<connection_id>, <payload>`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReplyEncoder;

impl ReplyEncoder {
    /// Appends `reply` to `dst`. Encoding into memory can't fail.
    pub fn encode_reply(&self, reply: Reply, dst: &mut BytesMut) {
        let Reply { route, payload } = reply;

        dst.reserve(route.sender_id.len() + route.connection_id.len() + payload.len() + 24);
        dst.put_slice(&route.sender_id);
        dst.put_u8(b' ');
        netstring::encode_to(&route.connection_id, dst);
        dst.put_u8(b' ');
        dst.put_slice(&payload);
    }
}

/// Used by `FramedWrite` style sinks, whose io failures surface as
/// [`TransportError::Io`].
impl Encoder<Reply> for ReplyEncoder {
    type Error = TransportError;

    fn encode(&mut self, item: Reply, dst: &mut BytesMut) -> Result<(), Self::Error> {
        self.encode_reply(item, dst);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use bytes::Bytes;

    use super::*;
    use crate::protocol::Route;

    #[test]
    fn test_encode() {
        let route = Route { sender_id: Bytes::from_static(b"U1"), connection_id: Bytes::from_static(b"C1") };
        let reply = Reply::new(route, Bytes::from_static(b"HTTP/1.1 200 OK\r\n\r\nhi"));

        let mut dst = BytesMut::new();
        ReplyEncoder.encode(reply, &mut dst).unwrap();

        assert_eq!(&dst[..], b"U1 2:C1, HTTP/1.1 200 OK\r\n\r\nhi");
    }

    #[test]
    fn test_encode_appends() {
        let route = Route { sender_id: Bytes::from_static(b"sender"), connection_id: Bytes::from_static(b"42") };

        let mut dst = BytesMut::new();
        ReplyEncoder.encode_reply(Reply::new(route.clone(), Bytes::from_static(b"a")), &mut dst);
        ReplyEncoder.encode_reply(Reply::new(route, Bytes::new()), &mut dst);

        assert_eq!(&dst[..], b"sender 2:42, asender 2:42, ");
    }

    #[tokio::test]
    async fn test_framed_write() {
        use futures::SinkExt;
        use tokio_util::codec::FramedWrite;

        let route = Route { sender_id: Bytes::from_static(b"U1"), connection_id: Bytes::from_static(b"7") };

        let mut sink = FramedWrite::new(Vec::new(), ReplyEncoder);
        sink.send(Reply::new(route, Bytes::from_static(b"ok"))).await.unwrap();

        assert_eq!(sink.get_ref(), b"U1 1:7, ok");
    }
}
