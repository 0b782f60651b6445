use bytes::{Bytes, BytesMut};
use tracing::{debug, error, info};

use crate::codec::{ReplyEncoder, decode_frame};
use crate::handler::Handler;
use crate::protocol::{M2Error, ParseError, Reply, RequestConfig, ResponseCollector};
use crate::transport::Transport;

/// The serve loop between mongrel2 and a [`Handler`].
///
/// `M2Connection` owns the pull side the requests arrive on and the publish
/// side the replies leave on. Messages are handled strictly one at a time:
/// - Receiving and decoding the envelope
/// - Building the request
/// - Running the handler to completion
/// - Encoding and publishing the reply
///
/// A message that can't be decoded or built is logged and dropped, mongrel2
/// times the client connection out on its own.
///
/// # Type Parameters
///
/// * `P`: The transport requests are pulled from
/// * `S`: The transport replies are published on
#[derive(Debug)]
pub struct M2Connection<P, S> {
    pull: P,
    publish: S,
    request_config: RequestConfig,
    encoder: ReplyEncoder,
}

impl<P, S> M2Connection<P, S>
where
    P: Transport,
    S: Transport,
{
    pub fn new(pull: P, publish: S) -> Self {
        Self::with_config(pull, publish, RequestConfig::default())
    }

    pub fn with_config(pull: P, publish: S, request_config: RequestConfig) -> Self {
        Self { pull, publish, request_config, encoder: ReplyEncoder }
    }

    /// Runs until the pull transport fails.
    ///
    /// Always returns an error, since losing the pull side is the only way out
    /// of the loop.
    pub async fn process<H: Handler>(mut self, handler: H) -> Result<(), M2Error> {
        loop {
            let frame = match self.pull.receive().await {
                Ok(frame) => frame,
                Err(e) => {
                    info!(cause = %e, "can't receive more messages, stop serving");
                    return Err(e.into());
                }
            };

            let reply = match self.process_frame(&frame, &handler) {
                Ok(reply) => reply,
                Err(e) => {
                    error!(cause = %e, "drop message");
                    continue;
                }
            };

            if let Err(e) = self.publish.send(reply).await {
                error!(cause = %e, "can't send reply");
            }
        }
    }

    /// Turns one inbound frame into the reply frame to publish.
    pub fn process_frame<H: Handler>(&mut self, frame: &Bytes, handler: &H) -> Result<Bytes, ParseError> {
        let envelope = decode_frame(frame)?;

        let (route, params, body) = envelope.into_parts();
        let request = self.request_config.build(&params, body)?;
        debug!(method = %request.method(), uri = %request.uri(), "handle request");

        let mut response = ResponseCollector::new();
        handler.handle(request, &mut response);
        response.finish();

        let mut dst = BytesMut::new();
        self.encoder.encode_reply(Reply::new(route, response.into_bytes()), &mut dst);
        Ok(dst.freeze())
    }
}
