//! Mongrel2 wire codecs
//!
//! This module converts between the raw frames the transport moves and the
//! structured messages the rest of the crate works with.
//!
//! # Components
//!
//! - [`netstring`]: the `<len>:<bytes>,` framing used on both directions
//! - [`EnvelopeDecoder`]: decodes an inbound frame into an
//!   [`Envelope`](crate::protocol::Envelope)
//! - [`ReplyEncoder`]: encodes a [`Reply`](crate::protocol::Reply) into an
//!   outbound frame
//!
//! Both codecs implement the `tokio_util` codec traits and work on
//! [`BytesMut`](bytes::BytesMut) buffers.

pub mod netstring;

mod envelope_decoder;
mod reply_encoder;

pub use envelope_decoder::EnvelopeDecoder;
pub use envelope_decoder::decode_frame;
pub use reply_encoder::ReplyEncoder;
