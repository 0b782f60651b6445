//! The message transport between mongrel2 and this crate.
//!
//! Mongrel2 pushes requests on a PUSH socket and subscribes to replies on a
//! SUB socket; a handler process holds the matching PULL and PUB ends. This
//! crate does not bind a messaging library itself. Anything that can move
//! whole frames implements [`Transport`], and [`ChannelTransport`] is an in
//! process implementation used for tests and local wiring.

use bytes::Bytes;

use crate::protocol::TransportError;

mod channel;

pub use channel::ChannelTransport;

/// A socket moving whole, opaque frames.
///
/// The serve loop owns one transport for receiving requests and another one
/// for publishing replies.
#[trait_variant::make(Transport: Send)]
pub trait LocalTransport {
    /// Connects the socket to `address`, called once before the first receive or send.
    async fn connect(&mut self, address: &str) -> Result<(), TransportError>;

    /// Waits for the next frame.
    ///
    /// An error here means no more frames will arrive.
    async fn receive(&mut self) -> Result<Bytes, TransportError>;

    async fn send(&mut self, frame: Bytes) -> Result<(), TransportError>;

    /// Sets the socket identity mongrel2 sees for this handler, before `connect`.
    fn set_identity(&mut self, _identity: &str) {}
}
