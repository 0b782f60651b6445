//! Inbound and outbound mongrel2 messages.
//!
//! An inbound frame looks like
//! `<sender_id> <connection_id> <path> <len>:<json headers>,<len>:<body>,`
//! and decodes into an [`Envelope`]. The reply travels back as a [`Reply`],
//! `<sender_id> <len>:<connection_id>, <http response bytes>`.

use std::collections::HashMap;

use bytes::Bytes;

/// Flat header map as carried in the envelope's JSON block.
///
/// Besides real request headers it holds the synthetic keys mongrel2 adds,
/// such as `METHOD`, `VERSION` and `URI`.
pub type HeaderMap = HashMap<String, String>;

/// One decoded request message from the front end.
#[derive(Debug, Clone)]
pub struct Envelope {
    sender_id: Bytes,
    connection_id: Bytes,
    path: Bytes,
    headers: HeaderMap,
    body: Bytes,
}

impl Envelope {
    pub fn new(sender_id: Bytes, connection_id: Bytes, path: Bytes, headers: HeaderMap, body: Bytes) -> Self {
        Self { sender_id, connection_id, path, headers, body }
    }

    /// The front-end process that sent this message.
    pub fn sender_id(&self) -> &Bytes {
        &self.sender_id
    }

    /// The client connection the reply must be routed to.
    pub fn connection_id(&self) -> &Bytes {
        &self.connection_id
    }

    /// The route pattern mongrel2 matched, informational only.
    pub fn path(&self) -> &Bytes {
        &self.path
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn body(&self) -> &Bytes {
        &self.body
    }

    /// Splits the envelope into its routing tokens, header map and body.
    pub fn into_parts(self) -> (Route, HeaderMap, Bytes) {
        let route = Route { sender_id: self.sender_id, connection_id: self.connection_id };
        (route, self.headers, self.body)
    }
}

/// The part of an envelope needed to address the reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub sender_id: Bytes,
    pub connection_id: Bytes,
}

/// An outbound reply frame waiting to be encoded.
#[derive(Debug, Clone)]
pub struct Reply {
    pub route: Route,
    pub payload: Bytes,
}

impl Reply {
    pub fn new(route: Route, payload: Bytes) -> Self {
        Self { route, payload }
    }
}
