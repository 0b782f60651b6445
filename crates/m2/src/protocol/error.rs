use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum M2Error {
    #[error("request error: {source}")]
    RequestError {
        #[from]
        source: ParseError,
    },

    #[error("transport error: {source}")]
    TransportError {
        #[from]
        source: TransportError,
    },
}

/// Errors that only affect the message being decoded.
///
/// The serve loop drops the offending message and keeps running when one of
/// these is returned.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("invalid netstring: {reason}")]
    Framing { reason: String },

    #[error("malformed envelope: expect 4 space separated fields, found {fields}")]
    MalformedEnvelope { fields: usize },

    #[error("malformed header block: {source}")]
    MalformedHeaders {
        #[from]
        source: serde_json::Error,
    },

    #[error("no METHOD in header block")]
    MissingMethod,

    #[error("invalid http method: {method}")]
    InvalidMethod { method: String },

    #[error("invalid protocol version: {version:?}")]
    InvalidProtocolVersion { version: String },

    #[error("invalid content-length header: {reason}")]
    InvalidContentLength { reason: String },

    #[error("invalid url: {reason}")]
    InvalidUrl { reason: String },

    /// Read failure of a `FramedRead` driving [`EnvelopeDecoder`](crate::codec::EnvelopeDecoder).
    #[error("io error: {source}")]
    Io {
        #[from]
        source: io::Error,
    },
}

impl ParseError {
    pub fn framing<S: ToString>(str: S) -> Self {
        Self::Framing { reason: str.to_string() }
    }

    pub fn malformed_envelope(fields: usize) -> Self {
        Self::MalformedEnvelope { fields }
    }

    pub fn invalid_method<S: ToString>(str: S) -> Self {
        Self::InvalidMethod { method: str.to_string() }
    }

    pub fn invalid_protocol_version<S: ToString>(str: S) -> Self {
        Self::InvalidProtocolVersion { version: str.to_string() }
    }

    pub fn invalid_content_length<S: ToString>(str: S) -> Self {
        Self::InvalidContentLength { reason: str.to_string() }
    }

    pub fn invalid_url<S: ToString>(str: S) -> Self {
        Self::InvalidUrl { reason: str.to_string() }
    }
}

#[derive(Error, Debug)]
pub enum TransportError {
    #[error("transport closed")]
    Closed,

    #[error("io error: {source}")]
    Io {
        #[from]
        source: io::Error,
    },
}

impl TransportError {
    pub fn io<E: Into<io::Error>>(e: E) -> Self {
        Self::Io { source: e.into() }
    }
}
