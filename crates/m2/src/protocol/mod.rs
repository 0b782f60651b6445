//! Core mongrel2 protocol types.
//!
//! # Architecture
//!
//! - **Messages** ([`envelope`]): what travels over the transport
//!   - [`Envelope`]: a decoded inbound request message
//!   - [`Reply`]: an outbound response message and its [`Route`]
//!
//! - **Request Processing** ([`request`]): from header map to request
//!   - [`Request`]: the structured request handed to handlers
//!   - [`RequestConfig`]: url scheme and [`ReservedHeaders`]
//!   - [`ProtocolVersion`]: the `HTTP/major.minor` version
//!
//! - **Response Processing** ([`response`]):
//!   - [`ResponseCollector`]: buffers status, headers and body
//!
//! - **Headers** ([`header`]): [`Headers`], a case preserving multimap
//!
//! - **Error Handling** ([`error`]):
//!   - [`M2Error`]: Top-level error type
//!   - [`ParseError`]: Per message decoding errors
//!   - [`TransportError`]: Receive and send errors

pub mod envelope;
pub use envelope::Envelope;
pub use envelope::HeaderMap;
pub use envelope::Reply;
pub use envelope::Route;

pub mod header;
pub use header::Headers;

mod version;
pub use version::ProtocolVersion;

pub mod request;
pub use request::Request;
pub use request::RequestConfig;
pub use request::ReservedHeaders;

pub mod response;
pub use response::ResponseCollector;

pub mod error;
pub use error::M2Error;
pub use error::ParseError;
pub use error::TransportError;
