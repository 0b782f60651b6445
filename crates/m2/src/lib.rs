//! Run HTTP handlers behind the mongrel2 front-end server
//!
//! Mongrel2 accepts HTTP connections itself and forwards each request to
//! handler processes as a message over a messaging transport. This crate
//! translates between those messages and a plain "request in, response out"
//! handler:
//!
//! - an inbound frame `<sender> <conn_id> <path> <len>:<json headers>,<len>:<body>,`
//!   is decoded and turned into a [`protocol::Request`]
//! - the handler writes status, headers and body into a
//!   [`protocol::ResponseCollector`]
//! - the buffered HTTP response goes back as
//!   `<sender> <len>:<conn_id>, <http response>`
//!
//! # Example
//!
//! ```no_run
//! use micro_m2::handler::make_handler;
//! use micro_m2::protocol::{Request, ResponseCollector};
//! use micro_m2::server::Server;
//! use micro_m2::transport::ChannelTransport;
//!
//! #[tokio::main]
//! async fn main() {
//!     let server = Server::builder()
//!         .identity("82209006-86FF-4982-B5EA-D1E29E55D481")
//!         .pull_address("tcp://127.0.0.1:9997")
//!         .publish_address("tcp://127.0.0.1:9996")
//!         .build()
//!         .unwrap();
//!
//!     // any `Transport` implementation works here, e.g. one backed by zeromq sockets
//!     let (_requests, pull) = ChannelTransport::pair(64);
//!     let (_replies, publish) = ChannelTransport::pair(64);
//!
//!     let handler = make_handler(|request: Request, response: &mut ResponseCollector| {
//!         response.headers_mut().insert("Content-Type", "text/plain");
//!         response.write(format!("hello {}", request.uri().path()));
//!     });
//!
//!     let _ = server.start(pull, publish, handler).await;
//! }
//! ```
//!
//! # Architecture
//!
//! - [`codec`]: netstrings, the envelope decoder and the reply encoder
//! - [`protocol`]: requests, the response collector, headers and errors
//! - [`handler`]: the [`handler::Handler`] trait and [`handler::make_handler`]
//! - [`transport`]: the [`transport::Transport`] trait and an in-process implementation
//! - [`connection`]: [`connection::M2Connection`], the serve loop
//! - [`server`]: builder based configuration on top of the serve loop
//!
//! # Error Handling
//!
//! A message that fails to decode is logged and dropped, the loop carries on
//! with the next one and mongrel2 times the client out. Only a failing pull
//! transport ends the loop.
//!
//! # Limitations
//!
//! - One message at a time, a handler that never returns stalls the loop
//! - `Content-Length` is taken from the first write, later writes only append
//! - Cookies are not parsed, `Cookie` reaches the handler as a raw header

pub mod codec;
pub mod connection;
pub mod handler;
pub mod protocol;
pub mod server;
pub mod transport;

mod utils;
pub(crate) use utils::ensure;
