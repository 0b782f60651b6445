//! The serve loop
//!
//! This module drives the message exchange with mongrel2: requests come in on
//! a pull transport, replies go out on a publish transport.
//!
//! # Components
//!
//! - [`M2Connection`]: Main serve loop that:
//!   - Decodes every inbound envelope
//!   - Builds the request and runs the handler on it
//!   - Publishes the buffered response back to the front end
//!   - Drops malformed messages without stopping
//!
//! Messages are processed one at a time; the handler for a message finishes
//! before the next one is received.

mod m2_connection;

pub use m2_connection::M2Connection;
