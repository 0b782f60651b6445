//! Buffered response handed to handlers.
//!
//! The front end copies our reply verbatim to the client, so the collector
//! produces raw HTTP/1.1 bytes: status line, header block, blank line, body.

use bytes::{BufMut, Bytes, BytesMut};
use http::StatusCode;
use tracing::warn;

use crate::protocol::Headers;

pub const CONTENT_TYPE: &str = "Content-Type";
pub const CONTENT_LENGTH: &str = "Content-Length";
pub const DATE: &str = "Date";

const DEFAULT_CONTENT_TYPE: &str = "text/html; charset=utf-8";

/// Initial buffer size allocated for status line and headers
const INIT_HEADER_SIZE: usize = 1024;

/// Collects status, headers and body written by a handler.
///
/// Headers can be changed until the first [`write`](Self::write). That call
/// finalizes the head: it fills in a default `Content-Type` and `Date`, sets
/// `Content-Length` to the size of the data being written, and serializes the
/// status line and header block. Afterwards writes only append to the body and
/// header changes no longer reach the output.
#[derive(Debug)]
pub struct ResponseCollector {
    status: Option<StatusCode>,
    headers: Headers,
    finalized: bool,
    buf: BytesMut,
}

impl Default for ResponseCollector {
    fn default() -> Self {
        Self { status: None, headers: Headers::new(), finalized: false, buf: BytesMut::new() }
    }
}

impl ResponseCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// The status that is or will be sent, `200 OK` unless set.
    pub fn status(&self) -> StatusCode {
        self.status.unwrap_or(StatusCode::OK)
    }

    /// Sets the response status.
    ///
    /// Only the first call counts, and calls after the head was written are
    /// ignored.
    pub fn set_status(&mut self, status: StatusCode) {
        if self.finalized {
            warn!(%status, "response head already written, ignore status");
            return;
        }

        match self.status {
            Some(current) => warn!(%current, %status, "response status already set, ignore status"),
            None => self.status = Some(status),
        }
    }

    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    /// Mutable access to the headers, only useful before the first write.
    pub fn headers_mut(&mut self) -> &mut Headers {
        &mut self.headers
    }

    pub fn is_finalized(&self) -> bool {
        self.finalized
    }

    /// Writes body data, writing the response head first if needed.
    pub fn write<B: AsRef<[u8]>>(&mut self, body: B) {
        let body = body.as_ref();
        if !self.finalized {
            self.finalize(body.len());
        }
        self.buf.put_slice(body);
    }

    /// Makes sure a complete response is buffered, an untouched collector
    /// turns into an empty body response.
    pub fn finish(&mut self) {
        if !self.finalized {
            self.finalize(0);
        }
    }

    /// The raw response bytes buffered so far.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    pub fn into_bytes(self) -> Bytes {
        self.buf.freeze()
    }

    fn finalize(&mut self, content_length: usize) {
        self.finalized = true;

        if self.headers.get(CONTENT_TYPE).is_none_or(str::is_empty) {
            self.headers.insert(CONTENT_TYPE, DEFAULT_CONTENT_TYPE);
        }
        if self.headers.get(DATE).is_none_or(str::is_empty) {
            self.headers.insert(DATE, http_date());
        }
        self.headers.insert(CONTENT_LENGTH, content_length.to_string());

        let status = self.status();
        self.buf.reserve(INIT_HEADER_SIZE + content_length);
        write_head(&mut self.buf, status, &self.headers);
    }
}

fn write_head(dst: &mut BytesMut, status: StatusCode, headers: &Headers) {
    dst.put_slice(b"HTTP/1.1 ");
    dst.put_slice(status.as_str().as_bytes());
    dst.put_u8(b' ');
    dst.put_slice(status.canonical_reason().unwrap_or("").as_bytes());
    dst.put_slice(b"\r\n");

    for (name, value) in headers {
        dst.put_slice(name.as_bytes());
        dst.put_slice(b": ");
        dst.put_slice(value.as_bytes());
        dst.put_slice(b"\r\n");
    }
    dst.put_slice(b"\r\n");
}

fn http_date() -> String {
    let mut buf = faf_http_date::get_date_buff_no_key();
    faf_http_date::get_date_no_key(&mut buf);
    String::from_utf8_lossy(&buf[..]).into_owned()
}
