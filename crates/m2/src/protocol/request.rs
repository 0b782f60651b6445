//! Structured requests built from the envelope's header map.
//!
//! Mongrel2 flattens the request line and the headers into one JSON object.
//! Synthetic upper-case keys (`METHOD`, `VERSION`, `URI`, ...) carry the
//! request line, a few well known headers feed structured fields, and every
//! other key is handed to the handler as an ordinary header.

use std::collections::HashSet;

use bytes::Bytes;
use http::uri::Scheme;
use http::{Method, Uri};
use tracing::trace;

use crate::ensure;
use crate::protocol::{HeaderMap, Headers, ParseError, ProtocolVersion};

pub const METHOD: &str = "METHOD";
pub const VERSION: &str = "VERSION";
pub const URI: &str = "URI";
pub const PATTERN: &str = "PATTERN";
pub const PATH: &str = "PATH";
pub const HOST: &str = "Host";
pub const REFERER: &str = "Referer";
pub const USER_AGENT: &str = "User-Agent";
pub const CONTENT_LENGTH: &str = "Content-Length";

/// A request as seen by a [`Handler`](crate::handler::Handler).
#[derive(Debug, Clone)]
pub struct Request {
    method: Method,
    version: ProtocolVersion,
    host: String,
    uri: Uri,
    headers: Headers,
    content_length: Option<u64>,
    body: Bytes,
}

impl Request {
    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn version(&self) -> ProtocolVersion {
        self.version
    }

    /// The `Host` the client asked for, empty if mongrel2 didn't send one.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Absolute when the request carried a host, otherwise just path and query.
    pub fn uri(&self) -> &Uri {
        &self.uri
    }

    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    pub fn headers_mut(&mut self) -> &mut Headers {
        &mut self.headers
    }

    pub fn referer(&self) -> Option<&str> {
        self.headers.get(REFERER)
    }

    pub fn user_agent(&self) -> Option<&str> {
        self.headers.get(USER_AGENT)
    }

    /// `None` when the request didn't declare a length, which is not the same as `Some(0)`.
    pub fn content_length(&self) -> Option<u64> {
        self.content_length
    }

    pub fn body(&self) -> &Bytes {
        &self.body
    }

    pub fn into_body(self) -> Bytes {
        self.body
    }
}

/// Header map keys that never show up in [`Request::headers`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReservedHeaders {
    names: HashSet<String>,
}

impl ReservedHeaders {
    pub const DEFAULT_NAMES: [&'static str; 9] =
        [PATH, METHOD, VERSION, URI, PATTERN, HOST, REFERER, USER_AGENT, CONTENT_LENGTH];

    /// Adds a reserved key, returns false if it was already there.
    pub fn insert<S: Into<String>>(&mut self, name: S) -> bool {
        self.names.insert(name.into())
    }

    /// Keys are matched exactly, case included.
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}

impl Default for ReservedHeaders {
    fn default() -> Self {
        Self::DEFAULT_NAMES.into_iter().collect()
    }
}

impl<S: Into<String>> FromIterator<S> for ReservedHeaders {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        Self { names: iter.into_iter().map(Into::into).collect() }
    }
}

/// Settings used while turning a header map into a [`Request`].
#[derive(Debug, Clone)]
pub struct RequestConfig {
    scheme: Scheme,
    reserved_headers: ReservedHeaders,
}

impl Default for RequestConfig {
    fn default() -> Self {
        Self { scheme: Scheme::HTTP, reserved_headers: ReservedHeaders::default() }
    }
}

impl RequestConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scheme used when a `Host` is present and an absolute url is built.
    ///
    /// The envelope doesn't say whether the client came in over TLS, so this
    /// is whatever the deployment knows mongrel2 is listening on.
    pub fn scheme(mut self, scheme: Scheme) -> Self {
        self.scheme = scheme;
        self
    }

    pub fn reserved_headers(mut self, reserved_headers: ReservedHeaders) -> Self {
        self.reserved_headers = reserved_headers;
        self
    }

    pub fn get_scheme(&self) -> &Scheme {
        &self.scheme
    }

    pub fn get_reserved_headers(&self) -> &ReservedHeaders {
        &self.reserved_headers
    }

    /// Builds a [`Request`] from a decoded header map and the request body.
    ///
    /// # Errors
    ///
    /// - [`ParseError::MissingMethod`] if `METHOD` is absent or empty
    /// - [`ParseError::InvalidMethod`] if `METHOD` is not a valid http method token
    /// - [`ParseError::InvalidProtocolVersion`] if `VERSION` is not `HTTP/major.minor`
    /// - [`ParseError::InvalidContentLength`] if `Content-Length` is not a non-negative integer
    /// - [`ParseError::InvalidUrl`] if the host and `URI` don't form a valid url
    pub fn build(&self, params: &HeaderMap, mut body: Bytes) -> Result<Request, ParseError> {
        let param = |key: &str| params.get(key).map_or("", String::as_str);

        let method = param(METHOD);
        ensure!(!method.is_empty(), ParseError::MissingMethod);
        let method = Method::from_bytes(method.as_bytes()).map_err(|_e| ParseError::invalid_method(method))?;

        let version = param(VERSION).parse::<ProtocolVersion>()?;

        let content_length = match param(CONTENT_LENGTH) {
            "" => None,
            length => Some(
                length
                    .parse::<u64>()
                    .map_err(|e| ParseError::invalid_content_length(format!("{length:?}, cause: {e}")))?,
            ),
        };

        let host = param(HOST).to_string();
        let uri = self.resolve_uri(&host, param(URI))?;

        let mut headers = Headers::new();
        for name in [REFERER, USER_AGENT] {
            let value = param(name);
            if !value.is_empty() {
                headers.insert(name, value);
            }
        }

        let mut names = params.keys().filter(|name| !self.reserved_headers.contains(name)).collect::<Vec<_>>();
        // the header map comes out of a HashMap, sort to hand out a stable order
        names.sort_unstable();
        for name in names {
            headers.append(name.as_str(), params[name].as_str());
        }

        if let Some(length) = content_length
            && let Ok(length) = usize::try_from(length)
            && body.len() > length
        {
            body.truncate(length);
        }

        trace!(%method, %version, %uri, header_num = headers.len(), ?content_length, "built request");

        Ok(Request { method, version, host, uri, headers, content_length, body })
    }

    /// Follows the [`Uri`] grammar: without a host, only origin-form
    /// (`/path?query`), absolute or authority URIs are accepted, so a
    /// relative reference like `x/y` is a [`ParseError::InvalidUrl`].
    fn resolve_uri(&self, host: &str, uri: &str) -> Result<Uri, ParseError> {
        if host.is_empty() {
            if uri.is_empty() {
                return Ok(Uri::default());
            }
            return uri.parse::<Uri>().map_err(|e| ParseError::invalid_url(format!("{uri:?}, cause: {e}")));
        }

        let absolute = format!("{}://{host}{uri}", self.scheme);
        absolute.parse::<Uri>().map_err(|e| ParseError::invalid_url(format!("{absolute:?}, cause: {e}")))
    }
}
