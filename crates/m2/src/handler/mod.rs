//! Request handler traits and utilities.
//!
//! A handler receives one [`Request`] and writes its answer into the
//! [`ResponseCollector`] it is lent. It runs to completion before the serve
//! loop receives the next message.

use crate::protocol::{Request, ResponseCollector};

#[cfg_attr(test, mockall::automock)]
pub trait Handler {
    fn handle(&self, request: Request, response: &mut ResponseCollector);
}

impl<H: Handler + ?Sized> Handler for &H {
    fn handle(&self, request: Request, response: &mut ResponseCollector) {
        (**self).handle(request, response);
    }
}

impl<H: Handler + ?Sized> Handler for std::sync::Arc<H> {
    fn handle(&self, request: Request, response: &mut ResponseCollector) {
        (**self).handle(request, response);
    }
}

/// A [`Handler`] backed by a plain function or closure, see [`make_handler`].
#[derive(Debug)]
pub struct HandlerFn<F> {
    f: F,
}

impl<F> Handler for HandlerFn<F>
where
    F: Fn(Request, &mut ResponseCollector),
{
    fn handle(&self, request: Request, response: &mut ResponseCollector) {
        (self.f)(request, response);
    }
}

pub fn make_handler<F>(f: F) -> HandlerFn<F>
where
    F: Fn(Request, &mut ResponseCollector),
{
    HandlerFn { f }
}

#[cfg(test)]
mod tests {
    use bytes::Bytes;

    use super::*;
    use crate::protocol::{HeaderMap, RequestConfig};

    fn request() -> Request {
        let params = [("METHOD", "GET"), ("VERSION", "HTTP/1.1"), ("URI", "/hello")]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect::<HeaderMap>();
        RequestConfig::default().build(&params, Bytes::new()).unwrap()
    }

    #[test]
    fn test_make_handler() {
        let handler = make_handler(|request: Request, response: &mut ResponseCollector| {
            response.write(request.uri().path());
        });

        let mut response = ResponseCollector::new();
        handler.handle(request(), &mut response);

        assert!(response.as_bytes().ends_with(b"\r\n\r\n/hello"));
    }

    #[test]
    fn test_handler_by_reference() {
        fn assert_is_handler<T: Handler>(_handler: &T) {
            // no op
        }

        let handler = make_handler(|_request: Request, _response: &mut ResponseCollector| {});
        assert_is_handler(&&handler);
        assert_is_handler(&std::sync::Arc::new(handler));
    }
}
