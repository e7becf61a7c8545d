//! Request routing dispatch module
//!
//! Entry point for HTTP request processing: resolves the route from the URL
//! path and produces the response for it. Every invocation is single-shot;
//! there is no cross-request state.

use std::net::SocketAddr;

use http_body_util::{BodyExt, Full};
use hyper::body::{Body, Bytes};
use hyper::{HeaderMap, Request, Response};

use crate::config::AppState;
use crate::http;
use crate::logger;

/// The three fixture routes, resolved by exact match on the URL path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// `/test`: echo the `x-test` request header, set a cookie
    HeaderEcho,
    /// `/json`: drain and log the request body, answer with a JSON literal
    BodySink,
    /// Anything else: log the request, answer with a multi-value header
    Fallback,
}

impl Route {
    /// Resolve a route from the URL path. The method is never consulted:
    /// any method reaches every route.
    pub fn resolve(path: &str) -> Self {
        match path {
            "/test" => Self::HeaderEcho,
            "/json" => Self::BodySink,
            _ => Self::Fallback,
        }
    }
}

/// Main entry point for HTTP request handling.
///
/// Generic over the body so tests can drive it with `Full<Bytes>`. A body
/// read error propagates to hyper, which aborts the connection without a
/// handler-level response.
pub async fn handle_request<B: Body>(
    req: Request<B>,
    peer_addr: SocketAddr,
    state: &AppState,
) -> Result<Response<Full<Bytes>>, B::Error> {
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    let access_log = state.access_log_enabled();
    if access_log {
        logger::log_request(&method, req.uri(), req.version());
    }

    let response = match Route::resolve(&path) {
        Route::HeaderEcho => {
            http::build_header_echo_response(echoed_header_value(req.headers()))
        }
        Route::BodySink => {
            // Suspends until the transport signals end of body; chunks are
            // concatenated in arrival order.
            let body = req.into_body().collect().await?.to_bytes();
            logger::log_sink_body(&String::from_utf8_lossy(&body));
            http::build_json_response()
        }
        Route::Fallback => {
            logger::log_fallback_request(&method, &path, req.headers());
            http::build_fallback_response()
        }
    };

    if access_log {
        let mut entry =
            logger::AccessLogEntry::new(peer_addr.to_string(), method.to_string(), path);
        entry.status = response.status().as_u16();
        entry.body_bytes = response_body_len(&response);
        logger::log_access(&entry, &state.config.logging.log_format);
    }

    Ok(response)
}

/// Fold every `x-test` header line into the echoed body, comma-joined.
/// An absent header echoes as an empty body.
fn echoed_header_value(headers: &HeaderMap) -> Bytes {
    let mut folded = Vec::new();
    for value in headers.get_all("x-test") {
        if !folded.is_empty() {
            folded.extend_from_slice(b", ");
        }
        folded.extend_from_slice(value.as_bytes());
    }
    Bytes::from(folded)
}

fn response_body_len(response: &Response<Full<Bytes>>) -> usize {
    usize::try_from(response.body().size_hint().exact().unwrap_or(0)).unwrap_or(usize::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, LoggingConfig, ServerConfig};

    fn test_state() -> AppState {
        AppState::new(&Config {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 9090,
                workers: 1,
            },
            logging: LoggingConfig {
                access_log: false,
                log_format: "common".to_string(),
                access_log_file: None,
                error_log_file: None,
            },
        })
    }

    fn peer() -> SocketAddr {
        "127.0.0.1:40000".parse().unwrap()
    }

    fn request(method: &str, path: &str, body: &str) -> Request<Full<Bytes>> {
        Request::builder()
            .method(method)
            .uri(path)
            .body(Full::new(Bytes::copy_from_slice(body.as_bytes())))
            .unwrap()
    }

    async fn body_of(response: Response<Full<Bytes>>) -> Bytes {
        response.into_body().collect().await.unwrap().to_bytes()
    }

    #[test]
    fn test_resolve_route() {
        assert_eq!(Route::resolve("/test"), Route::HeaderEcho);
        assert_eq!(Route::resolve("/json"), Route::BodySink);
        assert_eq!(Route::resolve("/"), Route::Fallback);
        assert_eq!(Route::resolve("/other"), Route::Fallback);
        assert_eq!(Route::resolve("/test/"), Route::Fallback);
        assert_eq!(Route::resolve("/testx"), Route::Fallback);
    }

    #[tokio::test]
    async fn test_header_echo_with_header() {
        let state = test_state();
        let mut req = request("GET", "/test", "");
        req.headers_mut()
            .insert("x-test", "hello".parse().unwrap());

        let resp = handle_request(req, peer(), &state).await.unwrap();
        assert_eq!(resp.status(), 200);
        assert_eq!(resp.headers().get("set-cookie").unwrap(), "foo=bar");
        assert_eq!(body_of(resp).await, Bytes::from("hello"));
    }

    #[tokio::test]
    async fn test_header_echo_without_header() {
        let state = test_state();
        let resp = handle_request(request("GET", "/test", ""), peer(), &state)
            .await
            .unwrap();
        assert_eq!(resp.status(), 200);
        assert_eq!(resp.headers().get("set-cookie").unwrap(), "foo=bar");
        assert!(body_of(resp).await.is_empty());
    }

    #[tokio::test]
    async fn test_header_echo_folds_repeated_headers() {
        let state = test_state();
        let mut req = request("GET", "/test", "");
        req.headers_mut().append("x-test", "a".parse().unwrap());
        req.headers_mut().append("x-test", "b".parse().unwrap());

        let resp = handle_request(req, peer(), &state).await.unwrap();
        assert_eq!(body_of(resp).await, Bytes::from("a, b"));
    }

    #[tokio::test]
    async fn test_body_sink_answers_json_literal() {
        let state = test_state();
        let resp = handle_request(request("POST", "/json", r#"{"a":1}"#), peer(), &state)
            .await
            .unwrap();
        assert_eq!(resp.status(), 200);
        assert_eq!(body_of(resp).await, Bytes::from(r#"{"bar":"foo"}"#));
    }

    #[tokio::test]
    async fn test_body_sink_accepts_empty_body() {
        let state = test_state();
        let resp = handle_request(request("POST", "/json", ""), peer(), &state)
            .await
            .unwrap();
        assert_eq!(resp.status(), 200);
        assert_eq!(body_of(resp).await, Bytes::from(r#"{"bar":"foo"}"#));
    }

    #[tokio::test]
    async fn test_fallback_has_two_x_foo_values() {
        let state = test_state();
        let resp = handle_request(request("GET", "/other", ""), peer(), &state)
            .await
            .unwrap();
        assert_eq!(resp.status(), 200);

        let values: Vec<_> = resp.headers().get_all("x-foo").iter().collect();
        assert_eq!(values, ["bar", "baz"]);
        assert_eq!(body_of(resp).await, Bytes::from("test"));
    }

    #[tokio::test]
    async fn test_query_string_does_not_change_the_route() {
        let state = test_state();
        let mut req = request("GET", "/test?x=1", "");
        req.headers_mut()
            .insert("x-test", "still-echoed".parse().unwrap());

        let resp = handle_request(req, peer(), &state).await.unwrap();
        assert_eq!(resp.headers().get("set-cookie").unwrap(), "foo=bar");
        assert_eq!(body_of(resp).await, Bytes::from("still-echoed"));
    }

    #[tokio::test]
    async fn test_repeated_requests_are_identical() {
        let state = test_state();

        for _ in 0..3 {
            let resp = handle_request(request("GET", "/other", ""), peer(), &state)
                .await
                .unwrap();
            assert_eq!(resp.status(), 200);
            let values: Vec<_> = resp.headers().get_all("x-foo").iter().collect();
            assert_eq!(values, ["bar", "baz"]);
            assert_eq!(body_of(resp).await, Bytes::from("test"));
        }
    }
}
