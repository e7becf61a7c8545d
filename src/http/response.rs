//! Fixture response builders
//!
//! One builder per route. Builders never panic: a build error falls back to
//! a bare 200 and is written to the error log.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;

/// Build the `/test` response: the cookie plus the echoed header value as
/// the body. No other explicit headers.
pub fn build_header_echo_response(echoed: Bytes) -> Response<Full<Bytes>> {
    Response::builder()
        .status(200)
        .header("Set-Cookie", "foo=bar")
        .body(Full::new(echoed))
        .unwrap_or_else(|e| {
            log_build_error("header echo", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build the `/json` response: an empty explicit header set and a fixed
/// JSON object body.
pub fn build_json_response() -> Response<Full<Bytes>> {
    let payload = serde_json::json!({ "bar": "foo" }).to_string();
    Response::builder()
        .status(200)
        .body(Full::new(Bytes::from(payload)))
        .unwrap_or_else(|e| {
            log_build_error("json", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build the fallback response: `X-Foo` emitted as two separate header
/// lines, never folded into one comma-joined value.
pub fn build_fallback_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(200)
        .header("X-Foo", "bar")
        .header("X-Foo", "baz")
        .body(Full::new(Bytes::from("test")))
        .unwrap_or_else(|e| {
            log_build_error("fallback", &e);
            Response::new(Full::new(Bytes::from("test")))
        })
}

/// Log response build error
fn log_build_error(which: &str, error: &hyper::http::Error) {
    crate::logger::log_error(&format!("Failed to build {which} response: {error}"));
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn body_of(response: Response<Full<Bytes>>) -> Bytes {
        response.into_body().collect().await.unwrap().to_bytes()
    }

    #[tokio::test]
    async fn test_header_echo_sets_cookie() {
        let resp = build_header_echo_response(Bytes::from("hello"));
        assert_eq!(resp.status(), 200);
        assert_eq!(resp.headers().get("set-cookie").unwrap(), "foo=bar");
        assert_eq!(body_of(resp).await, Bytes::from("hello"));
    }

    #[tokio::test]
    async fn test_header_echo_empty_value() {
        let resp = build_header_echo_response(Bytes::new());
        assert_eq!(resp.status(), 200);
        assert!(body_of(resp).await.is_empty());
    }

    #[tokio::test]
    async fn test_json_body_is_exact_literal() {
        let resp = build_json_response();
        assert_eq!(resp.status(), 200);
        assert_eq!(body_of(resp).await, Bytes::from(r#"{"bar":"foo"}"#));
    }

    #[test]
    fn test_json_response_sets_no_explicit_headers() {
        let resp = build_json_response();
        assert!(resp.headers().is_empty());
    }

    #[tokio::test]
    async fn test_fallback_multi_value_header() {
        let resp = build_fallback_response();
        assert_eq!(resp.status(), 200);

        let values: Vec<_> = resp.headers().get_all("x-foo").iter().collect();
        assert_eq!(values.len(), 2);
        assert_eq!(values[0], "bar");
        assert_eq!(values[1], "baz");
        assert_eq!(body_of(resp).await, Bytes::from("test"));
    }
}
