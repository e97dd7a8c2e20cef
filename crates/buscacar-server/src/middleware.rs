use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap, HeaderValue},
    middleware::Next,
    response::{IntoResponse, Response},
    Extension,
};
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::api::ApiError;

const REQUEST_ID_HEADER: &str = "x-request-id";

/// Request identifier, stored as a request extension and echoed back in the
/// `x-request-id` response header and the response `meta`.
#[derive(Debug, Clone)]
pub struct RequestId(pub String);

impl RequestId {
    /// Uses the caller's `x-request-id` when it is valid text, otherwise a new `UUIDv4`.
    fn from_headers(headers: &HeaderMap) -> Self {
        let supplied = headers
            .get(REQUEST_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty());
        Self(supplied.map_or_else(|| Uuid::new_v4().to_string(), ToOwned::to_owned))
    }
}

/// Request count inside the current fixed window.
#[derive(Debug)]
struct Window {
    opened_at: Instant,
    admitted: usize,
}

impl Window {
    /// Admits one request at `now`, or returns how long until the window reopens.
    fn admit(&mut self, now: Instant, limit: usize, length: Duration) -> Result<(), Duration> {
        let elapsed = now.saturating_duration_since(self.opened_at);
        if elapsed >= length {
            self.opened_at = now;
            self.admitted = 0;
        }
        if self.admitted >= limit {
            return Err(length.saturating_sub(now.saturating_duration_since(self.opened_at)));
        }
        self.admitted += 1;
        Ok(())
    }
}

/// Fixed-window limiter shared by every catalog and FIPE route.
#[derive(Debug, Clone)]
pub struct RateLimitState {
    max_requests: usize,
    window: Duration,
    current: Arc<Mutex<Window>>,
}

impl RateLimitState {
    #[must_use]
    pub fn new(max_requests: usize, window: Duration) -> Self {
        Self {
            max_requests,
            window,
            current: Arc::new(Mutex::new(Window {
                opened_at: Instant::now(),
                admitted: 0,
            })),
        }
    }

    async fn try_acquire(&self) -> Result<(), Duration> {
        self.current
            .lock()
            .await
            .admit(Instant::now(), self.max_requests, self.window)
    }
}

/// Tags the request with a [`RequestId`] and mirrors it on the response header.
pub async fn request_id(mut req: Request, next: Next) -> Response {
    let id = RequestId::from_headers(req.headers());
    let header_value = HeaderValue::from_str(&id.0).ok();
    req.extensions_mut().insert(id);

    let mut res = next.run(req).await;
    if let Some(value) = header_value {
        res.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
    res
}

/// Rejects requests over the window limit with a `rate_limited` error and a
/// `Retry-After` header in whole seconds.
///
/// Must run inside [`request_id`] so the error can carry the request ID.
pub async fn enforce_rate_limit(
    State(rate_limit): State<RateLimitState>,
    Extension(req_id): Extension<RequestId>,
    req: Request,
    next: Next,
) -> Response {
    let retry_after = match rate_limit.try_acquire().await {
        Ok(()) => return next.run(req).await,
        Err(wait) => wait,
    };

    let retry_secs = retry_after.as_secs().max(1);
    tracing::debug!(
        request_id = %req_id.0,
        max_requests = rate_limit.max_requests,
        retry_secs,
        "rejecting request over rate limit"
    );

    let mut response =
        ApiError::new(req_id.0, "rate_limited", "rate limit exceeded").into_response();
    response
        .headers_mut()
        .insert(header::RETRY_AFTER, HeaderValue::from(retry_secs));
    response
}

#[cfg(test)]
mod tests {
    use axum::{
        body::{to_bytes, Body},
        http::StatusCode,
        routing::get,
        Router,
    };
    use tower::ServiceExt;

    use super::*;

    fn limited_router(max_requests: usize) -> Router {
        Router::new()
            .route("/", get(|| async { "ok" }))
            .layer(axum::middleware::from_fn_with_state(
                RateLimitState::new(max_requests, Duration::from_secs(60)),
                enforce_rate_limit,
            ))
            .layer(axum::middleware::from_fn(request_id))
    }

    fn get_root(request_id: Option<&str>) -> axum::http::Request<Body> {
        let mut builder = axum::http::Request::builder().uri("/");
        if let Some(id) = request_id {
            builder = builder.header(REQUEST_ID_HEADER, id);
        }
        builder.body(Body::empty()).expect("request")
    }

    fn header<'a>(response: &'a Response, name: &str) -> Option<&'a str> {
        response.headers().get(name).and_then(|v| v.to_str().ok())
    }

    #[test]
    fn window_admits_up_to_limit_then_reports_wait() {
        let start = Instant::now();
        let mut window = Window {
            opened_at: start,
            admitted: 0,
        };
        let length = Duration::from_secs(60);

        assert!(window.admit(start, 2, length).is_ok());
        assert!(window.admit(start, 2, length).is_ok());
        let wait = window
            .admit(start + Duration::from_secs(20), 2, length)
            .unwrap_err();
        assert_eq!(wait, Duration::from_secs(40));
    }

    #[test]
    fn window_reopens_after_its_length() {
        let start = Instant::now();
        let mut window = Window {
            opened_at: start,
            admitted: 5,
        };
        let later = start + Duration::from_secs(61);
        assert!(window.admit(later, 5, Duration::from_secs(60)).is_ok());
        assert_eq!(window.admitted, 1);
        assert_eq!(window.opened_at, later);
    }

    #[tokio::test]
    async fn request_id_is_echoed_when_supplied() {
        let response = limited_router(10)
            .oneshot(get_root(Some("req-abc")))
            .await
            .expect("response");
        assert_eq!(header(&response, REQUEST_ID_HEADER), Some("req-abc"));
    }

    #[tokio::test]
    async fn blank_request_id_is_replaced() {
        let response = limited_router(10)
            .oneshot(get_root(Some("   ")))
            .await
            .expect("response");
        let id = header(&response, REQUEST_ID_HEADER).expect("generated id");
        assert!(Uuid::parse_str(id).is_ok());
    }

    #[tokio::test]
    async fn request_id_is_generated_when_absent() {
        let response = limited_router(10)
            .oneshot(get_root(None))
            .await
            .expect("response");
        let id = header(&response, REQUEST_ID_HEADER).expect("generated id");
        assert!(Uuid::parse_str(id).is_ok());
    }

    #[tokio::test]
    async fn requests_over_the_limit_get_error_envelope() {
        let app = limited_router(2);
        for _ in 0..2 {
            let ok = app.clone().oneshot(get_root(None)).await.expect("response");
            assert_eq!(ok.status(), StatusCode::OK);
        }

        let limited = app
            .oneshot(get_root(Some("req-limited")))
            .await
            .expect("response");
        assert_eq!(limited.status(), StatusCode::TOO_MANY_REQUESTS);
        let retry_after: u64 = header(&limited, "retry-after")
            .and_then(|v| v.parse().ok())
            .expect("retry-after header");
        assert!((1..=60).contains(&retry_after));

        let body = to_bytes(limited.into_body(), usize::MAX)
            .await
            .expect("body bytes");
        let json: serde_json::Value = serde_json::from_slice(&body).expect("json parse");
        assert_eq!(json["error"]["code"], "rate_limited");
        assert_eq!(json["meta"]["request_id"], "req-limited");
        assert!(json["meta"]["timestamp"].is_string());
    }
}
