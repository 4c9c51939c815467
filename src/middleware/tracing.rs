// ABOUTME: Request tracing middleware for correlation and structured logging
// ABOUTME: Creates a span per HTTP request carrying its request ID, status, and latency
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::time::Duration;

use axum::body::Body;
use http::{HeaderMap, Request, Response};
use tracing::{info, Span};

/// Header carrying the request ID in both directions
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Request ID set by the request-id layer, if any
#[must_use]
pub fn request_id(headers: &HeaderMap) -> Option<String> {
    headers
        .get(REQUEST_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned)
}

/// Create a tracing span for HTTP requests
pub fn create_request_span(request: &Request<Body>) -> Span {
    let request_id = request_id(request.headers()).unwrap_or_default();
    tracing::info_span!(
        "http_request",
        method = %request.method(),
        path = %request.uri().path(),
        request_id = %request_id,
        status_code = tracing::field::Empty,
        duration_ms = tracing::field::Empty,
    )
}

/// Record the outcome of a request on its span
pub fn record_response(response: &Response<Body>, latency: Duration, span: &Span) {
    let status = response.status().as_u16();
    let duration_ms = u64::try_from(latency.as_millis()).unwrap_or(u64::MAX);
    span.record("status_code", status);
    span.record("duration_ms", duration_ms);
    info!(http.status = status, http.duration_ms = duration_ms, "HTTP request");
}
