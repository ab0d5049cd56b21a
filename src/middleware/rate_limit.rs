//! Global per-IP rate limiting over a fixed window. Rejected requests get a
//! fixed JSON message instead of queueing.

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{header::CONTENT_TYPE, HeaderValue, Response, StatusCode};
use governor::middleware::StateInformationMiddleware;
use tower_governor::{
    governor::GovernorConfigBuilder, key_extractor::PeerIpKeyExtractor, GovernorError,
    GovernorLayer,
};

use crate::config::Config;

pub fn create_rate_limiter(
    config: &Config,
) -> GovernorLayer<PeerIpKeyExtractor, StateInformationMiddleware, Body> {
    let burst_size = config.rate_limit_max_requests.max(1);
    let window_seconds = config.rate_limit_window_seconds.max(1);
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .period(Duration::from_secs(window_seconds))
            .burst_size(burst_size)
            .key_extractor(PeerIpKeyExtractor)
            .use_headers()
            .finish()
            .expect("rate limiter config should be valid"),
    );

    GovernorLayer::new(governor_conf).error_handler(rate_limit_error_handler)
}

fn rate_limit_error_handler(error: GovernorError) -> Response<Body> {
    match error {
        GovernorError::TooManyRequests { wait_time, headers } => {
            tracing::warn!(wait_time, "Rate limit exceeded");
            let mut response = json_error_response(
                StatusCode::TOO_MANY_REQUESTS,
                "rate_limit_exceeded",
                "Too many requests. Please try again later.",
                Some(wait_time),
            );
            if let Some(headers) = headers {
                response.headers_mut().extend(headers);
            }
            response
        }
        GovernorError::UnableToExtractKey => json_error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            "rate_limit_key_error",
            "Unable to determine request identity.",
            None,
        ),
        GovernorError::Other { code, msg, headers } => {
            let mut response = json_error_response(
                code,
                "rate_limit_error",
                &msg.unwrap_or_else(|| "Rate limit error".to_string()),
                None,
            );
            if let Some(headers) = headers {
                response.headers_mut().extend(headers);
            }
            response
        }
    }
}

fn json_error_response(
    status: StatusCode,
    error: &str,
    message: &str,
    retry_after: Option<u64>,
) -> Response<Body> {
    let mut body = serde_json::json!({
        "error": error,
        "message": message,
    });
    if let Some(retry_after) = retry_after {
        body["retry_after"] = retry_after.into();
    }

    let mut response = Response::new(Body::from(body.to_string()));
    *response.status_mut() = status;
    response
        .headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    if let Some(retry_after) = retry_after {
        if let Ok(value) = HeaderValue::from_str(&retry_after.to_string()) {
            response.headers_mut().insert("retry-after", value);
        }
    }
    response
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config(max_requests: u32, window_seconds: u64) -> Config {
        Config {
            database_url: "sqlite::memory:".to_string(),
            jwt_secret: "test".to_string(),
            jwt_expiration_hours: 1,
            port: 0,
            cors_origin: "*".to_string(),
            rate_limit_max_requests: max_requests,
            rate_limit_window_seconds: window_seconds,
            default_admin_password: "admin123".to_string(),
            environment: "test".to_string(),
        }
    }

    #[test]
    fn create_rate_limiter_uses_config_values() {
        let _limiter = create_rate_limiter(&test_config(100, 900));
    }

    #[test]
    fn create_rate_limiter_handles_zero_values() {
        let _limiter = create_rate_limiter(&test_config(0, 0));
    }

    #[test]
    fn rejection_body_is_json_with_retry_after() {
        let response = json_error_response(
            StatusCode::TOO_MANY_REQUESTS,
            "rate_limit_exceeded",
            "Too many requests. Please try again later.",
            Some(42),
        );
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(
            response.headers().get("retry-after").unwrap(),
            &HeaderValue::from_static("42")
        );
    }
}
