//! Request-body validation middleware wrapping the rule engine in
//! `crate::validation`. The body is buffered, checked against the route's
//! rule set, and restored unchanged for the handler when valid.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    extract::Request,
    middleware::Next,
    response::Response,
};
use serde_json::Value;

use crate::error::AppError;
use crate::validation::{validate_body, FieldRule};

/// Matches the JSON body-size limit of the HTTP layer.
const BODY_LIMIT: usize = 10 * 1024 * 1024;

type MiddlewareFuture = Pin<Box<dyn Future<Output = Result<Response, AppError>> + Send>>;

/// Builds a closure suitable for `axum::middleware::from_fn`, binding a rule
/// set to the route it guards.
pub fn validate_with(
    rules: Arc<Vec<FieldRule>>,
) -> impl Fn(Request, Next) -> MiddlewareFuture + Clone + Send + Sync + 'static {
    move |request, next| {
        let rules = Arc::clone(&rules);
        Box::pin(async move { validate_request(&rules, request, next).await })
    }
}

async fn validate_request(
    rules: &[FieldRule],
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let (parts, body) = request.into_parts();
    let bytes = to_bytes(body, BODY_LIMIT)
        .await
        .map_err(|_| AppError::BadRequest("Request body too large".to_string()))?;

    // Bodies that are not valid JSON are validated as if empty: required
    // fields then report as missing instead of the engine failing.
    let value: Value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    let errors = validate_body(rules, &value);
    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }

    let request = Request::from_parts(parts, Body::from(bytes));
    Ok(next.run(request).await)
}
