//! Data models shared across database access and API handlers.

use serde::{Deserialize, Serialize};

pub mod admin_user;
pub mod application;
pub mod scholarship;

/// Pagination metadata echoed back by list endpoints.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub current_page: i64,
    pub total_pages: i64,
    pub total_items: i64,
    pub items_per_page: i64,
}

impl Pagination {
    pub fn new(page: i64, limit: i64, total_items: i64) -> Self {
        let total_pages = if limit > 0 {
            (total_items + limit - 1) / limit
        } else {
            0
        };
        Self {
            current_page: page,
            total_pages,
            total_items,
            items_per_page: limit,
        }
    }
}

pub(crate) fn default_page() -> i64 {
    1
}

pub(crate) fn default_limit() -> i64 {
    10
}

/// Clamps list-query paging values to sane bounds.
pub(crate) fn clamp_paging(page: i64, limit: i64) -> (i64, i64) {
    (page.max(1), limit.clamp(1, 100))
}

/// Numeric payload fields arrive as JSON numbers or as numeric strings
/// (HTML form clients send the latter); the validation rules treat both as
/// numbers, so deserialization has to as well.
#[derive(Deserialize)]
#[serde(untagged)]
enum Numberish {
    Number(f64),
    Text(String),
}

pub(crate) fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    match Numberish::deserialize(deserializer)? {
        Numberish::Number(n) => Ok(n),
        Numberish::Text(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}

pub(crate) fn lenient_i64<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    match Numberish::deserialize(deserializer)? {
        Numberish::Number(n) => Ok(n as i64),
        Numberish::Text(s) => {
            let trimmed = s.trim();
            trimmed
                .parse::<i64>()
                .or_else(|_| trimmed.parse::<f64>().map(|f| f as i64))
                .map_err(serde::de::Error::custom)
        }
    }
}

pub(crate) fn lenient_opt_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    match Option::<Numberish>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Numberish::Number(n)) => Ok(Some(n)),
        Some(Numberish::Text(s)) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                Ok(None)
            } else {
                trimmed
                    .parse()
                    .map(Some)
                    .map_err(serde::de::Error::custom)
            }
        }
    }
}
