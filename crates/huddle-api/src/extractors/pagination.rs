//! Pagination extractor
//!
//! Extracts page/take pagination parameters from query strings.

use axum::{
    async_trait,
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use huddle_core::value_objects::Page;
use serde::Deserialize;

use crate::response::ApiError;

/// Raw pagination query parameters
#[derive(Debug, Deserialize)]
pub struct PaginationParams {
    /// 1-based page number
    #[serde(default)]
    pub page: Option<i64>,
    /// Page size
    #[serde(default)]
    pub take: Option<i64>,
}

/// Validated page/take pagination
#[derive(Debug, Clone, Copy)]
pub struct Pagination(pub Page);

impl From<PaginationParams> for Pagination {
    fn from(params: PaginationParams) -> Self {
        let defaults = Page::default();
        Pagination(Page::new(
            params.page.unwrap_or(defaults.page),
            params.take.unwrap_or(defaults.take),
        ))
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for Pagination
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(params) = Query::<PaginationParams>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::invalid_query(e.to_string()))?;

        Ok(Pagination::from(params))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_applied() {
        let pagination = Pagination::from(PaginationParams {
            page: None,
            take: None,
        });
        assert_eq!(pagination.0, Page::default());
    }

    #[test]
    fn test_values_clamped() {
        let pagination = Pagination::from(PaginationParams {
            page: Some(0),
            take: Some(9999),
        });
        assert_eq!(pagination.0.page, 1);
        assert_eq!(pagination.0.take, 100);
    }
}
