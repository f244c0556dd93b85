//! HTTP error responses.
//!
//! Every service error becomes an `ApiError`, rendered as
//! `{"error": message, "code": code}` with a matching status. Validation
//! failures also carry `"field"`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};

use crate::error::ErrorCode;
use crate::services::bin::BinError;
use crate::services::catalog::{CatalogError, ValidationError};
use crate::services::inventory::InventoryError;
use crate::services::order::OrderError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub status: StatusCode,
    pub code: &'static str,
    pub message: String,
    pub field: Option<&'static str>,
}

impl ApiError {
    fn from_code<E: ErrorCode + std::fmt::Display>(status: StatusCode, err: &E) -> Self {
        Self { status, code: err.error_code(), message: err.to_string(), field: None }
    }

    #[must_use]
    pub fn unauthorized() -> Self {
        Self { status: StatusCode::UNAUTHORIZED, code: "E_UNAUTHORIZED", message: "Unauthorized".into(), field: None }
    }

    #[must_use]
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self { status: StatusCode::BAD_REQUEST, code: "E_VALIDATION", message: message.into(), field: None }
    }

    /// 400 naming the rejected field.
    #[must_use]
    pub fn invalid_field(err: ValidationError) -> Self {
        Self { field: Some(err.field), ..Self::bad_request(err.message) }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let mut body = serde_json::json!({ "error": self.message, "code": self.code });
        if let Some(field) = self.field {
            body["field"] = serde_json::Value::from(field);
        }
        (self.status, Json(body)).into_response()
    }
}

impl From<CatalogError> for ApiError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::NotFound { .. } => Self::from_code(StatusCode::NOT_FOUND, &err),
            CatalogError::Invalid(ref v) => {
                Self { field: Some(v.field), ..Self::from_code(StatusCode::UNPROCESSABLE_ENTITY, &err) }
            }
            CatalogError::Stock(inner) => Self::from(inner),
        }
    }
}

impl From<InventoryError> for ApiError {
    fn from(err: InventoryError) -> Self {
        let status = match &err {
            InventoryError::ProductNotFound(_) | InventoryError::WarehouseNotFound(_) => StatusCode::NOT_FOUND,
            InventoryError::InvalidQuantity | InventoryError::QuantityOverflow { .. } => StatusCode::BAD_REQUEST,
            InventoryError::InsufficientStock { .. } => StatusCode::CONFLICT,
        };
        Self::from_code(status, &err)
    }
}

impl From<OrderError> for ApiError {
    fn from(err: OrderError) -> Self {
        let status = match &err {
            OrderError::NotFound(_) | OrderError::ProductNotFound(_) | OrderError::WarehouseNotFound(_) => {
                StatusCode::NOT_FOUND
            }
            OrderError::InvalidQuantity | OrderError::InvalidStatus(_) => StatusCode::BAD_REQUEST,
        };
        Self::from_code(status, &err)
    }
}

impl From<BinError> for ApiError {
    fn from(err: BinError) -> Self {
        Self::from_code(StatusCode::BAD_REQUEST, &err)
    }
}

#[cfg(test)]
#[path = "error_test.rs"]
mod tests;
