//! Shipping label route.

use axum::response::Json;

use crate::services::label::{self, LabelInput, ShippingLabel};

/// `POST /api/labels` — compose a label; missing fields take demo defaults.
pub async fn create(Json(body): Json<LabelInput>) -> Json<ShippingLabel> {
    Json(label::compose_label(body))
}
