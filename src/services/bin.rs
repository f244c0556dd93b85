//! Storage bins.

use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::error::ErrorCode;
use crate::state::AppState;

#[derive(Debug, thiserror::Error)]
pub enum BinError {
    #[error("Name and location are required.")]
    MissingFields,
}

impl ErrorCode for BinError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::MissingFields => "E_VALIDATION",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bin {
    pub id: Uuid,
    pub name: String,
    pub location: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct BinInput {
    pub name: Option<String>,
    pub location: Option<String>,
}

/// # Errors
///
/// Returns `MissingFields` when name or location is absent or blank.
pub async fn create_bin(state: &AppState, input: BinInput) -> Result<Bin, BinError> {
    let name = input.name.as_deref().map(str::trim).filter(|s| !s.is_empty());
    let location = input.location.as_deref().map(str::trim).filter(|s| !s.is_empty());
    let (Some(name), Some(location)) = (name, location) else {
        return Err(BinError::MissingFields);
    };

    let bin = Bin { id: Uuid::new_v4(), name: name.to_string(), location: location.to_string() };
    state.store.write().await.bins.push(bin.clone());
    info!(id = %bin.id, name = %bin.name, location = %bin.location, "bin created");
    Ok(bin)
}

/// Bins in creation order.
pub async fn list_bins(state: &AppState) -> Vec<Bin> {
    state.store.read().await.bins.clone()
}
