//! Shipping labels.
//!
//! Labels carry the tracking number as the payload for both the barcode and
//! the QR code; rendering those symbols is left to whatever prints the label.

use rand::Rng;
use serde::{Deserialize, Serialize};

const TRACKING_ALPHABET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";
const TRACKING_LEN: usize = 8;

const DEFAULT_COURIER: &str = "Steven Courier";
const DEFAULT_ADDRESS: &str = "Grey Lang, Unit 3, Charles Street, West Bromwich B70 0AZ";
const DEFAULT_WEIGHT: &str = "33 KG";
const DEFAULT_REFERENCE: &str = "EU-DR4121";
const DEFAULT_INSTRUCTIONS: &str = "Handle with care";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LabelInput {
    pub courier_name: Option<String>,
    pub tracking_number: Option<String>,
    pub address: Option<String>,
    pub weight: Option<String>,
    pub reference: Option<String>,
    pub instructions: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShippingLabel {
    pub courier_name: String,
    pub tracking_number: String,
    pub address: String,
    pub weight: String,
    pub reference: String,
    pub instructions: String,
    pub barcode_payload: String,
    pub qr_payload: String,
    /// Printable plain-text rendering.
    pub text: String,
}

#[must_use]
pub fn generate_tracking_number() -> String {
    let mut rng = rand::rng();
    (0..TRACKING_LEN)
        .map(|_| {
            let idx = rng.random_range(0..TRACKING_ALPHABET.len());
            TRACKING_ALPHABET[idx] as char
        })
        .collect()
}

fn field_or(value: Option<String>, default: &str) -> String {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_string())
}

/// Fill defaults, generate a tracking number if none was given, and render.
#[must_use]
pub fn compose_label(input: LabelInput) -> ShippingLabel {
    let tracking_number = input
        .tracking_number
        .map(|t| t.trim().to_uppercase())
        .filter(|t| !t.is_empty())
        .unwrap_or_else(generate_tracking_number);

    let courier_name = field_or(input.courier_name, DEFAULT_COURIER);
    let address = field_or(input.address, DEFAULT_ADDRESS);
    let weight = field_or(input.weight, DEFAULT_WEIGHT);
    let reference = field_or(input.reference, DEFAULT_REFERENCE);
    let instructions = field_or(input.instructions, DEFAULT_INSTRUCTIONS);

    let text = format!(
        "{courier_name}\n\
         Tracking Number: {tracking_number}\n\
         Address: {address}\n\
         Weight: {weight}\n\
         Reference: {reference}\n\
         Instructions: {instructions}\n"
    );

    ShippingLabel {
        barcode_payload: tracking_number.clone(),
        qr_payload: tracking_number.clone(),
        courier_name,
        tracking_number,
        address,
        weight,
        reference,
        instructions,
        text,
    }
}
