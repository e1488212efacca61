use serde::{Deserialize, Serialize};

/// Country every address is shipped within.
pub const COUNTRY: &str = "US";

/// a normalized US postal address
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub name: String,
    pub street1: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub street2: Option<String>,
    pub city: String,
    /// upper-cased two-letter jurisdiction code
    pub state: String,
    /// `12345` or `12345-6789`
    pub zip: String,
    pub country: String,
}

/// Package dimensions. Weight in ounces, length/width/height in inches.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Parcel {
    pub weight: f64,
    pub length: f64,
    pub width: f64,
    pub height: f64,
}

/// A validated request for a single label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelRequest {
    pub from_address: Address,
    pub to_address: Address,
    pub parcel: Parcel,
}

/// What the caller gets back once a label has been purchased.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelResult {
    pub label_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tracking_code: Option<String>,
}
