//! Label creation: configuration check, body parsing, validation, then the
//! provider sequence of create shipment, select rate, buy.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use log::{error, info, warn};
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use crate::address::model::LabelResult;
use crate::config::LabelConfig;
use crate::provider::{Connector, LabelProvider, ProviderError, Rate, Shipment};
use crate::validate::{validate_request, ValidationError};

/// Carrier whose rates are preferred when picking what to buy.
pub const PREFERRED_CARRIER: &str = "USPS";

const PROVIDER_FALLBACK_MESSAGE: &str = "EasyPost request failed";

#[derive(Debug, Error)]
pub enum LabelError {
    #[error("EasyPost API key is not configured")]
    MissingApiKey,
    #[error("Invalid JSON body")]
    InvalidJson(#[source] serde_json::Error),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("No USPS rate available for this shipment")]
    NoRate,
    #[error("Label URL not returned by EasyPost")]
    MissingLabelUrl,
    /// a failed provider call, carrying the message shown to the user
    #[error("{0}")]
    Provider(String),
}

impl LabelError {
    pub fn status(&self) -> StatusCode {
        match self {
            LabelError::MissingApiKey => StatusCode::INTERNAL_SERVER_ERROR,
            LabelError::InvalidJson(_) | LabelError::Validation(_) | LabelError::NoRate => StatusCode::BAD_REQUEST,
            LabelError::MissingLabelUrl | LabelError::Provider(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl From<ProviderError> for LabelError {
    /// Prefer the provider's nested message, then the error's own text, then a
    /// fixed fallback.
    fn from(err: ProviderError) -> Self {
        let message = err.nested_message()
            .map(str::to_string)
            .or_else(|| Some(err.to_string()).filter(|s| !s.is_empty()))
            .unwrap_or_else(|| PROVIDER_FALLBACK_MESSAGE.to_string());
        LabelError::Provider(message)
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for LabelError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            LabelError::MissingApiKey | LabelError::MissingLabelUrl => error!("cannot create label: {}", self),
            LabelError::Provider(_) => error!("EasyPost call failed: {}", self),
            LabelError::Validation(e) => warn!("rejected label request at {:?}: {}", e.fields(), e),
            LabelError::InvalidJson(e) => warn!("rejected label request: {}", e),
            LabelError::NoRate => warn!("{}", self),
        }
        (status, Json(ErrorBody { error: self.to_string() })).into_response()
    }
}

/// Create a label from a raw request body.
///
/// The API key is checked before the body is even parsed, so a misconfigured
/// server answers 500 to every request. Provider calls are made in order and
/// never retried.
#[tracing::instrument(name = "create_label", skip_all)]
pub async fn create_label<C: Connector>(config: &LabelConfig, connector: &C, body: &[u8]) -> Result<LabelResult, LabelError> {
    let api_key = config.api_key().ok_or(LabelError::MissingApiKey)?;
    let body: Value = serde_json::from_slice(body).map_err(LabelError::InvalidJson)?;
    let request = validate_request(&body)?;

    let provider = connector.connect(api_key)?;
    let shipment = provider.create_shipment(&request).await?;
    let rate = select_rate(&provider, &shipment).ok_or(LabelError::NoRate)?;
    let bought = provider.buy(&shipment, &rate).await?;

    let label_url = bought.label_url().ok_or(LabelError::MissingLabelUrl)?;
    info!("label ready for shipment [{}], tracking [{:?}]", bought.id, bought.tracking_code);
    Ok(
        LabelResult {
            label_url: label_url.to_string(),
            tracking_code: bought.tracking_code.clone(),
        }
    )
}

/// The provider's lowest preferred-carrier rate, else the first listed
/// preferred-carrier rate, else the first rate of any carrier.
pub fn select_rate<P: LabelProvider>(provider: &P, shipment: &Shipment) -> Option<Rate> {
    provider.lowest_rate(shipment, &[PREFERRED_CARRIER])
        .or_else(|| shipment.first_rate_for(PREFERRED_CARRIER).cloned())
        .or_else(|| shipment.rates.first().cloned())
}
