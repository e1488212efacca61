use std::time::Duration;
use log::{info, warn};
use reqwest::{Client, Response, Url};
use serde::{Deserialize, Serialize};
use crate::address::model::{Address, LabelRequest, Parcel};
use crate::provider::{Connector, LabelProvider, ProviderError, Rate, Shipment};

pub const DEFAULT_BASE_URL: &str = "https://api.easypost.com/v2";

/// Makes one [`EasyPostClient`] per request from the configured API key.
#[derive(Debug, Clone)]
pub struct EasyPostConnector {
    base_url: Url,
    timeout: Duration,
}

impl EasyPostConnector {
    pub fn new(base_url: Url, timeout: Duration) -> Self {
        Self {
            base_url,
            timeout,
        }
    }
}

impl Connector for EasyPostConnector {
    type Provider = EasyPostClient;

    fn connect(&self, api_key: &str) -> Result<EasyPostClient, ProviderError> {
        EasyPostClient::new(self.base_url.clone(), api_key, self.timeout)
    }
}

/// HTTP client for the EasyPost shipments API
pub struct EasyPostClient {
    client: Client,
    base_url: Url,
    api_key: String,
}

impl EasyPostClient {
    pub fn new(base_url: Url, api_key: impl Into<String>, timeout: Duration) -> Result<Self, ProviderError> {
        Ok(
            Self {
                client: Client::builder()
                    .timeout(timeout)
                    .build()?,
                base_url,
                api_key: api_key.into(),
            }
        )
    }

    /// `base_url` joined with `path`, keeping any path prefix such as `/v2`
    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.as_str().trim_end_matches('/'), path)
    }

    async fn post<B: Serialize>(&self, path: &str, body: &B) -> Result<Shipment, ProviderError> {
        let resp = self.client
            .post(self.endpoint(path))
            .basic_auth(&self.api_key, None::<&str>)
            .json(body)
            .send()
            .await?;
        Self::read_shipment(resp).await
    }

    async fn read_shipment(resp: Response) -> Result<Shipment, ProviderError> {
        let status = resp.status();
        if !status.is_success() {
            // the body may not be JSON at all, e.g. from a proxy in front of EasyPost
            let message = resp.json::<ErrorBody>().await
                .ok()
                .and_then(|body| body.error.message);
            warn!("EasyPost responded with [{}]: {:?}", status, message);
            return Err(ProviderError::Rejected {
                status: status.as_u16(),
                message,
            });
        }
        Ok(resp.json::<Shipment>().await?)
    }
}

impl LabelProvider for EasyPostClient {
    async fn create_shipment(&self, request: &LabelRequest) -> Result<Shipment, ProviderError> {
        let body = CreateShipment {
            shipment: ShipmentParams::from(request),
        };
        let shipment = self.post("shipments", &body).await?;
        info!("created shipment [{}] with [{}] rates", shipment.id, shipment.rates.len());
        Ok(shipment)
    }

    fn lowest_rate(&self, shipment: &Shipment, carriers: &[&str]) -> Option<Rate> {
        shipment.lowest_rate(carriers).cloned()
    }

    async fn buy(&self, shipment: &Shipment, rate: &Rate) -> Result<Shipment, ProviderError> {
        let body = BuyShipment {
            rate: RateRef { id: &rate.id },
        };
        let bought = self.post(&format!("shipments/{}/buy", shipment.id), &body).await?;
        info!("bought rate [{}] ({}) for shipment [{}]", rate.id, rate.carrier, bought.id);
        Ok(bought)
    }
}

#[derive(Debug, Serialize)]
struct CreateShipment<'a> {
    shipment: ShipmentParams<'a>,
}

#[derive(Debug, Serialize)]
struct ShipmentParams<'a> {
    from_address: &'a Address,
    to_address: &'a Address,
    parcel: &'a Parcel,
}

impl<'a> From<&'a LabelRequest> for ShipmentParams<'a> {
    fn from(request: &'a LabelRequest) -> Self {
        Self {
            from_address: &request.from_address,
            to_address: &request.to_address,
            parcel: &request.parcel,
        }
    }
}

#[derive(Debug, Serialize)]
struct BuyShipment<'a> {
    rate: RateRef<'a>,
}

#[derive(Debug, Serialize)]
struct RateRef<'a> {
    id: &'a str,
}

/// `{"error": {"code": "...", "message": "..."}}`
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    #[serde(default)]
    message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> EasyPostClient {
        EasyPostClient::new(base.parse().unwrap(), "key", Duration::from_secs(1)).unwrap()
    }

    #[test]
    fn endpoint_keeps_version_prefix() {
        assert_eq!(client("https://api.easypost.com/v2").endpoint("shipments"), "https://api.easypost.com/v2/shipments");
        assert_eq!(client("https://api.easypost.com/v2/").endpoint("shipments"), "https://api.easypost.com/v2/shipments");
    }

    #[test]
    fn decodes_error_body() {
        let body: ErrorBody = serde_json::from_str(
            r#"{"error": {"code": "ADDRESS.VERIFY.FAILURE", "message": "Unable to verify address.", "errors": []}}"#,
        )
        .unwrap();
        assert_eq!(body.error.message.as_deref(), Some("Unable to verify address."));
    }
}
