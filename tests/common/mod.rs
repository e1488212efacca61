//! Shared fixtures: request bodies and a scripted provider.

#![allow(dead_code)]

use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use serde_json::{json, Value};
use usps_label::address::model::LabelRequest;
use usps_label::provider::{Connector, LabelProvider, PostageLabel, ProviderError, Rate, Shipment};

pub fn valid_address() -> Value {
    json!({
        "name": "Jane Doe",
        "street1": "123 Main St",
        "street2": "",
        "city": "San Francisco",
        "state": "CA",
        "zip": "94102",
        "country": "US",
    })
}

pub fn valid_body() -> Value {
    let mut to = valid_address();
    to["name"] = json!("John Doe");
    to["street1"] = json!("456 Oak Ave");
    to["zip"] = json!("90210");
    json!({
        "from_address": valid_address(),
        "to_address": to,
        "parcel": { "weight": 16, "length": 8, "width": 5, "height": 5 },
    })
}

pub fn usps_rate(id: &str, price: &str) -> Rate {
    Rate {
        id: id.to_string(),
        carrier: "USPS".to_string(),
        service: Some("GroundAdvantage".to_string()),
        rate: Some(price.to_string()),
    }
}

pub fn saved_shipment(rates: Vec<Rate>) -> Shipment {
    Shipment {
        id: "shp_test".to_string(),
        rates,
        postage_label: None,
        tracking_code: None,
    }
}

pub fn purchased(label_url: Option<&str>, tracking_code: Option<&str>) -> Shipment {
    Shipment {
        id: "shp_test".to_string(),
        rates: Vec::new(),
        postage_label: Some(PostageLabel {
            label_url: label_url.map(str::to_string),
        }),
        tracking_code: tracking_code.map(str::to_string),
    }
}

/// What a scripted provider call resolves to.
#[derive(Debug, Clone)]
pub enum Outcome {
    Ok(Shipment),
    Rejected { status: u16, message: Option<String> },
    Failed(String),
}

impl Outcome {
    fn resolve(&self) -> Result<Shipment, ProviderError> {
        match self {
            Outcome::Ok(shipment) => Ok(shipment.clone()),
            Outcome::Rejected { status, message } => Err(ProviderError::Rejected {
                status: *status,
                message: message.clone(),
            }),
            Outcome::Failed(message) => Err(ProviderError::Other(message.clone())),
        }
    }
}

#[derive(Debug, Default)]
pub struct Calls {
    pub connects: AtomicUsize,
    pub creates: AtomicUsize,
    pub buys: AtomicUsize,
    pub api_key: Mutex<Option<String>>,
    pub created: Mutex<Option<LabelRequest>>,
    pub bought_rate: Mutex<Option<String>>,
}

/// Connector whose providers replay canned shipments and record what they were asked.
#[derive(Debug, Clone)]
pub struct ScriptedConnector {
    pub create: Outcome,
    pub lowest: Option<Rate>,
    pub buy: Outcome,
    pub calls: Arc<Calls>,
}

impl ScriptedConnector {
    /// a provider that offers one USPS rate and returns a label with tracking
    pub fn happy() -> Self {
        Self {
            create: Outcome::Ok(saved_shipment(vec![usps_rate("rate_1", "5.93")])),
            lowest: Some(usps_rate("rate_1", "5.93")),
            buy: Outcome::Ok(purchased(Some("https://example.com/label.pdf"), Some("TRACK123"))),
            calls: Arc::default(),
        }
    }
}

pub struct ScriptedProvider {
    script: ScriptedConnector,
}

impl Connector for ScriptedConnector {
    type Provider = ScriptedProvider;

    fn connect(&self, api_key: &str) -> Result<ScriptedProvider, ProviderError> {
        self.calls.connects.fetch_add(1, Ordering::SeqCst);
        *self.calls.api_key.lock().unwrap() = Some(api_key.to_string());
        Ok(ScriptedProvider { script: self.clone() })
    }
}

impl LabelProvider for ScriptedProvider {
    fn create_shipment(&self, request: &LabelRequest) -> impl Future<Output = Result<Shipment, ProviderError>> + Send {
        let calls = &self.script.calls;
        calls.creates.fetch_add(1, Ordering::SeqCst);
        *calls.created.lock().unwrap() = Some(request.clone());
        let result = self.script.create.resolve();
        async move { result }
    }

    fn lowest_rate(&self, _: &Shipment, _: &[&str]) -> Option<Rate> {
        self.script.lowest.clone()
    }

    fn buy(&self, _: &Shipment, rate: &Rate) -> impl Future<Output = Result<Shipment, ProviderError>> + Send {
        let calls = &self.script.calls;
        calls.buys.fetch_add(1, Ordering::SeqCst);
        *calls.bought_rate.lock().unwrap() = Some(rate.id.clone());
        let result = self.script.buy.resolve();
        async move { result }
    }
}
