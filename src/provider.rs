//! The label-purchase provider seam.
//!
//! The handler only talks to a [`LabelProvider`]; [`crate::easypost`] is the real
//! one and tests substitute their own.

use std::future::Future;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use crate::address::model::LabelRequest;

/// A carrier/service quote attached to a saved shipment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rate {
    pub id: String,
    pub carrier: String,
    #[serde(default)]
    pub service: Option<String>,
    /// decimal price as sent by the provider, e.g. `"7.58"`
    #[serde(default)]
    pub rate: Option<String>,
}

impl Rate {
    fn price(&self) -> Option<f64> {
        self.rate.as_deref()?.trim().parse().ok()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostageLabel {
    #[serde(default)]
    pub label_url: Option<String>,
}

/// A shipment as the provider sees it, before or after purchase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shipment {
    pub id: String,
    #[serde(default)]
    pub rates: Vec<Rate>,
    #[serde(default)]
    pub postage_label: Option<PostageLabel>,
    #[serde(default)]
    pub tracking_code: Option<String>,
}

impl Shipment {
    /// cheapest rate offered by any of `carriers`, compared case-insensitively
    pub fn lowest_rate(&self, carriers: &[&str]) -> Option<&Rate> {
        self.rates.iter()
            .filter(|rate| carriers.iter().any(|c| c.eq_ignore_ascii_case(&rate.carrier)))
            .filter_map(|rate| rate.price().map(|price| (price, rate)))
            .min_by(|(p1, _), (p2, _)| p1.total_cmp(p2))
            .map(|(_, rate)| rate)
    }

    /// the first listed rate from `carrier`, whatever its price
    pub fn first_rate_for(&self, carrier: &str) -> Option<&Rate> {
        self.rates.iter().find(|rate| rate.carrier == carrier)
    }

    pub fn label_url(&self) -> Option<&str> {
        self.postage_label.as_ref()?.label_url.as_deref()
    }
}

#[derive(Debug, Error)]
pub enum ProviderError {
    /// The provider answered with an error status. `message` is the nested
    /// human-readable text from its error body, when it sent one.
    #[error("provider responded with status {status}")]
    Rejected {
        status: u16,
        message: Option<String>,
    },
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error("{0}")]
    Other(String),
}

impl ProviderError {
    /// the provider's own explanation, if its error body carried one
    pub fn nested_message(&self) -> Option<&str> {
        match self {
            ProviderError::Rejected { message, .. } => message.as_deref(),
            _ => None,
        }
    }
}

/// Creates and buys shipments with a label-purchase provider.
pub trait LabelProvider: Send + Sync {
    /// create the shipment and save it provider-side, returning it with its rates
    fn create_shipment(&self, request: &LabelRequest) -> impl Future<Output = Result<Shipment, ProviderError>> + Send;

    /// The provider's "lowest rate for these carriers" query.
    ///
    /// `None` means the query is unsupported or found nothing, and the caller
    /// falls back to scanning the rate list itself.
    fn lowest_rate(&self, shipment: &Shipment, carriers: &[&str]) -> Option<Rate> {
        let _ = (shipment, carriers);
        None
    }

    /// purchase `rate`, returning the shipment with its postage label attached
    fn buy(&self, shipment: &Shipment, rate: &Rate) -> impl Future<Output = Result<Shipment, ProviderError>> + Send;
}

/// Builds a [`LabelProvider`] from an API key. Called once per request.
pub trait Connector: Clone + Send + Sync + 'static {
    type Provider: LabelProvider;

    fn connect(&self, api_key: &str) -> Result<Self::Provider, ProviderError>;
}
