//! Buy a USPS shipping label for a parcel between two US addresses.
//!
//! The request body is validated and normalized by [`validate`], then
//! [`handler::create_label`] drives the provider: create shipment, pick a rate,
//! buy it. [`easypost`] is the provider used in production.

pub mod address;
pub mod config;
pub mod easypost;
pub mod handler;
pub mod provider;
pub mod server;
pub mod utils;
pub mod validate;
