//! Request validation for label creation.
//!
//! Checks are fail-fast: the first problem found is the only one reported. Address
//! fields are checked state, ZIP, street, city, then name; the from address is
//! checked before the to address, and both before the parcel.

use std::fmt;
use serde_json::{Map, Value};
use thiserror::Error;
use crate::address::model::{Address, LabelRequest, Parcel, COUNTRY};
use crate::address::{is_valid_state, is_valid_zip, normalize_zip};
use crate::utils::{non_blank_str, positive_number, present_str};

/// which of the two addresses a problem was found in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    From,
    To,
}

impl Side {
    fn key(&self) -> &'static str {
        match self {
            Side::From => "from_address",
            Side::To => "to_address",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::From => f.write_str("From address"),
            Side::To => f.write_str("To address"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AddressError {
    #[error("State is required")]
    MissingState,
    #[error("Invalid state code")]
    InvalidState,
    #[error("ZIP is required")]
    MissingZip,
    #[error("ZIP must be 5 or 9 digits (12345 or 12345-6789)")]
    InvalidZip,
    #[error("Street address is required")]
    MissingStreet,
    #[error("City is required")]
    MissingCity,
    #[error("Name is required")]
    MissingName,
}

impl AddressError {
    /// the request field this error points at
    pub fn field(&self) -> &'static str {
        match self {
            AddressError::MissingState | AddressError::InvalidState => "state",
            AddressError::MissingZip | AddressError::InvalidZip => "zip",
            AddressError::MissingStreet => "street1",
            AddressError::MissingCity => "city",
            AddressError::MissingName => "name",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ParcelError {
    #[error("Package weight must be a positive number (ounces)")]
    Weight,
    /// reported once for all three dimensions
    #[error("Package length, width, and height must be positive numbers (inches)")]
    Dimensions,
}

impl ParcelError {
    pub fn fields(&self) -> &'static [&'static str] {
        match self {
            ParcelError::Weight => &["weight"],
            ParcelError::Dimensions => &["length", "width", "height"],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Request body is required")]
    NotAnObject,
    #[error("from_address, to_address, and parcel are required")]
    MissingSections,
    #[error("{side}: {error}")]
    Address { side: Side, error: AddressError },
    #[error(transparent)]
    Parcel(#[from] ParcelError),
}

impl ValidationError {
    /// Dotted paths of the offending request fields, e.g. `from_address.zip`.
    ///
    /// Empty when the request shape itself is wrong.
    pub fn fields(&self) -> Vec<String> {
        match self {
            ValidationError::NotAnObject => Vec::new(),
            ValidationError::MissingSections => ["from_address", "to_address", "parcel"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            ValidationError::Address { side, error } => vec![format!("{}.{}", side.key(), error.field())],
            ValidationError::Parcel(error) => error.fields()
                .iter()
                .map(|field| format!("parcel.{field}"))
                .collect(),
        }
    }
}

/// Validate a raw request body and normalize it into a [`LabelRequest`].
pub fn validate_request(body: &Value) -> Result<LabelRequest, ValidationError> {
    let body = body.as_object().ok_or(ValidationError::NotAnObject)?;

    let section = |key: &str| body.get(key).and_then(Value::as_object);
    let (Some(from), Some(to), Some(parcel)) = (section("from_address"), section("to_address"), section("parcel")) else {
        return Err(ValidationError::MissingSections);
    };

    let from_address = validate_address(from)
        .map_err(|error| ValidationError::Address { side: Side::From, error })?;
    let to_address = validate_address(to)
        .map_err(|error| ValidationError::Address { side: Side::To, error })?;
    let parcel = validate_parcel(parcel)?;

    Ok(
        LabelRequest {
            from_address,
            to_address,
            parcel,
        }
    )
}

/// Check one address and return it trimmed, with the state upper-cased, the ZIP
/// normalized and the country pinned to US.
pub fn validate_address(address: &Map<String, Value>) -> Result<Address, AddressError> {
    let state = present_str(address.get("state")).ok_or(AddressError::MissingState)?;
    if !is_valid_state(state) {
        return Err(AddressError::InvalidState);
    }
    let zip = present_str(address.get("zip")).ok_or(AddressError::MissingZip)?;
    if !is_valid_zip(zip) {
        return Err(AddressError::InvalidZip);
    }
    let street1 = non_blank_str(address.get("street1")).ok_or(AddressError::MissingStreet)?;
    let city = non_blank_str(address.get("city")).ok_or(AddressError::MissingCity)?;
    let name = non_blank_str(address.get("name")).ok_or(AddressError::MissingName)?;

    Ok(
        Address {
            name: name.to_string(),
            street1: street1.to_string(),
            street2: non_blank_str(address.get("street2")).map(str::to_string),
            city: city.to_string(),
            state: state.to_uppercase(),
            zip: normalize_zip(zip),
            country: COUNTRY.to_string(),
        }
    )
}

/// Weight is checked on its own first; dimensions are only looked at once it passes.
pub fn validate_parcel(parcel: &Map<String, Value>) -> Result<Parcel, ParcelError> {
    let weight = positive_number(parcel.get("weight")).ok_or(ParcelError::Weight)?;
    let dimension = |key: &str| positive_number(parcel.get(key));
    let (Some(length), Some(width), Some(height)) = (dimension("length"), dimension("width"), dimension("height")) else {
        return Err(ParcelError::Dimensions);
    };
    Ok(
        Parcel {
            weight,
            length,
            width,
            height,
        }
    )
}
