//! # Customer Record
//!
//! Fixed-shape buyer record for the checkout form, built by normalizing the
//! loosely-keyed customer data merchants typically hold (`cep`, `tel1`,
//! `tel2`, ...). Only known fields are ever copied over; unrecognized keys
//! are ignored.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Shipping type accepted by the gateway checkout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShippingType {
    /// Code 1 - standard post (PAC)
    Pac,
    /// Code 2 - express (SEDEX)
    Sedex,
    /// Code 3 - shipping type not specified
    Unspecified,
}

impl ShippingType {
    /// The gateway's numeric code for this shipping type
    pub fn code(&self) -> u8 {
        match self {
            ShippingType::Pac => 1,
            ShippingType::Sedex => 2,
            ShippingType::Unspecified => 3,
        }
    }
}

impl Default for ShippingType {
    fn default() -> Self {
        ShippingType::Unspecified
    }
}

impl TryFrom<u8> for ShippingType {
    type Error = Error;

    fn try_from(code: u8) -> Result<Self> {
        match code {
            1 => Ok(ShippingType::Pac),
            2 => Ok(ShippingType::Sedex),
            3 => Ok(ShippingType::Unspecified),
            other => Err(Error::Validation(format!(
                "shipping type must be 1, 2 or 3, got {other}"
            ))),
        }
    }
}

/// Buyer record rendered into the checkout form's `sender*` and
/// `shippingAddress*` fields.
///
/// All fields are optional from the gateway's point of view; empty fields are
/// omitted from the rendered form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Customer {
    /// Full buyer name
    pub name: String,

    /// Two-digit phone area code
    pub area_code: String,

    /// Phone number, digits only
    pub phone: String,

    /// Buyer e-mail
    pub email: String,

    /// Shipping type (defaults to unspecified)
    pub shipping_type: ShippingType,

    /// Postal code (CEP), punctuation stripped
    pub postal_code: String,

    /// Street name
    pub street: String,

    /// Street number
    pub number: String,

    /// Address complement
    pub complement: String,

    /// District / neighborhood
    pub district: String,

    /// City
    pub city: String,

    /// State (UF)
    pub state: String,

    /// ISO country code (defaults to "BRA")
    pub country: String,
}

impl Default for Customer {
    fn default() -> Self {
        Self {
            name: String::new(),
            area_code: String::new(),
            phone: String::new(),
            email: String::new(),
            shipping_type: ShippingType::Unspecified,
            postal_code: String::new(),
            street: String::new(),
            number: String::new(),
            complement: String::new(),
            district: String::new(),
            city: String::new(),
            state: String::new(),
            country: "BRA".to_string(),
        }
    }
}

impl Customer {
    /// Build a customer record from a loosely-keyed JSON object.
    ///
    /// Starts from [`Customer::default`] and applies the normalization rules
    /// of [`Customer::merge_raw`]. Fails with [`Error::Validation`] if the
    /// value is not a JSON object.
    pub fn from_raw(raw: &Value) -> Result<Self> {
        let mut customer = Customer::default();
        customer.merge_raw(raw)?;
        Ok(customer)
    }

    /// Merge a loosely-keyed JSON object onto this record.
    ///
    /// Normalization rules:
    /// - `cep` maps to `postal_code` with all commas, periods and spaces
    ///   stripped.
    /// - `tel1` derives `area_code` (first 2 characters) and `phone` (last 8
    ///   characters after removing hyphens).
    /// - `tel2` derives the same values, but only when `tel1` did not yield a
    ///   2-character area code.
    /// - `num` maps to `number`.
    /// - Canonical field names (`name`, `email`, `street`, ...) copy
    ///   verbatim; anything else is ignored.
    ///
    /// Only fields present in the input are overwritten.
    pub fn merge_raw(&mut self, raw: &Value) -> Result<()> {
        let map = raw
            .as_object()
            .ok_or_else(|| Error::Validation("customer data must be a JSON object".to_string()))?;

        // Phones first: tel1 takes precedence over tel2 unless its derived
        // area code is not exactly two characters long.
        let mut staged_area: Option<String> = None;
        let mut staged_phone: Option<String> = None;
        if let Some(tel1) = map.get("tel1").and_then(scalar_string) {
            let (area, phone) = split_phone(&tel1);
            staged_area = Some(area);
            staged_phone = Some(phone);
        }
        if let Some(tel2) = map.get("tel2").and_then(scalar_string) {
            if staged_area.as_ref().map(|a| a.chars().count()) != Some(2) {
                let (area, phone) = split_phone(&tel2);
                staged_area = Some(area);
                staged_phone = Some(phone);
            }
        }

        for (key, value) in map {
            let Some(text) = scalar_string(value) else {
                continue;
            };
            match key.as_str() {
                "name" => self.name = text,
                "area_code" => self.area_code = text,
                "phone" => self.phone = text,
                "email" => self.email = text,
                "shipping_type" => self.shipping_type = parse_shipping_type(value)?,
                "cep" => self.postal_code = strip_cep_punctuation(&text),
                "postal_code" => self.postal_code = text,
                "street" => self.street = text,
                "num" | "number" => self.number = text,
                "complement" => self.complement = text,
                "district" => self.district = text,
                "city" => self.city = text,
                "state" => self.state = text,
                "country" => self.country = text,
                // tel1/tel2 were staged above; unknown keys are dropped
                _ => {}
            }
        }

        if let Some(area) = staged_area {
            self.area_code = area;
        }
        if let Some(phone) = staged_phone {
            self.phone = phone;
        }

        Ok(())
    }
}

/// First two characters become the area code; the phone number is the last
/// eight characters once hyphens are removed.
fn split_phone(raw: &str) -> (String, String) {
    let area: String = raw.chars().take(2).collect();
    let digits: Vec<char> = raw.chars().filter(|c| *c != '-').collect();
    let start = digits.len().saturating_sub(8);
    let phone: String = digits[start..].iter().collect();
    (area, phone)
}

/// CEP keeps hyphens; only commas, periods and spaces are stripped.
fn strip_cep_punctuation(raw: &str) -> String {
    raw.chars()
        .filter(|c| !matches!(c, ',' | '.' | ' '))
        .collect()
}

fn parse_shipping_type(value: &Value) -> Result<ShippingType> {
    let code = match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse::<u64>().ok(),
        _ => None,
    }
    .ok_or_else(|| Error::Validation("shipping type must be numeric".to_string()))?;

    let code = u8::try_from(code)
        .map_err(|_| Error::Validation(format!("shipping type must be 1, 2 or 3, got {code}")))?;
    ShippingType::try_from(code)
}

fn scalar_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
