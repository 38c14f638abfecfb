use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::search::{CabinClass, SearchParams};
use crate::{CoreError, CoreResult};

// ============================================================================
// Outbound request (GDS-style shopping endpoint)
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderSearchRequest {
    pub origin_location_code: String,
    pub destination_location_code: String,
    pub departure_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_date: Option<String>,
    pub adults: u32,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub children: u32,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub infants: u32,
    pub travel_class: CabinClass,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub included_airline_codes: Option<String>,
    pub currency_code: String,
    pub max: u32,
}

fn is_zero(n: &u32) -> bool {
    *n == 0
}

impl ProviderSearchRequest {
    /// Build the provider payload from already sanitized params
    pub fn from_params(params: &SearchParams, currency_code: &str, max: u32) -> Self {
        let included_airline_codes = if params.airlines.is_empty() {
            None
        } else {
            Some(params.airlines.join(","))
        };

        Self {
            origin_location_code: params.origin.clone(),
            destination_location_code: params.destination.clone(),
            departure_date: params.departure_date.clone(),
            return_date: params.return_date.clone(),
            adults: params.adults,
            children: params.children,
            infants: params.infants,
            travel_class: params.cabin_class,
            included_airline_codes,
            currency_code: currency_code.to_string(),
            max,
        }
    }
}

// ============================================================================
// Inbound offers
// ============================================================================

/// A number the upstream may send either as JSON number or as a string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LooseNumber {
    Number(f64),
    Text(String),
}

impl LooseNumber {
    /// The value if it is (or starts with) a finite number, so `"1500.00 BRL"` reads as 1500
    pub fn as_finite(&self) -> Option<f64> {
        let value = match self {
            LooseNumber::Number(n) => *n,
            LooseNumber::Text(s) => leading_float(s)?,
        };
        value.is_finite().then_some(value)
    }

    /// The value as a non-negative whole count, truncating fractions
    pub fn as_count(&self) -> Option<u64> {
        self.as_finite().filter(|v| *v >= 0.0).map(|v| v as u64)
    }
}

/// Longest numeric prefix of `s` (after leading whitespace) that parses as a float
fn leading_float(s: &str) -> Option<f64> {
    let s = s.trim_start();
    let end = s
        .find(|c: char| !(c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E')))
        .unwrap_or(s.len());
    (1..=end).rev().find_map(|i| s[..i].parse::<f64>().ok())
}

// Upstream fields are optional at every level and their JSON types drift
// between providers. A wrong type on one field must only lose that field:
// whether an offer survives is decided by its timestamps alone.

/// Any value that does not fit `T` becomes `None`
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// Strings as-is, numbers as their decimal text, `{code}`/`{name}` objects as
/// that member; anything else is `None`
fn loose_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Object(map) => ["code", "name"]
            .iter()
            .find_map(|key| map.get(*key).and_then(Value::as_str))
            .map(str::to_string),
        _ => None,
    })
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegPoint {
    #[serde(default, alias = "iataCode", deserialize_with = "loose_text")]
    pub airport: Option<String>,
    #[serde(default, alias = "at", deserialize_with = "lenient")]
    pub time: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutboundLeg {
    #[serde(default, deserialize_with = "lenient")]
    pub departure: Option<LegPoint>,
    #[serde(default, deserialize_with = "lenient")]
    pub arrival: Option<LegPoint>,
    #[serde(default, deserialize_with = "loose_text")]
    pub duration: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub stops: Option<LooseNumber>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OfferPrice {
    #[serde(default, deserialize_with = "lenient")]
    pub total: Option<LooseNumber>,
    #[serde(default, deserialize_with = "lenient")]
    pub base: Option<LooseNumber>,
    #[serde(default, alias = "currencyCode", deserialize_with = "loose_text")]
    pub currency: Option<String>,
}

/// One upstream offer, pre-normalization. Every field is optional; the
/// accessors below resolve the alternate locations a field may live in.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimplifiedOffer {
    #[serde(default, deserialize_with = "loose_text")]
    pub airline: Option<String>,
    #[serde(default, deserialize_with = "loose_text")]
    pub flight_number: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub outbound: Option<OutboundLeg>,
    #[serde(default, deserialize_with = "loose_text")]
    pub duration: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub stops: Option<LooseNumber>,
    #[serde(default, deserialize_with = "lenient")]
    pub price: Option<OfferPrice>,
    #[serde(default, deserialize_with = "loose_text")]
    pub aircraft: Option<String>,
    #[serde(default, deserialize_with = "loose_text")]
    pub operated_by: Option<String>,
    #[serde(default, deserialize_with = "loose_text")]
    pub signature: Option<String>,
    #[serde(default, alias = "milhas", deserialize_with = "lenient")]
    pub miles: Option<LooseNumber>,
}

fn non_empty(value: Option<&String>) -> Option<&str> {
    value.map(|s| s.as_str()).filter(|s| !s.trim().is_empty())
}

impl SimplifiedOffer {
    pub fn airline(&self) -> Option<&str> {
        non_empty(self.airline.as_ref())
    }

    pub fn flight_number(&self) -> Option<&str> {
        non_empty(self.flight_number.as_ref())
    }

    fn departure_point(&self) -> Option<&LegPoint> {
        self.outbound.as_ref()?.departure.as_ref()
    }

    fn arrival_point(&self) -> Option<&LegPoint> {
        self.outbound.as_ref()?.arrival.as_ref()
    }

    pub fn departure_time(&self) -> Option<&str> {
        non_empty(self.departure_point()?.time.as_ref())
    }

    pub fn arrival_time(&self) -> Option<&str> {
        non_empty(self.arrival_point()?.time.as_ref())
    }

    pub fn origin_airport(&self) -> Option<&str> {
        non_empty(self.departure_point()?.airport.as_ref())
    }

    pub fn destination_airport(&self) -> Option<&str> {
        non_empty(self.arrival_point()?.airport.as_ref())
    }

    /// Leg-level duration wins over the offer-level one
    pub fn duration(&self) -> Option<&str> {
        self.outbound
            .as_ref()
            .and_then(|leg| non_empty(leg.duration.as_ref()))
            .or_else(|| non_empty(self.duration.as_ref()))
    }

    pub fn stops(&self) -> Option<u32> {
        self.outbound
            .as_ref()
            .and_then(|leg| leg.stops.as_ref())
            .or(self.stops.as_ref())
            .and_then(LooseNumber::as_count)
            .map(|n| n.min(u32::MAX as u64) as u32)
    }

    /// Total fare, falling back to the base fare
    pub fn fare_amount(&self) -> Option<&LooseNumber> {
        let price = self.price.as_ref()?;
        price.total.as_ref().or(price.base.as_ref())
    }

    pub fn currency(&self) -> Option<&str> {
        non_empty(self.price.as_ref()?.currency.as_ref())
    }

    pub fn signature(&self) -> Option<&str> {
        non_empty(self.signature.as_ref())
    }

    pub fn miles(&self) -> Option<u64> {
        self.miles.as_ref().and_then(LooseNumber::as_count)
    }
}

/// Pull the offer list out of a search endpoint body.
///
/// Accepts a top-level array or an object carrying `results`, `data` or
/// `offers`. Elements that are not JSON objects are dropped; fields of the
/// wrong type inside an object are discarded individually.
pub fn extract_offers(body: Value) -> CoreResult<Vec<SimplifiedOffer>> {
    let items = match body {
        Value::Array(items) => items,
        Value::Object(mut map) => ["results", "data", "offers"]
            .iter()
            .find_map(|key| match map.remove(*key) {
                Some(Value::Array(items)) => Some(items),
                _ => None,
            })
            .ok_or_else(|| {
                CoreError::Payload("object body has no results/data/offers array".to_string())
            })?,
        other => {
            return Err(CoreError::Payload(format!(
                "expected an array or object body, got {}",
                json_kind(&other)
            )))
        }
    };

    let total = items.len();
    let offers: Vec<SimplifiedOffer> = items
        .into_iter()
        .filter_map(|item| match serde_json::from_value::<SimplifiedOffer>(item) {
            Ok(offer) => Some(offer),
            Err(e) => {
                tracing::debug!(error = %e, "Dropping upstream element that is not an offer");
                None
            }
        })
        .collect();

    if offers.len() < total {
        tracing::warn!(total, parsed = offers.len(), "Some upstream offers could not be parsed");
    }

    Ok(offers)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
