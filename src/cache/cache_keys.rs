//! Cache Key Builders
//!
//! Pure functions turning request parameters into canonical cache keys, so
//! call sites asking for the same logical data share one entry.

use std::fmt::Display;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const EXCHANGE_RATE_KEY: &str = "exchange_rate";
pub const AGENCY_BALANCE_KEY: &str = "agency_balance";
pub const CAMPAIGNS_KEY: &str = "campaigns:active";

// == Flight Search ==
/// Key for a flight search request.
///
/// Object fields are sorted at every depth before the JSON is rendered, so
/// field order never affects the key. Array order is kept.
pub fn flight_search(params: &Value) -> String {
    format!("flight:{}", canonicalize(params))
}

fn canonicalize(value: &Value) -> Value {
    match value {
        Value::Object(fields) => {
            let mut sorted: Vec<(&String, &Value)> = fields.iter().collect();
            sorted.sort_by(|a, b| a.0.cmp(b.0));

            let mut canonical = Map::with_capacity(sorted.len());
            for (name, field) in sorted {
                canonical.insert(name.clone(), canonicalize(field));
            }
            Value::Object(canonical)
        }
        Value::Array(items) => Value::Array(items.iter().map(canonicalize).collect()),
        other => other.clone(),
    }
}

/// Typed flight search parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlightSearchParams {
    pub origin: String,
    pub destination: String,
    pub departure_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_date: Option<String>,
    pub adults: u32,
    #[serde(default)]
    pub children: u32,
    #[serde(default)]
    pub infants: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cabin_class: Option<String>,
}

impl FlightSearchParams {
    /// Same key `flight_search` yields for the equivalent JSON object.
    pub fn cache_key(&self) -> String {
        let mut fields = Map::new();
        fields.insert("origin".into(), Value::from(self.origin.as_str()));
        fields.insert("destination".into(), Value::from(self.destination.as_str()));
        fields.insert("departure_date".into(), Value::from(self.departure_date.as_str()));
        if let Some(date) = &self.return_date {
            fields.insert("return_date".into(), Value::from(date.as_str()));
        }
        fields.insert("adults".into(), Value::from(self.adults));
        fields.insert("children".into(), Value::from(self.children));
        fields.insert("infants".into(), Value::from(self.infants));
        if let Some(cabin) = &self.cabin_class {
            fields.insert("cabin_class".into(), Value::from(cabin.as_str()));
        }
        flight_search(&Value::Object(fields))
    }
}

// == Reference Data ==
pub fn airport_data(code: &str) -> String {
    format!("airport:{}", code)
}

pub fn exchange_rate() -> String {
    EXCHANGE_RATE_KEY.to_string()
}

// == Agency / User ==
pub fn user_profile(id: impl Display) -> String {
    format!("user:{}", id)
}

pub fn agency_balance() -> String {
    AGENCY_BALANCE_KEY.to_string()
}

pub fn campaigns() -> String {
    CAMPAIGNS_KEY.to_string()
}
