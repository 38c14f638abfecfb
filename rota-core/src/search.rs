use serde::{Deserialize, Serialize};
use std::fmt;

/// Sort strategy selected by the user for a result list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RankingMode {
    /// Fare plus a fixed penalty per stop
    #[default]
    Best,
    Cheapest,
    Fastest,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CabinClass {
    #[default]
    Economy,
    PremiumEconomy,
    Business,
    First,
}

impl CabinClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            CabinClass::Economy => "ECONOMY",
            CabinClass::PremiumEconomy => "PREMIUM_ECONOMY",
            CabinClass::Business => "BUSINESS",
            CabinClass::First => "FIRST",
        }
    }
}

impl fmt::Display for CabinClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Input of a flight search as submitted by the back-office portal.
///
/// Dates are kept as the `YYYY-MM-DD` strings the portal sends; the
/// validator is responsible for checking that they parse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchParams {
    #[serde(alias = "origem")]
    pub origin: String,
    #[serde(alias = "destino")]
    pub destination: String,
    #[serde(alias = "dataIda")]
    pub departure_date: String,
    #[serde(default, alias = "dataVolta", skip_serializing_if = "Option::is_none")]
    pub return_date: Option<String>,
    #[serde(default, alias = "somenteIda")]
    pub one_way: bool,
    #[serde(default = "default_adults", alias = "adultos")]
    pub adults: u32,
    #[serde(default, alias = "criancas")]
    pub children: u32,
    #[serde(default, alias = "bebes")]
    pub infants: u32,
    #[serde(default, alias = "classe")]
    pub cabin_class: CabinClass,
    #[serde(default, alias = "companhias")]
    pub airlines: Vec<String>,
    #[serde(default, alias = "ordenacao")]
    pub ranking: RankingMode,
}

fn default_adults() -> u32 {
    1
}

impl SearchParams {
    /// One adult, economy, one way, default ranking
    pub fn one_way(origin: &str, destination: &str, departure_date: &str) -> Self {
        Self {
            origin: origin.to_string(),
            destination: destination.to_string(),
            departure_date: departure_date.to_string(),
            return_date: None,
            one_way: true,
            adults: 1,
            children: 0,
            infants: 0,
            cabin_class: CabinClass::Economy,
            airlines: Vec::new(),
            ranking: RankingMode::Best,
        }
    }

    pub fn with_ranking(mut self, ranking: RankingMode) -> Self {
        self.ranking = ranking;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_params_deserialization() {
        let json = r#"
            {
                "origin": "gru",
                "destination": "LIS",
                "departureDate": "2099-03-10",
                "returnDate": "2099-03-20",
                "adults": 2,
                "cabinClass": "BUSINESS",
                "airlines": ["TP"],
                "ranking": "CHEAPEST"
            }
        "#;
        let params: SearchParams = serde_json::from_str(json).expect("Failed to deserialize");
        assert_eq!(params.origin, "gru");
        assert_eq!(params.return_date.as_deref(), Some("2099-03-20"));
        assert!(!params.one_way);
        assert_eq!(params.cabin_class, CabinClass::Business);
        assert_eq!(params.ranking, RankingMode::Cheapest);
        assert_eq!(params.children, 0);
    }

    #[test]
    fn test_portal_field_aliases() {
        let json = r#"
            {
                "origem": "GRU",
                "destino": "GIG",
                "dataIda": "2099-01-01",
                "somenteIda": true,
                "ordenacao": "FASTEST"
            }
        "#;
        let params: SearchParams = serde_json::from_str(json).expect("Failed to deserialize");
        assert_eq!(params.destination, "GIG");
        assert!(params.one_way);
        assert_eq!(params.adults, 1);
        assert_eq!(params.ranking, RankingMode::Fastest);
        assert_eq!(params.cabin_class, CabinClass::Economy);
    }
}
