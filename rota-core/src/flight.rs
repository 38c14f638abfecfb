use serde::{Deserialize, Serialize, Serializer};

/// Display category of a flight, derived from its stop count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlightType {
    Direto,
    Paradas,
}

impl FlightType {
    pub fn from_stops(stops: u32) -> Self {
        if stops == 0 {
            FlightType::Direto
        } else {
            FlightType::Paradas
        }
    }
}

/// Canonical flight record every downstream consumer relies on.
///
/// `flight_type` is not stored: it is derived from `stops` on access and
/// when serializing, so it can never disagree with the stop count.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedFlight {
    pub signature: String,
    pub airline: String,
    pub flight_number: String,
    pub origin: String,
    pub destination: String,
    pub departure: String,
    pub arrival: String,
    pub duration: String,
    pub stops: u32,
    #[serde(default)]
    pub aircraft: Option<String>,
    #[serde(default)]
    pub operated_by: Option<String>,
    #[serde(default)]
    pub fare_from: Option<f64>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub miles: Option<u64>,
}

impl NormalizedFlight {
    pub fn flight_type(&self) -> FlightType {
        FlightType::from_stops(self.stops)
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FlightWire<'a> {
    signature: &'a str,
    airline: &'a str,
    flight_number: &'a str,
    origin: &'a str,
    destination: &'a str,
    departure: &'a str,
    arrival: &'a str,
    duration: &'a str,
    stops: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    aircraft: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    operated_by: Option<&'a str>,
    #[serde(rename = "type")]
    flight_type: FlightType,
    #[serde(skip_serializing_if = "Option::is_none")]
    fare_from: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    currency: Option<&'a str>,
    miles: Option<u64>,
}

impl Serialize for NormalizedFlight {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        FlightWire {
            signature: &self.signature,
            airline: &self.airline,
            flight_number: &self.flight_number,
            origin: &self.origin,
            destination: &self.destination,
            departure: &self.departure,
            arrival: &self.arrival,
            duration: &self.duration,
            stops: self.stops,
            aircraft: self.aircraft.as_deref(),
            operated_by: self.operated_by.as_deref(),
            flight_type: self.flight_type(),
            fare_from: self.fare_from,
            currency: self.currency.as_deref(),
            miles: self.miles,
        }
        .serialize(serializer)
    }
}
