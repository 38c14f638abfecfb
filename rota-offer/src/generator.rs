use rota_core::NormalizedFlight;

use crate::airlines::airline_name;
use crate::signature::signature_of;

/// Fixed shape of one synthetic flight
struct MockTemplate {
    airline_code: &'static str,
    flight_number: &'static str,
    departs_at: &'static str,
    arrives_at: &'static str,
    duration: &'static str,
    stops: u32,
    aircraft: &'static str,
    fare: f64,
    miles: u64,
}

const MOCK_CURRENCY: &str = "BRL";

static TEMPLATES: [MockTemplate; 2] = [
    MockTemplate {
        airline_code: "LA",
        flight_number: "LA 3300",
        departs_at: "08:00:00",
        arrives_at: "10:15:00",
        duration: "PT2H15M",
        stops: 0,
        aircraft: "Airbus A320",
        fare: 1250.0,
        miles: 12_500,
    },
    MockTemplate {
        airline_code: "G3",
        flight_number: "G3 1450",
        departs_at: "13:30:00",
        arrives_at: "18:45:00",
        duration: "PT5H15M",
        stops: 1,
        aircraft: "Boeing 737-800",
        fare: 980.0,
        miles: 9_800,
    },
];

/// Two representative flights (one direct, one with a stop) on the
/// requested route and date, used when no real offer survives the pipeline.
///
/// Output depends only on the arguments.
pub fn mock_flights(origin: &str, destination: &str, departure_date: &str) -> Vec<NormalizedFlight> {
    TEMPLATES
        .iter()
        .map(|t| {
            let airline = airline_name(t.airline_code).unwrap_or(t.airline_code).to_string();
            let departure = format!("{}T{}", departure_date, t.departs_at);
            let arrival = format!("{}T{}", departure_date, t.arrives_at);

            NormalizedFlight {
                signature: signature_of(&airline, t.flight_number, &departure, &arrival),
                airline,
                flight_number: t.flight_number.to_string(),
                origin: origin.to_string(),
                destination: destination.to_string(),
                departure,
                arrival,
                duration: t.duration.to_string(),
                stops: t.stops,
                aircraft: Some(t.aircraft.to_string()),
                operated_by: None,
                fare_from: Some(t.fare),
                currency: Some(MOCK_CURRENCY.to_string()),
                miles: Some(t.miles),
            }
        })
        .collect()
}
