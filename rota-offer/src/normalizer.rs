use rota_core::provider::LooseNumber;
use rota_core::{NormalizedFlight, SimplifiedOffer};

use crate::airlines::airline_name;
use crate::signature::signature_of;

/// Display name when an offer carries no airline or flight number at all
pub const UNKNOWN_AIRLINE: &str = "Companhia Desconhecida";
pub const DEFAULT_FLIGHT_NUMBER: &str = "---";
pub const DEFAULT_DURATION: &str = "PT0M";

/// Map one upstream offer to the canonical flight record.
///
/// Returns `None` when the outbound departure or arrival time is missing:
/// such an offer cannot be placed on a timeline and is rejected, not
/// defaulted.
pub fn normalize_offer(offer: &SimplifiedOffer) -> Option<NormalizedFlight> {
    // 1. Departure/arrival are hard requirements
    let (Some(departure), Some(arrival)) = (offer.departure_time(), offer.arrival_time()) else {
        tracing::debug!(
            airline = offer.airline().unwrap_or_default(),
            flight_number = offer.flight_number().unwrap_or_default(),
            "Dropping offer without departure/arrival time"
        );
        return None;
    };

    // 2. Carrier code and display name
    let code = resolve_code(offer);
    let airline = display_name(&code, offer.airline());

    let flight_number = offer.flight_number().unwrap_or(DEFAULT_FLIGHT_NUMBER).to_string();
    let stops = offer.stops().unwrap_or(0);

    // 3. Fare: total, then base; negative or non-finite amounts are unknown
    let fare_from = offer
        .fare_amount()
        .and_then(LooseNumber::as_finite)
        .filter(|amount| *amount >= 0.0);

    let signature = match offer.signature() {
        Some(signature) => signature.to_string(),
        None => signature_of(&airline, &flight_number, departure, arrival),
    };

    Some(NormalizedFlight {
        signature,
        airline,
        flight_number,
        origin: offer.origin_airport().unwrap_or_default().to_string(),
        destination: offer.destination_airport().unwrap_or_default().to_string(),
        departure: departure.to_string(),
        arrival: arrival.to_string(),
        duration: offer.duration().unwrap_or(DEFAULT_DURATION).to_string(),
        stops,
        aircraft: offer
            .aircraft
            .as_deref()
            .map(str::trim)
            .filter(|aircraft| !aircraft.is_empty())
            .map(str::to_string),
        operated_by: offer
            .operated_by
            .as_deref()
            .map(str::trim)
            .filter(|carrier| !carrier.is_empty())
            .map(|carrier| airline_name(carrier).unwrap_or(carrier).to_string()),
        fare_from,
        currency: offer.currency().map(str::to_string),
        miles: offer.miles(),
    })
}

/// Normalize a batch, dropping unrepresentable offers
pub fn normalize_all(offers: &[SimplifiedOffer]) -> Vec<NormalizedFlight> {
    offers.iter().filter_map(normalize_offer).collect()
}

/// Explicit airline field, else the flight number's two-character prefix
fn resolve_code(offer: &SimplifiedOffer) -> String {
    if let Some(airline) = offer.airline() {
        return airline.to_string();
    }
    offer
        .flight_number()
        .map(|number| number.chars().take(2).collect())
        .unwrap_or_default()
}

fn display_name(code: &str, raw_airline: Option<&str>) -> String {
    airline_name(code)
        .or(raw_airline)
        .or_else(|| Some(code).filter(|c| !c.trim().is_empty()))
        .unwrap_or(UNKNOWN_AIRLINE)
        .to_string()
}
