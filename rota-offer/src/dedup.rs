use rota_core::NormalizedFlight;
use std::collections::HashSet;

/// Keep the first flight seen for each signature, preserving order.
///
/// Later duplicates are discarded even when cheaper; sort first if a
/// different winner is wanted.
pub fn deduplicate(flights: impl IntoIterator<Item = NormalizedFlight>) -> Vec<NormalizedFlight> {
    let mut seen = HashSet::new();
    flights
        .into_iter()
        .filter(|flight| seen.insert(flight.signature.clone()))
        .collect()
}
