/// Identity of a flight occurrence: `airline|flightNumber|departure|arrival`.
///
/// Inputs are joined verbatim. Callers pass display strings that are
/// already normalized, so two offers for the same departure collapse to
/// one key regardless of fare or equipment.
pub fn signature_of(airline: &str, flight_number: &str, departure: &str, arrival: &str) -> String {
    format!("{}|{}|{}|{}", airline, flight_number, departure, arrival)
}
