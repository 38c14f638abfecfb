/// IATA carrier code to display name for the carriers the agency sells most.
static AIRLINES: &[(&str, &str)] = &[
    ("AA", "American Airlines"),
    ("AD", "Azul"),
    ("AF", "Air France"),
    ("AM", "Aeromexico"),
    ("AR", "Aerolíneas Argentinas"),
    ("AV", "Avianca"),
    ("AZ", "ITA Airways"),
    ("BA", "British Airways"),
    ("CM", "Copa Airlines"),
    ("DL", "Delta Air Lines"),
    ("EK", "Emirates"),
    ("ET", "Ethiopian Airlines"),
    ("G3", "GOL"),
    ("H2", "Sky Airline"),
    ("IB", "Iberia"),
    ("JJ", "LATAM"),
    ("KL", "KLM"),
    ("LA", "LATAM"),
    ("LH", "Lufthansa"),
    ("LX", "Swiss"),
    ("QR", "Qatar Airways"),
    ("TK", "Turkish Airlines"),
    ("TP", "TAP Air Portugal"),
    ("UA", "United Airlines"),
    ("UX", "Air Europa"),
];

/// Display name for a carrier code, ignoring case and surrounding whitespace
pub fn airline_name(code: &str) -> Option<&'static str> {
    let code = code.trim();
    AIRLINES
        .iter()
        .find(|(known, _)| known.eq_ignore_ascii_case(code))
        .map(|(_, name)| *name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup() {
        assert_eq!(airline_name("LA"), Some("LATAM"));
        assert_eq!(airline_name(" g3 "), Some("GOL"));
        assert_eq!(airline_name("ZZ"), None);
        assert_eq!(airline_name(""), None);
    }

    #[test]
    fn test_table_codes_are_unique() {
        let mut codes: Vec<&str> = AIRLINES.iter().map(|(code, _)| *code).collect();
        codes.sort();
        codes.dedup();
        assert_eq!(codes.len(), AIRLINES.len());
    }
}
