/// Minutes reported for a token that is not a `PT#H#M` duration.
///
/// Larger than any real itinerary so malformed durations sort last.
pub const UNPARSEABLE_DURATION_MINUTES: u64 = 999_999;

/// Total minutes of an ISO-8601 style time duration (`PT3H15M`, `PT45M`, `PT2H`).
///
/// A trailing seconds component (`PT1H5M30S`) is accepted and ignored.
/// Anything else yields [`UNPARSEABLE_DURATION_MINUTES`].
pub fn duration_minutes(token: &str) -> u64 {
    parse_minutes(token).unwrap_or(UNPARSEABLE_DURATION_MINUTES)
}

fn parse_minutes(token: &str) -> Option<u64> {
    let mut rest = token.strip_prefix("PT")?;
    let hours = take_component(&mut rest, 'H')?;
    let minutes = take_component(&mut rest, 'M')?;
    take_component(&mut rest, 'S')?;

    if !rest.is_empty() {
        return None;
    }
    hours.checked_mul(60)?.checked_add(minutes)
}

/// Consume `<digits><unit>` from the front of `rest`.
///
/// Returns `Some(0)` and leaves `rest` untouched when the component is
/// absent, `None` on overflow.
fn take_component(rest: &mut &str, unit: char) -> Option<u64> {
    let digits = rest.len() - rest.trim_start_matches(|c: char| c.is_ascii_digit()).len();
    if digits == 0 || !rest[digits..].starts_with(unit) {
        return Some(0);
    }
    let value = rest[..digits].parse::<u64>().ok()?;
    *rest = &rest[digits + unit.len_utf8()..];
    Some(value)
}
