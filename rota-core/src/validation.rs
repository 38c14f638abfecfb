use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

use crate::search::SearchParams;
use crate::{CoreError, CoreResult};

/// Seated passengers (adults + children) allowed in one booking
pub const MAX_SEATED_PASSENGERS: u32 = 9;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Field-keyed validation messages. Empty means valid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<String, String>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keeps the first message recorded for a field
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0.entry(field.to_string()).or_insert_with(|| message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(|s| s.as_str())
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.0.iter().map(|(k, v)| format!("{}: {}", k, v)).collect();
        f.write_str(&parts.join("; "))
    }
}

/// Validation collaborator used in front of the search pipeline.
pub trait ParamsValidator: Send + Sync {
    /// Check params; the result is independent of whether they were sanitized first
    fn validate(&self, params: &SearchParams) -> ValidationErrors;

    fn sanitize(&self, params: &SearchParams) -> SearchParams;

    /// Sanitize and reject invalid params in one step
    fn ensure_valid(&self, params: &SearchParams) -> CoreResult<SearchParams> {
        let errors = self.validate(params);
        if errors.is_empty() {
            Ok(self.sanitize(params))
        } else {
            Err(CoreError::Validation(errors))
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct StandardValidator;

impl ParamsValidator for StandardValidator {
    fn validate(&self, params: &SearchParams) -> ValidationErrors {
        let p = self.sanitize(params);
        let mut errors = ValidationErrors::new();

        check_airport(&mut errors, "origin", &p.origin);
        check_airport(&mut errors, "destination", &p.destination);
        if errors.is_empty() && p.origin == p.destination {
            errors.add("destination", "Destination must differ from origin");
        }

        let departure = match parse_date(&p.departure_date) {
            Some(date) => Some(date),
            None if p.departure_date.is_empty() => {
                errors.add("departureDate", "Departure date is required");
                None
            }
            None => {
                errors.add("departureDate", "Departure date must be YYYY-MM-DD");
                None
            }
        };

        if !p.one_way {
            match p.return_date.as_deref() {
                None => errors.add("returnDate", "Return date is required for round trips"),
                Some(raw) => match parse_date(raw) {
                    None => errors.add("returnDate", "Return date must be YYYY-MM-DD"),
                    Some(ret) => {
                        if departure.is_some_and(|dep| ret < dep) {
                            errors.add("returnDate", "Return date cannot be before departure date");
                        }
                    }
                },
            }
        }

        if p.adults == 0 {
            errors.add("adults", "At least one adult is required");
        }
        if p.adults.saturating_add(p.children) > MAX_SEATED_PASSENGERS {
            errors.add(
                "passengers",
                format!("At most {} seated passengers per search", MAX_SEATED_PASSENGERS),
            );
        }
        if p.infants > p.adults {
            errors.add("infants", "Each infant must travel with an adult");
        }

        if let Some(bad) = p
            .airlines
            .iter()
            .find(|code| code.len() != 2 || !code.chars().all(|c| c.is_ascii_alphanumeric()))
        {
            errors.add("airlines", format!("Invalid airline code: {}", bad));
        }

        errors
    }

    fn sanitize(&self, params: &SearchParams) -> SearchParams {
        let mut airlines: Vec<String> = params
            .airlines
            .iter()
            .map(|code| code.trim().to_uppercase())
            .filter(|code| !code.is_empty())
            .collect();
        airlines.sort();
        airlines.dedup();

        let return_date = if params.one_way {
            None
        } else {
            params
                .return_date
                .as_deref()
                .map(str::trim)
                .filter(|d| !d.is_empty())
                .map(str::to_string)
        };

        SearchParams {
            origin: params.origin.trim().to_uppercase(),
            destination: params.destination.trim().to_uppercase(),
            departure_date: params.departure_date.trim().to_string(),
            return_date,
            airlines,
            ..params.clone()
        }
    }
}

fn check_airport(errors: &mut ValidationErrors, field: &str, code: &str) {
    if code.is_empty() {
        errors.add(field, "Airport code is required");
    } else if code.len() != 3 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
        errors.add(field, "Airport code must be 3 letters");
    }
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw, DATE_FORMAT).ok()
}
