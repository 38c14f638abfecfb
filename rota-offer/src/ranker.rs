use rota_core::{NormalizedFlight, RankingMode};
use rota_store::app_config::RankingConfig;

use crate::duration::duration_minutes;

/// Fare assumed for a flight without a price, so it sorts after priced ones
pub const MISSING_FARE_SENTINEL: f64 = 999_999_999.0;

/// Orders flights by the user's ranking mode
#[derive(Debug, Clone)]
pub struct Ranker {
    config: RankingConfig,
}

impl Default for Ranker {
    fn default() -> Self {
        Self::new(RankingConfig::default())
    }
}

impl Ranker {
    pub fn new(config: RankingConfig) -> Self {
        Self { config }
    }

    pub fn stop_penalty(&self) -> f64 {
        self.config.stop_penalty
    }

    /// Ranked copy of `flights`; the input is left untouched
    pub fn rank(&self, flights: &[NormalizedFlight], mode: RankingMode) -> Vec<NormalizedFlight> {
        let mut ranked = flights.to_vec();
        self.sort(&mut ranked, mode);
        ranked
    }

    /// Stable in-place sort, ties keep their relative order
    pub fn sort(&self, flights: &mut [NormalizedFlight], mode: RankingMode) {
        match mode {
            RankingMode::Cheapest => flights.sort_by(|a, b| fare_or_sentinel(a).total_cmp(&fare_or_sentinel(b))),
            RankingMode::Fastest => flights.sort_by_key(|f| duration_minutes(&f.duration)),
            RankingMode::Best => flights.sort_by(|a, b| self.best_score(a).total_cmp(&self.best_score(b))),
        }
    }

    /// Fare plus a linear penalty per stop; lower is better
    pub fn best_score(&self, flight: &NormalizedFlight) -> f64 {
        fare_or_sentinel(flight) + flight.stops as f64 * self.config.stop_penalty
    }
}

fn fare_or_sentinel(flight: &NormalizedFlight) -> f64 {
    flight.fare_from.unwrap_or(MISSING_FARE_SENTINEL)
}
