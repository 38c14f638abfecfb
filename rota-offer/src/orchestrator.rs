use rota_core::{
    EndpointError, NormalizedFlight, ParamsValidator, ProviderSearchRequest, RankingMode, SearchEndpoint,
    SearchParams, SimplifiedOffer,
};
use rota_store::app_config::SearchConfig;
use serde::Serialize;
use std::sync::Arc;

use crate::dedup::deduplicate;
use crate::generator::mock_flights;
use crate::normalizer::normalize_all;
use crate::ranker::Ranker;

/// Where the flights of a search came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultSource {
    Live,
    Fallback,
}

#[derive(Debug, Clone, Serialize)]
pub struct SearchOutcome {
    pub source: ResultSource,
    pub flights: Vec<NormalizedFlight>,
}

impl SearchOutcome {
    pub fn is_fallback(&self) -> bool {
        self.source == ResultSource::Fallback
    }

    pub fn into_flights(self) -> Vec<NormalizedFlight> {
        self.flights
    }
}

/// Runs one flight search end to end: sanitize, fetch, normalize,
/// deduplicate, rank, and fall back to synthetic flights when nothing usable
/// comes back. Holds no per-search state.
pub struct SearchOrchestrator {
    endpoint: Arc<dyn SearchEndpoint>,
    validator: Arc<dyn ParamsValidator>,
    ranker: Ranker,
    config: SearchConfig,
}

impl SearchOrchestrator {
    pub fn new(
        endpoint: Arc<dyn SearchEndpoint>,
        validator: Arc<dyn ParamsValidator>,
        ranker: Ranker,
        config: SearchConfig,
    ) -> Self {
        Self { endpoint, validator, ranker, config }
    }

    /// Never fails: upstream problems end in the fallback flights
    pub async fn search(&self, params: &SearchParams) -> SearchOutcome {
        // 1. Sanitize
        let params = self.validator.sanitize(params);
        tracing::info!(
            origin = %params.origin,
            destination = %params.destination,
            departure_date = %params.departure_date,
            ranking = ?params.ranking,
            "Searching flights"
        );

        // 2. Fetch
        let request = ProviderSearchRequest::from_params(&params, &self.config.currency_code, self.config.max_results);
        let offers = self.fetch(&request).await;

        // 3. Transform
        let flights = self.transform(offers, params.ranking);
        if !flights.is_empty() {
            tracing::info!(count = flights.len(), "Returning live flights");
            return SearchOutcome { source: ResultSource::Live, flights };
        }

        // 4. Fallback
        tracing::warn!(
            origin = %params.origin,
            destination = %params.destination,
            "No usable offers, returning fallback flights"
        );
        let mock = mock_flights(&params.origin, &params.destination, &params.departure_date);
        SearchOutcome {
            source: ResultSource::Fallback,
            flights: self.ranker.rank(&mock, params.ranking),
        }
    }

    /// Ranked flights without the live/fallback marker
    pub async fn search_flights(&self, params: &SearchParams) -> Vec<NormalizedFlight> {
        self.search(params).await.into_flights()
    }

    async fn fetch(&self, request: &ProviderSearchRequest) -> Vec<SimplifiedOffer> {
        match self.endpoint.fetch_offers(request).await {
            Ok(offers) => offers,
            Err(EndpointError::NotConfigured) => {
                tracing::debug!("No search endpoint configured");
                Vec::new()
            }
            Err(e) => {
                tracing::warn!(error = %e, "Flight search fetch failed, treating as empty result");
                Vec::new()
            }
        }
    }

    fn transform(&self, offers: Vec<SimplifiedOffer>, mode: RankingMode) -> Vec<NormalizedFlight> {
        let normalized = normalize_all(&offers);
        let normalized_count = normalized.len();
        let mut flights = deduplicate(normalized);
        tracing::debug!(
            raw = offers.len(),
            normalized = normalized_count,
            unique = flights.len(),
            "Offer pipeline counts"
        );

        self.ranker.sort(&mut flights, mode);
        flights
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use rota_core::{FlightType, StandardValidator};
    use serde_json::json;
    use std::sync::Mutex;

    /// Answers every request with a canned result and records the payload
    struct StubEndpoint {
        response: Mutex<Option<Result<Vec<SimplifiedOffer>, EndpointError>>>,
        seen: Mutex<Vec<ProviderSearchRequest>>,
    }

    impl StubEndpoint {
        fn new(response: Result<Vec<SimplifiedOffer>, EndpointError>) -> Arc<Self> {
            Arc::new(Self { response: Mutex::new(Some(response)), seen: Mutex::new(Vec::new()) })
        }
    }

    #[async_trait]
    impl SearchEndpoint for StubEndpoint {
        async fn fetch_offers(
            &self,
            request: &ProviderSearchRequest,
        ) -> Result<Vec<SimplifiedOffer>, EndpointError> {
            self.seen.lock().unwrap().push(request.clone());
            self.response.lock().unwrap().take().unwrap_or_else(|| Ok(Vec::new()))
        }
    }

    fn orchestrator(endpoint: Arc<StubEndpoint>) -> SearchOrchestrator {
        SearchOrchestrator::new(endpoint, Arc::new(StandardValidator), Ranker::default(), SearchConfig::default())
    }

    fn offer(airline: &str, number: &str, fare: f64, stops: u32, duration: &str) -> SimplifiedOffer {
        serde_json::from_value(json!({
            "airline": airline,
            "flightNumber": number,
            "outbound": {
                "departure": { "airport": "GRU", "time": "2099-02-01T07:00:00" },
                "arrival": { "airport": "SSA", "time": "2099-02-01T09:30:00" },
                "duration": duration,
                "stops": stops
            },
            "price": { "total": fare, "currency": "BRL" }
        }))
        .unwrap()
    }

    fn params(ranking: RankingMode) -> SearchParams {
        SearchParams::one_way("gru ", " ssa", "2099-02-01").with_ranking(ranking)
    }

    #[tokio::test]
    async fn test_live_results_are_ranked() {
        let endpoint = StubEndpoint::new(Ok(vec![
            offer("LA", "LA 1", 1500.0, 0, "PT2H30M"),
            offer("G3", "G3 2", 1200.0, 0, "PT2H20M"),
            offer("AD", "AD 3", 950.0, 1, "PT5H"),
        ]));
        let outcome = orchestrator(endpoint).search(&params(RankingMode::Cheapest)).await;

        assert_eq!(outcome.source, ResultSource::Live);
        let fares: Vec<Option<f64>> = outcome.flights.iter().map(|f| f.fare_from).collect();
        assert_eq!(fares, vec![Some(950.0), Some(1200.0), Some(1500.0)]);
    }

    #[tokio::test]
    async fn test_best_mode_prefers_direct() {
        let endpoint = StubEndpoint::new(Ok(vec![
            offer("LA", "LA 1", 1500.0, 0, "PT2H30M"),
            offer("G3", "G3 2", 1200.0, 0, "PT2H20M"),
            offer("AD", "AD 3", 950.0, 1, "PT5H"),
        ]));
        let flights = orchestrator(endpoint).search_flights(&params(RankingMode::Best)).await;

        assert_eq!(flights[0].flight_number, "G3 2");
        assert_eq!(flights[0].flight_type(), FlightType::Direto);
    }

    #[tokio::test]
    async fn test_duplicates_are_collapsed_first_wins() {
        let endpoint = StubEndpoint::new(Ok(vec![
            offer("LA", "LA 1", 1500.0, 0, "PT2H30M"),
            offer("LA", "LA 1", 900.0, 0, "PT2H30M"),
        ]));
        let outcome = orchestrator(endpoint).search(&params(RankingMode::Cheapest)).await;

        assert_eq!(outcome.flights.len(), 1);
        assert_eq!(outcome.flights[0].fare_from, Some(1500.0));
    }

    #[tokio::test]
    async fn test_request_uses_sanitized_params() {
        let endpoint = StubEndpoint::new(Ok(Vec::new()));
        let mut p = params(RankingMode::Best);
        p.return_date = Some("2099-02-10".into());
        p.airlines = vec!["tp".into(), "LA".into(), "TP".into()];
        orchestrator(endpoint.clone()).search(&p).await;

        let seen = endpoint.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].origin_location_code, "GRU");
        assert_eq!(seen[0].destination_location_code, "SSA");
        assert_eq!(seen[0].return_date, None);
        assert_eq!(seen[0].included_airline_codes.as_deref(), Some("LA,TP"));
        assert_eq!(seen[0].currency_code, "BRL");
        assert_eq!(seen[0].max, 50);
    }

    #[tokio::test]
    async fn test_fetch_failure_falls_back() {
        let endpoint = StubEndpoint::new(Err(EndpointError::Status { status: 500, body: "boom".into() }));
        let outcome = orchestrator(endpoint).search(&params(RankingMode::Cheapest)).await;

        assert!(outcome.is_fallback());
        assert_eq!(outcome.flights.len(), 2);
        assert_eq!(outcome.flights[0].origin, "GRU");
        assert_eq!(outcome.flights[0].destination, "SSA");
        assert!(outcome.flights[0].fare_from <= outcome.flights[1].fare_from);
    }

    #[tokio::test]
    async fn test_unusable_offers_fall_back() {
        let broken: SimplifiedOffer = serde_json::from_value(json!({ "airline": "LA", "price": { "total": 10 } })).unwrap();
        let endpoint = StubEndpoint::new(Ok(vec![broken]));
        let outcome = orchestrator(endpoint).search(&params(RankingMode::Fastest)).await;

        assert_eq!(outcome.source, ResultSource::Fallback);
        assert_eq!(outcome.flights[0].duration, "PT2H15M");
    }

    #[tokio::test]
    async fn test_unconfigured_endpoint_falls_back() {
        let endpoint = StubEndpoint::new(Err(EndpointError::NotConfigured));
        let outcome = orchestrator(endpoint).search(&params(RankingMode::Best)).await;
        assert!(outcome.is_fallback());
        assert_eq!(outcome.flights[0].flight_type(), FlightType::Direto);
    }

    #[test]
    fn test_outcome_serialization() {
        let outcome = SearchOutcome { source: ResultSource::Fallback, flights: Vec::new() };
        let value = serde_json::to_value(outcome).unwrap();
        assert_eq!(value, json!({ "source": "fallback", "flights": [] }));
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        fn mode() -> impl Strategy<Value = RankingMode> {
            prop_oneof![Just(RankingMode::Best), Just(RankingMode::Cheapest), Just(RankingMode::Fastest)]
        }

        proptest! {
            #[test]
            fn prop_fallback_is_never_empty(origin in "[A-Z]{3}", destination in "[A-Z]{3}", day in 1u32..28, mode in mode()) {
                let runtime = tokio::runtime::Runtime::new().unwrap();
                let p = SearchParams::one_way(&origin, &destination, &format!("2099-03-{:02}", day)).with_ranking(mode);
                let endpoint = StubEndpoint::new(Err(EndpointError::Transport("connection reset".into())));

                let outcome = runtime.block_on(orchestrator(endpoint).search(&p));
                prop_assert!(outcome.is_fallback());
                prop_assert_eq!(outcome.flights.len(), 2);

                let expected = Ranker::default().rank(&mock_flights(&origin, &destination, &p.departure_date), mode);
                prop_assert_eq!(outcome.flights, expected);
            }
        }
    }
}
