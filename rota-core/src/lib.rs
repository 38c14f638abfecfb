pub mod search;
pub mod provider;
pub mod flight;
pub mod validation;
pub mod supplier;

pub use flight::{FlightType, NormalizedFlight};
pub use provider::{ProviderSearchRequest, SimplifiedOffer};
pub use search::{CabinClass, RankingMode, SearchParams};
pub use supplier::{EndpointError, RelayOutcome, SearchEndpoint, WebhookPayload, WebhookRelay};
pub use validation::{ParamsValidator, StandardValidator, ValidationErrors};

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),
    #[error("Malformed upstream payload: {0}")]
    Payload(String),
}

pub type CoreResult<T> = Result<T, CoreError>;
