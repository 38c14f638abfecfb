pub mod duration;
pub mod signature;
pub mod airlines;
pub mod normalizer;
pub mod dedup;
pub mod ranker;
pub mod generator;
pub mod orchestrator;

pub use dedup::deduplicate;
pub use duration::duration_minutes;
pub use generator::mock_flights;
pub use normalizer::{normalize_all, normalize_offer};
pub use orchestrator::{ResultSource, SearchOrchestrator, SearchOutcome};
pub use ranker::Ranker;
pub use signature::signature_of;
