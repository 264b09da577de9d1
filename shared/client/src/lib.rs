// Orchestration over the survey wire contract: initialize, claim,
// distribute, close, status.
pub mod backend;
pub mod client;
pub mod config;
pub mod testing;
pub mod utils;

// Re-exports for convenience
pub use backend::SolanaBackend;
pub use client::claim_eligibility;
pub use client::ClaimEligibility;
pub use client::ClaimReceipt;
pub use client::ClientError;
pub use client::InitializeSurveyParams;
pub use client::InitializedSurvey;
pub use client::ParticipantStatus;
pub use client::SurveyClient;
pub use client::SurveyStatus;
pub use config::SurveyConfig;
