#![deny(unused_crate_dependencies)]
// On-chain addressing and wire codec for the survey reward program.
pub mod addressing;
pub mod error;
pub mod instruction;
pub mod schema;
pub mod state;
pub mod wire;

#[cfg(test)]
mod tests;

// Re-exports for convenience
pub use addressing::derive_participant_address;
pub use addressing::derive_survey_address;
pub use addressing::generate_survey_id;
pub use addressing::parse_pubkey;
pub use error::SurveyError;
pub use instruction::SurveyInstruction;
pub use state::ParticipantAccount;
pub use state::RewardKind;
pub use state::SurveyAccount;
