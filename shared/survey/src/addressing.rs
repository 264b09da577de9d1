//! Program-derived addresses for survey and participant accounts, plus
//! survey id generation. Derivation is fully deterministic: the address is
//! the lookup key, there is no table anywhere.

use std::str::FromStr;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use sha2::Digest;
use sha2::Sha256;
use solana_sdk::pubkey::Pubkey;

use crate::error::SurveyError;
use crate::state::ParticipantAccount;
use crate::state::SurveyAccount;

/// PDA of the survey record for `survey_id`, with its bump.
pub fn derive_survey_address(
    program_id: &Pubkey,
    survey_id: &str,
) -> Result<(Pubkey, u8), SurveyError> {
    Pubkey::try_find_program_address(
        &[SurveyAccount::SEEDS_PREFIX, survey_id.as_bytes()],
        program_id,
    )
    .ok_or(SurveyError::DerivationExhausted { seed: "survey" })
}

/// PDA of one participant's claim record under one survey.
pub fn derive_participant_address(
    program_id: &Pubkey,
    survey_id: &str,
    participant: &Pubkey,
) -> Result<(Pubkey, u8), SurveyError> {
    Pubkey::try_find_program_address(
        &[
            ParticipantAccount::SEEDS_PREFIX,
            survey_id.as_bytes(),
            participant.as_ref(),
        ],
        program_id,
    )
    .ok_or(SurveyError::DerivationExhausted { seed: "participant" })
}

/// `prefix + "_" + 16 hex chars` of a hash over the prefix, the current
/// wall clock and a random salt. Unique in practice, deliberately not
/// reproducible. The result seeds [`derive_survey_address`] and must be
/// stored as-is: regenerating orphans the on-chain account.
pub fn generate_survey_id(prefix: &str) -> String {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis();
    let salt: [u8; 16] = rand::random();

    let mut hasher = Sha256::new();
    hasher.update(prefix.as_bytes());
    hasher.update(millis.to_le_bytes());
    hasher.update(salt);
    let digest = hasher.finalize();

    let tail: String =
        digest[..8].iter().map(|byte| format!("{byte:02x}")).collect();
    format!("{prefix}_{tail}")
}

/// Base58 parse with a typed failure instead of the sdk's opaque one.
pub fn parse_pubkey(address: &str) -> Result<Pubkey, SurveyError> {
    Pubkey::from_str(address)
        .map_err(|_| SurveyError::InvalidAddressFormat(address.to_string()))
}
