//! Externally supplied constants. This crate consumes them; it never owns
//! or mutates them after startup.

use serde::Deserialize;
use solana_sdk::pubkey::Pubkey;
use solbridge_survey::parse_pubkey;
use solbridge_survey::SurveyError;

pub const DEFAULT_RPC_URL: &str = "https://api.devnet.solana.com";
pub const DEFAULT_SOL_REWARD: f64 = 0.001;
pub const DEFAULT_TOKEN_REWARD: u64 = 100;
pub const DEFAULT_MAX_PARTICIPANTS: u32 = 1000;

#[derive(Debug, Clone)]
pub struct SurveyConfig {
    pub program_id: Pubkey,
    pub rpc_url: String,
    /// Mint used for token rewards when the caller does not pick one.
    pub reward_token_mint: Option<Pubkey>,
    /// UI units (whole SOL), converted at encode time.
    pub default_sol_reward: f64,
    pub default_token_reward: u64,
    pub default_max_participants: u32,
}

impl SurveyConfig {
    pub fn new(program_id: Pubkey) -> Self {
        Self {
            program_id,
            rpc_url: DEFAULT_RPC_URL.to_string(),
            reward_token_mint: None,
            default_sol_reward: DEFAULT_SOL_REWARD,
            default_token_reward: DEFAULT_TOKEN_REWARD,
            default_max_participants: DEFAULT_MAX_PARTICIPANTS,
        }
    }
}

/// Deserializable form with addresses as base58 strings, the way they
/// arrive from env or config files.
#[derive(Debug, Clone, Deserialize)]
pub struct RawSurveyConfig {
    pub program_id: String,
    pub rpc_url: Option<String>,
    pub reward_token_mint: Option<String>,
    pub default_sol_reward: Option<f64>,
    pub default_token_reward: Option<u64>,
    pub default_max_participants: Option<u32>,
}

impl TryFrom<RawSurveyConfig> for SurveyConfig {
    type Error = SurveyError;

    fn try_from(raw: RawSurveyConfig) -> Result<Self, SurveyError> {
        let defaults = SurveyConfig::new(parse_pubkey(&raw.program_id)?);
        Ok(Self {
            reward_token_mint: raw
                .reward_token_mint
                .as_deref()
                .map(parse_pubkey)
                .transpose()?,
            rpc_url: raw.rpc_url.unwrap_or(defaults.rpc_url),
            default_sol_reward: raw
                .default_sol_reward
                .unwrap_or(defaults.default_sol_reward),
            default_token_reward: raw
                .default_token_reward
                .unwrap_or(defaults.default_token_reward),
            default_max_participants: raw
                .default_max_participants
                .unwrap_or(defaults.default_max_participants),
            program_id: defaults.program_id,
        })
    }
}
