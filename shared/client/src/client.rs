//! Survey orchestration: derive addresses, read back chain state, refuse
//! ineligible operations client-side, then build and submit instructions
//! through the backend.

use serde::Serialize;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::Signature;
use spl_associated_token_account::get_associated_token_address;
use spl_associated_token_account::instruction::create_associated_token_account;
use thiserror::Error;
use tracing::debug;
use tracing::info;
use tracing::warn;

use solbridge_survey::derive_participant_address;
use solbridge_survey::derive_survey_address;
use solbridge_survey::generate_survey_id;
use solbridge_survey::instruction;
use solbridge_survey::ParticipantAccount;
use solbridge_survey::RewardKind;
use solbridge_survey::SurveyAccount;
use solbridge_survey::SurveyError;

use crate::backend::SolanaBackend;
use crate::config::SurveyConfig;
use crate::utils::lamports_to_sol;
use crate::utils::sol_to_lamports;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("survey '{survey_id}' not found")]
    SurveyNotFound { survey_id: String },

    #[error("survey '{survey_id}' exists but cannot be decoded: {source}")]
    SurveyUnreadable {
        survey_id: String,
        source: SurveyError,
    },

    #[error(
        "participant record for survey '{survey_id}' cannot be decoded: {source}"
    )]
    ParticipantUnreadable {
        survey_id: String,
        source: SurveyError,
    },

    #[error("survey '{survey_id}' is no longer active")]
    SurveyInactive { survey_id: String },

    #[error("survey '{survey_id}' has no remaining slots")]
    SurveyFull { survey_id: String },

    #[error("{kind:?} reward was already claimed for survey '{survey_id}'")]
    AlreadyClaimed {
        survey_id: String,
        kind: RewardKind,
    },

    #[error("no reward token mint given and none configured")]
    MissingTokenMint,

    #[error(transparent)]
    Survey(#[from] SurveyError),

    #[error(transparent)]
    Backend(#[from] anyhow::Error),
}

/// Outcome of the client-side pre-check before a claim submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClaimEligibility {
    Eligible,
    SurveyInactive,
    SurveyFull,
    AlreadyClaimed(RewardKind),
}

/// Client-side eligibility for the SOL+token claim. The program enforces
/// the same rules; checking here avoids burning a transaction on a claim
/// that is guaranteed to fail.
pub fn claim_eligibility(
    survey: &SurveyAccount,
    participant: Option<&ParticipantAccount>,
) -> ClaimEligibility {
    if !survey.is_active {
        return ClaimEligibility::SurveyInactive;
    }
    if let Some(record) = participant {
        if record.has_claimed(RewardKind::Sol) {
            return ClaimEligibility::AlreadyClaimed(RewardKind::Sol);
        }
        if record.has_claimed(RewardKind::Token) {
            return ClaimEligibility::AlreadyClaimed(RewardKind::Token);
        }
    }
    if survey.is_full() {
        return ClaimEligibility::SurveyFull;
    }
    ClaimEligibility::Eligible
}

#[derive(Debug, Clone)]
pub struct InitializeSurveyParams {
    /// Lowercased into the survey id prefix; "survey" when absent.
    pub title: Option<String>,
    /// Falls back to the configured reward mint.
    pub token_mint: Option<Pubkey>,
    /// UI units (whole SOL).
    pub sol_reward: Option<f64>,
    pub token_reward: Option<u64>,
    pub max_participants: Option<u32>,
}

#[derive(Debug, Clone)]
pub struct InitializedSurvey {
    pub survey_id: String,
    pub survey_address: Pubkey,
    pub token_pool: Pubkey,
    pub signature: Signature,
}

#[derive(Debug, Clone)]
pub struct ClaimReceipt {
    pub survey_id: String,
    pub participant_account: Pubkey,
    pub signature: Signature,
}

/// Caller-facing snapshot of one survey, in presentation units. Addresses
/// are base58 and the SOL amount is UI units; the raw account struct stays
/// in on-chain units.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SurveyStatus {
    pub survey_id: String,
    pub owner: String,
    pub sol_reward_amount: f64,
    pub token_reward_amount: u64,
    pub token_mint: String,
    pub max_participants: u32,
    pub current_participants: u32,
    pub remaining_slots: u32,
    /// Unix seconds.
    pub created_at: i64,
    pub is_active: bool,
    pub nft_collection: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub participant_status: Option<ParticipantStatus>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantStatus {
    pub has_claimed_sol: bool,
    pub has_claimed_token: bool,
    pub has_received_nft: bool,
    pub claimed_at: Option<i64>,
}

pub struct SurveyClient<B> {
    backend: B,
    config: SurveyConfig,
}

impl<B: SolanaBackend> SurveyClient<B> {
    pub fn new(backend: B, config: SurveyConfig) -> Self {
        Self { backend, config }
    }

    pub fn config(&self) -> &SurveyConfig {
        &self.config
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Creates a new survey owned by the backend payer. Generates the
    /// survey id, derives its PDA, and funds the reward token pool,
    /// creating the pool's associated token account when it does not
    /// exist yet.
    pub async fn initialize_survey(
        &self,
        params: InitializeSurveyParams,
    ) -> Result<InitializedSurvey, ClientError> {
        let prefix = params
            .title
            .as_deref()
            .map(str::to_lowercase)
            .unwrap_or_else(|| "survey".to_string());
        let token_mint = params
            .token_mint
            .or(self.config.reward_token_mint)
            .ok_or(ClientError::MissingTokenMint)?;
        let survey_id = generate_survey_id(&prefix);
        let (survey_address, _) =
            derive_survey_address(&self.config.program_id, &survey_id)?;
        let token_pool =
            get_associated_token_address(&survey_address, &token_mint);

        let owner = self.backend.payer();
        let sol_reward_amount = sol_to_lamports(
            params.sol_reward.unwrap_or(self.config.default_sol_reward),
        );
        let token_reward_amount = params
            .token_reward
            .unwrap_or(self.config.default_token_reward);
        let max_participants = params
            .max_participants
            .unwrap_or(self.config.default_max_participants);

        let mut instructions = Vec::new();
        if !self.backend.account_exists(&token_pool).await? {
            debug!(%token_pool, "creating survey token pool");
            instructions.push(create_associated_token_account(
                &owner,
                &survey_address,
                &token_mint,
                &spl_token::ID,
            ));
        }
        instructions.push(instruction::initialize_survey(
            &self.config.program_id,
            &owner,
            &survey_address,
            &token_mint,
            &token_pool,
            &survey_id,
            sol_reward_amount,
            token_reward_amount,
            max_participants,
        )?);

        let signature = self.backend.send_instructions(instructions).await?;
        info!(
            survey_id,
            %survey_address,
            sol_reward_amount,
            token_reward_amount,
            max_participants,
            %signature,
            "survey initialized"
        );
        Ok(InitializedSurvey {
            survey_id,
            survey_address,
            token_pool,
            signature,
        })
    }

    /// Claims the SOL and token rewards for one participant. Refuses
    /// client-side when the survey is inactive or full or the participant
    /// already claimed; the participant's token account is created when
    /// missing.
    pub async fn claim_reward(
        &self,
        survey_id: &str,
        participant: &Pubkey,
    ) -> Result<ClaimReceipt, ClientError> {
        let (survey_address, survey) = self.fetch_survey(survey_id).await?;
        let (participant_address, record) =
            self.fetch_participant(survey_id, participant).await?;

        match claim_eligibility(&survey, record.as_ref()) {
            ClaimEligibility::Eligible => {}
            ClaimEligibility::SurveyInactive => {
                warn!(survey_id, "claim refused: survey inactive");
                return Err(ClientError::SurveyInactive {
                    survey_id: survey_id.to_string(),
                });
            }
            ClaimEligibility::SurveyFull => {
                warn!(survey_id, "claim refused: survey full");
                return Err(ClientError::SurveyFull {
                    survey_id: survey_id.to_string(),
                });
            }
            ClaimEligibility::AlreadyClaimed(kind) => {
                warn!(survey_id, ?kind, "claim refused: already claimed");
                return Err(ClientError::AlreadyClaimed {
                    survey_id: survey_id.to_string(),
                    kind,
                });
            }
        }

        let participant_token_account =
            get_associated_token_address(participant, &survey.token_mint);
        let survey_token_account =
            get_associated_token_address(&survey_address, &survey.token_mint);

        let mut instructions = Vec::new();
        if !self
            .backend
            .account_exists(&participant_token_account)
            .await?
        {
            debug!(%participant_token_account, "creating participant token account");
            instructions.push(create_associated_token_account(
                &self.backend.payer(),
                participant,
                &survey.token_mint,
                &spl_token::ID,
            ));
        }
        instructions.push(instruction::claim_reward(
            &self.config.program_id,
            participant,
            &survey_address,
            &participant_address,
            &participant_token_account,
            &survey_token_account,
            survey_id,
        )?);

        let signature = self.backend.send_instructions(instructions).await?;
        info!(survey_id, %participant, %signature, "reward claimed");
        Ok(ClaimReceipt {
            survey_id: survey_id.to_string(),
            participant_account: participant_address,
            signature,
        })
    }

    /// Grants a collection NFT to one participant, owner-side. Refused
    /// when the participant already received one.
    pub async fn distribute_nft(
        &self,
        survey_id: &str,
        participant: &Pubkey,
        nft_mint: &Pubkey,
    ) -> Result<ClaimReceipt, ClientError> {
        let (survey_address, _) = self.fetch_survey(survey_id).await?;
        let (participant_address, record) =
            self.fetch_participant(survey_id, participant).await?;

        if let Some(record) = &record {
            if record.has_claimed(RewardKind::Nft) {
                warn!(survey_id, %participant, "nft distribution refused: already received");
                return Err(ClientError::AlreadyClaimed {
                    survey_id: survey_id.to_string(),
                    kind: RewardKind::Nft,
                });
            }
        }

        let participant_nft_account =
            get_associated_token_address(participant, nft_mint);

        let mut instructions = Vec::new();
        if !self
            .backend
            .account_exists(&participant_nft_account)
            .await?
        {
            instructions.push(create_associated_token_account(
                &self.backend.payer(),
                participant,
                nft_mint,
                &spl_token::ID,
            ));
        }
        instructions.push(instruction::distribute_nft(
            &self.config.program_id,
            &self.backend.payer(),
            &survey_address,
            &participant_address,
            &participant_nft_account,
            nft_mint,
            survey_id,
        )?);

        let signature = self.backend.send_instructions(instructions).await?;
        info!(survey_id, %participant, %signature, "nft distributed");
        Ok(ClaimReceipt {
            survey_id: survey_id.to_string(),
            participant_account: participant_address,
            signature,
        })
    }

    /// Closes the survey; the program deallocates the PDA and returns its
    /// lamports to the owner.
    pub async fn close_survey(
        &self,
        survey_id: &str,
    ) -> Result<Signature, ClientError> {
        let (survey_address, _) = self.fetch_survey(survey_id).await?;
        let owner = self.backend.payer();

        let close = instruction::close_survey(
            &self.config.program_id,
            &owner,
            &survey_address,
            &owner,
            survey_id,
        )?;
        let signature = self.backend.send_instructions(vec![close]).await?;
        info!(survey_id, %survey_address, %signature, "survey closed");
        Ok(signature)
    }

    /// Decoded survey snapshot, optionally with one participant's claim
    /// state. A participant with no record yet reads as all-unclaimed.
    pub async fn survey_status(
        &self,
        survey_id: &str,
        participant: Option<&Pubkey>,
    ) -> Result<SurveyStatus, ClientError> {
        let (_, survey) = self.fetch_survey(survey_id).await?;

        let participant_status = match participant {
            Some(participant) => {
                let (_, record) =
                    self.fetch_participant(survey_id, participant).await?;
                Some(match record {
                    Some(record) => ParticipantStatus {
                        has_claimed_sol: record.has_claimed_sol,
                        has_claimed_token: record.has_claimed_token,
                        has_received_nft: record.has_received_nft,
                        claimed_at: record.claimed_at,
                    },
                    None => ParticipantStatus {
                        has_claimed_sol: false,
                        has_claimed_token: false,
                        has_received_nft: false,
                        claimed_at: None,
                    },
                })
            }
            None => None,
        };

        Ok(SurveyStatus {
            survey_id: survey.survey_id.clone(),
            owner: survey.owner.to_string(),
            sol_reward_amount: lamports_to_sol(survey.sol_reward_amount),
            token_reward_amount: survey.token_reward_amount,
            token_mint: survey.token_mint.to_string(),
            max_participants: survey.max_participants,
            current_participants: survey.current_participants,
            remaining_slots: survey.remaining_slots(),
            created_at: survey.created_at,
            is_active: survey.is_active,
            nft_collection: survey
                .nft_collection
                .map(|collection| collection.to_string()),
            participant_status,
        })
    }

    async fn fetch_survey(
        &self,
        survey_id: &str,
    ) -> Result<(Pubkey, SurveyAccount), ClientError> {
        let (survey_address, _) =
            derive_survey_address(&self.config.program_id, survey_id)?;
        let data = self
            .backend
            .get_account_data(&survey_address)
            .await?
            .ok_or_else(|| ClientError::SurveyNotFound {
                survey_id: survey_id.to_string(),
            })?;
        let survey = SurveyAccount::decode(&data).map_err(|source| {
            ClientError::SurveyUnreadable {
                survey_id: survey_id.to_string(),
                source,
            }
        })?;
        debug!(
            survey_id,
            %survey_address,
            current = survey.current_participants,
            max = survey.max_participants,
            "survey account decoded"
        );
        Ok((survey_address, survey))
    }

    async fn fetch_participant(
        &self,
        survey_id: &str,
        participant: &Pubkey,
    ) -> Result<(Pubkey, Option<ParticipantAccount>), ClientError> {
        let (participant_address, _) = derive_participant_address(
            &self.config.program_id,
            survey_id,
            participant,
        )?;
        let record = match self
            .backend
            .get_account_data(&participant_address)
            .await?
        {
            Some(data) => Some(ParticipantAccount::decode(&data).map_err(
                |source| ClientError::ParticipantUnreadable {
                    survey_id: survey_id.to_string(),
                    source,
                },
            )?),
            None => None,
        };
        Ok((participant_address, record))
    }
}
