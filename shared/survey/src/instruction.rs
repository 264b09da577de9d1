//! Instruction payloads for the survey program and the builders that pair
//! them with their account lists.
//!
//! The wire format is one discriminant byte followed by the payload fields
//! in schema order. Account lists are positional: the program matches them
//! by index, so order and flags here must track its processor exactly.

use solana_sdk::instruction::AccountMeta;
use solana_sdk::instruction::Instruction;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::system_program;
use solana_sdk::sysvar;

use crate::error::SurveyError;
use crate::schema;
use crate::schema::Schema;
use crate::wire::WireReader;
use crate::wire::WireWriter;

/// Everything the survey program understands. Built per call, serialized,
/// discarded; never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurveyInstruction {
    /// Creates a survey record and funds its reward accounting.
    InitializeSurvey {
        survey_id: String,
        /// Lamports per claim, already in native units.
        sol_reward_amount: u64,
        token_reward_amount: u64,
        max_participants: u32,
    },
    /// Pays one participant's SOL and token rewards.
    ClaimReward { survey_id: String },
    /// Grants one participant an NFT, owner-side.
    DistributeNft { survey_id: String },
    /// Deactivates the survey and returns rent to the owner.
    CloseSurvey { survey_id: String },
}

impl SurveyInstruction {
    pub fn discriminant(&self) -> u8 {
        match self {
            SurveyInstruction::InitializeSurvey { .. } => 0,
            SurveyInstruction::ClaimReward { .. } => 1,
            SurveyInstruction::DistributeNft { .. } => 2,
            SurveyInstruction::CloseSurvey { .. } => 3,
        }
    }

    fn schema(&self) -> &'static Schema {
        match self {
            SurveyInstruction::InitializeSurvey { .. } => {
                &schema::INITIALIZE_SURVEY
            }
            SurveyInstruction::ClaimReward { .. } => &schema::CLAIM_REWARD,
            SurveyInstruction::DistributeNft { .. } => &schema::DISTRIBUTE_NFT,
            SurveyInstruction::CloseSurvey { .. } => &schema::CLOSE_SURVEY,
        }
    }

    pub fn encode(&self) -> Result<Vec<u8>, SurveyError> {
        let mut writer =
            WireWriter::with_prefix(self.schema(), &[self.discriminant()]);
        match self {
            SurveyInstruction::InitializeSurvey {
                survey_id,
                sol_reward_amount,
                token_reward_amount,
                max_participants,
            } => {
                writer.write_str("survey_id", survey_id)?;
                writer.write_u64("sol_reward_amount", *sol_reward_amount)?;
                writer.write_u64("token_reward_amount", *token_reward_amount)?;
                writer.write_u32("max_participants", *max_participants)?;
            }
            SurveyInstruction::ClaimReward { survey_id }
            | SurveyInstruction::DistributeNft { survey_id }
            | SurveyInstruction::CloseSurvey { survey_id } => {
                writer.write_str("survey_id", survey_id)?;
            }
        }
        writer.finish()
    }

    /// Strict parse of an instruction buffer; unknown leading tags are
    /// `InvalidDiscriminant`, leftover bytes are `TrailingBytes`.
    pub fn decode(data: &[u8]) -> Result<Self, SurveyError> {
        let (tag, rest) =
            data.split_first()
                .ok_or(SurveyError::TruncatedInput {
                    structure: "SurveyInstruction",
                    field: "discriminant",
                    needed: 1,
                    available: 0,
                })?;
        match tag {
            0 => {
                let mut reader =
                    WireReader::new(&schema::INITIALIZE_SURVEY, rest);
                let instruction = SurveyInstruction::InitializeSurvey {
                    survey_id: reader.read_str("survey_id")?,
                    sol_reward_amount: reader.read_u64("sol_reward_amount")?,
                    token_reward_amount: reader
                        .read_u64("token_reward_amount")?,
                    max_participants: reader.read_u32("max_participants")?,
                };
                reader.finish_exact()?;
                Ok(instruction)
            }
            1 => Self::decode_survey_id_only(&schema::CLAIM_REWARD, rest)
                .map(|survey_id| SurveyInstruction::ClaimReward { survey_id }),
            2 => Self::decode_survey_id_only(&schema::DISTRIBUTE_NFT, rest)
                .map(|survey_id| SurveyInstruction::DistributeNft {
                    survey_id,
                }),
            3 => Self::decode_survey_id_only(&schema::CLOSE_SURVEY, rest)
                .map(|survey_id| SurveyInstruction::CloseSurvey { survey_id }),
            found => Err(SurveyError::InvalidDiscriminant { found: *found }),
        }
    }

    fn decode_survey_id_only(
        schema: &'static Schema,
        data: &[u8],
    ) -> Result<String, SurveyError> {
        let mut reader = WireReader::new(schema, data);
        let survey_id = reader.read_str("survey_id")?;
        reader.finish_exact()?;
        Ok(survey_id)
    }
}

/// Accounts, in program order:
/// 0. `[signer]` survey owner
/// 1. `[writable]` survey PDA
/// 2. `[]` reward token mint
/// 3. `[writable]` survey token pool
/// 4. `[]` system program
/// 5. `[]` rent sysvar
#[allow(clippy::too_many_arguments)]
pub fn initialize_survey(
    program_id: &Pubkey,
    owner: &Pubkey,
    survey_account: &Pubkey,
    token_mint: &Pubkey,
    token_pool: &Pubkey,
    survey_id: &str,
    sol_reward_amount: u64,
    token_reward_amount: u64,
    max_participants: u32,
) -> Result<Instruction, SurveyError> {
    let data = SurveyInstruction::InitializeSurvey {
        survey_id: survey_id.to_string(),
        sol_reward_amount,
        token_reward_amount,
        max_participants,
    }
    .encode()?;
    Ok(Instruction {
        program_id: *program_id,
        accounts: vec![
            AccountMeta::new_readonly(*owner, true),
            AccountMeta::new(*survey_account, false),
            AccountMeta::new_readonly(*token_mint, false),
            AccountMeta::new(*token_pool, false),
            AccountMeta::new_readonly(system_program::ID, false),
            AccountMeta::new_readonly(sysvar::rent::ID, false),
        ],
        data,
    })
}

/// Accounts, in program order:
/// 0. `[signer, writable]` participant
/// 1. `[writable]` survey PDA
/// 2. `[writable]` participant PDA
/// 3. `[writable]` participant token account
/// 4. `[writable]` survey token pool
/// 5. `[]` token program
/// 6. `[]` system program
pub fn claim_reward(
    program_id: &Pubkey,
    participant: &Pubkey,
    survey_account: &Pubkey,
    participant_account: &Pubkey,
    participant_token_account: &Pubkey,
    survey_token_account: &Pubkey,
    survey_id: &str,
) -> Result<Instruction, SurveyError> {
    let data = SurveyInstruction::ClaimReward {
        survey_id: survey_id.to_string(),
    }
    .encode()?;
    Ok(Instruction {
        program_id: *program_id,
        accounts: vec![
            AccountMeta::new(*participant, true),
            AccountMeta::new(*survey_account, false),
            AccountMeta::new(*participant_account, false),
            AccountMeta::new(*participant_token_account, false),
            AccountMeta::new(*survey_token_account, false),
            AccountMeta::new_readonly(spl_token::ID, false),
            AccountMeta::new_readonly(system_program::ID, false),
        ],
        data,
    })
}

/// Accounts, in program order:
/// 0. `[signer]` survey owner
/// 1. `[writable]` survey PDA
/// 2. `[writable]` participant PDA
/// 3. `[writable]` participant NFT token account
/// 4. `[writable]` NFT mint
/// 5. `[]` token program
/// 6. `[]` system program
/// 7. `[]` rent sysvar
pub fn distribute_nft(
    program_id: &Pubkey,
    owner: &Pubkey,
    survey_account: &Pubkey,
    participant_account: &Pubkey,
    participant_nft_account: &Pubkey,
    nft_mint: &Pubkey,
    survey_id: &str,
) -> Result<Instruction, SurveyError> {
    let data = SurveyInstruction::DistributeNft {
        survey_id: survey_id.to_string(),
    }
    .encode()?;
    Ok(Instruction {
        program_id: *program_id,
        accounts: vec![
            AccountMeta::new_readonly(*owner, true),
            AccountMeta::new(*survey_account, false),
            AccountMeta::new(*participant_account, false),
            AccountMeta::new(*participant_nft_account, false),
            AccountMeta::new(*nft_mint, false),
            AccountMeta::new_readonly(spl_token::ID, false),
            AccountMeta::new_readonly(system_program::ID, false),
            AccountMeta::new_readonly(sysvar::rent::ID, false),
        ],
        data,
    })
}

/// Accounts, in program order:
/// 0. `[signer]` survey owner
/// 1. `[writable]` survey PDA
/// 2. `[writable]` owner's SOL account, receives the reclaimed rent
pub fn close_survey(
    program_id: &Pubkey,
    owner: &Pubkey,
    survey_account: &Pubkey,
    owner_sol_account: &Pubkey,
    survey_id: &str,
) -> Result<Instruction, SurveyError> {
    let data = SurveyInstruction::CloseSurvey {
        survey_id: survey_id.to_string(),
    }
    .encode()?;
    Ok(Instruction {
        program_id: *program_id,
        accounts: vec![
            AccountMeta::new_readonly(*owner, true),
            AccountMeta::new(*survey_account, false),
            AccountMeta::new(*owner_sol_account, false),
        ],
        data,
    })
}
