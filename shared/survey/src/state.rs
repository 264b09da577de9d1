//! Typed views of the survey program's on-chain records. Fields stay in
//! raw on-chain units (lamports, unix seconds); presentation conversion is
//! the caller's explicit step so encode → decode → encode is lossless.

use solana_sdk::pubkey::Pubkey;

use crate::error::SurveyError;
use crate::schema;
use crate::wire::WireReader;
use crate::wire::WireWriter;

/// One reward campaign, owned by the survey program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurveyAccount {
    pub is_initialized: bool,
    pub survey_id: String,
    pub owner: Pubkey,
    /// Lamports per claim.
    pub sol_reward_amount: u64,
    /// Raw token amount per claim.
    pub token_reward_amount: u64,
    pub token_mint: Pubkey,
    pub max_participants: u32,
    pub current_participants: u32,
    /// Unix seconds.
    pub created_at: i64,
    pub is_active: bool,
    pub nft_collection: Option<Pubkey>,
}

impl SurveyAccount {
    pub const SEEDS_PREFIX: &'static [u8] = b"survey";

    /// On-chain allocation; the program serializes into a buffer of this
    /// size and leaves the rest zeroed.
    pub const SPACE: usize = schema::SURVEY_ACCOUNT.max_encoded_len();

    pub fn new(
        survey_id: String,
        owner: Pubkey,
        sol_reward_amount: u64,
        token_reward_amount: u64,
        token_mint: Pubkey,
        max_participants: u32,
        created_at: i64,
    ) -> Self {
        Self {
            is_initialized: true,
            survey_id,
            owner,
            sol_reward_amount,
            token_reward_amount,
            token_mint,
            max_participants,
            current_participants: 0,
            created_at,
            is_active: true,
            nft_collection: None,
        }
    }

    pub fn encode(&self) -> Result<Vec<u8>, SurveyError> {
        let mut writer = WireWriter::new(&schema::SURVEY_ACCOUNT);
        writer.write_bool("is_initialized", self.is_initialized)?;
        writer.write_str("survey_id", &self.survey_id)?;
        writer.write_pubkey("owner", &self.owner)?;
        writer.write_u64("sol_reward_amount", self.sol_reward_amount)?;
        writer.write_u64("token_reward_amount", self.token_reward_amount)?;
        writer.write_pubkey("token_mint", &self.token_mint)?;
        writer.write_u32("max_participants", self.max_participants)?;
        writer.write_u32("current_participants", self.current_participants)?;
        writer.write_i64("created_at", self.created_at)?;
        writer.write_bool("is_active", self.is_active)?;
        writer
            .write_option_pubkey("nft_collection", self.nft_collection.as_ref())?;
        writer.finish()
    }

    /// Decodes a buffer read back from the chain. Zero padding after the
    /// live data is accepted (fixed-size allocation); anything else there
    /// is `TrailingBytes`.
    pub fn decode(data: &[u8]) -> Result<Self, SurveyError> {
        let mut reader = WireReader::new(&schema::SURVEY_ACCOUNT, data);
        let account = Self::read_fields(&mut reader)?;
        reader.finish_padded()?;
        Ok(account)
    }

    /// Strict variant: the buffer must contain exactly one encoding.
    pub fn decode_exact(data: &[u8]) -> Result<Self, SurveyError> {
        let mut reader = WireReader::new(&schema::SURVEY_ACCOUNT, data);
        let account = Self::read_fields(&mut reader)?;
        reader.finish_exact()?;
        Ok(account)
    }

    fn read_fields(reader: &mut WireReader) -> Result<Self, SurveyError> {
        Ok(Self {
            is_initialized: reader.read_bool("is_initialized")?,
            survey_id: reader.read_str("survey_id")?,
            owner: reader.read_pubkey("owner")?,
            sol_reward_amount: reader.read_u64("sol_reward_amount")?,
            token_reward_amount: reader.read_u64("token_reward_amount")?,
            token_mint: reader.read_pubkey("token_mint")?,
            max_participants: reader.read_u32("max_participants")?,
            current_participants: reader.read_u32("current_participants")?,
            created_at: reader.read_i64("created_at")?,
            is_active: reader.read_bool("is_active")?,
            nft_collection: reader.read_option_pubkey("nft_collection")?,
        })
    }

    pub fn remaining_slots(&self) -> u32 {
        self.max_participants
            .saturating_sub(self.current_participants)
    }

    pub fn is_full(&self) -> bool {
        self.remaining_slots() == 0
    }

    /// An inactive or full survey accepts no further claims.
    pub fn accepts_claims(&self) -> bool {
        self.is_active && !self.is_full()
    }
}

/// The reward types a participant can claim, each at most once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RewardKind {
    Sol,
    Token,
    Nft,
}

/// One participant's claim record under one survey.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParticipantAccount {
    pub is_initialized: bool,
    pub survey_id: String,
    pub participant: Pubkey,
    pub has_claimed_sol: bool,
    pub has_claimed_token: bool,
    pub has_received_nft: bool,
    /// Unix seconds of the first claim, if any.
    pub claimed_at: Option<i64>,
}

impl ParticipantAccount {
    pub const SEEDS_PREFIX: &'static [u8] = b"participant";

    pub const SPACE: usize = schema::PARTICIPANT_ACCOUNT.max_encoded_len();

    pub fn new(survey_id: String, participant: Pubkey) -> Self {
        Self {
            is_initialized: true,
            survey_id,
            participant,
            has_claimed_sol: false,
            has_claimed_token: false,
            has_received_nft: false,
            claimed_at: None,
        }
    }

    pub fn encode(&self) -> Result<Vec<u8>, SurveyError> {
        let mut writer = WireWriter::new(&schema::PARTICIPANT_ACCOUNT);
        writer.write_bool("is_initialized", self.is_initialized)?;
        writer.write_str("survey_id", &self.survey_id)?;
        writer.write_pubkey("participant", &self.participant)?;
        writer.write_bool("has_claimed_sol", self.has_claimed_sol)?;
        writer.write_bool("has_claimed_token", self.has_claimed_token)?;
        writer.write_bool("has_received_nft", self.has_received_nft)?;
        writer.write_option_i64("claimed_at", self.claimed_at)?;
        writer.finish()
    }

    pub fn decode(data: &[u8]) -> Result<Self, SurveyError> {
        let mut reader = WireReader::new(&schema::PARTICIPANT_ACCOUNT, data);
        let account = Self::read_fields(&mut reader)?;
        reader.finish_padded()?;
        Ok(account)
    }

    pub fn decode_exact(data: &[u8]) -> Result<Self, SurveyError> {
        let mut reader = WireReader::new(&schema::PARTICIPANT_ACCOUNT, data);
        let account = Self::read_fields(&mut reader)?;
        reader.finish_exact()?;
        Ok(account)
    }

    fn read_fields(reader: &mut WireReader) -> Result<Self, SurveyError> {
        Ok(Self {
            is_initialized: reader.read_bool("is_initialized")?,
            survey_id: reader.read_str("survey_id")?,
            participant: reader.read_pubkey("participant")?,
            has_claimed_sol: reader.read_bool("has_claimed_sol")?,
            has_claimed_token: reader.read_bool("has_claimed_token")?,
            has_received_nft: reader.read_bool("has_received_nft")?,
            claimed_at: reader.read_option_i64("claimed_at")?,
        })
    }

    /// Claim flags only ever go false → true; a true flag means another
    /// claim of that kind must not be submitted.
    pub fn has_claimed(&self, kind: RewardKind) -> bool {
        match kind {
            RewardKind::Sol => self.has_claimed_sol,
            RewardKind::Token => self.has_claimed_token,
            RewardKind::Nft => self.has_received_nft,
        }
    }
}
