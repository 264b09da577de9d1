//! Static wire-layout tables, shared verbatim by the encoder and the
//! decoder. Field order here IS the byte order on chain: structures are
//! flat concatenations with no padding and no alignment, integers are
//! little-endian fixed width.
//!
//! These tables mirror the survey program's borsh layout exactly; any edit
//! here is a wire-format change.

/// Longest survey id the on-chain accounts are allocated for.
pub const MAX_SURVEY_ID_LEN: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    U8,
    U32,
    U64,
    I64,
    /// One byte, 0 or 1 on the wire.
    Bool,
    /// Raw 32-byte public key.
    Pubkey,
    /// u32 little-endian byte length, then that many utf-8 bytes.
    Str,
    /// One presence byte; the payload follows iff it is nonzero.
    Option(&'static FieldType),
}

#[derive(Debug, Clone, Copy)]
pub struct Field {
    pub name: &'static str,
    pub ty: FieldType,
}

#[derive(Debug, Clone, Copy)]
pub struct Schema {
    pub name: &'static str,
    pub fields: &'static [Field],
}

const fn field(name: &'static str, ty: FieldType) -> Field {
    Field { name, ty }
}

impl FieldType {
    pub const fn max_encoded_len(&self) -> usize {
        match self {
            FieldType::U8 | FieldType::Bool => 1,
            FieldType::U32 => 4,
            FieldType::U64 | FieldType::I64 => 8,
            FieldType::Pubkey => 32,
            FieldType::Str => 4 + MAX_SURVEY_ID_LEN,
            FieldType::Option(inner) => 1 + inner.max_encoded_len(),
        }
    }
}

impl Schema {
    /// Worst-case encoded size; the on-chain allocation for account
    /// records, which are zero-padded past the live data.
    pub const fn max_encoded_len(&self) -> usize {
        let mut total = 0;
        let mut i = 0;
        while i < self.fields.len() {
            total += self.fields[i].ty.max_encoded_len();
            i += 1;
        }
        total
    }
}

/// InitializeSurvey payload, after the discriminant byte.
pub const INITIALIZE_SURVEY: Schema = Schema {
    name: "InitializeSurvey",
    fields: &[
        field("survey_id", FieldType::Str),
        field("sol_reward_amount", FieldType::U64),
        field("token_reward_amount", FieldType::U64),
        field("max_participants", FieldType::U32),
    ],
};

pub const CLAIM_REWARD: Schema = Schema {
    name: "ClaimReward",
    fields: &[field("survey_id", FieldType::Str)],
};

pub const DISTRIBUTE_NFT: Schema = Schema {
    name: "DistributeNft",
    fields: &[field("survey_id", FieldType::Str)],
};

pub const CLOSE_SURVEY: Schema = Schema {
    name: "CloseSurvey",
    fields: &[field("survey_id", FieldType::Str)],
};

pub const SURVEY_ACCOUNT: Schema = Schema {
    name: "SurveyAccount",
    fields: &[
        field("is_initialized", FieldType::Bool),
        field("survey_id", FieldType::Str),
        field("owner", FieldType::Pubkey),
        field("sol_reward_amount", FieldType::U64),
        field("token_reward_amount", FieldType::U64),
        field("token_mint", FieldType::Pubkey),
        field("max_participants", FieldType::U32),
        field("current_participants", FieldType::U32),
        field("created_at", FieldType::I64),
        field("is_active", FieldType::Bool),
        field("nft_collection", FieldType::Option(&FieldType::Pubkey)),
    ],
};

pub const PARTICIPANT_ACCOUNT: Schema = Schema {
    name: "ParticipantAccount",
    fields: &[
        field("is_initialized", FieldType::Bool),
        field("survey_id", FieldType::Str),
        field("participant", FieldType::Pubkey),
        field("has_claimed_sol", FieldType::Bool),
        field("has_claimed_token", FieldType::Bool),
        field("has_received_nft", FieldType::Bool),
        field("claimed_at", FieldType::Option(&FieldType::I64)),
    ],
};
