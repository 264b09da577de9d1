use std::collections::HashSet;

use pretty_assertions::assert_eq;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::system_program;
use solana_sdk::sysvar;

use crate::addressing::derive_participant_address;
use crate::addressing::derive_survey_address;
use crate::addressing::generate_survey_id;
use crate::addressing::parse_pubkey;
use crate::error::SurveyError;
use crate::instruction;
use crate::instruction::SurveyInstruction;
use crate::state::ParticipantAccount;
use crate::state::RewardKind;
use crate::state::SurveyAccount;

fn sample_survey() -> SurveyAccount {
    SurveyAccount {
        is_initialized: true,
        survey_id: "survey_abc123".to_string(),
        owner: Pubkey::new_unique(),
        sol_reward_amount: 1_000_000,
        token_reward_amount: 100,
        token_mint: Pubkey::new_unique(),
        max_participants: 1000,
        current_participants: 17,
        created_at: 1_747_000_000,
        is_active: true,
        nft_collection: None,
    }
}

fn sample_participant() -> ParticipantAccount {
    ParticipantAccount {
        is_initialized: true,
        survey_id: "survey_abc123".to_string(),
        participant: Pubkey::new_unique(),
        has_claimed_sol: true,
        has_claimed_token: false,
        has_received_nft: false,
        claimed_at: Some(1_747_000_123),
    }
}

#[test]
fn test_survey_address_is_deterministic() {
    let program_id = Pubkey::new_unique();

    let first = derive_survey_address(&program_id, "survey_abc123").unwrap();
    let second = derive_survey_address(&program_id, "survey_abc123").unwrap();
    assert_eq!(first, second);

    let other = derive_survey_address(&program_id, "survey_def456").unwrap();
    assert_ne!(first.0, other.0);
}

#[test]
fn test_participant_address_is_deterministic_and_per_user() {
    let program_id = Pubkey::new_unique();
    let alice = Pubkey::new_unique();
    let bob = Pubkey::new_unique();

    let first =
        derive_participant_address(&program_id, "survey_abc123", &alice)
            .unwrap();
    let second =
        derive_participant_address(&program_id, "survey_abc123", &alice)
            .unwrap();
    assert_eq!(first, second);

    let for_bob =
        derive_participant_address(&program_id, "survey_abc123", &bob)
            .unwrap();
    assert_ne!(first.0, for_bob.0);
}

#[test]
fn test_derived_addresses_are_off_curve() {
    let program_id = Pubkey::new_unique();
    let (survey, _) =
        derive_survey_address(&program_id, "survey_abc123").unwrap();
    assert!(!survey.is_on_curve());

    let (participant, _) = derive_participant_address(
        &program_id,
        "survey_abc123",
        &Pubkey::new_unique(),
    )
    .unwrap();
    assert!(!participant.is_on_curve());
}

#[test]
fn test_survey_ids_are_unique() {
    let mut seen = HashSet::new();
    for _ in 0..10_000 {
        let id = generate_survey_id("survey");
        assert!(id.starts_with("survey_"));
        assert_eq!(id.len(), "survey".len() + 1 + 16);
        assert!(id["survey_".len()..]
            .chars()
            .all(|c| c.is_ascii_hexdigit()));
        assert!(seen.insert(id));
    }
}

#[test]
fn test_parse_pubkey() {
    let key = Pubkey::new_unique();
    assert_eq!(parse_pubkey(&key.to_string()).unwrap(), key);

    assert_eq!(
        parse_pubkey("not-an-address"),
        Err(SurveyError::InvalidAddressFormat("not-an-address".to_string()))
    );
}

#[test]
fn test_initialize_survey_exact_bytes() {
    let bytes = SurveyInstruction::InitializeSurvey {
        survey_id: "survey_abc123".to_string(),
        sol_reward_amount: 1_000_000,
        token_reward_amount: 100,
        max_participants: 1000,
    }
    .encode()
    .unwrap();

    let mut expected = vec![0u8];
    expected.extend_from_slice(&13u32.to_le_bytes());
    expected.extend_from_slice(b"survey_abc123");
    expected.extend_from_slice(&1_000_000u64.to_le_bytes());
    expected.extend_from_slice(&100u64.to_le_bytes());
    expected.extend_from_slice(&1000u32.to_le_bytes());
    assert_eq!(bytes, expected);
}

#[test]
fn test_instruction_round_trips() {
    let variants = [
        SurveyInstruction::InitializeSurvey {
            survey_id: "survey_abc123".to_string(),
            sol_reward_amount: 1_000_000,
            token_reward_amount: 100,
            max_participants: 1000,
        },
        SurveyInstruction::ClaimReward {
            survey_id: "survey_abc123".to_string(),
        },
        SurveyInstruction::DistributeNft {
            survey_id: "survey_abc123".to_string(),
        },
        SurveyInstruction::CloseSurvey {
            survey_id: "survey_abc123".to_string(),
        },
    ];
    for (discriminant, variant) in variants.into_iter().enumerate() {
        let bytes = variant.encode().unwrap();
        assert_eq!(bytes[0], discriminant as u8);
        assert_eq!(SurveyInstruction::decode(&bytes).unwrap(), variant);
    }
}

#[test]
fn test_instruction_truncation_always_detected() {
    let bytes = SurveyInstruction::InitializeSurvey {
        survey_id: "survey_abc123".to_string(),
        sol_reward_amount: 1_000_000,
        token_reward_amount: 100,
        max_participants: 1000,
    }
    .encode()
    .unwrap();

    for cut in 0..bytes.len() {
        let result = SurveyInstruction::decode(&bytes[..cut]);
        assert!(
            matches!(result, Err(SurveyError::TruncatedInput { .. })),
            "prefix of {cut} bytes decoded to {result:?}"
        );
    }
}

#[test]
fn test_instruction_trailing_bytes_detected() {
    let mut bytes = SurveyInstruction::ClaimReward {
        survey_id: "survey_abc123".to_string(),
    }
    .encode()
    .unwrap();
    bytes.push(0);

    assert!(matches!(
        SurveyInstruction::decode(&bytes),
        Err(SurveyError::TrailingBytes { count: 1, .. })
    ));
}

#[test]
fn test_unknown_discriminant_rejected() {
    let mut bytes = SurveyInstruction::CloseSurvey {
        survey_id: "survey_abc123".to_string(),
    }
    .encode()
    .unwrap();
    bytes[0] = 4;

    assert_eq!(
        SurveyInstruction::decode(&bytes),
        Err(SurveyError::InvalidDiscriminant { found: 4 })
    );
}

#[test]
fn test_survey_id_length_cap() {
    let result = SurveyInstruction::ClaimReward {
        survey_id: "x".repeat(65),
    }
    .encode();
    assert_eq!(
        result,
        Err(SurveyError::SurveyIdTooLong { len: 65, max: 64 })
    );
}

#[test]
fn test_account_space_matches_program_allocation() {
    assert_eq!(SurveyAccount::SPACE, 199);
    assert_eq!(ParticipantAccount::SPACE, 113);
}

#[test]
fn test_survey_account_round_trip() {
    let mut survey = sample_survey();
    let bytes = survey.encode().unwrap();
    assert_eq!(SurveyAccount::decode_exact(&bytes).unwrap(), survey);

    survey.nft_collection = Some(Pubkey::new_unique());
    let bytes = survey.encode().unwrap();
    assert_eq!(SurveyAccount::decode_exact(&bytes).unwrap(), survey);
}

#[test]
fn test_absent_option_adds_no_bytes() {
    let survey = sample_survey();
    let without = survey.encode().unwrap();

    let mut with = survey.clone();
    with.nft_collection = Some(Pubkey::new_unique());
    let with = with.encode().unwrap();
    assert_eq!(with.len(), without.len() + 32);

    // Re-encoding a decoded absent option reproduces identical bytes.
    let decoded = SurveyAccount::decode_exact(&without).unwrap();
    assert_eq!(decoded.encode().unwrap(), without);
}

#[test]
fn test_survey_account_decode_tolerates_zero_padding() {
    let survey = sample_survey();
    let mut bytes = survey.encode().unwrap();
    bytes.resize(SurveyAccount::SPACE, 0);

    assert_eq!(SurveyAccount::decode(&bytes).unwrap(), survey);

    // Strict decode still flags the padding.
    assert!(matches!(
        SurveyAccount::decode_exact(&bytes),
        Err(SurveyError::TrailingBytes { .. })
    ));

    // Nonzero leftovers are schema drift, not padding.
    *bytes.last_mut().unwrap() = 7;
    assert!(matches!(
        SurveyAccount::decode(&bytes),
        Err(SurveyError::TrailingBytes { .. })
    ));
}

#[test]
fn test_survey_account_truncation_always_detected() {
    let bytes = sample_survey().encode().unwrap();
    for cut in 0..bytes.len() {
        assert!(matches!(
            SurveyAccount::decode(&bytes[..cut]),
            Err(SurveyError::TruncatedInput { .. })
        ));
    }
}

#[test]
fn test_nonzero_presence_byte_reads_as_present() {
    let mut survey = sample_survey();
    let collection = Pubkey::new_unique();
    survey.nft_collection = Some(collection);
    let mut bytes = survey.encode().unwrap();

    let presence_index = bytes.len() - 33;
    assert_eq!(bytes[presence_index], 1);
    bytes[presence_index] = 255;

    let decoded = SurveyAccount::decode(&bytes).unwrap();
    assert_eq!(decoded.nft_collection, Some(collection));
}

#[test]
fn test_participant_account_round_trip() {
    let mut participant = sample_participant();
    let bytes = participant.encode().unwrap();
    assert_eq!(
        ParticipantAccount::decode_exact(&bytes).unwrap(),
        participant
    );

    participant.claimed_at = None;
    let bytes = participant.encode().unwrap();
    assert_eq!(
        ParticipantAccount::decode_exact(&bytes).unwrap(),
        participant
    );
}

#[test]
fn test_claim_flags() {
    let fresh =
        ParticipantAccount::new("survey_abc123".to_string(), Pubkey::new_unique());
    assert!(!fresh.has_claimed(RewardKind::Sol));
    assert!(!fresh.has_claimed(RewardKind::Token));
    assert!(!fresh.has_claimed(RewardKind::Nft));

    let claimed = sample_participant();
    assert!(claimed.has_claimed(RewardKind::Sol));
    assert!(!claimed.has_claimed(RewardKind::Token));
}

#[test]
fn test_full_survey_has_no_remaining_slots() {
    let mut survey = sample_survey();
    survey.current_participants = survey.max_participants;
    assert_eq!(survey.remaining_slots(), 0);
    assert!(survey.is_full());
    assert!(!survey.accepts_claims());

    survey.current_participants = 999;
    assert_eq!(survey.remaining_slots(), 1);
    assert!(survey.accepts_claims());

    survey.is_active = false;
    assert!(!survey.accepts_claims());
}

#[test]
fn test_initialize_instruction_account_order() {
    let program_id = Pubkey::new_unique();
    let owner = Pubkey::new_unique();
    let survey_account = Pubkey::new_unique();
    let token_mint = Pubkey::new_unique();
    let token_pool = Pubkey::new_unique();

    let ix = instruction::initialize_survey(
        &program_id,
        &owner,
        &survey_account,
        &token_mint,
        &token_pool,
        "survey_abc123",
        1_000_000,
        100,
        1000,
    )
    .unwrap();

    assert_eq!(ix.program_id, program_id);
    assert_eq!(ix.data[0], 0);
    let flags: Vec<(Pubkey, bool, bool)> = ix
        .accounts
        .iter()
        .map(|meta| (meta.pubkey, meta.is_signer, meta.is_writable))
        .collect();
    assert_eq!(
        flags,
        vec![
            (owner, true, false),
            (survey_account, false, true),
            (token_mint, false, false),
            (token_pool, false, true),
            (system_program::ID, false, false),
            (sysvar::rent::ID, false, false),
        ]
    );
}

#[test]
fn test_claim_instruction_account_order() {
    let program_id = Pubkey::new_unique();
    let participant = Pubkey::new_unique();
    let survey_account = Pubkey::new_unique();
    let participant_account = Pubkey::new_unique();
    let participant_token_account = Pubkey::new_unique();
    let survey_token_account = Pubkey::new_unique();

    let ix = instruction::claim_reward(
        &program_id,
        &participant,
        &survey_account,
        &participant_account,
        &participant_token_account,
        &survey_token_account,
        "survey_abc123",
    )
    .unwrap();

    assert_eq!(ix.data[0], 1);
    let flags: Vec<(Pubkey, bool, bool)> = ix
        .accounts
        .iter()
        .map(|meta| (meta.pubkey, meta.is_signer, meta.is_writable))
        .collect();
    assert_eq!(
        flags,
        vec![
            (participant, true, true),
            (survey_account, false, true),
            (participant_account, false, true),
            (participant_token_account, false, true),
            (survey_token_account, false, true),
            (spl_token::ID, false, false),
            (system_program::ID, false, false),
        ]
    );
}

#[test]
fn test_distribute_nft_instruction_account_order() {
    let program_id = Pubkey::new_unique();
    let owner = Pubkey::new_unique();
    let survey_account = Pubkey::new_unique();
    let participant_account = Pubkey::new_unique();
    let participant_nft_account = Pubkey::new_unique();
    let nft_mint = Pubkey::new_unique();

    let ix = instruction::distribute_nft(
        &program_id,
        &owner,
        &survey_account,
        &participant_account,
        &participant_nft_account,
        &nft_mint,
        "survey_abc123",
    )
    .unwrap();

    assert_eq!(ix.data[0], 2);
    assert_eq!(ix.accounts.len(), 8);
    assert_eq!(ix.accounts[0].pubkey, owner);
    assert!(ix.accounts[0].is_signer);
    assert!(!ix.accounts[0].is_writable);
    assert_eq!(ix.accounts[4].pubkey, nft_mint);
    assert!(ix.accounts[4].is_writable);
    assert_eq!(ix.accounts[7].pubkey, sysvar::rent::ID);
}

#[test]
fn test_close_instruction_account_order() {
    let program_id = Pubkey::new_unique();
    let owner = Pubkey::new_unique();
    let survey_account = Pubkey::new_unique();
    let owner_sol_account = Pubkey::new_unique();

    let ix = instruction::close_survey(
        &program_id,
        &owner,
        &survey_account,
        &owner_sol_account,
        "survey_abc123",
    )
    .unwrap();

    assert_eq!(ix.data[0], 3);
    let flags: Vec<(Pubkey, bool, bool)> = ix
        .accounts
        .iter()
        .map(|meta| (meta.pubkey, meta.is_signer, meta.is_writable))
        .collect();
    assert_eq!(
        flags,
        vec![
            (owner, true, false),
            (survey_account, false, true),
            (owner_sol_account, false, true),
        ]
    );
}
