//! In-memory backend for tests: accounts live in a map, submissions are
//! recorded instead of sent. Seeded buffers are fixed-size and
//! zero-padded, the way the program allocates them on chain.

use std::collections::HashMap;
use std::sync::Mutex;

use anyhow::Result;
use async_trait::async_trait;
use solana_sdk::instruction::Instruction;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::Signature;

use solbridge_survey::derive_participant_address;
use solbridge_survey::derive_survey_address;
use solbridge_survey::ParticipantAccount;
use solbridge_survey::SurveyAccount;

use crate::backend::SolanaBackend;

pub struct MockBackend {
    payer: Pubkey,
    accounts: Mutex<HashMap<Pubkey, Vec<u8>>>,
    sent: Mutex<Vec<Vec<Instruction>>>,
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl MockBackend {
    pub fn new() -> Self {
        Self {
            payer: Pubkey::new_unique(),
            accounts: Mutex::new(HashMap::new()),
            sent: Mutex::new(Vec::new()),
        }
    }

    pub fn set_account(&self, address: Pubkey, data: Vec<u8>) {
        self.accounts.lock().unwrap().insert(address, data);
    }

    pub fn remove_account(&self, address: &Pubkey) {
        self.accounts.lock().unwrap().remove(address);
    }

    /// Stores the survey under its derived PDA, zero-padded to the
    /// on-chain allocation. Returns the address.
    pub fn seed_survey(
        &self,
        program_id: &Pubkey,
        survey: &SurveyAccount,
    ) -> Pubkey {
        let (address, _) =
            derive_survey_address(program_id, &survey.survey_id).unwrap();
        let mut data = survey.encode().unwrap();
        data.resize(SurveyAccount::SPACE, 0);
        self.set_account(address, data);
        address
    }

    pub fn seed_participant(
        &self,
        program_id: &Pubkey,
        record: &ParticipantAccount,
    ) -> Pubkey {
        let (address, _) = derive_participant_address(
            program_id,
            &record.survey_id,
            &record.participant,
        )
        .unwrap();
        let mut data = record.encode().unwrap();
        data.resize(ParticipantAccount::SPACE, 0);
        self.set_account(address, data);
        address
    }

    /// Every batch passed to `send_instructions`, oldest first.
    pub fn sent_batches(&self) -> Vec<Vec<Instruction>> {
        self.sent.lock().unwrap().clone()
    }

    pub fn last_batch(&self) -> Vec<Instruction> {
        self.sent.lock().unwrap().last().cloned().unwrap_or_default()
    }
}

#[async_trait]
impl SolanaBackend for MockBackend {
    fn payer(&self) -> Pubkey {
        self.payer
    }

    async fn get_account_data(
        &self,
        address: &Pubkey,
    ) -> Result<Option<Vec<u8>>> {
        Ok(self.accounts.lock().unwrap().get(address).cloned())
    }

    async fn send_instructions(
        &self,
        instructions: Vec<Instruction>,
    ) -> Result<Signature> {
        self.sent.lock().unwrap().push(instructions);
        Ok(Signature::new_unique())
    }
}
