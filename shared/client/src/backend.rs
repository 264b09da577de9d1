//! Seam to the network. The survey core is pure; everything that touches
//! an RPC endpoint goes through this trait, so orchestration stays
//! testable and transport policy (retries, signing, commitment levels)
//! stays out of this crate.

use anyhow::Result;
use async_trait::async_trait;
use solana_sdk::instruction::Instruction;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::Signature;

#[async_trait]
pub trait SolanaBackend: Send + Sync {
    /// Identity that pays fees and rent, and owns the surveys this client
    /// manages.
    fn payer(&self) -> Pubkey;

    /// Raw account bytes. `None` means the account does not exist — a
    /// closed account is deallocated and reads back as not-found, which
    /// callers must keep distinct from "found but undecodable".
    async fn get_account_data(
        &self,
        address: &Pubkey,
    ) -> Result<Option<Vec<u8>>>;

    async fn account_exists(&self, address: &Pubkey) -> Result<bool> {
        Ok(self.get_account_data(address).await?.is_some())
    }

    /// Submits the instructions as a single transaction and awaits
    /// confirmation.
    async fn send_instructions(
        &self,
        instructions: Vec<Instruction>,
    ) -> Result<Signature>;
}
