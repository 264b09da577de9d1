use solana_sdk::native_token::LAMPORTS_PER_SOL;

/// UI SOL to lamports. Truncates toward zero; sub-lamport precision in the
/// input is dropped, which is the defined conversion for this layer.
pub fn sol_to_lamports(sol_amount: f64) -> u64 {
    (sol_amount * LAMPORTS_PER_SOL as f64).floor() as u64
}

pub fn lamports_to_sol(lamports: u64) -> f64 {
    lamports as f64 / LAMPORTS_PER_SOL as f64
}
