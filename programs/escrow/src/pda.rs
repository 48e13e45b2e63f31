//! Program Derived Address (PDA) helpers
//!
//! The escrow state and vault ledger live in PDAs so the program controls
//! them without a private key.

use pinocchio::pubkey::{create_program_address, find_program_address, Pubkey};

/// Seed prefix for the escrow state account
pub const STATE_SEED: &[u8] = b"escrow";

/// Seed prefix for the vault ledger account
pub const VAULT_SEED: &[u8] = b"vault";

/// Derive the escrow state PDA
pub fn derive_state_pda(program_id: &Pubkey) -> (Pubkey, u8) {
    find_program_address(&[STATE_SEED], program_id)
}

/// Derive the vault ledger PDA
pub fn derive_vault_pda(program_id: &Pubkey) -> (Pubkey, u8) {
    find_program_address(&[VAULT_SEED], program_id)
}

/// Verify that a pubkey matches the expected state PDA
pub fn verify_state_pda(pubkey: &Pubkey, bump: u8, program_id: &Pubkey) -> bool {
    match create_program_address(&[STATE_SEED, &[bump]], program_id) {
        Ok(derived) => &derived == pubkey,
        Err(_) => false,
    }
}

/// Verify that a pubkey matches the expected vault PDA
pub fn verify_vault_pda(pubkey: &Pubkey, bump: u8, program_id: &Pubkey) -> bool {
    match create_program_address(&[VAULT_SEED, &[bump]], program_id) {
        Ok(derived) => &derived == pubkey,
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    #[cfg(target_os = "solana")]
    use super::*;

    // Note: PDA derivation only runs on the Solana target due to syscall
    // requirements

    #[test]
    #[cfg(target_os = "solana")]
    fn test_state_pda_deterministic() {
        let program_id = Pubkey::default();

        let (pda1, bump1) = derive_state_pda(&program_id);
        let (pda2, bump2) = derive_state_pda(&program_id);

        assert_eq!(pda1, pda2);
        assert_eq!(bump1, bump2);
        assert!(verify_state_pda(&pda1, bump1, &program_id));
    }

    #[test]
    #[cfg(target_os = "solana")]
    fn test_state_and_vault_pdas_differ() {
        let program_id = Pubkey::default();

        let (state_pda, _) = derive_state_pda(&program_id);
        let (vault_pda, _) = derive_vault_pda(&program_id);

        assert_ne!(state_pda, vault_pda);
    }

    #[test]
    #[cfg(target_os = "solana")]
    fn test_verify_rejects_wrong_bump() {
        let program_id = Pubkey::default();

        let (pda, bump) = derive_vault_pda(&program_id);

        assert!(verify_vault_pda(&pda, bump, &program_id));
        assert!(!verify_vault_pda(&pda, bump.wrapping_add(1), &program_id));
    }
}
