//! Custody boundary: the gateway trait and the vault balance ledger

use bookvault_common::*;
use pinocchio::pubkey::Pubkey;

/// Narrow interface the lifecycle uses to move value in and out of escrow
///
/// Any failure is fatal to the enclosing operation: the engine reverses its
/// own store mutation and surfaces the error. A gateway must refuse without
/// mutating, so a refused call leaves its ledger untouched.
pub trait CustodyGateway {
    /// Pull `amount` from `from` into custody
    fn pull_into(&mut self, from: &Pubkey, amount: u64) -> Result<(), BookingError>;

    /// Release `amount` from custody to `to`
    fn release(&mut self, to: &Pubkey, amount: u64) -> Result<(), BookingError>;
}

/// Vault ledger account holding spendable balances and the custodied total
/// PDA: ["vault", program_id]
#[repr(C)]
pub struct VaultLedger {
    /// Per-principal spendable balances
    pub accounts: [LedgerAccount; MAX_LEDGER_ACCOUNTS],
    /// Number of occupied rows
    pub account_count: u32,
    /// Padding
    pub _padding: u32,
    /// Total value currently held in custody
    pub custodied: u64,
}

impl VaultLedger {
    pub const LEN: usize = core::mem::size_of::<Self>();

    pub fn new() -> Self {
        Self {
            accounts: [LedgerAccount::default(); MAX_LEDGER_ACCOUNTS],
            account_count: 0,
            _padding: 0,
            custodied: 0,
        }
    }

    /// Reset counts for in-place initialization of a zeroed account
    pub fn reset(&mut self) {
        self.account_count = 0;
        self.custodied = 0;
    }

    /// Find the row for a principal
    fn find(&self, key: &Pubkey) -> Option<usize> {
        for i in 0..self.account_count as usize {
            if self.accounts[i].used && &self.accounts[i].key == key {
                return Some(i);
            }
        }
        None
    }

    /// Find or create the row for a principal
    fn find_or_create(&mut self, key: &Pubkey) -> Result<usize, BookingError> {
        if let Some(idx) = self.find(key) {
            return Ok(idx);
        }

        if self.account_count as usize >= MAX_LEDGER_ACCOUNTS {
            return Err(BookingError::CustodyTransferFailed);
        }

        let idx = self.account_count as usize;
        self.accounts[idx] = LedgerAccount {
            key: *key,
            balance: 0,
            used: true,
            _padding: [0; 7],
        };
        self.account_count += 1;
        Ok(idx)
    }

    /// Credit a principal's spendable balance
    ///
    /// Funding surface standing in for the token-transfer layer, which is
    /// outside the engine's scope.
    pub fn deposit(&mut self, key: &Pubkey, amount: u64) -> Result<(), BookingError> {
        let idx = self.find_or_create(key)?;
        self.accounts[idx].balance = checked_add(self.accounts[idx].balance, amount)?;
        Ok(())
    }

    /// Spendable balance of a principal
    pub fn balance_of(&self, key: &Pubkey) -> u64 {
        self.find(key).map(|idx| self.accounts[idx].balance).unwrap_or(0)
    }
}

impl CustodyGateway for VaultLedger {
    fn pull_into(&mut self, from: &Pubkey, amount: u64) -> Result<(), BookingError> {
        let idx = self.find(from).ok_or(BookingError::CustodyTransferFailed)?;

        let balance = self.accounts[idx].balance;
        if balance < amount {
            return Err(BookingError::CustodyTransferFailed);
        }

        // Validate the credit side before either mutation
        let custodied = checked_add(self.custodied, amount)?;

        self.accounts[idx].balance = balance - amount;
        self.custodied = custodied;
        Ok(())
    }

    fn release(&mut self, to: &Pubkey, amount: u64) -> Result<(), BookingError> {
        if self.custodied < amount {
            return Err(BookingError::CustodyTransferFailed);
        }

        let idx = self.find_or_create(to)?;
        let balance = checked_add(self.accounts[idx].balance, amount)?;

        self.accounts[idx].balance = balance;
        self.custodied -= amount;
        Ok(())
    }
}
