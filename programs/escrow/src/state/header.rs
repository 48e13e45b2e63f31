//! Escrow header with metadata and admin state

use pinocchio::pubkey::Pubkey;

/// Escrow header (at start of the state account)
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct EscrowHeader {
    /// Magic bytes for validation
    pub magic: [u8; 8],
    /// Version
    pub version: u16,
    /// Padding
    pub _padding: [u8; 6],
    /// Escrow program ID
    pub program_id: Pubkey,
    /// Current operator; receives service fees and withdrawals
    pub owner: Pubkey,
    /// Circuit breaker; gates every mutating lifecycle operation
    pub paused: bool,
    /// Bump seed
    pub bump: u8,
    /// Padding
    pub _padding2: [u8; 6],

    // Capacities (for offset calculations)
    pub max_bookings: u32,
    pub max_ledger_accounts: u32,
}

impl EscrowHeader {
    pub const MAGIC: &'static [u8; 8] = b"BOOKVLT1";
    pub const VERSION: u16 = 1;
    pub const LEN: usize = core::mem::size_of::<Self>();

    /// Initialize new escrow header
    pub fn new(program_id: Pubkey, owner: Pubkey, bump: u8) -> Self {
        Self {
            magic: *Self::MAGIC,
            version: Self::VERSION,
            _padding: [0; 6],
            program_id,
            owner,
            paused: false,
            bump,
            _padding2: [0; 6],
            max_bookings: bookvault_common::MAX_BOOKINGS as u32,
            max_ledger_accounts: bookvault_common::MAX_LEDGER_ACCOUNTS as u32,
        }
    }

    /// Validate magic and version
    pub fn validate(&self) -> bool {
        &self.magic == Self::MAGIC && self.version == Self::VERSION
    }

    /// Whether `key` holds the operator role
    #[inline]
    pub fn is_owner(&self, key: &Pubkey) -> bool {
        &self.owner == key
    }
}
