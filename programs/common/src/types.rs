//! Common types shared between the escrow program and its clients

use pinocchio::pubkey::Pubkey;

/// Maximum number of booking records (active or retired) in the store
pub const MAX_BOOKINGS: usize = 1_024;

/// Maximum number of principal balance rows in the vault ledger
pub const MAX_LEDGER_ACCOUNTS: usize = 256;

/// Opaque booking identifier (fixed 16 bytes, zero-padded)
pub type BookingId = [u8; 16];

/// The invalid sentinel identifier; never names a booking
pub const EMPTY_BOOKING_ID: BookingId = [0u8; 16];

/// Sentinel for "no slot" in active-list bookkeeping
pub const NO_SLOT: u32 = u32::MAX;

/// One reservation record
///
/// A record is created by `reserve` and retired in place by `cancel` or
/// `withdraw`; the slot is reused if the same identifier is reserved again.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default)]
pub struct Booking {
    /// Booking identifier
    pub id: BookingId,
    /// Principal that created the booking; only this key may cancel
    pub reserver: Pubkey,
    /// Amount owed to the operator if the booking is not cancelled
    pub cost: u64,
    /// Amount refundable to the reserver on either exit path
    pub security_deposit: u64,
    /// Strictly before: cancellation window; strictly after: withdrawal window
    pub refund_deadline_ts: u64,
    /// Amount returned to the reserver on timely cancellation
    pub refund_amount: u64,
    /// Index of this booking's slot in the dense active list
    pub active_pos: u32,
    /// True from creation until resolved
    pub active: bool,
    /// Padding
    pub _padding: [u8; 3],
}

/// One principal balance row in the vault ledger
#[repr(C)]
#[derive(Debug, Clone, Copy, Default)]
pub struct LedgerAccount {
    /// Principal key
    pub key: Pubkey,
    /// Spendable balance (not custodied)
    pub balance: u64,
    /// Row occupied flag
    pub used: bool,
    /// Padding
    pub _padding: [u8; 7],
}

// Size check to keep the state account well under the 10 MB account limit
const _: () = {
    const fn check_size() {
        let total = MAX_BOOKINGS * core::mem::size_of::<Booking>()
            + MAX_BOOKINGS * core::mem::size_of::<u32>()
            + MAX_LEDGER_ACCOUNTS * core::mem::size_of::<LedgerAccount>();

        const MAX_STATE_SIZE: usize = 10 * 1024 * 1024;
        if total > MAX_STATE_SIZE {
            panic!("Escrow state exceeds 10 MB");
        }
    }
    check_size();
};
