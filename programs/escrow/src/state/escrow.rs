//! Main escrow state structure

use super::header::EscrowHeader;
use super::store::BookingStore;
use bookvault_common::*;
use pinocchio::pubkey::Pubkey;

/// Main escrow state (single contiguous account)
/// Layout: Header + BookingStore
#[repr(C)]
pub struct EscrowState {
    /// Header with metadata and admin state
    pub header: EscrowHeader,

    /// Reservation records and active list
    pub store: BookingStore<MAX_BOOKINGS>,
}

impl EscrowState {
    pub fn new(program_id: Pubkey, owner: Pubkey, bump: u8) -> Self {
        Self {
            header: EscrowHeader::new(program_id, owner, bump),
            store: BookingStore::new(),
        }
    }

    /// Initialize a zeroed account in place
    pub fn init(&mut self, program_id: Pubkey, owner: Pubkey, bump: u8) {
        self.header = EscrowHeader::new(program_id, owner, bump);
        self.store.reset();
    }

    // Query surface

    /// Number of currently active bookings
    pub fn active_count(&self) -> u32 {
        self.store.count()
    }

    /// Look up a reservation record by identifier (active or retired)
    pub fn get_reservation(&self, id: &BookingId) -> Option<&Booking> {
        self.store.get(id)
    }

    /// Whether the circuit breaker is engaged
    pub fn is_paused(&self) -> bool {
        self.header.paused
    }

    /// The current operator key
    pub fn current_owner(&self) -> &Pubkey {
        &self.header.owner
    }
}

// Size validation: the state account must stay under the account size limit
const _: () = {
    const STATE_SIZE: usize = core::mem::size_of::<EscrowState>();
    const MAX_SIZE: usize = 10 * 1024 * 1024;

    if STATE_SIZE > MAX_SIZE {
        panic!("EscrowState exceeds 10 MB limit");
    }
};
