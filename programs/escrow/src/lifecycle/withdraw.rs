//! Withdraw operation - operator exit, strictly after the deadline

use crate::custody::CustodyGateway;
use crate::events::ReservationWithdrawn;
use crate::state::EscrowState;
use bookvault_common::*;
use pinocchio::pubkey::Pubkey;

/// Collect an uncancelled booking after its deadline
///
/// Only the operator may withdraw, and only strictly after the refund
/// deadline. The cost goes to the operator; the security deposit returns to
/// the reserver in full.
pub fn withdraw<G: CustodyGateway>(
    state: &mut EscrowState,
    gateway: &mut G,
    caller: &Pubkey,
    now_ts: u64,
    id: BookingId,
) -> Result<ReservationWithdrawn, BookingError> {
    if state.header.paused {
        return Err(BookingError::SystemPaused);
    }
    if !state.header.is_owner(caller) {
        return Err(BookingError::Unauthorized);
    }

    let slot = state.store.find_slot(&id).ok_or(BookingError::NotActive)?;
    let booking = state.store.entries[slot as usize];

    if !booking.active {
        return Err(BookingError::NotActive);
    }
    if now_ts <= booking.refund_deadline_ts {
        return Err(BookingError::DeadlineNotReached);
    }

    // Deactivate before funds move so neither exit path can run twice
    state.store.remove_active(slot);

    if let Err(e) = gateway.release(&state.header.owner, booking.cost) {
        state.store.reactivate(slot);
        return Err(e);
    }

    if let Err(e) = gateway.release(&booking.reserver, booking.security_deposit) {
        state.store.reactivate(slot);
        return Err(e);
    }

    Ok(ReservationWithdrawn {
        id,
        withdrawn_amount: booking.cost,
        security_deposit: booking.security_deposit,
    })
}
