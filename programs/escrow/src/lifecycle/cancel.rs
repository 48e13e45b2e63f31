//! Cancel operation - refund exit, strictly before the deadline

use crate::custody::CustodyGateway;
use crate::events::ReservationCancelled;
use crate::state::EscrowState;
use bookvault_common::*;
use pinocchio::pubkey::Pubkey;

/// Cancel an active booking and release its funds
///
/// Only the reserver may cancel, and only strictly before the refund
/// deadline. The reserver receives `refund_amount + security_deposit`; the
/// remainder of the cost, if any, goes to the operator as a service fee.
/// `refund_amount > cost` fails the checked subtraction and aborts the
/// cancellation whole.
pub fn cancel<G: CustodyGateway>(
    state: &mut EscrowState,
    gateway: &mut G,
    caller: &Pubkey,
    now_ts: u64,
    id: BookingId,
) -> Result<ReservationCancelled, BookingError> {
    if state.header.paused {
        return Err(BookingError::SystemPaused);
    }

    let slot = state.store.find_slot(&id).ok_or(BookingError::NotActive)?;
    let booking = state.store.entries[slot as usize];

    if &booking.reserver != caller {
        return Err(BookingError::Unauthorized);
    }
    if !booking.active {
        return Err(BookingError::NotActive);
    }
    if now_ts >= booking.refund_deadline_ts {
        return Err(BookingError::DeadlinePassed);
    }

    let refund_total = checked_add(booking.refund_amount, booking.security_deposit)?;
    let service_fee = checked_sub(booking.cost, booking.refund_amount)?;

    // Deactivate before funds move so neither exit path can run twice
    state.store.remove_active(slot);

    if let Err(e) = gateway.release(&booking.reserver, refund_total) {
        state.store.reactivate(slot);
        return Err(e);
    }

    if service_fee > 0 {
        if let Err(e) = gateway.release(&state.header.owner, service_fee) {
            state.store.reactivate(slot);
            return Err(e);
        }
    }

    Ok(ReservationCancelled {
        id,
        reserver: booking.reserver,
        refunded_amount: refund_total,
    })
}
