//! Reserve operation - create a booking and custody its funds

use crate::custody::CustodyGateway;
use crate::events::ReservationCreated;
use crate::state::EscrowState;
use bookvault_common::*;
use pinocchio::pubkey::Pubkey;

/// Create an Active booking and pull `cost + security_deposit` into custody
///
/// The store insert and the custody pull succeed together or not at all: a
/// gateway refusal rolls the insert back before the error surfaces, so no
/// Active record can exist without its custodied value.
pub fn reserve<G: CustodyGateway>(
    state: &mut EscrowState,
    gateway: &mut G,
    caller: &Pubkey,
    now_ts: u64,
    id: BookingId,
    cost: u64,
    refund_deadline_ts: u64,
    refund_amount: u64,
    security_deposit: u64,
) -> Result<ReservationCreated, BookingError> {
    if state.header.paused {
        return Err(BookingError::SystemPaused);
    }
    if id == EMPTY_BOOKING_ID {
        return Err(BookingError::InvalidIdentifier);
    }
    if refund_deadline_ts <= now_ts {
        return Err(BookingError::DeadlinePassed);
    }

    let total = checked_add(cost, security_deposit)?;

    // Snapshot the retired record, if any, so a refusal can restore it
    let prev = state
        .store
        .find_slot(&id)
        .map(|slot| state.store.entries[slot as usize]);

    let slot = state.store.insert(Booking {
        id,
        reserver: *caller,
        cost,
        security_deposit,
        refund_deadline_ts,
        refund_amount,
        ..Booking::default()
    })?;

    if let Err(e) = gateway.pull_into(caller, total) {
        state.store.rollback_insert(slot, prev);
        return Err(e);
    }

    Ok(ReservationCreated {
        id,
        reserver: *caller,
        cost,
        refund_deadline_ts,
        refund_amount,
        security_deposit,
    })
}
