//! Owner-gated administrative operations

use crate::events::{OwnershipTransferred, Paused, Unpaused};
use crate::state::EscrowState;
use bookvault_common::*;
use pinocchio::pubkey::Pubkey;

/// Engage the circuit breaker
pub fn pause(state: &mut EscrowState, caller: &Pubkey) -> Result<Paused, BookingError> {
    if !state.header.is_owner(caller) {
        return Err(BookingError::Unauthorized);
    }
    if state.header.paused {
        return Err(BookingError::AlreadyPaused);
    }

    state.header.paused = true;
    Ok(Paused)
}

/// Release the circuit breaker
pub fn unpause(state: &mut EscrowState, caller: &Pubkey) -> Result<Unpaused, BookingError> {
    if !state.header.is_owner(caller) {
        return Err(BookingError::Unauthorized);
    }
    if !state.header.paused {
        return Err(BookingError::NotPaused);
    }

    state.header.paused = false;
    Ok(Unpaused)
}

/// Hand the operator role to a new key
///
/// The zero key is not a valid operator; the role would be unrecoverable.
pub fn transfer_ownership(
    state: &mut EscrowState,
    caller: &Pubkey,
    new_owner: Pubkey,
) -> Result<OwnershipTransferred, BookingError> {
    if !state.header.is_owner(caller) {
        return Err(BookingError::Unauthorized);
    }
    if new_owner == Pubkey::default() {
        return Err(BookingError::InvalidTarget);
    }

    let previous = state.header.owner;
    state.header.owner = new_owner;

    Ok(OwnershipTransferred {
        previous,
        next: new_owner,
    })
}
