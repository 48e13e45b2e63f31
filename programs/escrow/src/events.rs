//! Notifications emitted on successful operations
//!
//! Each lifecycle operation returns its notification record; the entrypoint
//! writes it to the program log for external indexers.

use bookvault_common::*;
use pinocchio::pubkey::Pubkey;
use pinocchio_log::log;

/// Printable prefix of a booking identifier (zero-padded ASCII by convention)
fn id_str(id: &BookingId) -> &str {
    let len = id.iter().position(|&b| b == 0).unwrap_or(id.len());
    core::str::from_utf8(&id[..len]).unwrap_or("<binary>")
}

/// A booking was created and its funds custodied
#[derive(Debug)]
pub struct ReservationCreated {
    pub id: BookingId,
    pub reserver: Pubkey,
    pub cost: u64,
    pub refund_deadline_ts: u64,
    pub refund_amount: u64,
    pub security_deposit: u64,
}

impl ReservationCreated {
    pub fn log(&self) {
        log!(
            "event=reservation_created id={} cost={} deadline={} refund={} deposit={}",
            id_str(&self.id),
            self.cost,
            self.refund_deadline_ts,
            self.refund_amount,
            self.security_deposit
        );
    }
}

/// A booking was cancelled before its deadline and refunded
#[derive(Debug)]
pub struct ReservationCancelled {
    pub id: BookingId,
    pub reserver: Pubkey,
    pub refunded_amount: u64,
}

impl ReservationCancelled {
    pub fn log(&self) {
        log!(
            "event=reservation_cancelled id={} refunded={}",
            id_str(&self.id),
            self.refunded_amount
        );
    }
}

/// A booking was collected by the operator after its deadline
#[derive(Debug)]
pub struct ReservationWithdrawn {
    pub id: BookingId,
    pub withdrawn_amount: u64,
    pub security_deposit: u64,
}

impl ReservationWithdrawn {
    pub fn log(&self) {
        log!(
            "event=reservation_withdrawn id={} withdrawn={} deposit={}",
            id_str(&self.id),
            self.withdrawn_amount,
            self.security_deposit
        );
    }
}

/// The operator role changed hands
#[derive(Debug)]
pub struct OwnershipTransferred {
    pub previous: Pubkey,
    pub next: Pubkey,
}

impl OwnershipTransferred {
    pub fn log(&self) {
        log!("event=ownership_transferred");
    }
}

/// The circuit breaker was engaged
#[derive(Debug)]
pub struct Paused;

impl Paused {
    pub fn log(&self) {
        log!("event=paused");
    }
}

/// The circuit breaker was released
#[derive(Debug)]
pub struct Unpaused;

impl Unpaused {
    pub fn log(&self) {
        log!("event=unpaused");
    }
}
