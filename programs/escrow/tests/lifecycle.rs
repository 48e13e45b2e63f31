//! End-to-end lifecycle tests
//!
//! Drives the engine the way the entrypoint does: one state account, one
//! vault ledger, authenticated caller keys and an explicit clock value.

use bookvault_common::*;
use bookvault_escrow::custody::{CustodyGateway, VaultLedger};
use bookvault_escrow::lifecycle;
use bookvault_escrow::state::EscrowState;
use pinocchio::pubkey::Pubkey;

fn key(b: u8) -> Pubkey {
    [b; 32]
}

fn bid(s: &str) -> BookingId {
    let mut id = EMPTY_BOOKING_ID;
    id[..s.len()].copy_from_slice(s.as_bytes());
    id
}

fn new_state(owner: Pubkey) -> Box<EscrowState> {
    Box::new(EscrowState::new(Pubkey::default(), owner, 0))
}

/// Gateway wrapper that starts refusing after a set number of successful
/// transfers
struct FlakyGateway {
    inner: VaultLedger,
    successes_left: u32,
}

impl FlakyGateway {
    fn new(inner: VaultLedger, successes_left: u32) -> Self {
        Self {
            inner,
            successes_left,
        }
    }

    fn take(&mut self) -> Result<(), BookingError> {
        if self.successes_left == 0 {
            return Err(BookingError::CustodyTransferFailed);
        }
        self.successes_left -= 1;
        Ok(())
    }
}

impl CustodyGateway for FlakyGateway {
    fn pull_into(&mut self, from: &Pubkey, amount: u64) -> Result<(), BookingError> {
        self.take()?;
        self.inner.pull_into(from, amount)
    }

    fn release(&mut self, to: &Pubkey, amount: u64) -> Result<(), BookingError> {
        self.take()?;
        self.inner.release(to, amount)
    }
}

#[test]
fn test_cancel_scenario_splits_funds() {
    let owner = key(1);
    let alice = key(2);
    let mut state = new_state(owner);
    let mut ledger = VaultLedger::new();
    ledger.deposit(&alice, 1_000).unwrap();

    lifecycle::reserve(&mut state, &mut ledger, &alice, 0, bid("b1"), 100, 1_000, 80, 20).unwrap();

    assert_eq!(state.active_count(), 1);
    assert_eq!(ledger.balance_of(&alice), 880);
    assert_eq!(ledger.custodied, 120);

    let event = lifecycle::cancel(&mut state, &mut ledger, &alice, 999, bid("b1")).unwrap();

    // refund 80 + deposit 20 to the reserver, service fee 20 to the operator
    assert_eq!(event.refunded_amount, 100);
    assert_eq!(ledger.balance_of(&alice), 980);
    assert_eq!(ledger.balance_of(&owner), 20);
    assert_eq!(ledger.custodied, 0);

    assert_eq!(state.active_count(), 0);
    let record = state.get_reservation(&bid("b1")).unwrap();
    assert!(!record.active);
}

#[test]
fn test_cancel_with_full_refund_pays_no_fee() {
    let owner = key(1);
    let alice = key(2);
    let mut state = new_state(owner);
    let mut ledger = VaultLedger::new();
    ledger.deposit(&alice, 500).unwrap();

    lifecycle::reserve(&mut state, &mut ledger, &alice, 0, bid("b1"), 100, 50, 100, 30).unwrap();
    lifecycle::cancel(&mut state, &mut ledger, &alice, 49, bid("b1")).unwrap();

    assert_eq!(ledger.balance_of(&alice), 500);
    assert_eq!(ledger.balance_of(&owner), 0);
    assert_eq!(ledger.custodied, 0);
}

#[test]
fn test_withdraw_scenario_after_deadline() {
    let owner = key(1);
    let alice = key(2);
    let mut state = new_state(owner);
    let mut ledger = VaultLedger::new();
    ledger.deposit(&alice, 200).unwrap();

    lifecycle::reserve(&mut state, &mut ledger, &alice, 0, bid("b2"), 50, 5, 40, 10).unwrap();

    let event = lifecycle::withdraw(&mut state, &mut ledger, &owner, 6, bid("b2")).unwrap();

    assert_eq!(event.withdrawn_amount, 50);
    assert_eq!(event.security_deposit, 10);
    assert_eq!(ledger.balance_of(&owner), 50);
    assert_eq!(ledger.balance_of(&alice), 150);
    assert_eq!(ledger.custodied, 0);

    // The booking resolved once; the refund exit is gone for good
    assert_eq!(
        lifecycle::cancel(&mut state, &mut ledger, &alice, 7, bid("b2")).unwrap_err(),
        BookingError::NotActive
    );
}

#[test]
fn test_exits_rejected_at_deadline_instant() {
    let owner = key(1);
    let alice = key(2);
    let mut state = new_state(owner);
    let mut ledger = VaultLedger::new();
    ledger.deposit(&alice, 200).unwrap();

    lifecycle::reserve(&mut state, &mut ledger, &alice, 0, bid("b1"), 50, 100, 40, 10).unwrap();

    assert_eq!(
        lifecycle::cancel(&mut state, &mut ledger, &alice, 100, bid("b1")).unwrap_err(),
        BookingError::DeadlinePassed
    );
    assert_eq!(
        lifecycle::withdraw(&mut state, &mut ledger, &owner, 100, bid("b1")).unwrap_err(),
        BookingError::DeadlineNotReached
    );

    // One tick past the instant, the operator window opens
    lifecycle::withdraw(&mut state, &mut ledger, &owner, 101, bid("b1")).unwrap();
}

#[test]
fn test_reserve_gate_failures() {
    let owner = key(1);
    let alice = key(2);
    let mut state = new_state(owner);
    let mut ledger = VaultLedger::new();
    ledger.deposit(&alice, 1_000).unwrap();

    assert_eq!(
        lifecycle::reserve(
            &mut state,
            &mut ledger,
            &alice,
            50,
            EMPTY_BOOKING_ID,
            10,
            100,
            5,
            5
        )
        .unwrap_err(),
        BookingError::InvalidIdentifier
    );

    // Deadline must be strictly in the future
    assert_eq!(
        lifecycle::reserve(&mut state, &mut ledger, &alice, 50, bid("b1"), 10, 50, 5, 5)
            .unwrap_err(),
        BookingError::DeadlinePassed
    );

    lifecycle::reserve(&mut state, &mut ledger, &alice, 50, bid("b1"), 10, 100, 5, 5).unwrap();
    assert_eq!(
        lifecycle::reserve(&mut state, &mut ledger, &alice, 50, bid("b1"), 10, 100, 5, 5)
            .unwrap_err(),
        BookingError::AlreadyActive
    );

    // cost + deposit overflowing u64 aborts before any mutation
    assert_eq!(
        lifecycle::reserve(
            &mut state,
            &mut ledger,
            &alice,
            50,
            bid("b2"),
            u64::MAX,
            100,
            0,
            1
        )
        .unwrap_err(),
        BookingError::Overflow
    );
    assert_eq!(state.active_count(), 1);
}

#[test]
fn test_cancel_role_and_state_gates() {
    let owner = key(1);
    let alice = key(2);
    let mallory = key(3);
    let mut state = new_state(owner);
    let mut ledger = VaultLedger::new();
    ledger.deposit(&alice, 200).unwrap();

    assert_eq!(
        lifecycle::cancel(&mut state, &mut ledger, &alice, 0, bid("nope")).unwrap_err(),
        BookingError::NotActive
    );

    lifecycle::reserve(&mut state, &mut ledger, &alice, 0, bid("b1"), 50, 100, 40, 10).unwrap();

    assert_eq!(
        lifecycle::cancel(&mut state, &mut ledger, &mallory, 10, bid("b1")).unwrap_err(),
        BookingError::Unauthorized
    );
    assert_eq!(
        lifecycle::cancel(&mut state, &mut ledger, &owner, 10, bid("b1")).unwrap_err(),
        BookingError::Unauthorized
    );

    lifecycle::cancel(&mut state, &mut ledger, &alice, 10, bid("b1")).unwrap();

    // Retired entry still carries its reserver: strangers stay Unauthorized,
    // the reserver sees NotActive
    assert_eq!(
        lifecycle::cancel(&mut state, &mut ledger, &mallory, 10, bid("b1")).unwrap_err(),
        BookingError::Unauthorized
    );
    assert_eq!(
        lifecycle::cancel(&mut state, &mut ledger, &alice, 10, bid("b1")).unwrap_err(),
        BookingError::NotActive
    );
}

#[test]
fn test_withdraw_owner_only() {
    let owner = key(1);
    let alice = key(2);
    let mut state = new_state(owner);
    let mut ledger = VaultLedger::new();
    ledger.deposit(&alice, 200).unwrap();

    lifecycle::reserve(&mut state, &mut ledger, &alice, 0, bid("b1"), 50, 5, 40, 10).unwrap();

    assert_eq!(
        lifecycle::withdraw(&mut state, &mut ledger, &alice, 6, bid("b1")).unwrap_err(),
        BookingError::Unauthorized
    );
}

#[test]
fn test_refund_exceeding_cost_blocks_cancel_not_withdraw() {
    let owner = key(1);
    let alice = key(2);
    let mut state = new_state(owner);
    let mut ledger = VaultLedger::new();
    ledger.deposit(&alice, 500).unwrap();

    // Caller-supplied refund above cost: the checked subtraction fails and
    // the cancellation aborts whole, leaving the booking active
    lifecycle::reserve(&mut state, &mut ledger, &alice, 0, bid("b1"), 100, 50, 150, 20).unwrap();

    assert_eq!(
        lifecycle::cancel(&mut state, &mut ledger, &alice, 10, bid("b1")).unwrap_err(),
        BookingError::Underflow
    );
    assert!(state.get_reservation(&bid("b1")).unwrap().active);

    // The operator exit still works once the deadline passes
    lifecycle::withdraw(&mut state, &mut ledger, &owner, 6, bid("b1")).unwrap();
    assert_eq!(ledger.balance_of(&owner), 100);
    assert_eq!(ledger.balance_of(&alice), 400);
}

#[test]
fn test_pause_blocks_all_mutating_operations() {
    let owner = key(1);
    let alice = key(2);
    let mut state = new_state(owner);
    let mut ledger = VaultLedger::new();
    ledger.deposit(&alice, 500).unwrap();

    lifecycle::reserve(&mut state, &mut ledger, &alice, 0, bid("b1"), 50, 100, 40, 10).unwrap();
    lifecycle::pause(&mut state, &owner).unwrap();
    assert!(state.is_paused());

    assert_eq!(
        lifecycle::reserve(&mut state, &mut ledger, &alice, 0, bid("b2"), 50, 100, 40, 10)
            .unwrap_err(),
        BookingError::SystemPaused
    );
    assert_eq!(
        lifecycle::cancel(&mut state, &mut ledger, &alice, 10, bid("b1")).unwrap_err(),
        BookingError::SystemPaused
    );
    assert_eq!(
        lifecycle::withdraw(&mut state, &mut ledger, &owner, 101, bid("b1")).unwrap_err(),
        BookingError::SystemPaused
    );

    lifecycle::unpause(&mut state, &owner).unwrap();
    lifecycle::cancel(&mut state, &mut ledger, &alice, 10, bid("b1")).unwrap();
}

#[test]
fn test_pause_gates() {
    let owner = key(1);
    let mallory = key(3);
    let mut state = new_state(owner);

    assert_eq!(
        lifecycle::pause(&mut state, &mallory).unwrap_err(),
        BookingError::Unauthorized
    );
    assert_eq!(
        lifecycle::unpause(&mut state, &owner).unwrap_err(),
        BookingError::NotPaused
    );

    lifecycle::pause(&mut state, &owner).unwrap();
    assert_eq!(
        lifecycle::pause(&mut state, &owner).unwrap_err(),
        BookingError::AlreadyPaused
    );

    lifecycle::unpause(&mut state, &owner).unwrap();
    assert!(!state.is_paused());
}

#[test]
fn test_transfer_ownership() {
    let owner = key(1);
    let next = key(4);
    let mallory = key(3);
    let mut state = new_state(owner);

    assert_eq!(
        lifecycle::transfer_ownership(&mut state, &mallory, next).unwrap_err(),
        BookingError::Unauthorized
    );
    assert_eq!(
        lifecycle::transfer_ownership(&mut state, &owner, Pubkey::default()).unwrap_err(),
        BookingError::InvalidTarget
    );

    let event = lifecycle::transfer_ownership(&mut state, &owner, next).unwrap();
    assert_eq!(event.previous, owner);
    assert_eq!(event.next, next);
    assert_eq!(state.current_owner(), &next);

    // The old key lost the operator role
    assert_eq!(
        lifecycle::pause(&mut state, &owner).unwrap_err(),
        BookingError::Unauthorized
    );
    lifecycle::pause(&mut state, &next).unwrap();
}

#[test]
fn test_reserve_pull_failure_rolls_back_insert() {
    let owner = key(1);
    let alice = key(2);
    let mut state = new_state(owner);
    let mut ledger = VaultLedger::new();
    ledger.deposit(&alice, 100).unwrap();

    // 100 + 20 exceeds the spendable balance; the pull is refused
    assert_eq!(
        lifecycle::reserve(&mut state, &mut ledger, &alice, 0, bid("b1"), 100, 1_000, 80, 20)
            .unwrap_err(),
        BookingError::CustodyTransferFailed
    );

    assert_eq!(state.active_count(), 0);
    assert!(state.get_reservation(&bid("b1")).is_none());
    assert_eq!(ledger.balance_of(&alice), 100);
    assert_eq!(ledger.custodied, 0);
}

#[test]
fn test_reserve_pull_failure_restores_retired_record() {
    let owner = key(1);
    let alice = key(2);
    let mut state = new_state(owner);
    let mut ledger = VaultLedger::new();
    ledger.deposit(&alice, 200).unwrap();

    lifecycle::reserve(&mut state, &mut ledger, &alice, 0, bid("b1"), 100, 1_000, 80, 20).unwrap();
    lifecycle::cancel(&mut state, &mut ledger, &alice, 10, bid("b1")).unwrap();

    // Re-reserving the same id with nothing left to pull must put the old
    // retired record back
    assert_eq!(
        lifecycle::reserve(
            &mut state,
            &mut ledger,
            &alice,
            20,
            bid("b1"),
            u64::MAX / 2,
            1_000,
            0,
            0
        )
        .unwrap_err(),
        BookingError::CustodyTransferFailed
    );

    let record = state.get_reservation(&bid("b1")).unwrap();
    assert!(!record.active);
    assert_eq!(record.cost, 100);
    assert_eq!(state.active_count(), 0);
}

#[test]
fn test_cancel_release_failure_reactivates_booking() {
    let owner = key(1);
    let alice = key(2);
    let mut state = new_state(owner);
    let mut ledger = VaultLedger::new();
    ledger.deposit(&alice, 500).unwrap();

    lifecycle::reserve(&mut state, &mut ledger, &alice, 0, bid("b1"), 100, 1_000, 80, 20).unwrap();

    let mut flaky = FlakyGateway::new(ledger, 0);
    assert_eq!(
        lifecycle::cancel(&mut state, &mut flaky, &alice, 10, bid("b1")).unwrap_err(),
        BookingError::CustodyTransferFailed
    );

    // The record is active again and a later retry resolves normally
    assert!(state.get_reservation(&bid("b1")).unwrap().active);
    assert_eq!(state.active_count(), 1);

    flaky.successes_left = 2;
    lifecycle::cancel(&mut state, &mut flaky, &alice, 10, bid("b1")).unwrap();
    assert_eq!(flaky.inner.balance_of(&alice), 480);
    assert_eq!(flaky.inner.balance_of(&owner), 20);
    assert_eq!(state.active_count(), 0);
}

#[test]
fn test_withdraw_release_failure_reactivates_booking() {
    let owner = key(1);
    let alice = key(2);
    let mut state = new_state(owner);
    let mut ledger = VaultLedger::new();
    ledger.deposit(&alice, 500).unwrap();

    lifecycle::reserve(&mut state, &mut ledger, &alice, 0, bid("b1"), 100, 5, 80, 20).unwrap();

    let mut flaky = FlakyGateway::new(ledger, 0);
    assert_eq!(
        lifecycle::withdraw(&mut state, &mut flaky, &owner, 6, bid("b1")).unwrap_err(),
        BookingError::CustodyTransferFailed
    );
    assert!(state.get_reservation(&bid("b1")).unwrap().active);

    flaky.successes_left = 2;
    lifecycle::withdraw(&mut state, &mut flaky, &owner, 6, bid("b1")).unwrap();
    assert_eq!(flaky.inner.balance_of(&owner), 100);
    assert_eq!(flaky.inner.balance_of(&alice), 400);
}

#[test]
fn test_resolved_id_can_be_reserved_again() {
    let owner = key(1);
    let alice = key(2);
    let bob = key(5);
    let mut state = new_state(owner);
    let mut ledger = VaultLedger::new();
    ledger.deposit(&alice, 500).unwrap();
    ledger.deposit(&bob, 500).unwrap();

    lifecycle::reserve(&mut state, &mut ledger, &alice, 0, bid("b1"), 100, 10, 80, 20).unwrap();
    lifecycle::cancel(&mut state, &mut ledger, &alice, 5, bid("b1")).unwrap();

    // Same identifier, different reserver: the retired slot is rewritten
    lifecycle::reserve(&mut state, &mut ledger, &bob, 20, bid("b1"), 60, 100, 50, 5).unwrap();

    let record = state.get_reservation(&bid("b1")).unwrap();
    assert!(record.active);
    assert_eq!(record.reserver, bob);
    assert_eq!(record.cost, 60);
    assert_eq!(state.active_count(), 1);

    // The previous reserver has no claim on the new booking
    assert_eq!(
        lifecycle::cancel(&mut state, &mut ledger, &alice, 25, bid("b1")).unwrap_err(),
        BookingError::Unauthorized
    );
}
