//! Instruction discriminators and wire decoding
//!
//! All multi-byte fields are little-endian; short data fails with
//! `InvalidInstruction` before any account is touched.

use bookvault_common::*;
use pinocchio::pubkey::Pubkey;

/// Instruction discriminator
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EscrowInstruction {
    /// Initialize escrow state and vault ledger
    Initialize = 0,
    /// Credit a principal's spendable ledger balance
    Deposit = 1,
    /// Create a booking and custody its funds
    Reserve = 2,
    /// Refund exit before the deadline
    Cancel = 3,
    /// Operator exit after the deadline
    Withdraw = 4,
    /// Engage the circuit breaker
    Pause = 5,
    /// Release the circuit breaker
    Unpause = 6,
    /// Hand the operator role to a new key
    TransferOwnership = 7,
}

/// Read a little-endian u64 field
#[inline]
fn read_u64(data: &[u8], offset: usize) -> Result<u64, BookingError> {
    let bytes: [u8; 8] = data
        .get(offset..offset + 8)
        .and_then(|s| s.try_into().ok())
        .ok_or(BookingError::InvalidInstruction)?;
    Ok(u64::from_le_bytes(bytes))
}

/// Read a booking identifier field
#[inline]
fn read_booking_id(data: &[u8], offset: usize) -> Result<BookingId, BookingError> {
    data.get(offset..offset + 16)
        .and_then(|s| s.try_into().ok())
        .ok_or(BookingError::InvalidInstruction)
}

/// Read a pubkey field
#[inline]
fn read_pubkey(data: &[u8], offset: usize) -> Result<Pubkey, BookingError> {
    data.get(offset..offset + 32)
        .and_then(|s| s.try_into().ok())
        .ok_or(BookingError::InvalidInstruction)
}

/// Initialize payload: [bump: u8]
pub struct InitializeArgs {
    pub bump: u8,
}

impl InitializeArgs {
    pub fn decode(data: &[u8]) -> Result<Self, BookingError> {
        let bump = *data.first().ok_or(BookingError::InvalidInstruction)?;
        Ok(Self { bump })
    }
}

/// Deposit payload: [amount: u64]
pub struct DepositArgs {
    pub amount: u64,
}

impl DepositArgs {
    pub fn decode(data: &[u8]) -> Result<Self, BookingError> {
        Ok(Self {
            amount: read_u64(data, 0)?,
        })
    }
}

/// Reserve payload: [id: 16][cost: u64][deadline: u64][refund: u64][deposit: u64]
#[derive(Debug)]
pub struct ReserveArgs {
    pub id: BookingId,
    pub cost: u64,
    pub refund_deadline_ts: u64,
    pub refund_amount: u64,
    pub security_deposit: u64,
}

impl ReserveArgs {
    pub fn decode(data: &[u8]) -> Result<Self, BookingError> {
        Ok(Self {
            id: read_booking_id(data, 0)?,
            cost: read_u64(data, 16)?,
            refund_deadline_ts: read_u64(data, 24)?,
            refund_amount: read_u64(data, 32)?,
            security_deposit: read_u64(data, 40)?,
        })
    }
}

/// Cancel/Withdraw payload: [id: 16]
#[derive(Debug)]
pub struct BookingArgs {
    pub id: BookingId,
}

impl BookingArgs {
    pub fn decode(data: &[u8]) -> Result<Self, BookingError> {
        Ok(Self {
            id: read_booking_id(data, 0)?,
        })
    }
}

/// TransferOwnership payload: [new_owner: 32]
pub struct TransferOwnershipArgs {
    pub new_owner: Pubkey,
}

impl TransferOwnershipArgs {
    pub fn decode(data: &[u8]) -> Result<Self, BookingError> {
        Ok(Self {
            new_owner: read_pubkey(data, 0)?,
        })
    }
}
