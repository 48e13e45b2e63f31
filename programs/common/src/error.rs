//! Error types

use pinocchio::program_error::ProgramError;

/// Program errors
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingError {
    // Common errors (0-99)
    InvalidInstruction = 0,
    InvalidAccount = 1,
    InvalidAccountOwner = 2,
    Overflow = 3,
    Underflow = 4,
    DivideByZero = 5,

    // Access and circuit-breaker errors (100-199)
    Unauthorized = 100,
    InvalidTarget = 101,
    SystemPaused = 102,
    AlreadyPaused = 103,
    NotPaused = 104,

    // Booking errors (200-299)
    InvalidIdentifier = 200,
    NotActive = 201,
    AlreadyActive = 202,
    DeadlinePassed = 203,
    DeadlineNotReached = 204,
    StoreFull = 205,

    // Custody errors (300-399)
    CustodyTransferFailed = 300,
    InsufficientFunds = 301,
}

impl From<BookingError> for u64 {
    fn from(e: BookingError) -> u64 {
        e as u64
    }
}

impl From<BookingError> for ProgramError {
    fn from(e: BookingError) -> ProgramError {
        ProgramError::Custom(e as u32)
    }
}
