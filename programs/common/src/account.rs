//! Account validation helpers
//!
//! Ownership, signer and writability checks plus zero-copy borrows of
//! program-owned state accounts.

use crate::error::BookingError;
use pinocchio::{account_info::AccountInfo, pubkey::Pubkey};

/// Validate that an account is owned by the expected program
#[inline]
pub fn validate_owner(account: &AccountInfo, expected_owner: &Pubkey) -> Result<(), BookingError> {
    if account.owner() != expected_owner {
        return Err(BookingError::InvalidAccountOwner);
    }
    Ok(())
}

/// Validate that an account signed the transaction
#[inline]
pub fn validate_signer(account: &AccountInfo) -> Result<(), BookingError> {
    if !account.is_signer() {
        return Err(BookingError::InvalidAccount);
    }
    Ok(())
}

/// Validate that an account is writable
#[inline]
pub fn validate_writable(account: &AccountInfo) -> Result<(), BookingError> {
    if !account.is_writable() {
        return Err(BookingError::InvalidAccount);
    }
    Ok(())
}

/// Borrow account data as a reference to type T
///
/// # Safety
/// Performs size and alignment checks only; the caller must ensure the
/// account data actually holds a valid instance of T.
pub unsafe fn borrow_account_data<T>(account: &AccountInfo) -> Result<&T, BookingError> {
    let data = account
        .try_borrow_data()
        .map_err(|_| BookingError::InvalidAccount)?;

    if data.len() < core::mem::size_of::<T>() {
        return Err(BookingError::InvalidAccount);
    }

    let ptr = data.as_ptr();
    if (ptr as usize) % core::mem::align_of::<T>() != 0 {
        return Err(BookingError::InvalidAccount);
    }

    // SAFETY: caller must ensure T is valid for this account
    Ok(&*(ptr as *const T))
}

/// Borrow account data as a mutable reference to type T
///
/// # Safety
/// Performs size and alignment checks only; the caller must ensure the
/// account data actually holds a valid instance of T.
pub unsafe fn borrow_account_data_mut<T>(account: &AccountInfo) -> Result<&mut T, BookingError> {
    let mut data = account
        .try_borrow_mut_data()
        .map_err(|_| BookingError::InvalidAccount)?;

    if data.len() < core::mem::size_of::<T>() {
        return Err(BookingError::InvalidAccount);
    }

    let ptr = data.as_mut_ptr();
    if (ptr as usize) % core::mem::align_of::<T>() != 0 {
        return Err(BookingError::InvalidAccount);
    }

    // SAFETY: caller must ensure T is valid for this account
    Ok(&mut *(ptr as *mut T))
}
