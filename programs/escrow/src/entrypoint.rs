//! Escrow program entrypoint

use pinocchio::{
    account_info::AccountInfo,
    entrypoint,
    msg,
    pubkey::Pubkey,
    sysvars::{clock::Clock, Sysvar},
    ProgramResult,
};

use crate::custody::VaultLedger;
use crate::instructions::*;
use crate::lifecycle;
use crate::state::EscrowState;
use bookvault_common::*;

// Set up panic handler for BPF builds
#[cfg(all(target_os = "solana", not(feature = "no-entrypoint")))]
use core::panic::PanicInfo;

#[cfg(all(target_os = "solana", not(feature = "no-entrypoint")))]
#[panic_handler]
fn panic(_info: &PanicInfo) -> ! {
    loop {}
}

entrypoint!(process_instruction);

pub fn process_instruction(
    program_id: &Pubkey,
    accounts: &[AccountInfo],
    instruction_data: &[u8],
) -> ProgramResult {
    if instruction_data.is_empty() {
        msg!("Error: Instruction data is empty");
        return Err(BookingError::InvalidInstruction.into());
    }

    let discriminator = instruction_data[0];
    let instruction = match discriminator {
        0 => EscrowInstruction::Initialize,
        1 => EscrowInstruction::Deposit,
        2 => EscrowInstruction::Reserve,
        3 => EscrowInstruction::Cancel,
        4 => EscrowInstruction::Withdraw,
        5 => EscrowInstruction::Pause,
        6 => EscrowInstruction::Unpause,
        7 => EscrowInstruction::TransferOwnership,
        _ => {
            msg!("Error: Unknown instruction");
            return Err(BookingError::InvalidInstruction.into());
        }
    };

    let data = &instruction_data[1..];

    match instruction {
        EscrowInstruction::Initialize => {
            msg!("Instruction: Initialize");
            process_initialize(program_id, accounts, data)
        }
        EscrowInstruction::Deposit => {
            msg!("Instruction: Deposit");
            process_deposit(program_id, accounts, data)
        }
        EscrowInstruction::Reserve => {
            msg!("Instruction: Reserve");
            process_reserve(program_id, accounts, data)
        }
        EscrowInstruction::Cancel => {
            msg!("Instruction: Cancel");
            process_cancel(program_id, accounts, data)
        }
        EscrowInstruction::Withdraw => {
            msg!("Instruction: Withdraw");
            process_withdraw(program_id, accounts, data)
        }
        EscrowInstruction::Pause => {
            msg!("Instruction: Pause");
            process_pause(program_id, accounts, data)
        }
        EscrowInstruction::Unpause => {
            msg!("Instruction: Unpause");
            process_unpause(program_id, accounts, data)
        }
        EscrowInstruction::TransferOwnership => {
            msg!("Instruction: TransferOwnership");
            process_transfer_ownership(program_id, accounts, data)
        }
    }
}

/// Current unix time from the clock sysvar
fn current_ts() -> Result<u64, pinocchio::program_error::ProgramError> {
    let clock = Clock::get()?;
    Ok(clock.unix_timestamp.max(0) as u64)
}

/// Validate the account set shared by fund-moving instructions
///
/// Expected accounts:
/// 0. `[writable]` Escrow state account
/// 1. `[writable]` Vault ledger account
/// 2. `[signer]` Caller
fn lifecycle_accounts<'a>(
    program_id: &Pubkey,
    accounts: &'a [AccountInfo],
) -> Result<(&'a mut EscrowState, &'a mut VaultLedger, Pubkey), pinocchio::program_error::ProgramError> {
    if accounts.len() < 3 {
        msg!("Error: Expected state, vault and caller accounts");
        return Err(BookingError::InvalidInstruction.into());
    }

    let state_account = &accounts[0];
    validate_owner(state_account, program_id)?;
    validate_writable(state_account)?;

    let vault_account = &accounts[1];
    validate_owner(vault_account, program_id)?;
    validate_writable(vault_account)?;

    let caller = &accounts[2];
    validate_signer(caller)?;

    // SAFETY: both accounts are program-owned and sized at initialization
    let state = unsafe { borrow_account_data_mut::<EscrowState>(state_account)? };
    let ledger = unsafe { borrow_account_data_mut::<VaultLedger>(vault_account)? };

    if !state.header.validate() {
        return Err(BookingError::InvalidAccount.into());
    }

    Ok((state, ledger, *caller.key()))
}

/// Validate the account set for admin instructions
///
/// Expected accounts:
/// 0. `[writable]` Escrow state account
/// 1. `[signer]` Caller
fn admin_accounts<'a>(
    program_id: &Pubkey,
    accounts: &'a [AccountInfo],
) -> Result<(&'a mut EscrowState, Pubkey), pinocchio::program_error::ProgramError> {
    if accounts.len() < 2 {
        msg!("Error: Expected state and caller accounts");
        return Err(BookingError::InvalidInstruction.into());
    }

    let state_account = &accounts[0];
    validate_owner(state_account, program_id)?;
    validate_writable(state_account)?;

    let caller = &accounts[1];
    validate_signer(caller)?;

    // SAFETY: the state account is program-owned and sized at initialization
    let state = unsafe { borrow_account_data_mut::<EscrowState>(state_account)? };

    if !state.header.validate() {
        return Err(BookingError::InvalidAccount.into());
    }

    Ok((state, *caller.key()))
}

/// Process initialize instruction
///
/// Expected accounts:
/// 0. `[writable]` Escrow state account (zeroed)
/// 1. `[writable]` Vault ledger account (zeroed)
/// 2. `[signer]` Deployer; becomes the operator
fn process_initialize(program_id: &Pubkey, accounts: &[AccountInfo], data: &[u8]) -> ProgramResult {
    if accounts.len() < 3 {
        msg!("Error: Expected state, vault and deployer accounts");
        return Err(BookingError::InvalidInstruction.into());
    }

    let state_account = &accounts[0];
    validate_owner(state_account, program_id)?;
    validate_writable(state_account)?;

    let vault_account = &accounts[1];
    validate_owner(vault_account, program_id)?;
    validate_writable(vault_account)?;

    let deployer = &accounts[2];
    validate_signer(deployer)?;

    let args = InitializeArgs::decode(data)?;

    // SAFETY: both accounts are program-owned and sized by the deployer
    let state = unsafe { borrow_account_data_mut::<EscrowState>(state_account)? };
    let ledger = unsafe { borrow_account_data_mut::<VaultLedger>(vault_account)? };

    if state.header.validate() {
        msg!("Error: Already initialized");
        return Err(BookingError::InvalidAccount.into());
    }

    state.init(*program_id, *deployer.key(), args.bump);
    ledger.reset();

    Ok(())
}

/// Process deposit instruction
///
/// Expected accounts:
/// 0. `[writable]` Vault ledger account
/// 1. `[signer]` Principal being credited
fn process_deposit(program_id: &Pubkey, accounts: &[AccountInfo], data: &[u8]) -> ProgramResult {
    if accounts.len() < 2 {
        msg!("Error: Expected vault and caller accounts");
        return Err(BookingError::InvalidInstruction.into());
    }

    let vault_account = &accounts[0];
    validate_owner(vault_account, program_id)?;
    validate_writable(vault_account)?;

    let caller = &accounts[1];
    validate_signer(caller)?;

    let args = DepositArgs::decode(data)?;

    // SAFETY: the vault account is program-owned and sized at initialization
    let ledger = unsafe { borrow_account_data_mut::<VaultLedger>(vault_account)? };

    ledger.deposit(caller.key(), args.amount)?;
    Ok(())
}

fn process_reserve(program_id: &Pubkey, accounts: &[AccountInfo], data: &[u8]) -> ProgramResult {
    let (state, ledger, caller) = lifecycle_accounts(program_id, accounts)?;
    let args = ReserveArgs::decode(data)?;
    let now_ts = current_ts()?;

    let event = lifecycle::reserve(
        state,
        ledger,
        &caller,
        now_ts,
        args.id,
        args.cost,
        args.refund_deadline_ts,
        args.refund_amount,
        args.security_deposit,
    )?;
    event.log();
    Ok(())
}

fn process_cancel(program_id: &Pubkey, accounts: &[AccountInfo], data: &[u8]) -> ProgramResult {
    let (state, ledger, caller) = lifecycle_accounts(program_id, accounts)?;
    let args = BookingArgs::decode(data)?;
    let now_ts = current_ts()?;

    let event = lifecycle::cancel(state, ledger, &caller, now_ts, args.id)?;
    event.log();
    Ok(())
}

fn process_withdraw(program_id: &Pubkey, accounts: &[AccountInfo], data: &[u8]) -> ProgramResult {
    let (state, ledger, caller) = lifecycle_accounts(program_id, accounts)?;
    let args = BookingArgs::decode(data)?;
    let now_ts = current_ts()?;

    let event = lifecycle::withdraw(state, ledger, &caller, now_ts, args.id)?;
    event.log();
    Ok(())
}

fn process_pause(program_id: &Pubkey, accounts: &[AccountInfo], _data: &[u8]) -> ProgramResult {
    let (state, caller) = admin_accounts(program_id, accounts)?;

    let event = lifecycle::pause(state, &caller)?;
    event.log();
    Ok(())
}

fn process_unpause(program_id: &Pubkey, accounts: &[AccountInfo], _data: &[u8]) -> ProgramResult {
    let (state, caller) = admin_accounts(program_id, accounts)?;

    let event = lifecycle::unpause(state, &caller)?;
    event.log();
    Ok(())
}

fn process_transfer_ownership(
    program_id: &Pubkey,
    accounts: &[AccountInfo],
    data: &[u8],
) -> ProgramResult {
    let (state, caller) = admin_accounts(program_id, accounts)?;
    let args = TransferOwnershipArgs::decode(data)?;

    let event = lifecycle::transfer_ownership(state, &caller, args.new_owner)?;
    event.log();
    Ok(())
}
