#![no_std]

pub mod state;
pub mod lifecycle;
pub mod instructions;
pub mod custody;
pub mod events;
pub mod pda;

#[cfg(feature = "bpf-entrypoint")]
mod entrypoint;


pub use state::*;
pub use lifecycle::*;
pub use instructions::*;
pub use custody::*;
pub use events::*;

pinocchio_pubkey::declare_id!("BookXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXX");
