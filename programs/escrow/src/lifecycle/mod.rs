//! Booking lifecycle engine
//!
//! States per booking: Uninitialized -> Active -> {Cancelled, Withdrawn}.
//! `Active` is entered only by `reserve`; the terminal states are mutually
//! exclusive and reachable only from `Active`. Guards run in a fixed order
//! (paused, role, active, deadline) so failure reporting is deterministic,
//! and every record is deactivated before its funds move.

pub mod reserve;
pub mod cancel;
pub mod withdraw;
pub mod admin;

pub use reserve::*;
pub use cancel::*;
pub use withdraw::*;
pub use admin::*;
