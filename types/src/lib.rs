//! Fundamental types for the ballot ledger.
//!
//! This crate defines the types shared by the election core and the
//! command-line driver: caller identities and the election lifecycle phases.

pub mod address;
pub mod state;

pub use address::{Address, AddressError};
pub use state::{Transition, WorkflowStatus};
