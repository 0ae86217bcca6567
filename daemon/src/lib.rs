//! Ballot command-line driver library.
//!
//! Builds an election from a TOML config, replays a TOML script of
//! caller-attributed commands against it, and renders a JSON report.

pub mod config;
pub mod error;
pub mod report;
pub mod runner;
pub mod script;

pub use config::ElectionConfig;
pub use error::DaemonError;
pub use report::Report;
pub use runner::{bootstrap, run_script, StepOutcome};
pub use script::{Action, Script, Step};
