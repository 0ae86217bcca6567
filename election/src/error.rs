use ballot_types::{Address, WorkflowStatus};
use thiserror::Error;

use crate::proposals::ProposalId;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ElectionError {
    #[error("caller {0} is not the owner")]
    Unauthorized(Address),

    #[error("operation requires status {expected}, current status is {actual}")]
    WrongPhase {
        expected: WorkflowStatus,
        actual: WorkflowStatus,
    },

    #[error("{0} is not whitelisted to submit proposals or vote")]
    NotWhitelisted(Address),

    #[error("voter {0} has already voted")]
    AlreadyVoted(Address),

    #[error("proposal {proposal_id} does not exist ({proposal_count} registered)")]
    InvalidReference {
        proposal_id: ProposalId,
        proposal_count: usize,
    },

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("snapshot error: {0}")]
    Snapshot(String),
}

/// The failure kind of an [`ElectionError`], without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Unauthorized,
    WrongPhase,
    NotWhitelisted,
    AlreadyVoted,
    InvalidReference,
    InvalidInput,
    Snapshot,
}

impl ElectionError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Unauthorized(_) => ErrorKind::Unauthorized,
            Self::WrongPhase { .. } => ErrorKind::WrongPhase,
            Self::NotWhitelisted(_) => ErrorKind::NotWhitelisted,
            Self::AlreadyVoted(_) => ErrorKind::AlreadyVoted,
            Self::InvalidReference { .. } => ErrorKind::InvalidReference,
            Self::InvalidInput(_) => ErrorKind::InvalidInput,
            Self::Snapshot(_) => ErrorKind::Snapshot,
        }
    }
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unauthorized => "unauthorized",
            Self::WrongPhase => "wrong_phase",
            Self::NotWhitelisted => "not_whitelisted",
            Self::AlreadyVoted => "already_voted",
            Self::InvalidReference => "invalid_reference",
            Self::InvalidInput => "invalid_input",
            Self::Snapshot => "snapshot",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
