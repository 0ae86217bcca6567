//! Election lifecycle phases and the transitions between them.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The phase an election is in.
///
/// Phases are totally ordered and only ever move forward by one step.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum WorkflowStatus {
    /// The owner is whitelisting voters.
    #[default]
    RegisteringVoters,
    /// Whitelisted voters may submit proposals.
    ProposalsRegistrationStarted,
    /// Proposal submission is closed; voting has not opened yet.
    ProposalsRegistrationEnded,
    /// Whitelisted voters may cast their single vote.
    VotingSessionStarted,
    /// Voting is closed; waiting for the tally.
    VotingSessionEnded,
    /// Winners have been computed. Terminal.
    VotesTallied,
}

impl WorkflowStatus {
    /// Every phase, in lifecycle order.
    pub const ALL: [WorkflowStatus; 6] = [
        Self::RegisteringVoters,
        Self::ProposalsRegistrationStarted,
        Self::ProposalsRegistrationEnded,
        Self::VotingSessionStarted,
        Self::VotingSessionEnded,
        Self::VotesTallied,
    ];

    /// Numeric code of this phase (0 through 5).
    pub fn code(&self) -> u8 {
        match self {
            Self::RegisteringVoters => 0,
            Self::ProposalsRegistrationStarted => 1,
            Self::ProposalsRegistrationEnded => 2,
            Self::VotingSessionStarted => 3,
            Self::VotingSessionEnded => 4,
            Self::VotesTallied => 5,
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.get(usize::from(code)).copied()
    }

    /// The only phase reachable from this one, if any.
    pub fn next(&self) -> Option<Self> {
        match self {
            Self::RegisteringVoters => Some(Self::ProposalsRegistrationStarted),
            Self::ProposalsRegistrationStarted => Some(Self::ProposalsRegistrationEnded),
            Self::ProposalsRegistrationEnded => Some(Self::VotingSessionStarted),
            Self::VotingSessionStarted => Some(Self::VotingSessionEnded),
            Self::VotingSessionEnded => Some(Self::VotesTallied),
            Self::VotesTallied => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.next().is_none()
    }

    /// Human-readable description shown to participants.
    pub fn label(&self) -> &'static str {
        match self {
            Self::RegisteringVoters => "Voting has not started, whitelisting in progress",
            Self::ProposalsRegistrationStarted => "Please submit proposals",
            Self::ProposalsRegistrationEnded => {
                "Proposal session has ended, please wait for voting session to open"
            }
            Self::VotingSessionStarted => "Voting session is open, please vote",
            Self::VotingSessionEnded => "Vote has ended, wait for counting",
            Self::VotesTallied => "Result of the voting session",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RegisteringVoters => "RegisteringVoters",
            Self::ProposalsRegistrationStarted => "ProposalsRegistrationStarted",
            Self::ProposalsRegistrationEnded => "ProposalsRegistrationEnded",
            Self::VotingSessionStarted => "VotingSessionStarted",
            Self::VotingSessionEnded => "VotingSessionEnded",
            Self::VotesTallied => "VotesTallied",
        }
    }
}

impl fmt::Display for WorkflowStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.as_str(), self.code())
    }
}

/// One of the five owner-driven phase advances.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Transition {
    StartProposalsRegistration,
    EndProposalsRegistration,
    StartVotingSession,
    EndVotingSession,
    CloseVoting,
}

impl Transition {
    pub const ALL: [Transition; 5] = [
        Self::StartProposalsRegistration,
        Self::EndProposalsRegistration,
        Self::StartVotingSession,
        Self::EndVotingSession,
        Self::CloseVoting,
    ];

    /// The phase this transition must start from.
    pub fn from_status(&self) -> WorkflowStatus {
        match self {
            Self::StartProposalsRegistration => WorkflowStatus::RegisteringVoters,
            Self::EndProposalsRegistration => WorkflowStatus::ProposalsRegistrationStarted,
            Self::StartVotingSession => WorkflowStatus::ProposalsRegistrationEnded,
            Self::EndVotingSession => WorkflowStatus::VotingSessionStarted,
            Self::CloseVoting => WorkflowStatus::VotingSessionEnded,
        }
    }

    /// The phase this transition lands in.
    pub fn to_status(&self) -> WorkflowStatus {
        match self {
            Self::StartProposalsRegistration => WorkflowStatus::ProposalsRegistrationStarted,
            Self::EndProposalsRegistration => WorkflowStatus::ProposalsRegistrationEnded,
            Self::StartVotingSession => WorkflowStatus::VotingSessionStarted,
            Self::EndVotingSession => WorkflowStatus::VotingSessionEnded,
            Self::CloseVoting => WorkflowStatus::VotesTallied,
        }
    }

    /// The transition that is legal while in `status`, if any.
    pub fn for_status(status: WorkflowStatus) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.from_status() == status)
    }

    /// Short imperative label for an admin control.
    pub fn action_label(&self) -> &'static str {
        match self {
            Self::StartProposalsRegistration => "start proposal session",
            Self::EndProposalsRegistration => "end proposal session",
            Self::StartVotingSession => "start voting session",
            Self::EndVotingSession => "end voting session",
            Self::CloseVoting => "tally vote",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_follow_lifecycle_order() {
        for (i, status) in WorkflowStatus::ALL.iter().enumerate() {
            assert_eq!(usize::from(status.code()), i);
            assert_eq!(WorkflowStatus::from_code(status.code()), Some(*status));
        }
        assert_eq!(WorkflowStatus::from_code(6), None);
    }

    #[test]
    fn next_moves_exactly_one_step() {
        for pair in WorkflowStatus::ALL.windows(2) {
            assert_eq!(pair[0].next(), Some(pair[1]));
            assert!(pair[0] < pair[1]);
        }
        assert!(WorkflowStatus::VotesTallied.is_terminal());
    }

    #[test]
    fn transitions_agree_with_next() {
        for t in Transition::ALL {
            assert_eq!(t.from_status().next(), Some(t.to_status()));
            assert_eq!(Transition::for_status(t.from_status()), Some(t));
        }
        assert_eq!(Transition::for_status(WorkflowStatus::VotesTallied), None);
    }

    #[test]
    fn default_is_registering_voters() {
        assert_eq!(WorkflowStatus::default(), WorkflowStatus::RegisteringVoters);
    }

    #[test]
    fn display_includes_code() {
        assert_eq!(
            WorkflowStatus::VotingSessionStarted.to_string(),
            "VotingSessionStarted(3)"
        );
    }
}
