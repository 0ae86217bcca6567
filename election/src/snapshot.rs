//! Serializable snapshot of an election for persistence and inspection.
//!
//! Subscribers are process-local and never persisted; a restored election
//! starts with no listeners.

use ballot_types::{Address, WorkflowStatus};
use serde::{Deserialize, Serialize};

use crate::access::AccessControl;
use crate::election::Election;
use crate::error::ElectionError;
use crate::events::{EventBus, EventLog};
use crate::proposals::ProposalRegistry;
use crate::tally::TallyResult;
use crate::voters::VoterRegistry;
use crate::workflow::WorkflowStateMachine;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElectionSnapshot {
    pub owner: Address,
    pub status: WorkflowStatus,
    pub voters: VoterRegistry,
    pub proposals: ProposalRegistry,
    pub result: Option<TallyResult>,
    pub events: EventLog,
}

impl Election {
    pub fn snapshot(&self) -> ElectionSnapshot {
        ElectionSnapshot {
            owner: self.access.owner().clone(),
            status: self.workflow.status(),
            voters: self.voters.clone(),
            proposals: self.proposals.clone(),
            result: self.result.clone(),
            events: self.log.clone(),
        }
    }

    /// Rebuild an election from a snapshot, rejecting inconsistent state.
    pub fn from_snapshot(snapshot: ElectionSnapshot) -> Result<Self, ElectionError> {
        let election = Self {
            access: AccessControl::new(snapshot.owner),
            workflow: WorkflowStateMachine::restore(snapshot.status),
            voters: snapshot.voters,
            proposals: snapshot.proposals,
            result: snapshot.result,
            log: snapshot.events,
            bus: EventBus::new(),
        };
        election.check_invariants()?;
        Ok(election)
    }

    /// Serialize the election to bytes.
    pub fn save_state(&self) -> Result<Vec<u8>, ElectionError> {
        bincode::serialize(&self.snapshot()).map_err(|e| ElectionError::Snapshot(e.to_string()))
    }

    /// Restore an election from bytes produced by [`Election::save_state`].
    pub fn load_state(data: &[u8]) -> Result<Self, ElectionError> {
        let snapshot: ElectionSnapshot =
            bincode::deserialize(data).map_err(|e| ElectionError::Snapshot(e.to_string()))?;
        Self::from_snapshot(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::proposals::Proposal;

    fn owner() -> Address {
        Address::new("0xowner")
    }

    fn voted_election() -> Election {
        let mut election = Election::new(owner());
        let a = Address::new("0xa");
        election.add_voter(&owner(), a.clone()).unwrap();
        election.start_proposals_registration(&owner()).unwrap();
        election.add_proposal(&a, "x").unwrap();
        election.end_proposals_registration(&owner()).unwrap();
        election.start_voting_session(&owner()).unwrap();
        election.vote(&a, 0).unwrap();
        election
    }

    #[test]
    fn restored_election_keeps_state_and_continues() {
        let election = voted_election();
        let bytes = election.save_state().unwrap();
        let mut restored = Election::load_state(&bytes).unwrap();

        assert_eq!(restored.status(), WorkflowStatus::VotingSessionStarted);
        assert_eq!(restored.events(), election.events());
        assert!(restored.get_voter(&Address::new("0xa")).has_voted);

        restored.end_voting_session(&owner()).unwrap();
        restored.close_voting(&owner()).unwrap();
        assert_eq!(restored.winners().unwrap().descriptions(), vec!["x"]);
    }

    #[test]
    fn garbage_bytes_are_rejected() {
        let err = Election::load_state(&[0xff, 0x01]).unwrap_err();
        assert!(matches!(err, ElectionError::Snapshot(_)));
    }

    #[test]
    fn inconsistent_counts_are_rejected() {
        let mut snapshot = voted_election().snapshot();
        let mut proposals = ProposalRegistry::new();
        proposals.push("x".into());
        snapshot.proposals = proposals;
        assert!(matches!(
            Election::from_snapshot(snapshot),
            Err(ElectionError::Snapshot(_))
        ));
    }

    #[test]
    fn tally_without_terminal_status_is_rejected() {
        let mut snapshot = voted_election().snapshot();
        snapshot.result = Some(TallyResult {
            winners: vec![crate::tally::WinningProposal {
                proposal_id: 0,
                proposal: Proposal {
                    description: "x".into(),
                    vote_count: 1,
                },
            }],
            winning_vote_count: 1,
        });
        assert!(Election::from_snapshot(snapshot).is_err());
    }
}
