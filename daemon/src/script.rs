//! Command scripts: ordered, caller-attributed election commands.
//!
//! ```toml
//! [[step]]
//! caller = "0xowner"
//! action = "add_voter"
//! address = "0xalice"
//!
//! [[step]]
//! caller = "0xalice"
//! action = "vote"
//! proposal_id = 0
//! ```

use ballot_election::{Election, ElectionError, ProposalId, Transition};
use ballot_types::Address;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::DaemonError;

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Script {
    #[serde(default, rename = "step")]
    pub steps: Vec<Step>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    pub caller: Address,
    #[serde(flatten)]
    pub action: Action,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    AddVoter { address: Address },
    RemoveVoter { address: Address },
    StartProposalsRegistration,
    EndProposalsRegistration,
    AddProposal { description: String },
    StartVotingSession,
    Vote { proposal_id: ProposalId },
    EndVotingSession,
    CloseVoting,
}

impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Self::AddVoter { .. } => "add_voter",
            Self::RemoveVoter { .. } => "remove_voter",
            Self::StartProposalsRegistration => "start_proposals_registration",
            Self::EndProposalsRegistration => "end_proposals_registration",
            Self::AddProposal { .. } => "add_proposal",
            Self::StartVotingSession => "start_voting_session",
            Self::Vote { .. } => "vote",
            Self::EndVotingSession => "end_voting_session",
            Self::CloseVoting => "close_voting",
        }
    }
}

impl Step {
    /// Run this step against `election`, returning a short summary.
    pub fn apply(&self, election: &mut Election) -> Result<String, ElectionError> {
        let caller = &self.caller;
        match &self.action {
            Action::AddVoter { address } => {
                election.add_voter(caller, address.clone())?;
                Ok(format!("{address} whitelisted"))
            }
            Action::RemoveVoter { address } => {
                election.remove_voter(caller, address)?;
                Ok(format!("{address} removed from whitelist"))
            }
            Action::AddProposal { description } => {
                let id = election.add_proposal(caller, description.clone())?;
                Ok(format!("proposal {id} registered"))
            }
            Action::Vote { proposal_id } => {
                election.vote(caller, *proposal_id)?;
                Ok(format!("{caller} voted for proposal {proposal_id}"))
            }
            Action::StartProposalsRegistration => {
                advance(election, caller, Transition::StartProposalsRegistration)
            }
            Action::EndProposalsRegistration => {
                advance(election, caller, Transition::EndProposalsRegistration)
            }
            Action::StartVotingSession => advance(election, caller, Transition::StartVotingSession),
            Action::EndVotingSession => advance(election, caller, Transition::EndVotingSession),
            Action::CloseVoting => {
                let result = election.close_voting(caller)?;
                Ok(format!("votes tallied, winners {:?}", result.ids()))
            }
        }
    }
}

fn advance(
    election: &mut Election,
    caller: &Address,
    transition: Transition,
) -> Result<String, ElectionError> {
    let status = election.apply_transition(caller, transition)?;
    Ok(format!("status is now {status}"))
}

impl Script {
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, DaemonError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| DaemonError::Script(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(s: &str) -> Result<Self, DaemonError> {
        toml::from_str(s).map_err(|e| DaemonError::Script(e.to_string()))
    }
}
