//! Append-only proposal list and vote counts.

use serde::{Deserialize, Serialize};

use crate::error::ElectionError;

/// A proposal is identified by its 0-based position in the registry.
pub type ProposalId = usize;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proposal {
    pub description: String,
    pub vote_count: u64,
}

/// Ordered proposals. Ids are never reused or reordered.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposalRegistry {
    proposals: Vec<Proposal>,
}

impl ProposalRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject descriptions that cannot become a proposal.
    pub fn validate_description(description: &str) -> Result<(), ElectionError> {
        if description.is_empty() {
            return Err(ElectionError::InvalidInput(
                "proposal description must not be empty".into(),
            ));
        }
        Ok(())
    }

    /// Append a proposal with zero votes and return its id.
    pub(crate) fn push(&mut self, description: String) -> ProposalId {
        self.proposals.push(Proposal {
            description,
            vote_count: 0,
        });
        self.proposals.len() - 1
    }

    pub fn get(&self, id: ProposalId) -> Option<&Proposal> {
        self.proposals.get(id)
    }

    /// Fail unless `id` names a registered proposal.
    pub fn ensure_exists(&self, id: ProposalId) -> Result<(), ElectionError> {
        if id < self.proposals.len() {
            Ok(())
        } else {
            Err(ElectionError::InvalidReference {
                proposal_id: id,
                proposal_count: self.proposals.len(),
            })
        }
    }

    /// Add one vote to proposal `id`.
    pub(crate) fn increment(&mut self, id: ProposalId) -> Result<u64, ElectionError> {
        let count = self.proposals.len();
        let proposal = self
            .proposals
            .get_mut(id)
            .ok_or(ElectionError::InvalidReference {
                proposal_id: id,
                proposal_count: count,
            })?;
        proposal.vote_count += 1;
        Ok(proposal.vote_count)
    }

    pub fn as_slice(&self) -> &[Proposal] {
        &self.proposals
    }

    pub fn len(&self) -> usize {
        self.proposals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.proposals.is_empty()
    }

    /// Sum of every proposal's vote count.
    pub fn total_votes(&self) -> u64 {
        self.proposals.iter().map(|p| p.vote_count).sum()
    }
}
