//! Winner computation.
//!
//! A tie is a tie: every proposal holding the maximum count wins, including
//! the all-zero case where nobody voted.

use serde::{Deserialize, Serialize};

use crate::proposals::{Proposal, ProposalId};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WinningProposal {
    pub proposal_id: ProposalId,
    pub proposal: Proposal,
}

/// The set of proposals tied for the highest vote count, in id order.
///
/// Empty only when no proposal was ever registered.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TallyResult {
    pub winners: Vec<WinningProposal>,
    pub winning_vote_count: u64,
}

impl TallyResult {
    pub fn is_empty(&self) -> bool {
        self.winners.is_empty()
    }

    pub fn is_tie(&self) -> bool {
        self.winners.len() > 1
    }

    pub fn descriptions(&self) -> Vec<&str> {
        self.winners
            .iter()
            .map(|w| w.proposal.description.as_str())
            .collect()
    }

    pub fn ids(&self) -> Vec<ProposalId> {
        self.winners.iter().map(|w| w.proposal_id).collect()
    }
}

pub struct TallyEngine;

impl TallyEngine {
    /// Single pass over `proposals`: a higher count resets the winner set,
    /// an equal count joins it.
    pub(crate) fn compute_winners(proposals: &[Proposal]) -> TallyResult {
        let mut result = TallyResult::default();
        for (proposal_id, proposal) in proposals.iter().enumerate() {
            if result.winners.is_empty() || proposal.vote_count > result.winning_vote_count {
                result.winners.clear();
                result.winning_vote_count = proposal.vote_count;
            } else if proposal.vote_count < result.winning_vote_count {
                continue;
            }
            result.winners.push(WinningProposal {
                proposal_id,
                proposal: proposal.clone(),
            });
        }
        result
    }
}
