//! JSON view of an election for the command line.

use ballot_election::{Election, ElectionEvent, ProposalId, Transition, WorkflowStatus};
use serde::Serialize;

use crate::runner::StepOutcome;

#[derive(Debug, Serialize)]
pub struct Report {
    pub owner: String,
    pub status: WorkflowStatus,
    pub status_code: u8,
    pub status_label: &'static str,
    /// The owner's next available action, if the election is not finished.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_action: Option<&'static str>,
    pub registered_voters: usize,
    pub votes_cast: usize,
    pub proposals: Vec<ProposalView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub winners: Option<Vec<ProposalView>>,
    pub events: Vec<ElectionEvent>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub steps: Vec<StepOutcome>,
}

#[derive(Debug, Serialize)]
pub struct ProposalView {
    pub id: ProposalId,
    pub description: String,
    pub vote_count: u64,
}

impl Report {
    pub fn new(election: &Election, steps: Vec<StepOutcome>) -> Self {
        let status = election.status();
        Self {
            owner: election.owner().to_string(),
            status,
            status_code: status.code(),
            status_label: status.label(),
            next_action: Transition::for_status(status).map(|t| t.action_label()),
            registered_voters: election.registered_voter_count(),
            votes_cast: election.voted_count(),
            proposals: election
                .view_proposals()
                .iter()
                .enumerate()
                .map(|(id, p)| ProposalView {
                    id,
                    description: p.description.clone(),
                    vote_count: p.vote_count,
                })
                .collect(),
            winners: election.winners().map(|result| {
                result
                    .winners
                    .iter()
                    .map(|w| ProposalView {
                        id: w.proposal_id,
                        description: w.proposal.description.clone(),
                        vote_count: w.proposal.vote_count,
                    })
                    .collect()
            }),
            events: election.events().to_vec(),
            steps,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// One line per phase: code, name, label and the transition out of it.
pub fn phase_table() -> String {
    WorkflowStatus::ALL
        .iter()
        .map(|status| {
            let next = Transition::for_status(*status)
                .map(|t| format!(" -> {}", t.action_label()))
                .unwrap_or_default();
            format!("{} {:<30} {}{}", status.code(), status.as_str(), status.label(), next)
        })
        .collect::<Vec<_>>()
        .join("\n")
}
