//! The election instance: one owner, one whitelist, one round of voting.

use ballot_types::{Address, Transition, WorkflowStatus};
use tracing::{debug, info};

use crate::access::AccessControl;
use crate::error::ElectionError;
use crate::events::{ElectionEvent, EventBus, EventLog};
use crate::proposals::{Proposal, ProposalId, ProposalRegistry};
use crate::tally::{TallyEngine, TallyResult};
use crate::voters::{Voter, VoterRegistry};
use crate::workflow::WorkflowStateMachine;

/// A single election and all of its state.
///
/// Every command takes the caller's identity, checks all of its
/// preconditions, and only then writes state and emits its event. Commands
/// are processed one at a time through `&mut self`; queries take `&self`.
#[derive(Debug)]
pub struct Election {
    pub(crate) access: AccessControl,
    pub(crate) workflow: WorkflowStateMachine,
    pub(crate) voters: VoterRegistry,
    pub(crate) proposals: ProposalRegistry,
    pub(crate) result: Option<TallyResult>,
    pub(crate) log: EventLog,
    pub(crate) bus: EventBus,
}

impl Election {
    /// Create an election in `RegisteringVoters`, administered by `owner`.
    pub fn new(owner: Address) -> Self {
        info!(owner = %owner, "election created");
        Self {
            access: AccessControl::new(owner),
            workflow: WorkflowStateMachine::new(),
            voters: VoterRegistry::new(),
            proposals: ProposalRegistry::new(),
            result: None,
            log: EventLog::new(),
            bus: EventBus::new(),
        }
    }

    // ── Observers ──────────────────────────────────────────────────────

    /// Register a listener invoked for every subsequent event.
    pub fn subscribe(&mut self, listener: Box<dyn Fn(&ElectionEvent) + Send + Sync>) {
        self.bus.subscribe(listener);
    }

    fn commit(&mut self, event: ElectionEvent) {
        self.log.append(event.clone());
        self.bus.emit(&event);
    }

    // ── Whitelist ──────────────────────────────────────────────────────

    /// Whitelist `address`. Owner only, during `RegisteringVoters`.
    pub fn add_voter(&mut self, caller: &Address, address: Address) -> Result<(), ElectionError> {
        self.access
            .ensure_owner(caller)
            .and_then(|_| self.workflow.ensure(WorkflowStatus::RegisteringVoters))
            .inspect_err(|e| debug!(%caller, kind = %e.kind(), "add_voter rejected: {e}"))?;

        self.voters.add(address.clone());
        info!(voter = %address, "voter registered");
        self.commit(ElectionEvent::VoterRegistered { address });
        Ok(())
    }

    /// Remove `address` from the whitelist. Owner only, during
    /// `RegisteringVoters`. Emits no event.
    pub fn remove_voter(
        &mut self,
        caller: &Address,
        address: &Address,
    ) -> Result<(), ElectionError> {
        self.access
            .ensure_owner(caller)
            .and_then(|_| self.workflow.ensure(WorkflowStatus::RegisteringVoters))
            .inspect_err(|e| debug!(%caller, kind = %e.kind(), "remove_voter rejected: {e}"))?;

        self.voters.remove(address);
        info!(voter = %address, "voter removed");
        Ok(())
    }

    // ── Phase transitions ──────────────────────────────────────────────

    fn transition(
        &mut self,
        caller: &Address,
        transition: Transition,
    ) -> Result<WorkflowStatus, ElectionError> {
        self.authorize_transition(caller, transition)?;
        self.commit_transition(transition)
    }

    fn authorize_transition(
        &self,
        caller: &Address,
        transition: Transition,
    ) -> Result<(), ElectionError> {
        self.access
            .ensure_owner(caller)
            .and_then(|_| self.workflow.check(transition))
            .inspect_err(|e| {
                debug!(%caller, ?transition, kind = %e.kind(), "transition rejected: {e}")
            })
    }

    fn commit_transition(
        &mut self,
        transition: Transition,
    ) -> Result<WorkflowStatus, ElectionError> {
        let (previous_status, new_status) = self.workflow.advance(transition)?;
        info!(from = %previous_status, to = %new_status, "workflow status changed");
        self.commit(ElectionEvent::WorkflowStatusChange {
            previous_status,
            new_status,
        });
        Ok(new_status)
    }

    pub fn start_proposals_registration(
        &mut self,
        caller: &Address,
    ) -> Result<WorkflowStatus, ElectionError> {
        self.transition(caller, Transition::StartProposalsRegistration)
    }

    pub fn end_proposals_registration(
        &mut self,
        caller: &Address,
    ) -> Result<WorkflowStatus, ElectionError> {
        self.transition(caller, Transition::EndProposalsRegistration)
    }

    pub fn start_voting_session(
        &mut self,
        caller: &Address,
    ) -> Result<WorkflowStatus, ElectionError> {
        self.transition(caller, Transition::StartVotingSession)
    }

    pub fn end_voting_session(
        &mut self,
        caller: &Address,
    ) -> Result<WorkflowStatus, ElectionError> {
        self.transition(caller, Transition::EndVotingSession)
    }

    /// Move to `VotesTallied` and compute the winners, which are fixed from
    /// then on.
    pub fn close_voting(&mut self, caller: &Address) -> Result<&TallyResult, ElectionError> {
        self.authorize_transition(caller, Transition::CloseVoting)?;

        let result = TallyEngine::compute_winners(self.proposals.as_slice());
        info!(
            winners = ?result.ids(),
            vote_count = result.winning_vote_count,
            "votes tallied"
        );
        self.commit_transition(Transition::CloseVoting)?;
        Ok(&*self.result.insert(result))
    }

    /// Run the transition named by `transition`.
    pub fn apply_transition(
        &mut self,
        caller: &Address,
        transition: Transition,
    ) -> Result<WorkflowStatus, ElectionError> {
        match transition {
            Transition::CloseVoting => {
                self.close_voting(caller)?;
                Ok(self.status())
            }
            other => self.transition(caller, other),
        }
    }

    // ── Proposals and votes ────────────────────────────────────────────

    /// Submit a proposal. Whitelisted callers only, during
    /// `ProposalsRegistrationStarted`. An empty description is always
    /// rejected first.
    pub fn add_proposal(
        &mut self,
        caller: &Address,
        description: impl Into<String>,
    ) -> Result<ProposalId, ElectionError> {
        let description = description.into();
        ProposalRegistry::validate_description(&description)
            .and_then(|_| self.voters.ensure_whitelisted(caller))
            .and_then(|_| self.workflow.ensure(WorkflowStatus::ProposalsRegistrationStarted))
            .inspect_err(|e| debug!(%caller, kind = %e.kind(), "add_proposal rejected: {e}"))?;

        let proposal_id = self.proposals.push(description);
        info!(%caller, proposal_id, "proposal registered");
        self.commit(ElectionEvent::ProposalRegistered { proposal_id });
        Ok(proposal_id)
    }

    /// Cast the caller's single vote. Whitelisted callers only, during
    /// `VotingSessionStarted`.
    pub fn vote(&mut self, caller: &Address, proposal_id: ProposalId) -> Result<(), ElectionError> {
        self.voters
            .ensure_whitelisted(caller)
            .and_then(|_| self.workflow.ensure(WorkflowStatus::VotingSessionStarted))
            .and_then(|_| self.voters.ensure_not_voted(caller))
            .and_then(|_| self.proposals.ensure_exists(proposal_id))
            .inspect_err(|e| debug!(%caller, proposal_id, kind = %e.kind(), "vote rejected: {e}"))?;

        let vote_count = self.proposals.increment(proposal_id)?;
        self.voters.record_vote(caller, proposal_id);
        info!(voter = %caller, proposal_id, vote_count, "vote cast");
        self.commit(ElectionEvent::Voted {
            voter: caller.clone(),
            proposal_id,
        });
        Ok(())
    }

    // ── Queries ────────────────────────────────────────────────────────

    pub fn owner(&self) -> &Address {
        self.access.owner()
    }

    pub fn status(&self) -> WorkflowStatus {
        self.workflow.status()
    }

    pub fn get_voter(&self, address: &Address) -> Voter {
        self.voters.get(address)
    }

    pub fn view_proposals(&self) -> &[Proposal] {
        self.proposals.as_slice()
    }

    pub fn proposal(&self, proposal_id: ProposalId) -> Option<&Proposal> {
        self.proposals.get(proposal_id)
    }

    /// The tally result, available once the election is `VotesTallied`.
    pub fn winners(&self) -> Option<&TallyResult> {
        if self.status() == WorkflowStatus::VotesTallied {
            self.result.as_ref()
        } else {
            None
        }
    }

    /// Every event so far, in commit order.
    pub fn events(&self) -> &[ElectionEvent] {
        self.log.as_slice()
    }

    pub fn event_log(&self) -> &EventLog {
        &self.log
    }

    pub fn voters(&self) -> &VoterRegistry {
        &self.voters
    }

    pub fn registered_voter_count(&self) -> usize {
        self.voters.registered_count()
    }

    pub fn voted_count(&self) -> usize {
        self.voters.voted_count()
    }

    /// Verify the ledger-wide invariants:
    /// every latched ballot points at an existing proposal, the vote counts
    /// add up to the number of latched ballots, and a tally result exists
    /// exactly when the status is `VotesTallied` and matches the counts.
    pub fn check_invariants(&self) -> Result<(), ElectionError> {
        for (address, voter) in self.voters.iter() {
            if voter.has_voted && self.proposals.get(voter.voted_proposal_id).is_none() {
                return Err(ElectionError::Snapshot(format!(
                    "voter {address} voted for missing proposal {}",
                    voter.voted_proposal_id
                )));
            }
        }

        let total = self.proposals.total_votes();
        let voted = self.voters.voted_count() as u64;
        if total != voted {
            return Err(ElectionError::Snapshot(format!(
                "vote counts sum to {total} but {voted} voters have voted"
            )));
        }

        let tallied = self.status() == WorkflowStatus::VotesTallied;
        match (&self.result, tallied) {
            (None, false) => Ok(()),
            (Some(result), true) => {
                if *result == TallyEngine::compute_winners(self.proposals.as_slice()) {
                    Ok(())
                } else {
                    Err(ElectionError::Snapshot(
                        "stored tally does not match vote counts".into(),
                    ))
                }
            }
            (Some(_), false) => Err(ElectionError::Snapshot(format!(
                "tally result present in status {}",
                self.status()
            ))),
            (None, true) => Err(ElectionError::Snapshot(
                "votes tallied but no tally result stored".into(),
            )),
        }
    }
}
