//! Single-election voting ledger.
//!
//! One owner drives an election through six phases:
//! RegisteringVoters → ProposalsRegistrationStarted → ProposalsRegistrationEnded
//! → VotingSessionStarted → VotingSessionEnded → VotesTallied.
//!
//! The owner whitelists voters, whitelisted voters submit proposals and then
//! cast exactly one vote each, and closing the vote computes every proposal
//! tied for the highest count. Each committed command emits an
//! [`ElectionEvent`], in commit order.
//!
//! Key principle: every precondition is checked before any write, so a
//! failed command leaves no trace.

pub mod access;
pub mod election;
pub mod error;
pub mod events;
pub mod proposals;
pub mod snapshot;
pub mod tally;
pub mod voters;
pub mod workflow;

pub use access::AccessControl;
pub use election::Election;
pub use error::{ElectionError, ErrorKind};
pub use events::{ElectionEvent, EventBus, EventLog};
pub use proposals::{Proposal, ProposalId, ProposalRegistry};
pub use snapshot::ElectionSnapshot;
pub use tally::{TallyResult, WinningProposal};
pub use voters::{Voter, VoterRegistry};
pub use workflow::WorkflowStateMachine;

pub use ballot_types::{Address, Transition, WorkflowStatus};
