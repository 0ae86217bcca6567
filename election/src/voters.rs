//! Voter whitelist and per-voter ballot state.

use ballot_types::Address;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::ElectionError;
use crate::proposals::ProposalId;

/// A voter record. The default record is what an address that was never
/// added looks like.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Voter {
    pub is_registered: bool,
    /// One-shot latch: set on the first accepted vote and never cleared.
    pub has_voted: bool,
    /// Only meaningful when `has_voted` is set.
    pub voted_proposal_id: ProposalId,
}

/// Mapping from address to [`Voter`] for the life of one election.
///
/// The registry only stores state; phase and ownership checks happen in
/// [`crate::Election`] before any method here is called.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoterRegistry {
    voters: HashMap<Address, Voter>,
}

impl VoterRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whitelist an address, creating its record if needed.
    ///
    /// An existing record keeps its ballot state.
    pub fn add(&mut self, address: Address) {
        self.voters.entry(address).or_default().is_registered = true;
    }

    /// Drop an address from the whitelist.
    ///
    /// A vote it already cast stays counted and `has_voted` stays set.
    pub fn remove(&mut self, address: &Address) {
        if let Some(voter) = self.voters.get_mut(address) {
            voter.is_registered = false;
        }
    }

    /// Current record for `address`, or the default record.
    pub fn get(&self, address: &Address) -> Voter {
        self.voters.get(address).copied().unwrap_or_default()
    }

    pub fn is_whitelisted(&self, address: &Address) -> bool {
        self.get(address).is_registered
    }

    /// Fail unless `address` is whitelisted.
    pub fn ensure_whitelisted(&self, address: &Address) -> Result<(), ElectionError> {
        if self.is_whitelisted(address) {
            Ok(())
        } else {
            Err(ElectionError::NotWhitelisted(address.clone()))
        }
    }

    /// Fail if `address` has already cast its vote.
    pub fn ensure_not_voted(&self, address: &Address) -> Result<(), ElectionError> {
        if self.get(address).has_voted {
            Err(ElectionError::AlreadyVoted(address.clone()))
        } else {
            Ok(())
        }
    }

    /// Latch the ballot of `address` onto `proposal_id`.
    pub(crate) fn record_vote(&mut self, address: &Address, proposal_id: ProposalId) {
        let voter = self.voters.entry(address.clone()).or_default();
        voter.has_voted = true;
        voter.voted_proposal_id = proposal_id;
    }

    pub fn registered_count(&self) -> usize {
        self.voters.values().filter(|v| v.is_registered).count()
    }

    pub fn voted_count(&self) -> usize {
        self.voters.values().filter(|v| v.has_voted).count()
    }

    /// Iterate every known record, including de-whitelisted ones.
    pub fn iter(&self) -> impl Iterator<Item = (&Address, &Voter)> {
        self.voters.iter()
    }
}
