//! Owner-only guard for administrative commands.

use ballot_types::Address;
use serde::{Deserialize, Serialize};

use crate::error::ElectionError;

/// Binds the single administrative identity of an election.
///
/// The owner is fixed at construction; there is no transfer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessControl {
    owner: Address,
}

impl AccessControl {
    pub fn new(owner: Address) -> Self {
        Self { owner }
    }

    pub fn owner(&self) -> &Address {
        &self.owner
    }

    pub fn is_owner(&self, caller: &Address) -> bool {
        &self.owner == caller
    }

    /// Reject every caller except the owner.
    pub fn ensure_owner(&self, caller: &Address) -> Result<(), ElectionError> {
        if self.is_owner(caller) {
            Ok(())
        } else {
            Err(ElectionError::Unauthorized(caller.clone()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn owner_passes_guard() {
        let access = AccessControl::new(Address::new("owner"));
        assert!(access.ensure_owner(&Address::new("owner")).is_ok());
        assert_eq!(access.owner(), &Address::new("owner"));
    }

    #[test]
    fn anyone_else_is_unauthorized() {
        let access = AccessControl::new(Address::new("owner"));
        let mallory = Address::new("mallory");
        assert_eq!(
            access.ensure_owner(&mallory),
            Err(ElectionError::Unauthorized(mallory.clone()))
        );
        assert!(!access.is_owner(&mallory));
    }
}
