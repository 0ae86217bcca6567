//! Builds an election from config and replays a script against it.

use ballot_election::Election;
use serde::Serialize;
use tracing::{info, warn};

use crate::config::ElectionConfig;
use crate::error::DaemonError;
use crate::script::Script;

/// What happened to one script step.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct StepOutcome {
    pub index: usize,
    pub caller: String,
    pub action: &'static str,
    pub accepted: bool,
    /// Summary on success, error message on rejection.
    pub detail: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<&'static str>,
}

/// Create the election and whitelist the configured voters as the owner.
pub fn bootstrap(config: &ElectionConfig) -> Result<Election, DaemonError> {
    let mut election = Election::new(config.owner.clone());
    for voter in &config.voters {
        election.add_voter(&config.owner, voter.clone())?;
    }
    info!(voters = config.voters.len(), "election bootstrapped");
    Ok(election)
}

/// Replay every step in order.
///
/// A rejected step is recorded and skipped, or in `strict` mode aborts the
/// run.
pub fn run_script(
    election: &mut Election,
    script: &Script,
    strict: bool,
) -> Result<Vec<StepOutcome>, DaemonError> {
    let mut outcomes = Vec::with_capacity(script.steps.len());
    for (index, step) in script.steps.iter().enumerate() {
        let action = step.action.name();
        let outcome = match step.apply(election) {
            Ok(detail) => StepOutcome {
                index,
                caller: step.caller.to_string(),
                action,
                accepted: true,
                detail,
                error_kind: None,
            },
            Err(source) if strict => {
                return Err(DaemonError::StepRejected {
                    index,
                    action,
                    source,
                });
            }
            Err(e) => {
                warn!(index, action, caller = %step.caller, "step rejected: {e}");
                StepOutcome {
                    index,
                    caller: step.caller.to_string(),
                    action,
                    accepted: false,
                    detail: e.to_string(),
                    error_kind: Some(e.kind().as_str()),
                }
            }
        };
        outcomes.push(outcome);
    }
    Ok(outcomes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ballot_election::WorkflowStatus;
    use ballot_types::Address;

    fn config() -> ElectionConfig {
        let mut config = ElectionConfig::new(Address::new("0xowner"));
        config.voters = vec![Address::new("0xa"), Address::new("0xb")];
        config
    }

    const FULL_RUN: &str = r#"
        [[step]]
        caller = "0xowner"
        action = "start_proposals_registration"

        [[step]]
        caller = "0xa"
        action = "add_proposal"
        description = "X"

        [[step]]
        caller = "0xa"
        action = "add_proposal"
        description = "Y"

        [[step]]
        caller = "0xowner"
        action = "end_proposals_registration"

        [[step]]
        caller = "0xowner"
        action = "start_voting_session"

        [[step]]
        caller = "0xa"
        action = "vote"
        proposal_id = 0

        [[step]]
        caller = "0xb"
        action = "vote"
        proposal_id = 0

        [[step]]
        caller = "0xb"
        action = "vote"
        proposal_id = 1

        [[step]]
        caller = "0xowner"
        action = "end_voting_session"

        [[step]]
        caller = "0xowner"
        action = "close_voting"
    "#;

    #[test]
    fn bootstrap_whitelists_configured_voters() {
        let election = bootstrap(&config()).unwrap();
        assert!(election.get_voter(&Address::new("0xa")).is_registered);
        assert!(election.get_voter(&Address::new("0xb")).is_registered);
        assert_eq!(election.events().len(), 2);
    }

    #[test]
    fn lenient_run_records_rejections_and_continues() {
        let mut election = bootstrap(&config()).unwrap();
        let script = Script::from_toml_str(FULL_RUN).unwrap();
        let outcomes = run_script(&mut election, &script, false).unwrap();

        assert_eq!(outcomes.len(), 10);
        let rejected: Vec<_> = outcomes.iter().filter(|o| !o.accepted).collect();
        assert_eq!(rejected.len(), 1);
        assert_eq!(rejected[0].index, 7);
        assert_eq!(rejected[0].error_kind, Some("already_voted"));

        assert_eq!(election.status(), WorkflowStatus::VotesTallied);
        assert_eq!(election.winners().unwrap().descriptions(), vec!["X"]);
    }

    #[test]
    fn strict_run_stops_at_first_rejection() {
        let mut election = bootstrap(&config()).unwrap();
        let script = Script::from_toml_str(FULL_RUN).unwrap();
        let err = run_script(&mut election, &script, true).unwrap_err();

        assert!(matches!(err, DaemonError::StepRejected { index: 7, action: "vote", .. }));
        assert_eq!(election.status(), WorkflowStatus::VotingSessionStarted);
    }
}
