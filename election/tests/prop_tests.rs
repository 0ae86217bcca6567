use proptest::prelude::*;

use ballot_election::{Address, Election, ErrorKind, Transition, WorkflowStatus};

fn owner() -> Address {
    Address::new("0xowner")
}

fn voter(i: usize) -> Address {
    Address::new(format!("0xv{i}"))
}

/// A caller-attributed command. Voter indices pick callers; `Advance(None)`
/// is the owner and `Advance(Some(_))` an impostor.
#[derive(Clone, Debug)]
enum Op {
    AddVoter(usize),
    RemoveVoter(usize),
    Advance(Option<usize>),
    Propose(usize, String),
    Vote(usize, usize),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0..6usize).prop_map(Op::AddVoter),
        (0..6usize).prop_map(Op::RemoveVoter),
        prop::option::weighted(0.2, 0..6usize).prop_map(Op::Advance),
        (0..6usize, "[a-z]{0,4}").prop_map(|(c, d)| Op::Propose(c, d)),
        (0..6usize, 0..5usize).prop_map(|(c, p)| Op::Vote(c, p)),
    ]
}

fn apply(election: &mut Election, op: &Op) {
    let _ = match op {
        Op::AddVoter(v) => election.add_voter(&owner(), voter(*v)),
        Op::RemoveVoter(v) => election.remove_voter(&owner(), &voter(*v)),
        Op::Advance(caller) => {
            let caller = caller.map(voter).unwrap_or_else(owner);
            match Transition::for_status(election.status()) {
                Some(t) => election.apply_transition(&caller, t).map(|_| ()),
                None => Ok(()),
            }
        }
        Op::Propose(v, d) => election.add_proposal(&voter(*v), d.clone()).map(|_| ()),
        Op::Vote(v, p) => election.vote(&voter(*v), *p),
    };
}

proptest! {
    /// After any command sequence, vote counts sum to the number of latched
    /// ballots and every ballot points at an existing proposal.
    #[test]
    fn vote_sum_matches_voted_voters(ops in prop::collection::vec(op(), 0..80)) {
        let mut election = Election::new(owner());
        for op in &ops {
            apply(&mut election, op);
            let total: u64 = election.view_proposals().iter().map(|p| p.vote_count).sum();
            prop_assert_eq!(total, election.voted_count() as u64);
            prop_assert!(election.check_invariants().is_ok());
        }
    }

    /// Status never decreases and moves at most one step per command.
    #[test]
    fn status_is_monotonic(ops in prop::collection::vec(op(), 0..80)) {
        let mut election = Election::new(owner());
        let mut previous = election.status();
        for op in &ops {
            apply(&mut election, op);
            let now = election.status();
            prop_assert!(now == previous || previous.next() == Some(now));
            previous = now;
        }
    }

    /// A non-owner advancing the phase is always unauthorized and changes
    /// nothing, whatever commands came before.
    #[test]
    fn impostor_advance_changes_nothing(
        ops in prop::collection::vec(op(), 0..60),
        impostor in 0..6usize,
    ) {
        let mut election = Election::new(owner());
        for op in &ops {
            apply(&mut election, op);
        }
        let before = election.snapshot();
        if let Some(t) = Transition::for_status(election.status()) {
            let err = election.apply_transition(&voter(impostor), t).unwrap_err();
            prop_assert_eq!(err.kind(), ErrorKind::Unauthorized);
        }
        prop_assert_eq!(election.snapshot(), before);
    }

    /// Winners are exactly the proposals holding the maximum count.
    #[test]
    fn winners_are_the_max_set(
        proposal_count in 0..5usize,
        ballots in prop::collection::vec(0..5usize, 0..6),
    ) {
        let mut election = Election::new(owner());
        for i in 0..ballots.len().max(1) {
            election.add_voter(&owner(), voter(i)).unwrap();
        }
        election.start_proposals_registration(&owner()).unwrap();
        for i in 0..proposal_count {
            election.add_proposal(&voter(0), format!("p{i}")).unwrap();
        }
        election.end_proposals_registration(&owner()).unwrap();
        election.start_voting_session(&owner()).unwrap();
        for (i, target) in ballots.iter().enumerate() {
            let _ = election.vote(&voter(i), *target);
        }
        election.end_voting_session(&owner()).unwrap();
        election.close_voting(&owner()).unwrap();
        prop_assert_eq!(election.status(), WorkflowStatus::VotesTallied);

        let counts: Vec<u64> = election.view_proposals().iter().map(|p| p.vote_count).collect();
        let max = counts.iter().copied().max();
        let expected: Vec<usize> = counts
            .iter()
            .enumerate()
            .filter(|(_, c)| Some(**c) == max)
            .map(|(i, _)| i)
            .collect();
        prop_assert_eq!(election.winners().unwrap().ids(), expected);
    }
}
