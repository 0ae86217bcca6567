//! Notifications emitted by committed election commands.

use ballot_types::{Address, WorkflowStatus};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::proposals::ProposalId;

/// Election-level events that observers can subscribe to via the [`EventBus`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ElectionEvent {
    /// An address was added to the whitelist.
    VoterRegistered { address: Address },
    /// The owner advanced the election by one phase.
    WorkflowStatusChange {
        previous_status: WorkflowStatus,
        new_status: WorkflowStatus,
    },
    /// A whitelisted voter submitted a proposal.
    ProposalRegistered { proposal_id: ProposalId },
    /// A whitelisted voter cast their vote.
    Voted {
        voter: Address,
        proposal_id: ProposalId,
    },
}

impl ElectionEvent {
    pub fn name(&self) -> &'static str {
        match self {
            Self::VoterRegistered { .. } => "VoterRegistered",
            Self::WorkflowStatusChange { .. } => "WorkflowStatusChange",
            Self::ProposalRegistered { .. } => "ProposalRegistered",
            Self::Voted { .. } => "Voted",
        }
    }
}

type Listener = Box<dyn Fn(&ElectionEvent) + Send + Sync>;

/// Synchronous fan-out event bus.
///
/// Listeners run inline on the committing call, after the state write.
pub struct EventBus {
    listeners: Vec<Listener>,
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            listeners: Vec::new(),
        }
    }

    pub fn subscribe(&mut self, listener: Listener) {
        self.listeners.push(listener);
    }

    pub fn emit(&self, event: &ElectionEvent) {
        for listener in &self.listeners {
            listener(event);
        }
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

/// Append-only record of every event, in commit order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventLog {
    events: Vec<ElectionEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn append(&mut self, event: ElectionEvent) {
        self.events.push(event);
    }

    pub fn as_slice(&self) -> &[ElectionEvent] {
        &self.events
    }

    /// Events recorded after the first `cursor` ones, for pollers.
    pub fn since(&self, cursor: usize) -> &[ElectionEvent] {
        self.events.get(cursor..).unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    };

    fn voter() -> Address {
        Address::new("0xvoter")
    }

    #[test]
    fn emit_calls_all_listeners() {
        let counter = Arc::new(AtomicUsize::new(0));
        let mut bus = EventBus::new();

        let c1 = Arc::clone(&counter);
        bus.subscribe(Box::new(move |_| {
            c1.fetch_add(1, Ordering::SeqCst);
        }));
        let c2 = Arc::clone(&counter);
        bus.subscribe(Box::new(move |_| {
            c2.fetch_add(10, Ordering::SeqCst);
        }));

        bus.emit(&ElectionEvent::VoterRegistered { address: voter() });
        assert_eq!(counter.load(Ordering::SeqCst), 11);
        assert_eq!(bus.listener_count(), 2);
    }

    #[test]
    fn emit_with_no_listeners_is_noop() {
        let bus = EventBus::default();
        bus.emit(&ElectionEvent::ProposalRegistered { proposal_id: 0 });
        assert_eq!(bus.listener_count(), 0);
    }

    #[test]
    fn listener_sees_variant_fields() {
        let seen = Arc::new(AtomicUsize::new(usize::MAX));
        let mut bus = EventBus::new();
        let s = Arc::clone(&seen);
        bus.subscribe(Box::new(move |event| {
            if let ElectionEvent::Voted { proposal_id, .. } = event {
                s.store(*proposal_id, Ordering::SeqCst);
            }
        }));

        bus.emit(&ElectionEvent::Voted {
            voter: voter(),
            proposal_id: 4,
        });
        assert_eq!(seen.load(Ordering::SeqCst), 4);
    }

    #[test]
    fn log_since_returns_the_tail() {
        let mut log = EventLog::new();
        log.append(ElectionEvent::VoterRegistered { address: voter() });
        log.append(ElectionEvent::ProposalRegistered { proposal_id: 0 });

        assert_eq!(log.len(), 2);
        assert_eq!(log.since(1)[0].name(), "ProposalRegistered");
        assert!(log.since(2).is_empty());
        assert!(log.since(10).is_empty());
    }
}
