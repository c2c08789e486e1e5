//! Per-kind latest-wins bookkeeping.

use std::collections::HashMap;

use parking_lot::Mutex;

use super::intent::OperationKind;

/// Proof of which invocation of a kind a handler belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    kind: OperationKind,
    generation: u64,
}

impl Ticket {
    pub fn kind(&self) -> OperationKind {
        self.kind
    }

    /// Whether this ticket was issued after `other` for the same kind.
    pub fn supersedes(&self, other: Ticket) -> bool {
        self.kind == other.kind && self.generation > other.generation
    }
}

/// Generation counter per operation kind.
///
/// Starting an invocation supersedes every earlier one of the same kind.
/// Commits and new starts are serialized by the same lock, so a stale
/// commit can never land after a newer invocation has begun.
#[derive(Debug, Default)]
pub struct TakeLatest {
    generations: Mutex<HashMap<OperationKind, u64>>,
}

impl TakeLatest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&self, kind: OperationKind) -> Ticket {
        let mut generations = self.generations.lock();
        let generation = generations.entry(kind).or_insert(0);
        *generation += 1;
        Ticket {
            kind,
            generation: *generation,
        }
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.generations.lock().get(&ticket.kind) == Some(&ticket.generation)
    }

    /// Run `apply` only if `ticket` is still the newest of its kind.
    pub fn commit<R>(&self, ticket: Ticket, apply: impl FnOnce() -> R) -> Option<R> {
        let generations = self.generations.lock();
        if generations.get(&ticket.kind) != Some(&ticket.generation) {
            return None;
        }
        Some(apply())
    }
}
