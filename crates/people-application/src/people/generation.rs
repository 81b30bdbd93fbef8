//! Per-target request generations used to drop late responses.

use std::collections::HashMap;

/// What a request is about. Requests for the same target supersede each other.
///
/// Updates and deletes of one record are separate targets: an edit started
/// while a delete is in flight must not discard the delete's outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum Target {
    List,
    Update(u64),
    Delete(u64),
}

/// Issued when a request starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Ticket {
    target: Target,
    generation: u64,
}

/// Latest generation per in-flight target.
#[derive(Debug, Default)]
pub(crate) struct Generations {
    counter: u64,
    latest: HashMap<Target, u64>,
}

impl Generations {
    /// Starts a request for `target`, superseding any earlier one.
    pub(crate) fn begin(&mut self, target: Target) -> Ticket {
        self.counter += 1;
        self.latest.insert(target, self.counter);
        Ticket {
            target,
            generation: self.counter,
        }
    }

    pub(crate) fn is_current(&self, ticket: Ticket) -> bool {
        self.latest.get(&ticket.target) == Some(&ticket.generation)
    }

    /// Ends a request. Returns `false` if a newer request for the same target
    /// has started since, in which case its result must be discarded.
    pub(crate) fn finish(&mut self, ticket: Ticket) -> bool {
        if self.is_current(ticket) {
            self.latest.remove(&ticket.target);
            true
        } else {
            false
        }
    }
}
