//! Defines a Transition Context for a single state transition,
//! which can be passed around to larger structs representing a specific execution environment,
//! e.g. [ExecutionState](crate::execution::state::ExecutionState).
//! This context serves as an intermediary for access to the world state being
//! mutated, and collects the events the command emits along the way.

use crate::{
    execution::cache::WorldStateCache,
    state::WorldState,
    token::TokenLedger,
    types::Event,
};

/// TransitionContext encapsulates access to the world state under mutation,
/// and tracks the observable side effects of the command in flight.
#[derive(Clone)]
pub(crate) struct TransitionContext<T>
where
    T: TokenLedger,
{
    /// World state cache for the command, with checkpoint/revert semantics
    pub ws_cache: WorldStateCache<T>,

    /// Events emitted so far by the command in flight
    events: Vec<Event>,
}

impl<T> TransitionContext<T>
where
    T: TokenLedger,
{
    /// initialize a new Transition Context, at the beginning of a new command
    pub fn new(ws: WorldState<T>) -> Self {
        Self {
            ws_cache: WorldStateCache::new(ws),
            events: Vec::new(),
        }
    }

    /// Record an observable side effect of the command in flight.
    pub fn emit(&mut self, event: Event) {
        self.events.push(event);
    }

    /// Discard the changes to world state, including any events emitted by
    /// the partially executed command.
    pub fn revert_changes(&mut self) {
        self.ws_cache.revert();
        self.events.clear();
    }

    /// Take the events accumulated so far, clearing the buffer.
    pub fn take_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }

    /// Consumes self to output the World State Cache. It can be used when the
    /// transition context is no longer needed (e.g. at the end of transition).
    pub fn into_ws_cache(self) -> WorldStateCache<T> {
        self.ws_cache
    }
}
