/*
    Copyright © 2023, ParallelChain Lab
    Licensed under the Apache License, Version 2.0: http://www.apache.org/licenses/LICENSE-2.0
*/

//! Defines a world state cache with checkpoint semantics. A command executes
//! against the working copy; on failure the working copy is thrown away and
//! the checkpoint restored, so a rejected command leaves state identical to
//! its pre-call value.

use crate::{state::WorldState, token::TokenLedger};

#[derive(Clone)]
pub(crate) struct WorldStateCache<T>
where
    T: TokenLedger,
{
    /// State as of the start of the command
    checkpoint: WorldState<T>,
    /// Working copy mutated during command execution
    pub ws: WorldState<T>,
}

impl<T> WorldStateCache<T>
where
    T: TokenLedger,
{
    pub fn new(ws: WorldState<T>) -> Self {
        Self {
            checkpoint: ws.clone(),
            ws,
        }
    }

    /// Discard every change made since the checkpoint.
    pub fn revert(&mut self) {
        self.ws = self.checkpoint.clone();
    }

    /// Consume the cache, keeping the working copy.
    pub fn commit(self) -> WorldState<T> {
        self.ws
    }
}
