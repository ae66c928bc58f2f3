/*
    Copyright © 2023, ParallelChain Lab
    Licensed under the Apache License, Version 2.0: http://www.apache.org/licenses/LICENSE-2.0
*/

//! Defines a struct as Execution State which is being updated during execution.
//!
//! This state is not the application state held in the world state. It
//! encapsulates the changing information during a command's execution
//! life-cycle: the call parameters it was submitted under and the transition
//! context carrying the working world state and emitted events.

use crate::{
    context::TransitionContext,
    state::WorldState,
    token::TokenLedger,
    types::CallParams,
};

/// ExecutionState is the collection of information required to transit the
/// world state through one command. Methods on the command executors mutate
/// the working copy held inside [TransitionContext]; nothing touches the
/// committed state until the transition finalizes.
pub(crate) struct ExecutionState<T>
where
    T: TokenLedger,
{
    /// Call parameters as a transition input
    pub env: CallParams,

    /// Transition Context which also contains the world state under mutation
    pub ctx: TransitionContext<T>,
}

impl<T> ExecutionState<T>
where
    T: TokenLedger,
{
    pub fn new(ws: WorldState<T>, env: CallParams) -> Self {
        Self {
            env,
            ctx: TransitionContext::new(ws),
        }
    }

    /// finalize the world state
    pub fn finalize(self) -> WorldState<T> {
        self.ctx.into_ws_cache().commit()
    }
}
