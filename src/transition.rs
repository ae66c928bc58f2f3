/*
    Copyright © 2023, ParallelChain Lab
    Licensed under the Apache License, Version 2.0: http://www.apache.org/licenses/LICENSE-2.0
*/

//! transition defines the formulation of state transition.

use std::sync::{Mutex, PoisonError};

use crate::{
    execution::{execute, state::ExecutionState},
    state::WorldState,
    token::TokenLedger,
    types::{CallParams, Command, CommandReceipt},
    TransitionError,
};

/// Runtime defines the state transition function for sale and distribution
/// commands.
#[derive(Clone, Copy, Debug, Default)]
pub struct Runtime;

impl Runtime {
    /// Instantiate Runtime.
    pub fn new() -> Self {
        Self
    }

    /// transition performs state transition of world state (WS) from a command
    /// and call parameters as inputs. The command applies all-or-nothing: on
    /// error the returned state equals the input state.
    pub fn transition<T>(
        &self,
        ws: WorldState<T>,
        command: Command,
        env: CallParams,
    ) -> TransitionResult<T>
    where
        T: TokenLedger,
    {
        let state = ExecutionState::new(ws, env);
        execute::execute_command(state, command)
    }
}

/// Result of state transition. It is the return type of
/// [Runtime::transition].
#[derive(Clone)]
pub struct TransitionResult<T>
where
    T: TokenLedger,
{
    /// New world state (ws') after state transition
    pub new_state: WorldState<T>,
    /// Command receipt, success or failure
    pub receipt: CommandReceipt,
    /// Transition error. None if no error.
    pub error: Option<TransitionError>,
}

/// SaleEngine owns a world state behind a mutex and applies commands one at a
/// time. It is the consistency boundary for callers sharing one deployment:
/// every mutating operation executes under the lock, and its reads and writes
/// appear atomic to any other caller.
pub struct SaleEngine<T>
where
    T: TokenLedger,
{
    runtime: Runtime,
    ws: Mutex<WorldState<T>>,
}

impl<T> SaleEngine<T>
where
    T: TokenLedger,
{
    pub fn new(ws: WorldState<T>) -> Self {
        Self {
            runtime: Runtime::new(),
            ws: Mutex::new(ws),
        }
    }

    /// Apply one command under the engine lock.
    pub fn execute(
        &self,
        command: Command,
        env: CallParams,
    ) -> (CommandReceipt, Option<TransitionError>) {
        // A poisoned lock still holds a consistent state: transition either
        // committed a full command or left the previous state in place.
        let mut guard = self.ws.lock().unwrap_or_else(PoisonError::into_inner);
        let result = self.runtime.transition(guard.clone(), command, env);
        *guard = result.new_state;
        (result.receipt, result.error)
    }

    /// Clone of the current world state, for queries.
    pub fn snapshot(&self) -> WorldState<T> {
        self.ws
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Consume the engine, keeping the final world state.
    pub fn into_inner(self) -> WorldState<T> {
        self.ws.into_inner().unwrap_or_else(PoisonError::into_inner)
    }
}
