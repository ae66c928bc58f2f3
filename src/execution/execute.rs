/*
    Copyright © 2023, ParallelChain Lab
    Licensed under the Apache License, Version 2.0: http://www.apache.org/licenses/LICENSE-2.0
*/

//! Backbone logic of command execution: dispatch a command to its executor,
//! then finalize the receipt from the execution outcome.
//!
//! Executors signal failure by reverting the working state and returning the
//! error (see [abort](super::abort)). The receipt of a failed command carries
//! no events.

use crate::{
    commands::{admin, distribution, purchase},
    execution::state::ExecutionState,
    token::TokenLedger,
    transition::TransitionResult,
    types::{create_executed_receipt, create_failed_receipt, Command, CommandKind},
};

/// Execute a single command to completion, producing the next world state and
/// the command receipt. All-or-nothing: on failure the returned state is the
/// input state.
pub(crate) fn execute_command<T>(
    mut state: ExecutionState<T>,
    command: Command,
) -> TransitionResult<T>
where
    T: TokenLedger,
{
    let kind = CommandKind::from(&command);

    let ret = match command {
        Command::Contribute(input) => purchase::contribute(&mut state, input),
        Command::BuyTokens(input) => purchase::buy_tokens(&mut state, input),
        Command::ExtendTime(input) => admin::extend_time(&mut state, input),
        Command::AddOperator(input) => admin::add_operator(&mut state, input),
        Command::RemoveOperator(input) => admin::remove_operator(&mut state, input),
        Command::MultiSend(input) => distribution::multi_send(&mut state, input),
        Command::RecoverTokens(input) => admin::recover_tokens(&mut state, input),
    };

    match ret {
        Ok(()) => {
            let events = state.ctx.take_events();
            TransitionResult {
                new_state: state.finalize(),
                receipt: create_executed_receipt(kind, events),
                error: None,
            }
        }
        Err(error) => {
            // Executors revert before returning an error; reverting an
            // already-reverted context is a no-op.
            state.ctx.revert_changes();
            TransitionResult {
                new_state: state.finalize(),
                receipt: create_failed_receipt(kind),
                error: Some(error),
            }
        }
    }
}
