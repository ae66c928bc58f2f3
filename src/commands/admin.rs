/*
    Copyright © 2023, ParallelChain Lab
    Licensed under the Apache License, Version 2.0: http://www.apache.org/licenses/LICENSE-2.0
*/

//! Implements execution of the administrative commands: closing-time
//! extension, ledger operator management, and recovery of foreign tokens
//! mistakenly held by an aggregate.
//!
//! Every command here is gated on an owner role. Roles are explicit
//! capability checks against the signer; nothing is inherited.

use crate::{
    execution::abort::abort,
    execution::state::ExecutionState,
    state::DeliveryMethod,
    token::TokenLedger,
    types::{Address, Event, ExtendTimeInput, OperatorInput, RecoverTokensInput},
    TransitionError,
};

/// Move a sale's closing time forward. Sale owner only, and only while the
/// sale has not yet closed.
pub(crate) fn extend_time<T>(
    state: &mut ExecutionState<T>,
    input: ExtendTimeInput,
) -> Result<(), TransitionError>
where
    T: TokenLedger,
{
    let signer = state.env.signer;
    let now = state.env.timestamp;

    let extended = match state.ctx.ws_cache.ws.sales.get_mut(&input.sale) {
        Some(sale) if sale.owner != signer => Err(TransitionError::Unauthorized),
        Some(sale) => sale.schedule.extend(input.new_closing_time, now),
        None => Err(TransitionError::TargetNotFound),
    };
    match extended {
        Ok(prev_closing_time) => {
            state.ctx.emit(Event::ClosingTimeExtended {
                prev_closing_time,
                new_closing_time: input.new_closing_time,
            });
            Ok(())
        }
        Err(err) => abort!(state, err),
    }
}

/// Grant ledger operator rights. Ledger owner only.
pub(crate) fn add_operator<T>(
    state: &mut ExecutionState<T>,
    input: OperatorInput,
) -> Result<(), TransitionError>
where
    T: TokenLedger,
{
    let signer = state.env.signer;
    if let Err(err) = state
        .ctx
        .ws_cache
        .ws
        .ledger
        .add_operator(&signer, input.operator)
    {
        abort!(state, err);
    }
    state.ctx.emit(Event::OperatorAdded {
        operator: input.operator,
    });
    Ok(())
}

/// Revoke ledger operator rights. Ledger owner only.
pub(crate) fn remove_operator<T>(
    state: &mut ExecutionState<T>,
    input: OperatorInput,
) -> Result<(), TransitionError>
where
    T: TokenLedger,
{
    let signer = state.env.signer;
    if let Err(err) = state
        .ctx
        .ws_cache
        .ws
        .ledger
        .remove_operator(&signer, &input.operator)
    {
        abort!(state, err);
    }
    state.ctx.emit(Event::OperatorRemoved {
        operator: input.operator,
    });
    Ok(())
}

/// Reclaim foreign tokens held by an aggregate. The recipient is always the
/// aggregate's owner. Recovering the primary asset of a transfer-funded
/// aggregate is refused: that balance is the undelivered inventory.
pub(crate) fn recover_tokens<T>(
    state: &mut ExecutionState<T>,
    input: RecoverTokensInput,
) -> Result<(), TransitionError>
where
    T: TokenLedger,
{
    let signer = state.env.signer;

    // Resolve the holder aggregate: its owner, and its primary asset when the
    // aggregate delivers out of its own balance.
    let resolved: Result<(Address, Option<Address>), TransitionError> = {
        let ws = &state.ctx.ws_cache.ws;
        if let Some(sale) = ws.sale(&input.holder) {
            let primary = match sale.delivery {
                DeliveryMethod::Transfer => Some(sale.token),
                DeliveryMethod::Mint | DeliveryMethod::TransferFrom { .. } => None,
            };
            Ok((sale.owner, primary))
        } else if let Some(delivery) = ws.delivery(&input.holder) {
            let primary = match delivery.strategy {
                DeliveryMethod::Transfer => Some(delivery.token),
                DeliveryMethod::Mint | DeliveryMethod::TransferFrom { .. } => None,
            };
            Ok((delivery.owner, primary))
        } else if input.holder == ws.ledger_address {
            Ok((ws.ledger.owner(), None))
        } else {
            Err(TransitionError::TargetNotFound)
        }
    };
    let (owner, primary) = match resolved {
        Ok(resolved) => resolved,
        Err(err) => abort!(state, err),
    };
    if signer != owner {
        abort!(state, TransitionError::Unauthorized);
    }
    if primary == Some(input.token) {
        abort!(state, TransitionError::InvalidAddress);
    }

    let transferred = match state.ctx.ws_cache.ws.tokens.get_mut(&input.token) {
        Some(token) => token
            .transfer(&input.holder, &owner, input.amount)
            .map_err(TransitionError::from),
        None => Err(TransitionError::TargetNotFound),
    };
    if let Err(err) = transferred {
        abort!(state, err);
    }

    state.ctx.emit(Event::TokensRecovered {
        token: input.token,
        to: owner,
        amount: input.amount,
    });
    Ok(())
}
