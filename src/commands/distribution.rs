/*
    Copyright © 2023, ParallelChain Lab
    Licensed under the Apache License, Version 2.0: http://www.apache.org/licenses/LICENSE-2.0
*/

//! Implements execution of the capped batch-distribution command.
//!
//! A batch applies sequentially against live state, so a recipient appearing
//! twice in one batch is subject to the resend policy on its second
//! occurrence. The whole batch is atomic: any rejection (shape, policy, cap,
//! or facade) reverts every transfer already made.

use crate::{
    execution::abort::abort,
    execution::state::ExecutionState,
    token,
    token::TokenLedger,
    types::{Event, MultiSendInput},
    state::ResendPolicy,
    TransitionError,
};

pub(crate) fn multi_send<T>(
    state: &mut ExecutionState<T>,
    input: MultiSendInput,
) -> Result<(), TransitionError>
where
    T: TokenLedger,
{
    let MultiSendInput {
        delivery: delivery_address,
        recipients,
        amounts,
    } = input;
    let signer = state.env.signer;

    let mut delivery = match state.ctx.ws_cache.ws.delivery(&delivery_address) {
        Some(delivery) => delivery.clone(),
        None => abort!(state, TransitionError::TargetNotFound),
    };
    if signer != delivery.owner {
        abort!(state, TransitionError::Unauthorized);
    }
    if recipients.is_empty() || amounts.is_empty() {
        abort!(state, TransitionError::EmptyBatch);
    }
    if recipients.len() != amounts.len() {
        abort!(state, TransitionError::LengthMismatch);
    }

    for (recipient, amount) in recipients.into_iter().zip(amounts.into_iter()) {
        if delivery.received_tokens(&recipient) > 0 {
            match delivery.resend_policy {
                ResendPolicy::Allow => {}
                ResendPolicy::Skip => continue,
                ResendPolicy::Reject => abort!(state, TransitionError::AlreadyReceived),
            }
        }

        // The cap counts only amounts actually applied; skipped recipients
        // do not consume it.
        let distributed = match delivery.distributed_tokens.checked_add(amount) {
            Some(distributed) => distributed,
            None => abort!(state, TransitionError::AmountOverflow),
        };
        if distributed > delivery.cap {
            abort!(state, TransitionError::CapExceeded);
        }

        let sent = match state.ctx.ws_cache.ws.tokens.get_mut(&delivery.token) {
            Some(token) => token::deliver(
                token,
                &delivery.strategy,
                &delivery_address,
                &recipient,
                amount,
            )
            .map_err(TransitionError::from),
            None => Err(TransitionError::TargetNotFound),
        };
        if let Err(err) = sent {
            abort!(state, err);
        }

        *delivery.received.entry(recipient).or_insert(0) += amount;
        delivery.distributed_tokens = distributed;
        state.ctx.emit(Event::TokensDistributed { recipient, amount });
    }

    state
        .ctx
        .ws_cache
        .ws
        .deliveries
        .insert(delivery_address, delivery);
    Ok(())
}
