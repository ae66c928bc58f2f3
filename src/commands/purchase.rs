/*
    Copyright © 2023, ParallelChain Lab
    Licensed under the Apache License, Version 2.0: http://www.apache.org/licenses/LICENSE-2.0
*/

//! Implements execution of the purchase commands.
//!
//! A purchase is validated in full before anything is mutated: beneficiary and
//! amount shape checks, then the gate pipeline, then the signer's ability to
//! fund the payment. Side effects then apply in a fixed order (token delivery,
//! ledger update, raised-total update, fund forwarding, event emission), and
//! any failure along the way aborts the whole command back to the checkpoint.

use crate::{
    execution::abort::abort,
    execution::state::ExecutionState,
    formulas, gates, token,
    token::TokenLedger,
    types::{BuyTokensInput, ContributeInput, Event, ZERO_ADDRESS},
    TransitionError,
};

/// Bare payment: the signer purchases for themselves.
pub(crate) fn contribute<T>(
    state: &mut ExecutionState<T>,
    input: ContributeInput,
) -> Result<(), TransitionError>
where
    T: TokenLedger,
{
    let beneficiary = state.env.signer;
    buy_tokens(
        state,
        BuyTokensInput {
            sale: input.sale,
            beneficiary,
            amount: input.amount,
        },
    )
}

/// Purchase on behalf of a beneficiary.
pub(crate) fn buy_tokens<T>(
    state: &mut ExecutionState<T>,
    input: BuyTokensInput,
) -> Result<(), TransitionError>
where
    T: TokenLedger,
{
    let BuyTokensInput {
        sale: sale_address,
        beneficiary,
        amount,
    } = input;
    let purchaser = state.env.signer;
    let now = state.env.timestamp;

    if beneficiary == ZERO_ADDRESS {
        abort!(state, TransitionError::InvalidAddress);
    }
    if amount == 0 {
        abort!(state, TransitionError::InvalidAmount);
    }

    // Read-only validation. Nothing below may mutate until every check passed.
    let validated = {
        let ws = &state.ctx.ws_cache.ws;
        match ws.sale(&sale_address) {
            Some(sale) => gates::validate_purchase(sale, amount, now)
                .map(|()| (sale.rate, sale.wallet, sale.token, sale.delivery)),
            None => Err(TransitionError::TargetNotFound),
        }
    };
    let (rate, wallet, token_address, delivery) = match validated {
        Ok(sale_config) => sale_config,
        Err(err) => abort!(state, err),
    };
    let token_amount = match formulas::token_amount(amount, rate) {
        Some(token_amount) => token_amount,
        None => abort!(state, TransitionError::AmountOverflow),
    };
    if state.ctx.ws_cache.ws.balance(&purchaser) < amount {
        abort!(state, TransitionError::NotEnoughBalance);
    }

    // Token delivery through the facade.
    let delivered = match state.ctx.ws_cache.ws.tokens.get_mut(&token_address) {
        Some(token) => token::deliver(token, &delivery, &sale_address, &beneficiary, token_amount)
            .map_err(TransitionError::from),
        None => Err(TransitionError::TargetNotFound),
    };
    if let Err(err) = delivered {
        abort!(state, err);
    }

    // Ledger update, with the sale acting as operator.
    if let Err(err) =
        state
            .ctx
            .ws_cache
            .ws
            .ledger
            .add_balance(&sale_address, beneficiary, amount, token_amount)
    {
        abort!(state, err);
    }

    // Raised total; the capped gate already bounded wei_raised + amount.
    let ws = &mut state.ctx.ws_cache.ws;
    if let Some(sale) = ws.sales.get_mut(&sale_address) {
        sale.wei_raised += amount;
    }

    // Fund forwarding: the payment moves from the purchaser to the wallet.
    if let Err(err) = state.ctx.ws_cache.ws.debit_account(&purchaser, amount) {
        abort!(state, err);
    }
    state.ctx.ws_cache.ws.credit_account(&wallet, amount);

    state.ctx.emit(Event::TokensPurchased {
        purchaser,
        beneficiary,
        wei_amount: amount,
        token_amount,
    });
    Ok(())
}
