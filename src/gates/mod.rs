/*
    Copyright © 2023, ParallelChain Lab
    Licensed under the Apache License, Version 2.0: http://www.apache.org/licenses/LICENSE-2.0
*/

//! Describes the validators that gate a proposed purchase.
//!
//! Each gate is a pure predicate over the sale state, the proposed amount and
//! the injected current time. Gates never mutate anything; the purchase engine
//! runs them in a fixed pipeline order and short-circuits on the first
//! rejection:
//!
//! - [timed]: the sale's opening/closing window.
//! - [capped]: the cumulative funding cap.
//! - [minimum]: the per-transaction contribution floor.

pub(crate) mod capped;

pub(crate) mod minimum;

pub mod timed;

use crate::{
    state::SaleState,
    types::{Timestamp, Wei},
    TransitionError,
};

/// Run every gate against a proposed payment, in pipeline order.
pub(crate) fn validate_purchase(
    sale: &SaleState,
    amount: Wei,
    now: Timestamp,
) -> Result<(), TransitionError> {
    timed::check(sale, now)?;
    capped::check(sale, amount)?;
    minimum::check(sale, amount)?;
    Ok(())
}
