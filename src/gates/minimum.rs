/*
    Copyright © 2023, ParallelChain Lab
    Licensed under the Apache License, Version 2.0: http://www.apache.org/licenses/LICENSE-2.0
*/

//! Implements the per-transaction contribution floor. The floor applies to
//! each payment individually, never to an address's cumulative contribution.

use crate::{state::SaleState, types::Wei, TransitionError};

pub(crate) fn check(sale: &SaleState, amount: Wei) -> Result<(), TransitionError> {
    if amount < sale.minimum_contribution {
        return Err(TransitionError::BelowMinimum);
    }
    Ok(())
}
