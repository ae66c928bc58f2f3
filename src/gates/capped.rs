/*
    Copyright © 2023, ParallelChain Lab
    Licensed under the Apache License, Version 2.0: http://www.apache.org/licenses/LICENSE-2.0
*/

//! Implements the cumulative funding cap. A payment that would push the raised
//! total over the cap is rejected in full; there is no partial fill up to the
//! cap.

use crate::{state::SaleState, types::Wei, TransitionError};

pub(crate) fn check(sale: &SaleState, amount: Wei) -> Result<(), TransitionError> {
    let raised = sale
        .wei_raised
        .checked_add(amount)
        .ok_or(TransitionError::AmountOverflow)?;
    if raised > sale.funding_cap {
        return Err(TransitionError::CapExceeded);
    }
    Ok(())
}

/// wei_raised >= cap
pub(crate) fn cap_reached(sale: &SaleState) -> bool {
    sale.wei_raised >= sale.funding_cap
}
