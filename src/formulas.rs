/*
    Copyright © 2023, ParallelChain Lab
    Licensed under the Apache License, Version 2.0: http://www.apache.org/licenses/LICENSE-2.0
*/

//! formulas defines the arithmetic used in purchase and distribution accounting.
//! All amount arithmetic is exact integer arithmetic. Overflow is surfaced to
//! the caller, never wrapped or saturated into an accepted purchase.

use crate::types::{TokenAmount, Wei};

/// Number of tokens delivered for a payment at a fixed rate.
///
/// token_amount = wei_amount * rate
///
/// Returns None on overflow; the purchase engine rejects the command in that case.
pub fn token_amount(wei_amount: Wei, rate: u128) -> Option<TokenAmount> {
    wei_amount.checked_mul(rate)
}

/// Tokens a capped delivery can still distribute.
pub fn remaining_tokens(cap: TokenAmount, distributed: TokenAmount) -> TokenAmount {
    cap.saturating_sub(distributed)
}
