/*
    Copyright © 2023, ParallelChain Lab
    Licensed under the Apache License, Version 2.0: http://www.apache.org/licenses/LICENSE-2.0
*/

//! error defines sets of error definitions in entire life time of state transitions.

use crate::token::TokenError;

/// Descriptive error definitions of a Transition. Every error is a total
/// rejection: the command that raised it left the world state untouched.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TransitionError {
    /// A zero address was supplied where a real address is required, or a
    /// recovery names the aggregate's own primary asset.
    InvalidAddress,

    /// A zero amount was supplied where a positive amount is required.
    InvalidAmount,

    /// An amount computation exceeded the range of the amount type.
    AmountOverflow,

    /// Sale or schedule construction violates the time-window invariants,
    /// or a closing-time extension does not strictly increase it.
    InvalidSchedule,

    /// Purchase attempted outside the sale's open window.
    NotOpen,

    /// Closing-time extension attempted after the sale has closed.
    AlreadyClosed,

    /// Accepting the payment (or batch) would push the raised total over the cap.
    CapExceeded,

    /// Payment is below the sale's per-transaction minimum contribution.
    BelowMinimum,

    /// Caller lacks the role (owner, operator or minter) the operation requires.
    Unauthorized,

    /// Contributor index lookup beyond the current list length.
    IndexOutOfBounds,

    /// The token facade cannot fulfil the delivery: minting over the supply
    /// cap, minting after finalization, or a pre-funded balance too small.
    InsufficientSupply,

    /// Allowance-based delivery drew more than the funder approved.
    InsufficientAllowance,

    /// The signer's account cannot fund the payment attached to the command.
    NotEnoughBalance,

    /// MultiSend recipient and amount arrays have different lengths.
    LengthMismatch,

    /// MultiSend was called with no recipients.
    EmptyBatch,

    /// MultiSend would resend to an already-funded recipient while the
    /// delivery's resend policy rejects repeats.
    AlreadyReceived,

    /// The command names a sale, delivery or token that is not registered
    /// in the world state.
    TargetNotFound,

    /// Implementation-defined failure inside the token facade.
    RuntimeError,
}

impl From<TokenError> for TransitionError {
    fn from(token_error: TokenError) -> Self {
        match token_error {
            TokenError::CapExceeded
            | TokenError::MintingFinished
            | TokenError::InsufficientBalance => TransitionError::InsufficientSupply,
            TokenError::InsufficientAllowance => TransitionError::InsufficientAllowance,
            TokenError::NotMinter | TokenError::NotOwner => TransitionError::Unauthorized,
            TokenError::ZeroAddress => TransitionError::InvalidAddress,
            TokenError::InvalidCap => TransitionError::InvalidAmount,
            TokenError::Other(_) => TransitionError::RuntimeError,
        }
    }
}
