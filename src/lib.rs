/*
    Copyright © 2023, ParallelChain Lab
    Licensed under the Apache License, Version 2.0: http://www.apache.org/licenses/LICENSE-2.0
*/

//! sale-runtime is a **State Transition Function** for crowdsale and token
//! distribution accounting: it transits from an input state of a deployment to
//! the next state, one command at a time.
//!
//! ```text
//! f(WS, CMD, ENV) -> (WS', R)
//!
//! WS  = World state: accounts, token ledgers, contribution ledger,
//!       sale and delivery aggregates
//! CMD = Command (purchase, administrative, or distribution operation)
//! ENV = Call parameters: signer and an externally injected timestamp
//! R   = Command receipt, carrying the exit code and emitted events
//! ```
//!
//! ### Example
//!
//! ```rust
//! // prepare world state (ws), a command (cmd), and call parameters (env),
//! // and call transition.
//! let result = sale_runtime::Runtime::new().transition(ws, cmd, env);
//! ```
//!
//! A state [transition] function intakes a Command, call parameters and the
//! World [state] to [execute](execution), and outputs a transition result
//! which could be a success result or an [error]. Purchases are validated by
//! [gates], priced by the [formulas], delivered through the [token] facade and
//! recorded into the contribution [ledger]. Every command is all-or-nothing: a
//! rejected command leaves the world state identical to its pre-call value.

pub mod commands;

pub(crate) mod context;

pub mod error;
pub use error::TransitionError;

pub mod execution;

pub mod formulas;

pub mod gates;
pub use gates::timed::SaleSchedule;

pub mod ledger;
pub use ledger::{Contributions, InvestorRecord};

pub mod state;
pub use state::{
    DeliveryMethod, DeliveryParams, DeliveryState, ResendPolicy, SaleParams, SaleState, WorldState,
};

pub mod token;
pub use token::{CappedToken, TokenError, TokenLedger};

pub mod transition;
pub use transition::{Runtime, SaleEngine, TransitionResult};

pub mod types;
pub use types::{
    Address, BuyTokensInput, CallParams, Command, CommandKind, CommandReceipt, ContributeInput,
    Event, ExitCode, ExtendTimeInput, MultiSendInput, OperatorInput, RecoverTokensInput, Timestamp,
    TokenAmount, Wei, ZERO_ADDRESS,
};
