/*
    Copyright © 2023, ParallelChain Lab
    Licensed under the Apache License, Version 2.0: http://www.apache.org/licenses/LICENSE-2.0
*/

//! Defines common data structures to be used inside this library, or from outside application.

use borsh::{BorshDeserialize, BorshSerialize};

/// Address of an account, a token ledger, or a sale/delivery aggregate.
pub type Address = [u8; 32];

/// The zero address. Never a valid beneficiary, wallet or collaborator reference.
pub const ZERO_ADDRESS: Address = [0u8; 32];

/// Amount of the payment currency, in its smallest indivisible unit.
pub type Wei = u128;

/// Amount of tokens, in the token's smallest indivisible unit.
pub type TokenAmount = u128;

/// Unix timestamp in seconds. Always supplied by the caller, never read from
/// the system clock, so that gate transitions are deterministic in tests.
pub type Timestamp = u64;

/// Defines information that are supplied to the state transition function
/// alongside the command itself.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CallParams {
    /// Address of the account submitting the command
    pub signer: Address,
    /// Externally injected current time
    pub timestamp: Timestamp,
}

/// A Command is a single operation applied to the world state. Execution of a
/// Command either completes with every side effect applied, or fails with none.
#[derive(Clone, Debug, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub enum Command {
    /// Bare payment to a sale. Equivalent to [Command::BuyTokens] with the
    /// signer as beneficiary.
    Contribute(ContributeInput),
    /// Purchase tokens from a sale on behalf of a beneficiary.
    BuyTokens(BuyTokensInput),
    /// Move a sale's closing time forward.
    ExtendTime(ExtendTimeInput),
    /// Grant an address operator rights on the contribution ledger.
    AddOperator(OperatorInput),
    /// Revoke an address's operator rights on the contribution ledger.
    RemoveOperator(OperatorInput),
    /// Batch-distribute tokens from a capped delivery aggregate.
    MultiSend(MultiSendInput),
    /// Reclaim foreign tokens mistakenly held by an aggregate.
    RecoverTokens(RecoverTokensInput),
}

#[derive(Clone, Debug, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct ContributeInput {
    pub sale: Address,
    pub amount: Wei,
}

#[derive(Clone, Debug, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct BuyTokensInput {
    pub sale: Address,
    pub beneficiary: Address,
    pub amount: Wei,
}

#[derive(Clone, Debug, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct ExtendTimeInput {
    pub sale: Address,
    pub new_closing_time: Timestamp,
}

#[derive(Clone, Debug, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct OperatorInput {
    pub operator: Address,
}

#[derive(Clone, Debug, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct MultiSendInput {
    pub delivery: Address,
    pub recipients: Vec<Address>,
    pub amounts: Vec<TokenAmount>,
}

#[derive(Clone, Debug, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct RecoverTokensInput {
    /// Aggregate (sale, delivery or the ledger) currently holding the tokens
    pub holder: Address,
    /// Token ledger the tokens live on
    pub token: Address,
    pub amount: TokenAmount,
}

/// CommandKind identifies a Command without carrying its inputs. It is kept in
/// the receipt so callers can match receipts back to submitted commands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub enum CommandKind {
    Contribute,
    BuyTokens,
    ExtendTime,
    AddOperator,
    RemoveOperator,
    MultiSend,
    RecoverTokens,
}

impl From<&Command> for CommandKind {
    fn from(command: &Command) -> Self {
        match command {
            Command::Contribute(_) => CommandKind::Contribute,
            Command::BuyTokens(_) => CommandKind::BuyTokens,
            Command::ExtendTime(_) => CommandKind::ExtendTime,
            Command::AddOperator(_) => CommandKind::AddOperator,
            Command::RemoveOperator(_) => CommandKind::RemoveOperator,
            Command::MultiSend(_) => CommandKind::MultiSend,
            Command::RecoverTokens(_) => CommandKind::RecoverTokens,
        }
    }
}

/// Exit code of a completed command execution.
#[derive(Clone, Copy, Debug, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub enum ExitCode {
    /// Every side effect of the command was applied.
    Success,
    /// No side effect of the command was applied.
    Failed,
}

/// Events are the observable side effects of a command, carried in its receipt.
#[derive(Clone, Debug, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub enum Event {
    TokensPurchased {
        purchaser: Address,
        beneficiary: Address,
        wei_amount: Wei,
        token_amount: TokenAmount,
    },
    ClosingTimeExtended {
        prev_closing_time: Timestamp,
        new_closing_time: Timestamp,
    },
    TokensDistributed {
        recipient: Address,
        amount: TokenAmount,
    },
    OperatorAdded {
        operator: Address,
    },
    OperatorRemoved {
        operator: Address,
    },
    TokensRecovered {
        token: Address,
        to: Address,
        amount: TokenAmount,
    },
}

/// Receipt of a single command execution.
#[derive(Clone, Debug, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct CommandReceipt {
    pub command: CommandKind,
    pub exit_code: ExitCode,
    /// Events emitted during execution. Empty when the command failed.
    pub events: Vec<Event>,
}

pub(crate) fn create_executed_receipt(command: CommandKind, events: Vec<Event>) -> CommandReceipt {
    CommandReceipt {
        command,
        exit_code: ExitCode::Success,
        events,
    }
}

pub(crate) fn create_failed_receipt(command: CommandKind) -> CommandReceipt {
    CommandReceipt {
        command,
        exit_code: ExitCode::Failed,
        events: Vec::new(),
    }
}
