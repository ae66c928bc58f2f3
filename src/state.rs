/*
    Copyright © 2023, ParallelChain Lab
    Licensed under the Apache License, Version 2.0: http://www.apache.org/licenses/LICENSE-2.0
*/

//! Defines the world state the runtime transits: native-currency accounts,
//! token ledgers, the contribution ledger, and the sale and delivery
//! aggregates registered in a deployment.
//!
//! Registration methods validate construction invariants and play the genesis
//! role; everything after genesis goes through
//! [Runtime::transition](crate::Runtime::transition).

use std::collections::BTreeMap;

use borsh::{BorshDeserialize, BorshSerialize};

use crate::{
    gates::{capped, timed::SaleSchedule},
    ledger::Contributions,
    token::TokenLedger,
    types::{Address, Timestamp, TokenAmount, Wei, ZERO_ADDRESS},
    TransitionError,
};

/// How purchased or distributed tokens reach their recipient.
#[derive(Clone, Copy, Debug, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub enum DeliveryMethod {
    /// Mint per delivery. The aggregate must hold the minter capability on the
    /// token; supply grows with sales, bounded by the token's own cap.
    Mint,
    /// Transfer out of the aggregate's own pre-funded token balance.
    Transfer,
    /// Transfer out of a third-party funder's balance, drawing on an allowance
    /// granted to the aggregate.
    TransferFrom { funder: Address },
}

/// Parameters for registering a crowdsale aggregate.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SaleParams {
    /// Administrator: may extend the closing time and recover foreign tokens
    pub owner: Address,
    /// Tokens delivered per unit of payment
    pub rate: u128,
    /// Destination account for forwarded funds
    pub wallet: Address,
    /// Address of the token ledger delivered from
    pub token: Address,
    pub delivery: DeliveryMethod,
    pub opening_time: Timestamp,
    pub closing_time: Timestamp,
    /// Maximum cumulative payment the sale accepts
    pub funding_cap: Wei,
    /// Per-transaction contribution floor; zero disables the gate
    pub minimum_contribution: Wei,
}

/// A crowdsale aggregate. Configuration is immutable after registration except
/// for the closing time, which can only move forward.
#[derive(Clone, Debug, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct SaleState {
    pub(crate) owner: Address,
    pub(crate) rate: u128,
    pub(crate) wallet: Address,
    pub(crate) token: Address,
    pub(crate) delivery: DeliveryMethod,
    pub(crate) schedule: SaleSchedule,
    pub(crate) funding_cap: Wei,
    pub(crate) minimum_contribution: Wei,
    pub(crate) wei_raised: Wei,
}

impl SaleState {
    pub(crate) fn new(params: SaleParams, now: Timestamp) -> Result<Self, TransitionError> {
        if params.owner == ZERO_ADDRESS
            || params.wallet == ZERO_ADDRESS
            || params.token == ZERO_ADDRESS
        {
            return Err(TransitionError::InvalidAddress);
        }
        if params.rate == 0 || params.funding_cap == 0 {
            return Err(TransitionError::InvalidAmount);
        }
        if let DeliveryMethod::TransferFrom { funder } = params.delivery {
            if funder == ZERO_ADDRESS {
                return Err(TransitionError::InvalidAddress);
            }
        }
        let schedule = SaleSchedule::new(params.opening_time, params.closing_time, now)?;
        Ok(Self {
            owner: params.owner,
            rate: params.rate,
            wallet: params.wallet,
            token: params.token,
            delivery: params.delivery,
            schedule,
            funding_cap: params.funding_cap,
            minimum_contribution: params.minimum_contribution,
            wei_raised: 0,
        })
    }

    pub fn owner(&self) -> Address {
        self.owner
    }

    pub fn rate(&self) -> u128 {
        self.rate
    }

    pub fn wallet(&self) -> Address {
        self.wallet
    }

    pub fn token(&self) -> Address {
        self.token
    }

    pub fn delivery(&self) -> DeliveryMethod {
        self.delivery
    }

    pub fn schedule(&self) -> &SaleSchedule {
        &self.schedule
    }

    pub fn funding_cap(&self) -> Wei {
        self.funding_cap
    }

    pub fn minimum_contribution(&self) -> Wei {
        self.minimum_contribution
    }

    pub fn wei_raised(&self) -> Wei {
        self.wei_raised
    }

    pub fn is_open(&self, now: Timestamp) -> bool {
        self.schedule.is_open(now)
    }

    pub fn has_closed(&self, now: Timestamp) -> bool {
        self.schedule.has_closed(now)
    }

    pub fn cap_reached(&self) -> bool {
        capped::cap_reached(self)
    }

    /// The sale takes no further payments: the window has closed or the cap
    /// has been reached.
    pub fn ended(&self, now: Timestamp) -> bool {
        self.has_closed(now) || self.cap_reached()
    }
}

/// Whether a capped delivery may send to an address that has already received.
#[derive(Clone, Copy, Debug, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub enum ResendPolicy {
    /// Repeat sends accumulate.
    Allow,
    /// Already-funded recipients are silently skipped.
    Skip,
    /// A batch naming an already-funded recipient fails whole.
    Reject,
}

/// Parameters for registering a capped-distribution aggregate.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeliveryParams {
    pub owner: Address,
    /// Address of the token ledger distributed from
    pub token: Address,
    /// Maximum cumulative tokens the aggregate may distribute
    pub cap: TokenAmount,
    pub resend_policy: ResendPolicy,
    pub strategy: DeliveryMethod,
}

/// A capped batch-distribution aggregate, independent of any sale.
#[derive(Clone, Debug, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct DeliveryState {
    pub(crate) owner: Address,
    pub(crate) token: Address,
    pub(crate) cap: TokenAmount,
    pub(crate) resend_policy: ResendPolicy,
    pub(crate) strategy: DeliveryMethod,
    pub(crate) distributed_tokens: TokenAmount,
    pub(crate) received: BTreeMap<Address, TokenAmount>,
}

impl DeliveryState {
    pub(crate) fn new(params: DeliveryParams) -> Result<Self, TransitionError> {
        if params.owner == ZERO_ADDRESS || params.token == ZERO_ADDRESS {
            return Err(TransitionError::InvalidAddress);
        }
        if params.cap == 0 {
            return Err(TransitionError::InvalidAmount);
        }
        if let DeliveryMethod::TransferFrom { funder } = params.strategy {
            if funder == ZERO_ADDRESS {
                return Err(TransitionError::InvalidAddress);
            }
        }
        Ok(Self {
            owner: params.owner,
            token: params.token,
            cap: params.cap,
            resend_policy: params.resend_policy,
            strategy: params.strategy,
            distributed_tokens: 0,
            received: BTreeMap::new(),
        })
    }

    pub fn owner(&self) -> Address {
        self.owner
    }

    pub fn token(&self) -> Address {
        self.token
    }

    pub fn cap(&self) -> TokenAmount {
        self.cap
    }

    pub fn resend_policy(&self) -> ResendPolicy {
        self.resend_policy
    }

    pub fn strategy(&self) -> DeliveryMethod {
        self.strategy
    }

    pub fn distributed_tokens(&self) -> TokenAmount {
        self.distributed_tokens
    }

    pub fn remaining_tokens(&self) -> TokenAmount {
        crate::formulas::remaining_tokens(self.cap, self.distributed_tokens)
    }

    pub fn received_tokens(&self, address: &Address) -> TokenAmount {
        self.received.get(address).copied().unwrap_or(0)
    }
}

/// The world state: everything a deployment's commands can read or mutate.
/// One value of this type is one consistency boundary; the runtime applies
/// each command against it all-or-nothing.
#[derive(Clone, Debug, PartialEq)]
pub struct WorldState<T>
where
    T: TokenLedger,
{
    pub(crate) accounts: BTreeMap<Address, Wei>,
    pub(crate) tokens: BTreeMap<Address, T>,
    pub(crate) ledger: Contributions,
    pub(crate) ledger_address: Address,
    pub(crate) sales: BTreeMap<Address, SaleState>,
    pub(crate) deliveries: BTreeMap<Address, DeliveryState>,
}

impl<T> WorldState<T>
where
    T: TokenLedger,
{
    /// Create an empty world state with a contribution ledger registered at
    /// `ledger_address` and owned by `ledger_owner`.
    pub fn new(ledger_address: Address, ledger_owner: Address) -> Self {
        Self {
            accounts: BTreeMap::new(),
            tokens: BTreeMap::new(),
            ledger: Contributions::new(ledger_owner),
            ledger_address,
            sales: BTreeMap::new(),
            deliveries: BTreeMap::new(),
        }
    }

    pub fn ledger_address(&self) -> Address {
        self.ledger_address
    }

    /// Set an account's native-currency balance. Genesis funding.
    pub fn add_account(&mut self, address: Address, balance: Wei) {
        self.accounts.insert(address, balance);
    }

    /// Register a token ledger under an address. Rejects the zero address and
    /// addresses already in use.
    pub fn add_token(&mut self, address: Address, token: T) -> Result<(), TransitionError> {
        if address == ZERO_ADDRESS || self.tokens.contains_key(&address) {
            return Err(TransitionError::InvalidAddress);
        }
        self.tokens.insert(address, token);
        Ok(())
    }

    /// Register a crowdsale aggregate. Validates every construction invariant.
    pub fn register_sale(
        &mut self,
        address: Address,
        params: SaleParams,
        now: Timestamp,
    ) -> Result<(), TransitionError> {
        if address == ZERO_ADDRESS || self.sales.contains_key(&address) {
            return Err(TransitionError::InvalidAddress);
        }
        let sale = SaleState::new(params, now)?;
        self.sales.insert(address, sale);
        Ok(())
    }

    /// Register a capped-distribution aggregate.
    pub fn register_delivery(
        &mut self,
        address: Address,
        params: DeliveryParams,
    ) -> Result<(), TransitionError> {
        if address == ZERO_ADDRESS || self.deliveries.contains_key(&address) {
            return Err(TransitionError::InvalidAddress);
        }
        let delivery = DeliveryState::new(params)?;
        self.deliveries.insert(address, delivery);
        Ok(())
    }

    pub fn balance(&self, address: &Address) -> Wei {
        self.accounts.get(address).copied().unwrap_or(0)
    }

    pub fn ledger(&self) -> &Contributions {
        &self.ledger
    }

    /// Mutable ledger access, for genesis wiring (granting the first
    /// operators) outside the command path.
    pub fn ledger_mut(&mut self) -> &mut Contributions {
        &mut self.ledger
    }

    pub fn token(&self, address: &Address) -> Option<&T> {
        self.tokens.get(address)
    }

    /// Mutable token access, for genesis wiring (minter grants, pre-funding,
    /// allowances) outside the command path.
    pub fn token_mut(&mut self, address: &Address) -> Option<&mut T> {
        self.tokens.get_mut(address)
    }

    pub fn sale(&self, address: &Address) -> Option<&SaleState> {
        self.sales.get(address)
    }

    pub fn delivery(&self, address: &Address) -> Option<&DeliveryState> {
        self.deliveries.get(address)
    }

    pub(crate) fn debit_account(
        &mut self,
        address: &Address,
        amount: Wei,
    ) -> Result<(), TransitionError> {
        let balance = self.balance(address);
        if balance < amount {
            return Err(TransitionError::NotEnoughBalance);
        }
        self.accounts.insert(*address, balance - amount);
        Ok(())
    }

    pub(crate) fn credit_account(&mut self, address: &Address, amount: Wei) {
        let balance = self.balance(address);
        // Ceiling to MAX for safety. Overflow should not happen in real situation.
        self.accounts.insert(*address, balance.saturating_add(amount));
    }
}
