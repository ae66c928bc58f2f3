/*
    Copyright © 2023, ParallelChain Lab
    Licensed under the Apache License, Version 2.0: http://www.apache.org/licenses/LICENSE-2.0
*/

//! Defines the contribution ledger: per-investor cumulative payment and token
//! totals, an ordered deduplicated contributor list, and running aggregates.
//!
//! The ledger is mutated only through addresses holding the operator
//! capability. Operators are granted by the ledger owner; several may coexist,
//! which is what lets a base sale and a follow-on sale feed one ledger.
//! Queries are open to any caller.

use std::collections::{BTreeMap, BTreeSet};

use borsh::{BorshDeserialize, BorshSerialize};

use crate::{
    types::{Address, TokenAmount, Wei, ZERO_ADDRESS},
    TransitionError,
};

/// Cumulative totals recorded for a single investor address.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct InvestorRecord {
    /// Cumulative payment amount contributed by this address
    pub wei_contribution: Wei,
    /// Cumulative tokens credited to this address
    pub token_balance: TokenAmount,
}

/// The contribution ledger. Shape-immutable after construction: records and
/// contributors only ever grow, and the running totals never decrease.
#[derive(Clone, Debug, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct Contributions {
    owner: Address,
    operators: BTreeSet<Address>,
    records: BTreeMap<Address, InvestorRecord>,
    contributors: Vec<Address>,
    total_wei_raised: Wei,
    total_sold_tokens: TokenAmount,
}

impl Contributions {
    pub fn new(owner: Address) -> Self {
        Self {
            owner,
            operators: BTreeSet::new(),
            records: BTreeMap::new(),
            contributors: Vec::new(),
            total_wei_raised: 0,
            total_sold_tokens: 0,
        }
    }

    pub fn owner(&self) -> Address {
        self.owner
    }

    pub fn is_operator(&self, address: &Address) -> bool {
        self.operators.contains(address)
    }

    /// Grant the operator capability. Owner only.
    pub fn add_operator(
        &mut self,
        caller: &Address,
        operator: Address,
    ) -> Result<(), TransitionError> {
        if *caller != self.owner {
            return Err(TransitionError::Unauthorized);
        }
        if operator == ZERO_ADDRESS {
            return Err(TransitionError::InvalidAddress);
        }
        self.operators.insert(operator);
        Ok(())
    }

    /// Revoke the operator capability. Owner only.
    pub fn remove_operator(
        &mut self,
        caller: &Address,
        operator: &Address,
    ) -> Result<(), TransitionError> {
        if *caller != self.owner {
            return Err(TransitionError::Unauthorized);
        }
        self.operators.remove(operator);
        Ok(())
    }

    /// Record a contribution: add to the address's cumulative amounts and to
    /// the running totals, and append the address to the contributor list on
    /// its first appearance. Operator only.
    pub fn add_balance(
        &mut self,
        operator: &Address,
        address: Address,
        wei_amount: Wei,
        token_amount: TokenAmount,
    ) -> Result<(), TransitionError> {
        if !self.operators.contains(operator) {
            return Err(TransitionError::Unauthorized);
        }

        // Compute every new value before writing any of them, so a rejection
        // leaves the ledger untouched even when used outside the runtime.
        let record = self.records.get(&address).copied().unwrap_or_default();
        let wei_contribution = record
            .wei_contribution
            .checked_add(wei_amount)
            .ok_or(TransitionError::AmountOverflow)?;
        let token_balance = record
            .token_balance
            .checked_add(token_amount)
            .ok_or(TransitionError::AmountOverflow)?;
        let total_wei_raised = self
            .total_wei_raised
            .checked_add(wei_amount)
            .ok_or(TransitionError::AmountOverflow)?;
        let total_sold_tokens = self
            .total_sold_tokens
            .checked_add(token_amount)
            .ok_or(TransitionError::AmountOverflow)?;

        self.records.insert(
            address,
            InvestorRecord {
                wei_contribution,
                token_balance,
            },
        );
        self.total_wei_raised = total_wei_raised;
        self.total_sold_tokens = total_sold_tokens;

        // Membership is idempotent: an address is listed exactly once,
        // on its first contribution.
        if !self.contributors.contains(&address) {
            self.contributors.push(address);
        }
        Ok(())
    }

    pub fn wei_contribution(&self, address: &Address) -> Wei {
        self.records
            .get(address)
            .map(|r| r.wei_contribution)
            .unwrap_or(0)
    }

    pub fn token_balance(&self, address: &Address) -> TokenAmount {
        self.records
            .get(address)
            .map(|r| r.token_balance)
            .unwrap_or(0)
    }

    pub fn investor_exists(&self, address: &Address) -> bool {
        self.records.contains_key(address)
    }

    pub fn contributors_len(&self) -> usize {
        self.contributors.len()
    }

    /// Number of distinct investors recorded. Same value as
    /// [contributors_len](Self::contributors_len); kept as the query name the
    /// sale surface exposes.
    pub fn investors_number(&self) -> usize {
        self.contributors.len()
    }

    /// Contributor address by insertion order.
    pub fn contributor_at(&self, index: usize) -> Result<Address, TransitionError> {
        self.contributors
            .get(index)
            .copied()
            .ok_or(TransitionError::IndexOutOfBounds)
    }

    pub fn total_wei_raised(&self) -> Wei {
        self.total_wei_raised
    }

    pub fn total_sold_tokens(&self) -> TokenAmount {
        self.total_sold_tokens
    }
}
