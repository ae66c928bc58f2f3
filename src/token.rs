/*
    Copyright © 2023, ParallelChain Lab
    Licensed under the Apache License, Version 2.0: http://www.apache.org/licenses/LICENSE-2.0
*/

//! Defines the token facade consumed by the purchase and distribution engines,
//! and a stock in-memory implementation of it.
//!
//! The runtime never assumes anything about how a token ledger stores balances;
//! it only requires the [TokenLedger] capability. [CappedToken] is the
//! implementation used by deployments that do not bring their own.

use std::collections::{BTreeMap, BTreeSet};

use borsh::{BorshDeserialize, BorshSerialize};
use thiserror::Error;

use crate::types::{Address, TokenAmount, ZERO_ADDRESS};

/// Rejections raised inside a token ledger. They are converted into
/// [TransitionError](crate::TransitionError) at the engine boundary, and any
/// of them aborts the whole command that triggered the token operation.
#[derive(Debug, Error)]
pub enum TokenError {
    /// Minting the requested amount would push total supply over the cap.
    #[error("minting over the supply cap")]
    CapExceeded,

    /// Minting was finalized; no further supply can be created.
    #[error("minting is finished")]
    MintingFinished,

    /// Caller does not hold the minter capability.
    #[error("caller is not a minter")]
    NotMinter,

    /// Caller does not own the token ledger.
    #[error("caller is not the token owner")]
    NotOwner,

    /// Sender balance is smaller than the transfer amount.
    #[error("insufficient balance")]
    InsufficientBalance,

    /// Spender allowance is smaller than the transfer amount.
    #[error("insufficient allowance")]
    InsufficientAllowance,

    /// The zero address cannot hold or receive tokens.
    #[error("zero address")]
    ZeroAddress,

    /// A token ledger cannot be created with a zero supply cap.
    #[error("invalid cap")]
    InvalidCap,

    /// Implementation-defined failure of a foreign facade.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// The fungible-token capability the runtime consumes. The runtime is generic
/// over this trait the same way it would be over a storage backend: a
/// deployment supplies whatever ledger implementation it runs against.
///
/// Mutating operations take the acting address explicitly; implementations
/// enforce their own capability rules (minter set, allowances) against it.
pub trait TokenLedger: Clone + PartialEq + std::fmt::Debug {
    fn cap(&self) -> TokenAmount;

    fn total_supply(&self) -> TokenAmount;

    fn balance_of(&self, address: &Address) -> TokenAmount;

    fn allowance(&self, owner: &Address, spender: &Address) -> TokenAmount;

    /// Whether minting has been finalized. Once true, mint never succeeds again.
    fn minting_finished(&self) -> bool;

    fn mint(
        &mut self,
        minter: &Address,
        to: &Address,
        amount: TokenAmount,
    ) -> Result<(), TokenError>;

    fn transfer(
        &mut self,
        from: &Address,
        to: &Address,
        amount: TokenAmount,
    ) -> Result<(), TokenError>;

    fn transfer_from(
        &mut self,
        spender: &Address,
        owner: &Address,
        to: &Address,
        amount: TokenAmount,
    ) -> Result<(), TokenError>;

    fn approve(
        &mut self,
        owner: &Address,
        spender: &Address,
        amount: TokenAmount,
    ) -> Result<(), TokenError>;
}

/// Perform one token delivery through the facade, using the strategy the
/// aggregate was constructed with. `source` is the aggregate's own address:
/// the minter for `Mint`, the sender for `Transfer`, the spender for
/// `TransferFrom`.
pub(crate) fn deliver<T>(
    token: &mut T,
    method: &crate::state::DeliveryMethod,
    source: &Address,
    to: &Address,
    amount: TokenAmount,
) -> Result<(), TokenError>
where
    T: TokenLedger,
{
    use crate::state::DeliveryMethod;
    match method {
        DeliveryMethod::Mint => token.mint(source, to, amount),
        DeliveryMethod::Transfer => token.transfer(source, to, amount),
        DeliveryMethod::TransferFrom { funder } => token.transfer_from(source, funder, to, amount),
    }
}

/// In-memory mintable token ledger with a hard supply cap.
#[derive(Clone, Debug, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct CappedToken {
    owner: Address,
    cap: TokenAmount,
    total_supply: TokenAmount,
    minting_finished: bool,
    minters: BTreeSet<Address>,
    balances: BTreeMap<Address, TokenAmount>,
    allowances: BTreeMap<Address, BTreeMap<Address, TokenAmount>>,
}

impl CappedToken {
    /// Create an empty ledger. The owner starts as the only minter.
    pub fn new(owner: Address, cap: TokenAmount) -> Result<Self, TokenError> {
        if cap == 0 {
            return Err(TokenError::InvalidCap);
        }
        if owner == ZERO_ADDRESS {
            return Err(TokenError::ZeroAddress);
        }
        let mut minters = BTreeSet::new();
        minters.insert(owner);
        Ok(Self {
            owner,
            cap,
            total_supply: 0,
            minting_finished: false,
            minters,
            balances: BTreeMap::new(),
            allowances: BTreeMap::new(),
        })
    }

    pub fn owner(&self) -> Address {
        self.owner
    }

    pub fn is_minter(&self, address: &Address) -> bool {
        self.minters.contains(address)
    }

    /// Grant the minter capability. Owner only.
    pub fn add_minter(&mut self, caller: &Address, minter: Address) -> Result<(), TokenError> {
        if *caller != self.owner {
            return Err(TokenError::NotOwner);
        }
        if minter == ZERO_ADDRESS {
            return Err(TokenError::ZeroAddress);
        }
        self.minters.insert(minter);
        Ok(())
    }

    /// Finalize minting. Owner only, irreversible.
    pub fn finish_minting(&mut self, caller: &Address) -> Result<(), TokenError> {
        if *caller != self.owner {
            return Err(TokenError::NotOwner);
        }
        self.minting_finished = true;
        Ok(())
    }

    fn credit(&mut self, to: &Address, amount: TokenAmount) {
        let balance = self.balances.entry(*to).or_insert(0);
        // Ceiling to MAX for safety. Supply-capped ledgers cannot reach it.
        *balance = balance.saturating_add(amount);
    }

    fn debit(&mut self, from: &Address, amount: TokenAmount) -> Result<(), TokenError> {
        let balance = self.balances.entry(*from).or_insert(0);
        if *balance < amount {
            return Err(TokenError::InsufficientBalance);
        }
        *balance -= amount;
        Ok(())
    }
}

impl TokenLedger for CappedToken {
    fn cap(&self) -> TokenAmount {
        self.cap
    }

    fn total_supply(&self) -> TokenAmount {
        self.total_supply
    }

    fn balance_of(&self, address: &Address) -> TokenAmount {
        self.balances.get(address).copied().unwrap_or(0)
    }

    fn allowance(&self, owner: &Address, spender: &Address) -> TokenAmount {
        self.allowances
            .get(owner)
            .and_then(|spenders| spenders.get(spender))
            .copied()
            .unwrap_or(0)
    }

    fn minting_finished(&self) -> bool {
        self.minting_finished
    }

    fn mint(
        &mut self,
        minter: &Address,
        to: &Address,
        amount: TokenAmount,
    ) -> Result<(), TokenError> {
        if !self.minters.contains(minter) {
            return Err(TokenError::NotMinter);
        }
        if self.minting_finished {
            return Err(TokenError::MintingFinished);
        }
        if *to == ZERO_ADDRESS {
            return Err(TokenError::ZeroAddress);
        }
        let new_supply = self
            .total_supply
            .checked_add(amount)
            .ok_or(TokenError::CapExceeded)?;
        if new_supply > self.cap {
            return Err(TokenError::CapExceeded);
        }
        self.total_supply = new_supply;
        self.credit(to, amount);
        Ok(())
    }

    fn transfer(
        &mut self,
        from: &Address,
        to: &Address,
        amount: TokenAmount,
    ) -> Result<(), TokenError> {
        if *to == ZERO_ADDRESS {
            return Err(TokenError::ZeroAddress);
        }
        self.debit(from, amount)?;
        self.credit(to, amount);
        Ok(())
    }

    fn transfer_from(
        &mut self,
        spender: &Address,
        owner: &Address,
        to: &Address,
        amount: TokenAmount,
    ) -> Result<(), TokenError> {
        if *to == ZERO_ADDRESS {
            return Err(TokenError::ZeroAddress);
        }
        let allowance = self.allowance(owner, spender);
        if allowance < amount {
            return Err(TokenError::InsufficientAllowance);
        }
        self.debit(owner, amount)?;
        self.allowances
            .entry(*owner)
            .or_default()
            .insert(*spender, allowance - amount);
        self.credit(to, amount);
        Ok(())
    }

    fn approve(
        &mut self,
        owner: &Address,
        spender: &Address,
        amount: TokenAmount,
    ) -> Result<(), TokenError> {
        if *spender == ZERO_ADDRESS {
            return Err(TokenError::ZeroAddress);
        }
        self.allowances
            .entry(*owner)
            .or_default()
            .insert(*spender, amount);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const OWNER: Address = [1u8; 32];
    const MINTER: Address = [2u8; 32];
    const HOLDER: Address = [3u8; 32];
    const SPENDER: Address = [4u8; 32];

    fn token() -> CappedToken {
        let mut token = CappedToken::new(OWNER, 1_000).unwrap();
        token.add_minter(&OWNER, MINTER).unwrap();
        token
    }

    #[test]
    fn test_construction() {
        assert!(matches!(
            CappedToken::new(OWNER, 0),
            Err(TokenError::InvalidCap)
        ));
        assert!(matches!(
            CappedToken::new(ZERO_ADDRESS, 1_000),
            Err(TokenError::ZeroAddress)
        ));

        let token = token();
        assert_eq!(token.cap(), 1_000);
        assert_eq!(token.total_supply(), 0);
        assert!(token.is_minter(&OWNER));
        assert!(token.is_minter(&MINTER));
        assert!(!token.minting_finished());
    }

    #[test]
    fn test_mint_respects_roles_and_cap() {
        let mut token = token();
        assert!(matches!(
            token.mint(&HOLDER, &HOLDER, 1),
            Err(TokenError::NotMinter)
        ));

        token.mint(&MINTER, &HOLDER, 600).unwrap();
        assert_eq!(token.total_supply(), 600);
        assert_eq!(token.balance_of(&HOLDER), 600);

        // the cap bounds cumulative supply
        assert!(matches!(
            token.mint(&MINTER, &HOLDER, 401),
            Err(TokenError::CapExceeded)
        ));
        token.mint(&MINTER, &HOLDER, 400).unwrap();
        assert_eq!(token.total_supply(), 1_000);
    }

    #[test]
    fn test_finish_minting_is_final() {
        let mut token = token();
        assert!(matches!(
            token.finish_minting(&HOLDER),
            Err(TokenError::NotOwner)
        ));

        token.finish_minting(&OWNER).unwrap();
        assert!(token.minting_finished());
        assert!(matches!(
            token.mint(&MINTER, &HOLDER, 1),
            Err(TokenError::MintingFinished)
        ));
    }

    #[test]
    fn test_transfer() {
        let mut token = token();
        token.mint(&MINTER, &HOLDER, 100).unwrap();

        token.transfer(&HOLDER, &SPENDER, 60).unwrap();
        assert_eq!(token.balance_of(&HOLDER), 40);
        assert_eq!(token.balance_of(&SPENDER), 60);

        assert!(matches!(
            token.transfer(&HOLDER, &SPENDER, 41),
            Err(TokenError::InsufficientBalance)
        ));
        assert!(matches!(
            token.transfer(&HOLDER, &ZERO_ADDRESS, 1),
            Err(TokenError::ZeroAddress)
        ));
    }

    #[test]
    fn test_transfer_from_draws_down_allowance() {
        let mut token = token();
        token.mint(&MINTER, &HOLDER, 100).unwrap();
        token.approve(&HOLDER, &SPENDER, 70).unwrap();

        token.transfer_from(&SPENDER, &HOLDER, &MINTER, 50).unwrap();
        assert_eq!(token.balance_of(&MINTER), 50);
        assert_eq!(token.allowance(&HOLDER, &SPENDER), 20);

        assert!(matches!(
            token.transfer_from(&SPENDER, &HOLDER, &MINTER, 21),
            Err(TokenError::InsufficientAllowance)
        ));
    }
}
