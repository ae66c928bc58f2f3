/*
    Copyright © 2023, ParallelChain Lab
    Licensed under the Apache License, Version 2.0: http://www.apache.org/licenses/LICENSE-2.0
*/

use crate::{ledger::Contributions, TransitionError};

use super::test_utils::*;

const OPERATOR: [u8; 32] = [40u8; 32];
const WEI_TO_ADD: u128 = ETHER;
const TOKEN_TO_ADD: u128 = 100;

fn contributions() -> Contributions {
    let mut contributions = Contributions::new(OWNER);
    contributions.add_operator(&OWNER, OPERATOR).unwrap();
    contributions
}

#[test]
fn test_operator_adds_balances() {
    let mut contributions = contributions();
    assert_eq!(contributions.wei_contribution(&THIRD_PARTY), 0);
    assert_eq!(contributions.token_balance(&THIRD_PARTY), 0);

    contributions
        .add_balance(&OPERATOR, THIRD_PARTY, WEI_TO_ADD, TOKEN_TO_ADD)
        .unwrap();
    assert_eq!(contributions.wei_contribution(&THIRD_PARTY), WEI_TO_ADD);
    assert_eq!(contributions.token_balance(&THIRD_PARTY), TOKEN_TO_ADD);

    contributions
        .add_balance(&OPERATOR, THIRD_PARTY, WEI_TO_ADD * 3, TOKEN_TO_ADD * 3)
        .unwrap();
    assert_eq!(contributions.wei_contribution(&THIRD_PARTY), WEI_TO_ADD * 4);
    assert_eq!(contributions.token_balance(&THIRD_PARTY), TOKEN_TO_ADD * 4);
}

#[test]
fn test_totals_accumulate() {
    let mut contributions = contributions();
    assert_eq!(contributions.total_wei_raised(), 0);
    assert_eq!(contributions.total_sold_tokens(), 0);

    contributions
        .add_balance(&OPERATOR, THIRD_PARTY, WEI_TO_ADD, TOKEN_TO_ADD)
        .unwrap();
    contributions
        .add_balance(&OPERATOR, THIRD_PARTY, WEI_TO_ADD * 3, TOKEN_TO_ADD * 3)
        .unwrap();

    assert_eq!(contributions.total_wei_raised(), WEI_TO_ADD * 4);
    assert_eq!(contributions.total_sold_tokens(), TOKEN_TO_ADD * 4);
}

#[test]
fn test_contributors_grow_per_distinct_address() {
    let mut contributions = contributions();
    assert_eq!(contributions.contributors_len(), 0);

    contributions
        .add_balance(&OPERATOR, THIRD_PARTY, WEI_TO_ADD, TOKEN_TO_ADD)
        .unwrap();
    assert_eq!(contributions.contributors_len(), 1);

    contributions
        .add_balance(&OPERATOR, INVESTOR, WEI_TO_ADD, TOKEN_TO_ADD)
        .unwrap();
    assert_eq!(contributions.contributors_len(), 2);
}

#[test]
fn test_contributors_deduplicate_same_address() {
    let mut contributions = contributions();

    contributions
        .add_balance(&OPERATOR, THIRD_PARTY, WEI_TO_ADD, TOKEN_TO_ADD)
        .unwrap();
    assert_eq!(contributions.contributors_len(), 1);

    contributions
        .add_balance(&OPERATOR, THIRD_PARTY, WEI_TO_ADD, TOKEN_TO_ADD)
        .unwrap();
    assert_eq!(contributors_addresses(&contributions), vec![THIRD_PARTY]);
    assert_eq!(contributions.contributors_len(), 1);
}

#[test]
fn test_cycle_addresses_by_index() {
    let mut contributions = contributions();
    contributions
        .add_balance(&OPERATOR, OWNER, WEI_TO_ADD * 3, TOKEN_TO_ADD * 3)
        .unwrap();
    contributions
        .add_balance(&OPERATOR, THIRD_PARTY, WEI_TO_ADD * 4, TOKEN_TO_ADD * 4)
        .unwrap();
    contributions
        .add_balance(&OPERATOR, INVESTOR, WEI_TO_ADD, TOKEN_TO_ADD)
        .unwrap();
    contributions
        .add_balance(&OPERATOR, INVESTOR, WEI_TO_ADD, TOKEN_TO_ADD)
        .unwrap();

    assert_eq!(
        contributors_addresses(&contributions),
        vec![OWNER, THIRD_PARTY, INVESTOR]
    );
    let expected = [
        (OWNER, WEI_TO_ADD * 3, TOKEN_TO_ADD * 3),
        (THIRD_PARTY, WEI_TO_ADD * 4, TOKEN_TO_ADD * 4),
        (INVESTOR, WEI_TO_ADD * 2, TOKEN_TO_ADD * 2),
    ];
    for (index, (address, wei, tokens)) in expected.iter().enumerate() {
        assert_eq!(contributions.contributor_at(index).unwrap(), *address);
        assert_eq!(contributions.wei_contribution(address), *wei);
        assert_eq!(contributions.token_balance(address), *tokens);
    }
}

#[test]
fn test_index_out_of_bounds() {
    let mut contributions = contributions();
    assert_eq!(
        contributions.contributor_at(0),
        Err(TransitionError::IndexOutOfBounds)
    );

    contributions
        .add_balance(&OPERATOR, THIRD_PARTY, WEI_TO_ADD, TOKEN_TO_ADD)
        .unwrap();
    assert!(contributions.contributor_at(0).is_ok());
    assert_eq!(
        contributions.contributor_at(1),
        Err(TransitionError::IndexOutOfBounds)
    );
}

#[test]
fn test_non_operator_cannot_add_balance() {
    let mut contributions = contributions();

    let err = contributions.add_balance(&THIRD_PARTY, THIRD_PARTY, WEI_TO_ADD, TOKEN_TO_ADD);
    assert_eq!(err, Err(TransitionError::Unauthorized));
    assert_eq!(contributions.wei_contribution(&THIRD_PARTY), 0);
    assert_eq!(contributions.token_balance(&THIRD_PARTY), 0);
    assert_eq!(contributions.total_wei_raised(), 0);
}

#[test]
fn test_operator_management_is_owner_only() {
    let mut contributions = Contributions::new(OWNER);

    assert_eq!(
        contributions.add_operator(&THIRD_PARTY, OPERATOR),
        Err(TransitionError::Unauthorized)
    );
    assert!(!contributions.is_operator(&OPERATOR));

    contributions.add_operator(&OWNER, OPERATOR).unwrap();
    assert!(contributions.is_operator(&OPERATOR));

    // several operators may coexist
    contributions.add_operator(&OWNER, SALE).unwrap();
    assert!(contributions.is_operator(&OPERATOR));
    assert!(contributions.is_operator(&SALE));

    assert_eq!(
        contributions.remove_operator(&THIRD_PARTY, &OPERATOR),
        Err(TransitionError::Unauthorized)
    );
    contributions.remove_operator(&OWNER, &OPERATOR).unwrap();
    assert!(!contributions.is_operator(&OPERATOR));
    assert!(contributions.is_operator(&SALE));
}

#[test]
fn test_investor_exists() {
    let mut contributions = contributions();
    assert!(!contributions.investor_exists(&THIRD_PARTY));

    contributions
        .add_balance(&OPERATOR, THIRD_PARTY, WEI_TO_ADD, TOKEN_TO_ADD)
        .unwrap();
    assert!(contributions.investor_exists(&THIRD_PARTY));
}

fn contributors_addresses(contributions: &Contributions) -> Vec<[u8; 32]> {
    (0..contributions.contributors_len())
        .map(|index| contributions.contributor_at(index).unwrap())
        .collect()
}
