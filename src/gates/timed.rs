/*
    Copyright © 2023, ParallelChain Lab
    Licensed under the Apache License, Version 2.0: http://www.apache.org/licenses/LICENSE-2.0
*/

//! Implements the sale's time window: a sale is NotStarted before its opening
//! time, Open from opening (inclusive) to closing (exclusive), and Closed from
//! the closing time on. The window can only ever move forward, and only while
//! the sale has not yet closed.

use borsh::{BorshDeserialize, BorshSerialize};

use crate::{
    state::SaleState,
    types::Timestamp,
    TransitionError,
};

/// Opening and closing times of a sale.
#[derive(Clone, Copy, Debug, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct SaleSchedule {
    opening_time: Timestamp,
    closing_time: Timestamp,
}

impl SaleSchedule {
    /// Build a schedule. The opening time must not be in the past and must
    /// strictly precede the closing time.
    pub fn new(
        opening_time: Timestamp,
        closing_time: Timestamp,
        now: Timestamp,
    ) -> Result<Self, TransitionError> {
        if opening_time < now || opening_time >= closing_time {
            return Err(TransitionError::InvalidSchedule);
        }
        Ok(Self {
            opening_time,
            closing_time,
        })
    }

    pub fn opening_time(&self) -> Timestamp {
        self.opening_time
    }

    pub fn closing_time(&self) -> Timestamp {
        self.closing_time
    }

    /// opening <= now < closing
    pub fn is_open(&self, now: Timestamp) -> bool {
        self.opening_time <= now && now < self.closing_time
    }

    /// now >= closing
    pub fn has_closed(&self, now: Timestamp) -> bool {
        now >= self.closing_time
    }

    /// Move the closing time forward. Rejected once the sale has closed, and
    /// rejected unless the new closing time strictly increases the current one.
    /// Returns the closing time that was replaced.
    pub fn extend(
        &mut self,
        new_closing_time: Timestamp,
        now: Timestamp,
    ) -> Result<Timestamp, TransitionError> {
        if self.has_closed(now) {
            return Err(TransitionError::AlreadyClosed);
        }
        if new_closing_time <= self.closing_time {
            return Err(TransitionError::InvalidSchedule);
        }
        let prev = self.closing_time;
        self.closing_time = new_closing_time;
        Ok(prev)
    }
}

/// Purchases are accepted only while the sale is Open.
pub(crate) fn check(sale: &SaleState, now: Timestamp) -> Result<(), TransitionError> {
    if !sale.schedule.is_open(now) {
        return Err(TransitionError::NotOpen);
    }
    Ok(())
}
