/*
    Copyright © 2023, ParallelChain Lab
    Licensed under the Apache License, Version 2.0: http://www.apache.org/licenses/LICENSE-2.0
*/

//! Describes the business logic for executing individual [Commands](crate::types::Command).
//!
//! There are three categories of Commands:
//! - [Purchase](purchase) Commands that accept payments and deliver tokens.
//! - [Admin](admin) Commands gated on an owner role: schedule extension,
//!   ledger operator management, and foreign-token recovery.
//! - [Distribution](distribution) Commands that batch-send tokens from a
//!   capped delivery aggregate.

pub(crate) mod admin;

pub(crate) mod distribution;

pub(crate) mod purchase;
