/*
    Copyright © 2023, ParallelChain Lab
    Licensed under the Apache License, Version 2.0: http://www.apache.org/licenses/LICENSE-2.0
*/

//! Implementation of state transition functions.
//!
//! The transition function [executes](execute) one command at a time against a
//! [checkpointed](cache) copy of the world state. Validation runs first and is
//! read-only; side effects follow in a fixed order; any failure after
//! validation [aborts](abort) the whole command back to the checkpoint.

pub(crate) mod abort;

pub(crate) mod cache;

pub(crate) mod execute;

pub(crate) mod state;

#[cfg(test)]
mod tests;
