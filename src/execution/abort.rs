/*
    Copyright © 2023, ParallelChain Lab
    Licensed under the Apache License, Version 2.0: http://www.apache.org/licenses/LICENSE-2.0
*/

//! Defines constructs to abort command execution on errors.
//!
//! This module contains utilities used extensively for short-circuiting
//! command execution in the [purchase](crate::commands::purchase),
//! [admin](crate::commands::admin) and
//! [distribution](crate::commands::distribution) commands.
//! They ensure consistent clean up in command processing.

/// Causes all world state changes of the command in flight to be reverted,
/// to ensure state consistency on execution failure.
macro_rules! abort {
    ($state:ident, $err:expr) => {
        return {
            $state.ctx.revert_changes();
            Err($err)
        }
    };
}

pub(crate) use abort;
