//! Process-wide interrupt flag, set by the ctrlc handler.
//!
//! Honoured only up to the start of execution: an interrupt received while
//! planning aborts with nothing renamed, one received after the first step
//! has run is recorded but the plan still runs to completion or first failure.
//! Relaxed atomics are enough for a one-way flag.

use std::sync::atomic::{AtomicBool, Ordering};

use crate::errors::RenameError;

static SHUTDOWN: AtomicBool = AtomicBool::new(false);

/// Request a cooperative shutdown (idempotent, signal-handler safe).
#[inline]
pub fn request() {
    SHUTDOWN.store(true, Ordering::Relaxed);
}

/// Check whether a shutdown has been requested.
#[inline]
pub fn is_requested() -> bool {
    SHUTDOWN.load(Ordering::Relaxed)
}

/// Gate run right before the first mutation.
pub fn check_before_apply() -> Result<(), RenameError> {
    if is_requested() {
        Err(RenameError::Interrupted)
    } else {
        Ok(())
    }
}

#[cfg(test)]
pub(crate) fn reset() {
    SHUTDOWN.store(false, Ordering::Relaxed);
}
