//! Reentrancy guard for swap execution
//!
//! Sub-calls of a batch run arbitrary contract code which may call back into the executor. The lock is
//! held for the whole lifetime of one `execute_swap` and any nested attempt is rejected.

use crate::errors::SwapError;
use std::sync::atomic::{AtomicBool, Ordering};

#[derive(Debug, Default)]
pub struct ReentrancyLock {
    entered: AtomicBool,
}

impl ReentrancyLock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquire the lock, released when the returned guard drops
    pub fn enter(&self) -> Result<ReentrancyGuard<'_>, SwapError> {
        if self.entered.swap(true, Ordering::AcqRel) {
            return Err(SwapError::Reentrancy);
        }
        Ok(ReentrancyGuard { lock: self })
    }

    pub fn is_entered(&self) -> bool {
        self.entered.load(Ordering::Acquire)
    }
}

pub struct ReentrancyGuard<'a> {
    lock: &'a ReentrancyLock,
}

impl Drop for ReentrancyGuard<'_> {
    fn drop(&mut self) {
        self.lock.entered.store(false, Ordering::Release);
    }
}
