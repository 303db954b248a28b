// HAL - hal-coordination
// Module: scoped resource lock
//
// Copyright (c) 2025 The Flight HAL Project Developers
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! [`ResourceLock`]: RAII acquisition through [`DeadlockEngine`] (spec
//! §4.5 C10).
//!
//! The original is non-copyable and movable, releasing on destruction or
//! early `release()`. Rust's [`Drop`] plus ordinary move semantics give
//! the same shape for free — no macro helpers (`HAL_LOCK_RESOURCE*` in the
//! original) are needed since `?` composes directly with a `Drop` guard.

use alloc::string::{String, ToString};

use hal_error::Result;

use crate::deadlock::{DeadlockEngine, ResourceRequest};
use crate::resource::{Priority, ResourceType};

/// A resource acquisition held for the lifetime of this guard.
///
/// Build with [`ResourceLock::acquire`]. If acquisition failed,
/// [`ResourceLock::is_locked`] is `false` and dropping the guard is a
/// no-op; check [`ResourceLock::result`] for why.
pub struct ResourceLock<'a> {
    engine: &'a DeadlockEngine,
    requester_id: String,
    resource_id: u64,
    locked: bool,
    result: Result<()>,
}

impl<'a> ResourceLock<'a> {
    /// Attempt to acquire `resource_id` for `requester_id` through
    /// `engine`, with the original's defaults (`Normal` priority, 5000 ms
    /// timeout, exclusive access) unless overridden on the returned
    /// request before further use.
    #[must_use]
    pub fn acquire(
        engine: &'a DeadlockEngine,
        requester_id: &str,
        resource_id: u64,
        resource_type: ResourceType,
        priority: Priority,
        timeout_ms: u64,
        exclusive: bool,
        now_ms: u64,
    ) -> Self {
        let mut request = ResourceRequest::new(requester_id, resource_id, resource_type, now_ms);
        request.priority = priority;
        request.timeout_ms = timeout_ms;
        request.exclusive = exclusive;

        let result = engine.request_resource_acquisition(&request);
        let locked = result.is_ok();
        Self { engine, requester_id: requester_id.to_string(), resource_id, locked, result }
    }

    /// True iff the resource was successfully acquired.
    #[must_use]
    pub const fn is_locked(&self) -> bool {
        self.locked
    }

    /// The resource id this guard was built for.
    #[must_use]
    pub const fn resource_id(&self) -> u64 {
        self.resource_id
    }

    /// The outcome of the acquisition attempt.
    #[must_use]
    pub const fn result(&self) -> &Result<()> {
        &self.result
    }

    /// Release early. Idempotent: a no-op if not currently locked.
    pub fn release(&mut self) -> Result<()> {
        if !self.locked {
            return Ok(());
        }
        self.engine.release_resource(&self.requester_id, self.resource_id)?;
        self.locked = false;
        Ok(())
    }
}

impl Drop for ResourceLock<'_> {
    fn drop(&mut self) {
        if self.locked {
            let _ = self.engine.release_resource(&self.requester_id, self.resource_id);
            self.locked = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn acquiring_a_free_resource_locks_it() {
        let engine = DeadlockEngine::new();
        let lock = ResourceLock::acquire(&engine, "a", 1, ResourceType::Memory, Priority::Normal, 5000, true, 0);
        assert!(lock.is_locked());
        assert_eq!(engine.owned_resources("a"), alloc::vec![1]);
    }

    #[test]
    fn dropping_the_guard_releases_the_resource() {
        let engine = DeadlockEngine::new();
        {
            let _lock = ResourceLock::acquire(&engine, "a", 1, ResourceType::Memory, Priority::Normal, 5000, true, 0);
        }
        assert!(engine.owned_resources("a").is_empty());
    }

    #[test]
    fn manual_release_is_idempotent() {
        let engine = DeadlockEngine::new();
        let mut lock = ResourceLock::acquire(&engine, "a", 1, ResourceType::Memory, Priority::Normal, 5000, true, 0);
        assert!(lock.release().is_ok());
        assert!(!lock.is_locked());
        assert!(lock.release().is_ok());
    }

    #[test]
    fn failed_acquisition_leaves_the_guard_unlocked() {
        let engine = DeadlockEngine::new();
        let _owner = ResourceLock::acquire(&engine, "a", 1, ResourceType::Memory, Priority::Normal, 5000, true, 0);
        let waiter = ResourceLock::acquire(&engine, "b", 1, ResourceType::Memory, Priority::Normal, 5000, true, 0);
        assert!(!waiter.is_locked());
        assert!(waiter.result().is_err());
    }
}
