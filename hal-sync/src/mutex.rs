// HAL - hal-sync
// Module: portable mutex
//
// Copyright (c) 2025 The Flight HAL Project Developers
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! A single mutex type that is a thin wrapper over `std::sync::Mutex` when
//! the `std` feature is enabled, and a spinlock over an atomic flag
//! otherwise. Single-threaded cooperative targets (spec §5) never contend on
//! it, so the busy-wait path is never actually spun in practice there.

use core::cell::UnsafeCell;
use core::ops::{Deref, DerefMut};
use core::sync::atomic::{AtomicBool, Ordering};

/// A mutual-exclusion wrapper around `T`.
///
/// # Safety
///
/// The `no_std` implementation uses an [`UnsafeCell`] guarded by an
/// [`AtomicBool`] flag acquired with `compare_exchange` (acquire ordering)
/// and released with a `store` (release ordering); this is the textbook
/// spinlock pattern and upholds `Send`/`Sync` the same way `std::sync::Mutex`
/// does.
pub struct Mutex<T> {
    #[cfg(feature = "std")]
    inner: std::sync::Mutex<T>,
    #[cfg(not(feature = "std"))]
    locked: AtomicBool,
    #[cfg(not(feature = "std"))]
    value: UnsafeCell<T>,
}

// SAFETY: access to `value` is only ever granted while `locked` is held.
#[cfg(not(feature = "std"))]
unsafe impl<T: Send> Sync for Mutex<T> {}

impl<T> Mutex<T> {
    /// Create a new mutex wrapping `value`.
    #[cfg(feature = "std")]
    pub fn new(value: T) -> Self {
        Self { inner: std::sync::Mutex::new(value) }
    }

    /// Create a new mutex wrapping `value`.
    #[cfg(not(feature = "std"))]
    pub const fn new(value: T) -> Self {
        Self { locked: AtomicBool::new(false), value: UnsafeCell::new(value) }
    }

    /// Acquire the lock, spinning (or blocking, under `std`) until it is
    /// available. A poisoned `std` mutex is recovered from rather than
    /// propagated — the HAL never aborts on a panicked critical section.
    pub fn lock(&self) -> MutexGuard<'_, T> {
        #[cfg(feature = "std")]
        {
            let guard = self.inner.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
            MutexGuard { inner: guard }
        }
        #[cfg(not(feature = "std"))]
        {
            while self
                .locked
                .compare_exchange_weak(false, true, Ordering::Acquire, Ordering::Relaxed)
                .is_err()
            {
                core::hint::spin_loop();
            }
            MutexGuard { lock: self }
        }
    }
}

/// RAII guard returned by [`Mutex::lock`]. Releases the lock on drop.
pub struct MutexGuard<'a, T> {
    #[cfg(feature = "std")]
    inner: std::sync::MutexGuard<'a, T>,
    #[cfg(not(feature = "std"))]
    lock: &'a Mutex<T>,
}

impl<T> Deref for MutexGuard<'_, T> {
    type Target = T;
    fn deref(&self) -> &T {
        #[cfg(feature = "std")]
        {
            &self.inner
        }
        #[cfg(not(feature = "std"))]
        {
            // SAFETY: holding a `MutexGuard` proves exclusive access.
            unsafe { &*self.lock.value.get() }
        }
    }
}

impl<T> DerefMut for MutexGuard<'_, T> {
    fn deref_mut(&mut self) -> &mut T {
        #[cfg(feature = "std")]
        {
            &mut self.inner
        }
        #[cfg(not(feature = "std"))]
        {
            // SAFETY: holding a `MutexGuard` proves exclusive access.
            unsafe { &mut *self.lock.value.get() }
        }
    }
}

#[cfg(not(feature = "std"))]
impl<T> Drop for MutexGuard<'_, T> {
    fn drop(&mut self) {
        self.lock.locked.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::Mutex;

    #[test]
    fn exclusive_access_round_trips() {
        let m = Mutex::new(0_i32);
        {
            let mut guard = m.lock();
            *guard += 1;
        }
        assert_eq!(*m.lock(), 1);
    }
}
