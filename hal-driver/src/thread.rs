// HAL - hal-driver
// Module: thread driver contract
//
// Copyright (c) 2025 The Flight HAL Project Developers
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! [`ThreadDriver`]: OS thread lifecycle, synchronization primitives, and
//! thread-local storage (spec §6, grounded on `flight/hal/thread_driver.hpp`).

use alloc::boxed::Box;

use hal_error::Result;

use crate::driver::Driver;

/// Scheduling priority hint passed to [`ThreadDriver::spawn`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ThreadPriority {
    /// Background work, yields to everything else.
    Low,
    /// The default scheduling class.
    Normal,
    /// Latency-sensitive work (e.g. audio mixing).
    High,
    /// Time-critical work; use sparingly.
    Critical,
}

/// Opaque handle to a spawned thread, valid only within the driver that
/// created it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ThreadHandle(pub u32);

/// Opaque handle to a mutex created by this driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MutexHandle(pub u32);

/// Opaque handle to a condition variable created by this driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CondvarHandle(pub u32);

/// Opaque handle to a thread-local storage slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TlsKey(pub u32);

/// What this backend's threading model supports.
#[derive(Debug, Clone, Copy)]
pub struct ThreadCapabilities {
    /// Maximum number of concurrently live threads, or `None` if unbounded.
    pub max_threads: Option<u32>,
    /// True if [`ThreadDriver::set_affinity`] is implemented.
    pub supports_affinity: bool,
    /// True if [`ThreadDriver::create_tls_key`] is implemented.
    pub supports_tls: bool,
}

/// OS thread lifecycle, mutex/condvar primitives, and thread-local storage
/// (spec §6).
pub trait ThreadDriver: Driver {
    /// What this backend's threading model supports.
    fn capabilities(&self) -> ThreadCapabilities;

    /// Start `body` running on a new thread at `priority`.
    fn spawn(&mut self, priority: ThreadPriority, body: Box<dyn FnOnce() + Send>) -> Result<ThreadHandle>;
    /// Block the calling thread until `handle` finishes.
    fn join(&mut self, handle: ThreadHandle) -> Result<()>;
    /// Release a thread handle without waiting for it to finish.
    fn detach(&mut self, handle: ThreadHandle) -> Result<()>;

    /// Pin `handle` to `core_mask` (one bit per logical core). Fails with
    /// `feature_not_supported` unless
    /// [`ThreadCapabilities::supports_affinity`] is true.
    fn set_affinity(&mut self, handle: ThreadHandle, core_mask: u64) -> Result<()>;

    /// Suspend the calling thread for at least `duration_ms` milliseconds.
    fn sleep_ms(&self, duration_ms: u32);
    /// Yield the calling thread's remaining timeslice to the scheduler.
    fn yield_now(&self);

    /// Create a new mutex.
    fn create_mutex(&mut self) -> Result<MutexHandle>;
    /// Block until `handle` is uncontended, then acquire it.
    fn lock_mutex(&mut self, handle: MutexHandle) -> Result<()>;
    /// Release a mutex previously acquired with [`ThreadDriver::lock_mutex`].
    fn unlock_mutex(&mut self, handle: MutexHandle) -> Result<()>;

    /// Create a new condition variable.
    fn create_condvar(&mut self) -> Result<CondvarHandle>;
    /// Release `mutex`, wait for a signal on `handle`, then reacquire
    /// `mutex`.
    fn wait_condvar(&mut self, handle: CondvarHandle, mutex: MutexHandle) -> Result<()>;
    /// Wake one thread waiting on `handle`.
    fn signal_condvar(&mut self, handle: CondvarHandle) -> Result<()>;
    /// Wake every thread waiting on `handle`.
    fn broadcast_condvar(&mut self, handle: CondvarHandle) -> Result<()>;

    /// Allocate a thread-local storage slot. Fails with
    /// `feature_not_supported` unless [`ThreadCapabilities::supports_tls`]
    /// is true.
    fn create_tls_key(&mut self) -> Result<TlsKey>;
    /// Set the calling thread's value for `key`.
    fn set_tls_value(&mut self, key: TlsKey, value: usize) -> Result<()>;
    /// Get the calling thread's value for `key`, or `0` if unset.
    fn tls_value(&self, key: TlsKey) -> usize;
}
