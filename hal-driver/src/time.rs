// HAL - hal-driver
// Module: time driver contract
//
// Copyright (c) 2025 The Flight HAL Project Developers
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! [`TimeDriver`]: monotonic and wall-clock time, sleep, and high-resolution
//! performance counters (spec §6, grounded on `flight/hal/time_driver.hpp`).
//!
//! This is the conceptual source of the `now_ms` values
//! [`hal_coordination`](https://docs.rs/hal-coordination)'s deadlock engine
//! and message bus consume as an explicit parameter rather than reading a
//! clock themselves.

use hal_error::Result;

use crate::driver::Driver;

/// What this backend's clock supports.
#[derive(Debug, Clone, Copy)]
pub struct TimeCapabilities {
    /// Smallest observable difference between two [`TimeDriver::now_ms`]
    /// calls, in milliseconds.
    pub monotonic_resolution_ms: u32,
    /// True if [`TimeDriver::performance_counter`] is backed by a hardware
    /// counter rather than the same clock as [`TimeDriver::now_ms`].
    pub has_high_resolution_counter: bool,
}

/// Monotonic/wall clocks, sleep, and performance counters (spec §6).
pub trait TimeDriver: Driver {
    /// What this backend's clock supports.
    fn capabilities(&self) -> TimeCapabilities;

    /// Milliseconds since an arbitrary, backend-chosen epoch. Never goes
    /// backwards; unaffected by wall-clock adjustments.
    fn now_ms(&self) -> u64;
    /// Milliseconds since the Unix epoch (1970-01-01T00:00:00Z). May jump
    /// forward or backward if the system clock is adjusted.
    fn wall_clock_ms(&self) -> u64;

    /// Suspend the calling thread for at least `duration_ms` milliseconds.
    fn sleep_ms(&self, duration_ms: u32);

    /// Raw ticks from the backend's highest-resolution counter.
    fn performance_counter(&self) -> u64;
    /// Ticks per second for [`TimeDriver::performance_counter`].
    fn performance_frequency(&self) -> u64;
}

/// Elapsed milliseconds between two [`TimeDriver::performance_counter`]
/// readings taken on the same driver.
#[must_use]
pub fn elapsed_ms(start_ticks: u64, end_ticks: u64, frequency: u64) -> Result<f64> {
    if frequency == 0 {
        return Err(hal_error::Error::invalid_parameter().with_context("elapsed_ms: frequency is zero"));
    }
    let delta = end_ticks.saturating_sub(start_ticks);
    Ok((delta as f64 / frequency as f64) * 1000.0)
}
