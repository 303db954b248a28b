// HAL - hal-driver
// Module: storage driver contract
//
// Copyright (c) 2025 The Flight HAL Project Developers
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! [`StorageDriver`]: persistent key-value/blob storage (spec §6 names this
//! kind without a detailed interface; see the `Open Questions` entry in
//! `DESIGN.md` for the scope decision behind this trait).
//!
//! Distinct from [`crate::file::FileDriver`]: storage is a flat namespace
//! of opaque keys, suited to save data and preference blobs on platforms
//! (consoles, browsers) where a path-addressed filesystem either does not
//! exist or should not be exposed directly to application code.

use alloc::vec::Vec;

use hal_error::Result;

use crate::driver::Driver;

/// What this backend's storage supports.
#[derive(Debug, Clone, Copy)]
pub struct StorageCapabilities {
    /// Total capacity in bytes, or `None` if unbounded.
    pub total_capacity: Option<u64>,
    /// True if writes are flushed to durable media immediately rather than
    /// requiring an explicit [`StorageDriver::flush`].
    pub auto_flush: bool,
}

/// Flat key-value/blob storage (spec §6).
pub trait StorageDriver: Driver {
    /// What this backend supports.
    fn capabilities(&self) -> StorageCapabilities;

    /// Write `value` under `key`, replacing any prior value.
    fn put(&mut self, key: &str, value: &[u8]) -> Result<()>;
    /// Read the value stored under `key`.
    fn get(&self, key: &str) -> Result<Vec<u8>>;
    /// Remove `key`. Not an error if `key` was never set.
    fn delete(&mut self, key: &str) -> Result<()>;
    /// True if `key` currently has a value.
    fn contains(&self, key: &str) -> bool;

    /// Every key currently set.
    fn keys(&self) -> Vec<alloc::string::String>;
    /// Bytes currently in use across all keys.
    fn used_bytes(&self) -> u64;

    /// Force buffered writes to durable media. A no-op if
    /// [`StorageCapabilities::auto_flush`] is true.
    fn flush(&mut self) -> Result<()>;
}
