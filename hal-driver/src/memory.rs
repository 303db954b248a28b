// HAL - hal-driver
// Module: platform memory driver contract
//
// Copyright (c) 2025 The Flight HAL Project Developers
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! [`MemoryDriver`]: raw platform memory allocation (spec §6 names this
//! kind without a detailed interface; see the `Open Questions` entry in
//! `DESIGN.md` for the scope decision behind this trait).
//!
//! This is deliberately minimal and distinct from
//! [`hal_memory`](https://docs.rs/hal-memory)'s pool system: that crate is
//! the core's own memory manager and is always present, while a
//! `MemoryDriver` backend is how the core would in turn source raw pages
//! from a platform that needs something other than a global allocator
//! (e.g. a console's fixed memory arena, or a page-grained `mmap` source).

use hal_error::Result;

use crate::driver::Driver;

/// What this backend's raw allocation source supports.
#[derive(Debug, Clone, Copy)]
pub struct MemoryDriverCapabilities {
    /// Required alignment, in bytes, for every region this backend returns.
    pub min_alignment: usize,
    /// True if [`MemoryDriver::protect`] is implemented.
    pub supports_protection: bool,
}

/// Page-grained access permissions for [`MemoryDriver::protect`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemoryProtection {
    /// Reads are permitted.
    pub read: bool,
    /// Writes are permitted.
    pub write: bool,
    /// Instruction fetch is permitted.
    pub execute: bool,
}

/// Raw, page-grained memory allocation sourced from the platform rather
/// than a process-wide global allocator.
pub trait MemoryDriver: Driver {
    /// What this backend supports.
    fn capabilities(&self) -> MemoryDriverCapabilities;

    /// Reserve and commit `size` bytes, returning the region's base address
    /// as an opaque integer (never dereferenced by this crate).
    fn allocate_region(&mut self, size: usize) -> Result<usize>;
    /// Release a region previously returned by
    /// [`MemoryDriver::allocate_region`].
    fn free_region(&mut self, address: usize, size: usize) -> Result<()>;

    /// Change access permissions on `[address, address + size)`. Fails with
    /// `feature_not_supported` unless
    /// [`MemoryDriverCapabilities::supports_protection`] is true.
    fn protect(&mut self, address: usize, size: usize, protection: MemoryProtection) -> Result<()>;
}
