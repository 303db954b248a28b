// HAL - hal-driver
// Module: base driver contract
//
// Copyright (c) 2025 The Flight HAL Project Developers
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! [`Driver`]: the contract every kind-specific driver trait extends
//! (spec §6, grounded on `flight/hal/driver.hpp`'s `Driver` base class).
//!
//! A factory produces `Box<dyn Driver>`; callers that need the
//! kind-specific surface downcast through the relevant `as_*` accessor
//! rather than through [`core::any::Any`], since a concrete type's
//! `VideoDriver`/`AudioDriver`/... impl is itself a trait object and
//! `Any` only downcasts to concrete, `'static` types.

use hal_error::Result;

use crate::audio::AudioDriver;
use crate::file::FileDriver;
use crate::input::InputDriver;
use crate::kind::DriverKind;
use crate::memory::MemoryDriver;
use crate::network::NetworkDriver;
use crate::storage::StorageDriver;
use crate::thread::ThreadDriver;
use crate::time::TimeDriver;
use crate::video::VideoDriver;

/// The contract every driver backend implements, regardless of kind.
pub trait Driver {
    /// Short identifying name, unique within [`DriverKind`] (e.g. `"opengl"`).
    fn name(&self) -> &str;
    /// One-line human-readable description.
    fn description(&self) -> &str;
    /// Which driver surface this implements.
    fn kind(&self) -> DriverKind;

    /// Bring the backend up. Idempotent call sites should check
    /// [`Driver::is_initialized`] first.
    fn initialize(&mut self) -> Result<()>;
    /// Tear the backend down. Infallible: backends are expected to log and
    /// swallow shutdown errors rather than leave callers with no recourse.
    fn shutdown(&mut self);
    /// True once [`Driver::initialize`] has succeeded and
    /// [`Driver::shutdown`] has not since been called.
    fn is_initialized(&self) -> bool;

    /// Driver interface revision. Defaults to `1`.
    fn version(&self) -> u32 {
        1
    }
    /// True if this backend is GPU/DSP-accelerated rather than a software
    /// fallback.
    fn is_hardware_accelerated(&self) -> bool {
        false
    }
    /// True if this backend's methods may be called from more than one
    /// thread without external synchronization.
    fn is_thread_safe(&self) -> bool {
        false
    }

    /// Downcast to [`VideoDriver`] if this backend implements it.
    fn as_video(&self) -> Option<&dyn VideoDriver> {
        None
    }
    /// Downcast to [`AudioDriver`] if this backend implements it.
    fn as_audio(&self) -> Option<&dyn AudioDriver> {
        None
    }
    /// Downcast to [`InputDriver`] if this backend implements it.
    fn as_input(&self) -> Option<&dyn InputDriver> {
        None
    }
    /// Downcast to [`FileDriver`] if this backend implements it.
    fn as_file(&self) -> Option<&dyn FileDriver> {
        None
    }
    /// Downcast to [`ThreadDriver`] if this backend implements it.
    fn as_thread(&self) -> Option<&dyn ThreadDriver> {
        None
    }
    /// Downcast to [`TimeDriver`] if this backend implements it.
    fn as_time(&self) -> Option<&dyn TimeDriver> {
        None
    }
    /// Downcast to [`MemoryDriver`] if this backend implements it.
    fn as_memory(&self) -> Option<&dyn MemoryDriver> {
        None
    }
    /// Downcast to [`NetworkDriver`] if this backend implements it.
    fn as_network(&self) -> Option<&dyn NetworkDriver> {
        None
    }
    /// Downcast to [`StorageDriver`] if this backend implements it.
    fn as_storage(&self) -> Option<&dyn StorageDriver> {
        None
    }
}
