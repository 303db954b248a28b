// HAL - hal-platform
// Module: platform detection, capability model, and fixed presets
//
// Copyright (c) 2025 The Flight HAL Project Developers
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]
#![warn(missing_docs)]

//! Compile-time platform tagging and the capability model (spec §3, §4.2,
//! §6, components C3/C4).
//!
//! [`PlatformDetect`] resolves which of the five supported platforms this
//! build targets and exposes probed/static [`PlatformInfo`] for it.
//! [`CapabilityProvider`] answers "does this platform support X, and if
//! not, is there a software fallback" from the curated presets in
//! [`presets`].

#[cfg(feature = "std")]
extern crate std;

mod capability;
mod info;
pub mod presets;

pub use capability::{Capability, CapabilityMask, CapabilityProvider};
pub use info::{Endianness, PerformanceTier, PlatformDetect, PlatformInfo, PlatformTag};
