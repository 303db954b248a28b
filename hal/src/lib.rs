// HAL
// Module: top-level facade
//
// Copyright (c) 2025 The Flight HAL Project Developers
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]
#![warn(missing_docs)]

//! Portable hardware abstraction layer core (spec §1-§2).
//!
//! Re-exports every sub-crate and ties the coordination substrate together
//! as [`HalCore`], the owner spec §9's design note asks for in place of
//! the original's process-wide singletons: "Expose them as explicit
//! parameters or as accessors on the facade; do not rely on uncontrolled
//! global mutable state. Initialization order is:
//! Registry -> DeadlockEngine -> MessageBus."

extern crate alloc;

pub use hal_coordination as coordination;
pub use hal_driver as driver;
pub use hal_error as error;
pub use hal_events as events;
pub use hal_memory as memory;
pub use hal_platform as platform;
pub use hal_sync as sync;

pub use hal_coordination::{
    DeadlockEngine, Message, MessageBus, MessageHandler, MessageHeader, MessageKind, MessagePriority, Payload,
    ResourceHandle, ResourceLock, ResourceMetadata, ResourceRegistry, ResourceType,
};
pub use hal_driver::{Driver, DriverKind, DriverRegistry, Platform as DriverPlatform};
pub use hal_error::{Error, ErrorCategory, Result};
pub use hal_events::EventRouter;
pub use hal_memory::{MemoryConfig, MemoryManager, PoolType};
pub use hal_platform::{Capability, CapabilityProvider, PerformanceTier, PlatformDetect, PlatformInfo, PlatformTag};

mod core;

pub use core::HalCore;
