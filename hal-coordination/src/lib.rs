// HAL - hal-coordination
// Module: cross-driver resource coordination
//
// Copyright (c) 2025 The Flight HAL Project Developers
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]
#![warn(missing_docs)]

//! Cross-driver resource registry, deadlock prevention, and message bus
//! (spec §4.5, components C7-C10).
//!
//! These were process-wide singletons in the original. Per spec §9's
//! design note they are explicit values here instead: build a
//! [`registry::ResourceRegistry`], a [`deadlock::DeadlockEngine`], and a
//! [`bus::MessageBus`] once (in that order — the engine and bus don't
//! depend on the registry, but the facade that owns all three should
//! still bring them up Registry -> DeadlockEngine -> MessageBus) and pass
//! them down to whatever needs them.

extern crate alloc;

mod bus;
mod deadlock;
mod lock;
mod message;
mod registry;
mod resource;

pub use bus::{MessageBus, MessageHandler, MessageStats, DEFAULT_CAPACITY};
pub use deadlock::{DeadlockEngine, DeadlockInfo, DeadlockStats, ResourceRequest, DEFAULT_TIMEOUT_MS, MAX_DEPENDENCY_AGE_MS};
pub use lock::ResourceLock;
pub use message::{
    Message, MessageHeader, MessageKind, MessagePriority, Metric, Payload, PerformancePayload, ResourceOperation,
    ResourceRequestPayload, ResourceResponsePayload, BROADCAST_RECIPIENT,
};
pub use registry::ResourceRegistry;
pub use resource::{resource_utils, AccessPattern, Priority, ResourceFlags, ResourceHandle, ResourceMetadata, ResourceType};
