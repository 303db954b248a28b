// HAL - hal-events
// Module: filtered pub/sub event routing
//
// Copyright (c) 2025 The Flight HAL Project Developers
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]
#![warn(missing_docs)]

//! Filtered pub/sub layered on [`hal_coordination::MessageBus`] (spec §2
//! C12, treated by spec §1 as a consumer of the message bus rather than a
//! transport of its own).
//!
//! [`EventRouter`] is one [`hal_coordination::MessageHandler`] that demuxes
//! broadcast `Event`-kind traffic to any number of subscribers, each
//! gated by an [`EventFilter`] predicate over the raw
//! [`hal_coordination::Message`]. This crate ships no queue, thread, or
//! wire format of its own.

extern crate alloc;

mod filter;
mod router;

pub use filter::{any, and, by_priority_at_least, by_sender, by_sender_prefix, EventFilter};
pub use router::{EventRouter, RouterStats, SubscriptionId, ROUTER_HANDLER_ID};
