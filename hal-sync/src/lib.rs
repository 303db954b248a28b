// HAL - hal-sync
// Module: synchronization primitives used by the coordination layer
//
// Copyright (c) 2025 The Flight HAL Project Developers
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]

//! Low-level synchronization primitives shared by `hal-coordination`.
//!
//! This crate carries the one piece of `unsafe` in the whole workspace: the
//! lock-free SPSC ring that backs the message bus. Everything built on top
//! of it (`hal-coordination`, `hal-events`) stays safe Rust.

#[cfg(feature = "std")]
extern crate std;

mod mutex;
mod spsc_ring;

pub use mutex::{Mutex, MutexGuard};
pub use spsc_ring::{Consumer, Producer, SpscRing};
