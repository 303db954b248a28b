// HAL - hal-error
// Module: Result & Error discipline (spec §4.1, C1/C2)
//
// Copyright (c) 2025 The Flight HAL Project Developers
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]
#![warn(missing_docs)]

//! Zero-allocation result/error discipline shared by every HAL crate.
//!
//! [`Error`] is a tagged `(category, code)` pair plus a `'static` message
//! and an optional `'static` context string — no owned heap buffer, so it
//! can cross an FFI boundary or live on a target with no allocator at all.
//! [`Result`] is a plain alias for [`core::result::Result`]`<T, Error>`:
//! Rust's `Result` is already the tagged union the design calls for, with
//! `is_ok`/`is_err`, `ok()`/`err()`, `map`/`map_err`/`and_then`, and
//! `unwrap_or` (this crate's equivalent of `value_or`) built in, so there is
//! no reason to reimplement it.
//!
//! A failing sub-call's error is returned untouched; wrappers that want to
//! add context call [`Error::with_context`], which never mutates category
//! or code (see spec §4.1's propagation convention).

extern crate core;

#[cfg(feature = "std")]
extern crate std;

/// Category-scoped numeric codes.
pub mod codes;

mod error;

pub use error::{Error, ErrorCategory};

/// The HAL's result type: Rust's `Result` specialized to [`Error`].
pub type Result<T> = core::result::Result<T, Error>;

/// Convenience alias for fallible operations with no success value.
pub type VoidResult = Result<()>;

/// Common imports for crates that build on `hal-error`.
pub mod prelude {
    pub use crate::{codes, Error, ErrorCategory, Result, VoidResult};
}
