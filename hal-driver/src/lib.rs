// HAL - hal-driver
// Module: driver-kind contracts, registry, and Platform facade
//
// Copyright (c) 2025 The Flight HAL Project Developers
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]
#![warn(missing_docs)]

//! Driver-kind trait contracts, a priority-sorted [`DriverRegistry`], and
//! the capability-aware [`Platform`] facade (spec §6, §7, component C11).
//!
//! Each driver kind's trait extends the base [`Driver`] contract and is
//! scoped to the interface spec §6 actually names for that kind; a
//! concrete backend implementation for any kind is out of scope here.
//! Callers that hold a `&dyn Driver` downcast to the kind-specific trait
//! through the relevant `as_*` accessor rather than [`core::any::Any`].

extern crate alloc;

mod audio;
mod driver;
mod file;
mod input;
mod kind;
mod memory;
mod network;
mod platform;
mod registry;
mod storage;
mod thread;
mod time;
mod video;

pub use audio::{AudioCapabilities, AudioDriver, Position3D, StreamDesc, StreamHandle};
pub use driver::Driver;
pub use file::{DirectoryEntry, FileDriver, FileHandle, FileInfo, FileMode, FileSystemCapabilities, SeekFrom};
pub use input::{ButtonState, DeviceInfo, DeviceKind, InputCapabilities, InputDriver, TouchPoint};
pub use kind::DriverKind;
pub use memory::{MemoryDriver, MemoryDriverCapabilities, MemoryProtection};
pub use network::{ConnectionHandle, NetworkCapabilities, NetworkDriver, Transport};
pub use platform::Platform;
pub use registry::{DriverFactory, DriverInfo, DriverRegistry};
pub use storage::{StorageCapabilities, StorageDriver};
pub use thread::{
    CondvarHandle, MutexHandle, ThreadCapabilities, ThreadDriver, ThreadHandle, ThreadPriority, TlsKey,
};
pub use time::{elapsed_ms, TimeCapabilities, TimeDriver};
pub use video::{
    BufferDesc, BufferHandle, CommandBuffer, PixelFormat, PrimitiveKind, ShaderHandle, TextureDesc, TextureHandle,
    VideoCapabilities, VideoConfig, VideoDriver,
};
