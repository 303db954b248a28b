// HAL - hal-driver
// Module: driver kind tag
//
// Copyright (c) 2025 The Flight HAL Project Developers
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! [`DriverKind`]: the closed set of driver surfaces the core recognizes
//! (spec §6).

/// One of the driver surfaces the core contracts for. Concrete backends
/// implementing these contracts are out of scope for this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DriverKind {
    /// Frame presentation, GPU resource creation, command submission.
    Video,
    /// Stream playback and mixing.
    Audio,
    /// Button/axis/pointer/touch state and haptics.
    Input,
    /// File and directory access.
    File,
    /// OS thread lifecycle, sync primitives, TLS.
    Thread,
    /// Monotonic/wall clocks, sleep, performance counters.
    Time,
    /// Platform-level memory allocation (distinct from
    /// [`hal_memory`]'s pool system, which this core always owns itself).
    Memory,
    /// TCP/IP and related transports.
    Network,
    /// Persistent key-value or blob storage.
    Storage,
}

impl DriverKind {
    /// Every kind, in the order spec §6 lists them.
    pub const ALL: [DriverKind; 9] = [
        DriverKind::Video,
        DriverKind::Audio,
        DriverKind::Input,
        DriverKind::File,
        DriverKind::Thread,
        DriverKind::Time,
        DriverKind::Memory,
        DriverKind::Network,
        DriverKind::Storage,
    ];

    /// Lowercase name, used in log records and error context.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            DriverKind::Video => "video",
            DriverKind::Audio => "audio",
            DriverKind::Input => "input",
            DriverKind::File => "file",
            DriverKind::Thread => "thread",
            DriverKind::Time => "time",
            DriverKind::Memory => "memory",
            DriverKind::Network => "network",
            DriverKind::Storage => "storage",
        }
    }
}
