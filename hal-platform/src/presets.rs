// HAL - hal-platform
// Module: fixed per-platform presets (spec §6)
//
// Copyright (c) 2025 The Flight HAL Project Developers
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Compile-time memory and capability presets, one per [`PlatformTag`].
//!
//! These are plain data, not loaded from a file: the spec treats them as
//! fixed constants the core ships (§6), the same way `flight-hal`'s
//! `memory_configs::{DESKTOP,VITA,PSP,DREAMCAST,WEB}_CONFIG` are `constexpr`
//! tables in the original C++ source.
//!
//! Only `SmallObjects`/`MediumObjects`/`LargeObjects`/`CanonicalMemory` are
//! true fixed-block pools here — the original source's `PoolType` enum also
//! names `ComponentMemory`/`AssetMemory`/`SystemMemory`, but its
//! `MemoryConfig` struct never gives them a block size/count, only a budget.
//! `hal-memory` models those three as contiguous region arenas sized from
//! the budget fields below (see `hal-memory::MemoryManager::allocate_component_region`
//! and DESIGN.md).

use crate::capability::{Capability, CapabilityMask};
use crate::info::PlatformTag;

/// One fixed-block pool's shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolConfig {
    /// Total backing size in bytes.
    pub total_size: usize,
    /// Size of each block in bytes (rounded up to 8 by `hal-memory`).
    pub block_size: usize,
    /// Number of blocks.
    pub block_count: u32,
}

/// A full platform memory preset (spec §6 table).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemoryPreset {
    /// Total memory budget for the HAL on this platform.
    pub total_size: usize,
    /// Budget reserved for component heaps/stacks.
    pub component_budget: usize,
    /// Budget reserved for the runtime itself.
    pub runtime_budget: usize,
    /// Budget reserved for asset data (textures, sounds, models).
    pub asset_budget: usize,
    /// Budget reserved and never handed out (system headroom).
    pub system_reserved: usize,
    /// `SmallObjects` pool shape.
    pub small: PoolConfig,
    /// `MediumObjects` pool shape.
    pub medium: PoolConfig,
    /// `LargeObjects` pool shape.
    pub large: PoolConfig,
    /// `CanonicalMemory` pool shape.
    pub canonical: PoolConfig,
}

const KIB: usize = 1024;
const MIB: usize = 1024 * KIB;
const GIB: usize = 1024 * MIB;

/// The desktop preset: 1 GiB total, the most generous of the five.
pub const DESKTOP: MemoryPreset = MemoryPreset {
    total_size: GIB,
    component_budget: 512 * MIB,
    runtime_budget: 256 * MIB,
    asset_budget: 256 * MIB,
    system_reserved: 0,
    small: PoolConfig { total_size: 64 * 65536, block_size: 64, block_count: 65536 },
    medium: PoolConfig { total_size: 512 * 32768, block_size: 512, block_count: 32768 },
    large: PoolConfig { total_size: 4 * KIB * 16384, block_size: 4 * KIB, block_count: 16384 },
    canonical: PoolConfig { total_size: 256 * 32768, block_size: 256, block_count: 32768 },
};

/// The PS Vita preset: 512 MiB.
pub const VITA: MemoryPreset = MemoryPreset {
    total_size: 512 * MIB,
    component_budget: 256 * MIB,
    runtime_budget: 128 * MIB,
    asset_budget: 96 * MIB,
    system_reserved: 32 * MIB,
    small: PoolConfig { total_size: 64 * 32768, block_size: 64, block_count: 32768 },
    medium: PoolConfig { total_size: 512 * 16384, block_size: 512, block_count: 16384 },
    large: PoolConfig { total_size: 4 * KIB * 8192, block_size: 4 * KIB, block_count: 8192 },
    canonical: PoolConfig { total_size: 256 * 16384, block_size: 256, block_count: 16384 },
};

/// The PSP preset: 32 MiB.
pub const PSP: MemoryPreset = MemoryPreset {
    total_size: 32 * MIB,
    component_budget: 12 * MIB,
    runtime_budget: 10 * MIB,
    asset_budget: 8 * MIB,
    system_reserved: 2 * MIB,
    small: PoolConfig { total_size: 64 * 8192, block_size: 64, block_count: 8192 },
    medium: PoolConfig { total_size: 512 * 4096, block_size: 512, block_count: 4096 },
    large: PoolConfig { total_size: 4 * KIB * 1024, block_size: 4 * KIB, block_count: 1024 },
    canonical: PoolConfig { total_size: 256 * 4096, block_size: 256, block_count: 4096 },
};

/// The Dreamcast preset: 16 MiB, the tightest of the five.
pub const DREAMCAST: MemoryPreset = MemoryPreset {
    total_size: 16 * MIB,
    component_budget: 4 * MIB,
    runtime_budget: 6 * MIB,
    asset_budget: 4 * MIB,
    system_reserved: 2 * MIB,
    small: PoolConfig { total_size: 64 * 4096, block_size: 64, block_count: 4096 },
    medium: PoolConfig { total_size: 512 * 2048, block_size: 512, block_count: 2048 },
    large: PoolConfig { total_size: 4 * KIB * 512, block_size: 4 * KIB, block_count: 512 },
    canonical: PoolConfig { total_size: 256 * 2048, block_size: 256, block_count: 2048 },
};

/// The Web/WebAssembly preset: 256 MiB, browser-dependent in practice.
pub const WEB: MemoryPreset = MemoryPreset {
    total_size: 256 * MIB,
    component_budget: 128 * MIB,
    runtime_budget: 64 * MIB,
    asset_budget: 48 * MIB,
    system_reserved: 16 * MIB,
    small: PoolConfig { total_size: 64 * 16384, block_size: 64, block_count: 16384 },
    medium: PoolConfig { total_size: 512 * 8192, block_size: 512, block_count: 8192 },
    large: PoolConfig { total_size: 4 * KIB * 4096, block_size: 4 * KIB, block_count: 4096 },
    canonical: PoolConfig { total_size: 256 * 8192, block_size: 256, block_count: 8192 },
};

/// Look up the fixed memory preset for `tag`.
#[must_use]
pub const fn memory_preset(tag: PlatformTag) -> MemoryPreset {
    match tag {
        PlatformTag::Dreamcast => DREAMCAST,
        PlatformTag::Psp => PSP,
        PlatformTag::Vita => VITA,
        PlatformTag::Web => WEB,
        PlatformTag::Desktop => DESKTOP,
    }
}

/// Look up the curated `(native, software_fallback)` capability masks for
/// `tag` (spec §6, "illustrative" capability presets).
#[must_use]
pub fn capability_preset(tag: PlatformTag) -> (CapabilityMask, CapabilityMask) {
    use Capability::{
        AtomicOps, AudioEffects, ComputeShaders, FragmentShaders, Gamepad, Hardware3D,
        HardwareAudio, MultiTouch, Networking, Threading, VertexShaders, WiFi,
    };
    match tag {
        PlatformTag::Dreamcast => (
            CapabilityMask::from_slice(&[AtomicOps, Hardware3D, HardwareAudio, Gamepad]),
            CapabilityMask::from_slice(&[]),
        ),
        PlatformTag::Psp => (
            CapabilityMask::from_slice(&[
                Threading,
                AtomicOps,
                Hardware3D,
                VertexShaders,
                HardwareAudio,
                WiFi,
                Gamepad,
            ]),
            CapabilityMask::from_slice(&[]),
        ),
        PlatformTag::Vita => (
            CapabilityMask::from_slice(&[
                Threading,
                AtomicOps,
                Hardware3D,
                VertexShaders,
                FragmentShaders,
                HardwareAudio,
                AudioEffects,
                Networking,
                WiFi,
                MultiTouch,
                Gamepad,
            ]),
            CapabilityMask::from_slice(&[]),
        ),
        PlatformTag::Web => (
            CapabilityMask::from_slice(&[
                Threading,
                AtomicOps,
                Hardware3D,
                VertexShaders,
                FragmentShaders,
                HardwareAudio,
                Networking,
                MultiTouch,
                Gamepad,
            ]),
            CapabilityMask::from_slice(&[ComputeShaders]),
        ),
        PlatformTag::Desktop => (
            CapabilityMask::from_slice(&[
                Threading,
                AtomicOps,
                Hardware3D,
                VertexShaders,
                FragmentShaders,
                ComputeShaders,
                HardwareAudio,
                AudioEffects,
                Networking,
                WiFi,
                MultiTouch,
                Gamepad,
            ]),
            CapabilityMask::from_slice(&[]),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pool_configs_respect_budget_invariant() {
        for preset in [DESKTOP, VITA, PSP, DREAMCAST, WEB] {
            for pool in [preset.small, preset.medium, preset.large, preset.canonical] {
                assert!(pool.block_size * pool.block_count as usize <= pool.total_size);
            }
        }
    }

    #[test]
    fn dreamcast_has_no_networking_and_web_has_compute_fallback() {
        let (dreamcast_mask, _) = capability_preset(PlatformTag::Dreamcast);
        assert!(!dreamcast_mask.contains(Capability::Networking));

        let (web_mask, web_fallback) = capability_preset(PlatformTag::Web);
        assert!(!web_mask.contains(Capability::ComputeShaders));
        assert!(web_fallback.contains(Capability::ComputeShaders));
    }
}
