// HAL - hal-platform
// Module: capability bitmask and provider
//
// Copyright (c) 2025 The Flight HAL Project Developers
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! [`Capability`] bitmask, [`CapabilityMask`], and the per-platform
//! [`CapabilityProvider`] (spec §4.2, C4).

use crate::info::{PerformanceTier, PlatformInfo, PlatformTag};

/// A single named HAL capability. Values are bit positions within a
/// [`CapabilityMask`], so there can be at most 32 of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Capability {
    /// OS-level threading is available.
    Threading = 0,
    /// Atomic read-modify-write operations are available.
    AtomicOps = 1,
    /// Hardware-accelerated 3D rendering.
    Hardware3D = 2,
    /// Programmable vertex shaders.
    VertexShaders = 3,
    /// Programmable fragment shaders.
    FragmentShaders = 4,
    /// Compute shaders / GPGPU.
    ComputeShaders = 5,
    /// Hardware-mixed audio output.
    HardwareAudio = 6,
    /// Hardware audio effects (reverb, positional mixing, ...).
    AudioEffects = 7,
    /// General TCP/IP networking.
    Networking = 8,
    /// Wireless networking.
    WiFi = 9,
    /// Multi-touch input.
    MultiTouch = 10,
    /// Gamepad/controller input.
    Gamepad = 11,
}

impl Capability {
    /// All capabilities the HAL core knows how to name, in bit order.
    pub const ALL: [Capability; 12] = [
        Capability::Threading,
        Capability::AtomicOps,
        Capability::Hardware3D,
        Capability::VertexShaders,
        Capability::FragmentShaders,
        Capability::ComputeShaders,
        Capability::HardwareAudio,
        Capability::AudioEffects,
        Capability::Networking,
        Capability::WiFi,
        Capability::MultiTouch,
        Capability::Gamepad,
    ];

    const fn bit(self) -> u32 {
        1u32 << (self as u8)
    }
}

/// A 32-bit set of [`Capability`] flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CapabilityMask(u32);

impl CapabilityMask {
    /// The empty mask.
    pub const EMPTY: Self = Self(0);

    /// Build a mask from a slice of capabilities.
    #[must_use]
    pub const fn from_slice(caps: &[Capability]) -> Self {
        let mut mask = 0u32;
        let mut i = 0;
        while i < caps.len() {
            mask |= caps[i].bit();
            i += 1;
        }
        Self(mask)
    }

    /// True iff `cap` is set.
    #[must_use]
    pub const fn contains(self, cap: Capability) -> bool {
        (self.0 & cap.bit()) != 0
    }

    /// Return a copy of this mask with `cap` set.
    #[must_use]
    pub const fn with(self, cap: Capability) -> Self {
        Self(self.0 | cap.bit())
    }

    /// The raw 32-bit value.
    #[must_use]
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// List the capabilities currently set, in bit order.
    #[must_use]
    pub fn iter(self) -> impl Iterator<Item = Capability> {
        Capability::ALL.into_iter().filter(move |c| self.contains(*c))
    }
}

/// Answers capability/tier/fallback queries for one platform (spec §4.2).
#[derive(Debug, Clone)]
pub struct CapabilityProvider {
    info: PlatformInfo,
    mask: CapabilityMask,
    /// Capabilities with `has_software_fallback == true`.
    fallbacks: CapabilityMask,
}

impl CapabilityProvider {
    /// Build a provider from explicit pieces — used by tests and by callers
    /// that want to override the curated per-platform preset.
    #[must_use]
    pub fn new(info: PlatformInfo, mask: CapabilityMask, fallbacks: CapabilityMask) -> Self {
        Self { info, mask, fallbacks }
    }

    /// Build the curated provider for `tag`, using `info` as the probed
    /// platform facts (see [`crate::info::PlatformDetect::probe`]).
    #[must_use]
    pub fn for_platform(tag: PlatformTag, info: PlatformInfo) -> Self {
        let (mask, fallbacks) = crate::presets::capability_preset(tag);
        Self::new(info, mask, fallbacks)
    }

    /// True iff `cap` is available natively on this platform.
    #[must_use]
    pub fn supports(&self, cap: Capability) -> bool {
        self.mask.contains(cap)
    }

    /// The full capability bitmask.
    #[must_use]
    pub const fn mask(&self) -> CapabilityMask {
        self.mask
    }

    /// Capabilities available natively, in bit order.
    #[must_use]
    pub fn capabilities(&self) -> impl Iterator<Item = Capability> {
        self.mask.iter()
    }

    /// This platform's coarse performance tier.
    #[must_use]
    pub fn tier(&self) -> PerformanceTier {
        self.info.performance_tier
    }

    /// The probed platform facts.
    #[must_use]
    pub fn info(&self) -> &PlatformInfo {
        &self.info
    }

    /// True iff a software fallback exists for `cap` when it is not natively
    /// supported (e.g. a software rasterizer standing in for `Hardware3D`).
    #[must_use]
    pub fn has_fallback(&self, cap: Capability) -> bool {
        self.fallbacks.contains(cap)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mask_round_trips() {
        let mask = CapabilityMask::from_slice(&[Capability::Threading, Capability::Hardware3D]);
        assert!(mask.contains(Capability::Threading));
        assert!(mask.contains(Capability::Hardware3D));
        assert!(!mask.contains(Capability::Networking));
        assert_eq!(mask.iter().count(), 2);
    }

    #[test]
    fn dreamcast_has_3d_but_no_fallback_needed_and_no_threading_fallback() {
        let info = crate::info::PlatformDetect::static_info(PlatformTag::Dreamcast);
        let provider = CapabilityProvider::for_platform(PlatformTag::Dreamcast, info);
        assert!(provider.supports(Capability::Hardware3D));
        assert!(!provider.supports(Capability::Networking));
        assert!(!provider.supports(Capability::Threading));
    }

    #[test]
    fn software_fallback_flag_is_independent_of_support() {
        let info = crate::info::PlatformDetect::static_info(PlatformTag::Psp);
        let provider = CapabilityProvider::for_platform(PlatformTag::Psp, info);
        // PSP has hardware 3D, so no fallback is declared for it even though
        // fallbacks are never a function of support.
        assert!(provider.supports(Capability::Hardware3D));
        assert!(!provider.has_fallback(Capability::Hardware3D));
    }
}
