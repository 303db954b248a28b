// HAL - hal-platform
// Module: platform info and compile-time detection
//
// Copyright (c) 2025 The Flight HAL Project Developers
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Compile-time platform tag and runtime-probed [`PlatformInfo`].

/// Coarse class selecting default budgets and strategies (spec GLOSSARY).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PerformanceTier {
    /// Dreamcast-class: single core, no general-purpose threading.
    Minimal,
    /// PSP/Vita-class: cooperative threads, tight memory.
    Limited,
    /// A typical desktop or laptop.
    Standard,
    /// High-end desktop/workstation.
    High,
}

/// Byte order of the target CPU.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endianness {
    /// Least-significant byte first.
    Little,
    /// Most-significant byte first.
    Big,
}

impl Endianness {
    /// The endianness of the CPU this code was compiled for.
    #[must_use]
    pub const fn native() -> Self {
        #[cfg(target_endian = "little")]
        {
            Endianness::Little
        }
        #[cfg(target_endian = "big")]
        {
            Endianness::Big
        }
    }
}

/// Compile-time platform tag. Selects presets in [`crate::presets`] and is
/// reported in [`PlatformInfo::name`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum PlatformTag {
    /// Sega Dreamcast: 16 MiB, single core, no threading.
    Dreamcast,
    /// Sony PSP: 32 MiB, cooperative threads.
    Psp,
    /// Sony PS Vita: 512 MiB, cooperative threads.
    Vita,
    /// WebAssembly inside a browser sandbox.
    Web,
    /// A conventional desktop OS (Linux/macOS/Windows).
    Desktop,
}

impl PlatformTag {
    /// The tag for the platform this code was compiled for.
    ///
    /// Target selection mirrors a typical embedded HAL's feature ladder: an
    /// explicit `platform-*` feature picked by the top-level binary wins,
    /// then `wasm32` target detection, then [`PlatformTag::Desktop`] for
    /// anything else this crate has not been specifically ported to.
    #[must_use]
    pub const fn current() -> Self {
        if cfg!(feature = "platform-dreamcast") {
            PlatformTag::Dreamcast
        } else if cfg!(feature = "platform-psp") {
            PlatformTag::Psp
        } else if cfg!(feature = "platform-vita") {
            PlatformTag::Vita
        } else if cfg!(feature = "platform-web") || cfg!(target_arch = "wasm32") {
            PlatformTag::Web
        } else {
            PlatformTag::Desktop
        }
    }

    /// Human-readable platform name, also used as [`PlatformInfo::name`].
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            PlatformTag::Dreamcast => "dreamcast",
            PlatformTag::Psp => "psp",
            PlatformTag::Vita => "vita",
            PlatformTag::Web => "web",
            PlatformTag::Desktop => "desktop",
        }
    }

    /// Default performance tier for this platform, used when no runtime
    /// probe is available to refine it.
    #[must_use]
    pub const fn default_tier(self) -> PerformanceTier {
        match self {
            PlatformTag::Dreamcast => PerformanceTier::Minimal,
            PlatformTag::Psp | PlatformTag::Vita => PerformanceTier::Limited,
            PlatformTag::Web => PerformanceTier::Standard,
            PlatformTag::Desktop => PerformanceTier::High,
        }
    }
}

/// Platform facts gathered once at startup (spec §3).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformInfo {
    /// Platform name, e.g. `"desktop"`.
    pub name: &'static str,
    /// Target architecture, e.g. `"x86_64"`.
    pub architecture: &'static str,
    /// Coarse performance class.
    pub performance_tier: PerformanceTier,
    /// Total addressable memory for the HAL, in bytes.
    pub total_memory_bytes: u64,
    /// Number of logical CPU cores available to the HAL.
    pub cpu_core_count: u32,
    /// Whether the CPU has hardware floating point.
    pub has_fpu: bool,
    /// Whether the CPU exposes a SIMD instruction set.
    pub has_simd: bool,
    /// Byte order of the CPU.
    pub endianness: Endianness,
}

/// Detects [`PlatformTag`] at compile time and probes [`PlatformInfo`] at
/// runtime using the best primitive available for the target.
pub struct PlatformDetect;

/// Best-effort architecture name for the target this crate is compiled for.
const fn architecture_name() -> &'static str {
    if cfg!(target_arch = "x86_64") {
        "x86_64"
    } else if cfg!(target_arch = "x86") {
        "x86"
    } else if cfg!(target_arch = "aarch64") {
        "aarch64"
    } else if cfg!(target_arch = "arm") {
        "arm"
    } else if cfg!(target_arch = "wasm32") {
        "wasm32"
    } else if cfg!(target_arch = "mips") {
        "mips"
    } else if cfg!(target_arch = "sh4") {
        "sh4"
    } else {
        "unknown"
    }
}

impl PlatformDetect {
    /// The compile-time platform tag.
    #[must_use]
    pub const fn tag() -> PlatformTag {
        PlatformTag::current()
    }

    /// Probe the host for [`PlatformInfo`]. On targets without an OS (the
    /// embedded consoles), the static preset for [`PlatformTag::current`]
    /// is returned verbatim since there is nothing to probe.
    #[must_use]
    pub fn probe() -> PlatformInfo {
        let tag = Self::tag();
        #[cfg(feature = "std")]
        {
            PlatformInfo {
                name: tag.name(),
                architecture: architecture_name(),
                performance_tier: tag.default_tier(),
                total_memory_bytes: Self::probe_total_memory(),
                cpu_core_count: std::thread::available_parallelism()
                    .map(|n| n.get() as u32)
                    .unwrap_or(1),
                has_fpu: cfg!(target_feature = "sse2") || cfg!(target_feature = "fp-armv8"),
                has_simd: cfg!(target_feature = "sse2")
                    || cfg!(target_feature = "neon")
                    || cfg!(target_feature = "simd128"),
                endianness: Endianness::native(),
            }
        }
        #[cfg(not(feature = "std"))]
        {
            Self::static_info(tag)
        }
    }

    /// Build [`PlatformInfo`] purely from the compile-time tag, with no
    /// runtime probing at all. Used on `no_std` builds and as the baseline
    /// `std` falls back onto for fields it cannot probe.
    #[must_use]
    pub fn static_info(tag: PlatformTag) -> PlatformInfo {
        let preset = crate::presets::memory_preset(tag);
        PlatformInfo {
            name: tag.name(),
            architecture: architecture_name(),
            performance_tier: tag.default_tier(),
            total_memory_bytes: preset.total_size as u64,
            cpu_core_count: 1,
            has_fpu: !matches!(tag, PlatformTag::Dreamcast),
            has_simd: matches!(tag, PlatformTag::Desktop | PlatformTag::Vita),
            endianness: Endianness::native(),
        }
    }

    #[cfg(feature = "std")]
    fn probe_total_memory() -> u64 {
        // No portable, allocation-free way to query total system memory from
        // `std` alone; fall back to this platform's configured preset. A
        // concrete OS integration can override this by constructing
        // `PlatformInfo` directly.
        crate::presets::memory_preset(Self::tag()).total_size as u64
    }
}
