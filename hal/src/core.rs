// HAL
// Module: HalCore facade
//
// Copyright (c) 2025 The Flight HAL Project Developers
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! [`HalCore`]: owns the coordination substrate and the per-platform
//! driver facade as explicit values (spec §9).

use hal_coordination::{DeadlockEngine, MessageBus, ResourceRegistry};
use hal_driver::Platform as DriverPlatform;
use hal_error::Result;
use hal_events::EventRouter;
use hal_memory::MemoryManager;
use hal_platform::{PlatformDetect, PlatformInfo, PlatformTag};

/// Owns one instance of every coordination subsystem plus the memory
/// manager and driver platform facade for a single HAL instance.
///
/// Bring-up order follows spec §9 exactly: `ResourceRegistry` first (it has
/// no dependency on the other two), then `DeadlockEngine`, then
/// `MessageBus`. [`HalCore::new`] enforces this by constructing the fields
/// in that order; none of the three actually reads another's state during
/// construction, but a later subsystem swap in this position should
/// preserve the order regardless.
pub struct HalCore {
    /// Name/id/type lookup for coordinated resources (spec §4.5 C7).
    pub registry: ResourceRegistry,
    /// Resource ordering, wait-for graph, and preemption (spec §4.5 C9).
    pub deadlock: DeadlockEngine,
    /// Routed delivery and request/response correlation (spec §4.5 C8).
    pub bus: MessageBus,
    /// Filtered pub/sub layered on [`HalCore::bus`] (spec §2 C12). Not
    /// registered as a bus handler automatically — call
    /// [`MessageBus::register_handler`] with it once it is ready to
    /// receive events.
    pub events: EventRouter,
    /// Pool allocation and per-component regions for this platform
    /// (spec §4.3-§4.4 C5/C6).
    pub memory: MemoryManager,
    /// Driver registry and capability-aware selection for this platform
    /// (spec §6-§7, C11).
    pub platform: DriverPlatform,
}

impl HalCore {
    /// Build every subsystem for `tag`, using [`PlatformDetect::static_info`]
    /// for its [`PlatformInfo`] and [`hal_platform::presets::memory_preset`]
    /// for its pool sizing.
    ///
    /// Fails only if `tag`'s fixed memory preset describes an invalid pool
    /// shape, which does not happen for any of the presets this crate
    /// ships.
    pub fn for_platform(tag: PlatformTag) -> Result<Self> {
        let info = PlatformDetect::static_info(tag);
        Self::with_info(tag, info)
    }

    /// Build every subsystem for `tag` using a caller-supplied
    /// [`PlatformInfo`], e.g. one obtained from [`PlatformDetect::probe`].
    pub fn with_info(tag: PlatformTag, info: PlatformInfo) -> Result<Self> {
        let registry = ResourceRegistry::new();
        let deadlock = DeadlockEngine::new();
        let bus = MessageBus::new();
        let events = EventRouter::new();
        let memory = MemoryManager::for_platform(tag)?;
        let platform = DriverPlatform::new(tag, info);

        Ok(Self { registry, deadlock, bus, events, memory, platform })
    }

    /// The platform this instance was built for.
    #[must_use]
    pub fn tag(&self) -> PlatformTag {
        self.platform.tag()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subsystems_start_empty_and_active() {
        let core = HalCore::for_platform(PlatformTag::Desktop).unwrap();
        assert!(core.registry.is_empty());
        assert_eq!(core.bus.queue_len(), 0);
        assert!(core.platform.is_active());
        assert_eq!(core.tag(), PlatformTag::Desktop);
    }
}
