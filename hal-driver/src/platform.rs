// HAL - hal-driver
// Module: Platform facade
//
// Copyright (c) 2025 The Flight HAL Project Developers
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! [`Platform`]: capability-aware driver selection over a
//! [`CapabilityProvider`] and [`DriverRegistry`] (spec §7, §8 S6).
//!
//! A subsystem that finds itself permanently unable to serve requests
//! (spec §7: "the affected subsystem marks itself inactive") calls
//! [`Platform::deactivate`]; callers that keep getting `Internal` errors
//! back from it can check [`Platform::is_active`] before retrying.

use alloc::boxed::Box;
use alloc::string::String;
use core::sync::atomic::{AtomicBool, Ordering};

use hal_error::{Error, Result};
use hal_platform::{Capability, CapabilityProvider, PlatformInfo, PlatformTag};

use crate::driver::Driver;
use crate::kind::DriverKind;
use crate::registry::DriverRegistry;

/// Capability model plus driver registry for one platform (spec §7).
pub struct Platform {
    tag: PlatformTag,
    capabilities: CapabilityProvider,
    registry: DriverRegistry,
    active: AtomicBool,
}

impl Platform {
    /// Build a facade for `tag` with empty driver registrations.
    #[must_use]
    pub fn new(tag: PlatformTag, info: PlatformInfo) -> Self {
        Self {
            tag,
            capabilities: CapabilityProvider::for_platform(tag, info),
            registry: DriverRegistry::new(),
            active: AtomicBool::new(true),
        }
    }

    /// The platform this facade was built for.
    #[must_use]
    pub fn tag(&self) -> PlatformTag {
        self.tag
    }

    /// The capability model backing [`Platform::create_with_fallback`].
    #[must_use]
    pub fn capabilities(&self) -> &CapabilityProvider {
        &self.capabilities
    }

    /// The driver registry backing driver construction.
    #[must_use]
    pub fn registry(&self) -> &DriverRegistry {
        &self.registry
    }

    /// True until [`Platform::deactivate`] has been called.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }

    /// Mark this facade permanently inactive. Irreversible: once a
    /// subsystem gives up, callers are expected to stop routing work here
    /// rather than retry.
    pub fn deactivate(&self) {
        self.active.store(false, Ordering::Release);
    }

    /// Construct `preferred` if `cap` is natively supported, otherwise fall
    /// back to `fallback` if the platform declares a software fallback for
    /// `cap`, otherwise fail with `feature_not_supported` (spec §8 S6).
    ///
    /// Fails with `internal_error` if [`Platform::is_active`] is false.
    pub fn create_with_fallback(
        &self,
        kind: DriverKind,
        cap: Capability,
        preferred: &str,
        fallback: &str,
    ) -> Result<Box<dyn Driver>> {
        if !self.is_active() {
            return Err(Error::internal_error().with_context("platform facade is deactivated"));
        }

        let name: &str = if self.capabilities.supports(cap) {
            preferred
        } else if self.capabilities.has_fallback(cap) {
            fallback
        } else {
            return Err(Error::feature_not_supported().with_context("no native support or fallback for capability"));
        };

        self.registry
            .create(kind, name)
            .ok_or_else(|| Error::driver_not_loaded().with_context("selected driver name is not registered"))
    }

    /// Names of every driver registered for `kind`.
    #[must_use]
    pub fn available_drivers(&self, kind: DriverKind) -> alloc::vec::Vec<String> {
        self.registry.get_available(kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::DriverFactory;
    use hal_platform::PlatformDetect;

    struct Stub(&'static str);
    impl Driver for Stub {
        fn name(&self) -> &str {
            self.0
        }
        fn description(&self) -> &str {
            "stub"
        }
        fn kind(&self) -> DriverKind {
            DriverKind::Video
        }
        fn initialize(&mut self) -> Result<()> {
            Ok(())
        }
        fn shutdown(&mut self) {}
        fn is_initialized(&self) -> bool {
            true
        }
    }

    fn factory(name: &'static str) -> DriverFactory {
        Box::new(move || Box::new(Stub(name)))
    }

    #[test]
    fn falls_back_when_capability_is_missing() {
        let info = PlatformDetect::static_info(PlatformTag::Web);
        let platform = Platform::new(PlatformTag::Web, info);
        platform.registry().register_driver(
            "software-compute",
            "software compute fallback",
            DriverKind::Video,
            10,
            factory("software-compute"),
        );

        let driver = platform
            .create_with_fallback(DriverKind::Video, Capability::ComputeShaders, "gpu-compute", "software-compute")
            .unwrap();
        assert_eq!(driver.name(), "software-compute");
    }

    #[test]
    fn fails_when_neither_supported_nor_fallback_declared() {
        let info = PlatformDetect::static_info(PlatformTag::Dreamcast);
        let platform = Platform::new(PlatformTag::Dreamcast, info);
        let err = match platform.create_with_fallback(DriverKind::Network, Capability::Networking, "socket", "none") {
            Err(e) => e,
            Ok(_) => panic!("expected an error"),
        };
        assert_eq!(err, Error::feature_not_supported());
    }

    #[test]
    fn deactivated_facade_refuses_selection() {
        let info = PlatformDetect::static_info(PlatformTag::Desktop);
        let platform = Platform::new(PlatformTag::Desktop, info);
        platform.deactivate();
        assert!(!platform.is_active());
        let err = match platform.create_with_fallback(DriverKind::Video, Capability::Hardware3D, "gpu", "software") {
            Err(e) => e,
            Ok(_) => panic!("expected an error"),
        };
        assert_eq!(err, Error::internal_error());
    }
}
