// HAL - hal-driver
// Module: priority-sorted driver registry
//
// Copyright (c) 2025 The Flight HAL Project Developers
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! [`DriverRegistry`]: per-kind registration and factory lookup, sorted by
//! priority (spec §6, grounded on `flight/hal/driver.hpp`'s `DriverRegistry`
//! class).

use alloc::boxed::Box;
use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};
use alloc::vec::Vec;

use hal_sync::Mutex;

use crate::driver::Driver;
use crate::kind::DriverKind;

/// A boxed factory that produces a fresh backend instance each call.
pub type DriverFactory = Box<dyn Fn() -> Box<dyn Driver> + Send + Sync>;

/// A registered driver's identity and factory.
///
/// Unlike [`crate::driver::Driver`], this is plain data: it describes a
/// driver without constructing one, so [`DriverRegistry::get_available`]
/// can list candidates without initializing them.
pub struct DriverInfo {
    /// Short identifying name, unique within its [`DriverKind`].
    pub name: String,
    /// One-line human-readable description.
    pub description: String,
    /// Which driver surface this implements.
    pub kind: DriverKind,
    /// Higher-priority drivers are preferred by
    /// [`DriverRegistry::create_default`].
    pub priority: u32,
    factory: DriverFactory,
}

struct Inner {
    by_kind: BTreeMap<DriverKind, Vec<DriverInfo>>,
}

/// Per-kind registration and priority-ordered factory lookup (spec §6).
///
/// Entries within a kind are kept sorted by descending priority as they are
/// inserted, so [`DriverRegistry::create_default`] is always the front of
/// the bucket.
pub struct DriverRegistry {
    inner: Mutex<Inner>,
}

impl Default for DriverRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl DriverRegistry {
    /// Build an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self { inner: Mutex::new(Inner { by_kind: BTreeMap::new() }) }
    }

    /// Register a driver backend under `info.kind`. Re-sorts that kind's
    /// bucket by descending priority.
    pub fn register_driver(
        &self,
        name: &str,
        description: &str,
        kind: DriverKind,
        priority: u32,
        factory: DriverFactory,
    ) {
        let info = DriverInfo {
            name: name.to_string(),
            description: description.to_string(),
            kind,
            priority,
            factory,
        };
        #[cfg(feature = "std")]
        log::info!("registered {kind:?} driver '{name}' (priority {priority})");
        let mut inner = self.inner.lock();
        let bucket = inner.by_kind.entry(kind).or_default();
        bucket.push(info);
        bucket.sort_by(|a, b| b.priority.cmp(&a.priority));
    }

    /// Names of every driver registered for `kind`, highest priority first.
    #[must_use]
    pub fn get_available(&self, kind: DriverKind) -> Vec<String> {
        let inner = self.inner.lock();
        inner.by_kind.get(&kind).into_iter().flatten().map(|info| info.name.clone()).collect()
    }

    /// Construct the driver named `name` for `kind`, or `None` if no such
    /// driver is registered.
    #[must_use]
    pub fn create(&self, kind: DriverKind, name: &str) -> Option<Box<dyn Driver>> {
        let inner = self.inner.lock();
        let bucket = inner.by_kind.get(&kind)?;
        let info = bucket.iter().find(|info| info.name == name)?;
        Some((info.factory)())
    }

    /// Construct the highest-priority driver registered for `kind`, or
    /// `None` if no driver is registered for it.
    #[must_use]
    pub fn create_default(&self, kind: DriverKind) -> Option<Box<dyn Driver>> {
        let inner = self.inner.lock();
        let info = inner.by_kind.get(&kind)?.first()?;
        Some((info.factory)())
    }

    /// Name, description, and priority for a registered driver, without
    /// constructing it.
    #[must_use]
    pub fn get_info(&self, kind: DriverKind, name: &str) -> Option<(String, String, u32)> {
        let inner = self.inner.lock();
        let info = inner.by_kind.get(&kind)?.iter().find(|info| info.name == name)?;
        Some((info.name.clone(), info.description.clone(), info.priority))
    }

    /// Remove every registration. Mainly useful for tests.
    pub fn clear(&self) {
        self.inner.lock().by_kind.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Stub {
        initialized: bool,
    }

    impl Driver for Stub {
        fn name(&self) -> &str {
            "stub"
        }
        fn description(&self) -> &str {
            "stub driver"
        }
        fn kind(&self) -> DriverKind {
            DriverKind::Video
        }
        fn initialize(&mut self) -> hal_error::Result<()> {
            self.initialized = true;
            Ok(())
        }
        fn shutdown(&mut self) {
            self.initialized = false;
        }
        fn is_initialized(&self) -> bool {
            self.initialized
        }
    }

    fn factory() -> DriverFactory {
        Box::new(|| Box::new(Stub { initialized: false }))
    }

    #[test]
    fn highest_priority_wins_default() {
        let registry = DriverRegistry::new();
        registry.register_driver("software", "software rasterizer", DriverKind::Video, 10, factory());
        registry.register_driver("opengl", "hardware accelerated", DriverKind::Video, 100, factory());

        let names = registry.get_available(DriverKind::Video);
        assert_eq!(names, alloc::vec![String::from("opengl"), String::from("software")]);

        let default = registry.create_default(DriverKind::Video).unwrap();
        assert_eq!(default.name(), "stub");
        let info = registry.get_info(DriverKind::Video, "opengl").unwrap();
        assert_eq!(info.2, 100);
    }

    #[test]
    fn unknown_name_returns_none() {
        let registry = DriverRegistry::new();
        registry.register_driver("opengl", "hardware accelerated", DriverKind::Video, 100, factory());
        assert!(registry.create(DriverKind::Video, "vulkan").is_none());
        assert!(registry.create_default(DriverKind::Audio).is_none());
    }

    #[test]
    fn clear_empties_every_bucket() {
        let registry = DriverRegistry::new();
        registry.register_driver("opengl", "hardware accelerated", DriverKind::Video, 100, factory());
        registry.clear();
        assert!(registry.get_available(DriverKind::Video).is_empty());
    }
}
