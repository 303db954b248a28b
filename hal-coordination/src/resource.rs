// HAL - hal-coordination
// Module: resource types, metadata, and handles
//
// Copyright (c) 2025 The Flight HAL Project Developers
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Resource classification and the [`ResourceHandle`] identity type
//! (spec §3, §4.5 C7).

use alloc::string::String;

/// What kind of thing a resource represents. Ordering values used by
/// [`crate::deadlock::DeadlockEngine`]'s acquire-order check come from
/// [`ResourceType::default_order`], not from this enum's discriminants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ResourceType {
    /// A memory pool, region, or arbitrary memory allocation.
    Memory,
    /// A hardware device or device handle.
    Hardware,
    /// A performance-monitoring counter or profiling resource.
    Performance,
    /// A communication channel (message bus endpoint, socket, ...).
    Communication,
    /// A platform-level resource (not owned by a specific driver).
    Platform,
    /// Anything that doesn't fit the above; lowest acquire priority.
    Custom,
}

impl ResourceType {
    /// The default static acquire-ordering value for this type (lower
    /// acquires first). Matches the original's default resource order
    /// table: Memory=100, Hardware=200, Performance=300, Communication=400,
    /// Platform=500, Custom=1000.
    #[must_use]
    pub const fn default_order(self) -> u32 {
        match self {
            ResourceType::Memory => 100,
            ResourceType::Hardware => 200,
            ResourceType::Performance => 300,
            ResourceType::Communication => 400,
            ResourceType::Platform => 500,
            ResourceType::Custom => 1000,
        }
    }
}

/// How a resource is expected to be accessed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessPattern {
    /// Only ever read.
    ReadOnly,
    /// Only ever written.
    WriteOnly,
    /// Read and written.
    ReadWrite,
    /// Sequential streaming access.
    Streaming,
    /// Random access with no locality assumption.
    Random,
}

/// Acquisition priority, used both for scheduling and for deadlock
/// preemption victim selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Priority {
    /// Lowest priority.
    Low = 0,
    /// Default priority.
    Normal = 1,
    /// Above default.
    High = 2,
    /// Must not be preempted except as a last resort.
    Critical = 3,
}

/// Flags describing how a resource may be shared and what it requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ResourceFlags(u8);

impl ResourceFlags {
    /// No flags set.
    pub const NONE: Self = Self(0);
    /// May be shared by multiple concurrent owners.
    pub const SHAREABLE: Self = Self(1 << 0);
    /// Requires exclusive ownership.
    pub const EXCLUSIVE: Self = Self(1 << 1);
    /// Persists across HAL reinitialization.
    pub const PERSISTENT: Self = Self(1 << 2);
    /// Benefits from CPU caching.
    pub const CACHEABLE: Self = Self(1 << 3);
    /// Accessible to the GPU.
    pub const GPU_ACCESSIBLE: Self = Self(1 << 4);
    /// Usable as a DMA source or destination.
    pub const DMA_CAPABLE: Self = Self(1 << 5);
    /// Backed by memory-mapped I/O.
    pub const MEMORY_MAPPED: Self = Self(1 << 6);
    /// Access must be synchronized across threads.
    pub const SYNCHRONIZED: Self = Self(1 << 7);

    /// Combine flags.
    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// True iff every flag in `other` is set in `self`.
    #[must_use]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }
}

impl core::ops::BitOr for ResourceFlags {
    type Output = Self;
    fn bitor(self, rhs: Self) -> Self {
        self.union(rhs)
    }
}

/// Descriptive metadata attached to a [`ResourceHandle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceMetadata {
    /// What kind of resource this is.
    pub resource_type: ResourceType,
    /// Expected access pattern.
    pub access_pattern: AccessPattern,
    /// Acquisition priority.
    pub priority: Priority,
    /// Sharing/requirement flags.
    pub flags: ResourceFlags,
    /// Size in bytes, if meaningful for this resource type.
    pub size_bytes: u64,
    /// Required alignment in bytes.
    pub alignment_bytes: u32,
    /// Default acquisition timeout in milliseconds.
    pub timeout_ms: u32,
}

impl Default for ResourceMetadata {
    fn default() -> Self {
        Self {
            resource_type: ResourceType::Custom,
            access_pattern: AccessPattern::ReadWrite,
            priority: Priority::Normal,
            flags: ResourceFlags::NONE,
            size_bytes: 0,
            alignment_bytes: 1,
            timeout_ms: 5000,
        }
    }
}

/// Identity and metadata for a coordinated resource (spec §3).
///
/// Equality and hashing are by `id` alone — `name`/`metadata` may change
/// across a metadata update without affecting identity.
#[derive(Debug, Clone)]
pub struct ResourceHandle {
    pub(crate) id: u64,
    pub(crate) version: u32,
    /// Human-readable name, unique within a [`crate::registry::ResourceRegistry`].
    pub name: String,
    /// Current metadata snapshot.
    pub metadata: ResourceMetadata,
}

impl ResourceHandle {
    /// The process-wide id this handle was allocated with.
    #[must_use]
    pub const fn id(&self) -> u64 {
        self.id
    }

    /// The metadata revision, incremented on every update.
    #[must_use]
    pub const fn version(&self) -> u32 {
        self.version
    }

    /// True iff this handle has a non-zero id.
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.id != 0
    }
}

impl PartialEq for ResourceHandle {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}
impl Eq for ResourceHandle {}

impl core::hash::Hash for ResourceHandle {
    fn hash<H: core::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// Free functions mirroring the original's `resource_utils` namespace.
pub mod resource_utils {
    use super::{AccessPattern, Priority, ResourceFlags, ResourceMetadata, ResourceType};

    /// True if two resource types may be safely substituted for ordering
    /// purposes: identical types, or one is `Memory` and the other is
    /// `Hardware` (memory-mapped hardware registers are both at once).
    #[must_use]
    pub const fn are_types_compatible(a: ResourceType, b: ResourceType) -> bool {
        matches!(
            (a, b),
            (ResourceType::Memory, ResourceType::Memory)
                | (ResourceType::Hardware, ResourceType::Hardware)
                | (ResourceType::Performance, ResourceType::Performance)
                | (ResourceType::Communication, ResourceType::Communication)
                | (ResourceType::Platform, ResourceType::Platform)
                | (ResourceType::Custom, ResourceType::Custom)
                | (ResourceType::Memory, ResourceType::Hardware)
                | (ResourceType::Hardware, ResourceType::Memory)
        )
    }

    /// Composite score used for preemption ordering: `priority * 1000`,
    /// plus 500 for exclusive access, plus 200 for synchronized access,
    /// plus 100 for DMA capability.
    #[must_use]
    pub const fn calculate_priority_score(priority: Priority, flags: ResourceFlags) -> u32 {
        let mut score = (priority as u32) * 1000;
        if flags.contains(ResourceFlags::EXCLUSIVE) {
            score += 500;
        }
        if flags.contains(ResourceFlags::SYNCHRONIZED) {
            score += 200;
        }
        if flags.contains(ResourceFlags::DMA_CAPABLE) {
            score += 100;
        }
        score
    }

    /// True if a resource with this metadata requires cross-thread
    /// synchronization to access safely: the `Synchronized` flag is set,
    /// access is `ReadWrite`, or priority is `High` or above.
    #[must_use]
    pub const fn requires_synchronization(metadata: &ResourceMetadata) -> bool {
        metadata.flags.contains(ResourceFlags::SYNCHRONIZED)
            || matches!(metadata.access_pattern, AccessPattern::ReadWrite)
            || (metadata.priority as u32) >= (Priority::High as u32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_and_hardware_are_cross_compatible() {
        assert!(resource_utils::are_types_compatible(
            ResourceType::Memory,
            ResourceType::Hardware
        ));
        assert!(!resource_utils::are_types_compatible(
            ResourceType::Memory,
            ResourceType::Platform
        ));
    }

    #[test]
    fn priority_score_adds_flag_bonuses() {
        let flags = ResourceFlags::EXCLUSIVE | ResourceFlags::SYNCHRONIZED;
        let score = resource_utils::calculate_priority_score(Priority::High, flags);
        assert_eq!(score, 2000 + 500 + 200);
    }

    #[test]
    fn synchronization_required_for_read_write_or_high_priority() {
        let mut meta = ResourceMetadata { access_pattern: AccessPattern::ReadOnly, ..Default::default() };
        assert!(!resource_utils::requires_synchronization(&meta));
        meta.access_pattern = AccessPattern::ReadWrite;
        assert!(resource_utils::requires_synchronization(&meta));
        meta.access_pattern = AccessPattern::ReadOnly;
        meta.priority = Priority::Critical;
        assert!(resource_utils::requires_synchronization(&meta));
    }

    #[test]
    fn handle_equality_is_by_id_only() {
        let a = ResourceHandle {
            id: 7,
            version: 0,
            name: String::from("a"),
            metadata: ResourceMetadata::default(),
        };
        let b = ResourceHandle { id: 7, version: 3, name: String::from("b"), metadata: ResourceMetadata::default() };
        assert_eq!(a, b);
        assert!(!ResourceHandle { id: 0, ..a.clone() }.is_valid());
    }
}
