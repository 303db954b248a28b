// HAL - hal-coordination
// Module: process-wide resource registry
//
// Copyright (c) 2025 The Flight HAL Project Developers
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! [`ResourceRegistry`]: name/id/type lookup for [`ResourceHandle`]s
//! (spec §4.5 C7).

use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;

use hal_error::{Error, Result};
use hal_sync::Mutex;

use crate::resource::{ResourceHandle, ResourceMetadata, ResourceType};

struct Inner {
    next_id: u64,
    by_id: BTreeMap<u64, ResourceHandle>,
    by_name: BTreeMap<String, u64>,
    by_type: BTreeMap<ResourceType, Vec<u64>>,
}

/// Process-wide mapping from name/id/type to [`ResourceHandle`] (spec §4.5).
///
/// `id`s are allocated from a monotonic counter and never reused. Every
/// registered id is present in exactly one `by_name` entry and one
/// `by_type` bucket — [`ResourceRegistry::unregister_resource`] keeps all
/// three maps consistent.
pub struct ResourceRegistry {
    inner: Mutex<Inner>,
}

impl Default for ResourceRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ResourceRegistry {
    /// Build an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                next_id: 1,
                by_id: BTreeMap::new(),
                by_name: BTreeMap::new(),
                by_type: BTreeMap::new(),
            }),
        }
    }

    /// Register a new resource, returning its allocated handle.
    ///
    /// Fails with `configuration_missing` if `name` is already registered.
    pub fn register_resource(&self, name: &str, metadata: ResourceMetadata) -> Result<ResourceHandle> {
        let mut inner = self.inner.lock();
        if inner.by_name.contains_key(name) {
            return Err(Error::configuration_missing().with_context("resource name already registered"));
        }

        let id = inner.next_id;
        inner.next_id += 1;

        let handle = ResourceHandle { id, version: 0, name: String::from(name), metadata };
        inner.by_name.insert(String::from(name), id);
        inner.by_type.entry(metadata.resource_type).or_default().push(id);
        inner.by_id.insert(id, handle.clone());
        Ok(handle)
    }

    /// Remove a resource by id. Fails with `configuration_missing` if the
    /// id is not registered.
    pub fn unregister_resource(&self, id: u64) -> Result<()> {
        let mut inner = self.inner.lock();
        let handle = inner
            .by_id
            .remove(&id)
            .ok_or_else(|| Error::configuration_missing().with_context("resource id not registered"))?;
        inner.by_name.remove(&handle.name);
        if let Some(bucket) = inner.by_type.get_mut(&handle.metadata.resource_type) {
            bucket.retain(|&bucket_id| bucket_id != id);
        }
        Ok(())
    }

    /// Look up a resource by name.
    #[must_use]
    pub fn find_resource(&self, name: &str) -> Option<ResourceHandle> {
        let inner = self.inner.lock();
        let id = *inner.by_name.get(name)?;
        inner.by_id.get(&id).cloned()
    }

    /// Look up a resource by id.
    #[must_use]
    pub fn find_by_id(&self, id: u64) -> Option<ResourceHandle> {
        self.inner.lock().by_id.get(&id).cloned()
    }

    /// All resources currently registered with the given type.
    #[must_use]
    pub fn resources_by_type(&self, resource_type: ResourceType) -> Vec<ResourceHandle> {
        let inner = self.inner.lock();
        inner
            .by_type
            .get(&resource_type)
            .into_iter()
            .flatten()
            .filter_map(|id| inner.by_id.get(id).cloned())
            .collect()
    }

    /// Current metadata for a resource, if it is still registered.
    #[must_use]
    pub fn get_metadata(&self, id: u64) -> Option<ResourceMetadata> {
        self.inner.lock().by_id.get(&id).map(|h| h.metadata)
    }

    /// Replace a resource's metadata and bump its version. Moves the id to
    /// a new type bucket if `metadata.resource_type` changed.
    pub fn update_metadata(&self, id: u64, metadata: ResourceMetadata) -> Result<()> {
        let mut inner = self.inner.lock();
        let old_type = {
            let handle = inner
                .by_id
                .get_mut(&id)
                .ok_or_else(|| Error::configuration_missing().with_context("resource id not registered"))?;
            let old_type = handle.metadata.resource_type;
            handle.metadata = metadata;
            handle.version += 1;
            old_type
        };
        if old_type != metadata.resource_type {
            if let Some(bucket) = inner.by_type.get_mut(&old_type) {
                bucket.retain(|&bucket_id| bucket_id != id);
            }
            inner.by_type.entry(metadata.resource_type).or_default().push(id);
        }
        Ok(())
    }

    /// Number of resources currently registered.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.lock().by_id.len()
    }

    /// True iff no resources are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Remove every registered resource.
    pub fn clear(&self) {
        let mut inner = self.inner.lock();
        inner.by_id.clear();
        inner.by_name.clear();
        inner.by_type.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::AccessPattern;

    fn meta(resource_type: ResourceType) -> ResourceMetadata {
        ResourceMetadata { resource_type, access_pattern: AccessPattern::ReadWrite, ..Default::default() }
    }

    #[test]
    fn ids_are_never_reused() {
        let registry = ResourceRegistry::new();
        let a = registry.register_resource("a", meta(ResourceType::Memory)).unwrap();
        registry.unregister_resource(a.id()).unwrap();
        let b = registry.register_resource("a", meta(ResourceType::Memory)).unwrap();
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn duplicate_name_is_rejected() {
        let registry = ResourceRegistry::new();
        registry.register_resource("dup", meta(ResourceType::Hardware)).unwrap();
        assert!(registry.register_resource("dup", meta(ResourceType::Hardware)).is_err());
    }

    #[test]
    fn type_bucket_follows_metadata_updates() {
        let registry = ResourceRegistry::new();
        let handle = registry.register_resource("gpu", meta(ResourceType::Hardware)).unwrap();
        assert_eq!(registry.resources_by_type(ResourceType::Hardware).len(), 1);

        registry.update_metadata(handle.id(), meta(ResourceType::Platform)).unwrap();
        assert_eq!(registry.resources_by_type(ResourceType::Hardware).len(), 0);
        assert_eq!(registry.resources_by_type(ResourceType::Platform).len(), 1);
        assert_eq!(registry.find_by_id(handle.id()).unwrap().version(), 1);
    }

    #[test]
    fn unregister_cleans_every_map() {
        let registry = ResourceRegistry::new();
        let handle = registry.register_resource("tmp", meta(ResourceType::Memory)).unwrap();
        registry.unregister_resource(handle.id()).unwrap();
        assert!(registry.find_resource("tmp").is_none());
        assert!(registry.find_by_id(handle.id()).is_none());
        assert!(registry.resources_by_type(ResourceType::Memory).is_empty());
        assert!(registry.is_empty());
    }
}
