// HAL - hal-memory
// Module: memory manager facade over pools and component regions
//
// Copyright (c) 2025 The Flight HAL Project Developers
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! [`MemoryManager`]: the single entry point drivers use for pool and
//! component-region allocation (spec §4.4, C6).

use alloc::boxed::Box;

use hal_error::{Error, Result};
use hal_sync::Mutex;

use crate::pool::{PoolAllocator, PoolConfig, PoolHandle, PoolStats};
use crate::region::{MemoryRegion, RegionArena};

/// The seven named memory pools (spec §3 `MemoryConfig`).
///
/// Only [`PoolType::SmallObjects`], [`PoolType::MediumObjects`],
/// [`PoolType::LargeObjects`], and [`PoolType::CanonicalMemory`] are backed
/// by a [`PoolAllocator`] — the original source's `MemoryConfig` never gives
/// `ComponentMemory`/`AssetMemory`/`SystemMemory` a block shape, only a
/// budget. `pool_alloc`/`pool_free` on those three fail with
/// `invalid_parameter`; `ComponentMemory` is reachable through
/// [`MemoryManager::allocate_component_region`] instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PoolType {
    /// 16-64 byte allocations.
    SmallObjects,
    /// 128-512 byte allocations.
    MediumObjects,
    /// 1-4 KiB allocations.
    LargeObjects,
    /// Component heap/stack allocations — see [`MemoryManager::allocate_component_region`].
    ComponentMemory,
    /// Component Model canonical-ABI conversions.
    CanonicalMemory,
    /// Texture/sound/model data.
    AssetMemory,
    /// HAL-internal bookkeeping.
    SystemMemory,
}

/// Platform memory configuration (spec §3 `MemoryConfig`).
#[derive(Debug, Clone, Copy)]
pub struct MemoryConfig {
    /// Total memory budget for the HAL on this platform.
    pub total_memory: usize,
    /// Budget reserved for component heaps/stacks.
    pub component_budget: usize,
    /// Budget reserved for the runtime itself.
    pub runtime_budget: usize,
    /// Budget reserved for asset data.
    pub asset_budget: usize,
    /// Budget reserved and never handed out.
    pub system_reserved: usize,
    /// `SmallObjects` pool shape.
    pub small_pool: PoolConfig,
    /// `MediumObjects` pool shape.
    pub medium_pool: PoolConfig,
    /// `LargeObjects` pool shape.
    pub large_pool: PoolConfig,
    /// `CanonicalMemory` pool shape.
    pub canonical_pool: PoolConfig,
}

impl From<hal_platform::presets::MemoryPreset> for MemoryConfig {
    fn from(preset: hal_platform::presets::MemoryPreset) -> Self {
        let to_pool = |p: hal_platform::presets::PoolConfig| PoolConfig {
            total_size: p.total_size,
            block_size: p.block_size,
            block_count: p.block_count,
        };
        Self {
            total_memory: preset.total_size,
            component_budget: preset.component_budget,
            runtime_budget: preset.runtime_budget,
            asset_budget: preset.asset_budget,
            system_reserved: preset.system_reserved,
            small_pool: to_pool(preset.small),
            medium_pool: to_pool(preset.medium),
            large_pool: to_pool(preset.large),
            canonical_pool: to_pool(preset.canonical),
        }
    }
}

struct State {
    small: PoolAllocator,
    medium: PoolAllocator,
    large: PoolAllocator,
    canonical: PoolAllocator,
    component_region: RegionArena,
    asset_used: usize,
    asset_budget: usize,
    system_reserved: usize,
    oom_hook: Option<Box<dyn FnMut() + Send>>,
}

/// Owns every pool and region arena for one platform instance, serializing
/// access behind a single mutex (spec §4.4: "MemoryManager serialises with
/// one mutex covering all pools").
pub struct MemoryManager {
    inner: Mutex<State>,
    total_memory: usize,
}

impl MemoryManager {
    /// Create pools and arenas from `config`. Fails with
    /// `configuration_missing` if any pool's shape is invalid.
    pub fn new(config: MemoryConfig) -> Result<Self> {
        let build = |cfg: PoolConfig| {
            PoolAllocator::new(cfg).map_err(|e| e.with_context("init_pools"))
        };
        let state = State {
            small: build(config.small_pool)?,
            medium: build(config.medium_pool)?,
            large: build(config.large_pool)?,
            canonical: build(config.canonical_pool)?,
            component_region: RegionArena::new(config.component_budget),
            asset_used: 0,
            asset_budget: config.asset_budget,
            system_reserved: config.system_reserved,
            oom_hook: None,
        };
        Ok(Self { inner: Mutex::new(state), total_memory: config.total_memory })
    }

    /// Build a manager sized from this platform's fixed preset (spec §6).
    pub fn for_platform(tag: hal_platform::PlatformTag) -> Result<Self> {
        Self::new(hal_platform::presets::memory_preset(tag).into())
    }

    fn pool_mut<'s>(state: &'s mut State, pool: PoolType) -> Result<&'s mut PoolAllocator> {
        match pool {
            PoolType::SmallObjects => Ok(&mut state.small),
            PoolType::MediumObjects => Ok(&mut state.medium),
            PoolType::LargeObjects => Ok(&mut state.large),
            PoolType::CanonicalMemory => Ok(&mut state.canonical),
            PoolType::ComponentMemory | PoolType::AssetMemory | PoolType::SystemMemory => {
                Err(Error::invalid_parameter().with_context("pool has no fixed-block backing"))
            }
        }
    }

    /// Allocate one block from `pool`. Fails with `invalid_parameter` if
    /// `pool` has no fixed-block backing or `size` exceeds the pool's usable
    /// block size.
    pub fn pool_alloc(&self, pool: PoolType, size: usize) -> Result<PoolHandle> {
        let mut state = self.inner.lock();
        let allocator = Self::pool_mut(&mut state, pool)?;
        if size > allocator.usable_block_size() {
            return Err(Error::invalid_parameter().with_context("size exceeds pool block size"));
        }
        allocator.allocate()
    }

    /// Allocate one block from `pool`, honoring `alignment`.
    ///
    /// Handles are index-based rather than raw pointers, so physical
    /// alignment is the backing buffer's concern, not the caller's; this
    /// still enforces `alignment <= 8` (the header/block rounding) so a
    /// caller that later reads the bytes through a typed view is not
    /// surprised by a request this pool could never satisfy.
    pub fn pool_alloc_aligned(
        &self,
        pool: PoolType,
        size: usize,
        alignment: usize,
    ) -> Result<PoolHandle> {
        if alignment > 8 {
            return Err(Error::invalid_parameter().with_context("alignment exceeds pool alignment"));
        }
        self.pool_alloc(pool, size)
    }

    /// Return a block to `pool`.
    pub fn pool_free(&self, pool: PoolType, handle: PoolHandle) -> Result<()> {
        let mut state = self.inner.lock();
        let allocator = Self::pool_mut(&mut state, pool)?;
        allocator.deallocate(handle)
    }

    /// Read an allocated block's payload through `f`, avoiding returning a
    /// borrow that would outlive the manager's internal lock.
    pub fn with_block<R>(
        &self,
        pool: PoolType,
        handle: PoolHandle,
        f: impl FnOnce(&[u8]) -> R,
    ) -> Result<R> {
        let state = self.inner.lock();
        let allocator = match pool {
            PoolType::SmallObjects => &state.small,
            PoolType::MediumObjects => &state.medium,
            PoolType::LargeObjects => &state.large,
            PoolType::CanonicalMemory => &state.canonical,
            _ => return Err(Error::invalid_parameter().with_context("pool has no fixed-block backing")),
        };
        allocator.block_data(handle).map(f)
    }

    /// Mutate an allocated block's payload through `f`.
    pub fn with_block_mut<R>(
        &self,
        pool: PoolType,
        handle: PoolHandle,
        f: impl FnOnce(&mut [u8]) -> R,
    ) -> Result<R> {
        let mut state = self.inner.lock();
        let allocator = Self::pool_mut(&mut state, pool)?;
        allocator.block_data_mut(handle).map(f)
    }

    /// Snapshot statistics for `pool`.
    pub fn pool_stats(&self, pool: PoolType) -> Result<PoolStats> {
        let mut state = self.inner.lock();
        Self::pool_mut(&mut state, pool).map(|p| p.stats())
    }

    /// Carve or retrieve the `ComponentMemory` region owned by
    /// `component_id`.
    pub fn allocate_component_region(
        &self,
        component_id: u32,
        heap_size: usize,
        stack_size: usize,
    ) -> Result<MemoryRegion> {
        let mut state = self.inner.lock();
        state.component_region.allocate(component_id, heap_size, stack_size, "component")
    }

    /// Release the `ComponentMemory` region owned by `component_id`.
    pub fn free_component_region(&self, component_id: u32) {
        let mut state = self.inner.lock();
        state.component_region.free(component_id);
    }

    /// Reserve `size` bytes from the asset budget, returning the region
    /// offset within that budget. There is no free-list here: assets are
    /// expected to be released as a batch by platform integration code, not
    /// individually, matching `AssetMemory` having no `PoolConfig` in the
    /// original source.
    pub fn reserve_asset_bytes(&self, size: usize) -> Result<usize> {
        let mut state = self.inner.lock();
        if state.asset_used + size > state.asset_budget {
            return Err(Error::out_of_memory().with_context("asset budget exhausted"));
        }
        let offset = state.asset_used;
        state.asset_used += size;
        Ok(offset)
    }

    /// Total memory budget for this platform.
    #[must_use]
    pub const fn total_memory(&self) -> usize {
        self.total_memory
    }

    /// Bytes currently allocated across every pool and the component/asset
    /// arenas (not counting `system_reserved`, which is never handed out).
    #[must_use]
    pub fn used_memory(&self) -> usize {
        let state = self.inner.lock();
        state.small.stats().used_size
            + state.medium.stats().used_size
            + state.large.stats().used_size
            + state.canonical.stats().used_size
            + state.component_region.used()
            + state.asset_used
    }

    /// `total_memory() - used_memory() - system_reserved`.
    #[must_use]
    pub fn free_memory(&self) -> usize {
        let reserved = self.inner.lock().system_reserved;
        self.total_memory.saturating_sub(self.used_memory()).saturating_sub(reserved)
    }

    /// Walk every fixed-block pool's free list and confirm it is
    /// internally consistent.
    #[must_use]
    pub fn validate_pools(&self) -> bool {
        let state = self.inner.lock();
        state.small.validate()
            && state.medium.validate()
            && state.large.validate()
            && state.canonical.validate()
    }

    /// Install a callback invoked by [`MemoryManager::on_memory_pressure`].
    pub fn set_oom_handler(&self, handler: impl FnMut() + Send + 'static) {
        self.inner.lock().oom_hook = Some(Box::new(handler));
    }

    /// Notify the manager that the host is low on memory.
    ///
    /// Policy is to evict nothing on its own (spec §4.4): this only invokes
    /// the caller-supplied OOM hook, if any, so upper layers can free their
    /// own caches.
    pub fn on_memory_pressure(&self) {
        #[cfg(feature = "std")]
        log::warn!("memory pressure signaled, used={}", self.used_memory());
        let mut state = self.inner.lock();
        if let Some(hook) = state.oom_hook.as_mut() {
            hook();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tiny_config() -> MemoryConfig {
        MemoryConfig {
            total_memory: 4096,
            component_budget: 1024,
            runtime_budget: 512,
            asset_budget: 512,
            system_reserved: 0,
            small_pool: PoolConfig { total_size: 256, block_size: 16, block_count: 16 },
            medium_pool: PoolConfig { total_size: 512, block_size: 64, block_count: 8 },
            large_pool: PoolConfig { total_size: 1024, block_size: 256, block_count: 4 },
            canonical_pool: PoolConfig { total_size: 256, block_size: 32, block_count: 8 },
        }
    }

    #[test]
    fn pool_alloc_rejects_unconfigured_pool_types() {
        let manager = MemoryManager::new(tiny_config()).unwrap();
        assert!(manager.pool_alloc(PoolType::AssetMemory, 16).is_err());
        assert!(manager.pool_alloc(PoolType::SystemMemory, 16).is_err());
    }

    #[test]
    fn pool_alloc_rejects_oversized_request() {
        let manager = MemoryManager::new(tiny_config()).unwrap();
        assert!(manager.pool_alloc(PoolType::SmallObjects, 9999).is_err());
    }

    #[test]
    fn component_region_is_idempotent_and_frees() {
        let manager = MemoryManager::new(tiny_config()).unwrap();
        let first = manager.allocate_component_region(7, 64, 64).unwrap();
        let second = manager.allocate_component_region(7, 64, 64).unwrap();
        assert_eq!(first, second);
        manager.free_component_region(7);
        assert_eq!(manager.used_memory(), 0);
    }

    #[test]
    fn on_memory_pressure_invokes_the_installed_hook() {
        use core::sync::atomic::{AtomicBool, Ordering};
        use alloc::sync::Arc;

        let manager = MemoryManager::new(tiny_config()).unwrap();
        let called = Arc::new(AtomicBool::new(false));
        let called_in_hook = called.clone();
        manager.set_oom_handler(move || called_in_hook.store(true, Ordering::SeqCst));
        manager.on_memory_pressure();
        assert!(called.load(Ordering::SeqCst));
    }

    #[test]
    fn used_and_free_memory_track_allocations() {
        let manager = MemoryManager::new(tiny_config()).unwrap();
        let before = manager.free_memory();
        let handle = manager.pool_alloc(PoolType::SmallObjects, 4).unwrap();
        assert!(manager.free_memory() < before);
        manager.pool_free(PoolType::SmallObjects, handle).unwrap();
        assert_eq!(manager.free_memory(), before);
    }
}
