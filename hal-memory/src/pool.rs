// HAL - hal-memory
// Module: fixed-block free-list pool allocator
//
// Copyright (c) 2025 The Flight HAL Project Developers
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! A single fixed-block pool with an intrusive free list (spec §4.3, C5).
//!
//! Blocks are identified by [`PoolHandle`], an index into the pool's backing
//! buffer, never a raw pointer (spec §9's redesign note): the free-list
//! header that would be `reinterpret_cast` onto the block in the original
//! source is instead two little-endian `u32`s read out of the block's first
//! eight bytes with ordinary slice indexing.

use alloc::vec;
use alloc::vec::Vec;

use hal_error::{Error, Result};

const HEADER_SIZE: usize = 8;
const FREE_MAGIC: u32 = 0xFEED_FACE;
const USED_MAGIC: u32 = 0xDEAD_BEEF;

/// Shape of one fixed-block pool (spec §4.2).
///
/// Invariant: `block_size * block_count <= total_size` and
/// `block_size >= 8` (the free-list header). `block_size` is rounded up to
/// the next multiple of 8 by [`PoolAllocator::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolConfig {
    /// Total backing size in bytes.
    pub total_size: usize,
    /// Usable size of each block, before header rounding.
    pub block_size: usize,
    /// Number of blocks.
    pub block_count: u32,
}

/// A handle to one allocated block. Opaque outside this crate except for
/// equality/debug — callers pass it back to `pool_free`/`block_data[_mut]`
/// verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolHandle {
    index: u32,
}

/// Point-in-time statistics for one pool (spec §2 supplement, `PoolStats`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PoolStats {
    /// Total backing size in bytes.
    pub total_size: usize,
    /// Bytes currently allocated.
    pub used_size: usize,
    /// Bytes currently free.
    pub free_size: usize,
    /// Usable size of one block.
    pub block_size: usize,
    /// Total number of blocks.
    pub total_blocks: u32,
    /// Blocks currently allocated.
    pub used_blocks: u32,
    /// Blocks currently free.
    pub free_blocks: u32,
    /// High-water mark of `used_blocks` since creation.
    pub peak_used_blocks: u32,
    /// Lifetime count of successful allocations.
    pub allocation_count: u64,
    /// Lifetime count of successful deallocations.
    pub deallocation_count: u64,
}

/// A single fixed-block pool with a free list threaded through unused
/// blocks.
///
/// Not thread-safe on its own (spec §4.3): callers needing concurrent
/// access serialize through [`crate::manager::MemoryManager`]'s mutex.
pub struct PoolAllocator {
    storage: Vec<u8>,
    block_size: usize,
    block_count: u32,
    free_head: u32,
    used_blocks: u32,
    peak_used_blocks: u32,
    allocation_count: u64,
    deallocation_count: u64,
}

impl PoolAllocator {
    /// Build a pool from `config`, initializing every block as free.
    ///
    /// Fails with `invalid_parameter` if the rounded block size cannot hold
    /// the free-list header, or if `block_size * block_count` would overflow
    /// `total_size`.
    pub fn new(config: PoolConfig) -> Result<Self> {
        let block_size = round_up_8(config.block_size.max(HEADER_SIZE));
        if config.block_count == 0 {
            return Err(Error::invalid_parameter().with_context("pool block_count is zero"));
        }
        let needed = block_size
            .checked_mul(config.block_count as usize)
            .ok_or_else(|| Error::invalid_parameter().with_context("pool size overflow"))?;
        if needed > config.total_size {
            return Err(Error::invalid_parameter()
                .with_context("block_size * block_count exceeds total_size"));
        }

        let mut storage = vec![0u8; needed];
        for i in 0..config.block_count {
            let next_free = if i + 1 == config.block_count { config.block_count } else { i + 1 };
            write_header(&mut storage, block_size, i, next_free, FREE_MAGIC);
        }

        Ok(Self {
            storage,
            block_size,
            block_count: config.block_count,
            free_head: 0,
            used_blocks: 0,
            peak_used_blocks: 0,
            allocation_count: 0,
            deallocation_count: 0,
        })
    }

    /// Usable bytes per block, i.e. block size minus the free-list header.
    #[must_use]
    pub const fn usable_block_size(&self) -> usize {
        self.block_size - HEADER_SIZE
    }

    /// Allocate one block. Fails with `out_of_memory` if the free list is
    /// exhausted, `internal_error` if the free list is corrupted.
    pub fn allocate(&mut self) -> Result<PoolHandle> {
        if self.free_head >= self.block_count {
            #[cfg(feature = "std")]
            log::warn!("pool exhausted: {} blocks in use", self.used_blocks);
            return Err(Error::out_of_memory().with_context("pool exhausted"));
        }

        let index = self.free_head;
        let (next_free, magic) = read_header(&self.storage, self.block_size, index);
        if magic != FREE_MAGIC {
            return Err(Error::internal_error().with_context("free list corruption"));
        }

        self.free_head = next_free;
        write_header(&mut self.storage, self.block_size, index, 0, USED_MAGIC);
        self.used_blocks += 1;
        self.peak_used_blocks = self.peak_used_blocks.max(self.used_blocks);
        self.allocation_count += 1;
        Ok(PoolHandle { index })
    }

    /// Return a block to the pool. Fails with `invalid_parameter` if
    /// `handle` is out of range or not currently allocated (double free).
    pub fn deallocate(&mut self, handle: PoolHandle) -> Result<()> {
        if handle.index >= self.block_count {
            return Err(Error::invalid_parameter().with_context("pool handle out of range"));
        }
        let (_, magic) = read_header(&self.storage, self.block_size, handle.index);
        if magic != USED_MAGIC {
            return Err(Error::invalid_parameter().with_context("double free or corrupt block"));
        }

        write_header(&mut self.storage, self.block_size, handle.index, self.free_head, FREE_MAGIC);
        self.free_head = handle.index;
        self.used_blocks -= 1;
        self.deallocation_count += 1;
        Ok(())
    }

    /// Read-only view of an allocated block's payload.
    pub fn block_data(&self, handle: PoolHandle) -> Result<&[u8]> {
        self.validate_allocated(handle)?;
        let start = handle.index as usize * self.block_size + HEADER_SIZE;
        Ok(&self.storage[start..start + self.usable_block_size()])
    }

    /// Mutable view of an allocated block's payload.
    pub fn block_data_mut(&mut self, handle: PoolHandle) -> Result<&mut [u8]> {
        self.validate_allocated(handle)?;
        let block_size = self.block_size;
        let usable = self.usable_block_size();
        let start = handle.index as usize * block_size + HEADER_SIZE;
        Ok(&mut self.storage[start..start + usable])
    }

    fn validate_allocated(&self, handle: PoolHandle) -> Result<()> {
        if handle.index >= self.block_count {
            return Err(Error::invalid_parameter().with_context("pool handle out of range"));
        }
        let (_, magic) = read_header(&self.storage, self.block_size, handle.index);
        if magic != USED_MAGIC {
            return Err(Error::invalid_parameter().with_context("handle is not allocated"));
        }
        Ok(())
    }

    /// Snapshot statistics for this pool.
    #[must_use]
    pub fn stats(&self) -> PoolStats {
        PoolStats {
            total_size: self.storage.len(),
            used_size: self.used_blocks as usize * self.block_size,
            free_size: (self.block_count - self.used_blocks) as usize * self.block_size,
            block_size: self.usable_block_size(),
            total_blocks: self.block_count,
            used_blocks: self.used_blocks,
            free_blocks: self.block_count - self.used_blocks,
            peak_used_blocks: self.peak_used_blocks,
            allocation_count: self.allocation_count,
            deallocation_count: self.deallocation_count,
        }
    }

    /// Walk the free list and confirm it is internally consistent: every
    /// entry carries the free magic, and free-plus-used accounts for every
    /// block exactly once.
    #[must_use]
    pub fn validate(&self) -> bool {
        let mut seen = 0u32;
        let mut current = self.free_head;
        while current < self.block_count && seen < self.block_count {
            let (next, magic) = read_header(&self.storage, self.block_size, current);
            if magic != FREE_MAGIC {
                return false;
            }
            current = next;
            seen += 1;
        }
        seen + self.used_blocks == self.block_count
    }
}

const fn round_up_8(size: usize) -> usize {
    (size + 7) & !7
}

fn write_header(storage: &mut [u8], block_size: usize, index: u32, next_free: u32, magic: u32) {
    let base = index as usize * block_size;
    storage[base..base + 4].copy_from_slice(&next_free.to_le_bytes());
    storage[base + 4..base + 8].copy_from_slice(&magic.to_le_bytes());
}

fn read_header(storage: &[u8], block_size: usize, index: u32) -> (u32, u32) {
    let base = index as usize * block_size;
    let next_free = u32::from_le_bytes(storage[base..base + 4].try_into().unwrap());
    let magic = u32::from_le_bytes(storage[base + 4..base + 8].try_into().unwrap());
    (next_free, magic)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_config() -> PoolConfig {
        PoolConfig { total_size: 4 * 16, block_size: 16, block_count: 4 }
    }

    #[test]
    fn allocate_then_free_round_trips() {
        let mut pool = PoolAllocator::new(small_config()).unwrap();
        let a = pool.allocate().unwrap();
        let b = pool.allocate().unwrap();
        assert_ne!(a, b);
        assert_eq!(pool.stats().used_blocks, 2);

        pool.deallocate(a).unwrap();
        assert_eq!(pool.stats().used_blocks, 1);
        assert!(pool.validate());
    }

    #[test]
    fn exhaustion_returns_out_of_memory() {
        let mut pool = PoolAllocator::new(small_config()).unwrap();
        for _ in 0..4 {
            pool.allocate().unwrap();
        }
        assert_eq!(pool.allocate().unwrap_err(), Error::out_of_memory());
    }

    #[test]
    fn double_free_is_rejected() {
        let mut pool = PoolAllocator::new(small_config()).unwrap();
        let handle = pool.allocate().unwrap();
        pool.deallocate(handle).unwrap();
        assert!(pool.deallocate(handle).is_err());
    }

    #[test]
    fn block_data_round_trips_bytes() {
        let mut pool = PoolAllocator::new(small_config()).unwrap();
        let handle = pool.allocate().unwrap();
        assert_eq!(pool.usable_block_size(), 8);
        pool.block_data_mut(handle).unwrap().copy_from_slice(&[0xAB; 8]);
        assert_eq!(pool.block_data(handle).unwrap(), &[0xAB; 8]);
    }

    #[test]
    fn peak_used_blocks_tracks_high_water_mark() {
        let mut pool = PoolAllocator::new(small_config()).unwrap();
        let a = pool.allocate().unwrap();
        let _b = pool.allocate().unwrap();
        pool.deallocate(a).unwrap();
        assert_eq!(pool.stats().peak_used_blocks, 2);
        assert_eq!(pool.stats().used_blocks, 1);
    }
}
