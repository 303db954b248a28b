//! `hal-memory` with `--no-default-features --features no_std` must still
//! allocate and free pool blocks; only its `std`-gated logging is absent.

use hal_memory::{MemoryConfig, MemoryManager, PoolConfig, PoolType};

fn tiny_config() -> MemoryConfig {
    MemoryConfig {
        total_memory: 2048,
        component_budget: 512,
        runtime_budget: 256,
        asset_budget: 256,
        system_reserved: 0,
        small_pool: PoolConfig { total_size: 256, block_size: 16, block_count: 16 },
        medium_pool: PoolConfig { total_size: 512, block_size: 64, block_count: 8 },
        large_pool: PoolConfig { total_size: 512, block_size: 128, block_count: 4 },
        canonical_pool: PoolConfig { total_size: 256, block_size: 32, block_count: 8 },
    }
}

#[test]
fn pool_alloc_and_free_work_without_std() {
    let manager = MemoryManager::new(tiny_config()).unwrap();
    let handle = manager.pool_alloc(PoolType::MediumObjects, 32).unwrap();
    manager.pool_free(PoolType::MediumObjects, handle).unwrap();
    assert!(manager.validate_pools());
}
