//! Scenario S1 (spec §8): a driver carves a component region, allocates and
//! frees pool blocks repeatedly, and the manager's accounting stays
//! consistent throughout.

use hal_memory::{MemoryManager, PoolType};
use hal_platform::PlatformTag;

#[test]
fn pool_and_component_region_lifecycle_is_consistent() {
    let manager = MemoryManager::for_platform(PlatformTag::Desktop).unwrap();
    let total = manager.total_memory();
    assert_eq!(manager.used_memory(), 0);
    assert_eq!(manager.free_memory(), total);

    let region = manager.allocate_component_region(1, 4096, 4096).unwrap();
    assert_eq!(region.size, 8192);

    let mut handles = Vec::new();
    for _ in 0..32 {
        handles.push(manager.pool_alloc(PoolType::SmallObjects, 16).unwrap());
    }
    assert!(manager.validate_pools());

    for handle in handles {
        manager.pool_free(PoolType::SmallObjects, handle).unwrap();
    }
    assert!(manager.validate_pools());

    manager.free_component_region(1);
    assert_eq!(manager.used_memory(), 0);
    assert_eq!(manager.free_memory(), total);
}

#[test]
fn every_platform_preset_builds_a_valid_manager() {
    for tag in [
        PlatformTag::Dreamcast,
        PlatformTag::Psp,
        PlatformTag::Vita,
        PlatformTag::Web,
        PlatformTag::Desktop,
    ] {
        let manager = MemoryManager::for_platform(tag).unwrap();
        assert!(manager.validate_pools());
    }
}
