//! `hal-coordination` with `--no-default-features --features no_std` must
//! still register resources, acquire/release locks, and route messages.

use hal_coordination::{
    AccessPattern, DeadlockEngine, Message, MessageBus, MessageHeader, MessagePriority, Priority, ResourceFlags,
    ResourceLock, ResourceMetadata, ResourceRegistry, ResourceType,
};

#[test]
fn registry_and_lock_round_trip_without_std() {
    let registry = ResourceRegistry::new();
    let meta = ResourceMetadata {
        resource_type: ResourceType::Memory,
        access_pattern: AccessPattern::ReadWrite,
        priority: Priority::Normal,
        flags: ResourceFlags::EXCLUSIVE,
        ..Default::default()
    };
    let handle = registry.register_resource("pool-0", meta).unwrap();

    let engine = DeadlockEngine::new();
    engine.describe_resource(handle.id(), ResourceType::Memory, Priority::Normal, ResourceFlags::EXCLUSIVE);
    let lock = ResourceLock::acquire(&engine, "driver-a", handle.id(), ResourceType::Memory, Priority::Normal, 5000, true, 0);
    assert!(lock.is_locked());
}

#[test]
fn bus_delivers_a_notification_without_std() {
    let bus = MessageBus::new();
    let header = MessageHeader { recipient_id: String::from("*"), ..Default::default() };
    bus.send_message(Message::new(header, None), 0).unwrap();
    assert_eq!(bus.process_all(0), 1);
}
