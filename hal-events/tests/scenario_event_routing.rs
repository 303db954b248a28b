//! A publisher broadcasts driver events over the bus; two subscribers with
//! different filters each see only the events they asked for.

use std::sync::{Arc, Mutex};

use hal_coordination::{Message, MessageBus, MessageHeader, MessageKind, MessagePriority, BROADCAST_RECIPIENT};
use hal_events::{by_priority_at_least, by_sender_prefix, EventRouter};

fn event(sender_id: &str, priority: MessagePriority) -> Message {
    let header = MessageHeader {
        kind: MessageKind::Event,
        sender_id: sender_id.to_string(),
        recipient_id: String::from(BROADCAST_RECIPIENT),
        priority,
        ..Default::default()
    };
    Message::new(header, None)
}

#[test]
fn independent_subscribers_see_only_matching_events() {
    let bus = MessageBus::new();
    let router = EventRouter::new();

    let video_events = Arc::new(Mutex::new(Vec::new()));
    let sink = video_events.clone();
    router.subscribe(by_sender_prefix("video."), Box::new(move |m| sink.lock().unwrap().push(m.header.sender_id.clone())));

    let critical_events = Arc::new(Mutex::new(0u32));
    let sink = critical_events.clone();
    router.subscribe(by_priority_at_least(MessagePriority::Critical), Box::new(move |_| *sink.lock().unwrap() += 1));

    bus.register_handler(Box::new(router)).unwrap();

    bus.send_message(event("video.frame", MessagePriority::Normal), 0).unwrap();
    bus.send_message(event("audio.underrun", MessagePriority::Critical), 0).unwrap();
    bus.send_message(event("video.frame", MessagePriority::Critical), 0).unwrap();
    bus.process_all(0);

    assert_eq!(*video_events.lock().unwrap(), vec!["video.frame".to_string(), "video.frame".to_string()]);
    assert_eq!(*critical_events.lock().unwrap(), 2);
}
