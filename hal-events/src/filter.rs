// HAL - hal-events
// Module: subscription filters
//
// Copyright (c) 2025 The Flight HAL Project Developers
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Predicate constructors for [`crate::router::EventRouter::subscribe`].
//!
//! A filter is just `Fn(&Message) -> bool`; these are convenience
//! constructors for the common cases rather than the only way to build one.

use alloc::boxed::Box;
use alloc::string::ToString;

use hal_coordination::{Message, MessagePriority};

/// A boxed predicate deciding whether a subscriber should see a message.
pub type EventFilter = Box<dyn Fn(&Message) -> bool + Send>;

/// Match every event, regardless of content. The default filter for a
/// subscriber that wants everything.
#[must_use]
pub fn any() -> EventFilter {
    Box::new(|_| true)
}

/// Match events whose `header.sender_id` equals `sender_id` exactly.
#[must_use]
pub fn by_sender(sender_id: &str) -> EventFilter {
    let sender_id = sender_id.to_string();
    Box::new(move |message| message.header.sender_id == sender_id)
}

/// Match events whose `header.sender_id` starts with `prefix`, for
/// subscribers that want every event from a family of publishers
/// (e.g. `"driver."` for every driver's events).
#[must_use]
pub fn by_sender_prefix(prefix: &str) -> EventFilter {
    let prefix = prefix.to_string();
    Box::new(move |message| message.header.sender_id.starts_with(prefix.as_str()))
}

/// Match events at or above `minimum` priority.
#[must_use]
pub fn by_priority_at_least(minimum: MessagePriority) -> EventFilter {
    Box::new(move |message| priority_rank(message.header.priority) >= priority_rank(minimum))
}

/// Combine two filters: a message must satisfy both.
#[must_use]
pub fn and(a: EventFilter, b: EventFilter) -> EventFilter {
    Box::new(move |message| a(message) && b(message))
}

fn priority_rank(priority: MessagePriority) -> u8 {
    match priority {
        MessagePriority::Low => 0,
        MessagePriority::Normal => 1,
        MessagePriority::High => 2,
        MessagePriority::Critical => 3,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hal_coordination::{MessageHeader, MessageKind};
    use alloc::string::String;

    fn event_from(sender_id: &str, priority: MessagePriority) -> Message {
        let header = MessageHeader {
            kind: MessageKind::Event,
            sender_id: String::from(sender_id),
            priority,
            ..Default::default()
        };
        Message::new(header, None)
    }

    #[test]
    fn sender_prefix_matches_family() {
        let filter = by_sender_prefix("driver.");
        assert!(filter(&event_from("driver.video", MessagePriority::Normal)));
        assert!(!filter(&event_from("coordination.bus", MessagePriority::Normal)));
    }

    #[test]
    fn priority_threshold_excludes_lower() {
        let filter = by_priority_at_least(MessagePriority::High);
        assert!(filter(&event_from("any", MessagePriority::Critical)));
        assert!(!filter(&event_from("any", MessagePriority::Normal)));
    }

    #[test]
    fn combined_filter_requires_both() {
        let filter = and(by_sender_prefix("driver."), by_priority_at_least(MessagePriority::High));
        assert!(filter(&event_from("driver.audio", MessagePriority::Critical)));
        assert!(!filter(&event_from("driver.audio", MessagePriority::Low)));
        assert!(!filter(&event_from("coordination.bus", MessagePriority::Critical)));
    }
}
