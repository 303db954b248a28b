// HAL - hal-events
// Module: filtered event router
//
// Copyright (c) 2025 The Flight HAL Project Developers
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! [`EventRouter`]: a single [`MessageHandler`] that fans broadcast
//! [`MessageKind::Event`] traffic out to any number of filtered
//! subscribers (spec §2 C12, layered on
//! [`hal_coordination::MessageBus`]).
//!
//! The router registers itself on a bus under one fixed handler id and
//! intercepts every `Event`-kind message the bus delivers to it, the way
//! `wrt-intercept`'s hooks sit between a caller and a callee without being
//! a transport themselves. It carries no queue or thread of its own —
//! dispatch happens synchronously inside [`MessageBus::process_one`]/
//! [`MessageBus::process_all`].

use alloc::boxed::Box;
use alloc::collections::BTreeMap;

use hal_coordination::{Message, MessageHandler, MessageKind};
use hal_sync::Mutex;

use crate::filter::EventFilter;

/// Identifies a subscription for [`EventRouter::unsubscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

/// Running counters for one router.
#[derive(Debug, Clone, Copy, Default)]
pub struct RouterStats {
    /// `Event`-kind messages the bus delivered to this router.
    pub events_received: u64,
    /// Subscriber callback invocations across every matching subscription.
    pub events_dispatched: u64,
}

struct Subscription {
    filter: EventFilter,
    callback: Box<dyn FnMut(&Message) + Send>,
}

struct State {
    next_id: u64,
    subscriptions: BTreeMap<u64, Subscription>,
    stats: RouterStats,
}

/// The handler id [`EventRouter`] registers itself under on a
/// [`hal_coordination::MessageBus`].
pub const ROUTER_HANDLER_ID: &str = "hal-events::router";

/// Fans filtered `Event`-kind messages out to subscribers (spec §2 C12).
pub struct EventRouter {
    state: Mutex<State>,
}

impl Default for EventRouter {
    fn default() -> Self {
        Self::new()
    }
}

impl EventRouter {
    /// Build a router with no subscriptions. Register it with
    /// [`hal_coordination::MessageBus::register_handler`] to start
    /// receiving broadcast events.
    #[must_use]
    pub fn new() -> Self {
        Self { state: Mutex::new(State { next_id: 1, subscriptions: BTreeMap::new(), stats: RouterStats::default() }) }
    }

    /// Add a subscriber: every `Event` message for which `filter` returns
    /// `true` is passed to `callback`.
    pub fn subscribe(
        &self,
        filter: EventFilter,
        callback: Box<dyn FnMut(&Message) + Send>,
    ) -> SubscriptionId {
        let mut state = self.state.lock();
        let id = state.next_id;
        state.next_id += 1;
        state.subscriptions.insert(id, Subscription { filter, callback });
        #[cfg(feature = "std")]
        log::trace!("event subscription {id} registered");
        SubscriptionId(id)
    }

    /// Remove a subscription. Returns `false` if it was already removed or
    /// never existed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let removed = self.state.lock().subscriptions.remove(&id.0).is_some();
        #[cfg(feature = "std")]
        if removed {
            log::trace!("event subscription {} removed", id.0);
        }
        removed
    }

    /// Number of subscriptions currently registered.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.state.lock().subscriptions.len()
    }

    /// Snapshot of the running counters.
    #[must_use]
    pub fn stats(&self) -> RouterStats {
        self.state.lock().stats
    }
}

impl MessageHandler for EventRouter {
    fn handler_id(&self) -> &str {
        ROUTER_HANDLER_ID
    }

    fn can_handle(&self, kind: MessageKind) -> bool {
        kind == MessageKind::Event
    }

    fn handle_message(&mut self, message: &Message) -> Option<Message> {
        let mut state = self.state.lock();
        state.stats.events_received += 1;
        let mut matched = 0u32;
        let mut dispatched = 0u64;
        for subscription in state.subscriptions.values_mut() {
            if (subscription.filter)(message) {
                (subscription.callback)(message);
                dispatched += 1;
                matched += 1;
            }
        }
        state.stats.events_dispatched += dispatched;
        #[cfg(feature = "std")]
        if matched == 0 {
            log::debug!("event from {} matched no subscriber", message.header.sender_id);
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::{any, by_sender_prefix};
    use alloc::string::{String, ToString};
    use alloc::sync::Arc;
    use alloc::vec::Vec;
    use hal_coordination::{MessageBus, MessageHeader, MessagePriority};
    use hal_sync::Mutex as SyncMutex;

    #[test]
    fn subscriber_receives_matching_broadcast_events() {
        let bus = MessageBus::new();
        let router = EventRouter::new();
        let received: Arc<SyncMutex<Vec<String>>> = Arc::new(SyncMutex::new(Vec::new()));

        let sink = received.clone();
        router.subscribe(
            by_sender_prefix("driver."),
            Box::new(move |message| sink.lock().push(message.header.sender_id.clone())),
        );

        bus.register_handler(Box::new(router)).unwrap();
        let header = MessageHeader {
            kind: MessageKind::Event,
            sender_id: String::from("driver.video"),
            recipient_id: String::from(hal_coordination::BROADCAST_RECIPIENT),
            priority: MessagePriority::Normal,
            ..Default::default()
        };
        bus.send_message(Message::new(header, None), 0).unwrap();
        bus.process_all(0);

        assert_eq!(*received.lock(), alloc::vec![String::from("driver.video")]);
    }

    #[test]
    fn unmatched_filter_is_not_dispatched() {
        let router = EventRouter::new();
        let called = Arc::new(SyncMutex::new(false));
        let sink = called.clone();
        router.subscribe(any(), Box::new(move |_| *sink.lock() = true));
        // Directly exercise handle_message without a bus, confirming that a
        // Notification-kind message the bus would never deliver here (since
        // can_handle rejects it) still correctly invokes subscribers when
        // handle_message is called directly on a matching kind.
        let mut router = router;
        let header = MessageHeader { kind: MessageKind::Event, ..Default::default() };
        router.handle_message(&Message::new(header, None));
        assert!(*called.lock());
        assert_eq!(router.stats().events_dispatched, 1);
    }

    #[test]
    fn unsubscribe_stops_future_dispatch() {
        let router = EventRouter::new();
        let called = Arc::new(SyncMutex::new(0u32));
        let sink = called.clone();
        let id = router.subscribe(any(), Box::new(move |_| *sink.lock() += 1));
        assert_eq!(router.subscriber_count(), 1);
        assert!(router.unsubscribe(id));
        assert_eq!(router.subscriber_count(), 0);
        assert!(!router.unsubscribe(id));
    }
}
