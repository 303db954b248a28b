// HAL - hal-coordination
// Module: cross-driver message bus
//
// Copyright (c) 2025 The Flight HAL Project Developers
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! [`MessageBus`]: routed delivery plus request/response correlation
//! (spec §4.5 C8).
//!
//! The original drains its SPSC ring on a dedicated background thread that
//! sleeps 100 µs when idle. [`hal_sync::SpscRing`]'s producer/consumer
//! halves borrow the ring they split from, which makes storing both ends
//! of one ring inside a single owned struct self-referential — not
//! expressible here without `unsafe`, which this crate forbids. Instead
//! the bus keeps its bounded queue behind [`hal_sync::Mutex`] and exposes
//! [`MessageBus::process_one`]/[`MessageBus::process_all`] as the
//! consumer side: a cooperative tick the caller drives, matching spec §5's
//! single-threaded-cooperative execution model directly and the
//! preemptive-desktop model via a caller-driven poll loop (see
//! [`MessageBus::send_request_with_ticks`]). FIFO order and the
//! capacity-exhausted-drops-and-reports contract are preserved exactly;
//! only the lock-free property of the original ring is traded away.

use alloc::boxed::Box;
use alloc::collections::{BTreeMap, VecDeque};
use alloc::string::{String, ToString};
use alloc::vec::Vec;

use hal_error::{Error, Result};
use hal_sync::Mutex;

use crate::message::{Message, MessageHeader, MessageKind, MessagePriority, Payload, BROADCAST_RECIPIENT};

/// Default ring capacity (spec §4.5: "bounded SPSC lock-free ring of
/// capacity 1024").
pub const DEFAULT_CAPACITY: usize = 1024;

/// Something that can receive routed messages.
pub trait MessageHandler {
    /// This handler's id, used as its bus address.
    fn handler_id(&self) -> &str;
    /// Whether this handler accepts messages of `kind`.
    fn can_handle(&self, kind: MessageKind) -> bool;
    /// Process a message, optionally returning a reply. The bus rewrites
    /// the reply's header (kind, correlation, sender/recipient) before
    /// re-sending it.
    fn handle_message(&mut self, message: &Message) -> Option<Message>;
}

/// Running counters for the bus (spec §4.5 supplement).
#[derive(Debug, Clone, Copy, Default)]
pub struct MessageStats {
    /// Messages successfully enqueued.
    pub messages_sent: u64,
    /// Messages dequeued and processed (including responses).
    pub messages_received: u64,
    /// Messages rejected because the queue was at capacity.
    pub messages_dropped: u64,
    /// Messages discarded at the head of the queue because they expired.
    pub messages_expired: u64,
    /// `send_request` calls issued.
    pub requests_sent: u64,
    /// `send_request` calls that ran out of ticks/time before a response.
    pub requests_timeout: u64,
    /// Running average of the time (ms) between a request being sent and
    /// its response being processed, over every request that got a
    /// response. Timed-out requests are not counted.
    pub average_response_time_ms: f64,
}

struct PendingRequest {
    response: Option<Message>,
    sent_at_ms: u64,
}

struct State {
    queue: VecDeque<Message>,
    handlers: BTreeMap<String, Box<dyn MessageHandler + Send>>,
    pending: BTreeMap<u64, PendingRequest>,
    next_id: u64,
    stats: MessageStats,
    response_samples: u64,
}

/// Routes [`Message`]s between registered [`MessageHandler`]s and
/// correlates request/response pairs (spec §4.5 C8, "CrossDriverMessenger").
pub struct MessageBus {
    state: Mutex<State>,
    capacity: usize,
}

impl Default for MessageBus {
    fn default() -> Self {
        Self::new()
    }
}

impl MessageBus {
    /// Build a bus with the default 1024-slot queue.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Build a bus with a custom queue capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            state: Mutex::new(State {
                queue: VecDeque::new(),
                handlers: BTreeMap::new(),
                pending: BTreeMap::new(),
                next_id: 1,
                stats: MessageStats::default(),
                response_samples: 0,
            }),
            capacity,
        }
    }

    /// Register a handler under its own [`MessageHandler::handler_id`].
    ///
    /// Fails with `configuration_missing` if that id is already taken.
    pub fn register_handler(&self, handler: Box<dyn MessageHandler + Send>) -> Result<()> {
        let mut state = self.state.lock();
        let id = handler.handler_id().to_string();
        if state.handlers.contains_key(&id) {
            return Err(Error::configuration_missing().with_context("handler id already registered"));
        }
        state.handlers.insert(id, handler);
        Ok(())
    }

    /// Remove a registered handler. Fails with `configuration_missing` if
    /// it was never registered.
    pub fn unregister_handler(&self, handler_id: &str) -> Result<()> {
        let mut state = self.state.lock();
        state
            .handlers
            .remove(handler_id)
            .map(|_| ())
            .ok_or_else(|| Error::configuration_missing().with_context("handler id not registered"))
    }

    /// Enqueue a message, assigning an id if `message.header.id == 0` and
    /// stamping `timestamp_ms` if it is still zero.
    ///
    /// Fails with `resource_exhausted` (and counts `messages_dropped`) if
    /// the queue is already at capacity.
    pub fn send_message(&self, mut message: Message, now_ms: u64) -> Result<u64> {
        let mut state = self.state.lock();
        if message.header.id == 0 {
            message.header.id = state.next_id;
            state.next_id += 1;
        }
        if message.header.timestamp_ms == 0 {
            message.header.timestamp_ms = now_ms;
        }
        let id = message.header.id;

        if state.queue.len() >= self.capacity {
            state.stats.messages_dropped += 1;
            #[cfg(feature = "std")]
            log::warn!("message queue full at capacity {}, dropping message {id}", self.capacity);
            return Err(Error::resource_exhausted().with_context("message queue full"));
        }
        state.queue.push_back(message);
        state.stats.messages_sent += 1;
        Ok(id)
    }

    /// Send a fire-and-forget message to one recipient.
    pub fn send_notification(
        &self,
        sender_id: &str,
        recipient_id: &str,
        payload: Option<Payload>,
        priority: MessagePriority,
        now_ms: u64,
    ) -> Result<u64> {
        let header = MessageHeader {
            kind: MessageKind::Notification,
            priority,
            sender_id: sender_id.to_string(),
            recipient_id: recipient_id.to_string(),
            ..Default::default()
        };
        self.send_message(Message::new(header, payload), now_ms)
    }

    /// Send a fire-and-forget message to every handler that accepts
    /// `MessageKind::Event`.
    pub fn broadcast_event(&self, sender_id: &str, payload: Option<Payload>, now_ms: u64) -> Result<u64> {
        let header = MessageHeader {
            kind: MessageKind::Event,
            sender_id: sender_id.to_string(),
            recipient_id: String::from(BROADCAST_RECIPIENT),
            ..Default::default()
        };
        self.send_message(Message::new(header, payload), now_ms)
    }

    /// Send a request and poll for its response, driving the bus's own
    /// processing loop for up to `max_ticks` iterations. Each tick drains
    /// the entire queue once.
    ///
    /// This is the deterministic, `no_std`-compatible counterpart to the
    /// original's thread-blocking `send_request`: instead of a wall-clock
    /// timeout it bounds work by tick count, which the caller derives from
    /// its own frame/poll budget.
    pub fn send_request_with_ticks(&self, mut request: Message, max_ticks: u32, now_ms: u64) -> Result<Message> {
        request.header.kind = MessageKind::Request;
        let send_result = {
            let mut state = self.state.lock();
            let id = state.next_id;
            state.next_id += 1;
            request.header.id = id;
            request.header.correlation_id = id;
            if request.header.timestamp_ms == 0 {
                request.header.timestamp_ms = now_ms;
            }
            state.pending.insert(id, PendingRequest { response: None, sent_at_ms: now_ms });
            id
        };

        if let Err(err) = self.send_message(request, now_ms) {
            self.state.lock().pending.remove(&send_result);
            return Err(err);
        }
        self.state.lock().stats.requests_sent += 1;

        for _ in 0..max_ticks {
            self.process_all(now_ms);
            let mut state = self.state.lock();
            if let Some(slot) = state.pending.get_mut(&send_result) {
                if let Some(response) = slot.response.take() {
                    state.pending.remove(&send_result);
                    return Ok(response);
                }
            } else {
                // Already resolved and removed by a concurrent processing pass.
                break;
            }
        }

        let mut state = self.state.lock();
        if let Some(pending) = state.pending.remove(&send_result) {
            if let Some(response) = pending.response {
                return Ok(response);
            }
        }
        state.stats.requests_timeout += 1;
        Err(Error::network_timeout().with_context("request timed out waiting for response"))
    }

    /// Dequeue and process one message, if any is waiting. Returns `true`
    /// iff a message was processed (including an expired one that was
    /// just dropped).
    pub fn process_one(&self, now_ms: u64) -> bool {
        let mut state = self.state.lock();
        let Some(message) = state.queue.pop_front() else { return false };

        if message.is_expired(now_ms) {
            state.stats.messages_expired += 1;
            #[cfg(feature = "std")]
            log::warn!("message {} from {} expired before delivery", message.header.id, message.header.sender_id);
            return true;
        }
        state.stats.messages_received += 1;

        if message.header.kind == MessageKind::Response {
            let sent_at_ms = state.pending.get(&message.header.correlation_id).map(|p| p.sent_at_ms);
            if let Some(sent_at_ms) = sent_at_ms {
                let latency_ms = now_ms.saturating_sub(sent_at_ms) as f64;
                state.response_samples += 1;
                let n = state.response_samples as f64;
                state.stats.average_response_time_ms += (latency_ms - state.stats.average_response_time_ms) / n;
            }
            if let Some(slot) = state.pending.get_mut(&message.header.correlation_id) {
                slot.response = Some(message);
            }
            return true;
        }

        let target_ids: Vec<String> = if message.header.recipient_id == BROADCAST_RECIPIENT {
            state
                .handlers
                .iter()
                .filter(|(_, h)| h.can_handle(message.header.kind))
                .map(|(id, _)| id.clone())
                .collect()
        } else {
            state
                .handlers
                .get(&message.header.recipient_id)
                .filter(|h| h.can_handle(message.header.kind))
                .map(|_| message.header.recipient_id.clone())
                .into_iter()
                .collect()
        };

        let mut replies = Vec::new();
        for handler_id in target_ids {
            if let Some(handler) = state.handlers.get_mut(&handler_id) {
                if let Some(mut reply) = handler.handle_message(&message) {
                    reply.header.kind = MessageKind::Response;
                    reply.header.correlation_id = message.header.id;
                    reply.header.recipient_id = message.header.sender_id.clone();
                    reply.header.sender_id = handler_id;
                    reply.header.timestamp_ms = 0;
                    replies.push(reply);
                }
            }
        }

        drop(state);
        for reply in replies {
            // Handler failures (including a full queue) are swallowed here
            // to keep the bus alive, matching the original's `catch (...)`.
            let _ = self.send_message(reply, now_ms);
        }
        true
    }

    /// Drain the entire queue, processing every message currently waiting.
    /// Returns the number processed.
    pub fn process_all(&self, now_ms: u64) -> usize {
        let mut count = 0;
        while self.process_one(now_ms) {
            count += 1;
        }
        count
    }

    /// Number of messages currently queued.
    #[must_use]
    pub fn queue_len(&self) -> usize {
        self.state.lock().queue.len()
    }

    /// Snapshot of the running counters.
    #[must_use]
    pub fn stats(&self) -> MessageStats {
        self.state.lock().stats
    }

    /// Reset every counter to zero.
    pub fn clear_stats(&self) {
        let mut state = self.state.lock();
        state.stats = MessageStats::default();
        state.response_samples = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::ResourceResponsePayload;

    struct Echo {
        id: String,
    }

    impl MessageHandler for Echo {
        fn handler_id(&self) -> &str {
            &self.id
        }
        fn can_handle(&self, kind: MessageKind) -> bool {
            matches!(kind, MessageKind::Request | MessageKind::Event)
        }
        fn handle_message(&mut self, message: &Message) -> Option<Message> {
            if message.header.kind == MessageKind::Request {
                let payload = Payload::ResourceResponse(ResourceResponsePayload {
                    success: true,
                    message: String::from("echo"),
                });
                Some(Message::new(MessageHeader::default(), Some(payload)))
            } else {
                None
            }
        }
    }

    #[test]
    fn direct_notification_is_delivered_in_fifo_order() {
        let bus = MessageBus::new();
        bus.register_handler(Box::new(Echo { id: String::from("h1") })).unwrap();
        bus.send_notification("sender", "h1", None, MessagePriority::Normal, 0).unwrap();
        bus.send_notification("sender", "h1", None, MessagePriority::Normal, 0).unwrap();
        assert_eq!(bus.process_all(0), 2);
        assert_eq!(bus.stats().messages_received, 2);
    }

    #[test]
    fn request_response_round_trips_through_a_handler() {
        let bus = MessageBus::new();
        bus.register_handler(Box::new(Echo { id: String::from("h1") })).unwrap();
        let header = MessageHeader { recipient_id: String::from("h1"), sender_id: String::from("client"), ..Default::default() };
        let response = bus.send_request_with_ticks(Message::new(header, None), 4, 0).unwrap();
        assert_eq!(response.header.kind, MessageKind::Response);
        assert_eq!(response.header.recipient_id, "client");
    }

    #[test]
    fn fulfilled_request_within_one_tick_has_zero_average_latency() {
        // send_request_with_ticks resolves within its own call at a single
        // `now_ms`, so latency sampled there is always zero; this just
        // confirms the counter is wired up and resets correctly.
        let bus = MessageBus::new();
        bus.register_handler(Box::new(Echo { id: String::from("h1") })).unwrap();
        let header = MessageHeader { recipient_id: String::from("h1"), sender_id: String::from("client"), ..Default::default() };
        let response = bus.send_request_with_ticks(Message::new(header, None), 4, 0).unwrap();
        assert_eq!(response.header.kind, MessageKind::Response);
        assert_eq!(bus.stats().average_response_time_ms, 0.0);

        bus.clear_stats();
        assert_eq!(bus.stats().average_response_time_ms, 0.0);
    }

    #[test]
    fn response_processed_later_records_nonzero_average_latency() {
        // send_request_with_ticks always resolves at a single `now_ms`, so
        // exercise the accumulator directly: a pending request sent at 100
        // whose response is processed at 180 should record 80ms.
        let bus = MessageBus::new();
        {
            let mut state = bus.state.lock();
            state.pending.insert(7, PendingRequest { response: None, sent_at_ms: 100 });
        }
        let response_header = MessageHeader { kind: MessageKind::Response, correlation_id: 7, ..Default::default() };
        bus.send_message(Message::new(response_header, None), 180).unwrap();
        bus.process_one(180);

        assert_eq!(bus.stats().average_response_time_ms, 80.0);
    }

    #[test]
    fn request_with_no_handler_times_out() {
        let bus = MessageBus::new();
        let header = MessageHeader { recipient_id: String::from("ghost"), ..Default::default() };
        let err = bus.send_request_with_ticks(Message::new(header, None), 3, 0).unwrap_err();
        assert_eq!(err, Error::network_timeout());
        assert_eq!(bus.stats().requests_timeout, 1);
    }

    #[test]
    fn queue_at_capacity_drops_and_reports() {
        let bus = MessageBus::with_capacity(1);
        bus.send_notification("s", "r", None, MessagePriority::Normal, 0).unwrap();
        let err = bus.send_notification("s", "r", None, MessagePriority::Normal, 0).unwrap_err();
        assert_eq!(err, Error::resource_exhausted());
        assert_eq!(bus.stats().messages_dropped, 1);
    }

    #[test]
    fn expired_message_is_dropped_without_reaching_a_handler() {
        let bus = MessageBus::new();
        bus.register_handler(Box::new(Echo { id: String::from("h1") })).unwrap();
        let header = MessageHeader {
            recipient_id: String::from("h1"),
            timestamp_ms: 0,
            timeout_ms: 10,
            ..Default::default()
        };
        bus.send_message(Message::new(header, None), 0).unwrap();
        assert_eq!(bus.process_all(1_000), 1);
        assert_eq!(bus.stats().messages_expired, 1);
        assert_eq!(bus.stats().messages_received, 0);
    }

    #[test]
    fn broadcast_event_reaches_every_handler_that_accepts_it() {
        let bus = MessageBus::new();
        bus.register_handler(Box::new(Echo { id: String::from("a") })).unwrap();
        bus.register_handler(Box::new(Echo { id: String::from("b") })).unwrap();
        bus.broadcast_event("sender", None, 0).unwrap();
        assert_eq!(bus.process_all(0), 1);
        assert_eq!(bus.stats().messages_received, 1);
    }
}
