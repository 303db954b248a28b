// HAL - hal-coordination
// Module: message and payload types
//
// Copyright (c) 2025 The Flight HAL Project Developers
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! [`Message`], [`MessageHeader`], and the closed set of known payloads
//! (spec §3, §4.5 C8).
//!
//! The original dispatches payloads through a virtual `IMessagePayload`
//! interface with `serialize`/`deserialize`/`clone`. Rust's enums make the
//! closed set of payload kinds the original actually ships
//! (`ResourceRequest`/`ResourceResponse`/`Performance`) a better fit than a
//! trait object: [`Payload::Opaque`] covers anything else, round-tripping
//! as raw bytes so unknown payload kinds still transit the bus intact.

use alloc::string::String;
use alloc::vec::Vec;

/// What a message represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    /// Expects a `Response` fulfilling the same `correlation_id`.
    Request,
    /// Fulfils a prior `Request`.
    Response,
    /// Fire-and-forget, addressed to one recipient.
    Notification,
    /// Fire-and-forget, addressed to every handler that can accept it.
    Event,
    /// Carries a [`PerformancePayload`].
    Performance,
    /// Carries a [`ResourceRequestPayload`] or [`ResourceResponsePayload`].
    Resource,
}

/// Delivery priority, distinct from [`crate::resource::Priority`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessagePriority {
    /// Lowest priority.
    Low,
    /// Default priority.
    Normal,
    /// Above default.
    High,
    /// Time-critical.
    Critical,
}

/// Recipient id denoting "every handler that can accept this message".
pub const BROADCAST_RECIPIENT: &str = "*";

/// Fixed-size message metadata (spec §3).
#[derive(Debug, Clone)]
pub struct MessageHeader {
    /// Message id. `0` means "assign on send".
    pub id: u64,
    /// For a `Response`, the id of the `Request` it answers; otherwise `0`.
    pub correlation_id: u64,
    /// What kind of message this is.
    pub kind: MessageKind,
    /// Delivery priority.
    pub priority: MessagePriority,
    /// Sender's handler id.
    pub sender_id: String,
    /// Recipient's handler id, or [`BROADCAST_RECIPIENT`].
    pub recipient_id: String,
    /// When the message was created, in caller-supplied milliseconds.
    pub timestamp_ms: u64,
    /// Maximum age before the message is considered expired, in
    /// milliseconds.
    pub timeout_ms: u32,
    /// Size of the serialized payload, in bytes.
    pub payload_size: u32,
}

impl Default for MessageHeader {
    fn default() -> Self {
        Self {
            id: 0,
            correlation_id: 0,
            kind: MessageKind::Notification,
            priority: MessagePriority::Normal,
            sender_id: String::new(),
            recipient_id: String::new(),
            timestamp_ms: 0,
            timeout_ms: 5000,
            payload_size: 0,
        }
    }
}

/// Resource lifecycle operation carried by a [`ResourceRequestPayload`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceOperation {
    /// Acquire a resource.
    Acquire,
    /// Release a resource.
    Release,
    /// Query a resource's current state.
    Query,
    /// Update a resource's metadata.
    Update,
}

/// Requests an operation on a named resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceRequestPayload {
    /// Operation to perform.
    pub operation: ResourceOperation,
    /// Id of the resource handle this request concerns.
    pub resource_id: u64,
    /// Name of the resource, for handlers that resolve by name.
    pub resource_name: String,
}

/// Answers a [`ResourceRequestPayload`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceResponsePayload {
    /// Whether the requested operation succeeded.
    pub success: bool,
    /// Human-readable detail.
    pub message: String,
}

/// A single named performance sample.
#[derive(Debug, Clone, PartialEq)]
pub struct Metric {
    /// Metric name.
    pub name: String,
    /// Sample value.
    pub value: f64,
    /// Unit string (e.g. `"ms"`, `"MB"`).
    pub unit: String,
}

/// A batch of performance samples from one driver.
#[derive(Debug, Clone, PartialEq)]
pub struct PerformancePayload {
    /// Id of the reporting driver.
    pub driver_id: String,
    /// Samples in this batch.
    pub metrics: Vec<Metric>,
}

/// The closed set of payload kinds the bus understands natively, plus an
/// escape hatch for anything else.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// A [`ResourceRequestPayload`].
    ResourceRequest(ResourceRequestPayload),
    /// A [`ResourceResponsePayload`].
    ResourceResponse(ResourceResponsePayload),
    /// A [`PerformancePayload`].
    Performance(PerformancePayload),
    /// Anything else, carried as opaque bytes.
    Opaque(Vec<u8>),
}

impl Payload {
    /// Size in bytes this payload would occupy on the wire. Used to fill
    /// [`MessageHeader::payload_size`]; this is a byte count, not an actual
    /// serialization — the bus never leaves the process.
    #[must_use]
    pub fn encoded_len(&self) -> u32 {
        let len = match self {
            Payload::ResourceRequest(p) => 1 + 8 + p.resource_name.len(),
            Payload::ResourceResponse(p) => 1 + p.message.len(),
            Payload::Performance(p) => {
                4 + p.driver_id.len() + p.metrics.iter().map(|m| 4 + m.name.len() + 8 + 4 + m.unit.len()).sum::<usize>()
            }
            Payload::Opaque(bytes) => bytes.len(),
        };
        u32::try_from(len).unwrap_or(u32::MAX)
    }
}

/// A header plus an optional payload (spec §3).
#[derive(Debug, Clone)]
pub struct Message {
    /// Message metadata.
    pub header: MessageHeader,
    /// Message body, if any.
    pub payload: Option<Payload>,
}

impl Message {
    /// Build a message, filling `header.payload_size` from `payload`.
    #[must_use]
    pub fn new(mut header: MessageHeader, payload: Option<Payload>) -> Self {
        header.payload_size = payload.as_ref().map_or(0, Payload::encoded_len);
        Self { header, payload }
    }

    /// True iff `now_ms >= header.timestamp_ms + header.timeout_ms`.
    #[must_use]
    pub fn is_expired(&self, now_ms: u64) -> bool {
        now_ms >= self.header.timestamp_ms + u64::from(self.header.timeout_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_defaults_match_the_original() {
        let header = MessageHeader::default();
        assert_eq!(header.id, 0);
        assert_eq!(header.correlation_id, 0);
        assert_eq!(header.kind, MessageKind::Notification);
        assert_eq!(header.priority, MessagePriority::Normal);
        assert_eq!(header.timeout_ms, 5000);
        assert_eq!(header.payload_size, 0);
    }

    #[test]
    fn building_a_message_fills_payload_size() {
        let payload = Payload::ResourceResponse(ResourceResponsePayload { success: true, message: String::from("ok") });
        let message = Message::new(MessageHeader::default(), Some(payload));
        assert_eq!(message.header.payload_size, 1 + 2);
    }

    #[test]
    fn expiry_is_timestamp_plus_timeout() {
        let mut header = MessageHeader { timestamp_ms: 1_000, timeout_ms: 500, ..Default::default() };
        let message = Message::new(header.clone(), None);
        assert!(!message.is_expired(1_400));
        assert!(message.is_expired(1_500));
        header.timeout_ms = 0;
        assert!(Message::new(header, None).is_expired(1_000));
    }
}
