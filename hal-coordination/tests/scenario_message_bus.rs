//! Scenario S4/S5 (spec §8): request/response correlation through a
//! registered handler, and a request that times out when nothing answers.

use hal_coordination::{
    Message, MessageBus, MessageHandler, MessageHeader, MessageKind, MessagePriority, Payload, ResourceOperation,
    ResourceRequestPayload, ResourceResponsePayload,
};

struct ResourceService {
    id: String,
}

impl MessageHandler for ResourceService {
    fn handler_id(&self) -> &str {
        &self.id
    }

    fn can_handle(&self, kind: MessageKind) -> bool {
        matches!(kind, MessageKind::Request | MessageKind::Resource)
    }

    fn handle_message(&mut self, message: &Message) -> Option<Message> {
        let Some(Payload::ResourceRequest(req)) = &message.payload else { return None };
        let response = match req.operation {
            ResourceOperation::Acquire => ResourceResponsePayload { success: true, message: String::from("granted") },
            _ => ResourceResponsePayload { success: false, message: String::from("unsupported") },
        };
        Some(Message::new(MessageHeader::default(), Some(Payload::ResourceResponse(response))))
    }
}

#[test]
fn request_is_answered_by_the_registered_handler() {
    let bus = MessageBus::new();
    bus.register_handler(Box::new(ResourceService { id: String::from("resource-service") })).unwrap();

    let payload = Payload::ResourceRequest(ResourceRequestPayload {
        operation: ResourceOperation::Acquire,
        resource_id: 42,
        resource_name: String::from("gpu-0"),
    });
    let header = MessageHeader {
        kind: MessageKind::Resource,
        sender_id: String::from("client"),
        recipient_id: String::from("resource-service"),
        priority: MessagePriority::High,
        ..Default::default()
    };

    let response = bus.send_request_with_ticks(Message::new(header, Some(payload)), 4, 0).unwrap();
    match response.payload {
        Some(Payload::ResourceResponse(r)) => assert!(r.success),
        other => panic!("unexpected payload: {other:?}"),
    }
    assert_eq!(bus.stats().requests_sent, 1);
    assert_eq!(bus.stats().requests_timeout, 0);
}

#[test]
fn request_to_an_unregistered_recipient_times_out_after_its_ticks() {
    let bus = MessageBus::new();
    let header = MessageHeader { recipient_id: String::from("nobody"), ..Default::default() };
    let err = bus.send_request_with_ticks(Message::new(header, None), 2, 0).unwrap_err();
    assert_eq!(err, hal_error::Error::network_timeout());
    assert_eq!(bus.stats().requests_timeout, 1);
    // The request message itself was still delivered into the queue and
    // counted as received even though nothing answered it.
    assert_eq!(bus.stats().messages_received, 1);
}
