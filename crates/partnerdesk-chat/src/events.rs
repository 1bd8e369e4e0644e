// SPDX-FileCopyrightText: 2026 Partnerdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Live fan-out of conversation events to in-process subscribers.
//!
//! Each conversation gets a broadcast channel on first subscription. The
//! channel is torn down when its last subscriber drops, so an idle hub holds
//! no state. Delivery is at-least-once under lag: a slow subscriber that
//! falls behind skips ahead and keeps receiving, which is why consumers
//! deduplicate by message id (see [`MessageFeed`]).

use std::collections::HashSet;
use std::sync::Arc;

use dashmap::DashMap;
use partnerdesk_core::{ConversationId, ConversationStatus, SupportMessage};
use tokio::sync::broadcast;
use tracing::{debug, warn};

const CHANNEL_CAPACITY: usize = 64;

/// An event on a single conversation.
#[derive(Debug, Clone)]
pub enum ChatEvent {
    /// A message was appended to the conversation.
    MessageInserted(SupportMessage),
    /// The conversation changed lifecycle status.
    StatusChanged {
        conversation_id: ConversationId,
        status: ConversationStatus,
    },
}

/// Routes events to per-conversation broadcast channels.
#[derive(Default)]
pub struct SubscriptionHub {
    channels: DashMap<String, broadcast::Sender<ChatEvent>>,
}

impl SubscriptionHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe to a conversation's events. Creates the channel on demand.
    pub fn subscribe(self: &Arc<Self>, conversation_id: &str) -> Subscription {
        let receiver = self
            .channels
            .entry(conversation_id.to_string())
            .or_insert_with(|| broadcast::channel(CHANNEL_CAPACITY).0)
            .subscribe();
        Subscription {
            conversation_id: conversation_id.to_string(),
            receiver,
            hub: Arc::clone(self),
        }
    }

    /// Publish an event. Returns the number of subscribers it reached;
    /// events on conversations nobody watches are dropped.
    pub fn publish(&self, conversation_id: &str, event: ChatEvent) -> usize {
        match self.channels.get(conversation_id) {
            Some(sender) => sender.send(event).unwrap_or(0),
            None => {
                debug!(conversation_id, "event dropped, no subscribers");
                0
            }
        }
    }

    /// Number of conversations with at least one live channel.
    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    fn release(&self, conversation_id: &str) {
        // Remove the channel only when the departing subscriber is the last.
        self.channels
            .remove_if(conversation_id, |_, sender| sender.receiver_count() <= 1);
    }
}

/// A live subscription to one conversation. Dropping it detaches cleanly;
/// the hub removes the channel when the last subscriber leaves.
pub struct Subscription {
    conversation_id: String,
    receiver: broadcast::Receiver<ChatEvent>,
    hub: Arc<SubscriptionHub>,
}

impl Subscription {
    pub fn conversation_id(&self) -> &str {
        &self.conversation_id
    }

    /// Wait for the next event. Returns `None` once the channel is closed.
    /// A lagged subscriber skips the overwritten backlog and keeps going.
    pub async fn recv(&mut self) -> Option<ChatEvent> {
        loop {
            match self.receiver.recv().await {
                Ok(event) => return Some(event),
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    warn!(
                        conversation_id = %self.conversation_id,
                        skipped, "subscriber lagged, skipping backlog"
                    );
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }

    /// Detach explicitly. Equivalent to dropping the subscription.
    pub fn unsubscribe(self) {}
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.hub.release(&self.conversation_id);
    }
}

/// An ordered, deduplicated view of a conversation's messages.
///
/// Feeding the same message id twice is a no-op, so replays from lag
/// recovery or an initial-load/live-event overlap never duplicate entries.
#[derive(Default)]
pub struct MessageFeed {
    seen: HashSet<String>,
    messages: Vec<SupportMessage>,
}

impl MessageFeed {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message unless its id was already seen. Returns whether the
    /// message was new.
    pub fn push(&mut self, message: SupportMessage) -> bool {
        if !self.seen.insert(message.id.0.clone()) {
            return false;
        }
        self.messages.push(message);
        true
    }

    pub fn messages(&self) -> &[SupportMessage] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use partnerdesk_core::{ContentType, MessageId, MessageRole};
    use proptest::prelude::*;

    fn msg(id: &str) -> SupportMessage {
        SupportMessage {
            id: MessageId(id.to_string()),
            conversation_id: ConversationId("c-1".to_string()),
            role: MessageRole::User,
            content: format!("message {id}"),
            content_type: ContentType::Text,
            code_snippet: None,
            code_language: None,
            tools_used: None,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn subscriber_receives_published_events() {
        let hub = Arc::new(SubscriptionHub::new());
        let mut sub = hub.subscribe("c-1");

        let reached = hub.publish("c-1", ChatEvent::MessageInserted(msg("m1")));
        assert_eq!(reached, 1);

        match sub.recv().await {
            Some(ChatEvent::MessageInserted(m)) => assert_eq!(m.id.0, "m1"),
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[tokio::test]
    async fn events_without_subscribers_are_dropped() {
        let hub = Arc::new(SubscriptionHub::new());
        let reached = hub.publish("c-9", ChatEvent::MessageInserted(msg("m1")));
        assert_eq!(reached, 0);
        assert_eq!(hub.channel_count(), 0);
    }

    #[tokio::test]
    async fn events_do_not_cross_conversations() {
        let hub = Arc::new(SubscriptionHub::new());
        let _sub_other = hub.subscribe("c-2");
        let reached = hub.publish("c-1", ChatEvent::MessageInserted(msg("m1")));
        assert_eq!(reached, 0);
    }

    #[tokio::test]
    async fn last_drop_tears_down_channel() {
        let hub = Arc::new(SubscriptionHub::new());
        let sub_a = hub.subscribe("c-1");
        let sub_b = hub.subscribe("c-1");
        assert_eq!(hub.channel_count(), 1);

        drop(sub_a);
        assert_eq!(hub.channel_count(), 1);
        sub_b.unsubscribe();
        assert_eq!(hub.channel_count(), 0);

        // Resubscribing after teardown works from scratch.
        let mut sub = hub.subscribe("c-1");
        hub.publish("c-1", ChatEvent::MessageInserted(msg("m2")));
        assert!(sub.recv().await.is_some());
    }

    #[tokio::test]
    async fn both_subscribers_see_each_event() {
        let hub = Arc::new(SubscriptionHub::new());
        let mut sub_a = hub.subscribe("c-1");
        let mut sub_b = hub.subscribe("c-1");

        let reached = hub.publish(
            "c-1",
            ChatEvent::StatusChanged {
                conversation_id: ConversationId("c-1".to_string()),
                status: ConversationStatus::Escalated,
            },
        );
        assert_eq!(reached, 2);
        assert!(matches!(
            sub_a.recv().await,
            Some(ChatEvent::StatusChanged { .. })
        ));
        assert!(matches!(
            sub_b.recv().await,
            Some(ChatEvent::StatusChanged { .. })
        ));
    }

    #[test]
    fn feed_ignores_duplicate_ids() {
        let mut feed = MessageFeed::new();
        assert!(feed.push(msg("m1")));
        assert!(feed.push(msg("m2")));
        assert!(!feed.push(msg("m1")));
        assert_eq!(feed.len(), 2);
        assert_eq!(feed.messages()[0].id.0, "m1");
        assert_eq!(feed.messages()[1].id.0, "m2");
    }

    proptest! {
        #[test]
        fn feed_is_unique_and_order_preserving(ids in proptest::collection::vec("[a-c][0-9]", 0..40)) {
            let mut feed = MessageFeed::new();
            for id in &ids {
                feed.push(msg(id));
            }

            let mut expected = Vec::new();
            for id in &ids {
                if !expected.contains(id) {
                    expected.push(id.clone());
                }
            }
            let got: Vec<String> = feed.messages().iter().map(|m| m.id.0.clone()).collect();
            prop_assert_eq!(got, expected);
        }
    }
}
