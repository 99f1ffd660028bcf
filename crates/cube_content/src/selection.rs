//! Typed publish/subscribe channel for "component selected" events.
//!
//! Selectors publish a [`ComponentSelected`] payload; every subscriber
//! receives its own copy and drains it on its own schedule. Subscribers whose
//! receiving end was dropped are pruned on the next publish.

use std::sync::{
    mpsc::{self, Receiver, Sender},
    Mutex, MutexGuard, PoisonError,
};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::ContentReference;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriberId(Uuid);

impl SubscriberId {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

/// Payload of the "component selected" broadcast.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ComponentSelected {
    pub content: ContentReference,
}

impl ComponentSelected {
    pub fn new(content: ContentReference) -> Self {
        Self { content }
    }
}

#[derive(Default)]
pub struct SelectionBus {
    subscribers: Mutex<Vec<(SubscriberId, Sender<ComponentSelected>)>>,
}

impl SelectionBus {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<(SubscriberId, Sender<ComponentSelected>)>> {
        // the list stays consistent even if a holder panicked
        self.subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    pub fn subscribe(&self) -> SelectionSubscription {
        let (sender, receiver) = mpsc::channel();
        let id = SubscriberId::new();
        self.lock().push((id, sender));
        tracing::debug!(?id, "selection subscriber added");
        SelectionSubscription { id, receiver }
    }

    /// Returns true when the subscriber was still registered.
    pub fn unsubscribe(&self, id: SubscriberId) -> bool {
        let mut subscribers = self.lock();
        let before = subscribers.len();
        subscribers.retain(|(existing, _)| *existing != id);
        before != subscribers.len()
    }

    /// Delivers `event` to every live subscriber and returns how many received it.
    pub fn publish(&self, event: ComponentSelected) -> usize {
        let mut subscribers = self.lock();
        subscribers.retain(|(_, sender)| sender.send(event.clone()).is_ok());
        tracing::debug!(
            content = event.content.id.as_str(),
            delivered = subscribers.len(),
            "component selected"
        );
        subscribers.len()
    }

    pub fn subscriber_count(&self) -> usize {
        self.lock().len()
    }
}

/// Receiving end of a [`SelectionBus`] subscription.
pub struct SelectionSubscription {
    id: SubscriberId,
    receiver: Receiver<ComponentSelected>,
}

impl SelectionSubscription {
    pub fn id(&self) -> SubscriberId {
        self.id
    }

    /// Pending events in publish order.
    pub fn drain(&self) -> Vec<ComponentSelected> {
        self.receiver.try_iter().collect()
    }
}
