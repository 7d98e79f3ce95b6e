//! Push-based change notifications for sync state.
//!
//! # Responsibility
//! - Fan out `SyncEvent`s to every live subscriber.
//!
//! # Invariants
//! - Events for one key are delivered in publish order.
//! - Disconnected subscribers are dropped on the next publish.

use crate::sync::resource::ResourceKey;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::Mutex;

/// Why a sync degraded instead of updating.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncIssue {
    /// Fetch failed and no cached value existed; fallback data is served.
    Offline { reason: String },
    /// Fetch failed; the cached value keeps being served silently.
    StaleButUsable { reason: String },
}

/// State change of one resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncEvent {
    LoadingChanged { key: ResourceKey, loading: bool },
    /// A cached value was made available ahead of any network result.
    CachedValueServed { key: ResourceKey },
    /// A fresh network value replaced the cached one.
    Updated { key: ResourceKey },
    Degraded { key: ResourceKey, issue: SyncIssue },
    /// A late response was dropped because a newer request superseded it.
    ResponseDiscarded { key: ResourceKey, generation: u64 },
}

/// Subscriber registry.
#[derive(Debug, Default)]
pub struct EventHub {
    subscribers: Mutex<Vec<Sender<SyncEvent>>>,
}

impl EventHub {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self) -> Receiver<SyncEvent> {
        let (sender, receiver) = channel();
        self.subscribers
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(sender);
        receiver
    }

    pub fn publish(&self, event: SyncEvent) {
        let mut subscribers = self
            .subscribers
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        subscribers.retain(|sender| sender.send(event.clone()).is_ok());
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }
}

#[cfg(test)]
mod tests {
    use super::{EventHub, SyncEvent};
    use crate::sync::resource::{ResourceKey, ResourceKind};

    #[test]
    fn dropped_receivers_are_pruned_on_publish() {
        let hub = EventHub::new();
        let kept = hub.subscribe();
        drop(hub.subscribe());
        assert_eq!(hub.subscriber_count(), 2);

        let key = ResourceKey::global(ResourceKind::Specialties);
        hub.publish(SyncEvent::Updated { key: key.clone() });

        assert_eq!(hub.subscriber_count(), 1);
        assert_eq!(kept.try_recv().unwrap(), SyncEvent::Updated { key });
    }
}
