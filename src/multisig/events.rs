//! Wallet event notifications
//!
//! Provides a broadcast channel for pushing lifecycle events to observers.
//! Delivery is best effort and never affects wallet state.

use crate::crypto::Address;
use crate::multisig::executor::ExecutionOutcome;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::broadcast;

/// Maximum number of events to buffer per subscriber
const BROADCAST_CAPACITY: usize = 256;

/// Events emitted by the wallet
#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(tag = "type", content = "data")]
pub enum WalletEvent {
    /// A transaction was proposed
    Submitted {
        proposer: Address,
        id: u64,
        destination: Address,
        value: u128,
        #[serde(with = "crate::multisig::transaction::hex_bytes")]
        payload: Vec<u8>,
        timestamp: DateTime<Utc>,
    },
    /// An owner confirmed a transaction
    Confirmed {
        owner: Address,
        id: u64,
        timestamp: DateTime<Utc>,
    },
    /// An owner withdrew a confirmation
    Revoked {
        owner: Address,
        id: u64,
        timestamp: DateTime<Utc>,
    },
    /// A transaction was dispatched to the executor
    Executed {
        caller: Address,
        id: u64,
        outcome: ExecutionOutcome,
        timestamp: DateTime<Utc>,
    },
}

impl WalletEvent {
    /// Transaction id the event refers to
    pub fn transaction_id(&self) -> u64 {
        match self {
            WalletEvent::Submitted { id, .. }
            | WalletEvent::Confirmed { id, .. }
            | WalletEvent::Revoked { id, .. }
            | WalletEvent::Executed { id, .. } => *id,
        }
    }
}

/// Fan-out of wallet events to observers
///
/// Observers that fall more than the channel capacity behind lose the
/// oldest events. Nothing in the wallet waits on them.
#[derive(Debug)]
pub struct EventBroadcaster {
    sender: broadcast::Sender<WalletEvent>,
}

impl EventBroadcaster {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(BROADCAST_CAPACITY);
        Self { sender }
    }

    /// Publish a wallet event
    ///
    /// A wallet with no observers drops the event.
    pub fn broadcast(&self, event: WalletEvent) {
        if self.sender.send(event).is_err() {
            log::trace!("No observers for wallet event");
        }
    }

    /// Register a new observer; it sees events published from now on
    pub fn subscribe(&self) -> broadcast::Receiver<WalletEvent> {
        self.sender.subscribe()
    }

    /// Number of registered observers
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventBroadcaster {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_broadcast_without_subscribers() {
        let broadcaster = EventBroadcaster::new();
        assert_eq!(broadcaster.subscriber_count(), 0);
        broadcaster.broadcast(WalletEvent::Confirmed {
            owner: Address::ZERO,
            id: 0,
            timestamp: Utc::now(),
        });
    }

    #[test]
    fn test_subscriber_receives_events() {
        let broadcaster = EventBroadcaster::new();
        let mut rx = broadcaster.subscribe();
        assert_eq!(broadcaster.subscriber_count(), 1);

        broadcaster.broadcast(WalletEvent::Revoked {
            owner: Address::ZERO,
            id: 3,
            timestamp: Utc::now(),
        });

        let event = rx.try_recv().unwrap();
        assert!(matches!(event, WalletEvent::Revoked { id: 3, .. }));
        assert_eq!(event.transaction_id(), 3);
    }

    #[test]
    fn test_event_json_shape() {
        let event = WalletEvent::Submitted {
            proposer: Address::ZERO,
            id: 0,
            destination: Address::new([1u8; 20]),
            value: 0,
            payload: vec![0xbe, 0xef],
            timestamp: Utc::now(),
        };

        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "Submitted");
        assert_eq!(json["data"]["payload"], "0xbeef");
        assert_eq!(json["data"]["id"], 0);
    }
}
