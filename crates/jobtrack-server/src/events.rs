//! Notification hub for the real-time channel.
//!
//! This module provides the pub/sub mechanism behind the WebSocket
//! notification channel. Job route handlers publish events when a job is
//! created, updated, or deleted; connected clients for that user receive
//! them as JSON frames.
//!
//! # Architecture
//!
//! - Uses `tokio::sync::broadcast` for multi-subscriber pub/sub
//! - One channel per user (created lazily on first subscription)
//! - Channels are cleaned up when all subscribers disconnect
//!
//! # Event Types
//!
//! - `job`: Published on create/update/delete of a job
//! - `heartbeat`: Sent periodically to keep connections alive
//! - `catchup`: Sent when a subscriber falls behind

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::{RwLock, broadcast};

use jobtrack_core::{JobId, JobStatus, UserId};

/// Default channel capacity for broadcast channels.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 256;

/// Heartbeat interval in seconds.
pub const HEARTBEAT_INTERVAL_SECS: u64 = 30;

// ============================================================================
// Event Types
// ============================================================================

/// What happened to a job.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum JobAction {
    Created,
    Updated,
    Deleted,
}

/// An event that can be pushed to subscribers.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Notification {
    /// A job was created, updated, or deleted.
    Job(JobEvent),
    /// Periodic heartbeat to keep the connection alive.
    Heartbeat(HeartbeatEvent),
    /// Client fell behind and should refetch via the REST API.
    Catchup(CatchupEvent),
}

/// Event data for a job mutation.
#[derive(Debug, Clone, Serialize)]
pub struct JobEvent {
    /// The job ID.
    pub job_id: JobId,
    /// What happened.
    pub action: JobAction,
    /// Company on the record.
    pub company: String,
    /// Position title on the record.
    pub title: String,
    /// Status after the mutation.
    pub status: JobStatus,
    /// Timestamp of the event.
    pub timestamp: DateTime<Utc>,
}

/// Heartbeat event data.
#[derive(Debug, Clone, Serialize)]
pub struct HeartbeatEvent {
    /// Current timestamp.
    pub timestamp: DateTime<Utc>,
}

/// Catchup event sent when a subscriber falls behind.
#[derive(Debug, Clone, Serialize)]
pub struct CatchupEvent {
    /// Number of events missed.
    pub events_missed: u64,
    /// Timestamp of the catchup event.
    pub timestamp: DateTime<Utc>,
}

// ============================================================================
// Notification Hub
// ============================================================================

/// Manages broadcast channels for per-user notifications.
///
/// Each user has their own broadcast channel. Channels are created lazily
/// when the first subscriber connects and cleaned up when all subscribers
/// disconnect.
#[derive(Debug, Clone)]
pub struct NotificationHub {
    /// Map of user_id -> broadcast sender.
    channels: Arc<RwLock<HashMap<UserId, broadcast::Sender<Notification>>>>,
    /// Channel capacity for new channels.
    capacity: usize,
}

impl Default for NotificationHub {
    fn default() -> Self {
        Self::new()
    }
}

impl NotificationHub {
    /// Create a new hub with default capacity.
    pub fn new() -> Self {
        Self {
            channels: Arc::new(RwLock::new(HashMap::new())),
            capacity: DEFAULT_CHANNEL_CAPACITY,
        }
    }

    /// Create a new hub with custom capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            channels: Arc::new(RwLock::new(HashMap::new())),
            capacity,
        }
    }

    /// Subscribe to notifications for a user.
    ///
    /// Creates the channel if it doesn't exist.
    pub async fn subscribe(&self, user_id: UserId) -> broadcast::Receiver<Notification> {
        // First try to get an existing channel
        {
            let channels = self.channels.read().await;
            if let Some(sender) = channels.get(&user_id) {
                return sender.subscribe();
            }
        }

        // Create new channel
        let mut channels = self.channels.write().await;
        // Check again in case another task created it
        if let Some(sender) = channels.get(&user_id) {
            return sender.subscribe();
        }

        let (sender, receiver) = broadcast::channel(self.capacity);
        channels.insert(user_id, sender);

        tracing::debug!(
            user_id = %user_id,
            capacity = self.capacity,
            "Created notification channel for user"
        );

        receiver
    }

    /// Publish a notification to all of a user's subscribers.
    ///
    /// Returns the number of receivers that got the event, or None if no
    /// channel exists for this user.
    pub async fn publish(&self, user_id: UserId, event: Notification) -> Option<usize> {
        let channels = self.channels.read().await;
        if let Some(sender) = channels.get(&user_id) {
            match sender.send(event) {
                Ok(count) => {
                    tracing::trace!(
                        user_id = %user_id,
                        receivers = count,
                        "Published notification"
                    );
                    Some(count)
                }
                Err(_) => {
                    // No receivers - fine, channel will be cleaned up
                    tracing::trace!(user_id = %user_id, "No subscribers for notification");
                    Some(0)
                }
            }
        } else {
            None
        }
    }

    /// Publish a job event (convenience method).
    pub async fn publish_job(
        &self,
        user_id: UserId,
        job: &jobtrack_core::Job,
        action: JobAction,
    ) -> Option<usize> {
        let event = Notification::Job(JobEvent {
            job_id: job.id,
            action,
            company: job.company.clone(),
            title: job.title.clone(),
            status: job.status,
            timestamp: Utc::now(),
        });
        self.publish(user_id, event).await
    }

    /// Get the number of active channels.
    pub async fn channel_count(&self) -> usize {
        self.channels.read().await.len()
    }

    /// Get the number of subscribers for a user.
    pub async fn subscriber_count(&self, user_id: UserId) -> usize {
        let channels = self.channels.read().await;
        channels
            .get(&user_id)
            .map(|s| s.receiver_count())
            .unwrap_or(0)
    }

    /// Clean up channels with no subscribers.
    pub async fn cleanup_empty_channels(&self) -> usize {
        let mut channels = self.channels.write().await;
        let before = channels.len();
        channels.retain(|id, sender| {
            let has_receivers = sender.receiver_count() > 0;
            if !has_receivers {
                tracing::debug!(user_id = %id, "Cleaning up empty notification channel");
            }
            has_receivers
        });
        before - channels.len()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use jobtrack_core::Job;

    #[tokio::test]
    async fn test_hub_subscribe() {
        let hub = NotificationHub::new();
        let user_id = UserId::new();

        let _receiver = hub.subscribe(user_id).await;
        assert_eq!(hub.channel_count().await, 1);
        assert_eq!(hub.subscriber_count(user_id).await, 1);
    }

    #[tokio::test]
    async fn test_hub_multiple_subscribers() {
        let hub = NotificationHub::new();
        let user_id = UserId::new();

        let _r1 = hub.subscribe(user_id).await;
        let _r2 = hub.subscribe(user_id).await;

        assert_eq!(hub.channel_count().await, 1);
        assert_eq!(hub.subscriber_count(user_id).await, 2);
    }

    #[tokio::test]
    async fn test_hub_publish() {
        let hub = NotificationHub::new();
        let user_id = UserId::new();
        let job = Job::new(user_id, "Acme", "Platform Engineer");

        let mut receiver = hub.subscribe(user_id).await;

        let count = hub.publish_job(user_id, &job, JobAction::Created).await;
        assert_eq!(count, Some(1));

        let event = receiver.recv().await.unwrap();
        match event {
            Notification::Job(e) => {
                assert_eq!(e.job_id, job.id);
                assert_eq!(e.company, "Acme");
            }
            _ => panic!("Expected Job event"),
        }
    }

    #[tokio::test]
    async fn test_hub_publish_no_channel() {
        let hub = NotificationHub::new();
        let user_id = UserId::new();
        let job = Job::new(user_id, "Acme", "Platform Engineer");

        let count = hub.publish_job(user_id, &job, JobAction::Created).await;
        assert_eq!(count, None);
    }

    #[tokio::test]
    async fn test_hub_user_isolation() {
        let hub = NotificationHub::new();
        let alice = UserId::new();
        let bob = UserId::new();
        let job = Job::new(alice, "Acme", "Platform Engineer");

        let mut alice_rx = hub.subscribe(alice).await;
        let mut bob_rx = hub.subscribe(bob).await;

        let _ = hub.publish_job(alice, &job, JobAction::Created).await;

        assert!(alice_rx.recv().await.is_ok());
        // Bob's channel never saw the event.
        assert!(bob_rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_hub_cleanup_spares_live_subscribers() {
        let hub = NotificationHub::new();
        let user_id = UserId::new();

        let receiver = hub.subscribe(user_id).await;

        // A live receiver keeps the channel; a disconnecting subscriber
        // must drop its receiver before cleanup removes the channel.
        assert_eq!(hub.cleanup_empty_channels().await, 0);
        assert_eq!(hub.channel_count().await, 1);

        drop(receiver);
        assert_eq!(hub.cleanup_empty_channels().await, 1);
        assert_eq!(hub.channel_count().await, 0);
    }

    #[tokio::test]
    async fn test_hub_cleanup() {
        let hub = NotificationHub::new();
        let user_id = UserId::new();

        {
            let _receiver = hub.subscribe(user_id).await;
            assert_eq!(hub.channel_count().await, 1);
        }
        // receiver dropped

        let cleaned = hub.cleanup_empty_channels().await;
        assert_eq!(cleaned, 1);
        assert_eq!(hub.channel_count().await, 0);
    }

    #[tokio::test]
    async fn test_notification_serialization() {
        let job = Job::new(UserId::new(), "Acme", "Platform Engineer");
        let event = Notification::Job(JobEvent {
            job_id: job.id,
            action: JobAction::Updated,
            company: job.company.clone(),
            title: job.title.clone(),
            status: JobStatus::Interviewing,
            timestamp: Utc::now(),
        });

        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"type\":\"job\""));
        assert!(json.contains("\"action\":\"updated\""));
        assert!(json.contains("\"status\":\"interviewing\""));
    }

    #[tokio::test]
    async fn test_catchup_serialization() {
        let event = Notification::Catchup(CatchupEvent {
            events_missed: 100,
            timestamp: Utc::now(),
        });

        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"type\":\"catchup\""));
        assert!(json.contains("\"events_missed\":100"));
    }
}
