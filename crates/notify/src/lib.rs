//! Fire-and-forget outbound webhook notifications.
//!
//! [`Notifier`] owns the sending half of a bounded channel; a single
//! background worker drains it and POSTs each [`Notification`] as JSON
//! to a configured URL. Submission never blocks a request: when the
//! channel is full the notification is logged and dropped.

use std::time::Duration;

use serde::Serialize;
use tokio::sync::mpsc;

/// Default bound on queued, undelivered notifications.
const DEFAULT_QUEUE_CAPACITY: usize = 256;

/// HTTP request timeout for a single delivery attempt.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

// ---------------------------------------------------------------------------
// Notification
// ---------------------------------------------------------------------------

/// A single outbound notification.
#[derive(Debug, Clone, Serialize)]
pub struct Notification {
    /// Routing group on the receiving side (e.g. `"blog"`).
    pub group: String,
    /// Human-readable message body.
    pub message: String,
}

impl Notification {
    pub fn new(group: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            message: message.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

/// Error type for webhook delivery failures.
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    /// The underlying HTTP request failed (network, DNS, timeout, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The remote server returned a non-2xx status code.
    #[error("Webhook returned HTTP {0}")]
    HttpStatus(u16),
}

// ---------------------------------------------------------------------------
// Notifier
// ---------------------------------------------------------------------------

/// Handle for submitting notifications from request handlers.
///
/// Cheaply cloneable; all clones feed the same worker. Dropping every
/// clone shuts the worker down after it drains the queue.
#[derive(Clone)]
pub struct Notifier {
    sender: mpsc::Sender<Notification>,
}

impl Notifier {
    /// Spawn the delivery worker and return a handle to it.
    ///
    /// `webhook_url = None` disables delivery: submissions are accepted
    /// and silently discarded, which keeps handler code unconditional.
    pub fn spawn(webhook_url: Option<String>) -> Self {
        Self::spawn_with_capacity(webhook_url, DEFAULT_QUEUE_CAPACITY)
    }

    /// Spawn with an explicit queue bound (exposed for tests).
    pub fn spawn_with_capacity(webhook_url: Option<String>, capacity: usize) -> Self {
        let (tx, rx) = mpsc::channel(capacity);
        tokio::spawn(deliver_loop(webhook_url, rx));
        Self { sender: tx }
    }

    /// Submit a notification without waiting for delivery.
    ///
    /// Policy on a full queue: log and drop. The request path must
    /// never block on notification throughput.
    pub fn submit(&self, notification: Notification) {
        if let Err(e) = self.sender.try_send(notification) {
            match e {
                mpsc::error::TrySendError::Full(n) => {
                    tracing::warn!(group = %n.group, "Notification queue full, dropping");
                }
                mpsc::error::TrySendError::Closed(n) => {
                    tracing::warn!(group = %n.group, "Notification worker gone, dropping");
                }
            }
        }
    }
}

/// Worker loop: drain the queue, deliver each notification in turn.
async fn deliver_loop(webhook_url: Option<String>, mut rx: mpsc::Receiver<Notification>) {
    let client = reqwest::Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .build()
        .expect("Failed to build reqwest HTTP client");

    while let Some(notification) = rx.recv().await {
        let Some(url) = webhook_url.as_deref() else {
            continue;
        };
        if let Err(e) = deliver(&client, url, &notification).await {
            // Log and drop; no retries on this path.
            tracing::warn!(
                error = %e,
                group = %notification.group,
                "Webhook delivery failed"
            );
        }
    }
}

/// POST a single notification as JSON.
async fn deliver(
    client: &reqwest::Client,
    url: &str,
    notification: &Notification,
) -> Result<(), NotifyError> {
    let response = client.post(url).json(notification).send().await?;
    if !response.status().is_success() {
        return Err(NotifyError::HttpStatus(response.status().as_u16()));
    }
    Ok(())
}
