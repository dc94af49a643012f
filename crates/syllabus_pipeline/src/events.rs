//! Change notifications for persisted course stages.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tracing::trace;

/// Buffered events per subscriber before the oldest are dropped.
const CHANNEL_CAPACITY: usize = 64;

/// Which stage was persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum CourseEventKind {
    /// Record created
    Created,
    /// Layout written
    LayoutPersisted,
    /// Banner written
    BannerPersisted,
    /// Content array written
    ContentPersisted,
    /// Half-created record removed after a failed layout
    Removed,
}

/// One notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseEvent {
    /// Course identifier
    pub cid: String,
    /// Persisted stage
    pub kind: CourseEventKind,
}

/// Broadcast channel readers subscribe to instead of polling.
///
/// Publishing never blocks and never fails; with no subscribers events are
/// simply dropped.
///
/// # Examples
///
/// ```
/// use syllabus_pipeline::{CourseEventKind, CourseEvents};
///
/// # #[tokio::main]
/// # async fn main() {
/// let events = CourseEvents::new();
/// let mut rx = events.subscribe();
/// events.publish("c-1", CourseEventKind::LayoutPersisted);
/// let event = rx.recv().await.unwrap();
/// assert_eq!(event.cid, "c-1");
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct CourseEvents {
    sender: broadcast::Sender<CourseEvent>,
}

impl CourseEvents {
    /// New channel with no subscribers.
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self { sender }
    }

    /// Receive events published after this call.
    pub fn subscribe(&self) -> broadcast::Receiver<CourseEvent> {
        self.sender.subscribe()
    }

    /// Notify subscribers.
    pub fn publish(&self, cid: &str, kind: CourseEventKind) {
        let delivered = self
            .sender
            .send(CourseEvent {
                cid: cid.to_string(),
                kind,
            })
            .unwrap_or(0);
        trace!(cid, %kind, delivered, "Course event published");
    }
}

impl Default for CourseEvents {
    fn default() -> Self {
        Self::new()
    }
}
