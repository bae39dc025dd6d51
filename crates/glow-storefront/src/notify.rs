//! Transient UI timers: toast notifications and add-button feedback.
//!
//! Nothing here spawns timers. Each item records a deadline and the
//! controller's `tick` reports what has expired.

use std::collections::BTreeMap;
use std::time::Duration;

use glow_commerce::ProductId;
use tokio::time::Instant;

/// Colour/icon family of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Info,
    Error,
}

/// A toast message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub kind: NotificationKind,
    pub shown_at: Instant,
}

/// Lifecycle step reported by [`Notifier::tick`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifierEvent {
    /// Start the fade-out animation.
    Fade,
    /// Remove the notification.
    Dismiss,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Visible,
    Fading,
}

/// Holds at most one notification; a new one replaces the current.
#[derive(Debug, Clone)]
pub struct Notifier {
    current: Option<(Notification, Phase)>,
    ttl: Duration,
    fade: Duration,
}

impl Notifier {
    pub fn new(ttl: Duration, fade: Duration) -> Self {
        Self {
            current: None,
            ttl,
            fade,
        }
    }

    /// Show `message`, replacing any notification already on screen.
    pub fn show(
        &mut self,
        message: impl Into<String>,
        kind: NotificationKind,
        now: Instant,
    ) -> &Notification {
        let notification = Notification {
            message: message.into(),
            kind,
            shown_at: now,
        };
        &self.current.insert((notification, Phase::Visible)).0
    }

    /// Advance the current notification one lifecycle step if it is due.
    pub fn tick(&mut self, now: Instant) -> Option<NotifierEvent> {
        let event = match self.current.as_ref()? {
            (n, Phase::Visible) if now >= n.shown_at + self.ttl => NotifierEvent::Fade,
            (n, Phase::Fading) if now >= n.shown_at + self.ttl + self.fade => {
                NotifierEvent::Dismiss
            }
            _ => return None,
        };

        match event {
            NotifierEvent::Fade => {
                if let Some((_, phase)) = self.current.as_mut() {
                    *phase = Phase::Fading;
                }
            }
            NotifierEvent::Dismiss => self.current = None,
        }
        Some(event)
    }

    pub fn current(&self) -> Option<&Notification> {
        self.current.as_ref().map(|(n, _)| n)
    }

    pub fn is_fading(&self) -> bool {
        matches!(self.current, Some((_, Phase::Fading)))
    }
}

/// Restore deadlines for add-to-cart buttons showing "Added!".
#[derive(Debug, Clone)]
pub struct ButtonFeedback {
    pending: BTreeMap<ProductId, Instant>,
    duration: Duration,
}

impl ButtonFeedback {
    pub fn new(duration: Duration) -> Self {
        Self {
            pending: BTreeMap::new(),
            duration,
        }
    }

    /// Mark `id`'s button as just-added. Adding again pushes the restore out.
    pub fn start(&mut self, id: ProductId, now: Instant) {
        self.pending.insert(id, now + self.duration);
    }

    /// Remove and return buttons whose feedback has run its course.
    pub fn expire(&mut self, now: Instant) -> Vec<ProductId> {
        let due: Vec<ProductId> = self
            .pending
            .iter()
            .filter(|(_, deadline)| now >= **deadline)
            .map(|(id, _)| id.clone())
            .collect();
        for id in &due {
            self.pending.remove(id);
        }
        due
    }

    pub fn is_active(&self, id: &ProductId) -> bool {
        self.pending.contains_key(id)
    }
}
