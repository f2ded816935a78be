use std::time::Duration;
use tokio::time::Instant;

/// A transient user-visible message that clears itself once `expires_at` passes.
#[derive(PartialEq, Debug, Clone)]
pub struct Notice {
    message: String,
    expires_at: Instant,
}

impl Notice {
    pub fn new(message: impl Into<String>, now: Instant, duration: Duration) -> Self {
        Notice {
            message: message.into(),
            expires_at: now + duration,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn is_active(&self, now: Instant) -> bool {
        now < self.expires_at
    }
}
