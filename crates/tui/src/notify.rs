use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct ToastState {
    pub message: String,
    pub level: ToastLevel,
    pub shown_at: Instant,
}

/// Fire-and-forget sink for user-visible messages.
pub trait Notifier {
    fn notify(&mut self, level: ToastLevel, message: String);

    fn error(&mut self, message: impl Into<String>) {
        self.notify(ToastLevel::Error, message.into());
    }

    fn warning(&mut self, message: impl Into<String>) {
        self.notify(ToastLevel::Warning, message.into());
    }

    fn success(&mut self, message: impl Into<String>) {
        self.notify(ToastLevel::Success, message.into());
    }
}

/// Single-slot toast area: a new message replaces the one on screen.
#[derive(Debug)]
pub struct Toasts {
    current: Option<ToastState>,
    ttl: Duration,
}

impl Toasts {
    pub fn new(ttl: Duration) -> Self {
        Self { current: None, ttl }
    }

    pub fn current(&self) -> Option<&ToastState> {
        self.current.as_ref()
    }

    pub fn expire(&mut self, now: Instant) {
        if self
            .current
            .as_ref()
            .is_some_and(|toast| now.duration_since(toast.shown_at) >= self.ttl)
        {
            self.current = None;
        }
    }
}

impl Notifier for Toasts {
    fn notify(&mut self, level: ToastLevel, message: String) {
        tracing::debug!(?level, %message, "toast");
        self.current = Some(ToastState {
            message,
            level,
            shown_at: Instant::now(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn newer_toast_replaces_current() {
        let mut toasts = Toasts::new(Duration::from_secs(4));
        toasts.error("first");
        toasts.success("second");
        let toast = toasts.current().unwrap();
        assert_eq!(toast.message, "second");
        assert_eq!(toast.level, ToastLevel::Success);
    }

    #[test]
    fn toast_expires_after_ttl() {
        let mut toasts = Toasts::new(Duration::from_secs(4));
        toasts.warning("Nenhum resultado encontrado.");
        let shown_at = toasts.current().unwrap().shown_at;

        toasts.expire(shown_at + Duration::from_secs(1));
        assert!(toasts.current().is_some());

        toasts.expire(shown_at + Duration::from_secs(4));
        assert!(toasts.current().is_none());
    }
}
