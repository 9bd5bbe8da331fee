//! Repeated-message suppression.
//!
//! The synthesizer emits one sentence per frame; most frames repeat the
//! previous sentence. The announcer is the only cross-frame state in the
//! guidance path and it lives with the caller, not inside the synthesizer.

/// Caller-held last-message state.
#[derive(Clone, Debug, Default)]
pub struct Announcer {
    last: Option<String>,
}

impl Announcer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a freshly synthesized message. Returns true when it differs
    /// from the previous one and should be spoken.
    pub fn observe(&mut self, message: &str) -> bool {
        if self.last.as_deref() == Some(message) {
            return false;
        }
        self.last = Some(message.to_string());
        true
    }

    pub fn last(&self) -> Option<&str> {
        self.last.as_deref()
    }

    /// Forget the last message, e.g. after pause/resume so guidance is
    /// re-announced when playback continues.
    pub fn reset(&mut self) {
        self.last = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_message_is_spoken() {
        let mut announcer = Announcer::new();
        assert!(announcer.observe("Path clear. Proceeding."));
        assert_eq!(announcer.last(), Some("Path clear. Proceeding."));
    }

    #[test]
    fn identical_consecutive_messages_are_suppressed() {
        let mut announcer = Announcer::new();
        assert!(announcer.observe("HAZARD ALERT: person ahead and nearby."));
        assert!(!announcer.observe("HAZARD ALERT: person ahead and nearby."));
        assert!(announcer.observe("Path clear. Proceeding."));
        assert!(announcer.observe("HAZARD ALERT: person ahead and nearby."));
    }

    #[test]
    fn reset_forces_reannouncement() {
        let mut announcer = Announcer::new();
        assert!(announcer.observe("Proceed. Green light ahead."));
        announcer.reset();
        assert!(announcer.observe("Proceed. Green light ahead."));
    }
}
