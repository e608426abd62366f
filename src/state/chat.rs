// Chat transcript
// The UI owns the message list; the store only hands back replies

use std::time::{Duration, Instant};
use warehouse_studio_backend::chat::{loading_steps, ChatMessage, ChatReply, MessageKind};

/// Gaps between loading steps completing
pub const STEP_DELAYS_MS: [u64; 4] = [600, 900, 1100, 700];
/// A reply is never shown sooner than this after sending
pub const MIN_REPLY_DELAY: Duration = Duration::from_millis(3500);
/// Extra delay drawn on top of the minimum
pub const REPLY_JITTER_MS: u64 = 1000;

/// Prompts offered while the transcript is empty
pub const SUGGESTIONS: [(&str, &str); 5] = [
    ("Recent safety violations", "Show me all PPE violations in the last hour"),
    ("Evening shift status", "Is the evening shift adequately staffed?"),
    ("Truck queue status", "How many trucks are currently waiting?"),
    ("Operations overview", "What's the overall health of operations right now?"),
    ("RFP win rate", "What's our win rate this quarter and why are we losing?"),
];

/// Steps that show as done `elapsed` after sending
///
/// The first step is only highlighted after the first delay; the last one is
/// highlighted, never ticked, until the reply lands.
pub fn completed_steps(elapsed: Duration) -> usize {
    let elapsed = elapsed.as_millis() as u64;
    let mut at = STEP_DELAYS_MS[0];
    let mut done = 0;
    for delay in &STEP_DELAYS_MS[1..] {
        at += delay;
        if elapsed >= at {
            done += 1;
        }
    }
    done
}

#[derive(Debug, Clone)]
struct Pending {
    started: Instant,
}

/// Master chat messages and the in-flight request, if any
#[derive(Debug, Clone, Default)]
pub struct ChatTranscript {
    /// Messages in display order
    pub messages: Vec<ChatMessage>,
    /// Text box contents
    pub input: String,
    pending: Option<Pending>,
}

impl ChatTranscript {
    /// A reply is outstanding
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Post `text` as a user message with a loading placeholder
    ///
    /// Returns the message to send, or `None` if it is blank or a reply is
    /// still outstanding.
    pub fn begin(&mut self, text: &str) -> Option<String> {
        let text = text.trim();
        if text.is_empty() || self.is_pending() {
            return None;
        }

        self.messages.push(ChatMessage::user(text));
        self.messages.push(ChatMessage::loading(loading_steps(text)));
        self.pending = Some(Pending {
            started: Instant::now(),
        });
        self.input.clear();
        Some(text.to_string())
    }

    /// Advance the loading placeholder's ticks
    pub fn tick(&mut self, now: Instant) {
        let Some(pending) = &self.pending else {
            return;
        };
        let done = completed_steps(now.saturating_duration_since(pending.started));
        for message in self.messages.iter_mut().filter(|m| m.kind == MessageKind::Loading) {
            if let Some(steps) = message.loading_steps.as_mut() {
                for (i, step) in steps.iter_mut().enumerate() {
                    step.completed = i < done;
                }
            }
        }
    }

    /// Index of the step currently highlighted, if a reply is pending
    pub fn active_step(&self, now: Instant) -> Option<usize> {
        let pending = self.pending.as_ref()?;
        let elapsed = now.saturating_duration_since(pending.started);
        if elapsed < Duration::from_millis(STEP_DELAYS_MS[0]) {
            return None;
        }
        Some(completed_steps(elapsed))
    }

    /// Swap the placeholder for the reply, or for the error message
    pub fn finish(&mut self, reply: Result<ChatReply, String>) {
        if self.pending.take().is_none() {
            return;
        }
        self.remove_placeholder();
        self.messages.push(match reply {
            Ok(reply) => ChatMessage::from_reply(reply),
            Err(_) => ChatMessage::system_error(),
        });
    }

    /// Drop the outstanding request without a reply
    pub fn abandon(&mut self) {
        self.pending = None;
        self.remove_placeholder();
    }

    fn remove_placeholder(&mut self) {
        self.messages.retain(|m| m.kind != MessageKind::Loading);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reply() -> ChatReply {
        ChatReply {
            response: "Evening shift is at 92% coverage".into(),
            handled_by: "Labour Planner".into(),
            agent_id: "labour".into(),
            actions: Vec::new(),
        }
    }

    #[test]
    fn test_step_schedule() {
        assert_eq!(completed_steps(Duration::from_millis(0)), 0);
        assert_eq!(completed_steps(Duration::from_millis(1499)), 0);
        assert_eq!(completed_steps(Duration::from_millis(1500)), 1);
        assert_eq!(completed_steps(Duration::from_millis(2600)), 2);
        assert_eq!(completed_steps(Duration::from_millis(3300)), 3);
        assert_eq!(completed_steps(Duration::from_secs(60)), 3);
    }

    #[test]
    fn test_blank_and_concurrent_sends_rejected() {
        let mut chat = ChatTranscript::default();
        assert!(chat.begin("   ").is_none());
        assert_eq!(chat.begin(" hello ").as_deref(), Some("hello"));
        assert!(chat.begin("again").is_none());
        assert_eq!(chat.messages.len(), 2);
        assert_eq!(chat.messages[1].kind, MessageKind::Loading);
    }

    #[test]
    fn test_finish_replaces_placeholder() {
        let mut chat = ChatTranscript::default();
        chat.begin("Is the evening shift adequately staffed?");
        chat.finish(Ok(reply()));

        assert!(!chat.is_pending());
        assert_eq!(chat.messages.len(), 2);
        assert_eq!(chat.messages[1].handled_by.as_deref(), Some("Labour Planner"));
    }

    #[test]
    fn test_error_becomes_system_message() {
        let mut chat = ChatTranscript::default();
        chat.begin("hello");
        chat.finish(Err("boom".into()));
        assert_eq!(chat.messages[1].handled_by.as_deref(), Some("System"));
    }

    #[test]
    fn test_late_reply_after_abandon_is_dropped() {
        let mut chat = ChatTranscript::default();
        chat.begin("hello");
        chat.abandon();
        chat.finish(Ok(reply()));
        assert_eq!(chat.messages.len(), 1);
    }

    #[test]
    fn test_tick_marks_steps() {
        let mut chat = ChatTranscript::default();
        chat.begin("any dock delays?");
        let started = Instant::now();
        chat.tick(started + Duration::from_secs(3));
        let steps = chat.messages[1].loading_steps.as_ref().unwrap();
        assert_eq!(steps.iter().filter(|s| s.completed).count(), 2);
    }
}
