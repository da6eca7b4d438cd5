use crate::api::models::ChatRequest;
use crate::api::stream::StreamEvent;

pub mod trigger;

use trigger::extract_info_trigger;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Side effects the UI must carry out after applying a stream event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatEffect {
    /// A thread was assigned for the first time and should be persisted.
    PinThread(String),
    /// The reply carried an info fragment to append to the restaurant info.
    AppendInfo(String),
}

#[derive(Debug, Default)]
struct Turn {
    accumulated: String,
    assistant_index: Option<usize>,
    finished: bool,
}

/// In-memory transcript of the assistant chat plus the state of the reply
/// currently streaming in.
#[derive(Debug, Default)]
pub struct ChatState {
    messages: Vec<ChatMessage>,
    thread_id: Option<String>,
    turn: Option<Turn>,
}

impl ChatState {
    pub fn new(thread_id: Option<String>) -> Self {
        Self {
            thread_id: thread_id.filter(|id| !id.is_empty()),
            ..Self::default()
        }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn thread_id(&self) -> Option<&str> {
        self.thread_id.as_deref()
    }

    pub fn is_streaming(&self) -> bool {
        self.turn.is_some()
    }

    /// Records the user's message and returns the request to send, or `None`
    /// when the input is blank or a reply is still streaming.
    pub fn begin_turn(&mut self, input: &str, assistant_id: &str) -> Option<ChatRequest> {
        let text = input.trim();
        if text.is_empty() || self.is_streaming() {
            return None;
        }

        self.messages.push(ChatMessage {
            role: Role::User,
            content: text.to_string(),
        });
        self.turn = Some(Turn::default());

        Some(ChatRequest {
            assistant_id: assistant_id.to_string(),
            message: text.to_string(),
            thread_id: self.thread_id.clone(),
        })
    }

    /// Applies one stream event to the reply in progress.
    pub fn apply(&mut self, event: StreamEvent) -> Vec<ChatEffect> {
        let mut effects = Vec::new();
        let Some(turn) = self.turn.as_mut() else {
            tracing::debug!("stream event outside of a turn, ignoring");
            return effects;
        };

        if let Some(thread_id) = event.thread_id.filter(|id| !id.is_empty()) {
            if self.thread_id.is_none() {
                self.thread_id = Some(thread_id.clone());
                effects.push(ChatEffect::PinThread(thread_id));
            }
        }

        if let Some(delta) = event.delta.filter(|delta| !delta.is_empty()) {
            turn.accumulated.push_str(&delta);
            match turn.assistant_index {
                Some(index) => self.messages[index].content = turn.accumulated.clone(),
                None => {
                    turn.assistant_index = Some(self.messages.len());
                    self.messages.push(ChatMessage::assistant(turn.accumulated.clone()));
                }
            }
        }

        if event.done && !turn.finished {
            turn.finished = true;
            if let Some(trigger) = extract_info_trigger(&turn.accumulated) {
                if let Some(fragment) = trigger.fragment {
                    effects.push(ChatEffect::AppendInfo(fragment));
                }
                turn.accumulated = trigger.visible_text;
                if let Some(index) = turn.assistant_index {
                    self.messages[index].content = turn.accumulated.clone();
                }
            }
        }

        if let Some(error) = event.error {
            self.messages.push(ChatMessage::assistant(format!("Error: {error}")));
        }

        effects
    }

    /// Ends the current turn. A transport failure becomes one error message.
    pub fn end_turn(&mut self, failure: Option<String>) {
        if let Some(failure) = failure {
            self.messages.push(ChatMessage::assistant(format!("Error: {failure}")));
        }
        self.turn = None;
    }
}

#[cfg(test)]
mod tests {
    use super::{trigger::ACKNOWLEDGEMENT, ChatEffect, ChatState, Role};
    use crate::api::stream::StreamEvent;

    fn delta(text: &str) -> StreamEvent {
        StreamEvent {
            delta: Some(text.to_string()),
            ..StreamEvent::default()
        }
    }

    fn done() -> StreamEvent {
        StreamEvent {
            done: true,
            ..StreamEvent::default()
        }
    }

    fn assistant_messages(chat: &ChatState) -> Vec<&str> {
        chat.messages()
            .iter()
            .filter(|m| m.role == Role::Assistant)
            .map(|m| m.content.as_str())
            .collect()
    }

    #[test]
    fn blank_input_does_not_start_a_turn() {
        let mut chat = ChatState::new(None);
        assert!(chat.begin_turn("   ", "asst").is_none());
        assert!(chat.messages().is_empty());
    }

    #[test]
    fn second_message_is_refused_while_streaming() {
        let mut chat = ChatState::new(None);
        let request = chat.begin_turn("  hello ", "asst").expect("turn should start");
        assert_eq!(request.message, "hello");
        assert!(request.thread_id.is_none());
        assert!(chat.begin_turn("again", "asst").is_none());

        chat.end_turn(None);
        assert!(chat.begin_turn("again", "asst").is_some());
    }

    #[test]
    fn deltas_upsert_one_assistant_message() {
        let mut chat = ChatState::new(None);
        chat.begin_turn("hi", "asst");
        chat.apply(delta("Hel"));
        chat.apply(delta("lo"));
        chat.apply(done());
        chat.end_turn(None);

        assert_eq!(chat.messages().len(), 2);
        assert_eq!(assistant_messages(&chat), vec!["Hello"]);
    }

    #[test]
    fn first_thread_id_is_pinned_and_later_ones_ignored() {
        let mut chat = ChatState::new(None);
        chat.begin_turn("hi", "asst");
        let effects = chat.apply(StreamEvent {
            thread_id: Some("thread_a".to_string()),
            ..StreamEvent::default()
        });
        assert_eq!(effects, vec![ChatEffect::PinThread("thread_a".to_string())]);

        let effects = chat.apply(StreamEvent {
            thread_id: Some("thread_b".to_string()),
            done: true,
            ..StreamEvent::default()
        });
        assert!(effects.is_empty());
        assert_eq!(chat.thread_id(), Some("thread_a"));
    }

    #[test]
    fn restored_thread_is_sent_and_never_replaced() {
        let mut chat = ChatState::new(Some("restored".to_string()));
        let request = chat.begin_turn("hi", "asst").expect("turn should start");
        assert_eq!(request.thread_id.as_deref(), Some("restored"));

        let effects = chat.apply(StreamEvent {
            thread_id: Some("other".to_string()),
            ..StreamEvent::default()
        });
        assert!(effects.is_empty());
        assert_eq!(chat.thread_id(), Some("restored"));
    }

    #[test]
    fn info_trigger_updates_info_and_hides_sentinel() {
        let mut chat = ChatState::new(None);
        chat.begin_turn("we have parking now", "asst");
        chat.apply(delta("Got it!\nINFO_TRIGGER= parking"));
        chat.apply(delta(" available\n"));
        let effects = chat.apply(done());

        assert_eq!(
            effects,
            vec![ChatEffect::AppendInfo("parking available".to_string())]
        );
        assert_eq!(assistant_messages(&chat), vec!["Got it!"]);
        assert!(!chat.messages().iter().any(|m| m.content.contains("INFO_TRIGGER")));
    }

    #[test]
    fn sentinel_only_reply_shows_acknowledgement() {
        let mut chat = ChatState::new(None);
        chat.begin_turn("note the terrace", "asst");
        chat.apply(delta("INFO_TRIGGER=Terrace open"));
        let effects = chat.apply(done());

        assert_eq!(effects, vec![ChatEffect::AppendInfo("Terrace open".to_string())]);
        assert_eq!(assistant_messages(&chat), vec![ACKNOWLEDGEMENT]);
    }

    #[test]
    fn empty_trigger_fragment_performs_no_update() {
        let mut chat = ChatState::new(None);
        chat.begin_turn("hi", "asst");
        chat.apply(delta("Sure.\nINFO_TRIGGER=  "));
        let effects = chat.apply(done());

        assert!(effects.is_empty());
        assert_eq!(assistant_messages(&chat), vec!["Sure."]);
    }

    #[test]
    fn repeated_done_applies_trigger_once() {
        let mut chat = ChatState::new(None);
        chat.begin_turn("hi", "asst");
        chat.apply(delta("INFO_TRIGGER=once"));
        assert_eq!(chat.apply(done()).len(), 1);
        assert!(chat.apply(done()).is_empty());
    }

    #[test]
    fn error_event_is_shown_as_assistant_message() {
        let mut chat = ChatState::new(None);
        chat.begin_turn("hi", "asst");
        chat.apply(delta("Partial"));
        chat.apply(StreamEvent {
            error: Some("failed".to_string()),
            ..StreamEvent::default()
        });
        chat.apply(delta(" answer"));

        assert_eq!(assistant_messages(&chat), vec!["Partial answer", "Error: failed"]);
    }

    #[test]
    fn transport_failure_appends_single_error() {
        let mut chat = ChatState::new(None);
        chat.begin_turn("hi", "asst");
        chat.end_turn(Some("connection refused".to_string()));

        assert_eq!(assistant_messages(&chat), vec!["Error: connection refused"]);
        assert!(!chat.is_streaming());
    }

    #[test]
    fn events_after_turn_end_are_ignored() {
        let mut chat = ChatState::new(None);
        chat.begin_turn("hi", "asst");
        chat.end_turn(None);
        chat.apply(delta("late"));
        assert_eq!(chat.messages().len(), 1);
    }
}
