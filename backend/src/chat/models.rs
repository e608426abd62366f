//! Chat data models
//!
//! Defines the structured reply returned by `/chat` and the UI-local
//! transcript messages built around it.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Text shown when a chat request fails
pub const CHAT_ERROR_TEXT: &str = "Sorry, I encountered an error processing your request.";

/// A follow-up action suggested with a reply
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatAction {
    /// Machine name of the action
    #[serde(rename = "type")]
    pub action_type: String,
    /// Button caption
    pub label: String,
    /// What the action would do
    pub description: String,
}

/// Body of a `/chat` request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    /// Free-text question
    pub message: String,
}

/// Structured canned reply
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatReply {
    /// Reply text
    pub response: String,
    /// Display name of the agent that answered
    pub handled_by: String,
    /// Id of the agent that answered (`master` for the fallback)
    pub agent_id: String,
    /// Suggested follow-up actions
    pub actions: Vec<ChatAction>,
}

/// Who a transcript message belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    /// Typed by the user
    User,
    /// Answer from an agent
    Agent,
    /// Placeholder while a reply is pending
    Loading,
}

/// Icon shown next to a loading step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepIcon {
    /// Looking up data
    Search,
    /// Analysing
    Brain,
    /// Finding patterns
    Sparkles,
    /// Wrapping up
    Check,
}

/// One progress step of a pending reply
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadingStep {
    /// Position, starting at "1"
    pub id: String,
    /// Caption
    pub text: String,
    /// Whether the step has finished
    pub completed: bool,
    /// Icon
    pub icon: StepIcon,
}

/// A message in a chat transcript
///
/// Transcripts live in the UI only; nothing here is persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    /// Unique identifier
    pub id: String,
    /// Sender kind
    #[serde(rename = "type")]
    pub kind: MessageKind,
    /// Text
    pub content: String,
    /// When the message was created
    pub timestamp: DateTime<Local>,
    /// Agent display name, for agent messages
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub handled_by: Option<String>,
    /// Agent id, for agent messages
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent_id: Option<String>,
    /// Suggested actions, for agent messages
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actions: Option<Vec<ChatAction>>,
    /// Progress steps, for loading messages
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loading_steps: Option<Vec<LoadingStep>>,
}

impl ChatMessage {
    fn new(kind: MessageKind, content: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            kind,
            content,
            timestamp: Local::now(),
            handled_by: None,
            agent_id: None,
            actions: None,
            loading_steps: None,
        }
    }

    /// Message typed by the user
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(MessageKind::User, content.into())
    }

    /// Placeholder shown while a reply is pending
    pub fn loading(steps: Vec<LoadingStep>) -> Self {
        Self {
            loading_steps: Some(steps),
            ..Self::new(MessageKind::Loading, String::new())
        }
    }

    /// Agent message built from a structured reply
    pub fn from_reply(reply: ChatReply) -> Self {
        Self {
            handled_by: Some(reply.handled_by),
            agent_id: Some(reply.agent_id),
            actions: Some(reply.actions),
            ..Self::new(MessageKind::Agent, reply.response)
        }
    }

    /// Agent message standing in for a failed request
    pub fn system_error() -> Self {
        Self {
            handled_by: Some("System".to_string()),
            ..Self::new(MessageKind::Agent, CHAT_ERROR_TEXT.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_reply_wire_format() {
        let reply = ChatReply {
            response: "ok".into(),
            handled_by: "Dock Scheduler".into(),
            agent_id: "dock".into(),
            actions: vec![ChatAction {
                action_type: "reroute".into(),
                label: "Re-route Trucks".into(),
                description: "Optimize dock assignments".into(),
            }],
        };
        let value = serde_json::to_value(&reply).unwrap();
        assert_eq!(value["handledBy"], json!("Dock Scheduler"));
        assert_eq!(value["agentId"], json!("dock"));
        assert_eq!(value["actions"][0]["type"], json!("reroute"));
    }

    #[test]
    fn test_system_error_message() {
        let message = ChatMessage::system_error();
        assert_eq!(message.kind, MessageKind::Agent);
        assert_eq!(message.handled_by.as_deref(), Some("System"));
        assert_eq!(message.content, CHAT_ERROR_TEXT);
    }

    #[test]
    fn test_ids_are_unique() {
        assert_ne!(ChatMessage::user("a").id, ChatMessage::user("a").id);
    }
}
