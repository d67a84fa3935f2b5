use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The icon identifier carried by every challenge extracted from a stream.
pub const CHALLENGE_ICON: &str = "lightbulb";

/// A climate-change sub-topic extracted from a streamed chat answer.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ChallengeDraft {
    /// `topic-<ordinal>`, unique within a single parse only.
    pub id: String,
    pub name: String,
    /// Always empty on the streaming extraction path.
    pub explanation: String,
    pub citation: String,
    pub url: String,
    pub icon: String,
}

impl ChallengeDraft {
    /// Builds the draft for the `ordinal`-th topic match.
    pub fn new(ordinal: usize, name: String, citation: String, url: String) -> Self {
        Self {
            id: format!("topic-{ordinal}"),
            name,
            explanation: String::new(),
            citation,
            url,
            icon: CHALLENGE_ICON.to_string(),
        }
    }
}

/// The best-effort view of a (possibly partial) chat answer.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedResult {
    pub summary: String,
    pub challenges: Vec<ChallengeDraft>,
}

impl ParsedResult {
    /// `true` when there is neither prose nor any extracted challenge yet.
    pub fn is_empty(&self) -> bool {
        self.summary.is_empty() && self.challenges.is_empty()
    }

    pub fn challenge_count(&self) -> usize {
        self.challenges.len()
    }
}

/// Who authored a message.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Assistant,
}

/// The content of a chat message: either free text or an interpreted answer.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum MessageContent {
    PlainText(String),
    Structured(ParsedResult),
}

impl MessageContent {
    /// Returns the interpreted answer, if this is a structured message.
    pub fn as_structured(&self) -> Option<&ParsedResult> {
        match self {
            Self::Structured(result) => Some(result),
            Self::PlainText(_) => None,
        }
    }
}

/// A single entry in a conversation.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ChatMessage {
    pub id: Uuid,
    pub role: Role,
    pub content: MessageContent,
    pub created_at: DateTime<Utc>,
}

impl ChatMessage {
    pub fn new(role: Role, content: MessageContent) -> Self {
        Self::with_id(Uuid::new_v4(), role, content)
    }

    pub fn with_id(id: Uuid, role: Role, content: MessageContent) -> Self {
        Self {
            id,
            role,
            content,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_content_is_tagged() {
        let content = MessageContent::PlainText("hello".to_string());
        let json = serde_json::to_value(&content).unwrap();
        assert_eq!(json["type"], "plain_text");
        assert_eq!(json["value"], "hello");

        let structured = MessageContent::Structured(ParsedResult::default());
        let json = serde_json::to_value(&structured).unwrap();
        assert_eq!(json["type"], "structured");
        assert_eq!(json["value"]["challenges"], serde_json::json!([]));
    }

    #[test]
    fn test_challenge_draft_defaults() {
        let draft = ChallengeDraft::new(3, "Heat".into(), String::new(), String::new());
        assert_eq!(draft.id, "topic-3");
        assert_eq!(draft.explanation, "");
        assert_eq!(draft.icon, CHALLENGE_ICON);
    }
}
