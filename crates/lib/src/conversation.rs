//! # Conversation State
//!
//! Holds the ordered messages of a chat session plus the single slot for the
//! assistant answer that is still streaming in.

use crate::types::{ChatMessage, MessageContent, ParsedResult, Role};
use tracing::{debug, warn};
use uuid::Uuid;

/// The assistant answer currently being streamed.
#[derive(Debug, Clone)]
struct PendingAnswer {
    id: Uuid,
    latest: ParsedResult,
}

/// An ordered chat transcript with one in-progress assistant slot.
#[derive(Debug, Clone, Default)]
pub struct Conversation {
    messages: Vec<ChatMessage>,
    pending: Option<PendingAnswer>,
}

impl Conversation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a user message.
    pub fn push_user(&mut self, text: impl Into<String>) -> &ChatMessage {
        self.messages.push(ChatMessage::new(
            Role::User,
            MessageContent::PlainText(text.into()),
        ));
        &self.messages[self.messages.len() - 1]
    }

    /// Opens the in-progress slot for a new assistant answer and returns the
    /// id the finished message will carry.
    ///
    /// An answer that is still open is frozen with whatever it last received.
    pub fn begin_assistant(&mut self) -> Uuid {
        if self.pending.is_some() {
            warn!("Starting a new answer while another is still streaming; freezing the old one.");
            self.finish();
        }
        let id = Uuid::new_v4();
        self.pending = Some(PendingAnswer {
            id,
            latest: ParsedResult::default(),
        });
        id
    }

    /// Replaces the in-progress answer. The last applied result wins.
    ///
    /// Returns `false` if no answer is in progress.
    pub fn apply(&mut self, result: ParsedResult) -> bool {
        match self.pending.as_mut() {
            Some(pending) => {
                debug!(
                    id = %pending.id,
                    challenges = result.challenge_count(),
                    "Applying parsed update"
                );
                pending.latest = result;
                true
            }
            None => false,
        }
    }

    /// The result currently shown for the streaming answer, if any.
    pub fn in_progress(&self) -> Option<&ParsedResult> {
        self.pending.as_ref().map(|p| &p.latest)
    }

    /// Freezes the in-progress answer into the transcript.
    pub fn finish(&mut self) -> Option<&ChatMessage> {
        let pending = self.pending.take()?;
        self.messages.push(ChatMessage::with_id(
            pending.id,
            Role::Assistant,
            MessageContent::Structured(pending.latest),
        ));
        self.messages.last()
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }
}
