//! # Climate Chat Client
//!
//! This crate is the client core of a climate-change chat assistant. The
//! backend streams a prose answer followed by topic/source/url fields; this
//! crate consumes that stream, re-interprets it on every chunk into a
//! displayable [`ParsedResult`], and keeps the conversation and graph-explorer
//! state the front end renders.

pub mod config;
pub mod conversation;
pub mod errors;
pub mod graph;
pub mod interpreter;
pub mod stream;
pub mod types;

pub use config::ClientConfig;
pub use conversation::Conversation;
pub use errors::ChatError;
pub use graph::{GraphArena, NodeId, NodeKind};
pub use interpreter::ResponseInterpreter;
pub use stream::{ChatClient, ResponseBuffer};
pub use types::{
    ChallengeDraft, ChatMessage, MessageContent, ParsedResult, Role, CHALLENGE_ICON,
};
