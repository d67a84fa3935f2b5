use thiserror::Error;

/// Custom error types for the chat client.
///
/// The response interpreter itself never fails; these errors come from the
/// transport, the configuration, and the graph arena.
#[derive(Error, Debug)]
pub enum ChatError {
    #[error("Failed to build Reqwest client: {0}")]
    ReqwestClientBuild(reqwest::Error),
    #[error("Failed to send request to chat backend: {0}")]
    Request(#[from] reqwest::Error),
    #[error("Chat backend returned status {status}: {body}")]
    Api { status: u16, body: String },
    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),
    #[error("Chat API URL is missing (set CLIMATECHAT_API_URL)")]
    MissingApiUrl,
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("Node {0} not found in graph")]
    UnknownNode(u64),
}
