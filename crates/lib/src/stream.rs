//! # Streaming Chat Client
//!
//! Issues a chat query against the backend and feeds each chunk of the
//! response body through the [`ResponseInterpreter`], reporting every
//! intermediate [`ParsedResult`] to the caller in arrival order.

use crate::{
    config::ClientConfig, errors::ChatError, interpreter::ResponseInterpreter,
    types::ParsedResult,
};
use reqwest::Client as ReqwestClient;
use serde::Serialize;
use std::borrow::Cow;
use std::time::Duration;
use tracing::{debug, info, warn};

/// The bytes received so far for one in-flight response.
///
/// Append-only. A chunk may end in the middle of a multi-byte character, so
/// [`ResponseBuffer::text`] holds back an incomplete trailing sequence.
#[derive(Debug, Clone, Default)]
pub struct ResponseBuffer {
    bytes: Vec<u8>,
}

impl ResponseBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, chunk: &[u8]) {
        self.bytes.extend_from_slice(chunk);
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// The buffer decoded for display.
    ///
    /// Invalid sequences become U+FFFD, as in [`ResponseBuffer::finish`]. Only
    /// an incomplete sequence at the very end is held back until its
    /// remaining bytes arrive.
    pub fn text(&self) -> Cow<'_, str> {
        let mut rest = self.bytes.as_slice();
        let mut out = match std::str::from_utf8(rest) {
            Ok(text) => return Cow::Borrowed(text),
            Err(_) => String::with_capacity(rest.len()),
        };

        loop {
            match std::str::from_utf8(rest) {
                Ok(text) => {
                    out.push_str(text);
                    break;
                }
                Err(e) => {
                    let (valid, after) = rest.split_at(e.valid_up_to());
                    // `valid_up_to` guarantees this slice is UTF-8.
                    out.push_str(std::str::from_utf8(valid).unwrap_or_default());
                    match e.error_len() {
                        Some(invalid) => {
                            out.push(char::REPLACEMENT_CHARACTER);
                            rest = &after[invalid..];
                        }
                        // Incomplete tail: wait for the next chunk.
                        None => break,
                    }
                }
            }
        }
        Cow::Owned(out)
    }

    /// Consumes the buffer once the transport is done.
    pub fn finish(self) -> String {
        String::from_utf8_lossy(&self.bytes).into_owned()
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    query: &'a str,
}

/// A client for the streaming chat-query endpoint.
#[derive(Debug, Clone)]
pub struct ChatClient {
    client: ReqwestClient,
    api_url: String,
    interpreter: ResponseInterpreter,
}

impl ChatClient {
    /// Creates a new `ChatClient` from the given configuration.
    pub fn new(config: &ClientConfig) -> Result<Self, ChatError> {
        let client = ReqwestClient::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(ChatError::ReqwestClientBuild)?;
        Ok(Self {
            client,
            api_url: config.api_url.clone(),
            interpreter: ResponseInterpreter::new()?,
        })
    }

    pub fn interpreter(&self) -> &ResponseInterpreter {
        &self.interpreter
    }

    /// Streams the answer to `query`.
    ///
    /// `on_update` is called after every chunk that grows the buffer, with the
    /// result re-derived from the whole buffer so far. The returned value is
    /// the result for the complete response.
    pub async fn stream_query<F>(
        &self,
        query: &str,
        mut on_update: F,
    ) -> Result<ParsedResult, ChatError>
    where
        F: FnMut(&ParsedResult),
    {
        let url = format!("{}/chat", self.api_url);
        info!("Streaming chat query to: {}", url);

        let mut response = self
            .client
            .post(&url)
            .json(&ChatRequest { query })
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = match response.text().await {
                Ok(body) => body,
                Err(e) => {
                    warn!(status, "Failed to read error body from chat backend: {e}");
                    String::new()
                }
            };
            return Err(ChatError::Api { status, body });
        }

        let mut buffer = ResponseBuffer::new();
        let mut chunks = 0usize;
        while let Some(chunk) = response.chunk().await? {
            if chunk.is_empty() {
                continue;
            }
            chunks += 1;
            buffer.push(&chunk);
            debug!(
                chunk = chunks,
                buffer_len = buffer.len(),
                "Received response chunk"
            );
            on_update(&self.interpreter.parse(&buffer.text()));
        }

        let result = self.interpreter.parse(&buffer.finish());
        info!(
            chunks,
            challenges = result.challenge_count(),
            "Chat stream completed"
        );
        Ok(result)
    }
}
