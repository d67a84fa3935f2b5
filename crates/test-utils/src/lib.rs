//! Shared fixtures and a mock chat backend for the climatechat test suites.

use climatechat::ClientConfig;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// --- Fixtures ---

/// A complete answer in the shape the backend streams: prose, then a fenced
/// JSON object listing the topics.
pub const FENCED_ANSWER: &str = "Rising temperatures drive several linked risks.\n\
```json\n\
{\"challenges\": [\n\
  {\"topic\": \"Extreme heat\", \"source\": \"IPCC AR6 WGII\", \"url\": \"https://www.ipcc.ch/report/ar6/wg2/\"},\n\
  {\"topic\": \"Sea level rise\", \"source\": \"NOAA 2022\", \"url\": \"https://oceanservice.noaa.gov/\"},\n\
  {\"topic\": \"Crop failure\", \"source\": \"FAO\", \"url\": \"https://www.fao.org/\"}\n\
]}\n\
```";

/// The same answer without code fences.
pub const UNFENCED_ANSWER: &str = "Rising temperatures drive several linked risks.\n\
\n\
{\"challenges\": [\n\
  {\"topic\": \"Extreme heat\", \"source\": \"IPCC AR6 WGII\", \"url\": \"https://www.ipcc.ch/report/ar6/wg2/\"},\n\
  {\"topic\": \"Sea level rise\", \"source\": \"NOAA 2022\", \"url\": \"https://oceanservice.noaa.gov/\"},\n\
  {\"topic\": \"Crop failure\", \"source\": \"FAO\", \"url\": \"https://www.fao.org/\"}\n\
]}\n";

/// Splits `payload` into growing prefixes of roughly `step` bytes, never
/// cutting a character in half. The last prefix is always the whole payload.
pub fn prefixes(payload: &str, step: usize) -> Vec<&str> {
    let step = step.max(1);
    let mut out = Vec::new();
    let mut end = 0;
    while end < payload.len() {
        end = (end + step).min(payload.len());
        while !payload.is_char_boundary(end) {
            end += 1;
        }
        out.push(&payload[..end]);
    }
    out
}

// --- Mock Backend ---

/// A wiremock server standing in for the chat backend's `/chat` endpoint.
pub struct MockChatBackend {
    pub server: MockServer,
}

impl MockChatBackend {
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    /// Answers `query` with `body` and status 200.
    pub async fn answer(&self, query: &str, body: &str) {
        self.respond(query, ResponseTemplate::new(200).set_body_string(body))
            .await;
    }

    /// Answers `query` with raw bytes, which need not be valid UTF-8.
    pub async fn answer_bytes(&self, query: &str, body: &[u8]) {
        self.respond(query, ResponseTemplate::new(200).set_body_bytes(body.to_vec()))
            .await;
    }

    /// Answers `query` with the given error status and body.
    pub async fn fail(&self, query: &str, status: u16, body: &str) {
        self.respond(query, ResponseTemplate::new(status).set_body_string(body))
            .await;
    }

    async fn respond(&self, query: &str, template: ResponseTemplate) {
        Mock::given(method("POST"))
            .and(path("/chat"))
            .and(body_json(serde_json::json!({ "query": query })))
            .respond_with(template)
            .expect(1)
            .mount(&self.server)
            .await;
    }

    pub fn uri(&self) -> String {
        self.server.uri()
    }

    /// A client configuration pointing at this server.
    pub fn config(&self) -> ClientConfig {
        ClientConfig::new(self.uri()).with_timeout_secs(5)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefixes_end_with_payload() {
        let parts = prefixes("abcdefg", 3);
        assert_eq!(parts, vec!["abc", "abcdef", "abcdefg"]);
    }

    #[test]
    fn test_prefixes_respect_char_boundaries() {
        let parts = prefixes("aé", 2);
        assert_eq!(parts, vec!["aé"]);
    }
}
