//! # Streaming Response Interpreter
//!
//! Turns any prefix of a streamed chat answer into a [`ParsedResult`].
//!
//! The backend emits prose first and then, optionally, a JSON-like fragment
//! with repeated `topic` / `source` / `url` fields, often wrapped in Markdown
//! code fences. The fragment is not valid JSON at most prefix lengths, so this
//! module never parses it structurally. Each field kind is scanned on its own,
//! and the resulting lists are paired by ordinal position.

use crate::{
    errors::ChatError,
    types::{ChallengeDraft, ParsedResult},
};
use regex::Regex;
use tracing::debug;

/// Code-fence delimiters and the fence language tags the backend uses.
const FENCE_PATTERN: &str = r"```|json|markdown";

/// Matches `"<key>": "<value>"` with either quote style on key and value.
/// A value only matches once its closing quote has arrived; backslash escapes
/// do not close it.
fn field_pattern(key: &str) -> String {
    format!(
        r#"(?s)(?:"{key}"|'{key}')\s*:\s*(?:"((?:[^"\\]|\\.)*)"|'((?:[^'\\]|\\.)*)')"#
    )
}

/// Extracts the ordered values of a single field kind.
#[derive(Debug, Clone)]
struct FieldScanner {
    re: Regex,
}

impl FieldScanner {
    fn new(key: &str) -> Result<Self, ChatError> {
        Ok(Self {
            re: Regex::new(&field_pattern(key))?,
        })
    }

    fn scan(&self, region: &str) -> Vec<String> {
        self.re
            .captures_iter(region)
            .filter_map(|caps| caps.get(1).or_else(|| caps.get(2)))
            .map(|m| unescape(m.as_str()))
            .collect()
    }
}

/// Re-derives a [`ParsedResult`] from a response buffer.
///
/// Construction compiles the patterns once; [`ResponseInterpreter::parse`]
/// is then infallible and pure.
#[derive(Debug, Clone)]
pub struct ResponseInterpreter {
    fence: Regex,
    topic: FieldScanner,
    source: FieldScanner,
    url: FieldScanner,
}

impl ResponseInterpreter {
    pub fn new() -> Result<Self, ChatError> {
        Ok(Self {
            fence: Regex::new(FENCE_PATTERN)?,
            topic: FieldScanner::new("topic")?,
            source: FieldScanner::new("source")?,
            url: FieldScanner::new("url")?,
        })
    }

    /// Parses the current contents of a response buffer.
    ///
    /// Any input, including an empty or truncated one, yields a well-formed
    /// result. Fence markers are removed blindly, wherever they occur.
    pub fn parse(&self, buffer: &str) -> ParsedResult {
        let cleaned = self.fence.replace_all(buffer, "");

        let Some(brace) = cleaned.find('{') else {
            return ParsedResult {
                summary: cleaned.trim().to_string(),
                challenges: Vec::new(),
            };
        };

        let (prose, region) = cleaned.split_at(brace);
        let topics = self.topic.scan(region);
        let mut sources = self.source.scan(region).into_iter();
        let mut urls = self.url.scan(region).into_iter();

        debug!(
            buffer_len = buffer.len(),
            topics = topics.len(),
            "Interpreted structured region"
        );

        // Topics drive the count; sources and urls are aligned by position only.
        let challenges = topics
            .into_iter()
            .enumerate()
            .map(|(i, name)| {
                ChallengeDraft::new(
                    i,
                    name,
                    sources.next().unwrap_or_default(),
                    urls.next().unwrap_or_default(),
                )
            })
            .collect();

        ParsedResult {
            summary: prose.trim().to_string(),
            challenges,
        }
    }
}

/// Decodes JSON-style backslash escapes. Unknown or malformed escapes are
/// kept verbatim.
fn unescape(raw: &str) -> String {
    if !raw.contains('\\') {
        return raw.to_string();
    }

    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('"') => out.push('"'),
            Some('\'') => out.push('\''),
            Some('\\') => out.push('\\'),
            Some('/') => out.push('/'),
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('b') => out.push('\u{8}'),
            Some('f') => out.push('\u{c}'),
            Some('u') => {
                let hex: String = chars.clone().take(4).collect();
                match decode_unicode_escape(&hex, &mut chars) {
                    Some(decoded) => out.push(decoded),
                    None => {
                        out.push_str("\\u");
                    }
                }
            }
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}

/// Decodes the four hex digits after `\u`, consuming them (and a trailing
/// low surrogate escape, if any) from `chars` on success.
fn decode_unicode_escape(
    hex: &str,
    chars: &mut std::str::Chars<'_>,
) -> Option<char> {
    let high = parse_hex4(hex)?;

    if (0xD800..0xDC00).contains(&high) {
        // Needs a following `\uDCxx` to form a pair.
        let rest: String = chars.clone().skip(4).take(6).collect();
        let low = rest
            .strip_prefix("\\u")
            .and_then(parse_hex4)
            .filter(|low| (0xDC00..0xE000).contains(low))?;
        let decoded = char::from_u32(0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00))?;
        for _ in 0..10 {
            chars.next();
        }
        return Some(decoded);
    }

    let decoded = char::from_u32(high)?;
    for _ in 0..4 {
        chars.next();
    }
    Some(decoded)
}

fn parse_hex4(hex: &str) -> Option<u32> {
    if hex.len() != 4 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    u32::from_str_radix(hex, 16).ok()
}
