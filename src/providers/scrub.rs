use crate::error::LlmError;
use crate::utils::truncate_to_width;
use std::borrow::Cow;

const MAX_API_ERROR_CHARS: usize = 200;
const REDACTED: &str = "[REDACTED]";

/// Markers after which a credential token follows.
const SECRET_MARKERS: [&str; 8] = [
    "sk-",
    "Bearer ",
    "bearer ",
    "api_key=",
    "access_token=",
    "\"api_key\":\"",
    "\"token\":\"",
    // Telegram bot tokens are embedded in request URLs (`/bot<token>/getUpdates`).
    "/bot",
];

fn is_secret_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | ':' | '+' | '=')
}

fn redact_after(scrubbed: &mut String, marker: &str) {
    let mut search_from = 0;
    while let Some(rel) = scrubbed[search_from..].find(marker) {
        let content_start = search_from + rel + marker.len();
        let token_len: usize = scrubbed[content_start..]
            .chars()
            .take_while(|c| is_secret_char(*c))
            .map(char::len_utf8)
            .sum();

        // Bare marker without a token value.
        if token_len == 0 {
            search_from = content_start;
            continue;
        }

        scrubbed.replace_range(content_start..content_start + token_len, REDACTED);
        search_from = content_start + REDACTED.len();
    }
}

/// Redact credential-looking tokens (API keys, bearer headers, bot tokens in
/// URLs) from text that is about to be logged or surfaced as an error.
pub fn scrub_secret_patterns(input: &str) -> Cow<'_, str> {
    if !SECRET_MARKERS.iter().any(|m| input.contains(m)) {
        return Cow::Borrowed(input);
    }

    let mut scrubbed = input.to_string();
    for marker in SECRET_MARKERS {
        redact_after(&mut scrubbed, marker);
    }
    Cow::Owned(scrubbed)
}

/// Scrub secrets and bound the length of an upstream error body.
pub fn sanitize_api_error(input: &str) -> String {
    truncate_to_width(&scrub_secret_patterns(input), MAX_API_ERROR_CHARS)
}

/// Build a sanitized provider error from a failed HTTP response.
pub async fn api_error(provider: &str, response: reqwest::Response) -> anyhow::Error {
    let status = response.status().as_u16();
    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "<failed to read provider error body>".to_string());
    LlmError::Status {
        provider: provider.to_string(),
        status,
        body: sanitize_api_error(&body),
    }
    .into()
}
