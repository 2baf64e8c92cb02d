//! Turns raw model text into a [`ModelAction`].
//!
//! Model output is only loosely JSON: it may be wrapped in a markdown fence,
//! surrounded by prose, or miss the comma between two members. Recovery is a
//! fixed ladder (fenced content, outermost brace span, whole text), each rung
//! tried strictly and then once more after the missing-comma repair. When
//! nothing parses, the raw text itself becomes the reply. Normalization never
//! fails.

use super::action::{ActionKind, ActionPayload, IdeaDraft, ModelAction, Recovery, TaskDraft};
use super::replies::{DEFAULT_REPLY, DEFAULT_TASK_TITLE, FALLBACK_REPLY, UNTITLED};
use crate::utils::clip_chars;
use serde_json::{Map, Value};

const MAX_RAW_REPLY_CHARS: usize = 400;
const MAX_SCALAR_REPLY_CHARS: usize = 500;
const MAX_TITLE_CHARS: usize = 255;

/// Normalize one model turn.
pub fn normalize(raw: &str) -> ModelAction {
    match extract_json(raw) {
        Some((value, recovery)) => from_value(value, recovery),
        None => {
            let reply = clip_chars(raw.trim(), MAX_RAW_REPLY_CHARS);
            let reply = if reply.is_empty() {
                FALLBACK_REPLY
            } else {
                reply
            };
            ModelAction::reply(reply, Recovery::RawText)
        }
    }
}

/// Recover the first JSON value from loosely formatted model text.
pub fn extract_json(text: &str) -> Option<(Value, Recovery)> {
    let text = text.trim();
    if let Some(fenced) = fenced_content(text)
        && let Some(parsed) = parse_candidate(fenced)
    {
        return Some(parsed);
    }
    parse_candidate(text)
}

fn parse_candidate(text: &str) -> Option<(Value, Recovery)> {
    if let Some(span) = brace_span(text)
        && let Some(parsed) = parse_with_repair(span)
    {
        return Some(parsed);
    }
    parse_with_repair(text)
}

fn parse_with_repair(candidate: &str) -> Option<(Value, Recovery)> {
    if let Ok(value) = serde_json::from_str(candidate) {
        return Some((value, Recovery::Clean));
    }
    serde_json::from_str(&repair_missing_commas(candidate))
        .ok()
        .map(|value| (value, Recovery::Repaired))
}

/// Content of the first markdown code fence, with an optional `json` tag.
/// A fence that opens after the first `{` sits inside the payload and does
/// not wrap it.
fn fenced_content(text: &str) -> Option<&str> {
    let fence = text.find("```")?;
    if text.find('{').is_some_and(|brace| brace < fence) {
        return None;
    }
    let start = fence + 3;
    let rest = &text[start..];
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    let end = rest.find("```")?;
    Some(rest[..end].trim())
}

/// Outermost `{ ... }` span: first opening brace to last closing brace.
fn brace_span(text: &str) -> Option<&str> {
    let open = text.find('{')?;
    let close = text.rfind('}')?;
    (close > open).then(|| &text[open..=close])
}

/// Insert the comma that models most often drop: a string, number, boolean
/// or null value directly followed by a newline and the next quoted key.
pub fn repair_missing_commas(raw: &str) -> String {
    let chars: Vec<char> = raw.chars().collect();
    let mut out = String::with_capacity(raw.len() + 8);
    let mut in_string = false;
    let mut escaped = false;

    for (i, &c) in chars.iter().enumerate() {
        out.push(c);

        let value_ended = if in_string {
            if escaped {
                escaped = false;
                false
            } else if c == '\\' {
                escaped = true;
                false
            } else if c == '"' {
                in_string = false;
                true
            } else {
                false
            }
        } else if c == '"' {
            in_string = true;
            false
        } else {
            ends_scalar(&chars, i)
        };

        if value_ended && newline_then_key(&chars[i + 1..]) {
            out.push(',');
        }
    }

    out
}

fn ends_scalar(chars: &[char], i: usize) -> bool {
    if chars
        .get(i + 1)
        .is_some_and(|next| next.is_ascii_alphanumeric())
    {
        return false;
    }
    if chars[i].is_ascii_digit() {
        return true;
    }
    ["true", "false", "null"].iter().any(|literal| {
        let len = literal.len();
        i + 1 >= len && chars[i + 1 - len..=i].iter().copied().eq(literal.chars())
    })
}

fn newline_then_key(rest: &[char]) -> bool {
    let mut saw_newline = false;
    for &c in rest {
        if c == '\n' {
            saw_newline = true;
        } else if !c.is_whitespace() {
            return saw_newline && c == '"';
        }
    }
    false
}

// ── Value → ModelAction ─────────────────────────────────────────────────────

fn from_value(value: Value, recovery: Recovery) -> ModelAction {
    let value = match value {
        Value::Array(items) => items
            .into_iter()
            .next()
            .unwrap_or_else(|| Value::Object(Map::new())),
        other => other,
    };

    let root = match value {
        Value::Object(root) => root,
        other => {
            let text = value_text(&other);
            let reply = clip_chars(&text, MAX_SCALAR_REPLY_CHARS);
            let reply = if reply.is_empty() { DEFAULT_REPLY } else { reply };
            return ModelAction::reply(reply, recovery);
        }
    };

    let reply = root
        .get("resposta")
        .map(|v| value_text(v).trim().to_string())
        .filter(|r| !r.is_empty())
        .unwrap_or_else(|| DEFAULT_REPLY.to_string());

    let kind = resolve_kind(&root);
    let nested = root.get("dados").and_then(Value::as_object);

    let payload = match kind {
        ActionKind::SaveIdea => Some(ActionPayload::Idea(idea_draft(&root, nested))),
        ActionKind::CreateTask => nested
            .filter(|data| !data.is_empty())
            .map(|data| ActionPayload::Task(task_draft(data))),
        ActionKind::Reply => nested.cloned().map(ActionPayload::Data),
    };

    ModelAction {
        reply,
        kind,
        payload,
        recovery,
    }
}

/// Explicit `acao` wins; the legacy `arquivar` flag only applies when the
/// action key is absent. Unknown tokens degrade to a plain reply.
fn resolve_kind(root: &Map<String, Value>) -> ActionKind {
    let explicit = root
        .get("acao")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|a| !a.is_empty());

    match explicit {
        Some(token) => token.parse().unwrap_or(ActionKind::Reply),
        None if root.get("arquivar").is_some_and(truthy) => ActionKind::SaveIdea,
        None => ActionKind::Reply,
    }
}

/// Fields may sit under `dados` or at the root; the nested location is
/// checked first for every field.
fn idea_draft(root: &Map<String, Value>, nested: Option<&Map<String, Value>>) -> IdeaDraft {
    let field = |key: &str| -> String {
        nested
            .and_then(|n| n.get(key))
            .filter(|v| truthy(v))
            .or_else(|| root.get(key).filter(|v| truthy(v)))
            .map(value_text)
            .unwrap_or_default()
    };

    let title = field("titulo");
    let title = clip_chars(&title, MAX_TITLE_CHARS).trim();
    let title = if title.is_empty() { UNTITLED } else { title };

    let tags = nested
        .and_then(|n| n.get("tags"))
        .filter(|v| v.is_array())
        .or_else(|| root.get("tags"))
        .and_then(Value::as_array)
        .map(|items| items.iter().map(value_text).collect())
        .unwrap_or_default();

    IdeaDraft {
        title: title.to_string(),
        summary: field("resumo").trim().to_string(),
        tags,
        interest: field("interest").trim().to_string(),
        area: field("area").trim().to_string(),
    }
}

fn task_draft(data: &Map<String, Value>) -> TaskDraft {
    let text_or = |keys: &[&str], default: &str| -> String {
        keys.iter()
            .filter_map(|k| data.get(*k))
            .find(|v| truthy(v))
            .map_or_else(|| default.to_string(), value_text)
    };

    TaskDraft {
        title: text_or(&["titulo", "title"], DEFAULT_TASK_TITLE),
        status: text_or(&["status"], "todo"),
        priority: text_or(&["priority"], "medium"),
    }
}

/// JSON truthiness as the model's loosely typed output expects it: null,
/// false, zero and empty strings/collections are "absent".
fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
