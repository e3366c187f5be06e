//! JSON value helpers.
//!
//! Tool results and metadata are carried as [`serde_json::Value`], but not every
//! value that fits in memory is one a JSON consumer will accept. These helpers
//! answer the questions the codecs need to ask of a value: is it plain JSON,
//! is it "truthy", and can a half-streamed argument string be salvaged.

use std::collections::VecDeque;

use serde_json::{Map, Number, Value};

/// Nesting depth past which a value is no longer treated as plain JSON.
pub const DEFAULT_MAX_JSON_DEPTH: usize = 100;

/// Check whether a value is plain JSON within the given nesting limit.
///
/// The top-level value sits at depth 0; every array or object level adds one.
///
/// # Example
///
/// ```rust
/// use serde_json::json;
/// use threadwire_core::json::{is_json_value, DEFAULT_MAX_JSON_DEPTH};
///
/// assert!(is_json_value(&json!({"a": [1, 2]}), DEFAULT_MAX_JSON_DEPTH));
/// assert!(!is_json_value(&json!([[1]]), 1));
/// ```
#[must_use]
pub fn is_json_value(value: &Value, max_depth: usize) -> bool {
    check_depth(value, 0, max_depth)
}

fn check_depth(value: &Value, depth: usize, max_depth: usize) -> bool {
    if depth > max_depth {
        return false;
    }
    match value {
        Value::Array(items) => items.iter().all(|v| check_depth(v, depth + 1, max_depth)),
        Value::Object(map) => map.values().all(|v| check_depth(v, depth + 1, max_depth)),
        _ => true,
    }
}

/// JavaScript truthiness of a JSON value.
///
/// `null`, `false`, `0` and `""` are falsy. Arrays and objects are always
/// truthy, even when empty.
#[must_use]
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64() != Some(0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Serialize an object compactly.
///
/// Key order follows insertion order.
#[must_use]
pub fn stringify_object(map: &Map<String, Value>) -> String {
    // Map serialization is infallible: keys are strings, values are JSON.
    serde_json::to_string(map).unwrap_or_default()
}

/// Largest integer a JavaScript number holds exactly.
const MAX_SAFE_INTEGER: u64 = (1 << 53) - 1;

/// Serialize an object exactly as JavaScript's `JSON.stringify` would.
///
/// Integral floats lose their fraction (`1.0` becomes `1`). Returns `None`
/// when a number has no faithful JavaScript rendering: integers beyond
/// `Number.MAX_SAFE_INTEGER`, and floats whose shortest form is exponential.
///
/// # Example
///
/// ```rust
/// use serde_json::json;
/// use threadwire_core::json::js_stringify_object;
///
/// let map = json!({"n": 1.0, "s": "x"}).as_object().cloned().unwrap();
/// assert_eq!(js_stringify_object(&map).as_deref(), Some(r#"{"n":1,"s":"x"}"#));
///
/// let map = json!({"id": 12345678901234567890_u64}).as_object().cloned().unwrap();
/// assert!(js_stringify_object(&map).is_none());
/// ```
#[must_use]
pub fn js_stringify_object(map: &Map<String, Value>) -> Option<String> {
    let mut out = String::new();
    write_js_object(map, &mut out)?;
    Some(out)
}

fn write_js_object(map: &Map<String, Value>, out: &mut String) -> Option<()> {
    out.push('{');
    for (index, (key, value)) in map.iter().enumerate() {
        if index > 0 {
            out.push(',');
        }
        out.push_str(&serde_json::to_string(key).ok()?);
        out.push(':');
        write_js_value(value, out)?;
    }
    out.push('}');
    Some(())
}

fn write_js_value(value: &Value, out: &mut String) -> Option<()> {
    match value {
        Value::Number(n) => out.push_str(&js_number(n)?),
        Value::Array(items) => {
            out.push('[');
            for (index, item) in items.iter().enumerate() {
                if index > 0 {
                    out.push(',');
                }
                write_js_value(item, out)?;
            }
            out.push(']');
        }
        Value::Object(map) => write_js_object(map, out)?,
        scalar => out.push_str(&serde_json::to_string(scalar).ok()?),
    }
    Some(())
}

#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
fn js_number(n: &Number) -> Option<String> {
    if let Some(i) = n.as_i64() {
        return (i.unsigned_abs() <= MAX_SAFE_INTEGER).then(|| i.to_string());
    }
    if let Some(u) = n.as_u64() {
        return (u <= MAX_SAFE_INTEGER).then(|| u.to_string());
    }
    let f = n.as_f64()?;
    if f.fract() == 0.0 && f.abs() <= MAX_SAFE_INTEGER as f64 {
        return Some((f as i64).to_string());
    }
    // Plain decimal output is the shortest round-trip form in both languages.
    let text = n.to_string();
    (!text.contains(['e', 'E'])).then_some(text)
}

/// Member boundaries tried, newest first, before giving up on a prefix.
const MAX_BOUNDARY_RETRIES: usize = 32;

/// Nesting depth serde_json refuses to parse past.
const MAX_PARSE_NESTING: usize = 128;

/// Parse a possibly incomplete JSON object.
///
/// Tool arguments arrive as streamed text and may be cut off at any point.
/// Unterminated strings and unclosed brackets are closed; a dangling key,
/// separator or partial literal is dropped back to the last complete member.
/// Returns `None` when the text does not describe an object, or when none of
/// the last few member boundaries yields one.
///
/// # Example
///
/// ```rust
/// use serde_json::json;
/// use threadwire_core::json::parse_partial_json_object;
///
/// let map = parse_partial_json_object(r#"{"city": "Par"#).unwrap();
/// assert_eq!(map["city"], json!("Par"));
///
/// let map = parse_partial_json_object(r#"{"a": 1, "b"#).unwrap();
/// assert_eq!(serde_json::Value::Object(map), json!({"a": 1}));
///
/// assert!(parse_partial_json_object("[1, 2]").is_none());
/// ```
#[must_use]
pub fn parse_partial_json_object(text: &str) -> Option<Map<String, Value>> {
    let text = text.trim();
    if !text.starts_with('{') {
        return None;
    }

    if let Ok(value) = serde_json::from_str::<Value>(text) {
        return into_object(value);
    }

    let state = scan(text);
    let mut end = text.to_string();
    if state.in_string {
        if state.escaped {
            end.pop();
        }
        end.push('"');
    }
    if let Some(map) = parse_closed(&end, &state.closers) {
        return Some(map);
    }

    // Walk back through member boundaries until a prefix closes cleanly.
    state
        .boundaries
        .iter()
        .rev()
        .find_map(|boundary| parse_closed(&text[..boundary.end], &boundary.closers))
}

fn into_object(value: Value) -> Option<Map<String, Value>> {
    match value {
        Value::Object(map) => Some(map),
        _ => None,
    }
}

fn parse_closed(prefix: &str, closers: &str) -> Option<Map<String, Value>> {
    let mut closed = String::with_capacity(prefix.len() + closers.len());
    closed.push_str(prefix);
    closed.extend(closers.chars().rev());
    serde_json::from_str::<Value>(&closed)
        .ok()
        .and_then(into_object)
}

/// A point where the text can be cut and closed.
#[derive(Debug)]
struct Boundary {
    /// Byte length of the prefix to keep.
    end: usize,
    /// Closers open at that point, innermost last.
    closers: String,
}

/// Structural state at the end of a JSON prefix.
#[derive(Debug, Default)]
struct ScanState {
    /// Closers for currently open containers, innermost last.
    closers: String,
    /// Whether the prefix ends inside a string literal.
    in_string: bool,
    /// Whether the prefix ends right after a backslash inside a string.
    escaped: bool,
    /// The most recent boundaries outside strings, oldest first.
    boundaries: VecDeque<Boundary>,
}

impl ScanState {
    fn mark(&mut self, end: usize) {
        if self.closers.len() > MAX_PARSE_NESTING {
            return;
        }
        if self.boundaries.len() == MAX_BOUNDARY_RETRIES {
            self.boundaries.pop_front();
        }
        self.boundaries.push_back(Boundary {
            end,
            closers: self.closers.clone(),
        });
    }
}

fn scan(text: &str) -> ScanState {
    let mut state = ScanState::default();
    for (index, c) in text.char_indices() {
        if state.in_string {
            if state.escaped {
                state.escaped = false;
            } else if c == '\\' {
                state.escaped = true;
            } else if c == '"' {
                state.in_string = false;
            }
            continue;
        }
        match c {
            '"' => state.in_string = true,
            '{' => {
                state.closers.push('}');
                state.mark(index + 1);
            }
            '[' => {
                state.closers.push(']');
                state.mark(index + 1);
            }
            '}' | ']' => {
                state.closers.pop();
            }
            ',' => state.mark(index),
            _ => {}
        }
    }
    state
}
