//! camelCase <-> snake_case key rewriting for JSON payloads.
//!
//! Only object keys are rewritten. Values are never inspected, except that
//! the outbound direction replaces empty strings with `null` to tell the
//! backend a field was cleared on purpose.

use crate::domain::model::{CaseConvention, CasingPolicy, Depth};
use serde_json::{Map, Value};

/// `storeId` -> `store_id`. Every ASCII upper-case letter becomes `_` plus
/// its lower-case form; keys without one come back unchanged.
pub fn camel_to_snake(key: &str) -> String {
    let mut snake = String::with_capacity(key.len() + 4);
    for ch in key.chars() {
        if ch.is_ascii_uppercase() {
            snake.push('_');
            snake.push(ch.to_ascii_lowercase());
        } else {
            snake.push(ch);
        }
    }
    snake
}

/// `store_id` -> `storeId`, `STORE_ID` -> `storeId`.
///
/// The whole key is lower-cased first, then every `_` directly followed by a
/// letter is dropped and the letter upper-cased. Other underscores stay.
pub fn snake_to_camel(key: &str) -> String {
    let lowered = key.to_lowercase();
    let mut camel = String::with_capacity(lowered.len());
    let mut chars = lowered.chars().peekable();

    while let Some(ch) = chars.next() {
        match chars.peek() {
            Some(next) if ch == '_' && next.is_ascii_lowercase() => {
                camel.push(next.to_ascii_uppercase());
                chars.next();
            }
            _ => camel.push(ch),
        }
    }
    camel
}

impl CaseConvention {
    pub fn convert_key(self, key: &str) -> String {
        match self {
            Self::Camel => snake_to_camel(key),
            Self::Snake => camel_to_snake(key),
        }
    }

    /// Rewrites `value` into this convention using the matching direction of
    /// `policy`.
    pub fn convert(self, value: Value, policy: &CasingPolicy) -> Value {
        match self {
            Self::Camel => to_camel_case_with(value, policy),
            Self::Snake => to_snake_case_with(value, policy),
        }
    }
}

/// Outbound transform with the default policy.
pub fn to_snake_case(value: Value) -> Value {
    to_snake_case_with(value, &CasingPolicy::default())
}

pub fn to_snake_case_with(value: Value, policy: &CasingPolicy) -> Value {
    let mut value = rename_keys(
        value,
        camel_to_snake,
        Walk::new(policy.snake_depth, policy.max_depth),
        0,
    );
    clear_empty_strings(
        &mut value,
        Walk::new(policy.null_empty_strings, policy.max_depth),
        0,
    );
    value
}

/// Inbound transform with the default policy.
pub fn to_camel_case(value: Value) -> Value {
    to_camel_case_with(value, &CasingPolicy::default())
}

pub fn to_camel_case_with(value: Value, policy: &CasingPolicy) -> Value {
    rename_keys(
        value,
        snake_to_camel,
        Walk::new(policy.camel_depth, policy.max_depth),
        0,
    )
}

/// In-place variant of [`to_snake_case_with`].
pub fn convert_keys_to_snake_case(value: &mut Value, policy: &CasingPolicy) {
    *value = to_snake_case_with(std::mem::take(value), policy);
}

/// In-place variant of [`to_camel_case_with`].
pub fn convert_keys_to_camel_case(value: &mut Value, policy: &CasingPolicy) {
    *value = to_camel_case_with(std::mem::take(value), policy);
}

#[derive(Debug, Clone, Copy)]
struct Walk {
    depth: Depth,
    max_depth: usize,
}

impl Walk {
    fn new(depth: Depth, max_depth: usize) -> Self {
        Self { depth, max_depth }
    }

    fn enters_records(&self) -> bool {
        self.depth == Depth::Recursive
    }

    fn exceeded(&self, nesting: usize, value: &Value) -> bool {
        let exceeded = nesting > self.max_depth && (value.is_object() || value.is_array());
        if exceeded {
            tracing::warn!(
                "Key casing stopped at nesting level {} (max_depth = {})",
                nesting,
                self.max_depth
            );
        }
        exceeded
    }
}

fn rename_keys(value: Value, convert: fn(&str) -> String, walk: Walk, nesting: usize) -> Value {
    if walk.exceeded(nesting, &value) {
        return value;
    }

    match value {
        Value::Object(map) => {
            let mut renamed = Map::with_capacity(map.len());
            for (key, child) in map {
                let child = if walk.enters_records() {
                    rename_keys(child, convert, walk, nesting + 1)
                } else {
                    child
                };
                // 轉換後撞名時，後出現的欄位覆蓋前者
                renamed.insert(convert(&key), child);
            }
            Value::Object(renamed)
        }
        Value::Array(items) => Value::Array(
            items
                .into_iter()
                .map(|item| rename_keys(item, convert, walk, nesting + 1))
                .collect(),
        ),
        other => other,
    }
}

fn clear_empty_strings(value: &mut Value, walk: Walk, nesting: usize) {
    if walk.exceeded(nesting, value) {
        return;
    }

    let (entries, inside_record): (Vec<&mut Value>, bool) = match value {
        Value::Object(map) => (map.values_mut().collect(), true),
        Value::Array(items) => (items.iter_mut().collect(), false),
        _ => return,
    };

    for entry in entries {
        if entry.as_str() == Some("") {
            *entry = Value::Null;
        } else if !inside_record || walk.enters_records() {
            clear_empty_strings(entry, walk, nesting + 1);
        }
    }
}
