//! JSON response decoding.
//!
//! GitHub sends `snake_case` field names, which is also how Rust fields are
//! named, so by default keys are decoded exactly as they arrive. Keys that
//! carry data (language names, gist file names) therefore survive untouched.
//! [`KeyDecoding::ConvertToSnakeCase`] is an opt-in for payloads that use
//! `camelCase` field names.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

/// How object keys are translated before structural decoding.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum KeyDecoding {
    /// Decode keys exactly as they appear on the wire.
    #[default]
    UseDefaultKeys,
    /// Rewrite every object key to `snake_case`, map keys included. Keys
    /// already in `snake_case` are kept.
    ConvertToSnakeCase,
}

/// Decodes response bodies into typed values.
#[derive(Clone, Copy, Debug, Default)]
pub struct ResponseDecoder {
    keys: KeyDecoding,
}

impl ResponseDecoder {
    /// Creates a decoder using [`KeyDecoding::UseDefaultKeys`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a decoder using the given key strategy.
    #[must_use]
    pub fn with_key_decoding(mut self, keys: KeyDecoding) -> Self {
        self.keys = keys;
        self
    }

    /// Key strategy applied by this decoder.
    pub fn key_decoding(&self) -> KeyDecoding {
        self.keys
    }

    /// Decodes `body` into `T`.
    ///
    /// An empty (or whitespace-only) body decodes as JSON `null`, so `()`
    /// and `Option<_>` targets accept `204 No Content` responses.
    pub fn decode<T: DeserializeOwned>(&self, body: &[u8]) -> Result<T, serde_json::Error> {
        if body.trim_ascii().is_empty() {
            return serde_json::from_value(Value::Null);
        }

        match self.keys {
            KeyDecoding::UseDefaultKeys => serde_json::from_slice(body),
            KeyDecoding::ConvertToSnakeCase => {
                let mut value: Value = serde_json::from_slice(body)?;
                convert_keys(&mut value);
                serde_json::from_value(value)
            }
        }
    }
}

fn convert_keys(value: &mut Value) {
    match value {
        Value::Object(object) => {
            let original = std::mem::take(object);
            let mut converted = Map::with_capacity(original.len());
            let mut renamed = Vec::new();
            for (key, mut child) in original {
                convert_keys(&mut child);
                let snake = to_snake_case(&key);
                if snake == key {
                    converted.insert(key, child);
                } else {
                    renamed.push((snake, child));
                }
            }
            // An explicit snake_case key beats its camelCase twin.
            for (snake, child) in renamed {
                converted.entry(snake).or_insert(child);
            }
            *object = converted;
        }
        Value::Array(items) => items.iter_mut().for_each(convert_keys),
        _ => {}
    }
}

/// `fullName` -> `full_name`, `htmlURL` -> `html_url`, `HTMLUrl` -> `html_url`.
fn to_snake_case(key: &str) -> String {
    if !key.chars().any(char::is_uppercase) {
        return key.to_owned();
    }

    let chars: Vec<char> = key.chars().collect();
    let mut out = String::with_capacity(key.len() + 4);
    for (index, &current) in chars.iter().enumerate() {
        if current.is_uppercase() && index > 0 {
            let previous = chars[index - 1];
            let next_is_lower = chars.get(index + 1).is_some_and(|c| c.is_lowercase());
            let boundary = previous.is_lowercase()
                || previous.is_ascii_digit()
                || (previous.is_uppercase() && next_is_lower);
            if boundary && previous != '_' {
                out.push('_');
            }
        }
        out.extend(current.to_lowercase());
    }
    out
}
