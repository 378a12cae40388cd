//! Parameter encoding.
//!
//! [`encode`] serves both query strings and `application/x-www-form-urlencoded`
//! bodies. The only difference between the two is the leading `?`.

use crate::error::{Error, Result};

/// A single name/value parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameValuePair {
    pub name: String,
    pub value: String,
}

impl NameValuePair {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Creates a pair from raw bytes, which must be valid UTF-8.
    pub fn from_bytes(name: &[u8], value: &[u8]) -> Result<Self> {
        let text = |bytes: &[u8], part: &str| {
            std::str::from_utf8(bytes)
                .map(String::from)
                .map_err(|e| Error::Encoding(format!("parameter {part} is not valid UTF-8: {e}")))
        };

        Ok(Self {
            name: text(name, "name")?,
            value: text(value, "value")?,
        })
    }
}

impl<K: Into<String>, V: Into<String>> From<(K, V)> for NameValuePair {
    fn from((name, value): (K, V)) -> Self {
        Self::new(name, value)
    }
}

/// Serializes `pairs` as `key=value` segments joined with `&`, in order.
///
/// When `should_encode` is set, names and values are form-encoded (UTF-8,
/// space as `+`). Otherwise they are copied verbatim. Unless `is_body_param`
/// is set, a non-empty result is prefixed with `?`. An empty list always
/// yields an empty string.
pub fn encode(pairs: &[NameValuePair], is_body_param: bool, should_encode: bool) -> String {
    if pairs.is_empty() {
        return String::new();
    }

    let mut encoded = String::new();
    if !is_body_param {
        encoded.push('?');
    }

    for (i, pair) in pairs.iter().enumerate() {
        if i > 0 {
            encoded.push('&');
        }
        if should_encode {
            encoded.extend(form_urlencoded::byte_serialize(pair.name.as_bytes()));
            encoded.push('=');
            encoded.extend(form_urlencoded::byte_serialize(pair.value.as_bytes()));
        } else {
            encoded.push_str(&pair.name);
            encoded.push('=');
            encoded.push_str(&pair.value);
        }
    }

    encoded
}
