//! Query fingerprints used as lookup cache keys.

use std::fmt::{self, Write as _};
use std::hash::{Hash, Hasher};

use super::builder::BuiltQuery;
use crate::value::Value;

/// Cache key of a built query.
///
/// The key text is the statement with every whitespace character removed,
/// then `:`, then the parameters rendered and joined with `,`. The 32-bit
/// rolling hash of that text is what gets logged and hashed into the map.
///
/// The key text is lossy: `["a,b", "c"]` and `["a", "b,c"]` render the same.
/// Equality therefore compares the stripped statement plus a tagged,
/// length-prefixed encoding of every parameter, so neither a hash collision
/// nor an ambiguous rendering can make two different queries share an entry.
#[derive(Clone, Debug)]
pub struct Fingerprint {
    hash: i32,
    key: String,
    canonical: String,
}

impl Fingerprint {
    /// Fingerprint a built query.
    pub fn of(query: &BuiltQuery) -> Self {
        let sql: String = query.sql.chars().filter(|c| !c.is_whitespace()).collect();

        let rendered = query
            .params
            .iter()
            .map(Value::render)
            .collect::<Vec<_>>()
            .join(",");
        let key = format!("{}:{}", sql, rendered);

        let mut canonical = sql;
        canonical.push(':');
        for param in &query.params {
            encode(param, &mut canonical);
        }

        Self {
            hash: rolling_hash(&key),
            key,
            canonical,
        }
    }

    /// The 32-bit hash value.
    pub fn hash_value(&self) -> i32 {
        self.hash
    }

    /// The legacy key text the hash is computed over.
    pub fn key(&self) -> &str {
        &self.key
    }

    #[cfg(test)]
    pub(crate) fn with_hash(hash: i32, key: &str) -> Self {
        Self {
            hash,
            key: key.to_string(),
            canonical: key.to_string(),
        }
    }
}

impl PartialEq for Fingerprint {
    fn eq(&self, other: &Self) -> bool {
        self.hash == other.hash && self.canonical == other.canonical
    }
}

impl Eq for Fingerprint {}

impl Hash for Fingerprint {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.hash.hash(state);
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.hash)
    }
}

/// Append an unambiguous encoding of `value`: a type tag, then a length
/// prefix for variable-width payloads.
fn encode(value: &Value, out: &mut String) {
    match value {
        Value::Null => out.push_str("n;"),
        Value::Bool(b) => {
            let _ = write!(out, "b{};", u8::from(*b));
        }
        Value::Int(i) => {
            let _ = write!(out, "i{};", i);
        }
        Value::Float(f) => {
            let _ = write!(out, "f{};", f.to_bits());
        }
        Value::Text(s) => {
            let _ = write!(out, "s{}:{}", s.len(), s);
        }
        Value::List(items) => {
            let _ = write!(out, "l{}[", items.len());
            for item in items {
                encode(item, out);
            }
            out.push(']');
        }
    }
}

/// Classic `h = h * 31 + c` string hash over UTF-16 code units, wrapping at
/// 32 bits.
pub fn rolling_hash(text: &str) -> i32 {
    text.encode_utf16().fold(0i32, |hash, unit| {
        (hash << 5).wrapping_sub(hash).wrapping_add(unit as i32)
    })
}
