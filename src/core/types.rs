//! Shared domain types
//!
//! Identifiers and payloads exchanged between the core operations and the
//! collaborators that talk to the remote store.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;

/// Accepts either a JSON string or a JSON integer
#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrNumber {
    String(String),
    Number(u64),
}

impl From<StringOrNumber> for String {
    fn from(value: StringOrNumber) -> Self {
        match value {
            StringOrNumber::String(s) => s,
            StringOrNumber::Number(n) => n.to_string(),
        }
    }
}

macro_rules! opaque_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create from anything string-like
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            /// Borrow the raw value
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Whether the value is empty or whitespace
            pub fn is_blank(&self) -> bool {
                self.0.trim().is_empty()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl From<u64> for $name {
            fn from(value: u64) -> Self {
                Self(value.to_string())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
            where
                D: Deserializer<'de>,
            {
                StringOrNumber::deserialize(deserializer).map(|v| Self(v.into()))
            }
        }
    };
}

opaque_id!(
    /// Opaque key of one remote record: a numeric issue id or an issue key
    /// such as `PROJ-12`. Lists of ids may contain duplicates.
    RecordId
);

opaque_id!(
    /// Handle of an asynchronous bulk task
    TaskId
);

impl RecordId {
    /// Namespace prefix of a key-shaped id: `"PROJ"` for `"PROJ-12"`.
    ///
    /// Returns `None` for purely numeric ids and ids without a prefix.
    pub fn namespace(&self) -> Option<&str> {
        let (prefix, _) = self.0.split_once('-')?;
        let prefix = prefix.trim();
        (!prefix.is_empty()).then_some(prefix)
    }
}

/// Opaque record payload returned by the single-record fetcher
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(Value);

impl Record {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// `id` field of the payload, if the store supplied one
    pub fn id(&self) -> Option<&str> {
        self.0.get("id").and_then(Value::as_str)
    }

    /// `key` field of the payload, if the store supplied one
    pub fn key(&self) -> Option<&str> {
        self.0.get("key").and_then(Value::as_str)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }
}

impl From<Value> for Record {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

/// One page of lightweight search results. Carries no total count.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchPage {
    pub identifiers: Vec<RecordId>,
    pub is_last: bool,
}

impl SearchPage {
    pub fn new(identifiers: Vec<RecordId>, is_last: bool) -> Self {
        Self {
            identifiers,
            is_last,
        }
    }
}
