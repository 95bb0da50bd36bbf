use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Maximum allowed length for a key.
const KEY_MAX_LEN: usize = 64;

/// Errors from constructing a [`PluginKey`] or [`ActionKey`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum KeyError {
    /// The input was empty or contained only whitespace.
    #[error("key cannot be empty or whitespace")]
    Empty,
    /// The normalized key contains characters other than `a-z`, `0-9`, `-` and `_`.
    #[error("key `{0}` contains invalid characters (only a-z, 0-9, - and _ allowed)")]
    InvalidCharacters(String),
    /// The normalized key exceeds [`KEY_MAX_LEN`] characters.
    #[error("key exceeds maximum length of {KEY_MAX_LEN} characters")]
    TooLong,
    /// The input is valid only after trimming or lowercasing.
    #[error("key `{0}` is not in canonical form")]
    NotCanonical(String),
}

/// Trim, lowercase and validate a raw key.
fn normalize(raw: &str) -> Result<String, KeyError> {
    let normalized = raw.trim().to_lowercase();

    if normalized.is_empty() {
        return Err(KeyError::Empty);
    }
    if !normalized
        .bytes()
        .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-' || b == b'_')
    {
        return Err(KeyError::InvalidCharacters(normalized));
    }
    if normalized.len() > KEY_MAX_LEN {
        return Err(KeyError::TooLong);
    }

    Ok(normalized)
}

/// Validate a raw key without rewriting it.
fn exact(raw: &str) -> Result<String, KeyError> {
    let normalized = normalize(raw)?;
    if normalized != raw {
        return Err(KeyError::NotCanonical(raw.to_owned()));
    }
    Ok(normalized)
}

macro_rules! define_key {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Create a new key, normalizing and validating the input.
            pub fn new(raw: &str) -> Result<Self, KeyError> {
                normalize(raw).map(Self)
            }

            /// Accept the input only if it already is a canonical key.
            ///
            /// Used to resolve names arriving in requests, which must match a
            /// registered key byte for byte.
            pub fn exact(raw: &str) -> Result<Self, KeyError> {
                exact(raw).map(Self)
            }

            /// Build a key from a string literal.
            ///
            /// # Panics
            ///
            /// Panics if the literal is not a valid key. Meant for names
            /// fixed at compile time, where an invalid key is a programming
            /// error.
            pub fn from_static(raw: &'static str) -> Self {
                match normalize(raw) {
                    Ok(key) => Self(key),
                    Err(e) => panic!("invalid static key `{raw}`: {e}"),
                }
            }

            /// Return the inner string slice.
            #[inline]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl FromStr for $name {
            type Err = KeyError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s)
            }
        }

        impl TryFrom<&str> for $name {
            type Error = KeyError;

            fn try_from(value: &str) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl TryFrom<String> for $name {
            type Error = KeyError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(&value)
            }
        }

        impl From<$name> for String {
            fn from(key: $name) -> Self {
                key.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl PartialEq<str> for $name {
            fn eq(&self, other: &str) -> bool {
                self.0 == other
            }
        }

        impl PartialEq<&str> for $name {
            fn eq(&self, other: &&str) -> bool {
                self.0 == *other
            }
        }
    };
}

define_key!(
    /// Name a plugin is registered under, e.g. `vm` or `security-group`.
    ///
    /// Keys are trimmed and lowercased; after that they must be non-empty,
    /// at most 64 characters and made of `a-z`, `0-9`, `-` and `_`. Request
    /// names go through [`PluginKey::exact`] instead, which does not rewrite.
    ///
    /// ```
    /// use stratus_core::PluginKey;
    ///
    /// let key: PluginKey = " Security-Group ".parse().unwrap();
    /// assert_eq!(key.as_str(), "security-group");
    /// ```
    PluginKey
);

define_key!(
    /// Name of an action inside a plugin, e.g. `create` or `bind-security-groups`.
    ///
    /// Follows the same normalization rules as [`PluginKey`].
    ActionKey
);
