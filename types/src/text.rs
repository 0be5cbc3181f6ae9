//! Length-bounded UTF-8 text stored on the ledger.
//!
//! Bounds are counted in characters, not bytes. Over-long text is unrepresentable:
//! construction (and deserialization) fails before a call reaches the ledger.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::TypesError;

macro_rules! bounded_text {
    ($(#[$doc:meta])* $name:ident, $field:literal, $max:expr) => {
        $(#[$doc])*
        #[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Maximum length in characters.
            pub const MAX_LEN: usize = $max;

            pub fn new(raw: impl Into<String>) -> Result<Self, TypesError> {
                let s = raw.into();
                let len = s.chars().count();
                if len > Self::MAX_LEN {
                    return Err(TypesError::TextTooLong {
                        field: $field,
                        len,
                        max: Self::MAX_LEN,
                    });
                }
                Ok(Self(s))
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl TryFrom<String> for $name {
            type Error = TypesError;

            fn try_from(s: String) -> Result<Self, Self::Error> {
                Self::new(s)
            }
        }

        impl TryFrom<&str> for $name {
            type Error = TypesError;

            fn try_from(s: &str) -> Result<Self, Self::Error> {
                Self::new(s)
            }
        }

        impl From<$name> for String {
            fn from(t: $name) -> Self {
                t.0
            }
        }
    };
}

bounded_text!(
    /// A poll title, at most 256 characters.
    Title,
    "title",
    256
);

bounded_text!(
    /// The display name of one poll option, at most 64 characters.
    OptionName,
    "option name",
    64
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_at_limit_is_accepted() {
        let raw = "x".repeat(Title::MAX_LEN);
        assert_eq!(Title::new(raw.clone()).unwrap().as_str(), raw);
    }

    #[test]
    fn test_title_over_limit_is_rejected() {
        let err = Title::new("x".repeat(Title::MAX_LEN + 1)).unwrap_err();
        assert!(matches!(
            err,
            TypesError::TextTooLong { field: "title", len: 257, max: 256 }
        ));
    }

    #[test]
    fn test_limit_counts_characters_not_bytes() {
        // 64 three-byte characters fit even though they are 192 bytes.
        let raw = "€".repeat(OptionName::MAX_LEN);
        assert!(OptionName::new(raw).is_ok());
    }

    #[test]
    fn test_empty_text_is_allowed() {
        assert!(Title::new("").is_ok());
        assert!(OptionName::new("").is_ok());
    }

    #[test]
    fn test_deserialize_rejects_over_long_option() {
        let json = format!("\"{}\"", "o".repeat(OptionName::MAX_LEN + 1));
        assert!(serde_json::from_str::<OptionName>(&json).is_err());
    }
}
