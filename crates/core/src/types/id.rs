//! Newtype IDs for type-safe entity references.
//!
//! The Sweet Shop gateway identifies every entity by an opaque UUID string.
//! Use the `define_id!` macro to create type-safe wrappers around those
//! strings so that a `SweetId` can never be passed where an `OrderId` is
//! expected.

use serde::{Deserialize, Serialize};

/// Macro to define a type-safe ID wrapper.
///
/// Creates a newtype wrapper around `String` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `PartialEq`, `Eq`, `Hash`
/// - Conversion methods: `new()`, `random()`, `as_str()`, `into_inner()`
/// - `From<String>`, `From<&str>`, and `AsRef<str>` implementations
///
/// # Example
///
/// ```rust
/// # use sweetshop_core::define_id;
/// define_id!(SweetId);
/// define_id!(OrderId);
///
/// let sweet_id = SweetId::new("f3b4...");
/// let order_id = OrderId::random();
///
/// // These are different types, so this won't compile:
/// // let _: SweetId = order_id;
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            PartialEq,
            Eq,
            Hash,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create an ID from an existing string value.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Generate a fresh random (UUID v4) ID.
            #[must_use]
            pub fn random() -> Self {
                Self(::uuid::Uuid::new_v4().to_string())
            }

            /// Get the ID as a string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the ID and return the underlying string.
            #[must_use]
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_owned())
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

// Define standard entity IDs
define_id!(UserId);
define_id!(SweetId);
define_id!(CategoryId);
define_id!(OrderId);

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_new_and_as_str() {
        let id = SweetId::new("abc-123");
        assert_eq!(id.as_str(), "abc-123");
    }

    #[test]
    fn test_random_ids_are_unique() {
        assert_ne!(OrderId::random(), OrderId::random());
    }

    #[test]
    fn test_display() {
        let id = UserId::new("u-1");
        assert_eq!(format!("{id}"), "u-1");
    }

    #[test]
    fn test_from_str_and_string() {
        let a = SweetId::from("s-1");
        let b = SweetId::from("s-1".to_string());
        assert_eq!(a, b);
    }

    #[test]
    fn test_serde_transparent() {
        let id = SweetId::new("s-42");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"s-42\"");

        let parsed: SweetId = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, id);
    }
}
