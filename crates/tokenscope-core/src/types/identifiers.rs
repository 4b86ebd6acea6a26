//! String-backed identifier newtypes.
//!
//! Each host identifier gets its own type so a `StyleId` cannot be passed
//! where a `VariableId` is expected, even though both are opaque strings
//! on the wire.

use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new ID from anything string-like.
            pub fn new(raw: impl Into<String>) -> Self {
                Self(raw.into())
            }

            /// Borrow the raw host identifier.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// True if the host handed us an empty identifier.
            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(raw: &str) -> Self {
                Self(raw.to_string())
            }
        }

        impl From<String> for $name {
            fn from(raw: String) -> Self {
                Self(raw)
            }
        }
    };
}

define_id!(
    /// Scene node identifier.
    NodeId
);

define_id!(
    /// Paint or text style identifier.
    StyleId
);

define_id!(
    /// Design variable identifier.
    VariableId
);

define_id!(
    /// Document page identifier. Tags the token inventory cache.
    PageId
);
