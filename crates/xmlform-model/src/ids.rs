//! Strongly typed identifiers
//!
//! Every id crossing the codec boundary gets its own newtype so a user id can
//! never be passed where a system list id is expected.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

macro_rules! numeric_id {
    ($(#[$meta:meta])* $name:ident($inner:ty)) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub $inner);

        impl $name {
            /// Create id from its raw value
            #[inline]
            #[must_use]
            pub const fn new(raw: $inner) -> Self {
                Self(raw)
            }

            /// Raw numeric value
            #[inline]
            #[must_use]
            pub const fn get(self) -> $inner {
                self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
                Display::fmt(&self.0, f)
            }
        }

        impl FromStr for $name {
            type Err = std::num::ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim().parse().map(Self)
            }
        }

        impl From<$inner> for $name {
            fn from(raw: $inner) -> Self {
                Self(raw)
            }
        }
    };
}

numeric_id! {
    /// Form definition id
    FormId(u64)
}

numeric_id! {
    /// Id of a field within a form definition
    FieldId(u64)
}

numeric_id! {
    /// Current (internal) field type id
    FieldTypeId(u32)
}

numeric_id! {
    /// User account id
    UserId(u64)
}

numeric_id! {
    /// Current id of a system list entry
    SystemListId(u64)
}
