//! Identifier newtypes for persisted records.
//!
//! Identities are assigned by the persistence store on first insert and are
//! immutable thereafter. They are plain row ids, not client-generated.

use serde::{Deserialize, Serialize};

macro_rules! row_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Wraps a store-assigned row id.
            pub fn from_i64(id: i64) -> Self {
                Self(id)
            }

            /// Returns the inner row id.
            pub fn as_i64(&self) -> i64 {
                self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

row_id! {
    /// Unique identifier for a persisted user profile.
    ProfileId
}

row_id! {
    /// Unique identifier for a persisted daily plan.
    PlanId
}

row_id! {
    /// Unique identifier for a persisted weekly review.
    ReviewId
}
