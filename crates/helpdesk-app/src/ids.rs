// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! record_id {
    ($name:ident) => {
        #[derive(
            Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_owned())
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

record_id!(ConversationId);
record_id!(CustomerId);
record_id!(MessageId);

impl MessageId {
    /// Ids for appended messages follow the seed convention: `m1`, `m2`, ...
    pub fn for_position(position: usize) -> Self {
        Self(format!("m{position}"))
    }

    /// The numeric suffix of an `m<N>` id; other seed ids have none.
    pub fn position(&self) -> Option<usize> {
        self.0.strip_prefix('m')?.parse().ok()
    }
}
