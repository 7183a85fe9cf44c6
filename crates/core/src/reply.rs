// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Outbound chat message

/// One message for the transport to deliver
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Reply {
    /// Channel or nick to deliver to
    pub destination: String,
    pub text: String,
}

impl Reply {
    pub fn new(destination: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            destination: destination.into(),
            text: text.into(),
        }
    }
}

impl std::fmt::Display for Reply {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} <- {}", self.destination, self.text)
    }
}
