//! # Allow-list
//!
//! The fixed set of external tools a request may invoke. An [`AllowedTool`]
//! can only be obtained through [`AllowList::authorize`], and process
//! execution for external tools only accepts an `AllowedTool`.

use std::collections::BTreeSet;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AllowList {
    tools: BTreeSet<String>,
}

impl AllowList {
    pub fn new<I, S>(tools: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tools: tools.into_iter().map(Into::into).collect(),
        }
    }

    /// Exact, case-sensitive membership.
    pub fn contains(&self, name: &str) -> bool {
        self.tools.contains(name)
    }

    pub fn authorize(&self, name: &str) -> Option<AllowedTool> {
        self.contains(name).then(|| AllowedTool {
            name: name.to_string(),
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tools.iter().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

/// Proof that a tool name passed the allow-list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllowedTool {
    name: String,
}

impl AllowedTool {
    pub fn name(&self) -> &str {
        &self.name
    }
}
