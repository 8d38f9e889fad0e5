//! Store for hosts without a registry

use regkit_value::KeyPath;

use crate::{ReadOutcome, StoreReader};

/// Answers [`ReadOutcome::Unsupported`] for every query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnavailableStore {
    reason: String,
}

impl Default for UnavailableStore {
    fn default() -> Self {
        Self::new("registry not available on this platform")
    }
}

impl UnavailableStore {
    /// Create with the reason reported for every read
    #[must_use]
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    /// Reported reason
    #[inline]
    #[must_use]
    pub fn reason(&self) -> &str {
        &self.reason
    }
}

impl StoreReader for UnavailableStore {
    fn read(&self, _path: &KeyPath) -> ReadOutcome {
        ReadOutcome::Unsupported(self.reason.clone())
    }
}
