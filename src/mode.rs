//! Dispatch mode selection.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Where a suspended task resumes once its wait completes.
///
/// Chosen once per work loop; the two modes share identical delay semantics
/// and differ only in dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DispatchMode {
    /// Every resumption is marshaled back onto the captured owning context,
    /// even when the timer fired on a different worker thread.
    ContextAffine,
    /// Resumption proceeds on whichever worker thread completed the wait.
    ContextFree,
}

impl DispatchMode {
    /// Stable human-readable label used in report lines.
    pub fn label(&self) -> &'static str {
        match self {
            DispatchMode::ContextAffine => "context-affine",
            DispatchMode::ContextFree => "context-free",
        }
    }
}

impl fmt::Display for DispatchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
