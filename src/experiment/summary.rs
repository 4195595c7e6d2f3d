//! Experiment Summary - serializable description of an experiment

use serde::{Deserialize, Serialize};

/// Snapshot of an experiment's name, declared sides and last resolved side.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExperimentSummary {
    name: String,
    sides: Vec<String>,
    current_side: Option<String>,
}

impl ExperimentSummary {
    /// Create a summary.
    #[must_use]
    pub fn new(name: impl Into<String>, sides: Vec<String>, current_side: Option<String>) -> Self {
        Self {
            name: name.into(),
            sides,
            current_side,
        }
    }

    /// Get the experiment name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the declared side names.
    #[must_use]
    pub fn sides(&self) -> &[String] {
        &self.sides
    }

    /// Get the last resolved side, if any.
    #[must_use]
    pub fn current_side(&self) -> Option<&str> {
        self.current_side.as_deref()
    }
}
