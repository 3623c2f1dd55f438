use thiserror::Error;

/// Input rejected before any planning happens.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("\"{field}\" {reason}")]
pub struct ValidationError {
    pub field: String,
    pub reason: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Prefixes the field path, `deliveryLocations[2]` + `latitude` gives
    /// `deliveryLocations[2].latitude`.
    pub fn within(mut self, parent: impl AsRef<str>) -> Self {
        self.field = format!("{}.{}", parent.as_ref(), self.field);
        self
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlanningError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Planning failed: {0}")]
    Internal(String),
}
