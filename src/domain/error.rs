use thiserror::Error;

use super::TenantId;

/// Input rejected before anything in the roster was touched.
#[derive(Debug, Clone, PartialEq, Eq, Error, strum::IntoStaticStr)]
pub enum ValidationError {
    #[error("Meter readings and amounts cannot be negative")]
    NegativeValue,
    #[error("Current reading ({current}) cannot be lower than previous reading ({previous})")]
    CurrentBelowPrevious { previous: i64, current: i64 },
    #[error("Missing required field: {0}")]
    MissingRequiredField(&'static str),
    #[error("Room {0} is already occupied")]
    DuplicateRoom(String),
    #[error("Value {0} is out of range")]
    OutOfRange(u64),
}

impl ValidationError {
    /// Stable machine-readable name of the failure
    pub fn kind(&self) -> &'static str {
        self.into()
    }
}

/// Failure of a roster mutation.
#[derive(Debug, Clone, PartialEq, Eq, Error, strum::IntoStaticStr)]
pub enum RosterError {
    #[error("Tenant {0} not found")]
    TenantNotFound(TenantId),
    #[error("Tenant id {0} appears more than once")]
    DuplicateId(TenantId),
    #[error("No tenant id left to assign")]
    IdsExhausted,
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl RosterError {
    pub fn kind(&self) -> &'static str {
        match self {
            RosterError::Validation(inner) => inner.kind(),
            other => other.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kinds() {
        assert_eq!(ValidationError::NegativeValue.kind(), "NegativeValue");
        assert_eq!(
            ValidationError::CurrentBelowPrevious { previous: 10, current: 5 }.kind(),
            "CurrentBelowPrevious"
        );
        assert_eq!(ValidationError::OutOfRange(u64::MAX).kind(), "OutOfRange");
        assert_eq!(RosterError::TenantNotFound(7).kind(), "TenantNotFound");
        assert_eq!(RosterError::IdsExhausted.kind(), "IdsExhausted");
        assert_eq!(
            RosterError::from(ValidationError::DuplicateRoom("A-101".into())).kind(),
            "DuplicateRoom"
        );
    }

    #[test]
    fn test_error_display() {
        let err = ValidationError::CurrentBelowPrevious { previous: 10, current: 5 };
        assert_eq!(
            err.to_string(),
            "Current reading (5) cannot be lower than previous reading (10)"
        );
        assert_eq!(RosterError::TenantNotFound(3).to_string(), "Tenant 3 not found");
    }
}
