use crate::domain::ValidationError;

/// Gatekeeper for every write to a tenant's meter fields.
pub fn validate_meter_update(new_previous: i64, new_current: i64) -> Result<(), ValidationError> {
    if new_previous < 0 || new_current < 0 {
        return Err(ValidationError::NegativeValue);
    }
    if new_current < new_previous {
        return Err(ValidationError::CurrentBelowPrevious {
            previous: new_previous,
            current: new_current,
        });
    }
    Ok(())
}

/// A stored reading as the signed value `validate_meter_update` works on.
pub fn checked_reading(value: u64) -> Result<i64, ValidationError> {
    i64::try_from(value).map_err(|_| ValidationError::OutOfRange(value))
}

/// Same rules as `validate_meter_update`, for readings read back from storage.
pub fn validate_stored_readings(previous: u64, current: u64) -> Result<(), ValidationError> {
    validate_meter_update(checked_reading(previous)?, checked_reading(current)?)
}

/// Consumption between two readings, for the standalone meter calculator.
pub fn meter_consumption(previous: i64, current: i64) -> Result<u64, ValidationError> {
    validate_meter_update(previous, current)?;
    Ok(current.abs_diff(previous))
}
