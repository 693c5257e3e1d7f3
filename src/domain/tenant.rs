//! Tenant record and the draft used to create or edit one.

use serde::{Deserialize, Serialize};

use super::{TenantId, ValidationError};
use crate::billing::checked_reading;

/// One rented room and its occupant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tenant {
    pub id: TenantId,
    /// Family name.
    pub name: String,
    pub first_name: String,
    /// Unique across the roster, compared case-insensitively.
    pub room_label: String,
    /// Base monthly rent, owed regardless of consumption.
    pub rent: u64,
    /// Cumulative meter index at the start of the billing period.
    pub meter_previous: u64,
    /// Cumulative meter index at the latest reading.
    pub meter_current: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_ref: Option<String>,
}

impl Tenant {
    /// "Name FirstName", the way the roster table shows it
    pub fn full_name(&self) -> String {
        format!("{} {}", self.name, self.first_name)
    }

    /// Case-folded room label used for uniqueness checks
    pub fn room_key(&self) -> String {
        room_key(&self.room_label)
    }
}

pub(crate) fn room_key(label: &str) -> String {
    label.trim().to_lowercase()
}

/// Typed input for the add and edit operations.
///
/// On add, `initial_meter_reading` seeds both meter fields. On edit it replaces
/// `meter_previous` only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TenantDraft {
    pub name: String,
    pub first_name: String,
    pub room_label: String,
    pub rent: u64,
    #[serde(default)]
    pub initial_meter_reading: u64,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub photo_ref: Option<String>,
}

impl TenantDraft {
    /// Trim text fields and drop blank optional ones, then check the required fields.
    pub(crate) fn normalized(&self) -> Result<TenantDraft, ValidationError> {
        let draft = TenantDraft {
            name: self.name.trim().to_string(),
            first_name: self.first_name.trim().to_string(),
            room_label: self.room_label.trim().to_string(),
            rent: self.rent,
            initial_meter_reading: self.initial_meter_reading,
            phone: non_blank(self.phone.as_deref()),
            photo_ref: non_blank(self.photo_ref.as_deref()),
        };

        if draft.name.is_empty() {
            return Err(ValidationError::MissingRequiredField("name"));
        }
        if draft.first_name.is_empty() {
            return Err(ValidationError::MissingRequiredField("first_name"));
        }
        if draft.room_label.is_empty() {
            return Err(ValidationError::MissingRequiredField("room_label"));
        }
        if draft.rent == 0 {
            return Err(ValidationError::MissingRequiredField("rent"));
        }
        checked_reading(draft.initial_meter_reading)?;
        Ok(draft)
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
