//! Lenient parsing of raw form input.
//!
//! The UI sends whatever the user typed. Numeric fields that do not parse
//! become 0 here, before anything reaches the typed core operations; sign
//! is preserved so negative readings still fail validation downstream.

use serde::{de, Deserialize, Deserializer};
use std::fmt;
use validator::Validate;

use crate::domain::{TenantDraft, ValidationError};

/// Integer prefix of `raw` (after leading whitespace), or 0 if there is none.
///
/// `"245"` -> 245, `" -12kWh"` -> -12, `"12.9"` -> 12, `"abc"` -> 0, `""` -> 0.
/// Out-of-range values saturate.
pub fn lenient_int(raw: &str) -> i64 {
    let s = raw.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let digits: &str = {
        let end = rest
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(rest.len());
        &rest[..end]
    };
    if digits.is_empty() {
        return 0;
    }
    let magnitude = digits.parse::<i64>().unwrap_or(i64::MAX);
    if negative {
        -magnitude
    } else {
        magnitude
    }
}

/// Serde adapter applying [`lenient_int`] to strings, truncating floats, and
/// mapping `null` or booleans to 0.
pub fn deserialize_lenient<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    struct LenientVisitor;

    impl<'de> de::Visitor<'de> for LenientVisitor {
        type Value = i64;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a number or numeric string")
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<i64, E> {
            Ok(v)
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<i64, E> {
            Ok(i64::try_from(v).unwrap_or(i64::MAX))
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<i64, E> {
            if v.is_finite() {
                // `as` saturates for out-of-range floats
                Ok(v.trunc() as i64)
            } else {
                Ok(0)
            }
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<i64, E> {
            Ok(lenient_int(v))
        }

        fn visit_bool<E: de::Error>(self, _v: bool) -> Result<i64, E> {
            Ok(0)
        }

        fn visit_unit<E: de::Error>(self) -> Result<i64, E> {
            Ok(0)
        }

        fn visit_none<E: de::Error>(self) -> Result<i64, E> {
            Ok(0)
        }

        fn visit_some<D: Deserializer<'de>>(self, d: D) -> Result<i64, D::Error> {
            d.deserialize_any(self)
        }
    }

    deserializer.deserialize_any(LenientVisitor)
}

/// Non-negative conversion for fields the core stores unsigned.
fn non_negative(value: i64) -> Result<u64, ValidationError> {
    u64::try_from(value).map_err(|_| ValidationError::NegativeValue)
}

/// `+?[0-9 \-()]{8,}`, blank allowed since the phone is optional
fn validate_phone(phone: &str) -> Result<(), validator::ValidationError> {
    let phone = phone.trim();
    if phone.is_empty() {
        return Ok(());
    }
    let body = phone.strip_prefix('+').unwrap_or(phone);
    let allowed = body
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, ' ' | '-' | '(' | ')'));
    if allowed && body.chars().count() >= 8 {
        Ok(())
    } else {
        Err(validator::ValidationError::new("phone_format"))
    }
}

/// Raw add/edit tenant form.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct TenantForm {
    #[serde(default)]
    #[validate(length(max = 80))]
    pub name: String,
    #[serde(default)]
    #[validate(length(max = 80))]
    pub first_name: String,
    #[serde(default)]
    #[validate(length(max = 20))]
    pub room_label: String,
    #[serde(default, deserialize_with = "deserialize_lenient")]
    pub rent: i64,
    #[serde(default, deserialize_with = "deserialize_lenient")]
    pub initial_meter_reading: i64,
    #[serde(default)]
    #[validate(custom(function = "validate_phone"))]
    pub phone: Option<String>,
    #[serde(default)]
    pub photo_ref: Option<String>,
}

impl TenantForm {
    pub fn into_draft(self) -> Result<TenantDraft, ValidationError> {
        Ok(TenantDraft {
            name: self.name,
            first_name: self.first_name,
            room_label: self.room_label,
            rent: non_negative(self.rent)?,
            initial_meter_reading: non_negative(self.initial_meter_reading)?,
            phone: self.phone,
            photo_ref: self.photo_ref,
        })
    }
}

/// Raw pair of meter readings as typed into the roster table.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct MeterForm {
    #[serde(default, deserialize_with = "deserialize_lenient")]
    pub meter_previous: i64,
    #[serde(default, deserialize_with = "deserialize_lenient")]
    pub meter_current: i64,
}
