use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::Add;

/// Stable tenant identifier, assigned as `max(existing) + 1`.
pub type TenantId = u32;

/// Separator used by the French locale between thousands groups (U+202F).
pub const THOUSANDS_SEPARATOR: char = '\u{202F}';

// ============================================================================
// Display Newtypes
// ============================================================================

/// Whole currency units (FCFA has no minor unit)
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
pub struct Amount(pub u64);

impl Amount {
    pub fn units(units: u64) -> Self {
        Self(units)
    }

    pub fn as_units(&self) -> u64 {
        self.0
    }

    /// Render with a trailing currency code, e.g. `150 000 FCFA`
    pub fn with_currency(&self, currency: &str) -> String {
        format!("{} {}", self, currency)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&group_thousands(self.0))
    }
}

impl Add for Amount {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl Sum for Amount {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self(0), Add::add)
    }
}

/// Energy in whole kilowatt-hours, as read off a cumulative meter
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
pub struct Kwh(pub u64);

impl Kwh {
    pub fn kilowatt_hours(kwh: u64) -> Self {
        Self(kwh)
    }

    pub fn as_kilowatt_hours(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for Kwh {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} kWh", group_thousands(self.0))
    }
}

/// Insert the French thousands separator every three digits.
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 * 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(THOUSANDS_SEPARATOR);
        }
        out.push(ch);
    }
    out
}
