//! Apportionment engine: consumption, shares and meter-reading validation.

pub mod apportion;
pub mod input;
pub mod statement;
pub mod validation;

pub use apportion::{
    consumption_percentage, electricity_share, individual_consumption, total_consumption,
    total_due, total_rent,
};
pub use input::{lenient_int, MeterForm, TenantForm};
pub use statement::{RosterTotals, Statement, StatementLine};
pub use validation::{
    checked_reading, meter_consumption, validate_meter_update, validate_stored_readings,
};
