//! Prorating of a shared electricity bill by metered consumption.
//!
//! All results are whole units rounded half up, computed with integer
//! arithmetic. Each tenant is rounded independently, so the shares of a
//! roster can differ from the bill by at most half a unit per tenant; that
//! drift is kept as is. Sums saturate at `u64::MAX` instead of wrapping.

use crate::domain::Tenant;

/// Consumption over the period, clamped at zero when the readings are inverted.
pub fn individual_consumption(tenant: &Tenant) -> u64 {
    tenant.meter_current.saturating_sub(tenant.meter_previous)
}

pub fn total_consumption(tenants: &[Tenant]) -> u64 {
    saturating_sum(tenants.iter().map(individual_consumption))
}

pub(crate) fn saturating_sum(values: impl IntoIterator<Item = u64>) -> u64 {
    values.into_iter().fold(0, u64::saturating_add)
}

/// `round(part / whole * scale)`, or 0 when `whole` is 0.
fn prorate(part: u64, whole: u64, scale: u64) -> u64 {
    if whole == 0 {
        return 0;
    }
    let num = 2 * u128::from(part) * u128::from(scale) + u128::from(whole);
    let den = 2 * u128::from(whole);
    u64::try_from(num / den).unwrap_or(u64::MAX)
}

/// Tenant's part of `bill_amount`, proportional to their consumption.
pub fn electricity_share(tenant: &Tenant, tenants: &[Tenant], bill_amount: u64) -> u64 {
    prorate(
        individual_consumption(tenant),
        total_consumption(tenants),
        bill_amount,
    )
}

pub fn consumption_percentage(tenant: &Tenant, tenants: &[Tenant]) -> u32 {
    // a single tenant's part never exceeds the total, so this is at most 100
    prorate(individual_consumption(tenant), total_consumption(tenants), 100) as u32
}

/// Rent plus electricity share.
pub fn total_due(tenant: &Tenant, tenants: &[Tenant], bill_amount: u64) -> u64 {
    tenant
        .rent
        .saturating_add(electricity_share(tenant, tenants, bill_amount))
}

pub fn total_rent(tenants: &[Tenant]) -> u64 {
    saturating_sum(tenants.iter().map(|t| t.rent))
}
