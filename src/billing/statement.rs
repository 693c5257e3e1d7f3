use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

use super::apportion::{
    consumption_percentage, electricity_share, individual_consumption, saturating_sum,
    total_consumption, total_rent,
};
use crate::domain::{group_thousands, Amount, Kwh, Roster, TenantId};

/// Billing figures for one tenant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatementLine {
    pub tenant_id: TenantId,
    pub full_name: String,
    pub room_label: String,
    pub rent: u64,
    pub consumption_kwh: u64,
    pub consumption_percent: u32,
    pub electricity_share: u64,
    pub total_due: u64,
    /// True when the tenant owes anything beyond rent.
    pub owes_electricity: bool,
}

/// Roster-wide aggregates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RosterTotals {
    pub tenant_count: usize,
    pub total_rent: u64,
    pub total_consumption_kwh: u64,
    pub bill_amount: u64,
    pub total_shares: u64,
    /// `total_shares - bill_amount`, from independent per-tenant rounding.
    pub rounding_drift: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct Statement {
    pub generated_at: DateTime<Utc>,
    pub currency: String,
    pub lines: Vec<StatementLine>,
    pub totals: RosterTotals,
}

impl Statement {
    pub fn compute(roster: &Roster, bill_amount: u64, currency: impl Into<String>) -> Self {
        let tenants = roster.tenants();
        let lines: Vec<StatementLine> = tenants
            .iter()
            .map(|t| {
                let share = electricity_share(t, tenants, bill_amount);
                let total_due = t.rent.saturating_add(share);
                StatementLine {
                    tenant_id: t.id,
                    full_name: t.full_name(),
                    room_label: t.room_label.clone(),
                    rent: t.rent,
                    consumption_kwh: individual_consumption(t),
                    consumption_percent: consumption_percentage(t, tenants),
                    electricity_share: share,
                    total_due,
                    owes_electricity: total_due > t.rent,
                }
            })
            .collect();

        let total_shares = saturating_sum(lines.iter().map(|l| l.electricity_share));
        let total_consumption_kwh = total_consumption(tenants);
        let rounding_drift = if total_consumption_kwh == 0 {
            0
        } else {
            i64::try_from(total_shares).unwrap_or(i64::MAX)
                - i64::try_from(bill_amount).unwrap_or(i64::MAX)
        };

        Self {
            generated_at: Utc::now(),
            currency: currency.into(),
            totals: RosterTotals {
                tenant_count: tenants.len(),
                total_rent: total_rent(tenants),
                total_consumption_kwh,
                bill_amount,
                total_shares,
                rounding_drift,
            },
            lines,
        }
    }

    pub fn line(&self, id: TenantId) -> Option<&StatementLine> {
        self.lines.iter().find(|l| l.tenant_id == id)
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cur = &self.currency;
        writeln!(
            f,
            "Bill amount: {}    Total consumption: {}",
            Amount(self.totals.bill_amount).with_currency(cur),
            Kwh(self.totals.total_consumption_kwh)
        )?;
        writeln!(f, "{}", "-".repeat(72))?;
        for line in &self.lines {
            writeln!(
                f,
                "{:<8} {:<24} {:>10} ({:>3}%)  share {:>10} {}  due {:>10} {}",
                line.room_label,
                line.full_name,
                Kwh(line.consumption_kwh).to_string(),
                line.consumption_percent,
                group_thousands(line.electricity_share),
                cur,
                group_thousands(line.total_due),
                cur,
            )?;
        }
        writeln!(f, "{}", "-".repeat(72))?;
        write!(
            f,
            "{} tenants    rent {}    shares {}",
            self.totals.tenant_count,
            Amount(self.totals.total_rent).with_currency(cur),
            Amount(self.totals.total_shares).with_currency(cur),
        )
    }
}
