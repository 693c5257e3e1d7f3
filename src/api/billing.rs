//! Apportionment endpoints

use axum::{
    extract::{Query, State},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::{
    api::error::ApiError,
    billing::{lenient_int, meter_consumption, MeterForm},
    controller::AppState,
    domain::ValidationError,
};

#[derive(Debug, Default, Deserialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum StatementFormat {
    #[default]
    Json,
    Text,
}

#[derive(Debug, Deserialize)]
pub struct StatementQuery {
    /// Raw bill input; anything unparsable counts as 0. Absent means the configured default.
    pub bill_amount: Option<String>,
    #[serde(default)]
    pub format: StatementFormat,
}

/// GET /api/v1/statement?bill_amount=&format= - Split the bill across the roster
pub async fn get_statement(
    State(st): State<AppState>,
    Query(q): Query<StatementQuery>,
) -> Result<Response, ApiError> {
    let bill_amount = match q.bill_amount.as_deref() {
        None => st.cfg.billing.default_bill_amount,
        Some(raw) => u64::try_from(lenient_int(raw)).map_err(|_| ValidationError::NegativeValue)?,
    };
    let statement = st
        .ledger
        .statement(bill_amount, &st.cfg.billing.currency)
        .await;

    Ok(match q.format {
        StatementFormat::Json => Json(statement).into_response(),
        StatementFormat::Text => statement.to_string().into_response(),
    })
}

#[derive(Debug, Serialize)]
pub struct ConsumptionResponse {
    pub consumption_kwh: u64,
}

/// POST /api/v1/meter/consumption - Standalone meter calculator
pub async fn calculate_consumption(
    Json(form): Json<MeterForm>,
) -> Result<Json<ConsumptionResponse>, ApiError> {
    let consumption_kwh = meter_consumption(form.meter_previous, form.meter_current)?;
    Ok(Json(ConsumptionResponse { consumption_kwh }))
}
