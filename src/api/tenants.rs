//! Tenant roster endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::{
    api::error::ApiError,
    billing::{MeterForm, TenantForm},
    controller::AppState,
    domain::{Tenant, TenantId},
};

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TenantListResponse {
    pub tenants: Vec<Tenant>,
    pub total: usize,
}

/// GET /api/v1/tenants?q= - List tenants, optionally filtered
pub async fn list_tenants(
    State(st): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Json<TenantListResponse> {
    let tenants = st.ledger.search(query.q.as_deref().unwrap_or_default()).await;
    let total = tenants.len();
    Json(TenantListResponse { tenants, total })
}

/// GET /api/v1/tenants/:id
pub async fn get_tenant(
    State(st): State<AppState>,
    Path(id): Path<TenantId>,
) -> Result<Json<Tenant>, ApiError> {
    Ok(Json(st.ledger.get(id).await?))
}

/// POST /api/v1/tenants - Add a tenant
pub async fn add_tenant(
    State(st): State<AppState>,
    Json(form): Json<TenantForm>,
) -> Result<(StatusCode, Json<Tenant>), ApiError> {
    form.validate()?;
    let tenant = st.ledger.add_tenant(form.into_draft()?).await?;
    Ok((StatusCode::CREATED, Json(tenant)))
}

/// PUT /api/v1/tenants/:id - Edit name, room, rent, previous reading, phone
pub async fn edit_tenant(
    State(st): State<AppState>,
    Path(id): Path<TenantId>,
    Json(form): Json<TenantForm>,
) -> Result<Json<Tenant>, ApiError> {
    form.validate()?;
    let tenant = st.ledger.edit_tenant(id, form.into_draft()?).await?;
    Ok(Json(tenant))
}

/// DELETE /api/v1/tenants/:id
pub async fn delete_tenant(
    State(st): State<AppState>,
    Path(id): Path<TenantId>,
) -> Result<StatusCode, ApiError> {
    st.ledger.delete_tenant(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// PUT /api/v1/tenants/:id/meter - Record a meter reading
///
/// On rejection the response carries the error kind; the stored readings are
/// unchanged and the client should restore its inputs from them.
pub async fn record_meter_reading(
    State(st): State<AppState>,
    Path(id): Path<TenantId>,
    Json(form): Json<MeterForm>,
) -> Result<Json<Tenant>, ApiError> {
    let tenant = st
        .ledger
        .record_meter_reading(id, form.meter_previous, form.meter_current)
        .await?;
    Ok(Json(tenant))
}
