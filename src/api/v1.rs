use axum::{
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post, put},
    Router,
};

use crate::{
    api::{billing, tenants},
    controller::AppState,
};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/tenants", get(tenants::list_tenants).post(tenants::add_tenant))
        .route(
            "/tenants/:id",
            get(tenants::get_tenant)
                .put(tenants::edit_tenant)
                .delete(tenants::delete_tenant),
        )
        .route("/tenants/:id/meter", put(tenants::record_meter_reading))
        .route("/statement", get(billing::get_statement))
        .route("/meter/consumption", post(billing::calculate_consumption))
        .with_state(state)
}

pub async fn healthz() -> impl IntoResponse {
    StatusCode::OK
}
