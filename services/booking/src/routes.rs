//! Booking service routes

use axum::{
    Extension, Json, Router,
    extract::{
        Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    middleware,
    response::IntoResponse,
};
use common::{
    gate::gate,
    http::{get_only, post_only},
    identity::{AdminIdentity, AdminVerifier},
};
use serde_json::json;
use tracing::{info, warn};

use crate::{
    error::{ApiError, ApiResult},
    models::{ConfirmReservationRequest, DateQuery, IdParam, ReservationQuery},
    state::AppState,
};

const INVALID_STATUS: &str = "Statut de réservation invalide";

/// Create the router for the booking service
pub fn create_router(state: AppState) -> Router {
    let admin_routes = Router::new()
        .route("/api/reservations", get_only(list_reservations))
        .route("/api/reservations/confirm", post_only(confirm_reservation))
        .route_layer(middleware::from_fn_with_state(
            state.admin_verifier.clone(),
            gate::<AdminVerifier>,
        ));

    Router::new()
        .route("/health", get_only(health_check))
        .route("/api/reservations/dates", get_only(list_dates))
        .route("/api/reservations/getDateInfos", get_only(get_date_infos))
        .merge(admin_routes)
        .with_state(state)
}

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "booking-service"
    }))
}

/// Approve a pending reservation
pub async fn confirm_reservation(
    State(state): State<AppState>,
    Extension(_admin): Extension<AdminIdentity>,
    payload: Result<Json<ConfirmReservationRequest>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            warn!("Unreadable confirmation body: {}", rejection);
            ConfirmReservationRequest::default()
        }
    };

    let id = request.id.as_ref().and_then(IdParam::as_text);
    state.reservations.confirm(id.as_deref()).await?;

    Ok(Json(json!({
        "success": true,
        "message": "Réservation confirmée avec succès"
    })))
}

/// Get one bookable date by ID
pub async fn get_date_infos(
    State(state): State<AppState>,
    Query(query): Query<DateQuery>,
) -> ApiResult<impl IntoResponse> {
    let date = state.reservations.date_info(query.id.as_deref()).await?;

    Ok(Json(json!({ "date": date })))
}

/// List every bookable date
pub async fn list_dates(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let dates = state.reservations.dates().await?;

    Ok(Json(json!({ "dates": dates })))
}

/// List reservations for the administration panel
pub async fn list_reservations(
    State(state): State<AppState>,
    query: Result<Query<ReservationQuery>, QueryRejection>,
) -> ApiResult<impl IntoResponse> {
    let Query(query) = query.map_err(|rejection| {
        warn!("Invalid reservation filter: {}", rejection);
        ApiError::BadRequest(INVALID_STATUS.to_string())
    })?;

    info!("Listing reservations with status filter {:?}", query.status);
    let reservations = state.reservations.reservations(query.status).await?;

    Ok(Json(json!({ "reservations": reservations })))
}
