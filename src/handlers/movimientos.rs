// src/handlers/movimientos.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use validator::Validate;

use crate::{
    common::{error::AppError, respuesta::Respuesta},
    config::AppState,
    middleware::auth::ClaimsActuales,
    models::movimiento::CrearMovimientoPayload,
};

#[utoipa::path(
    get,
    path = "/api/movimientos",
    responses((status = 200, description = "Libro de movimientos, más recientes primero")),
    security(("bearer_auth" = [])),
    tag = "Movimientos"
)]
pub async fn listar(State(app_state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let movimientos = app_state.movimiento_service.listar().await?;
    Ok((StatusCode::OK, Respuesta::ok(movimientos)))
}

#[utoipa::path(
    post,
    path = "/api/movimientos",
    request_body = CrearMovimientoPayload,
    responses(
        (status = 201, description = "Movimiento asentado con el saldo resultante"),
        (status = 404, description = "Dotación inexistente"),
        (status = 409, description = "La salida excede el saldo")
    ),
    security(("bearer_auth" = [])),
    tag = "Movimientos"
)]
pub async fn registrar(
    State(app_state): State<AppState>,
    ClaimsActuales(claims): ClaimsActuales,
    Json(payload): Json<CrearMovimientoPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let movimiento = app_state.movimiento_service.registrar(payload, &claims).await?;
    Ok((StatusCode::CREATED, Respuesta::ok(movimiento)))
}
