// src/handlers/stock.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use validator::Validate;

use crate::{
    common::{error::AppError, respuesta::Respuesta},
    config::AppState,
    middleware::{
        auth::ClaimsActuales,
        roles::{MinimoSuperadmin, RequiereRol},
    },
    models::articulo::MovimientoStockPayload,
};

#[utoipa::path(
    post,
    path = "/api/stock/ingresar",
    request_body = MovimientoStockPayload,
    responses(
        (status = 200, description = "Stock acumulado sobre la (talla, condición)"),
        (status = 404, description = "Talla inexistente")
    ),
    security(("bearer_auth" = [])),
    tag = "Stock"
)]
pub async fn ingresar(
    State(app_state): State<AppState>,
    ClaimsActuales(claims): ClaimsActuales,
    _guard: RequiereRol<MinimoSuperadmin>,
    Json(payload): Json<MovimientoStockPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let stock = app_state.stock_service.ingresar(payload, &claims).await?;
    Ok((StatusCode::OK, Respuesta::ok(stock)))
}

#[utoipa::path(
    post,
    path = "/api/stock/retirar",
    request_body = MovimientoStockPayload,
    responses(
        (status = 200, description = "Stock descontado"),
        (status = 404, description = "No hay fila de stock para esa (talla, condición)"),
        (status = 409, description = "Stock insuficiente")
    ),
    security(("bearer_auth" = [])),
    tag = "Stock"
)]
pub async fn retirar(
    State(app_state): State<AppState>,
    ClaimsActuales(claims): ClaimsActuales,
    _guard: RequiereRol<MinimoSuperadmin>,
    Json(payload): Json<MovimientoStockPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let stock = app_state.stock_service.retirar(payload, &claims).await?;
    Ok((StatusCode::OK, Respuesta::ok(stock)))
}
