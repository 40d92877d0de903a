// src/handlers/dotaciones.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use validator::Validate;

use crate::{
    common::{error::AppError, respuesta::Respuesta},
    config::AppState,
    middleware::{
        auth::ClaimsActuales,
        roles::{MinimoAdmin, RequiereRol},
    },
    models::dotacion::{ActualizarDotacionPayload, CrearDotacionPayload},
};

#[utoipa::path(
    get,
    path = "/api/dotaciones",
    responses((status = 200, description = "Dotaciones activas")),
    security(("bearer_auth" = [])),
    tag = "Dotaciones"
)]
pub async fn listar(State(app_state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let dotaciones = app_state.dotacion_service.listar().await?;
    Ok((StatusCode::OK, Respuesta::ok(dotaciones)))
}

#[utoipa::path(
    get,
    path = "/api/dotaciones/{id}",
    params(("id" = i64, Path, description = "Id de la dotación")),
    responses(
        (status = 200, description = "Detalle de la dotación"),
        (status = 404, description = "Dotación inexistente")
    ),
    security(("bearer_auth" = [])),
    tag = "Dotaciones"
)]
pub async fn obtener(
    State(app_state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let dotacion = app_state.dotacion_service.obtener(id).await?;
    Ok((StatusCode::OK, Respuesta::ok(dotacion)))
}

#[utoipa::path(
    post,
    path = "/api/dotaciones",
    request_body = CrearDotacionPayload,
    responses(
        (status = 201, description = "Dotación creada"),
        (status = 403, description = "Requiere admin")
    ),
    security(("bearer_auth" = [])),
    tag = "Dotaciones"
)]
pub async fn crear(
    State(app_state): State<AppState>,
    ClaimsActuales(claims): ClaimsActuales,
    _guard: RequiereRol<MinimoAdmin>,
    Json(payload): Json<CrearDotacionPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let dotacion = app_state.dotacion_service.crear(payload, &claims).await?;
    Ok((StatusCode::CREATED, Respuesta::ok(dotacion)))
}

#[utoipa::path(
    put,
    path = "/api/dotaciones/{id}",
    params(("id" = i64, Path, description = "Id de la dotación")),
    request_body = CrearDotacionPayload,
    responses(
        (status = 200, description = "Dotación reemplazada"),
        (status = 404, description = "Dotación inexistente")
    ),
    security(("bearer_auth" = [])),
    tag = "Dotaciones"
)]
pub async fn actualizar(
    State(app_state): State<AppState>,
    Path(id): Path<i64>,
    ClaimsActuales(claims): ClaimsActuales,
    _guard: RequiereRol<MinimoAdmin>,
    Json(payload): Json<CrearDotacionPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let dotacion = app_state.dotacion_service.actualizar(id, payload, &claims).await?;
    Ok((StatusCode::OK, Respuesta::ok(dotacion)))
}

#[utoipa::path(
    patch,
    path = "/api/dotaciones/{id}",
    params(("id" = i64, Path, description = "Id de la dotación")),
    request_body = ActualizarDotacionPayload,
    responses(
        (status = 200, description = "Campos presentes actualizados"),
        (status = 400, description = "Ningún campo para actualizar"),
        (status = 404, description = "Dotación inexistente")
    ),
    security(("bearer_auth" = [])),
    tag = "Dotaciones"
)]
pub async fn actualizar_parcial(
    State(app_state): State<AppState>,
    Path(id): Path<i64>,
    ClaimsActuales(claims): ClaimsActuales,
    _guard: RequiereRol<MinimoAdmin>,
    Json(payload): Json<ActualizarDotacionPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let dotacion = app_state
        .dotacion_service
        .actualizar_parcial(id, payload, &claims)
        .await?;
    Ok((StatusCode::OK, Respuesta::ok(dotacion)))
}

#[utoipa::path(
    delete,
    path = "/api/dotaciones/{id}",
    params(("id" = i64, Path, description = "Id de la dotación")),
    responses(
        (status = 200, description = "Baja lógica aplicada"),
        (status = 404, description = "Dotación inexistente")
    ),
    security(("bearer_auth" = [])),
    tag = "Dotaciones"
)]
pub async fn eliminar(
    State(app_state): State<AppState>,
    Path(id): Path<i64>,
    ClaimsActuales(claims): ClaimsActuales,
    _guard: RequiereRol<MinimoAdmin>,
) -> Result<impl IntoResponse, AppError> {
    let dotacion = app_state.dotacion_service.eliminar(id, &claims).await?;
    Ok((StatusCode::OK, Respuesta::ok(dotacion)))
}
