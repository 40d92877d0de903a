// src/handlers/usuarios.rs

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
        roles::{MinimoSuperadmin, RequiereRol},
    },
    models::usuario::{ActualizarUsuarioPayload, CambiarEstadoPayload},
};

#[utoipa::path(
    get,
    path = "/api/users",
    responses((status = 200, description = "Cuentas registradas, sin hashes")),
    security(("bearer_auth" = [])),
    tag = "Usuarios"
)]
pub async fn listar(State(app_state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let usuarios = app_state.usuario_service.listar().await?;
    Ok((StatusCode::OK, Respuesta::ok(usuarios)))
}

#[utoipa::path(
    put,
    path = "/api/users/{id}",
    params(("id" = i64, Path, description = "Id del usuario")),
    request_body = ActualizarUsuarioPayload,
    responses(
        (status = 200, description = "Campos presentes actualizados"),
        (status = 400, description = "Ningún campo para actualizar"),
        (status = 404, description = "Usuario inexistente"),
        (status = 409, description = "Username duplicado")
    ),
    security(("bearer_auth" = [])),
    tag = "Usuarios"
)]
pub async fn actualizar(
    State(app_state): State<AppState>,
    Path(id): Path<i64>,
    ClaimsActuales(claims): ClaimsActuales,
    _guard: RequiereRol<MinimoSuperadmin>,
    Json(payload): Json<ActualizarUsuarioPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let usuario = app_state.usuario_service.actualizar(id, payload, &claims).await?;
    Ok((StatusCode::OK, Respuesta::ok(usuario)))
}

#[utoipa::path(
    patch,
    path = "/api/users/{id}/estado",
    params(("id" = i64, Path, description = "Id del usuario")),
    request_body = CambiarEstadoPayload,
    responses(
        (status = 200, description = "Estado cambiado"),
        (status = 403, description = "Requiere superadmin, o intenta cambiarse a sí mismo"),
        (status = 404, description = "Usuario inexistente")
    ),
    security(("bearer_auth" = [])),
    tag = "Usuarios"
)]
pub async fn cambiar_estado(
    State(app_state): State<AppState>,
    Path(id): Path<i64>,
    ClaimsActuales(claims): ClaimsActuales,
    _guard: RequiereRol<MinimoSuperadmin>,
    Json(payload): Json<CambiarEstadoPayload>,
) -> Result<impl IntoResponse, AppError> {
    let usuario = app_state
        .usuario_service
        .cambiar_estado(id, payload.estado, &claims)
        .await?;
    Ok((StatusCode::OK, Respuesta::ok(usuario)))
}
