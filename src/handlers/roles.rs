// src/handlers/roles.rs

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
    models::rol::CrearRolPayload,
};

#[utoipa::path(
    get,
    path = "/api/roles",
    responses((status = 200, description = "Roles disponibles")),
    security(("bearer_auth" = [])),
    tag = "Roles"
)]
pub async fn listar(State(app_state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let roles = app_state.rol_service.listar().await?;
    Ok((StatusCode::OK, Respuesta::ok(roles)))
}

#[utoipa::path(
    post,
    path = "/api/roles",
    request_body = CrearRolPayload,
    responses(
        (status = 201, description = "Rol creado"),
        (status = 409, description = "Nombre duplicado")
    ),
    security(("bearer_auth" = [])),
    tag = "Roles"
)]
pub async fn crear(
    State(app_state): State<AppState>,
    ClaimsActuales(claims): ClaimsActuales,
    _guard: RequiereRol<MinimoSuperadmin>,
    Json(payload): Json<CrearRolPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let rol = app_state
        .rol_service
        .crear(&payload.nombre, payload.descripcion.as_deref(), &claims)
        .await?;
    Ok((StatusCode::CREATED, Respuesta::ok(rol)))
}

#[utoipa::path(
    delete,
    path = "/api/roles/{id}",
    params(("id" = i64, Path, description = "Id del rol")),
    responses(
        (status = 200, description = "Rol eliminado"),
        (status = 404, description = "Rol inexistente"),
        (status = 409, description = "Rol integrado o todavía referenciado")
    ),
    security(("bearer_auth" = [])),
    tag = "Roles"
)]
pub async fn eliminar(
    State(app_state): State<AppState>,
    Path(id): Path<i64>,
    ClaimsActuales(claims): ClaimsActuales,
    _guard: RequiereRol<MinimoSuperadmin>,
) -> Result<impl IntoResponse, AppError> {
    app_state.rol_service.eliminar(id, &claims).await?;
    Ok((
        StatusCode::OK,
        Respuesta::ok(serde_json::json!({ "mensaje": "Rol eliminado." })),
    ))
}
