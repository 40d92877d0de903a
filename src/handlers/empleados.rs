// src/handlers/empleados.rs

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
    models::empleado::GuardarEmpleadoPayload,
};

#[utoipa::path(
    get,
    path = "/api/empleados",
    responses((status = 200, description = "Empleados activos")),
    security(("bearer_auth" = [])),
    tag = "Empleados"
)]
pub async fn listar(State(app_state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let empleados = app_state.empleado_service.listar().await?;
    Ok((StatusCode::OK, Respuesta::ok(empleados)))
}

#[utoipa::path(
    post,
    path = "/api/empleados",
    request_body = GuardarEmpleadoPayload,
    responses(
        (status = 201, description = "Empleado creado"),
        (status = 409, description = "Documento duplicado")
    ),
    security(("bearer_auth" = [])),
    tag = "Empleados"
)]
pub async fn crear(
    State(app_state): State<AppState>,
    ClaimsActuales(claims): ClaimsActuales,
    _guard: RequiereRol<MinimoAdmin>,
    Json(payload): Json<GuardarEmpleadoPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let empleado = app_state.empleado_service.crear(payload, &claims).await?;
    Ok((StatusCode::CREATED, Respuesta::ok(empleado)))
}

#[utoipa::path(
    put,
    path = "/api/empleados/{id}",
    params(("id" = i64, Path, description = "Id del empleado")),
    request_body = GuardarEmpleadoPayload,
    responses(
        (status = 200, description = "Empleado actualizado"),
        (status = 404, description = "Empleado inexistente"),
        (status = 409, description = "Documento duplicado")
    ),
    security(("bearer_auth" = [])),
    tag = "Empleados"
)]
pub async fn actualizar(
    State(app_state): State<AppState>,
    Path(id): Path<i64>,
    ClaimsActuales(claims): ClaimsActuales,
    _guard: RequiereRol<MinimoAdmin>,
    Json(payload): Json<GuardarEmpleadoPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let empleado = app_state.empleado_service.actualizar(id, payload, &claims).await?;
    Ok((StatusCode::OK, Respuesta::ok(empleado)))
}

#[utoipa::path(
    delete,
    path = "/api/empleados/{id}",
    params(("id" = i64, Path, description = "Id del empleado")),
    responses(
        (status = 200, description = "Baja lógica aplicada"),
        (status = 404, description = "Empleado inexistente")
    ),
    security(("bearer_auth" = [])),
    tag = "Empleados"
)]
pub async fn eliminar(
    State(app_state): State<AppState>,
    Path(id): Path<i64>,
    ClaimsActuales(claims): ClaimsActuales,
    _guard: RequiereRol<MinimoAdmin>,
) -> Result<impl IntoResponse, AppError> {
    let empleado = app_state.empleado_service.eliminar(id, &claims).await?;
    Ok((StatusCode::OK, Respuesta::ok(empleado)))
}
