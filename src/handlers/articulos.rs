// src/handlers/articulos.rs

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
    models::articulo::GuardarArticuloPayload,
};

#[utoipa::path(
    get,
    path = "/api/articulos",
    responses((status = 200, description = "Artículos activos con stock agregado por condición")),
    security(("bearer_auth" = [])),
    tag = "Articulos"
)]
pub async fn listar(State(app_state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let articulos = app_state.articulo_service.listar().await?;
    Ok((StatusCode::OK, Respuesta::ok(articulos)))
}

#[utoipa::path(
    get,
    path = "/api/articulos/{id}",
    params(("id" = i64, Path, description = "Id del artículo")),
    responses(
        (status = 200, description = "Detalle con jerarquía y stock"),
        (status = 404, description = "Artículo inexistente o dado de baja")
    ),
    security(("bearer_auth" = [])),
    tag = "Articulos"
)]
pub async fn detalle(
    State(app_state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let articulo = app_state.articulo_service.detalle(id).await?;
    Ok((StatusCode::OK, Respuesta::ok(articulo)))
}

#[utoipa::path(
    get,
    path = "/api/articulos/{id}/tallas",
    params(("id" = i64, Path, description = "Id del artículo")),
    responses(
        (status = 200, description = "Tallas del artículo con stock por condición"),
        (status = 404, description = "Artículo inexistente")
    ),
    security(("bearer_auth" = [])),
    tag = "Articulos"
)]
pub async fn tallas(
    State(app_state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let tallas = app_state.articulo_service.tallas_de(id).await?;
    Ok((StatusCode::OK, Respuesta::ok(tallas)))
}

#[utoipa::path(
    post,
    path = "/api/articulos",
    request_body = GuardarArticuloPayload,
    responses(
        (status = 201, description = "Artículo creado con sus tallas y stock"),
        (status = 403, description = "Requiere superadmin")
    ),
    security(("bearer_auth" = [])),
    tag = "Articulos"
)]
pub async fn crear(
    State(app_state): State<AppState>,
    ClaimsActuales(claims): ClaimsActuales,
    _guard: RequiereRol<MinimoSuperadmin>,
    Json(payload): Json<GuardarArticuloPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let articulo = app_state.articulo_service.crear(payload, &claims).await?;
    Ok((StatusCode::CREATED, Respuesta::ok(articulo)))
}

#[utoipa::path(
    put,
    path = "/api/articulos/{id}",
    params(("id" = i64, Path, description = "Id del artículo")),
    request_body = GuardarArticuloPayload,
    responses(
        (status = 200, description = "Artículo actualizado; tallas omitidas eliminadas"),
        (status = 404, description = "Artículo o talla inexistente")
    ),
    security(("bearer_auth" = [])),
    tag = "Articulos"
)]
pub async fn actualizar(
    State(app_state): State<AppState>,
    Path(id): Path<i64>,
    ClaimsActuales(claims): ClaimsActuales,
    _guard: RequiereRol<MinimoSuperadmin>,
    Json(payload): Json<GuardarArticuloPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let articulo = app_state.articulo_service.actualizar(id, payload, &claims).await?;
    Ok((StatusCode::OK, Respuesta::ok(articulo)))
}

#[utoipa::path(
    delete,
    path = "/api/articulos/{id}",
    params(("id" = i64, Path, description = "Id del artículo")),
    responses(
        (status = 200, description = "Baja lógica aplicada"),
        (status = 404, description = "Artículo inexistente")
    ),
    security(("bearer_auth" = [])),
    tag = "Articulos"
)]
pub async fn eliminar(
    State(app_state): State<AppState>,
    Path(id): Path<i64>,
    ClaimsActuales(claims): ClaimsActuales,
    _guard: RequiereRol<MinimoSuperadmin>,
) -> Result<impl IntoResponse, AppError> {
    let articulo = app_state.articulo_service.eliminar(id, &claims).await?;
    Ok((StatusCode::OK, Respuesta::ok(articulo)))
}
