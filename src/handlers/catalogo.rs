// src/handlers/catalogo.rs

use axum::{
    extract::{Path, Query, State},
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
    models::catalogo::{CrearCategoriaPayload, CrearSubcategoriaPayload, FiltroSubcategorias},
};

// ---
// Categorías
// ---

#[utoipa::path(
    get,
    path = "/api/categorias",
    responses((status = 200, description = "Categorías con conteo de subcategorías")),
    security(("bearer_auth" = [])),
    tag = "Catalogo"
)]
pub async fn listar_categorias(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let categorias = app_state.catalogo_service.listar_categorias().await?;
    Ok((StatusCode::OK, Respuesta::ok(categorias)))
}

#[utoipa::path(
    post,
    path = "/api/categorias",
    request_body = CrearCategoriaPayload,
    responses(
        (status = 201, description = "Categoría creada"),
        (status = 409, description = "Nombre duplicado")
    ),
    security(("bearer_auth" = [])),
    tag = "Catalogo"
)]
pub async fn crear_categoria(
    State(app_state): State<AppState>,
    ClaimsActuales(claims): ClaimsActuales,
    _guard: RequiereRol<MinimoSuperadmin>,
    Json(payload): Json<CrearCategoriaPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let categoria = app_state
        .catalogo_service
        .crear_categoria(&payload.nombre, payload.descripcion.as_deref(), &claims)
        .await?;
    Ok((StatusCode::CREATED, Respuesta::ok(categoria)))
}

#[utoipa::path(
    delete,
    path = "/api/categorias/{id}",
    params(("id" = i64, Path, description = "Id de la categoría")),
    responses(
        (status = 200, description = "Categoría eliminada"),
        (status = 404, description = "Categoría inexistente"),
        (status = 409, description = "Tiene subcategorías asociadas")
    ),
    security(("bearer_auth" = [])),
    tag = "Catalogo"
)]
pub async fn eliminar_categoria(
    State(app_state): State<AppState>,
    Path(id): Path<i64>,
    ClaimsActuales(claims): ClaimsActuales,
    _guard: RequiereRol<MinimoSuperadmin>,
) -> Result<impl IntoResponse, AppError> {
    app_state.catalogo_service.eliminar_categoria(id, &claims).await?;
    Ok((
        StatusCode::OK,
        Respuesta::ok(serde_json::json!({ "mensaje": "Categoría eliminada." })),
    ))
}

// ---
// Subcategorías
// ---

#[utoipa::path(
    get,
    path = "/api/subcategorias",
    params(("categoria_id" = Option<i64>, Query, description = "Filtrar por categoría")),
    responses((status = 200, description = "Subcategorías con su categoría")),
    security(("bearer_auth" = [])),
    tag = "Catalogo"
)]
pub async fn listar_subcategorias(
    State(app_state): State<AppState>,
    Query(filtro): Query<FiltroSubcategorias>,
) -> Result<impl IntoResponse, AppError> {
    let subcategorias = app_state
        .catalogo_service
        .listar_subcategorias(filtro.categoria_id)
        .await?;
    Ok((StatusCode::OK, Respuesta::ok(subcategorias)))
}

#[utoipa::path(
    post,
    path = "/api/subcategorias",
    request_body = CrearSubcategoriaPayload,
    responses(
        (status = 201, description = "Subcategoría creada"),
        (status = 404, description = "Categoría padre inexistente"),
        (status = 409, description = "Nombre duplicado dentro de la categoría")
    ),
    security(("bearer_auth" = [])),
    tag = "Catalogo"
)]
pub async fn crear_subcategoria(
    State(app_state): State<AppState>,
    ClaimsActuales(claims): ClaimsActuales,
    _guard: RequiereRol<MinimoSuperadmin>,
    Json(payload): Json<CrearSubcategoriaPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let subcategoria = app_state
        .catalogo_service
        .crear_subcategoria(payload.categoria_id, &payload.nombre, &claims)
        .await?;
    Ok((StatusCode::CREATED, Respuesta::ok(subcategoria)))
}

#[utoipa::path(
    delete,
    path = "/api/subcategorias/{id}",
    params(("id" = i64, Path, description = "Id de la subcategoría")),
    responses(
        (status = 200, description = "Subcategoría eliminada"),
        (status = 404, description = "Subcategoría inexistente"),
        (status = 409, description = "Tiene artículos activos asociados")
    ),
    security(("bearer_auth" = [])),
    tag = "Catalogo"
)]
pub async fn eliminar_subcategoria(
    State(app_state): State<AppState>,
    Path(id): Path<i64>,
    ClaimsActuales(claims): ClaimsActuales,
    _guard: RequiereRol<MinimoSuperadmin>,
) -> Result<impl IntoResponse, AppError> {
    app_state.catalogo_service.eliminar_subcategoria(id, &claims).await?;
    Ok((
        StatusCode::OK,
        Respuesta::ok(serde_json::json!({ "mensaje": "Subcategoría eliminada." })),
    ))
}
