// src/handlers/auditoria.rs

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
};

use crate::{
    common::{error::AppError, respuesta::Respuesta},
    config::AppState,
    middleware::roles::{MinimoAdmin, RequiereRol},
    models::auditoria::FiltroAuditoria,
};

#[utoipa::path(
    get,
    path = "/api/auditoria",
    params(("limite" = Option<i64>, Query, description = "Máximo de entradas (por defecto 200)")),
    responses(
        (status = 200, description = "Bitácora, entradas más recientes primero"),
        (status = 403, description = "Requiere admin")
    ),
    security(("bearer_auth" = [])),
    tag = "Auditoria"
)]
pub async fn listar(
    State(app_state): State<AppState>,
    _guard: RequiereRol<MinimoAdmin>,
    Query(filtro): Query<FiltroAuditoria>,
) -> Result<impl IntoResponse, AppError> {
    let entradas = app_state.auditoria_service.listar(filtro.limite).await?;
    Ok((StatusCode::OK, Respuesta::ok(entradas)))
}
