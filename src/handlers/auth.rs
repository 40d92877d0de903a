use axum::{
    extract::{ConnectInfo, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use std::net::SocketAddr;
use validator::Validate;

use crate::{
    common::{error::AppError, respuesta::Respuesta},
    config::AppState,
    middleware::auth::{ClaimsActuales, ClaimsOpcionales},
    models::usuario::{LoginData, LoginPayload, RegistroPayload},
};

// IP del cliente: primero el proxy del panel, después la conexión directa.
fn ip_del_cliente(headers: &HeaderMap, addr: &SocketAddr) -> String {
    headers
        .get("x-forwarded-for")
        .and_then(|valor| valor.to_str().ok())
        .and_then(|valor| valor.split(',').next())
        .map(|valor| valor.trim().to_owned())
        .unwrap_or_else(|| addr.ip().to_string())
}

#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginPayload,
    responses(
        (status = 200, description = "Token emitido junto con el perfil"),
        (status = 401, description = "Credenciales inválidas"),
        (status = 403, description = "Cuenta inactiva")
    ),
    tag = "Auth"
)]
pub async fn login(
    State(app_state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
    axum::Json(payload): axum::Json<LoginPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let ip = ip_del_cliente(&headers, &addr);
    let (token, usuario) = app_state
        .auth_service
        .login(&payload.username, &payload.password, Some(ip))
        .await?;

    Ok((StatusCode::OK, Respuesta::ok(LoginData { token, usuario })))
}

#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body = RegistroPayload,
    responses(
        (status = 201, description = "Cuenta creada"),
        (status = 403, description = "Requiere superadmin, o intenta crear otro superadmin"),
        (status = 409, description = "El username ya existe")
    ),
    tag = "Auth"
)]
pub async fn register(
    State(app_state): State<AppState>,
    ClaimsOpcionales(actor): ClaimsOpcionales,
    axum::Json(payload): axum::Json<RegistroPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let usuario = app_state.auth_service.registrar(payload, actor.as_ref()).await?;

    Ok((StatusCode::CREATED, Respuesta::ok(usuario)))
}

#[utoipa::path(
    post,
    path = "/api/auth/logout",
    responses(
        (status = 200, description = "Token invalidado"),
        (status = 401, description = "Token ausente o inválido")
    ),
    security(("bearer_auth" = [])),
    tag = "Auth"
)]
pub async fn logout(
    State(app_state): State<AppState>,
    TypedHeader(Authorization(bearer)): TypedHeader<Authorization<Bearer>>,
    ClaimsActuales(claims): ClaimsActuales,
) -> Result<impl IntoResponse, AppError> {
    app_state.auth_service.logout(bearer.token(), &claims).await?;

    Ok((StatusCode::OK, Respuesta::ok(serde_json::json!({ "mensaje": "Sesión cerrada." }))))
}

#[utoipa::path(
    get,
    path = "/api/auth/validate",
    responses(
        (status = 200, description = "Claims vigentes del token"),
        (status = 401, description = "Token ausente, vencido o invalidado")
    ),
    security(("bearer_auth" = [])),
    tag = "Auth"
)]
pub async fn validar(ClaimsActuales(claims): ClaimsActuales) -> impl IntoResponse {
    Respuesta::ok(claims)
}
