use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::sync::OnceLock;
use thiserror::Error;

// Bandera de modo desarrollo: en producción los detalles internos se
// suprimen de las respuestas. La fija `config` al arrancar.
static MODO_DESARROLLO: OnceLock<bool> = OnceLock::new();

pub fn fijar_modo_desarrollo(activo: bool) {
    let _ = MODO_DESARROLLO.set(activo);
}

fn en_desarrollo() -> bool {
    *MODO_DESARROLLO.get().unwrap_or(&false)
}

// Taxonomía de errores de la aplicación, con `thiserror` para mejor
// ergonomía.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Error de validación")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("No se proporcionó ningún campo para actualizar")]
    SinCampos,

    #[error("Usuario o contraseña incorrectos")]
    CredencialesInvalidas,

    #[error("Token de autenticación ausente")]
    TokenAusente,

    #[error("El token ha expirado")]
    TokenExpirado,

    #[error("Token inválido")]
    TokenInvalido,

    #[error("El token fue invalidado por cierre de sesión")]
    TokenInvalidado,

    #[error("La cuenta está inactiva")]
    CuentaInactiva,

    #[error("Rol insuficiente para esta operación")]
    RolInsuficiente,

    #[error("No puede ejecutar esta acción sobre su propia cuenta")]
    AccionSobreSiMismo,

    #[error("Ya existe un superadmin; este endpoint no crea más")]
    SuperadminExiste,

    #[error("{0} no encontrado")]
    NoEncontrado(&'static str),

    #[error("El nombre de usuario ya existe")]
    UsernameExiste,

    #[error("Stock insuficiente para el retiro solicitado")]
    StockInsuficiente,

    #[error("{0} está en uso y no se puede eliminar")]
    EnUso(&'static str),

    #[error("Los roles integrados no se pueden eliminar")]
    RolProtegido,

    #[error("Violación de unicidad: {0}")]
    Duplicado(String),

    // Errores de base de datos (sqlx). El rollback ya ocurrió al llegar aquí.
    #[error("Error de base de datos")]
    DatabaseError(#[from] sqlx::Error),

    // Genérico para cualquier otro error inesperado.
    #[error("Error interno del servidor")]
    InternalServerError(#[from] anyhow::Error),

    #[error("Error de Bcrypt: {0}")]
    BcryptError(#[from] bcrypt::BcryptError),

    #[error("Error de JWT: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            // Los errores de validación devuelven el detalle por campo.
            AppError::ValidationError(errors) => {
                let mut details = std::collections::HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                let body = Json(json!({
                    "success": false,
                    "error": "Uno o más campos son inválidos.",
                    "details": details,
                }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }

            AppError::SinCampos => (
                StatusCode::BAD_REQUEST,
                "No se proporcionó ningún campo para actualizar.",
            ),

            AppError::CredencialesInvalidas => {
                (StatusCode::UNAUTHORIZED, "Usuario o contraseña incorrectos.")
            }
            AppError::TokenAusente => (
                StatusCode::UNAUTHORIZED,
                "Token de autenticación ausente.",
            ),
            AppError::TokenExpirado => (StatusCode::UNAUTHORIZED, "El token ha expirado."),
            AppError::TokenInvalido => (StatusCode::UNAUTHORIZED, "Token inválido."),
            AppError::TokenInvalidado => (
                StatusCode::UNAUTHORIZED,
                "La sesión fue cerrada; inicie sesión nuevamente.",
            ),

            AppError::CuentaInactiva => (StatusCode::FORBIDDEN, "La cuenta está inactiva."),
            AppError::RolInsuficiente => (
                StatusCode::FORBIDDEN,
                "No tiene permisos para realizar esta operación.",
            ),
            AppError::AccionSobreSiMismo => (
                StatusCode::FORBIDDEN,
                "No puede ejecutar esta acción sobre su propia cuenta.",
            ),
            AppError::SuperadminExiste => (
                StatusCode::FORBIDDEN,
                "Ya existe un superadmin; no se pueden crear más por esta vía.",
            ),

            AppError::NoEncontrado(recurso) => {
                let body = Json(json!({
                    "success": false,
                    "error": format!("{recurso} no encontrado."),
                }));
                return (StatusCode::NOT_FOUND, body).into_response();
            }

            AppError::UsernameExiste => {
                (StatusCode::CONFLICT, "El nombre de usuario ya existe.")
            }
            AppError::StockInsuficiente => (
                StatusCode::CONFLICT,
                "Stock insuficiente para el retiro solicitado.",
            ),
            AppError::EnUso(recurso) => {
                let body = Json(json!({
                    "success": false,
                    "error": format!("{recurso} está en uso y no se puede eliminar."),
                }));
                return (StatusCode::CONFLICT, body).into_response();
            }
            AppError::RolProtegido => (
                StatusCode::CONFLICT,
                "Los roles integrados no se pueden eliminar.",
            ),
            AppError::Duplicado(detalle) => {
                let body = Json(json!({
                    "success": false,
                    "error": format!("Ya existe un registro con ese valor: {detalle}."),
                }));
                return (StatusCode::CONFLICT, body).into_response();
            }

            // Todo lo demás (DatabaseError, InternalServerError, ...) es 500.
            // `tracing` deja el detalle en el log; al cliente solo le llega
            // el mensaje genérico, salvo en desarrollo.
            ref e => {
                tracing::error!("Error interno del servidor: {e:#}");
                if en_desarrollo() {
                    let body = Json(json!({
                        "success": false,
                        "error": "Ocurrió un error inesperado.",
                        "details": format!("{e:#}"),
                    }));
                    return (StatusCode::INTERNAL_SERVER_ERROR, body).into_response();
                }
                (StatusCode::INTERNAL_SERVER_ERROR, "Ocurrió un error inesperado.")
            }
        };

        // Respuesta estándar para errores simples de un solo mensaje.
        let body = Json(json!({ "success": false, "error": error_message }));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credenciales_invalidas_es_401() {
        let respuesta = AppError::CredencialesInvalidas.into_response();
        assert_eq!(respuesta.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn sin_campos_es_400() {
        let respuesta = AppError::SinCampos.into_response();
        assert_eq!(respuesta.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn username_existe_es_409() {
        let respuesta = AppError::UsernameExiste.into_response();
        assert_eq!(respuesta.status(), StatusCode::CONFLICT);
    }
}
