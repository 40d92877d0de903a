use axum::{
    extract::{FromRequestParts, Request, State},
    http::{request::Parts, Method},
    middleware::Next,
    response::Response,
};

use crate::{common::error::AppError, config::AppState, models::usuario::Claims};

// Rutas públicas: coincidencia exacta de (método, ruta), consultada antes
// de intentar siquiera leer el token.
const RUTAS_PUBLICAS: &[(&str, &str)] = &[
    ("POST", "/api/auth/login"),
    ("POST", "/api/auth/register"),
    ("GET", "/api/health"),
];

pub fn es_ruta_publica(metodo: &Method, ruta: &str) -> bool {
    RUTAS_PUBLICAS
        .iter()
        .any(|(m, r)| *m == metodo.as_str() && *r == ruta)
}

fn token_del_header(request: &Request) -> Option<String> {
    request
        .headers()
        .get("Authorization")
        .and_then(|valor| valor.to_str().ok())
        .and_then(|valor| valor.strip_prefix("Bearer "))
        .map(str::to_owned)
}

// El guard corre sobre todo /api. Valida firma, expiración y lista de
// invalidación, adjunta los claims a la request y anota el acceso.
pub async fn auth_guard(
    State(app_state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let ruta = request.uri().path().to_owned();
    let metodo = request.method().clone();
    let token = token_del_header(&request);

    if es_ruta_publica(&metodo, &ruta) {
        // En rutas públicas el token es opcional, pero si viene y es válido
        // se adjunta igual: el registro post-bootstrap depende de esto.
        if let Some(token) = token {
            if let Ok(claims) = app_state.auth_service.validar_token(&token).await {
                request.extensions_mut().insert(claims);
            }
        }
        return Ok(next.run(request).await);
    }

    let token = token.ok_or(AppError::TokenAusente)?;
    let claims = app_state.auth_service.validar_token(&token).await?;

    // Bitácora de accesos: best-effort, nunca afecta la respuesta.
    app_state.auth_service.anotar_acceso_en_segundo_plano(
        claims.sub,
        ruta,
        metodo.as_str().to_owned(),
    );

    request.extensions_mut().insert(claims);
    Ok(next.run(request).await)
}

// Extractor para obtener los claims autenticados directamente en los
// handlers.
pub struct ClaimsActuales(pub Claims);

impl<S> FromRequestParts<S> for ClaimsActuales
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Claims>()
            .cloned()
            .map(ClaimsActuales)
            .ok_or(AppError::TokenAusente)
    }
}

// Variante opcional: ausencia de token no es error. La usa el registro,
// que es público solo durante el bootstrap.
pub struct ClaimsOpcionales(pub Option<Claims>);

impl<S> FromRequestParts<S> for ClaimsOpcionales
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(ClaimsOpcionales(parts.extensions.get::<Claims>().cloned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_y_register_son_publicas() {
        assert!(es_ruta_publica(&Method::POST, "/api/auth/login"));
        assert!(es_ruta_publica(&Method::POST, "/api/auth/register"));
        assert!(es_ruta_publica(&Method::GET, "/api/health"));
    }

    #[test]
    fn la_coincidencia_es_exacta_en_ruta_y_metodo() {
        // Mismo path con otro método no es público.
        assert!(!es_ruta_publica(&Method::GET, "/api/auth/login"));
        // Prefijos o sufijos no cuentan.
        assert!(!es_ruta_publica(&Method::POST, "/api/auth/login/"));
        assert!(!es_ruta_publica(&Method::POST, "/api/auth"));
    }

    #[test]
    fn las_rutas_protegidas_no_son_publicas() {
        assert!(!es_ruta_publica(&Method::GET, "/api/articulos"));
        assert!(!es_ruta_publica(&Method::POST, "/api/auth/logout"));
    }
}
