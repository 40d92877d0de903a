// src/services/tokens.rs

use chrono::{DateTime, Utc};
use jsonwebtoken::{decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation};
use uuid::Uuid;

use crate::{common::error::AppError, models::usuario::{Claims, Usuario}};

// Emisión y verificación de JWT. La consulta a la lista de invalidación
// vive en el servicio de auth; aquí solo firma y estructura.
#[derive(Clone)]
pub struct TokenService {
    secreto: String,
    dias_vigencia: i64,
}

impl TokenService {
    pub fn new(secreto: String, dias_vigencia: i64) -> Self {
        Self { secreto, dias_vigencia }
    }

    pub fn emitir(&self, usuario: &Usuario) -> Result<String, AppError> {
        let ahora = Utc::now();
        let expira = ahora + chrono::Duration::days(self.dias_vigencia);

        let claims = Claims {
            sub: usuario.id,
            username: usuario.username.clone(),
            nombre: usuario.nombre.clone(),
            rol: usuario.rol,
            id_rol: usuario.id_rol,
            // Identificador de sesión: uno nuevo por cada login.
            jti: Uuid::new_v4().to_string(),
            iat: ahora.timestamp() as usize,
            exp: expira.timestamp() as usize,
        };

        Ok(encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secreto.as_ref()),
        )?)
    }

    pub fn decodificar(&self, token: &str) -> Result<Claims, AppError> {
        decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secreto.as_ref()),
            &Validation::default(),
        )
        .map(|datos| datos.claims)
        .map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => AppError::TokenExpirado,
            _ => AppError::TokenInvalido,
        })
    }

    // Expiración del token como fecha, para sembrar la lista de
    // invalidación en el logout.
    pub fn expiracion(claims: &Claims) -> Result<DateTime<Utc>, AppError> {
        DateTime::from_timestamp(claims.exp as i64, 0).ok_or(AppError::TokenInvalido)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::usuario::{EstadoUsuario, RolUsuario};

    fn usuario_de_prueba() -> Usuario {
        Usuario {
            id: 42,
            username: "admin1".into(),
            nombre: "Admin Uno".into(),
            password_hash: "$2b$12$irrelevante".into(),
            rol: RolUsuario::Admin,
            id_rol: RolUsuario::Admin.id(),
            estado: EstadoUsuario::Activo,
            creado_en: Utc::now(),
            actualizado_en: Utc::now(),
        }
    }

    #[test]
    fn emitir_y_decodificar_conserva_los_claims() {
        let servicio = TokenService::new("secreto-de-prueba".into(), 7);
        let token = servicio.emitir(&usuario_de_prueba()).unwrap();
        let claims = servicio.decodificar(&token).unwrap();
        assert_eq!(claims.sub, 42);
        assert_eq!(claims.username, "admin1");
        assert_eq!(claims.rol, RolUsuario::Admin);
        assert_eq!(claims.id_rol, 2);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn cada_login_lleva_un_jti_distinto() {
        let servicio = TokenService::new("secreto-de-prueba".into(), 7);
        let usuario = usuario_de_prueba();
        let a = servicio.decodificar(&servicio.emitir(&usuario).unwrap()).unwrap();
        let b = servicio.decodificar(&servicio.emitir(&usuario).unwrap()).unwrap();
        assert_ne!(a.jti, b.jti);
    }

    #[test]
    fn un_token_manipulado_es_invalido() {
        let servicio = TokenService::new("secreto-de-prueba".into(), 7);
        let mut token = servicio.emitir(&usuario_de_prueba()).unwrap();
        token.push('x');
        assert!(matches!(
            servicio.decodificar(&token),
            Err(AppError::TokenInvalido)
        ));
    }

    #[test]
    fn otro_secreto_no_valida_la_firma() {
        let emisor = TokenService::new("secreto-a".into(), 7);
        let receptor = TokenService::new("secreto-b".into(), 7);
        let token = emisor.emitir(&usuario_de_prueba()).unwrap();
        assert!(matches!(
            receptor.decodificar(&token),
            Err(AppError::TokenInvalido)
        ));
    }

    #[test]
    fn un_token_vencido_se_reporta_expirado() {
        let servicio = TokenService::new("secreto-de-prueba".into(), 7);
        let usuario = usuario_de_prueba();
        let ahora = Utc::now();
        // Claims armados a mano, vencidos hace dos días (más allá del leeway).
        let claims = Claims {
            sub: usuario.id,
            username: usuario.username.clone(),
            nombre: usuario.nombre.clone(),
            rol: usuario.rol,
            id_rol: usuario.id_rol,
            jti: "sesion-prueba".into(),
            iat: (ahora - chrono::Duration::days(9)).timestamp() as usize,
            exp: (ahora - chrono::Duration::days(2)).timestamp() as usize,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret("secreto-de-prueba".as_ref()),
        )
        .unwrap();
        assert!(matches!(
            servicio.decodificar(&token),
            Err(AppError::TokenExpirado)
        ));
    }
}
