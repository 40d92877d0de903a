// src/models/usuario.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

// Los tres roles fijos del sistema, ordenados de menor a mayor privilegio.
// El orden de declaración es el que usa `PartialOrd` en el gate de roles.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, sqlx::Type, ToSchema,
)]
#[sqlx(type_name = "rol_usuario", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum RolUsuario {
    Viewer,
    Admin,
    Superadmin,
}

impl RolUsuario {
    // Ids fijos sembrados en la tabla `roles`.
    pub fn id(self) -> i64 {
        match self {
            RolUsuario::Superadmin => 1,
            RolUsuario::Admin => 2,
            RolUsuario::Viewer => 3,
        }
    }

    pub fn etiqueta(self) -> &'static str {
        match self {
            RolUsuario::Superadmin => "superadmin",
            RolUsuario::Admin => "admin",
            RolUsuario::Viewer => "viewer",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "estado_usuario", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum EstadoUsuario {
    Activo,
    Inactivo,
}

// Un usuario tal como viene de la base de datos.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Usuario {
    pub id: i64,
    pub username: String,
    pub nombre: String,

    #[serde(skip_serializing)] // nunca sale al frontend
    pub password_hash: String,

    pub rol: RolUsuario,
    pub id_rol: i64,
    pub estado: EstadoUsuario,
    pub creado_en: DateTime<Utc>,
    pub actualizado_en: DateTime<Utc>,
}

// Claims embebidos en el JWT. `jti` es el identificador de sesión
// generado en cada login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: i64,
    pub username: String,
    pub nombre: String,
    pub rol: RolUsuario,
    pub id_rol: i64,
    pub jti: String,
    pub iat: usize,
    pub exp: usize,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginPayload {
    #[validate(length(min = 1, message = "El usuario es obligatorio."))]
    pub username: String,
    #[validate(length(min = 1, message = "La contraseña es obligatoria."))]
    pub password: String,
}

// Alta de cuenta. `id_rol` se acepta por compatibilidad con el panel pero
// el valor persistido siempre se deriva de `rol`.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegistroPayload {
    #[validate(length(min = 3, message = "El usuario debe tener al menos 3 caracteres."))]
    pub username: String,
    #[validate(length(min = 8, message = "La contraseña debe tener al menos 8 caracteres."))]
    pub password: String,
    #[validate(length(min = 1, message = "El nombre es obligatorio."))]
    pub nombre: String,
    pub rol: RolUsuario,
    pub id_rol: Option<i64>,
}

// Actualización parcial: solo los campos presentes se escriben.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct ActualizarUsuarioPayload {
    #[validate(length(min = 3, message = "El usuario debe tener al menos 3 caracteres."))]
    pub username: Option<String>,
    #[validate(length(min = 1, message = "El nombre es obligatorio."))]
    pub nombre: Option<String>,
    #[validate(length(min = 8, message = "La contraseña debe tener al menos 8 caracteres."))]
    pub password: Option<String>,
    pub rol: Option<RolUsuario>,
}

impl ActualizarUsuarioPayload {
    pub fn vacio(&self) -> bool {
        self.username.is_none()
            && self.nombre.is_none()
            && self.password.is_none()
            && self.rol.is_none()
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CambiarEstadoPayload {
    pub estado: EstadoUsuario,
}

// Respuesta de login: token + perfil.
#[derive(Debug, Serialize)]
pub struct LoginData {
    pub token: String,
    pub usuario: Usuario,
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn roles_ordenados_por_privilegio() {
        assert!(RolUsuario::Viewer < RolUsuario::Admin);
        assert!(RolUsuario::Admin < RolUsuario::Superadmin);
        assert!(RolUsuario::Superadmin >= RolUsuario::Admin);
    }

    #[test]
    fn ids_de_rol_fijos() {
        assert_eq!(RolUsuario::Superadmin.id(), 1);
        assert_eq!(RolUsuario::Admin.id(), 2);
        assert_eq!(RolUsuario::Viewer.id(), 3);
    }

    #[test]
    fn rol_serializa_en_minusculas() {
        assert_eq!(
            serde_json::to_string(&RolUsuario::Superadmin).unwrap(),
            "\"superadmin\""
        );
        let rol: RolUsuario = serde_json::from_str("\"viewer\"").unwrap();
        assert_eq!(rol, RolUsuario::Viewer);
    }

    #[test]
    fn registro_rechaza_contrasena_corta() {
        let payload = RegistroPayload {
            username: "admin1".into(),
            password: "corta".into(),
            nombre: "Admin".into(),
            rol: RolUsuario::Admin,
            id_rol: None,
        };
        assert!(payload.validate().is_err());
    }

    #[test]
    fn registro_acepta_el_ejemplo_del_panel() {
        let payload: RegistroPayload = serde_json::from_value(serde_json::json!({
            "username": "admin1",
            "password": "longenough",
            "nombre": "Admin",
            "rol": "superadmin",
            "id_rol": 1
        }))
        .unwrap();
        assert!(payload.validate().is_ok());
        assert_eq!(payload.rol, RolUsuario::Superadmin);
    }

    #[test]
    fn actualizacion_sin_campos_es_vacia() {
        let payload = ActualizarUsuarioPayload::default();
        assert!(payload.vacio());
        let payload = ActualizarUsuarioPayload {
            nombre: Some("Otro".into()),
            ..Default::default()
        };
        assert!(!payload.vacio());
    }
}
