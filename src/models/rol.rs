// src/models/rol.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

// Fila de la tabla `roles`. Los ids 1..=3 son los roles integrados y no se
// pueden borrar.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Rol {
    pub id: i64,
    pub nombre: String,
    pub descripcion: Option<String>,
    pub creado_en: DateTime<Utc>,
}

pub const MAX_ID_ROL_PROTEGIDO: i64 = 3;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CrearRolPayload {
    #[validate(length(min = 1, message = "El nombre es obligatorio."))]
    pub nombre: String,
    pub descripcion: Option<String>,
}
