// src/models/empleado.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Empleado {
    pub id: i64,
    pub documento: String,
    pub nombre: String,
    pub cargo: Option<String>,
    pub area: Option<String>,
    pub activo: bool,
    pub creado_en: DateTime<Utc>,
    pub actualizado_en: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct GuardarEmpleadoPayload {
    #[validate(length(min = 3, message = "El documento debe tener al menos 3 caracteres."))]
    pub documento: String,
    #[validate(length(min = 1, message = "El nombre es obligatorio."))]
    pub nombre: String,
    pub cargo: Option<String>,
    pub area: Option<String>,
}
