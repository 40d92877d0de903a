// src/models/dotacion.rs
//
// Inventario heredado: una fila por elemento de dotación con su saldo.
// El libro de movimientos opera sobre estas filas.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Dotacion {
    pub id: i64,
    pub elemento: String,
    pub talla: Option<String>,
    pub cantidad: i32,
    pub estado: String,
    pub empleado_id: Option<i64>,
    pub observaciones: Option<String>,
    pub activo: bool,
    pub creado_en: DateTime<Utc>,
    pub actualizado_en: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CrearDotacionPayload {
    #[validate(length(min = 1, message = "El elemento es obligatorio."))]
    pub elemento: String,
    pub talla: Option<String>,
    #[validate(range(min = 0, message = "La cantidad no puede ser negativa."))]
    #[serde(default)]
    pub cantidad: i32,
    pub estado: Option<String>,
    pub empleado_id: Option<i64>,
    pub observaciones: Option<String>,
}

// Actualización parcial (PATCH): solo se escriben los campos presentes.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct ActualizarDotacionPayload {
    #[validate(length(min = 1, message = "El elemento es obligatorio."))]
    pub elemento: Option<String>,
    pub talla: Option<String>,
    #[validate(range(min = 0, message = "La cantidad no puede ser negativa."))]
    pub cantidad: Option<i32>,
    pub estado: Option<String>,
    pub empleado_id: Option<i64>,
    pub observaciones: Option<String>,
}

impl ActualizarDotacionPayload {
    pub fn vacio(&self) -> bool {
        self.elemento.is_none()
            && self.talla.is_none()
            && self.cantidad.is_none()
            && self.estado.is_none()
            && self.empleado_id.is_none()
            && self.observaciones.is_none()
    }
}
