// src/models/movimiento.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "tipo_movimiento", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum TipoMovimiento {
    Ingreso,
    Salida,
}

// Asiento del libro de movimientos. `cantidad_resultante` es el saldo de la
// dotación después de aplicar el movimiento, persistido en la misma
// transacción que el ajuste del saldo.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Movimiento {
    pub id: i64,
    pub dotacion_id: i64,
    pub empleado_id: Option<i64>,
    pub usuario_id: i64,
    pub tipo: TipoMovimiento,
    pub cantidad: i32,
    pub cantidad_resultante: i32,
    pub adjunto: Option<String>,
    pub observaciones: Option<String>,
    pub creado_en: DateTime<Utc>,
}

// Listado con los nombres ya resueltos para el panel.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct MovimientoConDetalle {
    pub id: i64,
    pub dotacion_id: i64,
    pub elemento: String,
    pub empleado_id: Option<i64>,
    pub empleado: Option<String>,
    pub usuario_id: i64,
    pub usuario: String,
    pub tipo: TipoMovimiento,
    pub cantidad: i32,
    pub cantidad_resultante: i32,
    pub adjunto: Option<String>,
    pub observaciones: Option<String>,
    pub creado_en: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CrearMovimientoPayload {
    pub dotacion_id: i64,
    pub empleado_id: Option<i64>,
    pub tipo: TipoMovimiento,
    #[validate(range(min = 1, message = "La cantidad debe ser mayor que cero."))]
    pub cantidad: i32,
    pub adjunto: Option<String>,
    pub observaciones: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tipo_movimiento_serializa_en_minusculas() {
        assert_eq!(
            serde_json::to_string(&TipoMovimiento::Ingreso).unwrap(),
            "\"ingreso\""
        );
        let t: TipoMovimiento = serde_json::from_str("\"salida\"").unwrap();
        assert_eq!(t, TipoMovimiento::Salida);
    }
}
