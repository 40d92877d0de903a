// src/models/auditoria.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// Acción registrada en la bitácora. El tipo cerrado hace imposible insertar
// una entrada sin acción.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "accion_auditoria", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum AccionAuditoria {
    Crear,
    Actualizar,
    Eliminar,
    CambioEstado,
    Login,
    Logout,
}

// Entrada append-only: nunca se actualiza ni se borra.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct EntradaAuditoria {
    pub id: i64,
    pub usuario_id: i64,
    pub accion: AccionAuditoria,
    pub tabla_afectada: String,
    pub registro_id: Option<i64>,
    pub descripcion: String,
    pub creado_en: DateTime<Utc>,
}

// Listado para el panel con el username del actor resuelto.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct EntradaAuditoriaConUsuario {
    pub id: i64,
    pub usuario_id: i64,
    pub usuario: String,
    pub accion: AccionAuditoria,
    pub tabla_afectada: String,
    pub registro_id: Option<i64>,
    pub descripcion: String,
    pub creado_en: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct FiltroAuditoria {
    pub limite: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accion_serializa_en_snake_case() {
        assert_eq!(
            serde_json::to_string(&AccionAuditoria::CambioEstado).unwrap(),
            "\"cambio_estado\""
        );
    }
}
