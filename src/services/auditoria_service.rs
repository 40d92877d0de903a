// src/services/auditoria_service.rs

use crate::{
    common::error::AppError,
    db::AuditoriaRepository,
    models::auditoria::{AccionAuditoria, EntradaAuditoriaConUsuario},
};

const LIMITE_POR_DEFECTO: i64 = 200;
const LIMITE_MAXIMO: i64 = 1000;

// Registrador de auditoría. Política única: el registro es obligatorio.
// Si el INSERT falla después de un commit, el error se propaga al llamador
// (la mutación ya quedó aplicada, pero la operación responde 500 y el fallo
// queda en el log).
#[derive(Clone)]
pub struct AuditoriaService {
    auditoria_repo: AuditoriaRepository,
}

impl AuditoriaService {
    pub fn new(auditoria_repo: AuditoriaRepository) -> Self {
        Self { auditoria_repo }
    }

    pub async fn registrar(
        &self,
        usuario_id: i64,
        accion: AccionAuditoria,
        tabla_afectada: &str,
        registro_id: Option<i64>,
        descripcion: &str,
    ) -> Result<(), AppError> {
        self.auditoria_repo
            .insertar(usuario_id, accion, tabla_afectada, registro_id, descripcion)
            .await
            .map_err(|e| {
                tracing::error!(
                    "Fallo al auditar {:?} sobre {tabla_afectada}: {e}",
                    accion
                );
                e
            })?;
        Ok(())
    }

    pub async fn listar(
        &self,
        limite: Option<i64>,
    ) -> Result<Vec<EntradaAuditoriaConUsuario>, AppError> {
        let limite = limite.unwrap_or(LIMITE_POR_DEFECTO).clamp(1, LIMITE_MAXIMO);
        self.auditoria_repo.listar(limite).await
    }
}
