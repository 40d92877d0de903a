// src/db/auditoria_repo.rs

use sqlx::PgPool;

use crate::{
    common::error::AppError,
    models::auditoria::{AccionAuditoria, EntradaAuditoria, EntradaAuditoriaConUsuario},
};

// Bitácora append-only: solo INSERT y SELECT, nunca UPDATE ni DELETE.
#[derive(Clone)]
pub struct AuditoriaRepository {
    pool: PgPool,
}

impl AuditoriaRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn insertar(
        &self,
        usuario_id: i64,
        accion: AccionAuditoria,
        tabla_afectada: &str,
        registro_id: Option<i64>,
        descripcion: &str,
    ) -> Result<EntradaAuditoria, AppError> {
        let entrada = sqlx::query_as::<_, EntradaAuditoria>(
            r#"
            INSERT INTO auditoria (usuario_id, accion, tabla_afectada, registro_id, descripcion)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(usuario_id)
        .bind(accion)
        .bind(tabla_afectada)
        .bind(registro_id)
        .bind(descripcion)
        .fetch_one(&self.pool)
        .await?;
        Ok(entrada)
    }

    pub async fn listar(&self, limite: i64) -> Result<Vec<EntradaAuditoriaConUsuario>, AppError> {
        let entradas = sqlx::query_as::<_, EntradaAuditoriaConUsuario>(
            r#"
            SELECT a.id, a.usuario_id, u.username AS usuario, a.accion,
                   a.tabla_afectada, a.registro_id, a.descripcion, a.creado_en
            FROM auditoria a
            JOIN usuarios u ON u.id = a.usuario_id
            ORDER BY a.creado_en DESC
            LIMIT $1
            "#,
        )
        .bind(limite)
        .fetch_all(&self.pool)
        .await?;
        Ok(entradas)
    }
}
