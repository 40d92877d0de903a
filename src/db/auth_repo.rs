// src/db/auth_repo.rs
//
// Historial de accesos/logins y la lista de tokens invalidados.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::common::error::AppError;

#[derive(Clone)]
pub struct AuthRepository {
    pool: PgPool,
}

impl AuthRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // Un intento de login, exitoso o no. El llamador decide si el fallo de
    // esta escritura debe propagarse (no debe: es best-effort).
    pub async fn registrar_intento_login(
        &self,
        usuario_id: Option<i64>,
        username: &str,
        exitoso: bool,
        motivo: Option<&str>,
        ip: Option<&str>,
    ) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO historial_login (usuario_id, username, exitoso, motivo, ip)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(usuario_id)
        .bind(username)
        .bind(exitoso)
        .bind(motivo)
        .bind(ip)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    pub async fn registrar_acceso(
        &self,
        usuario_id: i64,
        ruta: &str,
        metodo: &str,
    ) -> Result<(), AppError> {
        sqlx::query("INSERT INTO historial_accesos (usuario_id, ruta, metodo) VALUES ($1, $2, $3)")
            .bind(usuario_id)
            .bind(ruta)
            .bind(metodo)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    // Inserta el token con su propia expiración: una vez vencido el token,
    // el registro deja de importar y la purga lo elimina.
    pub async fn invalidar_token(
        &self,
        token: &str,
        expira_en: DateTime<Utc>,
    ) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO tokens_invalidados (token, expira_en)
            VALUES ($1, $2)
            ON CONFLICT (token) DO NOTHING
            "#,
        )
        .bind(token)
        .bind(expira_en)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    pub async fn token_invalidado(&self, token: &str) -> Result<bool, AppError> {
        let existe: (bool,) = sqlx::query_as(
            "SELECT EXISTS (SELECT 1 FROM tokens_invalidados WHERE token = $1 AND expira_en > now())",
        )
        .bind(token)
        .fetch_one(&self.pool)
        .await?;
        Ok(existe.0)
    }

    pub async fn purgar_tokens_expirados(&self) -> Result<u64, AppError> {
        let resultado = sqlx::query("DELETE FROM tokens_invalidados WHERE expira_en <= now()")
            .execute(&self.pool)
            .await?;
        Ok(resultado.rows_affected())
    }
}
