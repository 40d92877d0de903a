// src/db/rol_repo.rs

use sqlx::PgPool;

use crate::{common::error::AppError, models::rol::Rol};

#[derive(Clone)]
pub struct RolRepository {
    pool: PgPool,
}

impl RolRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn listar(&self) -> Result<Vec<Rol>, AppError> {
        let roles = sqlx::query_as::<_, Rol>("SELECT * FROM roles ORDER BY id ASC")
            .fetch_all(&self.pool)
            .await?;
        Ok(roles)
    }

    pub async fn crear(&self, nombre: &str, descripcion: Option<&str>) -> Result<Rol, AppError> {
        sqlx::query_as::<_, Rol>(
            "INSERT INTO roles (nombre, descripcion) VALUES ($1, $2) RETURNING *",
        )
        .bind(nombre)
        .bind(descripcion)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return AppError::Duplicado(nombre.to_string());
                }
            }
            e.into()
        })
    }

    pub async fn contar_usuarios_con_rol(&self, id: i64) -> Result<i64, AppError> {
        let conteo: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM usuarios WHERE id_rol = $1")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(conteo.0)
    }

    pub async fn eliminar(&self, id: i64) -> Result<u64, AppError> {
        let resultado = sqlx::query("DELETE FROM roles WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(resultado.rows_affected())
    }
}
