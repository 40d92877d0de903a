// src/db/empleado_repo.rs

use sqlx::PgPool;

use crate::{common::error::AppError, models::empleado::Empleado};

#[derive(Clone)]
pub struct EmpleadoRepository {
    pool: PgPool,
}

impl EmpleadoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn listar(&self) -> Result<Vec<Empleado>, AppError> {
        let empleados = sqlx::query_as::<_, Empleado>(
            "SELECT * FROM empleados WHERE activo = TRUE ORDER BY nombre ASC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(empleados)
    }

    pub async fn obtener(&self, id: i64) -> Result<Option<Empleado>, AppError> {
        let empleado =
            sqlx::query_as::<_, Empleado>("SELECT * FROM empleados WHERE id = $1 AND activo = TRUE")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(empleado)
    }

    pub async fn crear(
        &self,
        documento: &str,
        nombre: &str,
        cargo: Option<&str>,
        area: Option<&str>,
    ) -> Result<Empleado, AppError> {
        sqlx::query_as::<_, Empleado>(
            r#"
            INSERT INTO empleados (documento, nombre, cargo, area)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(documento)
        .bind(nombre)
        .bind(cargo)
        .bind(area)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return AppError::Duplicado(documento.to_string());
                }
            }
            e.into()
        })
    }

    pub async fn actualizar(
        &self,
        id: i64,
        documento: &str,
        nombre: &str,
        cargo: Option<&str>,
        area: Option<&str>,
    ) -> Result<Option<Empleado>, AppError> {
        let empleado = sqlx::query_as::<_, Empleado>(
            r#"
            UPDATE empleados
            SET documento = $2, nombre = $3, cargo = $4, area = $5, actualizado_en = now()
            WHERE id = $1 AND activo = TRUE
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(documento)
        .bind(nombre)
        .bind(cargo)
        .bind(area)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return AppError::Duplicado(documento.to_string());
                }
            }
            AppError::from(e)
        })?;
        Ok(empleado)
    }

    pub async fn marcar_inactivo(&self, id: i64) -> Result<Option<Empleado>, AppError> {
        let empleado = sqlx::query_as::<_, Empleado>(
            r#"
            UPDATE empleados
            SET activo = FALSE, actualizado_en = now()
            WHERE id = $1 AND activo = TRUE
            RETURNING *
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(empleado)
    }
}
