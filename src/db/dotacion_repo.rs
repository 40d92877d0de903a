// src/db/dotacion_repo.rs

use sqlx::{Executor, PgPool, Postgres, QueryBuilder};

use crate::{
    common::error::AppError,
    models::dotacion::{ActualizarDotacionPayload, Dotacion},
};

// Igual que en usuarios: el PATCH emite solo las asignaciones presentes.
fn construir_actualizacion(
    id: i64,
    campos: &ActualizarDotacionPayload,
) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new("UPDATE dotaciones SET ");
    let mut sep = qb.separated(", ");
    if let Some(elemento) = &campos.elemento {
        sep.push("elemento = ").push_bind_unseparated(elemento.clone());
    }
    if let Some(talla) = &campos.talla {
        sep.push("talla = ").push_bind_unseparated(talla.clone());
    }
    if let Some(cantidad) = campos.cantidad {
        sep.push("cantidad = ").push_bind_unseparated(cantidad);
    }
    if let Some(estado) = &campos.estado {
        sep.push("estado = ").push_bind_unseparated(estado.clone());
    }
    if let Some(empleado_id) = campos.empleado_id {
        sep.push("empleado_id = ").push_bind_unseparated(empleado_id);
    }
    if let Some(observaciones) = &campos.observaciones {
        sep.push("observaciones = ")
            .push_bind_unseparated(observaciones.clone());
    }
    sep.push("actualizado_en = now()");
    qb.push(" WHERE id = ").push_bind(id);
    qb.push(" AND activo = TRUE RETURNING *");
    qb
}

#[derive(Clone)]
pub struct DotacionRepository {
    pool: PgPool,
}

impl DotacionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn listar(&self) -> Result<Vec<Dotacion>, AppError> {
        let dotaciones = sqlx::query_as::<_, Dotacion>(
            "SELECT * FROM dotaciones WHERE activo = TRUE ORDER BY elemento ASC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(dotaciones)
    }

    pub async fn obtener(&self, id: i64) -> Result<Option<Dotacion>, AppError> {
        let dotacion = sqlx::query_as::<_, Dotacion>(
            "SELECT * FROM dotaciones WHERE id = $1 AND activo = TRUE",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(dotacion)
    }

    pub async fn crear(
        &self,
        elemento: &str,
        talla: Option<&str>,
        cantidad: i32,
        estado: &str,
        empleado_id: Option<i64>,
        observaciones: Option<&str>,
    ) -> Result<Dotacion, AppError> {
        sqlx::query_as::<_, Dotacion>(
            r#"
            INSERT INTO dotaciones (elemento, talla, cantidad, estado, empleado_id, observaciones)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(elemento)
        .bind(talla)
        .bind(cantidad)
        .bind(estado)
        .bind(empleado_id)
        .bind(observaciones)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_foreign_key_violation() {
                    return AppError::NoEncontrado("El empleado");
                }
            }
            e.into()
        })
    }

    pub async fn actualizar(
        &self,
        id: i64,
        elemento: &str,
        talla: Option<&str>,
        cantidad: i32,
        estado: &str,
        empleado_id: Option<i64>,
        observaciones: Option<&str>,
    ) -> Result<Option<Dotacion>, AppError> {
        let dotacion = sqlx::query_as::<_, Dotacion>(
            r#"
            UPDATE dotaciones
            SET elemento = $2, talla = $3, cantidad = $4, estado = $5,
                empleado_id = $6, observaciones = $7, actualizado_en = now()
            WHERE id = $1 AND activo = TRUE
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(elemento)
        .bind(talla)
        .bind(cantidad)
        .bind(estado)
        .bind(empleado_id)
        .bind(observaciones)
        .fetch_optional(&self.pool)
        .await?;
        Ok(dotacion)
    }

    pub async fn actualizar_parcial(
        &self,
        id: i64,
        campos: &ActualizarDotacionPayload,
    ) -> Result<Option<Dotacion>, AppError> {
        let mut qb = construir_actualizacion(id, campos);
        let dotacion = qb
            .build_query_as::<Dotacion>()
            .fetch_optional(&self.pool)
            .await?;
        Ok(dotacion)
    }

    // Bloquea la fila: el saldo se decide y se escribe dentro de la misma
    // transacción del movimiento.
    pub async fn obtener_para_actualizar<'e, E>(
        &self,
        executor: E,
        id: i64,
    ) -> Result<Option<Dotacion>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let dotacion = sqlx::query_as::<_, Dotacion>(
            "SELECT * FROM dotaciones WHERE id = $1 AND activo = TRUE FOR UPDATE",
        )
        .bind(id)
        .fetch_optional(executor)
        .await?;
        Ok(dotacion)
    }

    pub async fn actualizar_cantidad<'e, E>(
        &self,
        executor: E,
        id: i64,
        cantidad: i32,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query("UPDATE dotaciones SET cantidad = $2, actualizado_en = now() WHERE id = $1")
            .bind(id)
            .bind(cantidad)
            .execute(executor)
            .await?;
        Ok(())
    }

    pub async fn marcar_inactiva(&self, id: i64) -> Result<Option<Dotacion>, AppError> {
        let dotacion = sqlx::query_as::<_, Dotacion>(
            r#"
            UPDATE dotaciones
            SET activo = FALSE, actualizado_en = now()
            WHERE id = $1 AND activo = TRUE
            RETURNING *
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(dotacion)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn patch_emite_solo_los_campos_presentes() {
        let campos = ActualizarDotacionPayload {
            cantidad: Some(12),
            estado: Some("asignado".into()),
            ..Default::default()
        };
        let mut qb = construir_actualizacion(4, &campos);
        let sql = qb.sql();
        assert!(sql.contains("cantidad = $1"));
        assert!(sql.contains("estado = $2"));
        assert!(!sql.contains("elemento ="));
        assert!(!sql.contains("observaciones ="));
        assert!(sql.contains("actualizado_en = now()"));
    }
}
