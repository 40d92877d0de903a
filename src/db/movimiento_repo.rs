// src/db/movimiento_repo.rs

use sqlx::{Executor, PgPool, Postgres};

use crate::{
    common::error::AppError,
    models::movimiento::{Movimiento, MovimientoConDetalle, TipoMovimiento},
};

#[derive(Clone)]
pub struct MovimientoRepository {
    pool: PgPool,
}

impl MovimientoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // El asiento se inserta dentro de la misma transacción que ajusta el
    // saldo de la dotación.
    pub async fn insertar<'e, E>(
        &self,
        executor: E,
        dotacion_id: i64,
        empleado_id: Option<i64>,
        usuario_id: i64,
        tipo: TipoMovimiento,
        cantidad: i32,
        cantidad_resultante: i32,
        adjunto: Option<&str>,
        observaciones: Option<&str>,
    ) -> Result<Movimiento, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let movimiento = sqlx::query_as::<_, Movimiento>(
            r#"
            INSERT INTO movimientos
                (dotacion_id, empleado_id, usuario_id, tipo, cantidad,
                 cantidad_resultante, adjunto, observaciones)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(dotacion_id)
        .bind(empleado_id)
        .bind(usuario_id)
        .bind(tipo)
        .bind(cantidad)
        .bind(cantidad_resultante)
        .bind(adjunto)
        .bind(observaciones)
        .fetch_one(executor)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_foreign_key_violation() {
                    return AppError::NoEncontrado("El empleado");
                }
            }
            e.into()
        })?;
        Ok(movimiento)
    }

    pub async fn listar(&self) -> Result<Vec<MovimientoConDetalle>, AppError> {
        let movimientos = sqlx::query_as::<_, MovimientoConDetalle>(
            r#"
            SELECT m.id, m.dotacion_id, d.elemento,
                   m.empleado_id, e.nombre AS empleado,
                   m.usuario_id, u.username AS usuario,
                   m.tipo, m.cantidad, m.cantidad_resultante,
                   m.adjunto, m.observaciones, m.creado_en
            FROM movimientos m
            JOIN dotaciones d ON d.id = m.dotacion_id
            LEFT JOIN empleados e ON e.id = m.empleado_id
            JOIN usuarios u ON u.id = m.usuario_id
            ORDER BY m.creado_en DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(movimientos)
    }
}
