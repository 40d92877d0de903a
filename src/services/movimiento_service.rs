// src/services/movimiento_service.rs
//
// Libro de movimientos de dotaciones. El asiento y el nuevo saldo se
// escriben en la misma transacción: o quedan ambos o ninguno.

use sqlx::PgPool;

use crate::{
    common::error::AppError,
    db::{DotacionRepository, MovimientoRepository},
    models::{
        auditoria::AccionAuditoria,
        movimiento::{CrearMovimientoPayload, Movimiento, MovimientoConDetalle, TipoMovimiento},
        usuario::Claims,
    },
    services::auditoria_service::AuditoriaService,
};

// Saldo de la dotación después de aplicar el movimiento. Una salida nunca
// puede dejar la cantidad en negativo.
fn calcular_saldo(actual: i32, tipo: TipoMovimiento, cantidad: i32) -> Result<i32, AppError> {
    match tipo {
        TipoMovimiento::Ingreso => Ok(actual + cantidad),
        TipoMovimiento::Salida => {
            if actual < cantidad {
                return Err(AppError::StockInsuficiente);
            }
            Ok(actual - cantidad)
        }
    }
}

#[derive(Clone)]
pub struct MovimientoService {
    movimiento_repo: MovimientoRepository,
    dotacion_repo: DotacionRepository,
    auditoria: AuditoriaService,
    pool: PgPool,
}

impl MovimientoService {
    pub fn new(
        movimiento_repo: MovimientoRepository,
        dotacion_repo: DotacionRepository,
        auditoria: AuditoriaService,
        pool: PgPool,
    ) -> Self {
        Self { movimiento_repo, dotacion_repo, auditoria, pool }
    }

    pub async fn listar(&self) -> Result<Vec<MovimientoConDetalle>, AppError> {
        self.movimiento_repo.listar().await
    }

    pub async fn registrar(
        &self,
        payload: CrearMovimientoPayload,
        actor: &Claims,
    ) -> Result<Movimiento, AppError> {
        let mut tx = self.pool.begin().await?;

        // Saldo leído con la fila bloqueada.
        let dotacion = self
            .dotacion_repo
            .obtener_para_actualizar(&mut *tx, payload.dotacion_id)
            .await?
            .ok_or(AppError::NoEncontrado("La dotación"))?;

        let cantidad_resultante = calcular_saldo(dotacion.cantidad, payload.tipo, payload.cantidad)?;

        self.dotacion_repo
            .actualizar_cantidad(&mut *tx, dotacion.id, cantidad_resultante)
            .await?;

        let movimiento = self
            .movimiento_repo
            .insertar(
                &mut *tx,
                dotacion.id,
                payload.empleado_id,
                actor.sub,
                payload.tipo,
                payload.cantidad,
                cantidad_resultante,
                payload.adjunto.as_deref(),
                payload.observaciones.as_deref(),
            )
            .await?;

        tx.commit().await?;

        self.auditoria
            .registrar(
                actor.sub,
                AccionAuditoria::Crear,
                "movimientos",
                Some(movimiento.id),
                &format!(
                    "Movimiento de {} de {} unidad(es) sobre '{}' (saldo: {})",
                    match payload.tipo {
                        TipoMovimiento::Ingreso => "ingreso",
                        TipoMovimiento::Salida => "salida",
                    },
                    payload.cantidad,
                    dotacion.elemento,
                    cantidad_resultante
                ),
            )
            .await?;

        Ok(movimiento)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn el_ingreso_suma_y_la_salida_resta() {
        assert_eq!(calcular_saldo(10, TipoMovimiento::Ingreso, 5).unwrap(), 15);
        assert_eq!(calcular_saldo(10, TipoMovimiento::Salida, 4).unwrap(), 6);
    }

    #[test]
    fn la_salida_no_deja_saldo_negativo() {
        assert!(matches!(
            calcular_saldo(3, TipoMovimiento::Salida, 4),
            Err(AppError::StockInsuficiente)
        ));
    }

    #[test]
    fn retirar_todo_deja_saldo_cero() {
        assert_eq!(calcular_saldo(5, TipoMovimiento::Salida, 5).unwrap(), 0);
    }
}
