// src/services/stock_service.rs
//
// Entradas y retiros puntuales de stock. A diferencia del guardado de
// artículos (que sobreescribe), este camino SUMA y RESTA sobre el saldo.

use sqlx::PgPool;

use crate::{
    common::error::AppError,
    db::ArticuloRepository,
    models::{
        articulo::{MovimientoStockPayload, Stock},
        auditoria::AccionAuditoria,
        usuario::Claims,
    },
    services::auditoria_service::AuditoriaService,
};

#[derive(Clone)]
pub struct StockService {
    articulo_repo: ArticuloRepository,
    auditoria: AuditoriaService,
    pool: PgPool,
}

impl StockService {
    pub fn new(articulo_repo: ArticuloRepository, auditoria: AuditoriaService, pool: PgPool) -> Self {
        Self { articulo_repo, auditoria, pool }
    }

    pub async fn ingresar(
        &self,
        payload: MovimientoStockPayload,
        actor: &Claims,
    ) -> Result<Stock, AppError> {
        let mut tx = self.pool.begin().await?;

        if !self.articulo_repo.existe_talla(&mut *tx, payload.talla_id).await? {
            return Err(AppError::NoEncontrado("La talla"));
        }

        let stock = self
            .articulo_repo
            .aplicar_ingreso(&mut *tx, payload.talla_id, payload.condicion, payload.cantidad)
            .await?;

        tx.commit().await?;

        self.auditoria
            .registrar(
                actor.sub,
                AccionAuditoria::Actualizar,
                "stock",
                Some(stock.id),
                &format!(
                    "Ingreso de {} unidad(es) a la talla {} (saldo: {})",
                    payload.cantidad, payload.talla_id, stock.cantidad
                ),
            )
            .await?;

        Ok(stock)
    }

    // El saldo se decide con la fila bloqueada: dos retiros concurrentes no
    // pueden dejar la cantidad en negativo.
    pub async fn retirar(
        &self,
        payload: MovimientoStockPayload,
        actor: &Claims,
    ) -> Result<Stock, AppError> {
        let mut tx = self.pool.begin().await?;

        let actual = self
            .articulo_repo
            .stock_para_actualizar(&mut *tx, payload.talla_id, payload.condicion)
            .await?
            .ok_or(AppError::NoEncontrado("El stock"))?;

        if actual.cantidad < payload.cantidad {
            return Err(AppError::StockInsuficiente);
        }

        let stock = self
            .articulo_repo
            .aplicar_retiro(&mut *tx, payload.talla_id, payload.condicion, payload.cantidad)
            .await?;

        tx.commit().await?;

        self.auditoria
            .registrar(
                actor.sub,
                AccionAuditoria::Actualizar,
                "stock",
                Some(stock.id),
                &format!(
                    "Retiro de {} unidad(es) de la talla {} (saldo: {})",
                    payload.cantidad, payload.talla_id, stock.cantidad
                ),
            )
            .await?;

        Ok(stock)
    }
}
