// src/services/articulo_service.rs
//
// Camino de escritura transaccional del catálogo: artículo + tallas + stock
// se aplican completos o no se aplican.

use sqlx::PgPool;

use crate::{
    common::error::AppError,
    db::ArticuloRepository,
    models::{
        articulo::{Articulo, ArticuloConStock, Condicion, GuardarArticuloPayload, TallaConStock, TallaEntrada},
        auditoria::AccionAuditoria,
        usuario::Claims,
    },
    services::auditoria_service::AuditoriaService,
};

#[derive(Clone)]
pub struct ArticuloService {
    articulo_repo: ArticuloRepository,
    auditoria: AuditoriaService,
    pool: PgPool,
}

impl ArticuloService {
    pub fn new(articulo_repo: ArticuloRepository, auditoria: AuditoriaService, pool: PgPool) -> Self {
        Self { articulo_repo, auditoria, pool }
    }

    // ---
    // Lecturas
    // ---

    pub async fn listar(&self) -> Result<Vec<ArticuloConStock>, AppError> {
        self.articulo_repo.listar_con_stock().await
    }

    pub async fn detalle(&self, id: i64) -> Result<ArticuloConStock, AppError> {
        self.articulo_repo
            .obtener_con_stock(id)
            .await?
            .ok_or(AppError::NoEncontrado("El artículo"))
    }

    pub async fn tallas_de(&self, articulo_id: i64) -> Result<Vec<TallaConStock>, AppError> {
        // El 404 del artículo manda antes que una lista vacía.
        self.detalle(articulo_id).await?;
        self.articulo_repo.tallas_con_stock(articulo_id).await
    }

    // ---
    // Escrituras
    // ---

    // Las cantidades de cada talla SOBREESCRIBEN el stock guardado por
    // (talla, condición): aplicar dos veces el mismo payload deja el mismo
    // resultado.
    async fn sobrescribir_stock_de_talla(
        &self,
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        talla_id: i64,
        entrada: &TallaEntrada,
    ) -> Result<(), AppError> {
        self.articulo_repo
            .sobrescribir_stock(&mut **tx, talla_id, Condicion::Nuevo, entrada.stock_nuevo)
            .await?;
        self.articulo_repo
            .sobrescribir_stock(
                &mut **tx,
                talla_id,
                Condicion::Reutilizable,
                entrada.stock_reutilizable,
            )
            .await?;
        Ok(())
    }

    pub async fn crear(
        &self,
        payload: GuardarArticuloPayload,
        actor: &Claims,
    ) -> Result<Articulo, AppError> {
        let mut tx = self.pool.begin().await?;

        let articulo = self
            .articulo_repo
            .insertar_articulo(
                &mut *tx,
                &payload.nombre,
                payload.descripcion.as_deref(),
                payload.subcategoria_id,
            )
            .await?;

        for entrada in &payload.tallas {
            let talla = self
                .articulo_repo
                .insertar_talla(&mut *tx, articulo.id, &entrada.etiqueta)
                .await?;
            self.sobrescribir_stock_de_talla(&mut tx, talla.id, entrada).await?;
        }

        tx.commit().await?;

        self.auditoria
            .registrar(
                actor.sub,
                AccionAuditoria::Crear,
                "articulos",
                Some(articulo.id),
                &format!(
                    "Alta de artículo '{}' con {} talla(s)",
                    articulo.nombre,
                    payload.tallas.len()
                ),
            )
            .await?;

        Ok(articulo)
    }

    // Reconciliación de tallas en la edición: toda talla guardada cuyo id no
    // venga en el payload se elimina (primero su stock); las que traen id se
    // actualizan y las nuevas se insertan. Cualquier fallo revierte todo.
    pub async fn actualizar(
        &self,
        id: i64,
        payload: GuardarArticuloPayload,
        actor: &Claims,
    ) -> Result<Articulo, AppError> {
        let mut tx = self.pool.begin().await?;

        let articulo = self
            .articulo_repo
            .actualizar_articulo(
                &mut *tx,
                id,
                &payload.nombre,
                payload.descripcion.as_deref(),
                payload.subcategoria_id,
            )
            .await?
            .ok_or(AppError::NoEncontrado("El artículo"))?;

        let existentes = self.articulo_repo.ids_tallas(&mut *tx, id).await?;
        let entrantes: Vec<i64> = payload.tallas.iter().filter_map(|t| t.id).collect();
        let a_eliminar: Vec<i64> = existentes
            .into_iter()
            .filter(|talla_id| !entrantes.contains(talla_id))
            .collect();

        if !a_eliminar.is_empty() {
            self.articulo_repo
                .eliminar_stock_de_tallas(&mut *tx, &a_eliminar)
                .await?;
            self.articulo_repo.eliminar_tallas(&mut *tx, &a_eliminar).await?;
        }

        for entrada in &payload.tallas {
            let talla_id = match entrada.id {
                Some(talla_id) => {
                    self.articulo_repo
                        .actualizar_talla(&mut *tx, talla_id, id, &entrada.etiqueta)
                        .await?
                        .ok_or(AppError::NoEncontrado("La talla"))?;
                    talla_id
                }
                None => {
                    self.articulo_repo
                        .insertar_talla(&mut *tx, id, &entrada.etiqueta)
                        .await?
                        .id
                }
            };
            self.sobrescribir_stock_de_talla(&mut tx, talla_id, entrada).await?;
        }

        tx.commit().await?;

        self.auditoria
            .registrar(
                actor.sub,
                AccionAuditoria::Actualizar,
                "articulos",
                Some(articulo.id),
                &format!("Actualización de artículo '{}'", articulo.nombre),
            )
            .await?;

        Ok(articulo)
    }

    pub async fn eliminar(&self, id: i64, actor: &Claims) -> Result<Articulo, AppError> {
        let articulo = self
            .articulo_repo
            .marcar_inactivo(id)
            .await?
            .ok_or(AppError::NoEncontrado("El artículo"))?;

        self.auditoria
            .registrar(
                actor.sub,
                AccionAuditoria::Eliminar,
                "articulos",
                Some(articulo.id),
                &format!("Baja de artículo '{}'", articulo.nombre),
            )
            .await?;

        Ok(articulo)
    }
}

#[cfg(test)]
mod tests {
    // La reconciliación de ids es el corazón de la edición; se prueba la
    // misma lógica de conjuntos que corre dentro de la transacción.

    #[test]
    fn las_tallas_omitidas_quedan_marcadas_para_borrado() {
        let existentes = vec![40_i64, 41, 42];
        let entrantes = vec![40_i64, 41];
        let a_eliminar: Vec<i64> = existentes
            .into_iter()
            .filter(|id| !entrantes.contains(id))
            .collect();
        assert_eq!(a_eliminar, vec![42]);
    }

    #[test]
    fn sin_omisiones_no_se_borra_nada() {
        let existentes = vec![40_i64, 41];
        let entrantes = vec![41_i64, 40];
        let a_eliminar: Vec<i64> = existentes
            .into_iter()
            .filter(|id| !entrantes.contains(id))
            .collect();
        assert!(a_eliminar.is_empty());
    }
}
