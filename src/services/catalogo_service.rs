// src/services/catalogo_service.rs

use crate::{
    common::error::AppError,
    db::CatalogoRepository,
    models::{
        auditoria::AccionAuditoria,
        catalogo::{Categoria, CategoriaConConteo, Subcategoria, SubcategoriaConCategoria},
        usuario::Claims,
    },
    services::auditoria_service::AuditoriaService,
};

#[derive(Clone)]
pub struct CatalogoService {
    catalogo_repo: CatalogoRepository,
    auditoria: AuditoriaService,
}

impl CatalogoService {
    pub fn new(catalogo_repo: CatalogoRepository, auditoria: AuditoriaService) -> Self {
        Self { catalogo_repo, auditoria }
    }

    pub async fn listar_categorias(&self) -> Result<Vec<CategoriaConConteo>, AppError> {
        self.catalogo_repo.listar_categorias().await
    }

    pub async fn crear_categoria(
        &self,
        nombre: &str,
        descripcion: Option<&str>,
        actor: &Claims,
    ) -> Result<Categoria, AppError> {
        let categoria = self.catalogo_repo.crear_categoria(nombre, descripcion).await?;

        self.auditoria
            .registrar(
                actor.sub,
                AccionAuditoria::Crear,
                "categorias",
                Some(categoria.id),
                &format!("Alta de categoría '{}'", categoria.nombre),
            )
            .await?;

        Ok(categoria)
    }

    // Una categoría con subcategorías colgando no se puede eliminar.
    pub async fn eliminar_categoria(&self, id: i64, actor: &Claims) -> Result<(), AppError> {
        if self.catalogo_repo.contar_subcategorias(id).await? > 0 {
            return Err(AppError::EnUso("La categoría"));
        }
        if self.catalogo_repo.eliminar_categoria(id).await? == 0 {
            return Err(AppError::NoEncontrado("La categoría"));
        }

        self.auditoria
            .registrar(
                actor.sub,
                AccionAuditoria::Eliminar,
                "categorias",
                Some(id),
                &format!("Eliminación de categoría {id}"),
            )
            .await?;

        Ok(())
    }

    pub async fn listar_subcategorias(
        &self,
        categoria_id: Option<i64>,
    ) -> Result<Vec<SubcategoriaConCategoria>, AppError> {
        self.catalogo_repo.listar_subcategorias(categoria_id).await
    }

    pub async fn crear_subcategoria(
        &self,
        categoria_id: i64,
        nombre: &str,
        actor: &Claims,
    ) -> Result<Subcategoria, AppError> {
        let subcategoria = self.catalogo_repo.crear_subcategoria(categoria_id, nombre).await?;

        self.auditoria
            .registrar(
                actor.sub,
                AccionAuditoria::Crear,
                "subcategorias",
                Some(subcategoria.id),
                &format!("Alta de subcategoría '{}'", subcategoria.nombre),
            )
            .await?;

        Ok(subcategoria)
    }

    // Mientras haya artículos activos colgando, la subcategoría no se toca:
    // un artículo siempre referencia una subcategoría válida.
    pub async fn eliminar_subcategoria(&self, id: i64, actor: &Claims) -> Result<(), AppError> {
        if self.catalogo_repo.contar_articulos_activos(id).await? > 0 {
            return Err(AppError::EnUso("La subcategoría"));
        }
        if self.catalogo_repo.eliminar_subcategoria(id).await? == 0 {
            return Err(AppError::NoEncontrado("La subcategoría"));
        }

        self.auditoria
            .registrar(
                actor.sub,
                AccionAuditoria::Eliminar,
                "subcategorias",
                Some(id),
                &format!("Eliminación de subcategoría {id}"),
            )
            .await?;

        Ok(())
    }
}
