// src/db/catalogo_repo.rs

use sqlx::PgPool;

use crate::{
    common::error::AppError,
    models::catalogo::{Categoria, CategoriaConConteo, Subcategoria, SubcategoriaConCategoria},
};

#[derive(Clone)]
pub struct CatalogoRepository {
    pool: PgPool,
}

impl CatalogoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // ---
    // Categorías
    // ---

    pub async fn listar_categorias(&self) -> Result<Vec<CategoriaConConteo>, AppError> {
        let categorias = sqlx::query_as::<_, CategoriaConConteo>(
            r#"
            SELECT c.id, c.nombre, c.descripcion,
                   COUNT(s.id) AS subcategorias,
                   c.creado_en
            FROM categorias c
            LEFT JOIN subcategorias s ON s.categoria_id = c.id
            GROUP BY c.id
            ORDER BY c.nombre ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(categorias)
    }

    pub async fn crear_categoria(
        &self,
        nombre: &str,
        descripcion: Option<&str>,
    ) -> Result<Categoria, AppError> {
        sqlx::query_as::<_, Categoria>(
            "INSERT INTO categorias (nombre, descripcion) VALUES ($1, $2) RETURNING *",
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

    pub async fn contar_subcategorias(&self, categoria_id: i64) -> Result<i64, AppError> {
        let conteo: (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM subcategorias WHERE categoria_id = $1")
                .bind(categoria_id)
                .fetch_one(&self.pool)
                .await?;
        Ok(conteo.0)
    }

    pub async fn eliminar_categoria(&self, id: i64) -> Result<u64, AppError> {
        let resultado = sqlx::query("DELETE FROM categorias WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(resultado.rows_affected())
    }

    // ---
    // Subcategorías
    // ---

    pub async fn listar_subcategorias(
        &self,
        categoria_id: Option<i64>,
    ) -> Result<Vec<SubcategoriaConCategoria>, AppError> {
        let subcategorias = sqlx::query_as::<_, SubcategoriaConCategoria>(
            r#"
            SELECT s.id, s.categoria_id, c.nombre AS categoria, s.nombre, s.creado_en
            FROM subcategorias s
            JOIN categorias c ON c.id = s.categoria_id
            WHERE $1::BIGINT IS NULL OR s.categoria_id = $1
            ORDER BY c.nombre ASC, s.nombre ASC
            "#,
        )
        .bind(categoria_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(subcategorias)
    }

    pub async fn crear_subcategoria(
        &self,
        categoria_id: i64,
        nombre: &str,
    ) -> Result<Subcategoria, AppError> {
        sqlx::query_as::<_, Subcategoria>(
            "INSERT INTO subcategorias (categoria_id, nombre) VALUES ($1, $2) RETURNING *",
        )
        .bind(categoria_id)
        .bind(nombre)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return AppError::Duplicado(nombre.to_string());
                }
                if db_err.is_foreign_key_violation() {
                    return AppError::NoEncontrado("La categoría");
                }
            }
            e.into()
        })
    }

    // Solo cuentan los artículos activos: un artículo dado de baja no
    // bloquea el borrado de su subcategoría.
    pub async fn contar_articulos_activos(&self, subcategoria_id: i64) -> Result<i64, AppError> {
        let conteo: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM articulos WHERE subcategoria_id = $1 AND activo = TRUE",
        )
        .bind(subcategoria_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(conteo.0)
    }

    pub async fn eliminar_subcategoria(&self, id: i64) -> Result<u64, AppError> {
        let resultado = sqlx::query("DELETE FROM subcategorias WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(resultado.rows_affected())
    }
}
