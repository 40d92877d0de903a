// src/db/articulo_repo.rs

use sqlx::{Executor, PgPool, Postgres};

use crate::{
    common::error::AppError,
    models::articulo::{Articulo, ArticuloConStock, Condicion, Stock, Talla, TallaConStock},
};

#[derive(Clone)]
pub struct ArticuloRepository {
    pool: PgPool,
}

impl ArticuloRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // ---
    // Lecturas
    // ---
    // Las lecturas van directo a la pool; no hay caché.

    pub async fn listar_con_stock(&self) -> Result<Vec<ArticuloConStock>, AppError> {
        let articulos = sqlx::query_as::<_, ArticuloConStock>(
            r#"
            SELECT a.id, a.nombre, a.descripcion,
                   a.subcategoria_id, s.nombre AS subcategoria,
                   c.id AS categoria_id, c.nombre AS categoria,
                   COALESCE(SUM(st.cantidad) FILTER (WHERE st.condicion = 'nuevo'), 0)::BIGINT AS stock_nuevo,
                   COALESCE(SUM(st.cantidad) FILTER (WHERE st.condicion = 'reutilizable'), 0)::BIGINT AS stock_reutilizable,
                   a.activo, a.creado_en, a.actualizado_en
            FROM articulos a
            JOIN subcategorias s ON s.id = a.subcategoria_id
            JOIN categorias c ON c.id = s.categoria_id
            LEFT JOIN tallas t ON t.articulo_id = a.id
            LEFT JOIN stock st ON st.talla_id = t.id
            WHERE a.activo = TRUE
            GROUP BY a.id, s.id, c.id
            ORDER BY a.nombre ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(articulos)
    }

    pub async fn obtener_con_stock(&self, id: i64) -> Result<Option<ArticuloConStock>, AppError> {
        let articulo = sqlx::query_as::<_, ArticuloConStock>(
            r#"
            SELECT a.id, a.nombre, a.descripcion,
                   a.subcategoria_id, s.nombre AS subcategoria,
                   c.id AS categoria_id, c.nombre AS categoria,
                   COALESCE(SUM(st.cantidad) FILTER (WHERE st.condicion = 'nuevo'), 0)::BIGINT AS stock_nuevo,
                   COALESCE(SUM(st.cantidad) FILTER (WHERE st.condicion = 'reutilizable'), 0)::BIGINT AS stock_reutilizable,
                   a.activo, a.creado_en, a.actualizado_en
            FROM articulos a
            JOIN subcategorias s ON s.id = a.subcategoria_id
            JOIN categorias c ON c.id = s.categoria_id
            LEFT JOIN tallas t ON t.articulo_id = a.id
            LEFT JOIN stock st ON st.talla_id = t.id
            WHERE a.id = $1 AND a.activo = TRUE
            GROUP BY a.id, s.id, c.id
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(articulo)
    }

    pub async fn tallas_con_stock(&self, articulo_id: i64) -> Result<Vec<TallaConStock>, AppError> {
        let tallas = sqlx::query_as::<_, TallaConStock>(
            r#"
            SELECT t.id, t.articulo_id, t.etiqueta,
                   COALESCE(SUM(s.cantidad) FILTER (WHERE s.condicion = 'nuevo'), 0)::BIGINT AS stock_nuevo,
                   COALESCE(SUM(s.cantidad) FILTER (WHERE s.condicion = 'reutilizable'), 0)::BIGINT AS stock_reutilizable
            FROM tallas t
            LEFT JOIN stock s ON s.talla_id = t.id
            WHERE t.articulo_id = $1
            GROUP BY t.id
            ORDER BY t.etiqueta ASC
            "#,
        )
        .bind(articulo_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(tallas)
    }

    // ---
    // Escrituras
    // ---
    // Usan el patrón genérico `Executor` para correr dentro de una
    // transacción del servicio.

    pub async fn insertar_articulo<'e, E>(
        &self,
        executor: E,
        nombre: &str,
        descripcion: Option<&str>,
        subcategoria_id: i64,
    ) -> Result<Articulo, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Articulo>(
            r#"
            INSERT INTO articulos (nombre, descripcion, subcategoria_id)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(nombre)
        .bind(descripcion)
        .bind(subcategoria_id)
        .fetch_one(executor)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_foreign_key_violation() {
                    return AppError::NoEncontrado("La subcategoría");
                }
            }
            e.into()
        })
    }

    pub async fn actualizar_articulo<'e, E>(
        &self,
        executor: E,
        id: i64,
        nombre: &str,
        descripcion: Option<&str>,
        subcategoria_id: i64,
    ) -> Result<Option<Articulo>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let articulo = sqlx::query_as::<_, Articulo>(
            r#"
            UPDATE articulos
            SET nombre = $2, descripcion = $3, subcategoria_id = $4, actualizado_en = now()
            WHERE id = $1 AND activo = TRUE
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(nombre)
        .bind(descripcion)
        .bind(subcategoria_id)
        .fetch_optional(executor)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_foreign_key_violation() {
                    return AppError::NoEncontrado("La subcategoría");
                }
            }
            AppError::from(e)
        })?;
        Ok(articulo)
    }

    // Baja lógica: una sola sentencia, sin transacción.
    pub async fn marcar_inactivo(&self, id: i64) -> Result<Option<Articulo>, AppError> {
        let articulo = sqlx::query_as::<_, Articulo>(
            r#"
            UPDATE articulos
            SET activo = FALSE, actualizado_en = now()
            WHERE id = $1 AND activo = TRUE
            RETURNING *
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(articulo)
    }

    // ---
    // Tallas
    // ---

    pub async fn ids_tallas<'e, E>(&self, executor: E, articulo_id: i64) -> Result<Vec<i64>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let filas: Vec<(i64,)> = sqlx::query_as("SELECT id FROM tallas WHERE articulo_id = $1")
            .bind(articulo_id)
            .fetch_all(executor)
            .await?;
        Ok(filas.into_iter().map(|(id,)| id).collect())
    }

    pub async fn eliminar_stock_de_tallas<'e, E>(
        &self,
        executor: E,
        talla_ids: &[i64],
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query("DELETE FROM stock WHERE talla_id = ANY($1)")
            .bind(talla_ids)
            .execute(executor)
            .await?;
        Ok(())
    }

    pub async fn eliminar_tallas<'e, E>(&self, executor: E, talla_ids: &[i64]) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query("DELETE FROM tallas WHERE id = ANY($1)")
            .bind(talla_ids)
            .execute(executor)
            .await?;
        Ok(())
    }

    pub async fn insertar_talla<'e, E>(
        &self,
        executor: E,
        articulo_id: i64,
        etiqueta: &str,
    ) -> Result<Talla, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Talla>(
            "INSERT INTO tallas (articulo_id, etiqueta) VALUES ($1, $2) RETURNING *",
        )
        .bind(articulo_id)
        .bind(etiqueta)
        .fetch_one(executor)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return AppError::Duplicado(etiqueta.to_string());
                }
            }
            e.into()
        })
    }

    // El filtro por articulo_id evita que un id de talla ajeno al artículo
    // en edición termine renombrado.
    pub async fn actualizar_talla<'e, E>(
        &self,
        executor: E,
        id: i64,
        articulo_id: i64,
        etiqueta: &str,
    ) -> Result<Option<Talla>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let talla = sqlx::query_as::<_, Talla>(
            "UPDATE tallas SET etiqueta = $3 WHERE id = $1 AND articulo_id = $2 RETURNING *",
        )
        .bind(id)
        .bind(articulo_id)
        .bind(etiqueta)
        .fetch_optional(executor)
        .await?;
        Ok(talla)
    }

    // ---
    // Stock
    // ---

    // Upsert con semántica de SOBREESCRITURA: el valor entrante reemplaza la
    // cantidad guardada. Es el camino del guardado de artículos; el camino
    // de movimientos (abajo) suma y resta.
    pub async fn sobrescribir_stock<'e, E>(
        &self,
        executor: E,
        talla_id: i64,
        condicion: Condicion,
        cantidad: i32,
    ) -> Result<Stock, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let stock = sqlx::query_as::<_, Stock>(
            r#"
            INSERT INTO stock (talla_id, condicion, cantidad)
            VALUES ($1, $2, $3)
            ON CONFLICT (talla_id, condicion)
            DO UPDATE SET cantidad = EXCLUDED.cantidad
            RETURNING *
            "#,
        )
        .bind(talla_id)
        .bind(condicion)
        .bind(cantidad)
        .fetch_one(executor)
        .await?;
        Ok(stock)
    }

    pub async fn existe_talla<'e, E>(&self, executor: E, talla_id: i64) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let existe: (bool,) = sqlx::query_as("SELECT EXISTS (SELECT 1 FROM tallas WHERE id = $1)")
            .bind(talla_id)
            .fetch_one(executor)
            .await?;
        Ok(existe.0)
    }

    // Entrada de stock: acumula sobre lo existente (o crea la fila).
    pub async fn aplicar_ingreso<'e, E>(
        &self,
        executor: E,
        talla_id: i64,
        condicion: Condicion,
        cantidad: i32,
    ) -> Result<Stock, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let stock = sqlx::query_as::<_, Stock>(
            r#"
            INSERT INTO stock (talla_id, condicion, cantidad)
            VALUES ($1, $2, $3)
            ON CONFLICT (talla_id, condicion)
            DO UPDATE SET cantidad = stock.cantidad + EXCLUDED.cantidad
            RETURNING *
            "#,
        )
        .bind(talla_id)
        .bind(condicion)
        .bind(cantidad)
        .fetch_one(executor)
        .await?;
        Ok(stock)
    }

    // Bloquea la fila para decidir el retiro sin carreras.
    pub async fn stock_para_actualizar<'e, E>(
        &self,
        executor: E,
        talla_id: i64,
        condicion: Condicion,
    ) -> Result<Option<Stock>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let stock = sqlx::query_as::<_, Stock>(
            "SELECT * FROM stock WHERE talla_id = $1 AND condicion = $2 FOR UPDATE",
        )
        .bind(talla_id)
        .bind(condicion)
        .fetch_optional(executor)
        .await?;
        Ok(stock)
    }

    pub async fn aplicar_retiro<'e, E>(
        &self,
        executor: E,
        talla_id: i64,
        condicion: Condicion,
        cantidad: i32,
    ) -> Result<Stock, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let stock = sqlx::query_as::<_, Stock>(
            r#"
            UPDATE stock
            SET cantidad = cantidad - $3
            WHERE talla_id = $1 AND condicion = $2
            RETURNING *
            "#,
        )
        .bind(talla_id)
        .bind(condicion)
        .bind(cantidad)
        .fetch_one(executor)
        .await?;
        Ok(stock)
    }
}
