// src/models/catalogo.rs
//
// Jerarquía de tres niveles: categoría -> subcategoría -> artículo.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Categoria {
    pub id: i64,
    pub nombre: String,
    pub descripcion: Option<String>,
    pub creado_en: DateTime<Utc>,
}

// Listado de categorías con el conteo de subcategorías colgando de cada una.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct CategoriaConConteo {
    pub id: i64,
    pub nombre: String,
    pub descripcion: Option<String>,
    pub subcategorias: i64,
    pub creado_en: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Subcategoria {
    pub id: i64,
    pub categoria_id: i64,
    pub nombre: String,
    pub creado_en: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct SubcategoriaConCategoria {
    pub id: i64,
    pub categoria_id: i64,
    pub categoria: String,
    pub nombre: String,
    pub creado_en: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CrearCategoriaPayload {
    #[validate(length(min = 1, message = "El nombre es obligatorio."))]
    pub nombre: String,
    pub descripcion: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CrearSubcategoriaPayload {
    pub categoria_id: i64,
    #[validate(length(min = 1, message = "El nombre es obligatorio."))]
    pub nombre: String,
}

#[derive(Debug, Deserialize)]
pub struct FiltroSubcategorias {
    pub categoria_id: Option<i64>,
}
