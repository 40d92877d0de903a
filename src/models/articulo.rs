// src/models/articulo.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

// Condición en la que se guarda una unidad de stock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "condicion_stock", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Condicion {
    Nuevo,
    Reutilizable,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Articulo {
    pub id: i64,
    pub subcategoria_id: i64,
    pub nombre: String,
    pub descripcion: Option<String>,
    pub activo: bool,
    pub creado_en: DateTime<Utc>,
    pub actualizado_en: DateTime<Utc>,
}

// Vista de listado/detalle: artículo con los nombres de su jerarquía y el
// stock agregado por condición (ausente cuenta como cero).
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct ArticuloConStock {
    pub id: i64,
    pub nombre: String,
    pub descripcion: Option<String>,
    pub subcategoria_id: i64,
    pub subcategoria: String,
    pub categoria_id: i64,
    pub categoria: String,
    pub stock_nuevo: i64,
    pub stock_reutilizable: i64,
    pub activo: bool,
    pub creado_en: DateTime<Utc>,
    pub actualizado_en: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Talla {
    pub id: i64,
    pub articulo_id: i64,
    pub etiqueta: String,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct TallaConStock {
    pub id: i64,
    pub articulo_id: i64,
    pub etiqueta: String,
    pub stock_nuevo: i64,
    pub stock_reutilizable: i64,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Stock {
    pub id: i64,
    pub talla_id: i64,
    pub condicion: Condicion,
    pub cantidad: i32,
}

// Una talla dentro del payload de guardado. Con `id` actualiza la fila
// existente; sin `id` inserta una nueva. Las cantidades SOBREESCRIBEN el
// stock guardado (no suman).
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct TallaEntrada {
    pub id: Option<i64>,
    #[validate(length(min = 1, message = "La etiqueta de talla es obligatoria."))]
    pub etiqueta: String,
    #[validate(range(min = 0, message = "El stock no puede ser negativo."))]
    #[serde(default)]
    pub stock_nuevo: i32,
    #[validate(range(min = 0, message = "El stock no puede ser negativo."))]
    #[serde(default)]
    pub stock_reutilizable: i32,
}

// Alta y edición de artículo comparten el mismo cuerpo. En la edición,
// toda talla guardada cuyo id no venga en `tallas` se elimina junto con
// su stock.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct GuardarArticuloPayload {
    #[validate(length(min = 1, message = "El nombre es obligatorio."))]
    pub nombre: String,
    pub descripcion: Option<String>,
    pub subcategoria_id: i64,
    #[validate(nested)]
    #[serde(default)]
    pub tallas: Vec<TallaEntrada>,
}

// Entrada/retiro puntual de stock sobre una (talla, condición).
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct MovimientoStockPayload {
    pub talla_id: i64,
    pub condicion: Condicion,
    #[validate(range(min = 1, message = "La cantidad debe ser mayor que cero."))]
    pub cantidad: i32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn condicion_serializa_en_minusculas() {
        assert_eq!(serde_json::to_string(&Condicion::Nuevo).unwrap(), "\"nuevo\"");
        let c: Condicion = serde_json::from_str("\"reutilizable\"").unwrap();
        assert_eq!(c, Condicion::Reutilizable);
    }

    #[test]
    fn guardar_articulo_valida_tallas_anidadas() {
        let payload = GuardarArticuloPayload {
            nombre: "Botas de seguridad".into(),
            descripcion: None,
            subcategoria_id: 1,
            tallas: vec![TallaEntrada {
                id: None,
                etiqueta: String::new(),
                stock_nuevo: 2,
                stock_reutilizable: 0,
            }],
        };
        assert!(payload.validate().is_err());
    }

    #[test]
    fn movimiento_stock_rechaza_cantidad_cero() {
        let payload = MovimientoStockPayload {
            talla_id: 1,
            condicion: Condicion::Nuevo,
            cantidad: 0,
        };
        assert!(payload.validate().is_err());
    }
}
