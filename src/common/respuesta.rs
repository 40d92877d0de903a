// src/common/respuesta.rs

use axum::Json;
use serde::Serialize;

// Sobre estándar de éxito: todas las respuestas llevan el booleano
// `success`; los errores construyen el suyo en `error.rs`.
#[derive(Debug, Serialize)]
pub struct Respuesta<T> {
    pub success: bool,
    pub data: T,
}

impl<T: Serialize> Respuesta<T> {
    pub fn ok(data: T) -> Json<Self> {
        Json(Self { success: true, data })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn el_sobre_incluye_success() {
        let Json(respuesta) = Respuesta::ok(vec![1, 2, 3]);
        let json = serde_json::to_value(&respuesta).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["data"][0], 1);
    }
}
