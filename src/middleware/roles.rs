// src/middleware/roles.rs

use axum::{extract::FromRequestParts, http::request::Parts};
use std::marker::PhantomData;

use crate::{
    common::error::AppError,
    models::usuario::{Claims, RolUsuario},
};

// 1. El trait que define el rol mínimo de una ruta
pub trait RequisitoRol: Send + Sync + 'static {
    fn minimo() -> RolUsuario;
}

// 2. El extractor (guardián). Se declara como parámetro del handler y
// rechaza con 403 a quien no alcance el rol mínimo.
pub struct RequiereRol<T>(pub PhantomData<T>);

impl<T, S> FromRequestParts<S> for RequiereRol<T>
where
    T: RequisitoRol,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let claims = parts.extensions.get::<Claims>().ok_or(AppError::TokenAusente)?;

        if claims.rol < T::minimo() {
            return Err(AppError::RolInsuficiente);
        }

        Ok(RequiereRol(PhantomData))
    }
}

// ---
// Niveles mínimos
// ---

pub struct MinimoAdmin;
impl RequisitoRol for MinimoAdmin {
    fn minimo() -> RolUsuario {
        RolUsuario::Admin
    }
}

pub struct MinimoSuperadmin;
impl RequisitoRol for MinimoSuperadmin {
    fn minimo() -> RolUsuario {
        RolUsuario::Superadmin
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn el_orden_de_roles_decide_el_acceso() {
        assert!(RolUsuario::Superadmin >= MinimoAdmin::minimo());
        assert!(RolUsuario::Admin >= MinimoAdmin::minimo());
        assert!(RolUsuario::Viewer < MinimoAdmin::minimo());
        assert!(RolUsuario::Admin < MinimoSuperadmin::minimo());
        assert!(RolUsuario::Superadmin >= MinimoSuperadmin::minimo());
    }
}
