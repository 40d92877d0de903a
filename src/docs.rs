// src/docs.rs

use utoipa::OpenApi;
use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};

use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "API de dotaciones",
        description = "Inventario, catálogo y asignación de dotaciones (EPP)",
    ),
    paths(
        // --- Auth ---
        handlers::auth::login,
        handlers::auth::register,
        handlers::auth::logout,
        handlers::auth::validar,

        // --- Usuarios ---
        handlers::usuarios::listar,
        handlers::usuarios::actualizar,
        handlers::usuarios::cambiar_estado,

        // --- Roles ---
        handlers::roles::listar,
        handlers::roles::crear,
        handlers::roles::eliminar,

        // --- Catálogo ---
        handlers::catalogo::listar_categorias,
        handlers::catalogo::crear_categoria,
        handlers::catalogo::eliminar_categoria,
        handlers::catalogo::listar_subcategorias,
        handlers::catalogo::crear_subcategoria,
        handlers::catalogo::eliminar_subcategoria,

        // --- Artículos ---
        handlers::articulos::listar,
        handlers::articulos::detalle,
        handlers::articulos::tallas,
        handlers::articulos::crear,
        handlers::articulos::actualizar,
        handlers::articulos::eliminar,

        // --- Stock ---
        handlers::stock::ingresar,
        handlers::stock::retirar,

        // --- Dotaciones ---
        handlers::dotaciones::listar,
        handlers::dotaciones::obtener,
        handlers::dotaciones::crear,
        handlers::dotaciones::actualizar,
        handlers::dotaciones::actualizar_parcial,
        handlers::dotaciones::eliminar,

        // --- Empleados ---
        handlers::empleados::listar,
        handlers::empleados::crear,
        handlers::empleados::actualizar,
        handlers::empleados::eliminar,

        // --- Movimientos ---
        handlers::movimientos::listar,
        handlers::movimientos::registrar,

        // --- Auditoría ---
        handlers::auditoria::listar,
    ),
    components(
        schemas(
            // --- Auth ---
            models::usuario::RolUsuario,
            models::usuario::EstadoUsuario,
            models::usuario::LoginPayload,
            models::usuario::RegistroPayload,
            models::usuario::ActualizarUsuarioPayload,
            models::usuario::CambiarEstadoPayload,

            // --- Roles ---
            models::rol::CrearRolPayload,

            // --- Catálogo ---
            models::catalogo::CrearCategoriaPayload,
            models::catalogo::CrearSubcategoriaPayload,

            // --- Artículos y stock ---
            models::articulo::Condicion,
            models::articulo::TallaEntrada,
            models::articulo::GuardarArticuloPayload,
            models::articulo::MovimientoStockPayload,

            // --- Dotaciones ---
            models::dotacion::CrearDotacionPayload,
            models::dotacion::ActualizarDotacionPayload,

            // --- Empleados ---
            models::empleado::GuardarEmpleadoPayload,

            // --- Movimientos ---
            models::movimiento::TipoMovimiento,
            models::movimiento::CrearMovimientoPayload,
        )
    ),
    tags(
        (name = "Auth", description = "Autenticación y registro"),
        (name = "Usuarios", description = "Gestión de cuentas"),
        (name = "Roles", description = "Roles del sistema"),
        (name = "Catalogo", description = "Categorías y subcategorías"),
        (name = "Articulos", description = "Artículos con tallas y stock"),
        (name = "Stock", description = "Entradas y retiros de stock"),
        (name = "Dotaciones", description = "Inventario heredado de dotaciones"),
        (name = "Empleados", description = "Empleados que reciben dotación"),
        (name = "Movimientos", description = "Libro de movimientos"),
        (name = "Auditoria", description = "Bitácora de operaciones")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
    }
}
