pub mod articulos;
pub mod auditoria;
pub mod auth;
pub mod catalogo;
pub mod dotaciones;
pub mod empleados;
pub mod movimientos;
pub mod roles;
pub mod stock;
pub mod usuarios;
