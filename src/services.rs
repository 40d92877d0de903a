pub mod articulo_service;
pub mod auditoria_service;
pub mod auth;
pub mod catalogo_service;
pub mod dotacion_service;
pub mod empleado_service;
pub mod movimiento_service;
pub mod rol_service;
pub mod stock_service;
pub mod tokens;
pub mod usuario_service;
