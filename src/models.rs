pub mod articulo;
pub mod auditoria;
pub mod catalogo;
pub mod dotacion;
pub mod empleado;
pub mod movimiento;
pub mod rol;
pub mod usuario;
