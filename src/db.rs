pub mod usuario_repo;
pub use usuario_repo::UsuarioRepository;
pub mod auth_repo;
pub use auth_repo::AuthRepository;
pub mod auditoria_repo;
pub use auditoria_repo::AuditoriaRepository;
pub mod catalogo_repo;
pub use catalogo_repo::CatalogoRepository;
pub mod articulo_repo;
pub use articulo_repo::ArticuloRepository;
pub mod empleado_repo;
pub use empleado_repo::EmpleadoRepository;
pub mod dotacion_repo;
pub use dotacion_repo::DotacionRepository;
pub mod movimiento_repo;
pub use movimiento_repo::MovimientoRepository;
pub mod rol_repo;
pub use rol_repo::RolRepository;
