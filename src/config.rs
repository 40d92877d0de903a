// src/config.rs

use sqlx::{postgres::PgPoolOptions, PgPool};
use std::{env, time::Duration};

use crate::{
    common::error::fijar_modo_desarrollo,
    db::{
        ArticuloRepository, AuditoriaRepository, AuthRepository, CatalogoRepository,
        DotacionRepository, EmpleadoRepository, MovimientoRepository, RolRepository,
        UsuarioRepository,
    },
    services::{
        articulo_service::ArticuloService, auditoria_service::AuditoriaService, auth::AuthService,
        catalogo_service::CatalogoService, dotacion_service::DotacionService,
        empleado_service::EmpleadoService, movimiento_service::MovimientoService,
        rol_service::RolService, stock_service::StockService, tokens::TokenService,
        usuario_service::UsuarioService,
    },
};

const DIAS_JWT_POR_DEFECTO: i64 = 7;
const PUERTO_POR_DEFECTO: u16 = 3000;

// El estado compartido, accesible desde toda la aplicación.
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub puerto: u16,
    pub frontend_url: Option<String>,

    pub auth_repo: AuthRepository,

    pub auth_service: AuthService,
    pub usuario_service: UsuarioService,
    pub rol_service: RolService,
    pub catalogo_service: CatalogoService,
    pub articulo_service: ArticuloService,
    pub stock_service: StockService,
    pub dotacion_service: DotacionService,
    pub empleado_service: EmpleadoService,
    pub movimiento_service: MovimientoService,
    pub auditoria_service: AuditoriaService,
}

impl AppState {
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL debe estar definida");
        let jwt_secret = env::var("JWT_SECRET").expect("JWT_SECRET debe estar definido");
        let jwt_dias = env::var("JWT_EXPIRES_IN")
            .ok()
            .and_then(|valor| valor.parse().ok())
            .unwrap_or(DIAS_JWT_POR_DEFECTO);
        let puerto = env::var("PORT")
            .ok()
            .and_then(|valor| valor.parse().ok())
            .unwrap_or(PUERTO_POR_DEFECTO);
        let frontend_url = env::var("FRONTEND_URL").ok();

        // Fuera de producción las respuestas de error incluyen `details`.
        let desarrollo = env::var("APP_ENV")
            .map(|valor| valor != "production")
            .unwrap_or(true);
        fijar_modo_desarrollo(desarrollo);

        let db_pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&database_url)
            .await?;

        tracing::info!("✅ Conexión con la base de datos establecida");

        // --- Grafo de dependencias ---
        let usuario_repo = UsuarioRepository::new(db_pool.clone());
        let auth_repo = AuthRepository::new(db_pool.clone());
        let auditoria_repo = AuditoriaRepository::new(db_pool.clone());
        let catalogo_repo = CatalogoRepository::new(db_pool.clone());
        let articulo_repo = ArticuloRepository::new(db_pool.clone());
        let empleado_repo = EmpleadoRepository::new(db_pool.clone());
        let dotacion_repo = DotacionRepository::new(db_pool.clone());
        let movimiento_repo = MovimientoRepository::new(db_pool.clone());
        let rol_repo = RolRepository::new(db_pool.clone());

        let tokens = TokenService::new(jwt_secret, jwt_dias);
        let auditoria_service = AuditoriaService::new(auditoria_repo);

        let auth_service = AuthService::new(
            usuario_repo.clone(),
            auth_repo.clone(),
            tokens,
            auditoria_service.clone(),
            db_pool.clone(),
        );
        let usuario_service = UsuarioService::new(usuario_repo, auditoria_service.clone());
        let rol_service = RolService::new(rol_repo, auditoria_service.clone());
        let catalogo_service = CatalogoService::new(catalogo_repo, auditoria_service.clone());
        let articulo_service = ArticuloService::new(
            articulo_repo.clone(),
            auditoria_service.clone(),
            db_pool.clone(),
        );
        let stock_service =
            StockService::new(articulo_repo, auditoria_service.clone(), db_pool.clone());
        let dotacion_service =
            DotacionService::new(dotacion_repo.clone(), auditoria_service.clone());
        let empleado_service = EmpleadoService::new(empleado_repo, auditoria_service.clone());
        let movimiento_service = MovimientoService::new(
            movimiento_repo,
            dotacion_repo,
            auditoria_service.clone(),
            db_pool.clone(),
        );

        Ok(Self {
            db_pool,
            puerto,
            frontend_url,
            auth_repo,
            auth_service,
            usuario_service,
            rol_service,
            catalogo_service,
            articulo_service,
            stock_service,
            dotacion_service,
            empleado_service,
            movimiento_service,
            auditoria_service,
        })
    }
}
