//src/main.rs

use axum::{
    http::{header, HeaderValue, Method},
    middleware as axum_middleware,
    routing::{delete, get, patch, post, put},
    Router,
};
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

// Declaración de los módulos
mod common;
mod config;
mod db;
mod docs;
mod handlers;
mod middleware;
mod models;
mod services;

use crate::config::AppState;
use crate::middleware::auth::auth_guard;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().with_target(false).compact().init();

    // Si la configuración falla, la aplicación no debe arrancar.
    let app_state = AppState::new()
        .await
        .expect("Fallo al inicializar el estado de la aplicación.");

    // Corre las migraciones de SQLx al arrancar.
    sqlx::migrate!()
        .run(&app_state.db_pool)
        .await
        .expect("Fallo al correr las migraciones de la base de datos.");

    tracing::info!("✅ Migraciones de la base de datos ejecutadas");

    // Purga horaria de la lista de tokens invalidados: una vez vencido el
    // token, su registro ya no aporta nada.
    let auth_repo = app_state.auth_repo.clone();
    tokio::spawn(async move {
        let mut intervalo = tokio::time::interval(Duration::from_secs(3600));
        loop {
            intervalo.tick().await;
            match auth_repo.purgar_tokens_expirados().await {
                Ok(purgados) if purgados > 0 => {
                    tracing::info!("🧹 {purgados} token(s) invalidado(s) purgado(s)");
                }
                Ok(_) => {}
                Err(e) => tracing::warn!("Fallo en la purga de tokens invalidados: {e}"),
            }
        }
    });

    // CORS hacia el panel administrativo.
    let cors = match &app_state.frontend_url {
        Some(origen) => CorsLayer::new()
            .allow_origin(origen.parse::<HeaderValue>().expect("FRONTEND_URL inválida"))
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::PATCH,
                Method::DELETE,
            ])
            .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE]),
        None => CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any),
    };

    // Rutas de autenticación. Login y register son públicas (register solo
    // durante el bootstrap); logout y validate exigen token.
    let auth_routes = Router::new()
        .route("/login", post(handlers::auth::login))
        .route("/register", post(handlers::auth::register))
        .route("/logout", post(handlers::auth::logout))
        .route("/validate", get(handlers::auth::validar));

    let articulo_routes = Router::new()
        .route(
            "/",
            get(handlers::articulos::listar).post(handlers::articulos::crear),
        )
        .route(
            "/{id}",
            get(handlers::articulos::detalle)
                .put(handlers::articulos::actualizar)
                .delete(handlers::articulos::eliminar),
        )
        .route("/{id}/tallas", get(handlers::articulos::tallas));

    let categoria_routes = Router::new()
        .route(
            "/",
            get(handlers::catalogo::listar_categorias).post(handlers::catalogo::crear_categoria),
        )
        .route(
            "/{id}",
            delete(handlers::catalogo::eliminar_categoria),
        );

    let subcategoria_routes = Router::new()
        .route(
            "/",
            get(handlers::catalogo::listar_subcategorias)
                .post(handlers::catalogo::crear_subcategoria),
        )
        .route(
            "/{id}",
            delete(handlers::catalogo::eliminar_subcategoria),
        );

    let stock_routes = Router::new()
        .route("/ingresar", post(handlers::stock::ingresar))
        .route("/retirar", post(handlers::stock::retirar));

    let dotacion_routes = Router::new()
        .route(
            "/",
            get(handlers::dotaciones::listar).post(handlers::dotaciones::crear),
        )
        .route(
            "/{id}",
            get(handlers::dotaciones::obtener)
                .put(handlers::dotaciones::actualizar)
                .patch(handlers::dotaciones::actualizar_parcial)
                .delete(handlers::dotaciones::eliminar),
        );

    let empleado_routes = Router::new()
        .route(
            "/",
            get(handlers::empleados::listar).post(handlers::empleados::crear),
        )
        .route(
            "/{id}",
            put(handlers::empleados::actualizar)
                .delete(handlers::empleados::eliminar),
        );

    let movimiento_routes = Router::new().route(
        "/",
        get(handlers::movimientos::listar).post(handlers::movimientos::registrar),
    );

    let user_routes = Router::new()
        .route("/", get(handlers::usuarios::listar))
        .route("/{id}", put(handlers::usuarios::actualizar))
        .route(
            "/{id}/estado",
            patch(handlers::usuarios::cambiar_estado),
        );

    let rol_routes = Router::new()
        .route(
            "/",
            get(handlers::roles::listar).post(handlers::roles::crear),
        )
        .route("/{id}", delete(handlers::roles::eliminar));

    let auditoria_routes = Router::new().route("/", get(handlers::auditoria::listar));

    // Todo /api pasa por el guard: la lista de rutas públicas vive dentro
    // del propio middleware.
    let api = Router::new()
        .route("/health", get(|| async { "OK" }))
        .nest("/auth", auth_routes)
        .nest("/articulos", articulo_routes)
        .nest("/categorias", categoria_routes)
        .nest("/subcategorias", subcategoria_routes)
        .nest("/stock", stock_routes)
        .nest("/dotaciones", dotacion_routes)
        .nest("/empleados", empleado_routes)
        .nest("/movimientos", movimiento_routes)
        .nest("/users", user_routes)
        .nest("/roles", rol_routes)
        .nest("/auditoria", auditoria_routes)
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let puerto = app_state.puerto;

    let app = Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", docs::ApiDoc::openapi()))
        .nest("/api", api)
        .with_state(app_state)
        .layer(cors);

    let addr = format!("0.0.0.0:{puerto}");
    let listener = TcpListener::bind(&addr)
        .await
        .expect("Fallo al iniciar el listener TCP");
    tracing::info!("🚀 Servidor escuchando en {}", listener.local_addr().unwrap());
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .expect("Error en el servidor Axum");
}
