pub mod application;
pub mod config;
pub mod db;
pub mod domain;
pub mod errors;
pub mod handlers;
pub mod infrastructure;
pub mod openapi;
pub mod projection;
pub mod schema;

use actix_web::{middleware::Logger, web, App, HttpServer};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use handlers::orders::{self as order_handlers, AppOrderService};
use infrastructure::order_repo::DieselOrderRepository;
use infrastructure::policy::KeyAccessPolicy;

pub use config::Settings;
pub use db::{create_pool, DbPool};
pub use projection::ResponseHooks;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Run any pending Diesel migrations against the pool's database.
pub fn run_migrations(pool: &DbPool) {
    let mut conn = pool.get().expect("Failed to get DB connection for migrations");
    conn.run_pending_migrations(MIGRATIONS)
        .expect("Failed to run database migrations");
}

/// Build and return an actix-web `Server` bound to the configured host/port.
///
/// The caller is responsible for `.await`-ing (or `tokio::spawn`-ing) the
/// returned server. `hooks` lets embedding code post-process order and note
/// views; pass `ResponseHooks::new()` for the stock behavior.
pub fn build_server(
    pool: DbPool,
    settings: &Settings,
    hooks: ResponseHooks,
) -> std::io::Result<actix_web::dev::Server> {
    let service = web::Data::new(AppOrderService::from_settings(
        DieselOrderRepository::new(pool),
        KeyAccessPolicy::new(settings.api_keys.clone()),
        settings,
        hooks,
    ));
    let host = settings.host.clone();
    let port = settings.port;

    Ok(HttpServer::new(move || {
        App::new()
            .app_data(service.clone())
            .wrap(Logger::default())
            .service(
                web::scope("/orders")
                    .route("", web::get().to(order_handlers::list_orders))
                    .route("/count", web::get().to(order_handlers::count_orders))
                    .route("/ping", web::get().to(order_handlers::ping))
                    // The `\d+` constraint keeps non-numeric ids from ever
                    // reaching these handlers.
                    // DELETE /orders/{id} stays unregistered until deletion
                    // ships alongside order creation.
                    .service(
                        web::resource("/{id:\\d+}")
                            .route(web::get().to(order_handlers::get_order))
                            .route(web::put().to(order_handlers::edit_order)),
                    )
                    .route(
                        "/{id:\\d+}/notes",
                        web::get().to(order_handlers::get_order_notes),
                    ),
            )
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", openapi::ApiDoc::openapi()),
            )
    })
    .bind((host, port))?
    .run())
}
