use dotenvy::dotenv;
use order_api::{build_server, create_pool, run_migrations, ResponseHooks, Settings};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let settings = Settings::from_env();
    let pool = create_pool(&settings.database_url);
    run_migrations(&pool);

    log::info!(
        "Starting server at http://{}:{}",
        settings.host,
        settings.port
    );

    build_server(pool, &settings, ResponseHooks::new())?.await
}
