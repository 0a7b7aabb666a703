use std::sync::Arc;

use actix_web::{web, App, HttpServer};
use wicket::directory::sea::SeaUserDirectory;
use wicket::hash::Argon2HashService;
use wicket::infra::db::connect_db;
use wicket::routes;
use wicket::state::app_state::AppState;
use wicket::state::security_config::SecurityConfig;

mod telemetry;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing();

    // Environment variables must be set by the runtime environment:
    // - Docker: Set via docker-compose env_file or docker run --env-file
    // - Local dev: Source env files manually (e.g., set -a; . ./.env; set +a)
    let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = std::env::var("PORT")
        .unwrap_or_else(|_| "3000".to_string())
        .parse::<u16>()
        .unwrap_or_else(|_| {
            eprintln!("❌ PORT must be a valid port number");
            std::process::exit(1);
        });

    let security = match SecurityConfig::from_env() {
        Ok(security) => security,
        Err(e) => {
            eprintln!("❌ {e}");
            std::process::exit(1);
        }
    };

    let db_url = match std::env::var("DATABASE_URL") {
        Ok(url) => url,
        Err(_) => {
            eprintln!("❌ DATABASE_URL must be set");
            std::process::exit(1);
        }
    };

    let db = match connect_db(&db_url).await {
        Ok(db) => db,
        Err(e) => {
            eprintln!("❌ {e}");
            std::process::exit(1);
        }
    };

    println!("✅ Database connected");

    let state = AppState::new(
        Arc::new(SeaUserDirectory::new(db)),
        Arc::new(Argon2HashService),
        security,
    );
    let data = web::Data::new(state);

    println!("🚀 Starting wicket on http://{}:{}", host, port);

    HttpServer::new(move || {
        App::new()
            .app_data(data.clone())
            .configure(routes::configure)
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
