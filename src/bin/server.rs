use fipskeyscreen::api;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // Initialize tracing/logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fipskeyscreen=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting FIPS key screening server");

    // Set up database connection pool (optional - will work without database)
    let database_url = std::env::var("DATABASE_URL").ok();

    let pool = if let Some(url) = database_url {
        info!("Connecting to database...");
        match PgPoolOptions::new().max_connections(5).connect(&url).await {
            Ok(pool) => {
                info!("Database connection established");
                match sqlx::migrate!("./migrations").run(&pool).await {
                    Ok(_) => info!("Database migrations completed"),
                    Err(e) => warn!("Failed to run migrations: {}", e),
                }
                Some(pool)
            }
            Err(e) => {
                warn!("Failed to connect to database: {}", e);
                warn!("Continuing without database logging");
                None
            }
        }
    } else {
        info!("DATABASE_URL not set, database logging disabled");
        None
    };

    // Allow configuring host via environment variable for Docker compatibility
    let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = std::env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let addr = format!("{}:{}", host, port);

    let app = api::router(pool);

    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("Failed to bind {}: {}", addr, e);
            std::process::exit(1);
        }
    };
    info!("Server listening on http://{}", addr);

    if let Err(e) = axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    {
        error!("Server error: {}", e);
        std::process::exit(1);
    }
}
