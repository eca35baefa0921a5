//! Standalone server for the numeric service endpoints.
//!
//! Usage:
//!   PORT=8080 cargo run --bin numeric_service

use actix_web::{App, HttpServer, middleware::Logger};
use dotenv::dotenv;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::init();

    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(8080);

    log::info!("[SERVICE] numeric service listening on port {}", port);

    HttpServer::new(|| {
        App::new()
            .wrap(Logger::default())
            .configure(paperbot_backend::service::config)
    })
    .bind(("0.0.0.0", port))?
    .run()
    .await
}
