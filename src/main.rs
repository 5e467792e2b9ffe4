use actix_web::{App, HttpServer};
use dotenv::dotenv;
use tracing::{info, warn};

use partner_invitations_backend::{directory, routes};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    tracing_subscriber::fmt::init();
    dotenv().ok();

    let partners_file =
        std::env::var("PARTNERS_FILE").unwrap_or_else(|_| "data/partners.json".to_string());
    match directory::load_from_file(&partners_file).await {
        Ok(count) => info!("loaded {} partner records from {}", count, partners_file),
        Err(e) => warn!("starting with an empty partner directory: {:?}", e),
    }

    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());
    HttpServer::new(|| App::new().configure(routes::init))
        .bind(bind_addr)?
        .run()
        .await
}
