use super::handlers;
use crate::service::GameManager;
use actix_cors::Cors;
use actix_web::App;
use actix_web::HttpServer;
use actix_web::middleware::Logger;
use actix_web::web;

pub struct Server;

impl Server {
    /// Serve the game API on `BIND_ADDR` (default `127.0.0.1:8080`).
    pub async fn run() -> anyhow::Result<()> {
        let manager = web::Data::new(GameManager::default());
        log::info!("starting game explorer server");
        HttpServer::new(move || {
            App::new()
                .wrap(Logger::new("%r %s %Ts"))
                .wrap(
                    Cors::default()
                        .allow_any_origin()
                        .allow_any_method()
                        .allow_any_header(),
                )
                .app_data(manager.clone())
                .route("/health", web::get().to(handlers::health))
                .service(
                    web::scope("/api")
                        .route("/games", web::post().to(handlers::create_game))
                        .route("/games/{id}", web::get().to(handlers::get_game))
                        .route("/games/{id}/analyze", web::get().to(handlers::analyze_game))
                        .route(
                            "/games/{id}/expected-payoffs",
                            web::post().to(handlers::expected_payoffs),
                        )
                        .route(
                            "/games/{id}/random-beliefs",
                            web::get().to(handlers::random_beliefs),
                        ),
                )
        })
        .bind(std::env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1:8080".to_string()))?
        .run()
        .await?;
        Ok(())
    }
}
