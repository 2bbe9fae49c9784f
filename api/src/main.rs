use std::sync::Arc;

use actix_web::{middleware::Logger, web, App, HttpServer};
use dotenvy::dotenv;
use log::info;

use otp_api::{middleware, routes};
use otp_core::services::verification::{VerificationConfig, VerificationService};
use otp_infra::notifier::TwilioNotifier;
use otp_infra::store::RedisRecordStore;
use otp_shared::config::{CacheConfig, ServerConfig};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    info!("Starting OTP Relay API server");

    let server_config = ServerConfig::from_env();

    let store = RedisRecordStore::new(CacheConfig::from_env())
        .await
        .map_err(into_io_error)?;
    let notifier = TwilioNotifier::from_env().map_err(into_io_error)?;

    let service = Arc::new(VerificationService::new(
        Arc::new(notifier),
        Arc::new(store),
        VerificationConfig::default(),
    ));
    let state = web::Data::new(routes::verification::AppState { service });

    let bind_address = server_config.bind_address();
    info!("Server will bind to: {}", bind_address);

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(middleware::cors::create_cors())
            .app_data(state.clone())
            .route("/health", web::get().to(routes::health_check))
            .service(routes::verification::scope::<TwilioNotifier, RedisRecordStore>())
            .default_service(web::route().to(routes::not_found))
    })
    .bind(&bind_address)?
    .run()
    .await
}

fn into_io_error(error: otp_infra::InfrastructureError) -> std::io::Error {
    std::io::Error::new(std::io::ErrorKind::Other, error.to_string())
}
