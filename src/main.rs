use actix_web::http::StatusCode;
use actix_web::middleware::{ErrorHandlers, Logger};
use actix_web::{App, HttpServer, web};
use dotenv::dotenv;
use env_logger::Env;
use log::{info, warn};
use std::io;
use std::sync::Arc;

mod comment;
mod config;
mod database;
mod forms;
mod middleware;
mod post;
mod router;
mod search;
#[cfg(test)]
mod testing;
mod utils;

use config::Settings;
use database::{BlogStore, MongoStore};
use middleware::error_handler::handle_error;
use middleware::not_found::not_found;
use router::index::routes;
use utils::email::{LogMailer, Mailer, SmtpMailer};

#[actix_web::main]
async fn main() -> io::Result<()> {
    // Load environment variables from .env file
    dotenv().ok();

    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let settings = Settings::from_env().map_err(io::Error::other)?;

    let mongo_client = database::connect_to_mongo(&settings.mongodb_uri)
        .await
        .map_err(io::Error::other)?;
    let store = MongoStore::new(&mongo_client, &settings.mongodb_database);
    store.ensure_indexes().await.map_err(io::Error::other)?;
    let store: Arc<dyn BlogStore> = Arc::new(store);

    let mailer: Arc<dyn Mailer> = match settings.email {
        Some(config) => Arc::new(SmtpMailer::new(config).map_err(io::Error::other)?),
        None => {
            warn!("SMTP_USERNAME not set, shared posts will be written to the log");
            Arc::new(LogMailer)
        }
    };

    let store = web::Data::from(store);
    let mailer = web::Data::from(mailer);

    info!(
        "Starting server on http://{}:{}",
        settings.host, settings.port
    );

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(store.clone())
            .app_data(mailer.clone())
            .configure(routes)
            .wrap(
                ErrorHandlers::new()
                    .handler(StatusCode::NOT_FOUND, not_found)
                    .default_handler(handle_error),
            )
    })
    .bind((settings.host.as_str(), settings.port))?
    .run()
    .await?;

    info!("Server has stopped");

    Ok(())
}
