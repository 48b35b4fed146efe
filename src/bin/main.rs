use std::sync::Arc;

use actix_web::{web, App, HttpServer};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use stayfinder::core::db::{seed_demo_data, Store};
use stayfinder::notify::{LogNotifier, Notifier};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let store = web::Data::new(Store::new());
    if let Err(err) = seed_demo_data(&store) {
        warn!(%err, "failed to seed demo data");
    }

    let notifier: Arc<dyn Notifier> = Arc::new(LogNotifier);
    let notifier = web::Data::from(notifier);

    let addr = stayfinder::config::bind_address();
    info!(%addr, "stayfinder listening");

    HttpServer::new(move || {
        App::new()
            .app_data(store.clone())
            .app_data(notifier.clone())
            .configure(stayfinder::routes)
    })
    .bind(addr)?
    .run()
    .await
}
