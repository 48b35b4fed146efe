pub mod auth;
pub mod config;
pub mod core;
pub mod filters;
pub mod hosts;
pub mod models;
pub mod notify;
pub mod properties;
pub mod static_server;
pub mod submissions;
pub mod templates;

use actix_web::web;

/// The full route table, shared by the server binary and the integration
/// tests. Callers provide `Store` and `dyn Notifier` app data.
pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/hosts", web::post().to(hosts::create_host))
        .route("/hosts/{id}", web::get().to(hosts::get_host_details))
        .route("/login", web::post().to(auth::login))
        .route("/logout", web::post().to(auth::logout))
        .route("/profile", web::get().to(hosts::get_profile))
        .route("/profile", web::put().to(hosts::update_profile))
        .route("/submissions", web::post().to(submissions::create_submission))
        .route("/submissions", web::get().to(submissions::list_own))
        .route("/submissions/pending", web::get().to(submissions::list_pending))
        .route("/submissions/{id}/review", web::post().to(submissions::review))
        .route("/properties", web::get().to(properties::search))
        .route("/properties/{id}", web::get().to(properties::get_property))
        .route("/filters/options", web::get().to(properties::filter_options))
        .route("/stay/{id}", web::get().to(templates::render_stay_page))
        .default_service(web::to(static_server::serve));
}
