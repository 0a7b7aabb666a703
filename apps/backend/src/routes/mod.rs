use actix_web::web;

pub mod auth;
pub mod private;

/// Register all application routes. Shared between `main.rs` and the
/// integration tests so both exercise the same guard and gate wiring.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.configure(auth::configure_routes);
    cfg.configure(private::configure_routes);
}
