//! Guarded demo routes: `/` for regular members, `/admin` for admins.

use actix_web::{web, HttpResponse};

use crate::auth::claims::Identity;
use crate::middleware::{RequirePermission, SessionGuard};

pub const PERM_MEMBER: i64 = 1;
pub const PERM_ADMIN: i64 = 2;

async fn index(_identity: Identity) -> HttpResponse {
    HttpResponse::Ok().body("Hello, authenticated user!")
}

async fn admin(_identity: Identity) -> HttpResponse {
    HttpResponse::Ok().body("Hello, admin user!")
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    // wrap() nests outside-in from the last call: the session guard runs
    // first, then the permission gate.
    cfg.service(
        web::resource("/")
            .wrap(RequirePermission::any_of([PERM_MEMBER]))
            .wrap(SessionGuard)
            .route(web::get().to(index)),
    );
    cfg.service(
        web::resource("/admin")
            .wrap(RequirePermission::any_of([PERM_ADMIN]))
            .wrap(SessionGuard)
            .route(web::get().to(admin)),
    );
}
