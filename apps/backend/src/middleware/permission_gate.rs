//! Route-level permission gate.
//!
//! Wraps a route with a required permission set and compares it against
//! the authenticated identity stored by the session guard. A valid
//! identity lacking every required permission gets 403, distinct from the
//! guard's 401s. Gate failures never touch cookies.

use std::rc::Rc;

use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::{Error, HttpMessage};
use futures_util::future::{ready, LocalBoxFuture, Ready};

use crate::auth::claims::Identity;
use crate::auth::permissions;
use crate::error::AppError;

pub struct RequirePermission {
    required: Rc<Vec<i64>>,
}

impl RequirePermission {
    /// Allow callers holding at least one of `required`.
    pub fn any_of(required: impl Into<Vec<i64>>) -> Self {
        Self {
            required: Rc::new(required.into()),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for RequirePermission
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = RequirePermissionMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequirePermissionMiddleware {
            service,
            required: Rc::clone(&self.required),
        }))
    }
}

pub struct RequirePermissionMiddleware<S> {
    service: S,
    required: Rc<Vec<i64>>,
}

impl<S, B> Service<ServiceRequest> for RequirePermissionMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let identity = req.extensions().get::<Identity>().cloned();

        match identity {
            // Gate reached without the session guard having run.
            None => Box::pin(async { Err(AppError::unauthenticated().into()) }),
            Some(identity) if permissions::is_allowed(&identity.per, &self.required) => {
                Box::pin(self.service.call(req))
            }
            Some(_) => Box::pin(async { Err(AppError::forbidden().into()) }),
        }
    }
}
