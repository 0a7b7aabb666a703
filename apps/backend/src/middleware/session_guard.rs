//! Session guard middleware.
//!
//! Runs the session state machine against the auth cookies of every
//! request it wraps. On success it stores the `Identity` in request
//! extensions and, when the access token was renewed, sets the new access
//! cookie on the response. Rejections are answered directly so the
//! relevant branches can clear both cookies; storage failures become 500s,
//! never 401s.

use std::rc::Rc;

use actix_web::body::EitherBody;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::error::ResponseError;
use actix_web::{web, Error, HttpMessage};
use futures_util::future::{ready, LocalBoxFuture, Ready};
use tracing::error;

use crate::auth::cookies;
use crate::auth::session::{self, GuardError, SessionOutcome};
use crate::error::AppError;
use crate::state::app_state::AppState;

pub struct SessionGuard;

impl<S, B> Transform<S, ServiceRequest> for SessionGuard
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = SessionGuardMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(SessionGuardMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct SessionGuardMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for SessionGuardMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);

        Box::pin(async move {
            let state = match req.app_data::<web::Data<AppState>>().cloned() {
                Some(state) => state,
                None => {
                    let res =
                        AppError::internal("AppState not available".to_string()).error_response();
                    return Ok(req.into_response(res).map_into_right_body());
                }
            };

            let access = req
                .cookie(&state.security.access_cookie.name)
                .map(|c| c.value().to_string());
            let refresh = req
                .cookie(&state.security.refresh_cookie.name)
                .map(|c| c.value().to_string());

            let outcome = session::authenticate(
                state.directory.as_ref(),
                &state.security,
                access.as_deref(),
                refresh.as_deref(),
            )
            .await;

            match outcome {
                Ok(SessionOutcome {
                    identity,
                    renewed_access,
                }) => {
                    req.extensions_mut().insert(identity);

                    // The renewed cookie must reach the client even when the
                    // inner service rejects the request (a 403 from the
                    // permission gate, say), so inner errors are rendered
                    // here instead of propagating past the renewal.
                    let http_req = req.request().clone();
                    let mut res = match service.call(req).await {
                        Ok(res) => res.map_into_left_body(),
                        Err(err) => {
                            let res = err.error_response();
                            ServiceResponse::new(http_req, res).map_into_right_body()
                        }
                    };

                    if let Some(token) = renewed_access {
                        let cookie = cookies::access_cookie(&state.security, token);
                        if let Err(err) = res.response_mut().add_cookie(&cookie) {
                            error!(error = %err, "failed to attach renewed access cookie");
                        }
                    }

                    Ok(res)
                }
                Err(GuardError::Unauthenticated { clear_cookies }) => {
                    let mut res = AppError::unauthenticated().error_response();
                    if clear_cookies {
                        for cookie in cookies::removal_cookies(&state.security) {
                            if let Err(err) = res.add_cookie(&cookie) {
                                error!(error = %err, "failed to attach removal cookie");
                            }
                        }
                    }
                    Ok(req.into_response(res).map_into_right_body())
                }
                Err(err) => {
                    error!(error = %err, "session guard failed");
                    let res = AppError::internal("session guard failure".to_string())
                        .error_response();
                    Ok(req.into_response(res).map_into_right_body())
                }
            }
        })
    }
}
