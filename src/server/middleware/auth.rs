//! Request gate middleware
//!
//! Extracts and validates the bearer token on every request outside the
//! public allow-list and attaches the authenticated principal to the request.
//! A missing, invalid or expired token falls through to anonymous; the gate
//! itself never rejects a request. Access control happens in the per-route
//! guards, which deny anonymous callers.

use crate::auth::jwt::JwtHandler;
use crate::server::middleware::helpers::{is_public_route, AuthenticatedPrincipal};
use crate::server::state::AppState;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header::HeaderMap;
use actix_web::{web, HttpMessage};
use futures::future::{ready, Ready};
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use tracing::{debug, warn};

/// Request gate middleware for Actix-web
pub struct RequestGate;

impl<S, B> Transform<S, ServiceRequest> for RequestGate
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = actix_web::Error;
    type InitError = ();
    type Transform = RequestGateService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequestGateService {
            service: Rc::new(service),
        }))
    }
}

/// Service implementation for the request gate
pub struct RequestGateService<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for RequestGateService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = actix_web::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let public = req
            .app_data::<web::Data<AppState>>()
            .map(|state| is_public_route(req.path(), &state.config.auth.public_routes))
            .unwrap_or(true);

        if public {
            return Box::pin(self.service.call(req));
        }

        let service = Rc::clone(&self.service);
        Box::pin(async move {
            let state = req.app_data::<web::Data<AppState>>().cloned();

            if let Some(state) = state {
                if let Some(principal) = resolve_principal(&state, req.headers()).await {
                    req.extensions_mut().insert(principal);
                }
            }

            service.call(req).await
        })
    }
}

/// Establish the caller's identity from the Authorization header.
///
/// Returns `None` whenever no authenticated principal can be established.
async fn resolve_principal(
    state: &web::Data<AppState>,
    headers: &HeaderMap,
) -> Option<AuthenticatedPrincipal> {
    let header = headers.get("authorization")?.to_str().ok()?;
    let token = JwtHandler::extract_token_from_header(header)?;

    let claims = match state.auth.jwt().authenticate(token) {
        Ok(claims) => claims,
        Err(e) => {
            debug!("Bearer token not accepted: {}", e);
            return None;
        }
    };

    match state.store.find_user_by_email(&claims.sub).await {
        Ok(Some(user)) => Some(AuthenticatedPrincipal::new(user)),
        Ok(None) => {
            debug!("Token subject has no matching user");
            None
        }
        Err(e) => {
            warn!("User lookup failed while authenticating request: {}", e);
            None
        }
    }
}
