use crate::{consts, AppState};
use actix_web::{
    body::MessageBody,
    dev::{ServiceRequest, ServiceResponse},
    middleware::Next,
    web, HttpMessage, HttpRequest, HttpResponse,
};
use application::context::AppContext;
use domain::profile::Profile;
use log::{error, warn};

fn email_from_header(req: &ServiceRequest) -> Option<String> {
    req.headers()
        .get(consts::PROFILE_EMAIL_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Resolves the optional `X-Profile-Email` header into a live profile stored in the request
/// extensions. Requests without the header pass through anonymously; an unknown or deleted
/// profile is rejected with 401.
pub async fn resolve_profile(
    req: ServiceRequest,
    next: Next<impl MessageBody + 'static>,
) -> Result<ServiceResponse<impl MessageBody>, actix_web::Error> {
    let Some(email) = email_from_header(&req) else {
        return next.call(req).await.map(ServiceResponse::map_into_left_body);
    };

    let state = req
        .app_data::<web::Data<AppState>>()
        .ok_or_else(|| actix_web::error::ErrorInternalServerError("Missing AppState"))?;

    let lookup = state.profiles.find_live_by_email(&email).await;
    match lookup {
        Ok(Some(profile)) => {
            req.extensions_mut().insert(profile);
            next.call(req).await.map(ServiceResponse::map_into_left_body)
        }
        Ok(None) => {
            warn!("Unknown profile: {}", email);
            Ok(req
                .into_response(HttpResponse::Unauthorized().body("Unknown profile"))
                .map_into_right_body())
        }
        Err(e) => {
            error!("Profile lookup failed for {}: {}", email, e);
            Ok(req
                .into_response(HttpResponse::InternalServerError().body(e.to_string()))
                .map_into_right_body())
        }
    }
}

/// Per-request context carrying the resolved actor, if any.
pub fn app_context(req: &HttpRequest) -> AppContext {
    let ctx = AppContext::new();
    match req.extensions().get::<Profile>() {
        Some(profile) => ctx.with_actor(profile),
        None => ctx,
    }
}
