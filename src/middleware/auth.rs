use actix_web::{
    body::MessageBody,
    dev::{ServiceRequest, ServiceResponse},
    middleware::Next,
    HttpMessage,
};

use crate::auth_token::{now_ms, TokenService};
use crate::error::ApiError;

/// The authorization gate. Re-verifies the bearer token on every request;
/// missing, malformed and expired tokens are all rejected with the same
/// not-authenticated outcome.
pub async fn auth_middleware(
    req: ServiceRequest,
    next: Next<impl MessageBody>,
) -> Result<ServiceResponse<impl MessageBody>, actix_web::Error> {
    // Extract the token from "Authorization: Bearer <token>"
    let token = req
        .headers()
        .get("Authorization")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(|token| token.to_string())
        .ok_or(ApiError::InvalidToken)?;

    // Get TokenService from app data
    let token_service = req
        .app_data::<actix_web::web::Data<TokenService>>()
        .ok_or_else(|| ApiError::Internal("Token service not available".to_string()))?;

    let claims = token_service.verify(&token, now_ms()).map_err(|err| {
        log::debug!("Rejected token: {}", err);
        ApiError::InvalidToken
    })?;

    // Store the authenticated email in request extensions for handlers
    req.extensions_mut().insert(claims.subject);

    next.call(req).await
}
