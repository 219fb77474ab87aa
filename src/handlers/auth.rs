use actix_web::{post, web, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::{
    auth_token::{now_ms, TokenService},
    error::{ApiError, Result},
    store::AccountRegistry,
};

#[derive(Debug, Deserialize)]
pub struct CredentialsRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct SignupResponse {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
}

#[post("/signup")]
pub async fn signup(
    req: web::Json<CredentialsRequest>,
    accounts: web::Data<AccountRegistry>,
) -> Result<HttpResponse> {
    let req = req.into_inner();

    accounts.register(req.email, req.password)?;

    let response = SignupResponse {
        message: "User registered".to_string(),
    };

    Ok(HttpResponse::Created().json(response))
}

#[post("/login")]
pub async fn login(
    req: web::Json<CredentialsRequest>,
    accounts: web::Data<AccountRegistry>,
    tokens: web::Data<TokenService>,
) -> Result<HttpResponse> {
    log::info!("Login attempt for {}", req.email);

    if !accounts.verify(&req.email, &req.password) {
        log::warn!("Failed login attempt for {}", req.email);
        return Err(ApiError::InvalidCredentials);
    }

    let token = tokens
        .issue_for(&req.email, now_ms())
        .map_err(|err| ApiError::Internal(format!("Failed to issue token: {err}")))?;

    log::info!("Successful login for {}", req.email);

    let response = LoginResponse { token };

    Ok(HttpResponse::Ok().json(response))
}
