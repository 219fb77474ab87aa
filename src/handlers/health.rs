use actix_web::{get, web, HttpResponse};
use serde::Serialize;

use crate::{
    error::Result,
    store::{AccountRegistry, BookStore},
};

#[derive(Debug, Serialize)]
pub struct HealthCheckResponse {
    pub status: String,
    pub registered_accounts: usize,
    pub stored_books: usize,
}

#[get("/health")]
pub async fn health_check(
    accounts: web::Data<AccountRegistry>,
    books: web::Data<BookStore>,
) -> Result<HttpResponse> {
    let response = HealthCheckResponse {
        status: "healthy".to_string(),
        registered_accounts: accounts.count(),
        stored_books: books.count(),
    };

    Ok(HttpResponse::Ok().json(response))
}
