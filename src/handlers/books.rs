use actix_web::{delete, post, put, web, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::{error::Result, store::BookStore};

#[derive(Debug, Deserialize)]
pub struct BookRequest {
    pub title: String,
}

#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub message: String,
}

// Mounted under the token-gated `/books` scope.
#[post("")]
pub async fn create_book(
    req: web::Json<BookRequest>,
    books: web::Data<BookStore>,
    email: web::ReqData<String>,
) -> Result<HttpResponse> {
    let book = books.create(req.into_inner().title);

    log::info!("Book {} created by {}", book.id, email.into_inner());

    Ok(HttpResponse::Ok().json(book))
}

#[put("/{id}")]
pub async fn update_book(
    path: web::Path<String>,
    req: web::Json<BookRequest>,
    books: web::Data<BookStore>,
    email: web::ReqData<String>,
) -> Result<HttpResponse> {
    let id = path.into_inner();
    let book = books.update(&id, req.into_inner().title)?;

    log::info!("Book {} updated by {}", book.id, email.into_inner());

    Ok(HttpResponse::Ok().json(book))
}

#[delete("/{id}")]
pub async fn delete_book(
    path: web::Path<String>,
    books: web::Data<BookStore>,
    email: web::ReqData<String>,
) -> Result<HttpResponse> {
    let id = path.into_inner();
    books.delete(&id)?;

    log::info!("Book {} deleted by {}", id, email.into_inner());

    let response = DeleteResponse {
        message: "Book deleted".to_string(),
    };

    Ok(HttpResponse::Ok().json(response))
}
