pub mod auth;
pub mod books;
pub mod health;

pub use auth::{login, signup};
pub use books::{create_book, delete_book, update_book};
pub use health::health_check;
