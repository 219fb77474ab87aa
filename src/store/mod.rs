pub mod accounts;
pub mod books;

pub use accounts::{AccountRegistry, CredentialVerifier, PlaintextCredentials};
pub use books::{Book, BookStore};
