use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::error::{ApiError, Result};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Book {
    pub id: String,
    pub title: String,
}

#[derive(Clone)]
pub struct BookStore {
    // id -> title
    books: Arc<DashMap<String, String>>,
}

impl BookStore {
    pub fn new() -> Self {
        Self {
            books: Arc::new(DashMap::new()),
        }
    }

    /// Stores a new book under a fresh v4 UUID and returns the full record.
    pub fn create(&self, title: String) -> Book {
        let id = Uuid::new_v4().to_string();
        self.books.insert(id.clone(), title.clone());

        log::info!("Created book {}", id);

        Book { id, title }
    }

    /// Replaces the title in place. The id is immutable.
    pub fn update(&self, id: &str, title: String) -> Result<Book> {
        let mut entry = self.books.get_mut(id).ok_or(ApiError::BookNotFound)?;
        *entry.value_mut() = title.clone();

        log::info!("Updated book {}", id);

        Ok(Book {
            id: id.to_string(),
            title,
        })
    }

    pub fn delete(&self, id: &str) -> Result<()> {
        self.books
            .remove(id)
            .map(|_| log::info!("Deleted book {}", id))
            .ok_or(ApiError::BookNotFound)
    }

    pub fn count(&self) -> usize {
        self.books.len()
    }

    #[cfg(test)]
    pub fn get(&self, id: &str) -> Option<Book> {
        self.books.get(id).map(|entry| Book {
            id: id.to_string(),
            title: entry.value().clone(),
        })
    }
}

impl Default for BookStore {
    fn default() -> Self {
        Self::new()
    }
}
