//! In-memory collection
//!
//! Documents are kept in insertion order so "first match" is stable.

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;

use super::collection::CardCollection;
use super::errors::{DaoError, DaoResult};
use super::filter::CardFilter;
use crate::model::Card;

/// Process-local Card collection
#[derive(Debug, Default)]
pub struct MemoryCollection {
    documents: RwLock<Vec<Card>>,
}

impl MemoryCollection {
    /// Create an empty collection
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a collection pre-populated with `cards`
    pub fn with_documents(cards: Vec<Card>) -> Self {
        Self {
            documents: RwLock::new(cards),
        }
    }

    /// Number of stored documents
    pub fn len(&self) -> usize {
        self.read().map(|docs| docs.len()).unwrap_or(0)
    }

    /// True when no documents are stored
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn read(&self) -> DaoResult<RwLockReadGuard<'_, Vec<Card>>> {
        self.documents
            .read()
            .map_err(|_| DaoError::store("collection lock poisoned"))
    }

    fn write(&self) -> DaoResult<RwLockWriteGuard<'_, Vec<Card>>> {
        self.documents
            .write()
            .map_err(|_| DaoError::store("collection lock poisoned"))
    }
}

#[async_trait]
impl CardCollection for MemoryCollection {
    async fn find(&self, filter: &CardFilter) -> DaoResult<Vec<Card>> {
        let docs = self.read()?;
        Ok(docs.iter().filter(|c| filter.matches(c)).cloned().collect())
    }

    async fn find_one(&self, filter: &CardFilter) -> DaoResult<Option<Card>> {
        let docs = self.read()?;
        Ok(docs.iter().find(|c| filter.matches(c)).cloned())
    }

    async fn insert_one(&self, card: &Card) -> DaoResult<()> {
        let mut docs = self.write()?;
        if docs.iter().any(|c| c.id == card.id) {
            return Err(DaoError::store(format!(
                "duplicate key error: _id \"{}\" already exists",
                card.id
            )));
        }
        docs.push(card.clone());
        Ok(())
    }

    async fn replace_one(&self, filter: &CardFilter, card: &Card) -> DaoResult<u64> {
        let mut docs = self.write()?;
        match docs.iter_mut().find(|c| filter.matches(c)) {
            Some(slot) => {
                *slot = card.clone();
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete_one(&self, filter: &CardFilter) -> DaoResult<u64> {
        let mut docs = self.write()?;
        match docs.iter().position(|c| filter.matches(c)) {
            Some(index) => {
                docs.remove(index);
                Ok(1)
            }
            None => Ok(0),
        }
    }
}
