//! Store seam
//!
//! The primitive operations a document collection must offer. Implementations
//! must be safe to share across request tasks.

use async_trait::async_trait;

use super::errors::DaoResult;
use super::filter::CardFilter;
use crate::model::Card;

/// A collection of Card documents
#[async_trait]
pub trait CardCollection: Send + Sync {
    /// All documents matching `filter`, in store order
    async fn find(&self, filter: &CardFilter) -> DaoResult<Vec<Card>>;

    /// First document matching `filter`
    async fn find_one(&self, filter: &CardFilter) -> DaoResult<Option<Card>>;

    /// Persist a new document. Fails if the id is already taken.
    async fn insert_one(&self, card: &Card) -> DaoResult<()>;

    /// Replace the first document matching `filter` with `card`.
    ///
    /// Returns the number of documents matched (0 or 1).
    async fn replace_one(&self, filter: &CardFilter, card: &Card) -> DaoResult<u64>;

    /// Remove the first document matching `filter`.
    ///
    /// Returns the number of documents removed (0 or 1).
    async fn delete_one(&self, filter: &CardFilter) -> DaoResult<u64>;
}
