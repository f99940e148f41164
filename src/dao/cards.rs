//! Typed Card operations
//!
//! The DAO assumes `(indicePk, indiceSk)` is unique but does not enforce it.
//! When several documents share a key pair, key lookups return whichever the
//! store yields first.

use std::sync::Arc;

use super::collection::CardCollection;
use super::errors::{DaoError, DaoResult};
use super::filter::CardFilter;
use crate::model::Card;

/// Data access object for the Card collection
#[derive(Clone)]
pub struct CardsDao {
    collection: Arc<dyn CardCollection>,
}

impl CardsDao {
    /// Create a DAO over an already-connected collection
    pub fn new(collection: Arc<dyn CardCollection>) -> Self {
        Self { collection }
    }

    /// Every card, in store order
    pub async fn find_all(&self) -> DaoResult<Vec<Card>> {
        self.collection.find(&CardFilter::all()).await
    }

    /// First card with `indicePk == pk` and `indiceSk == sk`
    pub async fn find_by_key(&self, pk: &str, sk: &str) -> DaoResult<Card> {
        self.collection
            .find_one(&CardFilter::by_key(pk, sk))
            .await?
            .ok_or(DaoError::NotFound)
    }

    /// Primary-key lookup
    pub async fn find_by_id(&self, id: &str) -> DaoResult<Card> {
        self.collection
            .find_one(&CardFilter::by_id(id))
            .await?
            .ok_or(DaoError::NotFound)
    }

    /// Persist `card` as given. The caller assigns the id.
    pub async fn insert(&self, card: &Card) -> DaoResult<()> {
        self.collection.insert_one(card).await
    }

    /// Replace the stored card whose id equals `card.id` with `card`
    pub async fn update(&self, card: &Card) -> DaoResult<()> {
        let matched = self
            .collection
            .replace_one(&CardFilter::by_id(card.id.as_str()), card)
            .await?;
        if matched == 0 {
            return Err(DaoError::NotFound);
        }
        Ok(())
    }

    /// Remove the stored card equal to `card` in every field.
    ///
    /// This is a match-by-value delete: a card whose id exists but whose
    /// other fields differ from the stored document is not removed, and
    /// `NotFound` is returned.
    pub async fn delete(&self, card: &Card) -> DaoResult<()> {
        let removed = self.collection.delete_one(&CardFilter::exact(card)).await?;
        if removed == 0 {
            return Err(DaoError::NotFound);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dao::MemoryCollection;

    fn dao() -> CardsDao {
        CardsDao::new(Arc::new(MemoryCollection::new()))
    }

    #[tokio::test]
    async fn test_insert_then_find_by_key() {
        let dao = dao();
        let card = Card::new("card_id", "10", "100").with_fresh_id();
        dao.insert(&card).await.unwrap();

        let found = dao.find_by_key("card_id", "10").await.unwrap();
        assert_eq!(found.indice_sk, "10");
        assert_eq!(found.description, "100");
        assert!(!found.id.is_empty());
    }

    #[tokio::test]
    async fn test_find_by_key_miss_is_not_found() {
        let dao = dao();
        dao.insert(&Card::new("card_id", "10", "100").with_fresh_id())
            .await
            .unwrap();

        let err = dao.find_by_key("external_code", "10").await.unwrap_err();
        assert_eq!(err, DaoError::NotFound);
    }

    #[tokio::test]
    async fn test_update_replaces_whole_document() {
        let dao = dao();
        let card = Card::new("card_id", "10", "100").with_fresh_id();
        dao.insert(&card).await.unwrap();

        let changed = Card {
            indice_pk: "external_code".to_string(),
            indice_sk: "1xxx".to_string(),
            description: "99".to_string(),
            ..card.clone()
        };
        dao.update(&changed).await.unwrap();

        assert_eq!(dao.find_by_id(&card.id).await.unwrap(), changed);
    }

    #[tokio::test]
    async fn test_update_unknown_id_is_not_found() {
        let dao = dao();
        let card = Card::new("card_id", "10", "100").with_fresh_id();
        assert_eq!(dao.update(&card).await.unwrap_err(), DaoError::NotFound);
        assert!(dao.find_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_requires_full_match() {
        let dao = dao();
        let card = Card::new("card_id", "10", "100").with_fresh_id();
        dao.insert(&card).await.unwrap();

        let stale = Card {
            description: "old".to_string(),
            ..card.clone()
        };
        assert_eq!(dao.delete(&stale).await.unwrap_err(), DaoError::NotFound);
        assert!(dao.find_by_id(&card.id).await.is_ok());

        dao.delete(&card).await.unwrap();
        assert_eq!(
            dao.find_by_id(&card.id).await.unwrap_err(),
            DaoError::NotFound
        );
    }

    #[tokio::test]
    async fn test_find_all_returns_every_insert() {
        let dao = dao();
        let mut ids = Vec::new();
        for i in 0..5 {
            let card = Card::new("card_id", i.to_string(), "x").with_fresh_id();
            ids.push(card.id.clone());
            dao.insert(&card).await.unwrap();
        }

        let mut found: Vec<String> = dao
            .find_all()
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.id)
            .collect();
        found.sort();
        ids.sort();
        assert_eq!(found, ids);
    }
}
