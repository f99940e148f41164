//! Card DAO Tests
//!
//! Lifecycle properties of the data access layer:
//! - insert, update and delete are visible to later reads
//! - key lookups never fabricate a record
//! - the shared DAO is safe under concurrent requests

use std::collections::HashSet;
use std::sync::Arc;

use cardsvc::dao::{CardsDao, DaoError, MemoryCollection};
use cardsvc::model::{Card, KeyNamespace};

fn dao() -> CardsDao {
    CardsDao::new(Arc::new(MemoryCollection::new()))
}

async fn insert(dao: &CardsDao, pk: &str, sk: &str, description: &str) -> Card {
    let card = Card::new(pk, sk, description).with_fresh_id();
    dao.insert(&card).await.unwrap();
    card
}

// =============================================================================
// Lifecycle
// =============================================================================

#[tokio::test]
async fn test_insert_lookup_by_key() {
    let dao = dao();
    insert(&dao, "card_id", "10", "100").await;

    let found = dao
        .find_by_key(KeyNamespace::CardId.as_str(), "10")
        .await
        .unwrap();
    assert_eq!(found.indice_sk, "10");
    assert_eq!(found.description, "100");
    assert!(!found.id.is_empty());
}

/// Update then read by id returns the update exactly.
#[tokio::test]
async fn test_update_then_find_by_id() {
    let dao = dao();
    let cards = vec![
        insert(&dao, "card_id", "1", "a").await,
        insert(&dao, "external_code", "1xxx", "b").await,
    ];

    for card in cards {
        let updated = Card {
            indice_sk: format!("{}-v2", card.indice_sk),
            description: String::new(),
            ..card
        };
        dao.update(&updated).await.unwrap();
        assert_eq!(dao.find_by_id(&updated.id).await.unwrap(), updated);
    }
}

/// Delete then read by id is not found.
#[tokio::test]
async fn test_delete_then_find_by_id() {
    let dao = dao();
    let keep = insert(&dao, "card_id", "1", "a").await;
    let gone = insert(&dao, "card_id", "2", "b").await;

    dao.delete(&gone).await.unwrap();

    assert_eq!(dao.find_by_id(&gone.id).await.unwrap_err(), DaoError::NotFound);
    assert_eq!(dao.find_by_id(&keep.id).await.unwrap(), keep);
}

/// Deleting twice reports not found the second time.
#[tokio::test]
async fn test_delete_is_not_repeatable() {
    let dao = dao();
    let card = insert(&dao, "card_id", "1", "a").await;

    dao.delete(&card).await.unwrap();
    assert_eq!(dao.delete(&card).await.unwrap_err(), DaoError::NotFound);
}

// =============================================================================
// Key Lookups
// =============================================================================

#[tokio::test]
async fn test_unknown_key_pair_not_found() {
    let dao = dao();
    insert(&dao, "card_id", "10", "100").await;

    for (pk, sk) in [("card_id", "11"), ("external_code", "10"), ("", "")] {
        assert_eq!(
            dao.find_by_key(pk, sk).await.unwrap_err(),
            DaoError::NotFound
        );
    }
}

/// Duplicate key pairs are stored; the lookup returns one of them.
#[tokio::test]
async fn test_duplicate_key_pair_returns_one() {
    let dao = dao();
    let first = insert(&dao, "card_id", "10", "first").await;
    let second = insert(&dao, "card_id", "10", "second").await;

    let found = dao.find_by_key("card_id", "10").await.unwrap();
    assert!(found == first || found == second);
    assert_eq!(dao.find_all().await.unwrap().len(), 2);
}

// =============================================================================
// Concurrency
// =============================================================================

/// Concurrent inserts through one shared DAO are all kept.
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_inserts() {
    let dao = dao();

    let handles: Vec<_> = (0..50)
        .map(|i| {
            let dao = dao.clone();
            tokio::spawn(async move {
                let card = Card::new("card_id", i.to_string(), "x").with_fresh_id();
                dao.insert(&card).await.unwrap();
                card.id
            })
        })
        .collect();

    let mut expected = HashSet::new();
    for handle in handles {
        expected.insert(handle.await.unwrap());
    }

    let found: HashSet<String> = dao
        .find_all()
        .await
        .unwrap()
        .into_iter()
        .map(|c| c.id)
        .collect();
    assert_eq!(found.len(), 50);
    assert_eq!(found, expected);
}
