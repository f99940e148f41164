//! MongoDB collection
//!
//! Cards are stored with the id as `_id`; the remaining fields keep their
//! wire names. New cards get string ids. Documents written by earlier
//! deployments may carry an ObjectId `_id`; those surface as the 24-char hex
//! string and are matched back by either representation.

use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::bson::{self, doc, oid::ObjectId, Bson, Document};
use mongodb::options::ClientOptions;
use mongodb::{Client, Collection};
use serde::Deserialize;

use super::collection::CardCollection;
use super::errors::{DaoError, DaoResult};
use super::filter::CardFilter;
use crate::model::Card;

const URI_SCHEMES: [&str; 2] = ["mongodb://", "mongodb+srv://"];

/// Stored document shape. `_id` is either a string or an ObjectId.
#[derive(Debug, Deserialize)]
struct CardDocument {
    #[serde(rename = "_id")]
    id: Bson,
    #[serde(rename = "indicePk")]
    indice_pk: String,
    #[serde(rename = "indiceSk")]
    indice_sk: String,
    description: String,
}

impl TryFrom<CardDocument> for Card {
    type Error = DaoError;

    fn try_from(doc: CardDocument) -> DaoResult<Self> {
        let id = match doc.id {
            Bson::String(id) => id,
            Bson::ObjectId(oid) => oid.to_hex(),
            other => {
                return Err(DaoError::store(format!(
                    "unsupported _id type: {:?}",
                    other.element_type()
                )))
            }
        };

        Ok(Self {
            id,
            indice_pk: doc.indice_pk,
            indice_sk: doc.indice_sk,
            description: doc.description,
        })
    }
}

fn card_from_document(document: Document) -> DaoResult<Card> {
    let stored: CardDocument =
        bson::from_document(document).map_err(|e| DaoError::store(e.to_string()))?;
    Card::try_from(stored)
}

/// Full document for a new card, `_id` included
fn insert_document(card: &Card) -> Document {
    let mut document = doc! { "_id": card.id.as_str() };
    document.extend(body_document(card));
    document
}

/// Card fields without `_id`, so a replace keeps the stored id type
fn body_document(card: &Card) -> Document {
    doc! {
        "indicePk": card.indice_pk.as_str(),
        "indiceSk": card.indice_sk.as_str(),
        "description": card.description.as_str(),
    }
}

/// Match an id stored either as a string or, for hex ids, as an ObjectId
fn id_condition(id: &str) -> Bson {
    match ObjectId::parse_str(id) {
        Ok(oid) => Bson::Document(doc! { "$in": [Bson::ObjectId(oid), id] }),
        Err(_) => Bson::String(id.to_string()),
    }
}

/// Turn a configured server address into a connection string.
///
/// Bare `host[:port]` values get the `mongodb://` scheme.
pub fn normalize_address(server_address: &str) -> String {
    let trimmed = server_address.trim();
    if URI_SCHEMES.iter().any(|scheme| trimmed.starts_with(scheme)) {
        trimmed.to_string()
    } else {
        format!("mongodb://{}", trimmed)
    }
}

fn filter_document(filter: &CardFilter) -> Document {
    let mut document = Document::new();
    if let Some(id) = &filter.id {
        document.insert("_id", id_condition(id));
    }
    if let Some(pk) = &filter.indice_pk {
        document.insert("indicePk", pk.as_str());
    }
    if let Some(sk) = &filter.indice_sk {
        document.insert("indiceSk", sk.as_str());
    }
    if let Some(description) = &filter.description {
        document.insert("description", description.as_str());
    }
    document
}

/// Card collection backed by a MongoDB database
#[derive(Clone)]
pub struct MongoCollection {
    collection: Collection<Document>,
}

impl MongoCollection {
    /// Connect to `server_address` and bind to `database.collection`.
    ///
    /// The database is pinged once so an unreachable server fails here
    /// rather than on the first request.
    pub async fn connect(
        server_address: &str,
        database: &str,
        collection: &str,
    ) -> DaoResult<Self> {
        let options = ClientOptions::parse(normalize_address(server_address)).await?;
        let client = Client::with_options(options)?;
        let db = client.database(database);
        db.run_command(doc! { "ping": 1 }, None).await?;

        Ok(Self {
            collection: db.collection::<Document>(collection),
        })
    }
}

#[async_trait]
impl CardCollection for MongoCollection {
    async fn find(&self, filter: &CardFilter) -> DaoResult<Vec<Card>> {
        let cursor = self.collection.find(filter_document(filter), None).await?;
        let documents: Vec<Document> = cursor.try_collect().await?;
        documents.into_iter().map(card_from_document).collect()
    }

    async fn find_one(&self, filter: &CardFilter) -> DaoResult<Option<Card>> {
        let found = self
            .collection
            .find_one(filter_document(filter), None)
            .await?;
        found.map(card_from_document).transpose()
    }

    async fn insert_one(&self, card: &Card) -> DaoResult<()> {
        self.collection
            .insert_one(insert_document(card), None)
            .await?;
        Ok(())
    }

    async fn replace_one(&self, filter: &CardFilter, card: &Card) -> DaoResult<u64> {
        let result = self
            .collection
            .replace_one(filter_document(filter), body_document(card), None)
            .await?;
        Ok(result.matched_count)
    }

    async fn delete_one(&self, filter: &CardFilter) -> DaoResult<u64> {
        let result = self
            .collection
            .delete_one(filter_document(filter), None)
            .await?;
        Ok(result.deleted_count)
    }
}
