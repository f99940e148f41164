//! Card record
//!
//! A Card is a generic keyed record. `(indicePk, indiceSk)` identifies a
//! record for lookups by convention; nothing enforces uniqueness of the pair.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lookup namespaces stored in `indicePk`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyNamespace {
    /// Cards looked up by their card identifier
    CardId,
    /// Cards looked up by an external system's code
    ExternalCode,
}

impl KeyNamespace {
    /// Returns the stored `indicePk` value
    pub fn as_str(&self) -> &'static str {
        match self {
            KeyNamespace::CardId => "card_id",
            KeyNamespace::ExternalCode => "external_code",
        }
    }
}

impl fmt::Display for KeyNamespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The persisted Card entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    /// Primary key, assigned by the service on create
    #[serde(default)]
    pub id: String,

    /// Partition / namespace discriminator
    pub indice_pk: String,

    /// Secondary key within the namespace
    pub indice_sk: String,

    /// Opaque payload
    pub description: String,
}

impl Card {
    /// Build a card without an id
    pub fn new(
        indice_pk: impl Into<String>,
        indice_sk: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: String::new(),
            indice_pk: indice_pk.into(),
            indice_sk: indice_sk.into(),
            description: description.into(),
        }
    }

    /// Replace the id with a freshly generated one
    pub fn with_fresh_id(mut self) -> Self {
        self.id = Uuid::new_v4().to_string();
        self
    }

    /// Check the lookup key fields are present.
    ///
    /// Returns the name of the first offending field.
    pub fn validate_keys(&self) -> Result<(), &'static str> {
        if self.indice_pk.is_empty() {
            return Err("indicePk");
        }
        if self.indice_sk.is_empty() {
            return Err("indiceSk");
        }
        Ok(())
    }

    /// Check the card names an existing record (id and keys present)
    pub fn validate_identity(&self) -> Result<(), &'static str> {
        if self.id.is_empty() {
            return Err("id");
        }
        self.validate_keys()
    }
}
