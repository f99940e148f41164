//! Field-equality filters
//!
//! A filter is a conjunction of exact matches on Card fields. An unset field
//! matches anything, so the empty filter selects the whole collection.

use crate::model::Card;

/// Equality filter over Card fields
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CardFilter {
    pub id: Option<String>,
    pub indice_pk: Option<String>,
    pub indice_sk: Option<String>,
    pub description: Option<String>,
}

impl CardFilter {
    /// Matches every card
    pub fn all() -> Self {
        Self::default()
    }

    /// Primary-key match
    pub fn by_id(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            ..Self::default()
        }
    }

    /// Compound `(indicePk, indiceSk)` match
    pub fn by_key(pk: impl Into<String>, sk: impl Into<String>) -> Self {
        Self {
            indice_pk: Some(pk.into()),
            indice_sk: Some(sk.into()),
            ..Self::default()
        }
    }

    /// Match on every field of `card`
    pub fn exact(card: &Card) -> Self {
        Self {
            id: Some(card.id.clone()),
            indice_pk: Some(card.indice_pk.clone()),
            indice_sk: Some(card.indice_sk.clone()),
            description: Some(card.description.clone()),
        }
    }

    /// Evaluate the filter against a card
    pub fn matches(&self, card: &Card) -> bool {
        field_matches(&self.id, &card.id)
            && field_matches(&self.indice_pk, &card.indice_pk)
            && field_matches(&self.indice_sk, &card.indice_sk)
            && field_matches(&self.description, &card.description)
    }
}

fn field_matches(expected: &Option<String>, actual: &str) -> bool {
    expected.as_deref().map_or(true, |e| e == actual)
}
