//! Card HTTP Routes
//!
//! Thin adapters between HTTP and [`CardsDao`]. Mutations go straight to the
//! store: no transaction, no idempotency key. Repeating a POST creates a
//! second card with a new id.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Serialize;

use super::errors::{ApiError, ApiResult};
use crate::dao::{CardsDao, DaoError};
use crate::model::{Card, KeyNamespace};
use crate::observability::{Logger, MetricsRegistry};

// ==================
// Shared State
// ==================

/// Card state shared across handlers
pub struct CardState {
    pub dao: CardsDao,
    pub metrics: Arc<MetricsRegistry>,
}

impl CardState {
    pub fn new(dao: CardsDao, metrics: Arc<MetricsRegistry>) -> Self {
        Self { dao, metrics }
    }

    /// Unwrap a JSON body, rejecting anything that is not a Card
    fn decode(&self, payload: Result<Json<Card>, JsonRejection>) -> ApiResult<Card> {
        match payload {
            Ok(Json(card)) => Ok(card),
            Err(rejection) => {
                let reason = rejection.body_text();
                Err(self.reject(ApiError::InvalidBody, &reason))
            }
        }
    }

    fn reject(&self, err: ApiError, reason: &str) -> ApiError {
        self.metrics.increment_requests_rejected();
        Logger::warn("REQUEST_REJECTED", &[("reason", reason)]);
        err
    }

    /// Count and log a DAO failure, then convert it
    fn fail(&self, operation: &str, err: DaoError) -> ApiError {
        match &err {
            DaoError::NotFound => self.metrics.increment_lookup_misses(),
            DaoError::Store(msg) => {
                self.metrics.increment_store_errors();
                Logger::error("STORE_ERROR", &[("operation", operation), ("error", msg.as_str())]);
            }
        }
        ApiError::from(err)
    }
}

// ==================
// Response Types
// ==================

#[derive(Debug, Serialize)]
pub struct ResultResponse {
    pub result: String,
}

impl ResultResponse {
    fn success() -> Self {
        Self {
            result: "success".to_string(),
        }
    }
}

// ==================
// Card Routes
// ==================

/// Create card routes
pub fn card_routes(state: Arc<CardState>) -> Router {
    Router::new()
        .route(
            "/cards",
            get(list_cards_handler)
                .post(create_card_handler)
                .put(update_card_handler)
                .delete(delete_card_handler),
        )
        .route("/cards/byExternalCode/:id", get(find_by_external_code_handler))
        .route("/cards/byId/:id", get(find_by_card_id_handler))
        .with_state(state)
}

// ==================
// Read Handlers
// ==================

async fn list_cards_handler(State(state): State<Arc<CardState>>) -> ApiResult<Json<Vec<Card>>> {
    state.metrics.increment_lookups();
    let cards = state
        .dao
        .find_all()
        .await
        .map_err(|e| state.fail("find_all", e))?;
    Ok(Json(cards))
}

async fn find_by_external_code_handler(
    State(state): State<Arc<CardState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<Card>> {
    find_in_namespace(&state, KeyNamespace::ExternalCode, &id).await
}

async fn find_by_card_id_handler(
    State(state): State<Arc<CardState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<Card>> {
    find_in_namespace(&state, KeyNamespace::CardId, &id).await
}

async fn find_in_namespace(
    state: &CardState,
    namespace: KeyNamespace,
    sk: &str,
) -> ApiResult<Json<Card>> {
    state.metrics.increment_lookups();
    let card = state
        .dao
        .find_by_key(namespace.as_str(), sk)
        .await
        .map_err(|e| state.fail("find_by_key", e))?;
    Ok(Json(card))
}

// ==================
// Write Handlers
// ==================

async fn create_card_handler(
    State(state): State<Arc<CardState>>,
    payload: Result<Json<Card>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Card>)> {
    let card = state.decode(payload)?;
    card.validate_keys()
        .map_err(|field| state.reject(ApiError::EmptyField(field), field))?;

    let card = card.with_fresh_id();
    state
        .dao
        .insert(&card)
        .await
        .map_err(|e| state.fail("insert", e))?;

    state.metrics.increment_cards_created();
    Logger::info(
        "CARD_CREATED",
        &[
            ("id", card.id.as_str()),
            ("indicePk", card.indice_pk.as_str()),
            ("indiceSk", card.indice_sk.as_str()),
        ],
    );
    Ok((StatusCode::CREATED, Json(card)))
}

async fn update_card_handler(
    State(state): State<Arc<CardState>>,
    payload: Result<Json<Card>, JsonRejection>,
) -> ApiResult<Json<ResultResponse>> {
    let card = state.decode(payload)?;
    card.validate_identity()
        .map_err(|field| state.reject(ApiError::EmptyField(field), field))?;

    state
        .dao
        .update(&card)
        .await
        .map_err(|e| state.fail("update", e))?;

    state.metrics.increment_cards_updated();
    Logger::info("CARD_UPDATED", &[("id", card.id.as_str())]);
    Ok(Json(ResultResponse::success()))
}

async fn delete_card_handler(
    State(state): State<Arc<CardState>>,
    payload: Result<Json<Card>, JsonRejection>,
) -> ApiResult<Json<ResultResponse>> {
    let card = state.decode(payload)?;
    card.validate_identity()
        .map_err(|field| state.reject(ApiError::EmptyField(field), field))?;

    state
        .dao
        .delete(&card)
        .await
        .map_err(|e| state.fail("delete", e))?;

    state.metrics.increment_cards_deleted();
    Logger::info("CARD_DELETED", &[("id", card.id.as_str())]);
    Ok(Json(ResultResponse::success()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dao::MemoryCollection;

    fn state() -> CardState {
        CardState::new(
            CardsDao::new(Arc::new(MemoryCollection::new())),
            Arc::new(MetricsRegistry::new()),
        )
    }

    #[test]
    fn test_success_body() {
        let json = serde_json::to_value(ResultResponse::success()).unwrap();
        assert_eq!(json, serde_json::json!({ "result": "success" }));
    }

    #[test]
    fn test_fail_counts_by_kind() {
        let state = state();
        assert_eq!(state.fail("find_by_key", DaoError::NotFound), ApiError::NotFound);
        assert_eq!(
            state.fail("insert", DaoError::store("down")),
            ApiError::Store("down".to_string())
        );

        let snap = state.metrics.snapshot();
        assert_eq!(snap.lookup_misses, 1);
        assert_eq!(snap.store_errors, 1);
    }

    #[tokio::test]
    async fn test_namespace_lookup_ignores_other_namespace() {
        let state = state();
        state
            .dao
            .insert(&Card::new("card_id", "1xxx", "99").with_fresh_id())
            .await
            .unwrap();

        let err = find_in_namespace(&state, KeyNamespace::ExternalCode, "1xxx")
            .await
            .unwrap_err();
        assert_eq!(err, ApiError::NotFound);

        let Json(card) = find_in_namespace(&state, KeyNamespace::CardId, "1xxx")
            .await
            .unwrap();
        assert_eq!(card.description, "99");
    }
}
