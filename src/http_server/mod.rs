//! # HTTP Server Module
//!
//! Axum server exposing the Card endpoints.
//!
//! # Endpoints
//!
//! - `GET /cards` - list every card
//! - `GET /cards/byExternalCode/{id}` - lookup in the `external_code` namespace
//! - `GET /cards/byId/{id}` - lookup in the `card_id` namespace
//! - `POST /cards` - create, server assigns the id
//! - `PUT /cards` - whole-document replace by id
//! - `DELETE /cards` - delete by full-record match
//! - `/health` - Health check
//! - `/observability/metrics` - Request counters

pub mod card_routes;
pub mod config;
pub mod errors;
pub mod observability_routes;
pub mod server;

pub use card_routes::{card_routes, CardState};
pub use config::HttpServerConfig;
pub use errors::{ApiError, ErrorResponse};
pub use server::HttpServer;
