//! cardsvc - CRUD HTTP service for keyed Card documents
//!
//! Layers, leaf first:
//!
//! - [`model`] - the Card record
//! - [`dao`] - typed queries over one document collection
//! - [`http_server`] - axum handlers and server
//! - [`cli`] - configuration and boot

pub mod cli;
pub mod dao;
pub mod http_server;
pub mod model;
pub mod observability;
