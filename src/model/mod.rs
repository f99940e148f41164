//! Record model
//!
//! The single persisted entity of the service.

mod card;

pub use card::{Card, KeyNamespace};
