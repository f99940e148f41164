//! # Data Access Layer
//!
//! Typed Card operations over a single document collection.
//!
//! `CardsDao` owns the query logic: every operation builds a [`CardFilter`]
//! and hands it to a [`CardCollection`], the store seam. Two collections are
//! provided:
//!
//! - [`MongoCollection`] - MongoDB-backed, used in production
//! - [`MemoryCollection`] - in-process, used by tests and `backend: memory`

mod cards;
mod collection;
mod errors;
mod filter;
mod memory;
mod mongo;

pub use cards::CardsDao;
pub use collection::CardCollection;
pub use errors::{DaoError, DaoResult};
pub use filter::CardFilter;
pub use memory::MemoryCollection;
pub use mongo::{normalize_address, MongoCollection};
