//! Observability for cardsvc
//!
//! - Structured logging: one JSON object per line
//! - Request counters exported over HTTP
//!
//! ```ignore
//! use cardsvc::observability::{Logger, MetricsRegistry};
//!
//! Logger::info("CARD_CREATED", &[("id", &card.id)]);
//!
//! let metrics = MetricsRegistry::new();
//! metrics.increment_cards_created();
//! ```

mod logger;
mod metrics;

pub use logger::{Logger, Severity};
pub use metrics::{MetricsRegistry, MetricsSnapshot};
