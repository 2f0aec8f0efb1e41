// src/lib.rs
// Public library surface for integration tests (and potential reuse).

pub mod analyze;
pub mod api;
pub mod feed;
pub mod metrics;
pub mod report;

// ---- Re-exports for stable public API ----
pub use crate::analyze::lexicon::{Lang, Lexicon};
pub use crate::analyze::result::{ExplanationDetail, SentimentResult, METHOD_KEYWORD};
pub use crate::analyze::scoring::Label;
pub use crate::analyze::SentimentAnalyzer;
pub use crate::api::{create_router, AppState};
pub use crate::report::SymbolReport;
