//! Batched, paced retrieval of per-symbol market data
//!
//! Symbols are fetched one at a time inside fixed-size batches, with a fixed
//! delay between requests and a longer one between batches. A failed symbol
//! is logged and left out; it never stops the remaining symbols.

mod orchestrator;

pub use orchestrator::{ProgressObserver, RetrievalConfig, RetrievalOrchestrator, RetrievalOutcome};
