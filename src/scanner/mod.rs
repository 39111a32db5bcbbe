//! Screening pipeline and report types

mod pipeline;
mod report;
mod universe;

pub use pipeline::{
    screen, ScanError, ScanRequest, Screener, Screening, MAX_CANDLES, MIN_CANDLES,
};
pub use report::{IndicatorSummary, ScanReport, ScanResult};
pub use universe::top_by_volume;
