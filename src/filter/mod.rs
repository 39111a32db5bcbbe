//! Filter predicate evaluation and ranking
//!
//! Turns an indicator snapshot into match/no-match against screening
//! criteria, and into a ranking score for matches.

mod criteria;
mod evaluator;
mod scorer;

pub use criteria::{
    BollingerFilter, CriteriaError, FilterCriteria, MaFilter, MaPeriod, MacdFilter, PriceFilter,
    RsiFilter, RsiRange,
};
pub use evaluator::matches;
pub use scorer::score;
