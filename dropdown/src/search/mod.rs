//! Search pipeline: static filtering and sequenced async lookups.

mod error;
mod filter;
mod pipeline;

pub use error::LookupError;
pub use filter::{FilterMatch, FilterMode, fuzzy_filter, substring_filter};
pub use pipeline::{
    IssuedLookup, LabelFn, LookupFn, LookupRequest, LookupResult, LookupTicket, SearchOutcome,
    SearchPipeline, SearchSource,
};
