//! Search pipeline with stale-response suppression.
//!
//! Every search invocation advances a per-pipeline sequence number. An async
//! lookup carries the sequence number it was issued with in its
//! [`LookupTicket`], and its response may only be applied while that number is
//! still the latest. Nothing is aborted: superseded lookups run to completion
//! and are discarded when they land.

use std::sync::Arc;
use std::time::Duration;

use futures::FutureExt;
use futures::future::BoxFuture;

use super::{FilterMode, LookupError};

/// What an async lookup resolves with.
pub type LookupResult<T> = Result<Vec<T>, LookupError>;

/// Async lookup function: query in, future of matching items out.
pub type LookupFn<T> = Arc<dyn Fn(String) -> BoxFuture<'static, LookupResult<T>> + Send + Sync>;

/// Label extractor used for static filtering and display.
pub type LabelFn<T> = Arc<dyn Fn(&T) -> String + Send + Sync>;

/// Where search results come from.
pub enum SearchSource<T> {
    /// A fixed collection filtered in place.
    Static(Vec<T>),
    /// A lookup function queried for every search.
    Async(LookupFn<T>),
}

impl<T> std::fmt::Debug for SearchSource<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SearchSource::Static(items) => write!(f, "Static({} items)", items.len()),
            SearchSource::Async(_) => write!(f, "Async"),
        }
    }
}

/// Identifies one issued lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupTicket {
    seq: u64,
    query: String,
}

impl LookupTicket {
    /// Sequence number the lookup was issued with.
    pub fn seq(&self) -> u64 {
        self.seq
    }

    /// Query the lookup was issued for.
    pub fn query(&self) -> &str {
        &self.query
    }
}

/// A lookup that has been sequenced but whose function has not run yet.
///
/// The pipeline hands this out instead of calling the lookup function itself,
/// so callers can release their own locks before user code runs.
pub struct LookupRequest<T> {
    ticket: LookupTicket,
    lookup: LookupFn<T>,
    timeout: Option<Duration>,
}

impl<T: Send + 'static> LookupRequest<T> {
    /// Identity the lookup will carry.
    pub fn ticket(&self) -> &LookupTicket {
        &self.ticket
    }

    /// Call the lookup function.
    pub fn issue(self) -> IssuedLookup<T> {
        let future = (self.lookup)(self.ticket.query.clone());
        let future = match self.timeout {
            Some(timeout) => async move {
                tokio::time::timeout(timeout, future)
                    .await
                    .unwrap_or(Err(LookupError::Timeout(timeout)))
            }
            .boxed(),
            None => future,
        };
        IssuedLookup {
            ticket: self.ticket,
            future,
        }
    }
}

impl<T> std::fmt::Debug for LookupRequest<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LookupRequest")
            .field("ticket", &self.ticket)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

/// A lookup that has been invoked but not yet awaited.
pub struct IssuedLookup<T> {
    /// Identity of the lookup.
    pub ticket: LookupTicket,
    /// The lookup's response.
    pub future: BoxFuture<'static, LookupResult<T>>,
}

impl<T> std::fmt::Debug for IssuedLookup<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IssuedLookup")
            .field("ticket", &self.ticket)
            .finish_non_exhaustive()
    }
}

/// Result of running a search.
#[derive(Debug)]
pub enum SearchOutcome<T> {
    /// Results are available now.
    Ready(Vec<T>),
    /// A lookup must be issued; its response arrives later.
    Pending(LookupRequest<T>),
}

/// Produces result lists for queries.
pub struct SearchPipeline<T> {
    source: SearchSource<T>,
    label_of: LabelFn<T>,
    filter_mode: FilterMode,
    min_query_length: usize,
    timeout: Option<Duration>,
    /// Sequence number of the most recent search
    latest: u64,
}

impl<T> std::fmt::Debug for SearchPipeline<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchPipeline")
            .field("source", &self.source)
            .field("filter_mode", &self.filter_mode)
            .field("min_query_length", &self.min_query_length)
            .field("timeout", &self.timeout)
            .field("latest", &self.latest)
            .finish()
    }
}

impl<T: Clone + Send + 'static> SearchPipeline<T> {
    /// Create a pipeline over a source.
    pub fn new(source: SearchSource<T>, label_of: LabelFn<T>) -> Self {
        Self {
            source,
            label_of,
            filter_mode: FilterMode::default(),
            min_query_length: 0,
            timeout: None,
            latest: 0,
        }
    }

    /// Set how static items are matched.
    pub fn with_filter_mode(mut self, mode: FilterMode) -> Self {
        self.filter_mode = mode;
        self
    }

    /// Set the shortest query an async lookup is issued for.
    pub fn with_min_query_length(mut self, len: usize) -> Self {
        self.min_query_length = len;
        self
    }

    /// Fail async lookups that take longer than `timeout`.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Whether results come from a lookup function.
    pub fn is_async(&self) -> bool {
        matches!(self.source, SearchSource::Async(_))
    }

    /// Shortest query an async lookup is issued for.
    pub fn min_query_length(&self) -> usize {
        self.min_query_length
    }

    /// Whether `query` is too short to issue a lookup for.
    ///
    /// Always false for static sources.
    pub fn is_below_minimum(&self, query: &str) -> bool {
        self.is_async() && query.chars().count() < self.min_query_length
    }

    /// Replace the static collection.
    ///
    /// Returns false, leaving the pipeline unchanged, for async sources.
    pub fn set_items(&mut self, items: Vec<T>) -> bool {
        match &mut self.source {
            SearchSource::Static(current) => {
                *current = items;
                true
            }
            SearchSource::Async(_) => false,
        }
    }

    /// Run a search for `query`.
    ///
    /// Every call supersedes all lookups issued before it, including calls
    /// that resolve synchronously. Async sources are only sequenced here; the
    /// lookup function runs when the returned request is issued.
    pub fn search(&mut self, query: &str) -> SearchOutcome<T> {
        self.latest += 1;

        match &self.source {
            SearchSource::Static(items) => {
                let labels: Vec<String> = items.iter().map(|item| (self.label_of)(item)).collect();
                let results = self
                    .filter_mode
                    .apply(query, &labels)
                    .into_iter()
                    .filter_map(|index| items.get(index).cloned())
                    .collect();
                SearchOutcome::Ready(results)
            }
            SearchSource::Async(_) if self.is_below_minimum(query) => {
                SearchOutcome::Ready(Vec::new())
            }
            SearchSource::Async(lookup) => SearchOutcome::Pending(LookupRequest {
                ticket: LookupTicket {
                    seq: self.latest,
                    query: query.to_string(),
                },
                lookup: Arc::clone(lookup),
                timeout: self.timeout,
            }),
        }
    }

    /// Supersede every outstanding lookup without issuing a new one.
    pub fn invalidate(&mut self) {
        self.latest += 1;
    }

    /// Whether a lookup's response may still be applied.
    pub fn is_latest(&self, ticket: &LookupTicket) -> bool {
        ticket.seq == self.latest
    }

    /// Sequence number of the most recent search.
    pub fn latest_seq(&self) -> u64 {
        self.latest
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    fn counting_pipeline(calls: Arc<AtomicUsize>) -> SearchPipeline<String> {
        let lookup: LookupFn<String> = Arc::new(move |query: String| {
            calls.fetch_add(1, Ordering::SeqCst);
            async move { Ok::<_, LookupError>(vec![query]) }.boxed()
        });
        SearchPipeline::new(SearchSource::Async(lookup), Arc::new(|s: &String| s.clone()))
            .with_min_query_length(2)
    }

    #[test]
    fn test_search_defers_lookup_call() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut pipeline = counting_pipeline(calls.clone());

        let SearchOutcome::Pending(request) = pipeline.search("al") else {
            panic!("async search should be pending");
        };
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert_eq!(request.ticket().query(), "al");

        let issued = request.issue();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(pipeline.is_latest(&issued.ticket));
    }

    #[test]
    fn test_gated_query_supersedes_request() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut pipeline = counting_pipeline(calls.clone());

        let SearchOutcome::Pending(request) = pipeline.search("al") else {
            panic!("async search should be pending");
        };
        assert!(matches!(pipeline.search("a"), SearchOutcome::Ready(items) if items.is_empty()));

        assert!(!pipeline.is_latest(request.ticket()));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }
}
