//! Append-only page sequence with single-flight fetching
//!
//! At most one request per sequence is in flight. Callers arriving while it
//! runs await the same shared future and observe the same outcome. The
//! cursor of a request is derived from the last applied page, so page N+1
//! is never requested before page N has been applied.
//!
//! Resetting the sequence (a new key) bumps its generation; a response that
//! belongs to an older generation is dropped on arrival.

use futures::future::{BoxFuture, FutureExt, Shared};
use pokedex_common::{CatalogError, Paginated, Result};
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, trace};

/// `Ok(None)` means nothing was applied: no further page, or a stale response
pub(crate) type PageOutcome<P> = Result<Option<P>>;

type InFlight<P> = Shared<BoxFuture<'static, PageOutcome<P>>>;

pub(crate) type SharedSequence<K, P> = Arc<Mutex<PageSequence<K, P>>>;

pub(crate) struct PageSequence<K, P> {
    key: K,
    pages: Arc<Vec<P>>,
    version: u64,
    generation: u64,
    in_flight: Option<InFlight<P>>,
    last_error: Option<CatalogError>,
}

impl<K, P> PageSequence<K, P>
where
    P: Paginated + Clone,
{
    pub(crate) fn new(key: K) -> Self {
        Self {
            key,
            pages: Arc::new(Vec::new()),
            version: 0,
            generation: 0,
            in_flight: None,
            last_error: None,
        }
    }

    pub(crate) fn shared(key: K) -> SharedSequence<K, P> {
        Arc::new(Mutex::new(Self::new(key)))
    }

    pub(crate) fn key(&self) -> &K {
        &self.key
    }

    pub(crate) fn pages(&self) -> Arc<Vec<P>> {
        Arc::clone(&self.pages)
    }

    /// Bumped on every change to the page list
    pub(crate) fn version(&self) -> u64 {
        self.version
    }

    pub(crate) fn is_fetching(&self) -> bool {
        self.in_flight.is_some()
    }

    pub(crate) fn last_error(&self) -> Option<CatalogError> {
        self.last_error.clone()
    }

    /// Cursor of the next page; `Some(0)` before the first fetch
    pub(crate) fn next_offset(&self) -> Option<u32> {
        match self.pages.last() {
            None => Some(0),
            Some(last) => last.next_offset(),
        }
    }

    pub(crate) fn has_next_page(&self) -> bool {
        self.next_offset().is_some()
    }

    /// Drop all pages and switch to a new key
    pub(crate) fn reset(&mut self, key: K) {
        self.key = key;
        self.pages = Arc::new(Vec::new());
        self.version += 1;
        self.generation += 1;
        self.in_flight = None;
        self.last_error = None;
    }

    fn apply(&mut self, page: P) {
        Arc::make_mut(&mut self.pages).push(page);
        self.version += 1;
        self.last_error = None;
    }
}

pub(crate) fn lock<K, P>(sequence: &Mutex<PageSequence<K, P>>) -> MutexGuard<'_, PageSequence<K, P>> {
    sequence.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Fetch and append the next page, joining a request already in flight.
///
/// `fetch` receives the current key and the cursor offset; it is only
/// invoked when a new request has to be issued.
pub(crate) async fn fetch_next<K, P, F, Fut>(
    sequence: &SharedSequence<K, P>,
    fetch: F,
) -> PageOutcome<P>
where
    K: Send + 'static,
    P: Paginated + Clone + Send + Sync + 'static,
    F: FnOnce(&K, u32) -> Fut,
    Fut: Future<Output = Result<P>> + Send + 'static,
{
    let request = {
        let mut seq = lock(sequence);

        if let Some(in_flight) = seq.in_flight.clone() {
            trace!("Joining in-flight page request");
            in_flight
        } else {
            let Some(offset) = seq.next_offset() else {
                trace!("No further pages");
                return Ok(None);
            };

            let generation = seq.generation;
            let response = fetch(&seq.key, offset);
            let target = Arc::clone(sequence);

            let request = async move {
                let outcome = response.await;
                let mut seq = lock(&target);

                if seq.generation != generation {
                    debug!(offset, "Discarding stale page response");
                    return Ok(None);
                }

                seq.in_flight = None;
                match outcome {
                    Ok(page) => {
                        seq.apply(page.clone());
                        Ok(Some(page))
                    },
                    Err(e) => {
                        seq.last_error = Some(e.clone());
                        Err(e)
                    },
                }
            }
            .boxed()
            .shared();

            seq.in_flight = Some(request.clone());
            request
        }
    };

    request.await
}
