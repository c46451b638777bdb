use movie_shelf_models::MovieSummary;
use movie_shelf_sources::{CatalogError, CatalogSource, RequestGate};
use std::sync::{Arc, Mutex};
use tokio::task::JoinHandle;
use tracing::debug;

/// Minimum trimmed query length that triggers a catalog call.
const MIN_QUERY_LEN: usize = 3;

/// Lifecycle of the current query's result set. Each query change either
/// resets to `Idle` (short query) or moves through `Loading` into
/// `Loaded`/`Failed`. A superseded fetch never transitions the state.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchState {
    Idle,
    Loading,
    Loaded(Vec<MovieSummary>),
    Failed(CatalogError),
}

impl SearchState {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn results(&self) -> &[MovieSummary] {
        match self {
            Self::Loaded(results) => results,
            _ => &[],
        }
    }
}

/// Owns the query text and at most one live catalog search. Setting a new
/// query always cancels the previous request before anything else; that
/// cancellation is the only rate limiting there is.
pub struct SearchController<C> {
    catalog: Arc<C>,
    query: String,
    state: Arc<Mutex<SearchState>>,
    gate: RequestGate,
    tasks: Vec<JoinHandle<()>>,
}

impl<C> SearchController<C> {
    pub fn new(catalog: Arc<C>) -> Self {
        Self {
            catalog,
            query: String::new(),
            state: Arc::new(Mutex::new(SearchState::Idle)),
            gate: RequestGate::default(),
            tasks: Vec::new(),
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn state(&self) -> SearchState {
        self.state.lock().unwrap().clone()
    }

    /// Wait for every issued fetch to finish, including superseded ones
    /// (their completions are no-ops).
    pub async fn settled(&mut self) {
        for task in self.tasks.drain(..) {
            let _ = task.await;
        }
    }
}

impl<C: CatalogSource + 'static> SearchController<C> {
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();

        // Supersede whatever is in flight before deciding what to do next.
        self.gate.cancel();

        if self.query.trim().len() < MIN_QUERY_LEN {
            *self.state.lock().unwrap() = SearchState::Idle;
            return;
        }

        *self.state.lock().unwrap() = SearchState::Loading;

        let token = self.gate.issue();
        let catalog = Arc::clone(&self.catalog);
        let state = Arc::clone(&self.state);
        let query = self.query.clone();
        self.tasks.push(tokio::spawn(async move {
            let result = catalog.search(&query).await;

            // The token goes stale the moment a newer query is issued; the
            // check and the write share the lock so a stale completion can
            // never land after the newer query's transition.
            let mut slot = state.lock().unwrap();
            if token.is_cancelled() {
                debug!("Discarding superseded search result for {:?}", query);
                return;
            }
            *slot = match result {
                Ok(results) => SearchState::Loaded(results),
                Err(err) => SearchState::Failed(err),
            };
        }));
    }
}

impl<C> Drop for SearchController<C> {
    fn drop(&mut self) {
        // Tearing the controller down cancels any outstanding call.
        self.gate.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use movie_shelf_models::MovieDetail;
    use tokio::sync::Semaphore;

    fn create_summary(imdb_id: &str, title: &str) -> MovieSummary {
        MovieSummary {
            imdb_id: imdb_id.to_string(),
            title: title.to_string(),
            year: "2014".to_string(),
            poster_url: String::new(),
        }
    }

    /// Scripted catalog: records queries, optionally parks each search on a
    /// semaphore until the test releases it, and answers from a fixed script.
    struct ScriptedCatalog {
        script: fn(&str) -> Result<Vec<MovieSummary>, CatalogError>,
        release: Option<Arc<Semaphore>>,
        calls: Mutex<Vec<String>>,
    }

    impl ScriptedCatalog {
        fn immediate(script: fn(&str) -> Result<Vec<MovieSummary>, CatalogError>) -> Self {
            Self {
                script,
                release: None,
                calls: Mutex::new(Vec::new()),
            }
        }

        fn blocking(
            script: fn(&str) -> Result<Vec<MovieSummary>, CatalogError>,
            release: Arc<Semaphore>,
        ) -> Self {
            Self {
                script,
                release: Some(release),
                calls: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl CatalogSource for ScriptedCatalog {
        async fn search(&self, query: &str) -> Result<Vec<MovieSummary>, CatalogError> {
            self.calls.lock().unwrap().push(query.to_string());
            if let Some(release) = &self.release {
                release.acquire().await.unwrap().forget();
            }
            (self.script)(query)
        }

        async fn lookup(&self, _imdb_id: &str) -> Result<MovieDetail, CatalogError> {
            Err(CatalogError::FetchFailed)
        }
    }

    fn one_result(query: &str) -> Result<Vec<MovieSummary>, CatalogError> {
        Ok(vec![create_summary("tt0001", query)])
    }

    #[tokio::test]
    async fn test_short_query_resets_to_idle_without_a_call() {
        let catalog = Arc::new(ScriptedCatalog::immediate(one_result));
        let mut controller = SearchController::new(Arc::clone(&catalog));

        controller.set_query("ab");
        controller.settled().await;
        assert_eq!(controller.state(), SearchState::Idle);

        // Trimming applies before the length check.
        controller.set_query("  ab  ");
        controller.settled().await;
        assert_eq!(controller.state(), SearchState::Idle);

        assert!(catalog.calls().is_empty());
    }

    #[tokio::test]
    async fn test_query_loads_results() {
        let catalog = Arc::new(ScriptedCatalog::immediate(one_result));
        let mut controller = SearchController::new(Arc::clone(&catalog));

        controller.set_query("memento");
        assert!(controller.state().is_loading());

        controller.settled().await;
        let state = controller.state();
        assert_eq!(state.results().len(), 1);
        assert_eq!(state.results()[0].title, "memento");
        assert_eq!(catalog.calls(), vec!["memento".to_string()]);
    }

    #[tokio::test]
    async fn test_not_found_becomes_failed_state() {
        let catalog = Arc::new(ScriptedCatalog::immediate(|_| Err(CatalogError::NotFound)));
        let mut controller = SearchController::new(catalog);

        controller.set_query("zzzzzz");
        controller.settled().await;

        let state = controller.state();
        assert_eq!(state, SearchState::Failed(CatalogError::NotFound));
        match state {
            SearchState::Failed(err) => assert_eq!(err.to_string(), "Movie not found"),
            _ => unreachable!(),
        }
    }

    #[tokio::test]
    async fn test_transport_failure_becomes_failed_state() {
        let catalog = Arc::new(ScriptedCatalog::immediate(|_| Err(CatalogError::FetchFailed)));
        let mut controller = SearchController::new(catalog);

        controller.set_query("memento");
        controller.settled().await;

        match controller.state() {
            SearchState::Failed(err) => assert_eq!(err.to_string(), "Failed to Fetch"),
            state => panic!("expected failure, got {:?}", state),
        }
    }

    #[tokio::test]
    async fn test_short_query_clears_a_previous_failure() {
        let catalog = Arc::new(ScriptedCatalog::immediate(|_| Err(CatalogError::NotFound)));
        let mut controller = SearchController::new(catalog);

        controller.set_query("zzzzzz");
        controller.settled().await;
        assert!(matches!(controller.state(), SearchState::Failed(_)));

        controller.set_query("zz");
        controller.settled().await;
        assert_eq!(controller.state(), SearchState::Idle);
    }

    #[tokio::test]
    async fn test_superseded_response_never_alters_state() {
        let release = Arc::new(Semaphore::new(0));
        let catalog = Arc::new(ScriptedCatalog::blocking(one_result, Arc::clone(&release)));
        let mut controller = SearchController::new(Arc::clone(&catalog));

        controller.set_query("first query");
        controller.set_query("second query");

        // Both fetches complete now, the first one after its cancellation.
        release.add_permits(2);
        controller.settled().await;

        let state = controller.state();
        assert_eq!(state.results().len(), 1);
        assert_eq!(state.results()[0].title, "second query");
        assert_eq!(
            catalog.calls(),
            vec!["first query".to_string(), "second query".to_string()]
        );
    }

    #[tokio::test]
    async fn test_short_query_cancels_in_flight_call() {
        let release = Arc::new(Semaphore::new(0));
        let catalog = Arc::new(ScriptedCatalog::blocking(one_result, Arc::clone(&release)));
        let mut controller = SearchController::new(catalog);

        controller.set_query("first query");
        controller.set_query("ab");
        assert_eq!(controller.state(), SearchState::Idle);

        // The late completion of the canceled call is a no-op.
        release.add_permits(1);
        controller.settled().await;
        assert_eq!(controller.state(), SearchState::Idle);
    }
}
