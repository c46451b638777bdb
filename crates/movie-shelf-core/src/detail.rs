use chrono::Utc;
use movie_shelf_models::{MovieDetail, WatchedEntry};
use movie_shelf_sources::{CatalogError, CatalogSource};
use std::sync::{Arc, Mutex};
use tokio::task::JoinHandle;
use tracing::debug;

/// Lifecycle of the selected movie's record.
#[derive(Debug, Clone, PartialEq)]
pub enum DetailState {
    Closed,
    Loading,
    Loaded(MovieDetail),
    Failed(CatalogError),
}

impl DetailState {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn detail(&self) -> Option<&MovieDetail> {
        match self {
            Self::Loaded(detail) => Some(detail),
            _ => None,
        }
    }
}

/// Holds the selected id, its lazily fetched record, and the pending user
/// rating until the user confirms or closes.
pub struct DetailController<C> {
    catalog: Arc<C>,
    selected: Option<String>,
    state: Arc<Mutex<DetailState>>,
    pending_rating: f32,
    rating_change_count: u32,
    tasks: Vec<JoinHandle<()>>,
}

impl<C> DetailController<C> {
    pub fn new(catalog: Arc<C>) -> Self {
        Self {
            catalog,
            selected: None,
            state: Arc::new(Mutex::new(DetailState::Closed)),
            pending_rating: 0.0,
            rating_change_count: 0,
            tasks: Vec::new(),
        }
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn state(&self) -> DetailState {
        self.state.lock().unwrap().clone()
    }

    pub fn pending_rating(&self) -> f32 {
        self.pending_rating
    }

    pub fn rating_change_count(&self) -> u32 {
        self.rating_change_count
    }

    /// Records the pending rating; every change, including the first, bumps
    /// the change counter.
    pub fn rate(&mut self, value: f32) {
        self.pending_rating = value;
        if value > 0.0 {
            self.rating_change_count += 1;
        }
    }

    /// Discards all transient detail and rating state. A still-running
    /// fetch keeps writing into the old slot; swapping the slot out mirrors
    /// tearing the view down rather than cancelling the call.
    pub fn close(&mut self) {
        self.selected = None;
        self.pending_rating = 0.0;
        self.rating_change_count = 0;
        self.state = Arc::new(Mutex::new(DetailState::Closed));
    }

    /// Wait for every issued fetch to finish.
    pub async fn settled(&mut self) {
        for task in self.tasks.drain(..) {
            let _ = task.await;
        }
    }
}

impl<C: CatalogSource + 'static> DetailController<C> {
    /// Begins an unconditional fetch for `imdb_id`. A previous pending
    /// fetch for the same slot is not cancelled, so a slow stale response
    /// can overwrite a newer one (known limitation).
    pub fn open(&mut self, imdb_id: impl Into<String>) {
        let imdb_id = imdb_id.into();
        debug!("Opening detail view for {:?}", imdb_id);
        self.selected = Some(imdb_id.clone());
        self.pending_rating = 0.0;
        self.rating_change_count = 0;
        *self.state.lock().unwrap() = DetailState::Loading;

        let catalog = Arc::clone(&self.catalog);
        let state = Arc::clone(&self.state);
        self.tasks.push(tokio::spawn(async move {
            let result = catalog.lookup(&imdb_id).await;
            *state.lock().unwrap() = match result {
                Ok(detail) => DetailState::Loaded(detail),
                Err(err) => DetailState::Failed(err),
            };
        }));
    }

    /// Valid once a rating > 0 has been set on a loaded record: builds the
    /// watched entry from the record, the pending rating and the
    /// accumulated change count, then closes. Returns `None` (and leaves
    /// the view open) when there is nothing valid to add yet.
    pub fn confirm_add(&mut self) -> Option<WatchedEntry> {
        if self.pending_rating <= 0.0 {
            return None;
        }
        let detail = self.state.lock().unwrap().detail().cloned()?;

        let entry = WatchedEntry {
            imdb_id: detail.imdb_id,
            title: detail.title,
            year: detail.year,
            poster_url: detail.poster_url,
            critic_rating: detail.critic_rating,
            runtime_minutes: detail.runtime_minutes,
            user_rating: self.pending_rating,
            rating_change_count: self.rating_change_count,
            added_at: Utc::now(),
        };
        self.close();
        Some(entry)
    }
}
