use movie_shelf_models::{WatchedEntry, WatchedStats};
use movie_shelf_sources::CatalogSource;
use std::sync::Arc;
use tracing::{debug, info};

use crate::detail::{DetailController, DetailState};
use crate::search::{SearchController, SearchState};
use crate::shortcuts::{KeyEvent, ShortcutAction, ShortcutRegistry, SubscriptionId};
use crate::store::{PersistentValue, ValueStore};
use crate::watched::WatchedList;

/// Storage key for the persisted shelf.
pub const WATCHED_KEY: &str = "watched";

/// Top-level owner of the UI state: the two controllers, the persisted
/// watched list and the shortcut registry. Everything it depends on comes
/// in through the constructor.
pub struct Session<C> {
    search: SearchController<C>,
    detail: DetailController<C>,
    watched: PersistentValue<WatchedList>,
    shortcuts: ShortcutRegistry,
    escape_binding: Option<SubscriptionId>,
    enter_binding: Option<SubscriptionId>,
}

impl<C: CatalogSource + 'static> Session<C> {
    pub fn new(catalog: Arc<C>, store: ValueStore) -> Self {
        let watched = PersistentValue::load(store, WATCHED_KEY, WatchedList::default());
        info!("Restored {} watched entries", watched.get().len());

        // The search box starts unfocused, so Enter-clears-search is live
        // from the beginning.
        let mut shortcuts = ShortcutRegistry::default();
        let enter_binding =
            Some(shortcuts.subscribe(KeyEvent::Enter, ShortcutAction::ClearSearch));

        Self {
            search: SearchController::new(Arc::clone(&catalog)),
            detail: DetailController::new(catalog),
            watched,
            shortcuts,
            escape_binding: None,
            enter_binding,
        }
    }

    // --- search ---

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.search.set_query(query);
    }

    pub fn query(&self) -> &str {
        self.search.query()
    }

    pub fn search_state(&self) -> SearchState {
        self.search.state()
    }

    pub fn result_count(&self) -> usize {
        self.search.state().results().len()
    }

    pub async fn search_settled(&mut self) {
        self.search.settled().await;
    }

    // --- detail ---

    /// Selecting the already-selected id toggles the detail view closed
    /// instead of re-fetching it.
    pub fn select(&mut self, imdb_id: &str) {
        if self.detail.selected() == Some(imdb_id) {
            debug!("Toggling detail view closed for {:?}", imdb_id);
            self.close_detail();
            return;
        }

        self.detail.open(imdb_id);
        if self.escape_binding.is_none() {
            self.escape_binding = Some(
                self.shortcuts
                    .subscribe(KeyEvent::Escape, ShortcutAction::CloseDetail),
            );
        }
    }

    pub fn close_detail(&mut self) {
        self.detail.close();
        if let Some(id) = self.escape_binding.take() {
            self.shortcuts.unsubscribe(id);
        }
    }

    pub fn detail_state(&self) -> DetailState {
        self.detail.state()
    }

    pub fn selected(&self) -> Option<&str> {
        self.detail.selected()
    }

    pub async fn detail_settled(&mut self) {
        self.detail.settled().await;
    }

    // --- rating and the shelf ---

    /// True when the selected movie is already on the shelf; the rating
    /// surface is suppressed for it.
    pub fn selected_is_watched(&self) -> bool {
        self.detail
            .selected()
            .is_some_and(|id| self.watched.get().contains(id))
    }

    /// The rating previously recorded for an id already on the shelf.
    pub fn watched_rating(&self, imdb_id: &str) -> Option<f32> {
        self.watched.get().find(imdb_id).map(|e| e.user_rating)
    }

    pub fn rate(&mut self, value: f32) {
        if self.selected_is_watched() {
            return;
        }
        self.detail.rate(value);
    }

    pub fn pending_rating(&self) -> f32 {
        self.detail.pending_rating()
    }

    /// Moves the rated detail onto the shelf and closes the view. Returns
    /// false when there is nothing valid to add (no rating yet, record not
    /// loaded, or the id is already on the shelf).
    pub fn confirm_add(&mut self) -> bool {
        if self.selected_is_watched() {
            return false;
        }
        let Some(entry) = self.detail.confirm_add() else {
            return false;
        };
        if let Some(id) = self.escape_binding.take() {
            self.shortcuts.unsubscribe(id);
        }

        info!("Adding {:?} to the watched shelf", entry.imdb_id);
        self.watched.update(|list| list.add(entry))
    }

    pub fn remove_watched(&mut self, imdb_id: &str) -> bool {
        let removed = self.watched.update(|list| list.remove(imdb_id));
        if removed {
            info!("Removed {:?} from the watched shelf", imdb_id);
        }
        removed
    }

    pub fn watched(&self) -> &WatchedList {
        self.watched.get()
    }

    pub fn watched_entries(&self) -> &[WatchedEntry] {
        self.watched.get().entries()
    }

    pub fn stats(&self) -> WatchedStats {
        self.watched.get().stats()
    }

    // --- keyboard surface ---

    /// The Enter shortcut only clears the search while the box is not
    /// focused; the front-end reports focus changes here.
    pub fn set_search_focus(&mut self, focused: bool) {
        if focused {
            if let Some(id) = self.enter_binding.take() {
                self.shortcuts.unsubscribe(id);
            }
        } else if self.enter_binding.is_none() {
            self.enter_binding =
                Some(self.shortcuts.subscribe(KeyEvent::Enter, ShortcutAction::ClearSearch));
        }
    }

    /// Feed a key event through the registry; the resolved action is
    /// applied and reported back so the front-end can react (refocus the
    /// search box, redraw, ...).
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<ShortcutAction> {
        let action = self.shortcuts.dispatch(key)?;
        match action {
            ShortcutAction::ClearSearch => self.set_query(""),
            ShortcutAction::CloseDetail => self.close_detail(),
        }
        Some(action)
    }
}
