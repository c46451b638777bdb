pub mod detail;
pub mod search;
pub mod session;
pub mod shortcuts;
pub mod store;
pub mod watched;

pub use detail::{DetailController, DetailState};
pub use search::{SearchController, SearchState};
pub use session::{Session, WATCHED_KEY};
pub use shortcuts::{KeyEvent, ShortcutAction, ShortcutRegistry, SubscriptionId};
pub use store::{PersistentValue, ValueStore};
pub use watched::WatchedList;
