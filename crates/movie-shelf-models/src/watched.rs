use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A rated movie on the watched shelf. Immutable after insertion; removed
/// only by explicit deletion by id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WatchedEntry {
    pub imdb_id: String, // Unique within the shelf
    pub title: String,
    pub year: String,
    pub poster_url: String,
    pub critic_rating: f32,
    pub runtime_minutes: u32,
    pub user_rating: f32, // 1-10
    pub rating_change_count: u32, // How many times the user changed the rating before adding
    pub added_at: DateTime<Utc>,
}
