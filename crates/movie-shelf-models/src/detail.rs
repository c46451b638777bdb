use serde::{Deserialize, Serialize};

/// Full catalog record for a single movie, fetched on demand when the user
/// selects a search result. Discarded when the selection changes or closes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovieDetail {
    pub imdb_id: String,
    pub title: String,
    pub year: String,
    pub poster_url: String,
    pub runtime_minutes: u32,
    pub critic_rating: f32, // 0-10 scale
    pub plot: String,
    pub released: String,
    pub actors: String,
    pub director: String,
    pub genre: String,
}
