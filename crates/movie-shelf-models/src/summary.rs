use serde::{Deserialize, Serialize};

/// One row of a catalog search result. Owned by the search controller for
/// the lifetime of the current query's result set.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MovieSummary {
    pub imdb_id: String,
    pub title: String,
    pub year: String, // The catalog reports year as text ("1999", "2011–2019")
    pub poster_url: String,
}
