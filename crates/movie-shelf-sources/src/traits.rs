use async_trait::async_trait;
use movie_shelf_models::{MovieDetail, MovieSummary};

use crate::error::CatalogError;

/// A movie catalog backend. `OmdbClient` is the production implementation;
/// controller tests substitute scripted stubs.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Title search. The backing API reports an empty match set as an
    /// error (`NotFound`), never as `Ok` with an empty list.
    async fn search(&self, query: &str) -> Result<Vec<MovieSummary>, CatalogError>;

    /// Full record lookup by catalog id.
    async fn lookup(&self, imdb_id: &str) -> Result<MovieDetail, CatalogError>;
}
