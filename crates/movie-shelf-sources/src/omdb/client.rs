use async_trait::async_trait;
use movie_shelf_models::{MovieDetail, MovieSummary};
use reqwest::Client;

use crate::error::CatalogError;
use crate::omdb::api;
use crate::traits::CatalogSource;

/// OMDb-shaped catalog client. The endpoint and API key come in through the
/// constructor; there is no module-level key constant.
pub struct OmdbClient {
    client: Client,
    endpoint: String,
    api_key: String,
}

impl OmdbClient {
    pub fn new(endpoint: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
            api_key: api_key.into(),
        }
    }
}

#[async_trait]
impl CatalogSource for OmdbClient {
    async fn search(&self, query: &str) -> Result<Vec<MovieSummary>, CatalogError> {
        api::search(&self.client, &self.endpoint, &self.api_key, query).await
    }

    async fn lookup(&self, imdb_id: &str) -> Result<MovieDetail, CatalogError> {
        api::lookup(&self.client, &self.endpoint, &self.api_key, imdb_id).await
    }
}
