use movie_shelf_models::{MovieDetail, MovieSummary};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::CatalogError;

// The catalog reports failures in-band: HTTP 200 with Response == "False"
// and a human-readable Error field.
#[derive(Debug, Deserialize)]
struct OmdbSearchResponse {
    #[serde(rename = "Search")]
    search: Option<Vec<OmdbSearchItem>>,
    #[serde(rename = "Response")]
    response: Option<String>,
    #[serde(rename = "Error")]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OmdbSearchItem {
    #[serde(rename = "Title")]
    title: String,
    #[serde(rename = "Year")]
    year: String,
    #[serde(rename = "Poster")]
    poster: String,
    #[serde(rename = "imdbID")]
    imdb_id: String,
}

#[derive(Debug, Deserialize)]
struct OmdbDetailResponse {
    #[serde(rename = "Title", default)]
    title: String,
    #[serde(rename = "Year", default)]
    year: String,
    #[serde(rename = "Poster", default)]
    poster: String,
    #[serde(rename = "Runtime", default)]
    runtime: String,
    #[serde(rename = "imdbRating", default)]
    imdb_rating: String,
    #[serde(rename = "Plot", default)]
    plot: String,
    #[serde(rename = "Released", default)]
    released: String,
    #[serde(rename = "Actors", default)]
    actors: String,
    #[serde(rename = "Director", default)]
    director: String,
    #[serde(rename = "Genre", default)]
    genre: String,
    #[serde(rename = "imdbID", default)]
    imdb_id: String,
    #[serde(rename = "Response")]
    response: Option<String>,
    #[serde(rename = "Error")]
    error: Option<String>,
}

/// Title search: `GET {endpoint}?apikey={key}&s={query}`
pub async fn search(
    client: &Client,
    endpoint: &str,
    api_key: &str,
    query: &str,
) -> Result<Vec<MovieSummary>, CatalogError> {
    let url = format!(
        "{}?apikey={}&s={}",
        endpoint,
        api_key,
        urlencoding::encode(query)
    );

    let response = client.get(&url).send().await.map_err(|e| {
        warn!("Catalog search request failed: {}", e);
        CatalogError::FetchFailed
    })?;

    if !response.status().is_success() {
        warn!("Catalog search returned HTTP {}", response.status());
        return Err(CatalogError::FetchFailed);
    }

    let body: OmdbSearchResponse = response.json().await.map_err(|e| {
        warn!("Failed to decode catalog search response: {}", e);
        CatalogError::FetchFailed
    })?;

    if body.response.as_deref() == Some("False") {
        debug!(
            "Catalog reported no match for {:?}: {:?}",
            query, body.error
        );
        return Err(CatalogError::NotFound);
    }

    let items = body.search.unwrap_or_default();
    debug!("Catalog search for {:?} returned {} items", query, items.len());

    Ok(items
        .into_iter()
        .map(|item| MovieSummary {
            imdb_id: item.imdb_id,
            title: item.title,
            year: item.year,
            poster_url: item.poster,
        })
        .collect())
}

/// Record lookup: `GET {endpoint}?apikey={key}&i={id}`. `Runtime` arrives
/// as `"<n> min"` and `imdbRating` as a decimal string; `"N/A"` values map
/// to 0 so the shelf aggregates stay numeric.
pub async fn lookup(
    client: &Client,
    endpoint: &str,
    api_key: &str,
    imdb_id: &str,
) -> Result<MovieDetail, CatalogError> {
    let url = format!(
        "{}?apikey={}&i={}",
        endpoint,
        api_key,
        urlencoding::encode(imdb_id)
    );

    let response = client.get(&url).send().await.map_err(|e| {
        warn!("Catalog lookup request failed: {}", e);
        CatalogError::FetchFailed
    })?;

    if !response.status().is_success() {
        warn!("Catalog lookup returned HTTP {}", response.status());
        return Err(CatalogError::FetchFailed);
    }

    let body: OmdbDetailResponse = response.json().await.map_err(|e| {
        warn!("Failed to decode catalog lookup response: {}", e);
        CatalogError::FetchFailed
    })?;

    if body.response.as_deref() == Some("False") {
        debug!(
            "Catalog reported no record for {:?}: {:?}",
            imdb_id, body.error
        );
        return Err(CatalogError::NotFound);
    }

    debug!("Catalog lookup resolved {:?} to {:?}", imdb_id, body.title);

    Ok(MovieDetail {
        // Some records omit their own id field; fall back to the one we asked for.
        imdb_id: if body.imdb_id.is_empty() {
            imdb_id.to_string()
        } else {
            body.imdb_id
        },
        title: body.title,
        year: body.year,
        poster_url: body.poster,
        runtime_minutes: parse_runtime(&body.runtime),
        critic_rating: parse_rating(&body.imdb_rating),
        plot: body.plot,
        released: body.released,
        actors: body.actors,
        director: body.director,
        genre: body.genre,
    })
}

// "142 min" -> 142; "N/A" and anything else unparsable -> 0.
fn parse_runtime(raw: &str) -> u32 {
    raw.split_whitespace()
        .next()
        .and_then(|n| n.parse().ok())
        .unwrap_or(0)
}

fn parse_rating(raw: &str) -> f32 {
    raw.parse().unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_runtime() {
        assert_eq!(parse_runtime("142 min"), 142);
        assert_eq!(parse_runtime("90 min"), 90);
        assert_eq!(parse_runtime("N/A"), 0);
        assert_eq!(parse_runtime(""), 0);
    }

    #[test]
    fn test_parse_rating() {
        assert_eq!(parse_rating("8.8"), 8.8);
        assert_eq!(parse_rating("N/A"), 0.0);
        assert_eq!(parse_rating(""), 0.0);
    }

    #[test]
    fn test_decode_search_response() {
        let json = r#"{
            "Search": [
                {"Title": "Inception", "Year": "2010", "imdbID": "tt1375666", "Type": "movie", "Poster": "https://example.com/inception.jpg"}
            ],
            "totalResults": "1",
            "Response": "True"
        }"#;

        let body: OmdbSearchResponse = serde_json::from_str(json).unwrap();
        assert_eq!(body.response.as_deref(), Some("True"));
        let items = body.search.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].imdb_id, "tt1375666");
        assert_eq!(items[0].title, "Inception");
        assert_eq!(items[0].year, "2010");
    }

    #[test]
    fn test_decode_search_error_response() {
        let json = r#"{"Response": "False", "Error": "Movie not found!"}"#;

        let body: OmdbSearchResponse = serde_json::from_str(json).unwrap();
        assert_eq!(body.response.as_deref(), Some("False"));
        assert_eq!(body.error.as_deref(), Some("Movie not found!"));
        assert!(body.search.is_none());
    }

    #[test]
    fn test_decode_detail_response() {
        let json = r#"{
            "Title": "Inception",
            "Year": "2010",
            "Released": "16 Jul 2010",
            "Runtime": "148 min",
            "Genre": "Action, Adventure, Sci-Fi",
            "Director": "Christopher Nolan",
            "Actors": "Leonardo DiCaprio, Joseph Gordon-Levitt",
            "Plot": "A thief who steals corporate secrets.",
            "Poster": "https://example.com/inception.jpg",
            "imdbRating": "8.8",
            "imdbID": "tt1375666",
            "Response": "True"
        }"#;

        let body: OmdbDetailResponse = serde_json::from_str(json).unwrap();
        assert_eq!(body.title, "Inception");
        assert_eq!(parse_runtime(&body.runtime), 148);
        assert_eq!(parse_rating(&body.imdb_rating), 8.8);
    }

    #[test]
    fn test_decode_detail_error_response_without_record_fields() {
        let json = r#"{"Response": "False", "Error": "Incorrect IMDb ID."}"#;

        let body: OmdbDetailResponse = serde_json::from_str(json).unwrap();
        assert_eq!(body.response.as_deref(), Some("False"));
        assert!(body.title.is_empty());
    }
}
