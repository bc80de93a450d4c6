//! YouTube Data API v3 search client.

use std::time::Duration;

use reqwest::blocking::Client;
use serde::Deserialize;
use url::Url;

use crate::domain::{AppError, MAX_VIDEOS_PER_MODULE, VideoCandidate, VideoConfig, VideoQuery};
use crate::ports::VideoSearch;

pub const YOUTUBE_API_KEY: &str = "YOUTUBE_API_KEY";
const SERVICE: &str = "YouTube";
const WATCH_URL: &str = "https://www.youtube.com/watch?v=";
/// Extra results requested so that excluded videos can be skipped.
const OVERFETCH: usize = 5;

#[derive(Clone)]
pub struct YouTubeSearch {
    api_key: String,
    api_url: Url,
    relevance_language: String,
    client: Client,
}

impl std::fmt::Debug for YouTubeSearch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("YouTubeSearch")
            .field("api_url", &self.api_url)
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

impl YouTubeSearch {
    pub fn new(api_key: String, config: &VideoConfig) -> Result<Self, AppError> {
        let client =
            Client::builder().timeout(Duration::from_secs(config.timeout_secs)).build().map_err(
                |e| AppError::upstream(SERVICE, format!("Failed to create HTTP client: {}", e), None),
            )?;

        Ok(Self {
            api_key,
            api_url: config.api_url.clone(),
            relevance_language: config.relevance_language.clone(),
            client,
        })
    }

    /// Build from `YOUTUBE_API_KEY`, or `None` when the key is not set.
    pub fn from_env(config: &VideoConfig) -> Result<Option<Self>, AppError> {
        match std::env::var(YOUTUBE_API_KEY) {
            Ok(key) if !key.trim().is_empty() => Self::new(key, config).map(Some),
            _ => Ok(None),
        }
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<SearchItem>,
}

#[derive(Debug, Deserialize)]
struct SearchItem {
    id: ItemId,
    #[serde(default)]
    snippet: Snippet,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ItemId {
    #[serde(default)]
    video_id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct Snippet {
    #[serde(default)]
    title: String,
    #[serde(default)]
    description: String,
}

impl VideoSearch for YouTubeSearch {
    fn search_videos(&self, query: &VideoQuery) -> Result<Vec<VideoCandidate>, AppError> {
        if query.count == 0 {
            return Ok(Vec::new());
        }
        let max_results = (query.count + OVERFETCH).min(MAX_VIDEOS_PER_MODULE).to_string();

        let response = self
            .client
            .get(self.api_url.clone())
            .query(&[
                ("part", "snippet"),
                ("q", query.query.as_str()),
                ("type", "video"),
                ("maxResults", max_results.as_str()),
                ("relevanceLanguage", self.relevance_language.as_str()),
                ("videoDefinition", "high"),
                ("key", self.api_key.as_str()),
            ])
            .send()
            .map_err(|e| {
                AppError::upstream(SERVICE, format!("HTTP request failed: {}", e.without_url()), None)
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::upstream(
                SERVICE,
                format!("search returned {}", status),
                Some(status.as_u16()),
            ));
        }

        let body: SearchResponse = response.json().map_err(|e| {
            AppError::upstream(
                SERVICE,
                format!("Failed to parse response: {}", e.without_url()),
                Some(status.as_u16()),
            )
        })?;

        let candidates = body
            .items
            .into_iter()
            .filter_map(|item| {
                let id = item.id.video_id?;
                if id.trim().is_empty() || query.exclude.contains(&id) {
                    return None;
                }
                Some(VideoCandidate {
                    url: format!("{}{}", WATCH_URL, id),
                    id,
                    title: item.snippet.title,
                    description: item.snippet.description,
                })
            })
            .take(query.count)
            .collect();

        Ok(candidates)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use mockito::Matcher;

    use super::*;

    fn search_for(server: &mockito::Server) -> YouTubeSearch {
        let config = VideoConfig {
            api_url: Url::parse(&format!("{}/youtube/v3/search", server.url())).unwrap(),
            timeout_secs: 1,
            videos_per_module: 4,
            relevance_language: "en".to_string(),
        };
        YouTubeSearch::new("yt-key".to_string(), &config).unwrap()
    }

    fn items(ids: &[&str]) -> String {
        let items: Vec<_> = ids
            .iter()
            .map(|id| {
                serde_json::json!({
                    "id": { "kind": "youtube#video", "videoId": id },
                    "snippet": { "title": format!("Title {}", id), "description": "desc" }
                })
            })
            .collect();
        serde_json::json!({ "items": items }).to_string()
    }

    #[test]
    fn sends_search_parameters_and_skips_excluded() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("GET", "/youtube/v3/search")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("part".into(), "snippet".into()),
                Matcher::UrlEncoded("q".into(), "pricing tailoring".into()),
                Matcher::UrlEncoded("type".into(), "video".into()),
                Matcher::UrlEncoded("maxResults".into(), "9".into()),
                Matcher::UrlEncoded("relevanceLanguage".into(), "en".into()),
                Matcher::UrlEncoded("videoDefinition".into(), "high".into()),
                Matcher::UrlEncoded("key".into(), "yt-key".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(items(&["a", "b", "c", "d", "e", "f"]))
            .expect(1)
            .create();

        let query = VideoQuery {
            query: "pricing tailoring".to_string(),
            count: 4,
            exclude: ["b", "d"].into_iter().map(String::from).collect(),
        };
        let videos = search_for(&server).search_videos(&query).unwrap();

        let ids: Vec<_> = videos.iter().map(|v| v.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "c", "e", "f"]);
        assert_eq!(videos[0].url, "https://www.youtube.com/watch?v=a");
        assert_eq!(videos[0].title, "Title a");
        mock.assert();
    }

    #[test]
    fn max_results_is_capped() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("GET", "/youtube/v3/search")
            .match_query(Matcher::UrlEncoded("maxResults".into(), "10".into()))
            .with_status(200)
            .with_body(items(&[]))
            .expect(1)
            .create();

        let query = VideoQuery { query: "q".to_string(), count: 8, exclude: BTreeSet::new() };
        assert!(search_for(&server).search_videos(&query).unwrap().is_empty());
        mock.assert();
    }

    #[test]
    fn items_without_video_id_are_ignored() {
        let mut server = mockito::Server::new();
        let _mock = server
            .mock("GET", "/youtube/v3/search")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"{"items":[{"id":{"kind":"youtube#channel"},"snippet":{"title":"c"}}]}"#)
            .create();

        let query = VideoQuery { query: "q".to_string(), count: 4, exclude: BTreeSet::new() };
        assert!(search_for(&server).search_videos(&query).unwrap().is_empty());
    }

    #[test]
    fn http_error_is_reported_with_status() {
        let mut server = mockito::Server::new();
        let _mock = server
            .mock("GET", "/youtube/v3/search")
            .match_query(Matcher::Any)
            .with_status(403)
            .create();

        let query = VideoQuery { query: "q".to_string(), count: 4, exclude: BTreeSet::new() };
        let err = search_for(&server).search_videos(&query).unwrap_err();
        assert!(matches!(err, AppError::Upstream { status: Some(403), .. }));
    }
}
